//! Request gate: bearer-token middleware for protected routes.
//!
//! Extracts the `Authorization: Bearer` token, verifies it with the
//! access codec, and inserts the decoded [`Principal`] as a request
//! extension for the wrapped handler. Every failure cause maps to the
//! same 401 so the client-side coordinator has one unambiguous refresh
//! trigger; the cause is logged here and nowhere else.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use tokengate_models::Principal;

use crate::AppState;
use crate::error::ApiError;

/// Verify the presented access token before allowing the request through.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::MissingToken)?;

    let claims = state.access_codec.verify::<Principal>(token).map_err(|cause| {
        tracing::warn!(%cause, "access token rejected");
        ApiError::InvalidOrExpiredToken
    })?;

    req.extensions_mut().insert(claims.payload);
    Ok(next.run(req).await)
}
