//! Auth and resource handlers.
//!
//! Three state transitions make up the session lifecycle:
//!
//! 1. `POST /login` — the only transition that creates a refresh session:
//!    issues an access token (body) and a refresh token (HttpOnly cookie).
//! 2. `GET /refresh-token` — mints a fresh access token from a valid
//!    refresh cookie. The refresh token itself is not rotated.
//! 3. `POST /logout` — clears the refresh cookie. Stateless signing means
//!    there is nothing server-side to invalidate; a refresh token captured
//!    before logout remains usable until its natural expiry.
//!
//! `GET /me` is the protected resource, reachable only through the
//! request gate.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Extension, Json, State};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokengate_models::{LoginRequest, Principal, REFRESH_COOKIE, REFRESH_ROUTE, SessionResponse};
use tracing::info;

use crate::AppState;
use crate::error::ApiError;

/// Refresh tokens carry only the user id; everything else is re-derived
/// from the store when a new access token is minted.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct RefreshPayload {
    pub id: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `POST /login` — verify credentials and start a session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), ApiError> {
    // Unknown user and wrong password are deliberately indistinguishable.
    let user = state
        .store
        .find_by_email(&req.email)
        .filter(|u| u.password == req.password)
        .ok_or(ApiError::InvalidCredentials)?;

    let principal = user.principal();
    let access_token = state.access_codec.issue(&principal)?;
    let refresh_token = state.refresh_codec.issue(&RefreshPayload { id: principal.id })?;

    info!(user_id = principal.id, "login successful");

    let jar = jar.add(refresh_cookie(refresh_token, state.refresh_codec.ttl()));
    Ok((jar, Json(SessionResponse { access_token, user: principal })))
}

/// `GET /refresh-token` — mint a new access token from the refresh cookie.
///
/// The cookie is left untouched on failure; it only changes on login and
/// logout.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Json<SessionResponse>, ApiError> {
    let cookie = jar.get(REFRESH_COOKIE).ok_or(ApiError::NoRefreshToken)?;

    let claims = state
        .refresh_codec
        .verify::<RefreshPayload>(cookie.value())
        .map_err(|cause| {
            tracing::warn!(%cause, "refresh token rejected");
            ApiError::InvalidRefreshToken
        })?;

    // Re-derive the principal from the store; embedded claims may be stale.
    let user = state
        .store
        .find_by_id(claims.payload.id)
        .ok_or(ApiError::InvalidRefreshToken)?;
    let principal = user.principal();

    let access_token = state.access_codec.issue(&principal)?;
    info!(user_id = principal.id, "access token rotated");

    Ok(Json(SessionResponse { access_token, user: principal }))
}

/// `POST /logout` — clear the refresh cookie. Idempotent.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    // Removal must match the path the cookie was scoped to.
    let jar = jar.remove(Cookie::build((REFRESH_COOKIE, "")).path(REFRESH_ROUTE));
    (jar, Json(json!({ "message": "logged out" })))
}

/// `GET /me` — the protected resource; echoes the gate-verified identity.
pub async fn me(Extension(principal): Extension<Principal>) -> Json<Value> {
    Json(json!({ "me": principal }))
}

// ---------------------------------------------------------------------------
// Cookie construction
// ---------------------------------------------------------------------------

/// Build the HttpOnly, same-site, path-scoped refresh cookie.
fn refresh_cookie(token: String, max_age: Duration) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, token))
        .path(REFRESH_ROUTE)
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::try_from(max_age).unwrap_or(time::Duration::MAX))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_cookie_attributes() {
        let cookie = refresh_cookie("tok".into(), Duration::from_secs(604_800));
        assert_eq!(cookie.name(), REFRESH_COOKIE);
        assert_eq!(cookie.path(), Some(REFRESH_ROUTE));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(604_800)));
    }
}
