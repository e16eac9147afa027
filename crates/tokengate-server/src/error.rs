//! Error types for the TokenGate auth server.
//!
//! [`ApiError`] unifies all failure modes and implements [`axum::response::IntoResponse`]
//! so handlers can return `Result<…, ApiError>` directly.
//!
//! Every authentication failure maps to 401 with an opaque body; the
//! request gate and auth routes log the underlying [`TokenError`] cause
//! before collapsing it, so verification detail never reaches a client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::token::TokenError;

/// Errors that can occur during the authentication flow.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Login identifier/secret mismatch. Deliberately does not say
    /// whether the user exists.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No bearer token in the `Authorization` header.
    #[error("missing access token")]
    MissingToken,

    /// The presented access token failed verification for any reason
    /// (expired, tampered, malformed — unified at this boundary).
    #[error("access token expired or invalid")]
    InvalidOrExpiredToken,

    /// The refresh cookie is absent.
    #[error("no refresh token")]
    NoRefreshToken,

    /// The refresh cookie failed verification (expired and tampered alike).
    #[error("invalid refresh token")]
    InvalidRefreshToken,

    /// Token construction failed server-side.
    #[error("token issuance failed: {0}")]
    Issuance(#[from] TokenError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::InvalidCredentials
            | Self::MissingToken
            | Self::InvalidOrExpiredToken
            | Self::NoRefreshToken
            | Self::InvalidRefreshToken => (StatusCode::UNAUTHORIZED, self.to_string()),
            Self::Issuance(_) => {
                // Never leak codec detail to the client.
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };

        tracing::warn!(%status, error = %self, "request rejected");
        (status, Json(json!({ "error": message }))).into_response()
    }
}
