//! Request and response bodies for the auth endpoints.
//!
//! These types define the JSON contract between server and SDK. The
//! bodies use camelCase field names (`accessToken`) — the refresh token
//! never appears in any body, it travels only in the HttpOnly cookie.

use serde::{Deserialize, Serialize};

use crate::Principal;

/// Route serving access-token refresh; the refresh cookie is scoped to it.
pub const REFRESH_ROUTE: &str = "/refresh-token";

/// Name of the HttpOnly refresh cookie.
pub const REFRESH_COOKIE: &str = "refresh_token";

// ---------------------------------------------------------------------------
// LoginRequest
// ---------------------------------------------------------------------------

/// Body of `POST /login`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    /// Login identifier (email).
    pub email: String,
    /// Plaintext secret, compared for exact match server-side.
    pub password: String,
}

// ---------------------------------------------------------------------------
// SessionResponse
// ---------------------------------------------------------------------------

/// Body returned by `POST /login` and `GET /refresh-token`.
///
/// Carries the short-lived access token (readable by the client, held in
/// memory only) and the authenticated [`Principal`].
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Signed access token for the `Authorization: Bearer` header.
    pub access_token: String,
    /// The identity the token was issued for.
    pub user: Principal,
}
