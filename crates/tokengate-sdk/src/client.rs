//! High-level client for the TokenGate auth server.
//!
//! [`TokenGateClient`] keeps the access token in memory only, attaches
//! it to every outgoing call, and transparently renews it through the
//! [`RefreshCoordinator`] when the server answers 401. The refresh token
//! lives in the reqwest cookie store and is never read by this code,
//! mirroring an HttpOnly cookie in a browser.
//!
//! Retry protocol: a call that fails authorization joins (or starts) a
//! single refresh cycle, is retried exactly once with the fresh token,
//! and surfaces a second rejection instead of looping.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokengate_models::{LoginRequest, Principal, REFRESH_ROUTE, SessionResponse};

use crate::coordinator::RefreshCoordinator;
use crate::error::SdkError;

/// An authenticated (or not-yet-authenticated) TokenGate session.
///
/// Cheap to share behind an `Arc`; all methods take `&self` and the
/// coordinator serialises the only mutable state.
pub struct TokenGateClient {
    http: reqwest::Client,
    base_url: String,
    coordinator: RefreshCoordinator,
}

impl TokenGateClient {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a client for the server at `base_url`.
    ///
    /// The underlying HTTP client carries a cookie store so the refresh
    /// cookie set at login is replayed on refresh calls automatically.
    pub fn new(base_url: &str) -> Result<Self, SdkError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| SdkError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            coordinator: RefreshCoordinator::new(),
        })
    }

    // ------------------------------------------------------------------
    // Session lifecycle
    // ------------------------------------------------------------------

    /// `POST /login` — authenticate and store the returned access token.
    pub async fn login(&self, email: &str, password: &str) -> Result<Principal, SdkError> {
        let res = self
            .http
            .post(format!("{}/login", self.base_url))
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        if res.status() == StatusCode::UNAUTHORIZED {
            return Err(SdkError::Auth("invalid credentials".into()));
        }
        let session: SessionResponse = res.error_for_status()?.json().await?;

        self.coordinator.set_token(Some(session.access_token));
        tracing::debug!(user_id = session.user.id, "logged in");
        Ok(session.user)
    }

    /// `POST /logout` — clear the refresh cookie server-side and discard
    /// the in-memory access token.
    pub async fn logout(&self) -> Result<(), SdkError> {
        self.http
            .post(format!("{}/logout", self.base_url))
            .send()
            .await?
            .error_for_status()?;

        self.coordinator.set_token(None);
        tracing::debug!("logged out");
        Ok(())
    }

    /// The currently held access token, if any. Never persisted.
    pub fn access_token(&self) -> Option<String> {
        self.coordinator.bearer()
    }

    // ------------------------------------------------------------------
    // Protected resources
    // ------------------------------------------------------------------

    /// `GET /me` — fetch the authenticated identity.
    pub async fn me(&self) -> Result<Principal, SdkError> {
        let body: serde_json::Value = self.get_json("/me").await?;
        Ok(serde_json::from_value(body["me"].clone())?)
    }

    /// Authorized GET returning a deserialized JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SdkError> {
        let res = self.authorized_get(path).await?;
        Ok(res.json().await?)
    }

    // ------------------------------------------------------------------
    // Refresh-and-retry protocol
    // ------------------------------------------------------------------

    /// GET with bearer attachment and at most one refresh-and-retry.
    async fn authorized_get(&self, path: &str) -> Result<reqwest::Response, SdkError> {
        let res = self.dispatch(path).await?;
        if res.status() != StatusCode::UNAUTHORIZED {
            return Ok(res.error_for_status()?);
        }

        // Authorization failed: join (or start) the single refresh
        // cycle, then retry this call once with the fresh token.
        self.coordinator.refresh(|| self.call_refresh()).await?;

        let retried = self.dispatch(path).await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            // Even the fresh token was rejected; do not refresh again.
            return Err(SdkError::Unauthorized);
        }
        Ok(retried.error_for_status()?)
    }

    /// Send a GET, attaching the held access token when present.
    async fn dispatch(&self, path: &str) -> Result<reqwest::Response, SdkError> {
        let mut req = self.http.get(format!("{}{}", self.base_url, path));
        if let Some(token) = self.coordinator.bearer() {
            req = req.bearer_auth(token);
        }
        Ok(req.send().await?)
    }

    /// Hit the refresh endpoint; the cookie store supplies the refresh
    /// token. Returns the new access token.
    async fn call_refresh(&self) -> Result<String, SdkError> {
        let res = self
            .http
            .get(format!("{}{}", self.base_url, REFRESH_ROUTE))
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(SdkError::Auth(format!(
                "refresh rejected with status {}",
                res.status()
            )));
        }

        let session: SessionResponse = res.json().await?;
        Ok(session.access_token)
    }
}
