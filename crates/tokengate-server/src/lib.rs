//! TokenGate auth server — issues, verifies and rotates signed session tokens.
//!
//! The server speaks the short-lived access-token / long-lived
//! refresh-token protocol:
//!
//! 1. `POST /login` verifies credentials and returns an access token in
//!    the body plus a refresh token in an HttpOnly cookie.
//! 2. `GET /me` (protected) requires a valid access token.
//! 3. `GET /refresh-token` mints a new access token from the cookie.
//! 4. `POST /logout` clears the cookie.
//!
//! Verification is side-effect-free and there is no per-session server
//! state, so any number of instances can serve the same secrets.
//!
//! The router is split into [`auth_routes`] and [`protected_routes`] so
//! tests can mount them against independent state; [`router`] combines
//! both for normal operation.

pub mod config;
pub mod error;
pub mod gate;
pub mod routes;
pub mod store;
pub mod token;

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::config::AppConfig;
use crate::store::{StaticUserStore, UserStore};
use crate::token::{TokenCodec, TokenKind};

pub use tokengate_models::{REFRESH_COOKIE, REFRESH_ROUTE};

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

/// State shared across all Axum handlers.
pub struct AppState {
    /// Codec issuing and verifying access tokens.
    pub access_codec: TokenCodec,
    /// Codec issuing and verifying refresh tokens (independent secret).
    pub refresh_codec: TokenCodec,
    /// Read-only credential / identity lookup.
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    /// Build state from configuration and a user store.
    pub fn new(config: &AppConfig, store: Arc<dyn UserStore>) -> Self {
        Self {
            access_codec: TokenCodec::new(
                TokenKind::Access,
                &config.access_secret,
                config.access_ttl,
            ),
            refresh_codec: TokenCodec::new(
                TokenKind::Refresh,
                &config.refresh_secret,
                config.refresh_ttl,
            ),
            store,
        }
    }

    /// State backed by the single demo user record.
    pub fn demo(config: &AppConfig) -> Self {
        Self::new(config, Arc::new(StaticUserStore::demo()))
    }
}

// ---------------------------------------------------------------------------
// Routers
// ---------------------------------------------------------------------------

/// Login / logout / refresh routes.
pub fn auth_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/login", post(routes::login))
        .route("/logout", post(routes::logout))
        .route(REFRESH_ROUTE, get(routes::refresh))
        .with_state(state)
}

/// Resource routes behind the request gate.
pub fn protected_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/me", get(routes::me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            gate::require_auth,
        ))
        .with_state(state)
}

/// The full application router.
pub fn router(state: Arc<AppState>) -> Router {
    auth_routes(state.clone()).merge(protected_routes(state))
}
