//! Server configuration.
//!
//! Secrets, TTLs, listen port and the allowed browser origin are read
//! from environment variables at startup and injected into Axum handlers
//! via [`axum::extract::State`]. Malformed TTL values fall back to the
//! default with a warning rather than aborting startup.

use std::time::Duration;

/// Default access-token lifetime: 15 minutes.
pub const DEFAULT_ACCESS_TTL_SECS: u64 = 15 * 60;
/// Default refresh-token lifetime: 7 days.
pub const DEFAULT_REFRESH_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Global configuration shared across all handlers.
///
/// Constructed once at startup and passed as Axum shared state.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Secret signing access tokens.
    pub access_secret: String,
    /// Secret signing refresh tokens; must differ from `access_secret`
    /// for the key-separation invariant to hold.
    pub refresh_secret: String,
    /// Access-token lifetime.
    pub access_ttl: Duration,
    /// Refresh-token lifetime; also the refresh cookie's max-age.
    pub refresh_ttl: Duration,
    /// Port to listen on (default `4000`).
    pub listen_port: u16,
    /// Origin allowed to make credentialed cross-origin requests.
    pub client_origin: String,
}

impl AppConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable                  | Default                 | Description                 |
    /// |---------------------------|-------------------------|-----------------------------|
    /// | `ACCESS_TOKEN_SECRET`     | dev-only fallback       | Access-token signing secret |
    /// | `REFRESH_TOKEN_SECRET`    | dev-only fallback       | Refresh-token signing secret|
    /// | `ACCESS_TOKEN_TTL_SECS`   | `900` (15 min)          | Access-token lifetime       |
    /// | `REFRESH_TOKEN_TTL_SECS`  | `604800` (7 days)       | Refresh-token lifetime      |
    /// | `PORT`                    | `4000`                  | HTTP listen port            |
    /// | `CLIENT_ORIGIN`           | `http://localhost:5173` | Allowed CORS origin         |
    pub fn from_env() -> Self {
        let listen_port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(4000);

        Self {
            access_secret: std::env::var("ACCESS_TOKEN_SECRET")
                .unwrap_or_else(|_| "tokengate-dev-access-secret".to_string()),
            refresh_secret: std::env::var("REFRESH_TOKEN_SECRET")
                .unwrap_or_else(|_| "tokengate-dev-refresh-secret".to_string()),
            access_ttl: ttl_from_env("ACCESS_TOKEN_TTL_SECS", DEFAULT_ACCESS_TTL_SECS),
            refresh_ttl: ttl_from_env("REFRESH_TOKEN_TTL_SECS", DEFAULT_REFRESH_TTL_SECS),
            listen_port,
            client_origin: std::env::var("CLIENT_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
        }
    }
}

/// Read a TTL in seconds from the environment, falling back to the
/// default (with a warning) when the variable is unset or malformed.
fn ttl_from_env(var: &str, default_secs: u64) -> Duration {
    match std::env::var(var) {
        Ok(raw) => Duration::from_secs(parse_ttl(var, &raw, default_secs)),
        Err(_) => Duration::from_secs(default_secs),
    }
}

fn parse_ttl(var: &str, raw: &str, default_secs: u64) -> u64 {
    raw.parse().unwrap_or_else(|_| {
        tracing::warn!(%var, value = %raw, default = default_secs, "malformed TTL, using default");
        default_secs
    })
}
