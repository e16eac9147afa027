//! # TokenGate SDK
//!
//! Client for the TokenGate auth server, implementing the short-lived
//! access-token / long-lived refresh-token protocol:
//!
//! * [`TokenGateClient`] — logs in, logs out, and calls protected
//!   resources with the held access token attached.
//! * [`RefreshCoordinator`] — single-flight renewal: any number of
//!   concurrently failing calls share one refresh operation and are
//!   replayed (or rejected together) once its outcome is known.
//! * [`SdkError`] — unified error type for all SDK operations.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use tokengate_sdk::TokenGateClient;
//!
//! # async fn run() -> Result<(), tokengate_sdk::SdkError> {
//! let client = TokenGateClient::new("http://localhost:4000")?;
//! let user = client.login("jane@example.com", "pass123").await?;
//! println!("logged in as {}", user.name);
//!
//! // Transparently refreshes and retries if the token has expired.
//! let me = client.me().await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod coordinator;
pub mod error;

pub use client::TokenGateClient;
pub use coordinator::RefreshCoordinator;
pub use error::SdkError;

// Re-export the shared wire types for ergonomic usage.
pub use tokengate_models::{Principal, SessionResponse};
