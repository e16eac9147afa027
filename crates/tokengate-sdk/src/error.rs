//! SDK error types.
//!
//! [`SdkError`] is the single error type returned by every fallible
//! operation in the SDK.  It wraps underlying transport and
//! serialization errors into a unified enum.
//!
//! [`SdkError::RefreshFailed`] is terminal for the session: every call
//! waiting on the failed refresh cycle receives it, the held access
//! token is discarded, and the caller must log in again.

/// Error type for all SDK operations.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Invalid or missing configuration (e.g. bad base URL).
    #[error("configuration error: {0}")]
    Config(String),

    /// The server rejected credentials or a refresh token.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A protected call was rejected even after one refresh-and-retry.
    #[error("unauthorized")]
    Unauthorized,

    /// The refresh cycle this call was waiting on did not produce a
    /// usable token; the session has ended.
    #[error("refresh cycle failed: {0}")]
    RefreshFailed(String),

    /// HTTP request failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization / deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
