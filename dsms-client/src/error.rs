//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connection, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response; `detail` comes from the error body when present
    #[error("API error ({status}): {detail}")]
    Api { status: u16, detail: String },

    /// Login rejected
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Token refresh failed after a 401, or a second 401 after refresh.
    /// The token pair has been cleared; the user must log in again.
    #[error("Session expired")]
    SessionExpired,

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
