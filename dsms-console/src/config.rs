//! Console configuration
//!
//! Loaded once at startup from the environment (a local `.env` file is
//! honored in development).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

/// Console configuration
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Backend base URL
    pub api_base_url: String,
    /// Request timeout in seconds
    pub request_timeout: u64,
    /// Where the session is persisted between launches
    pub session_file: PathBuf,
}

impl ConsoleConfig {
    /// Load configuration from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_base_url =
            std::env::var("DSMS_API_URL").map_err(|_| ConfigError::Missing("DSMS_API_URL"))?;

        let request_timeout = match std::env::var("DSMS_REQUEST_TIMEOUT") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("DSMS_REQUEST_TIMEOUT", raw))?,
            Err(_) => 30,
        };

        let session_file = std::env::var("DSMS_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".dsms/session.json"));

        Ok(Self {
            api_base_url,
            request_timeout,
            session_file,
        })
    }
}
