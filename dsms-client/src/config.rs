//! Client configuration

/// Client configuration for connecting to the DSMS backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g. "http://localhost:8000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration with the default timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
        }
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }
}
