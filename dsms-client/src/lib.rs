//! DSMS Client - HTTP client for the stock-management REST backend
//!
//! Provides a typed method per REST operation, bearer-token attachment,
//! error-body normalization and a one-shot 401 -> refresh -> retry
//! sequence. The transport is a trait seam so the token handling is
//! testable without a live server.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::DsmsClient;
pub use transport::{Body, Method, RawRequest, RawResponse, ReqwestTransport, Transport};

// Re-export shared types for convenience
pub use shared::client::{CurrentUser, LoginRequest, TokenPair, UserPrivileges};
