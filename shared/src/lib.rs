//! Shared types for the DSMS console
//!
//! Common types exchanged with the stock-management REST backend:
//! domain models, request/response DTOs and small utilities shared
//! between the HTTP client and the console crates.

pub mod client;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
