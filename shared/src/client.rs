//! Client-related types shared between the HTTP client and the console
//!
//! Request/response DTOs for the auth endpoints. The login endpoint is
//! form-encoded; everything else is JSON.

use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request (sent as `application/x-www-form-urlencoded`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token pair returned by login and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

/// Current user response (`GET /auth/me`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub full_name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    /// Resolved backend privilege codes across all roles
    #[serde(default)]
    pub privileges: Vec<String>,
}

/// Per-user resolved privileges (`GET /users/{id}/privileges`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPrivileges {
    pub user_id: i64,
    pub privileges: Vec<String>,
}
