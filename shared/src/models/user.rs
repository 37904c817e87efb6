//! User Model

use serde::{Deserialize, Serialize};

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    /// Role IDs assigned to this user
    #[serde(default)]
    pub role_ids: Vec<i64>,
    pub is_active: bool,
}

/// Create user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub role_ids: Vec<i64>,
}

/// Update user payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role_ids: Option<Vec<i64>>,
    pub is_active: Option<bool>,
}
