//! Role Model

use serde::{Deserialize, Serialize};

/// Role entity (RBAC)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Backend privilege codes granted by this role (e.g. "ITEM_MODIFY")
    #[serde(default)]
    pub privileges: Vec<String>,
    pub is_system: bool,
    pub is_active: bool,
}

/// Create role payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleCreate {
    pub name: String,
    pub description: Option<String>,
    pub privileges: Vec<String>,
}

/// Update role payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub privileges: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

/// Replace a role's privilege set (`POST /roles/{id}/privileges`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolePrivilegeSet {
    pub privileges: Vec<String>,
}
