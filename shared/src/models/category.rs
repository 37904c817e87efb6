//! Category Model

use serde::{Deserialize, Serialize};

/// Item category entity
///
/// Categories form a forest: `parent_id = None` marks a root. Sibling
/// order within a parent is `display_order`, ties broken by name.
/// Categories are never hard-deleted; deactivation sets `is_active`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<i64>,
    pub display_order: i32,
    pub is_active: bool,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<i64>,
    /// Omitted = server assigns the next order among siblings
    pub display_order: Option<i32>,
}

/// Update category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Absent = keep current parent; `Some(None)` serializes as `null` = move to root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Option<i64>>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}
