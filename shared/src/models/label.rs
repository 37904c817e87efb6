//! Label Model

use serde::{Deserialize, Serialize};

/// Label entity
///
/// `group` is free text used purely for faceted display; it is not a
/// separate entity. Labels are deactivated, never hard-deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    pub id: i64,
    pub name: String,
    /// `#RRGGBB`, background color for chips
    pub color: Option<String>,
    pub group: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}

/// Create label payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelCreate {
    pub name: String,
    pub color: Option<String>,
    pub group: Option<String>,
    pub description: Option<String>,
}

/// Update label payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
    pub group: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
