//! Item Model

use serde::{Deserialize, Serialize};

/// Inventory item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    /// Immutable after creation
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub unit_of_measure: String,
    pub category_id: Option<i64>,
    pub is_spare_part: bool,
    pub is_active: bool,
    /// Label IDs attached to this item (populated by the backend)
    #[serde(default)]
    pub label_ids: Vec<i64>,
}

/// Create item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCreate {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub unit_of_measure: String,
    pub category_id: Option<i64>,
    pub is_spare_part: Option<bool>,
}

/// Update item payload (no `sku` - immutable post-create)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub unit_of_measure: Option<String>,
    /// Absent = keep current category; `Some(None)` serializes as `null` = uncategorized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Option<i64>>,
    pub is_spare_part: Option<bool>,
    pub is_active: Option<bool>,
}

/// Replace the full label set of an item (`POST /items/{id}/labels`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemLabelSet {
    pub label_ids: Vec<i64>,
}
