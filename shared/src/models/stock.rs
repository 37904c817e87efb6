//! Stock Model
//!
//! Read models for stock levels and movements, plus the manual
//! adjustment payload.

use serde::{Deserialize, Serialize};

/// Stock level of one item in one store (`GET /stores/{id}/stock`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockLevel {
    pub item_id: i64,
    pub store_id: i64,
    pub on_hand: i64,
    pub reserved: i64,
    pub reorder_point: Option<i64>,
}

/// Low stock report entry (`GET /stock/low-stock`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LowStockEntry {
    pub item_id: i64,
    pub item_name: String,
    pub store_id: i64,
    pub on_hand: i64,
    pub reorder_point: i64,
}

/// Availability of one item across stores (`GET /stock/availability`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAvailability {
    pub item_id: i64,
    pub total_on_hand: i64,
    pub total_reserved: i64,
    #[serde(default)]
    pub by_store: Vec<StockLevel>,
}

/// Stock movement entry (`GET /stock/movements`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: i64,
    pub item_id: i64,
    pub store_id: i64,
    pub quantity_delta: i64,
    pub movement_type: String,
    pub reference: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Manual stock adjustment (`POST /stock/adjust`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAdjust {
    pub item_id: i64,
    pub store_id: i64,
    pub quantity_delta: i64,
    pub reason: String,
}
