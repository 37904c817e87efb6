//! Stock page
//!
//! Read models for per-store stock, low-stock report, availability and
//! movements, plus the manual adjustment form.

use dsms_client::api::StockMovementQuery;
use dsms_client::{DsmsClient, Transport};
use shared::models::{LowStockEntry, StockAdjust, StockAvailability, StockLevel, StockMovement};

use crate::page::PageState;
use crate::privileges::{PrivilegeFlag, has_privilege};

/// Manual adjustment draft
#[derive(Debug, Clone, Default)]
pub struct AdjustDraft {
    pub item_id: Option<i64>,
    pub store_id: Option<i64>,
    pub quantity_delta: i64,
    pub reason: String,
}

/// Stock page controller
#[derive(Debug, Default)]
pub struct StockPage {
    pub state: PageState<StockLevel>,
    pub store_id: Option<i64>,
    pub low_stock: Vec<LowStockEntry>,
    pub availability: Option<StockAvailability>,
    pub movements: Vec<StockMovement>,
    pub movement_query: StockMovementQuery,
    pub adjust_draft: AdjustDraft,
    pub adjusting: bool,
}

impl StockPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_adjust(&self, privileges: &[String]) -> bool {
        has_privilege(privileges, PrivilegeFlag::CanAdjustStock)
    }

    /// Stock of the selected store
    pub async fn load<T: Transport>(&mut self, client: &DsmsClient<T>) {
        let Some(store_id) = self.store_id else {
            return;
        };
        let generation = self.state.begin_load();
        let result = client.store_stock(store_id).await;
        self.state
            .finish_load(generation, result.map_err(|e| e.to_string()));
    }

    pub async fn load_low_stock<T: Transport>(&mut self, client: &DsmsClient<T>) {
        match client.low_stock().await {
            Ok(entries) => self.low_stock = entries,
            Err(e) => self.state.error = Some(e.to_string()),
        }
    }

    pub async fn load_availability<T: Transport>(&mut self, client: &DsmsClient<T>, item_id: i64) {
        match client.stock_availability(item_id).await {
            Ok(availability) => self.availability = Some(availability),
            Err(e) => self.state.error = Some(e.to_string()),
        }
    }

    pub async fn load_movements<T: Transport>(&mut self, client: &DsmsClient<T>) {
        match client.stock_movements(&self.movement_query).await {
            Ok(movements) => self.movements = movements,
            Err(e) => self.state.error = Some(e.to_string()),
        }
    }

    fn validate_adjust(&self) -> Result<StockAdjust, String> {
        let Some(item_id) = self.adjust_draft.item_id else {
            return Err("Item is required".to_string());
        };
        let Some(store_id) = self.adjust_draft.store_id else {
            return Err("Store is required".to_string());
        };
        if self.adjust_draft.quantity_delta == 0 {
            return Err("Adjustment cannot be zero".to_string());
        }
        let reason = self.adjust_draft.reason.trim();
        if reason.is_empty() {
            return Err("Reason is required".to_string());
        }
        Ok(StockAdjust {
            item_id,
            store_id,
            quantity_delta: self.adjust_draft.quantity_delta,
            reason: reason.to_string(),
        })
    }

    /// Submit the manual adjustment, then reload the store view
    pub async fn submit_adjust<T: Transport>(&mut self, client: &DsmsClient<T>) {
        let payload = match self.validate_adjust() {
            Ok(payload) => payload,
            Err(message) => {
                self.state.error = Some(message);
                return;
            }
        };
        self.adjusting = true;
        let result = client.adjust_stock(&payload).await;
        self.adjusting = false;
        match result {
            Ok(()) => {
                tracing::info!(
                    item_id = payload.item_id,
                    store_id = payload.store_id,
                    delta = payload.quantity_delta,
                    "Stock adjusted"
                );
                self.adjust_draft = AdjustDraft::default();
                self.state.error = None;
                self.load(client).await;
            }
            Err(e) => self.state.error = Some(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust_validation() {
        let mut page = StockPage::new();
        assert!(page.validate_adjust().is_err());

        page.adjust_draft = AdjustDraft {
            item_id: Some(1),
            store_id: Some(2),
            quantity_delta: 0,
            reason: "recount".to_string(),
        };
        assert!(page.validate_adjust().is_err());

        page.adjust_draft.quantity_delta = -3;
        let payload = page.validate_adjust().unwrap();
        assert_eq!(payload.quantity_delta, -3);
        assert_eq!(payload.reason, "recount");
    }
}
