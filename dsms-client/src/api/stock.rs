//! Stock endpoints

use shared::models::{LowStockEntry, StockAdjust, StockAvailability, StockLevel, StockMovement};

use crate::error::ClientResult;
use crate::http::DsmsClient;
use crate::transport::{Method, RawRequest, Transport};

/// Server-side movement list filters
#[derive(Debug, Clone, Default)]
pub struct StockMovementQuery {
    pub item_id: Option<i64>,
    pub store_id: Option<i64>,
}

impl StockMovementQuery {
    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(item_id) = self.item_id {
            query.push(("item_id".to_string(), item_id.to_string()));
        }
        if let Some(store_id) = self.store_id {
            query.push(("store_id".to_string(), store_id.to_string()));
        }
        query
    }
}

impl<T: Transport> DsmsClient<T> {
    /// `GET /stores/{id}/stock`
    pub async fn store_stock(&self, store_id: i64) -> ClientResult<Vec<StockLevel>> {
        self.request(RawRequest::new(Method::Get, format!("stores/{}/stock", store_id)))
            .await
    }

    /// `GET /stock/low-stock`
    pub async fn low_stock(&self) -> ClientResult<Vec<LowStockEntry>> {
        self.request(RawRequest::new(Method::Get, "stock/low-stock"))
            .await
    }

    /// `GET /stock/availability?item_id=`
    pub async fn stock_availability(&self, item_id: i64) -> ClientResult<StockAvailability> {
        self.request(
            RawRequest::new(Method::Get, "stock/availability")
                .with_query(vec![("item_id".to_string(), item_id.to_string())]),
        )
        .await
    }

    /// `GET /stock/movements`
    pub async fn stock_movements(
        &self,
        query: &StockMovementQuery,
    ) -> ClientResult<Vec<StockMovement>> {
        self.request(RawRequest::new(Method::Get, "stock/movements").with_query(query.to_query()))
            .await
    }

    /// `POST /stock/adjust`
    pub async fn adjust_stock(&self, payload: &StockAdjust) -> ClientResult<()> {
        self.request_empty(RawRequest::new(Method::Post, "stock/adjust").with_json(payload)?)
            .await
    }
}
