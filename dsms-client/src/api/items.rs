//! Item endpoints

use shared::models::{Item, ItemCreate, ItemLabelSet, ItemUpdate, Label};

use crate::error::ClientResult;
use crate::http::DsmsClient;
use crate::transport::{Method, RawRequest, Transport};

/// Server-side item list filters
#[derive(Debug, Clone, Default)]
pub struct ItemQuery {
    pub category_id: Option<i64>,
    pub is_spare_part: Option<bool>,
    pub include_inactive: bool,
}

impl ItemQuery {
    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(category_id) = self.category_id {
            query.push(("category_id".to_string(), category_id.to_string()));
        }
        if let Some(spare) = self.is_spare_part {
            query.push(("is_spare_part".to_string(), spare.to_string()));
        }
        if self.include_inactive {
            query.push(("include_inactive".to_string(), "true".to_string()));
        }
        query
    }
}

impl<T: Transport> DsmsClient<T> {
    /// `GET /items/`
    pub async fn list_items(&self, query: &ItemQuery) -> ClientResult<Vec<Item>> {
        self.request(RawRequest::new(Method::Get, "items/").with_query(query.to_query()))
            .await
    }

    /// `POST /items/`
    pub async fn create_item(&self, payload: &ItemCreate) -> ClientResult<Item> {
        self.request(RawRequest::new(Method::Post, "items/").with_json(payload)?)
            .await
    }

    /// `PUT /items/{id}`
    pub async fn update_item(&self, id: i64, payload: &ItemUpdate) -> ClientResult<Item> {
        self.request(RawRequest::new(Method::Put, format!("items/{}", id)).with_json(payload)?)
            .await
    }

    /// `DELETE /items/{id}` (deactivation)
    pub async fn delete_item(&self, id: i64) -> ClientResult<()> {
        self.request_empty(RawRequest::new(Method::Delete, format!("items/{}", id)))
            .await
    }

    /// `GET /items/{id}/labels`
    pub async fn item_labels(&self, id: i64) -> ClientResult<Vec<Label>> {
        self.request(RawRequest::new(Method::Get, format!("items/{}/labels", id)))
            .await
    }

    /// `POST /items/{id}/labels` - replaces the full label set atomically
    pub async fn set_item_labels(&self, id: i64, label_ids: Vec<i64>) -> ClientResult<()> {
        self.request_empty(
            RawRequest::new(Method::Post, format!("items/{}/labels", id))
                .with_json(&ItemLabelSet { label_ids })?,
        )
        .await
    }
}
