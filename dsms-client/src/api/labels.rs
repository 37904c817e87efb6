//! Label endpoints

use shared::models::{Label, LabelCreate, LabelUpdate};

use crate::error::ClientResult;
use crate::http::DsmsClient;
use crate::transport::{Method, RawRequest, Transport};

impl<T: Transport> DsmsClient<T> {
    /// `GET /labels/`
    pub async fn list_labels(&self) -> ClientResult<Vec<Label>> {
        self.request(RawRequest::new(Method::Get, "labels/")).await
    }

    /// `POST /labels/`
    pub async fn create_label(&self, payload: &LabelCreate) -> ClientResult<Label> {
        self.request(RawRequest::new(Method::Post, "labels/").with_json(payload)?)
            .await
    }

    /// `PUT /labels/{id}`
    pub async fn update_label(&self, id: i64, payload: &LabelUpdate) -> ClientResult<Label> {
        self.request(RawRequest::new(Method::Put, format!("labels/{}", id)).with_json(payload)?)
            .await
    }

    /// `DELETE /labels/{id}` (deactivation)
    pub async fn delete_label(&self, id: i64) -> ClientResult<()> {
        self.request_empty(RawRequest::new(Method::Delete, format!("labels/{}", id)))
            .await
    }
}
