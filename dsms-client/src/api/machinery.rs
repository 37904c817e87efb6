//! Machinery endpoints

use shared::models::{
    ImportCommitResult, ImportPreviewRow, Machinery, MachineryCreate, MachineryImportCommit,
    MachineryImportPreview, MachineryStatus, MachineryType, MachineryTypeCreate, MachineryUpdate,
    MaintenanceNote, MaintenanceRecord,
};

use crate::error::ClientResult;
use crate::http::DsmsClient;
use crate::transport::{Method, RawRequest, Transport};

/// Server-side machinery list filters
#[derive(Debug, Clone, Default)]
pub struct MachineryQuery {
    pub status: Option<MachineryStatus>,
    pub type_id: Option<i64>,
}

impl MachineryQuery {
    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(type_id) = self.type_id {
            query.push(("type_id".to_string(), type_id.to_string()));
        }
        query
    }
}

impl<T: Transport> DsmsClient<T> {
    /// `GET /machinery/`
    pub async fn list_machinery(&self, query: &MachineryQuery) -> ClientResult<Vec<Machinery>> {
        self.request(RawRequest::new(Method::Get, "machinery/").with_query(query.to_query()))
            .await
    }

    /// `GET /machinery/{id}`
    pub async fn get_machinery(&self, id: i64) -> ClientResult<Machinery> {
        self.request(RawRequest::new(Method::Get, format!("machinery/{}", id)))
            .await
    }

    /// `POST /machinery/`
    pub async fn create_machinery(&self, payload: &MachineryCreate) -> ClientResult<Machinery> {
        self.request(RawRequest::new(Method::Post, "machinery/").with_json(payload)?)
            .await
    }

    /// `PUT /machinery/{id}`
    pub async fn update_machinery(
        &self,
        id: i64,
        payload: &MachineryUpdate,
    ) -> ClientResult<Machinery> {
        self.request(RawRequest::new(Method::Put, format!("machinery/{}", id)).with_json(payload)?)
            .await
    }

    /// `DELETE /machinery/{id}`
    pub async fn delete_machinery(&self, id: i64) -> ClientResult<()> {
        self.request_empty(RawRequest::new(Method::Delete, format!("machinery/{}", id)))
            .await
    }

    /// `POST /machinery/{id}/maintenance/start`
    pub async fn start_maintenance(&self, id: i64, note: &MaintenanceNote) -> ClientResult<()> {
        self.request_empty(
            RawRequest::new(Method::Post, format!("machinery/{}/maintenance/start", id))
                .with_json(note)?,
        )
        .await
    }

    /// `POST /machinery/{id}/maintenance/end`
    pub async fn end_maintenance(&self, id: i64, note: &MaintenanceNote) -> ClientResult<()> {
        self.request_empty(
            RawRequest::new(Method::Post, format!("machinery/{}/maintenance/end", id))
                .with_json(note)?,
        )
        .await
    }

    /// `GET /machinery/{id}/history`
    pub async fn machinery_history(&self, id: i64) -> ClientResult<Vec<MaintenanceRecord>> {
        self.request(RawRequest::new(Method::Get, format!("machinery/{}/history", id)))
            .await
    }

    /// `GET /machinery/types`
    pub async fn list_machinery_types(&self) -> ClientResult<Vec<MachineryType>> {
        self.request(RawRequest::new(Method::Get, "machinery/types"))
            .await
    }

    /// `POST /machinery/types`
    pub async fn create_machinery_type(
        &self,
        payload: &MachineryTypeCreate,
    ) -> ClientResult<MachineryType> {
        self.request(RawRequest::new(Method::Post, "machinery/types").with_json(payload)?)
            .await
    }

    /// `PUT /machinery/types/{id}`
    pub async fn update_machinery_type(
        &self,
        id: i64,
        payload: &MachineryTypeCreate,
    ) -> ClientResult<MachineryType> {
        self.request(
            RawRequest::new(Method::Put, format!("machinery/types/{}", id)).with_json(payload)?,
        )
        .await
    }

    /// `GET /machinery/types/{id}/machinery`
    pub async fn machinery_of_type(&self, id: i64) -> ClientResult<Vec<Machinery>> {
        self.request(RawRequest::new(
            Method::Get,
            format!("machinery/types/{}/machinery", id),
        ))
        .await
    }

    /// `POST /machinery/import/preview` (multipart file upload)
    pub async fn machinery_import_preview(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<MachineryImportPreview> {
        self.request(
            RawRequest::new(Method::Post, "machinery/import/preview").with_file(file_name, bytes),
        )
        .await
    }

    /// `POST /machinery/import/commit`
    pub async fn machinery_import_commit(
        &self,
        rows: Vec<ImportPreviewRow>,
        auto_create_types: bool,
    ) -> ClientResult<ImportCommitResult> {
        self.request(
            RawRequest::new(Method::Post, "machinery/import/commit").with_json(
                &MachineryImportCommit {
                    rows,
                    auto_create_types,
                },
            )?,
        )
        .await
    }
}
