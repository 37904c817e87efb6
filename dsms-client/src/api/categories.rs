//! Category endpoints

use shared::models::{
    Category, CategoryCreate, CategoryImportCommit, CategoryImportPreview, CategoryUpdate,
    ImportCommitResult, ImportPreviewRow,
};

use crate::error::ClientResult;
use crate::http::DsmsClient;
use crate::transport::{Method, RawRequest, Transport};

impl<T: Transport> DsmsClient<T> {
    /// `GET /item-categories/`
    pub async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        self.request(RawRequest::new(Method::Get, "item-categories/"))
            .await
    }

    /// `POST /item-categories/`
    pub async fn create_category(&self, payload: &CategoryCreate) -> ClientResult<Category> {
        self.request(RawRequest::new(Method::Post, "item-categories/").with_json(payload)?)
            .await
    }

    /// `PUT /item-categories/{id}`
    pub async fn update_category(
        &self,
        id: i64,
        payload: &CategoryUpdate,
    ) -> ClientResult<Category> {
        self.request(
            RawRequest::new(Method::Put, format!("item-categories/{}", id)).with_json(payload)?,
        )
        .await
    }

    /// `DELETE /item-categories/{id}` (deactivation)
    pub async fn delete_category(&self, id: i64) -> ClientResult<()> {
        self.request_empty(RawRequest::new(
            Method::Delete,
            format!("item-categories/{}", id),
        ))
        .await
    }

    /// `POST /item-categories/import/preview` (multipart file upload)
    pub async fn category_import_preview(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<CategoryImportPreview> {
        self.request(
            RawRequest::new(Method::Post, "item-categories/import/preview")
                .with_file(file_name, bytes),
        )
        .await
    }

    /// `POST /item-categories/import/commit`
    pub async fn category_import_commit(
        &self,
        rows: Vec<ImportPreviewRow>,
    ) -> ClientResult<ImportCommitResult> {
        self.request(
            RawRequest::new(Method::Post, "item-categories/import/commit")
                .with_json(&CategoryImportCommit { rows })?,
        )
        .await
    }
}
