//! Import Preview Model
//!
//! Rows travel from the preview endpoint to the client, are edited and
//! re-validated in client memory, and go back verbatim on commit. They
//! are never persisted independently.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Well-known column names of the category import file
pub mod category_columns {
    pub const NAME: &str = "category_name";
    pub const PARENT: &str = "parent_name";
    pub const DESCRIPTION: &str = "description";
}

/// Well-known column names of the machinery import file
pub mod machinery_columns {
    pub const NAME: &str = "machine_name";
    pub const ASSET_TAG: &str = "asset_tag";
    pub const TYPE: &str = "type_name";
    pub const LOCATION: &str = "location";
    pub const STATUS: &str = "status";
}

/// Validity state of one preview row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RowStatus {
    Valid,
    Warn,
    Error,
}

/// One line of an uploaded import file plus computed validity state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportPreviewRow {
    pub row_index: usize,
    /// Column values exactly as uploaded (or as last edited)
    pub raw: BTreeMap<String, String>,
    /// Column values after client-side normalization
    #[serde(default)]
    pub normalized: BTreeMap<String, String>,
    pub status: RowStatus,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl ImportPreviewRow {
    /// Raw column value, empty string when the column is absent
    pub fn raw_col(&self, column: &str) -> &str {
        self.raw.get(column).map(String::as_str).unwrap_or("")
    }

    /// Normalized column value, falling back to the raw value
    pub fn col(&self, column: &str) -> &str {
        self.normalized
            .get(column)
            .or_else(|| self.raw.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Preview response for category import (`POST /item-categories/import/preview`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryImportPreview {
    pub rows: Vec<ImportPreviewRow>,
    /// Existing category names, for "already exists, will be updated" notes
    #[serde(default)]
    pub existing_names: Vec<String>,
}

/// Preview response for machinery import (`POST /machinery/import/preview`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineryImportPreview {
    pub rows: Vec<ImportPreviewRow>,
    /// Existing machine names, lower-cased by the backend, for duplicate detection
    #[serde(default)]
    pub existing_machine_names: Vec<String>,
    /// Known machinery type names
    #[serde(default)]
    pub known_type_names: Vec<String>,
}

/// Commit payload for category import (`POST /item-categories/import/commit`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryImportCommit {
    pub rows: Vec<ImportPreviewRow>,
}

/// Commit payload for machinery import (`POST /machinery/import/commit`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineryImportCommit {
    pub rows: Vec<ImportPreviewRow>,
    pub auto_create_types: bool,
}

/// Per-row failure reported by a commit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRowFailure {
    pub row_index: usize,
    pub message: String,
}

/// Commit result; an empty `failures` list means the import completed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportCommitResult {
    pub created: u64,
    pub updated: u64,
    #[serde(default)]
    pub failures: Vec<ImportRowFailure>,
}
