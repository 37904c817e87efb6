//! Bulk-import preview/commit flows
//!
//! The backend previews an uploaded CSV into [`ImportPreviewRow`]s; the
//! user edits rows client-side and commits once every row validates.
//! Re-validation is a single pure function per import kind, invoked
//! uniformly after any row mutation, independent of UI event wiring.

use std::collections::BTreeMap;

use shared::models::{ImportPreviewRow, ImportRowFailure, RowStatus};

pub mod category;
pub mod machinery;

pub use category::{CategoryImportContext, CategoryImportFlow, validate_category_row};
pub use machinery::{
    MachineryImportContext, MachineryImportFlow, derive_type_code, next_asset_tag,
    validate_machinery_row,
};

/// Result of validating one row: the normalized column values plus the
/// derived status and messages
#[derive(Debug, Clone)]
pub struct RowOutcome {
    pub normalized: BTreeMap<String, String>,
    pub status: RowStatus,
    pub issues: Vec<String>,
    pub notes: Vec<String>,
}

impl RowOutcome {
    /// Write the outcome back onto the row
    pub fn apply_to(self, row: &mut ImportPreviewRow) {
        row.normalized = self.normalized;
        row.status = self.status;
        row.issues = self.issues;
        row.notes = self.notes;
    }
}

/// Accumulates findings during validation and derives the row status:
/// any blocking issue -> ERROR, else any warning -> WARN, else VALID.
/// Notes never affect the status.
#[derive(Debug, Default)]
pub(crate) struct OutcomeBuilder {
    normalized: BTreeMap<String, String>,
    blocking: Vec<String>,
    warnings: Vec<String>,
    notes: Vec<String>,
}

impl OutcomeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalized(&mut self, column: &str, value: impl Into<String>) {
        self.normalized.insert(column.to_string(), value.into());
    }

    pub fn blocking(&mut self, message: impl Into<String>) {
        self.blocking.push(message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn note(&mut self, message: impl Into<String>) {
        self.notes.push(message.into());
    }

    pub fn finish(self) -> RowOutcome {
        let status = if !self.blocking.is_empty() {
            RowStatus::Error
        } else if !self.warnings.is_empty() {
            RowStatus::Warn
        } else {
            RowStatus::Valid
        };
        let mut issues = self.blocking;
        issues.extend(self.warnings);
        RowOutcome {
            normalized: self.normalized,
            status,
            issues,
            notes: self.notes,
        }
    }
}

/// Merge per-row commit failures back into the preview rows as ERROR
/// issues; the user stays on the review step to correct them
pub fn merge_commit_failures(rows: &mut [ImportPreviewRow], failures: &[ImportRowFailure]) {
    for failure in failures {
        if let Some(row) = rows.iter_mut().find(|r| r.row_index == failure.row_index) {
            row.issues.push(failure.message.clone());
            row.status = RowStatus::Error;
        } else {
            tracing::warn!(
                row_index = failure.row_index,
                "Commit failure references a row no longer in the batch"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(row_index: usize) -> ImportPreviewRow {
        ImportPreviewRow {
            row_index,
            raw: BTreeMap::new(),
            normalized: BTreeMap::new(),
            status: RowStatus::Valid,
            issues: Vec::new(),
            notes: Vec::new(),
        }
    }

    #[test]
    fn test_status_derivation() {
        let mut builder = OutcomeBuilder::new();
        builder.note("informational only");
        assert_eq!(builder.finish().status, RowStatus::Valid);

        let mut builder = OutcomeBuilder::new();
        builder.warning("type does not exist");
        builder.note("informational");
        assert_eq!(builder.finish().status, RowStatus::Warn);

        let mut builder = OutcomeBuilder::new();
        builder.warning("type does not exist");
        builder.blocking("name is required");
        let outcome = builder.finish();
        assert_eq!(outcome.status, RowStatus::Error);
        // blocking issues listed before warnings
        assert_eq!(outcome.issues[0], "name is required");
        assert_eq!(outcome.issues.len(), 2);
    }

    #[test]
    fn test_merge_commit_failures() {
        let mut rows = vec![row(0), row(2)];
        let failures = vec![
            ImportRowFailure {
                row_index: 2,
                message: "asset tag already in use".to_string(),
            },
            ImportRowFailure {
                row_index: 7,
                message: "phantom".to_string(),
            },
        ];
        merge_commit_failures(&mut rows, &failures);
        assert_eq!(rows[0].status, RowStatus::Valid);
        assert_eq!(rows[1].status, RowStatus::Error);
        assert_eq!(rows[1].issues, ["asset tag already in use"]);
    }
}
