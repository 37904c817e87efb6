//! Category import flow
//!
//! Stricter commit policy than machinery: every row must be VALID and
//! the batch can never be emptied below one row.

use std::collections::{HashMap, HashSet};

use dsms_client::{DsmsClient, Transport};
use shared::models::category_columns as columns;
use shared::models::{CategoryImportPreview, ImportPreviewRow, RowStatus};
use shared::util::normalize_display_name;

use crate::category_tree::{CategoryTree, MAX_CATEGORY_DEPTH};
use crate::import::{OutcomeBuilder, RowOutcome, merge_commit_failures};

/// Reference data the pure validator runs against
#[derive(Debug)]
pub struct CategoryImportContext<'a> {
    /// Lower-cased existing category name -> depth, from the loaded tree
    pub existing_depths: &'a HashMap<String, usize>,
    /// Lower-cased existing names reported by the preview endpoint
    pub existing_names: &'a HashSet<String>,
    /// Lower-cased normalized name -> occurrence count within the batch
    pub batch_names: &'a HashMap<String, usize>,
}

/// Validate one row; pure, recomputed after any row mutation
pub fn validate_category_row(
    row: &ImportPreviewRow,
    context: &CategoryImportContext<'_>,
) -> RowOutcome {
    let name = normalize_display_name(row.raw_col(columns::NAME));
    let parent = normalize_display_name(row.raw_col(columns::PARENT));
    let description = row.raw_col(columns::DESCRIPTION).trim().to_string();

    let mut outcome = OutcomeBuilder::new();
    outcome.normalized(columns::NAME, name.clone());
    outcome.normalized(columns::PARENT, parent.clone());
    outcome.normalized(columns::DESCRIPTION, description);

    let name_key = name.to_lowercase();
    if name.is_empty() {
        outcome.blocking("category_name is required");
    } else {
        if context.batch_names.get(&name_key).copied().unwrap_or(0) > 1 {
            outcome.blocking("duplicate category_name in file");
        }
        if context.existing_depths.contains_key(&name_key)
            || context.existing_names.contains(&name_key)
        {
            outcome.note("already exists, will be updated");
        }
    }

    if !parent.is_empty() {
        let parent_key = parent.to_lowercase();
        if !name.is_empty() && parent_key == name_key {
            outcome.blocking("category cannot be its own parent");
        } else if let Some(&depth) = context.existing_depths.get(&parent_key) {
            if depth + 1 > MAX_CATEGORY_DEPTH {
                outcome.blocking(format!(
                    "parent \"{}\" is at the maximum nesting depth",
                    parent
                ));
            }
        } else if !context.batch_names.contains_key(&parent_key) {
            outcome.note(format!(
                "parent \"{}\" does not exist yet and will be created",
                parent
            ));
        }
    }

    outcome.finish()
}

/// Review-step state of one category import
#[derive(Debug)]
pub struct CategoryImportFlow {
    pub rows: Vec<ImportPreviewRow>,
    existing_depths: HashMap<String, usize>,
    existing_names: HashSet<String>,
    pub committing: bool,
    /// Set once a failure-free commit went through; the page navigates
    /// back to the category list
    pub completed: bool,
    pub error: Option<String>,
}

impl CategoryImportFlow {
    /// Build the flow from the preview response and the loaded tree
    pub fn new(preview: CategoryImportPreview, tree: &CategoryTree) -> Self {
        let existing_depths = tree
            .flatten()
            .into_iter()
            .map(|node| (node.category.name.to_lowercase(), node.depth))
            .collect();
        let existing_names = preview
            .existing_names
            .iter()
            .map(|name| name.to_lowercase())
            .collect();
        let mut flow = Self {
            rows: preview.rows,
            existing_depths,
            existing_names,
            committing: false,
            completed: false,
            error: None,
        };
        flow.revalidate();
        flow
    }

    /// Edit one cell (applied on blur, not per keystroke) and revalidate
    pub fn edit_field(&mut self, position: usize, column: &str, value: impl Into<String>) {
        let Some(row) = self.rows.get_mut(position) else {
            return;
        };
        row.raw.insert(column.to_string(), value.into());
        self.revalidate();
    }

    /// Remove a row before commit; the batch never drops below one row
    pub fn remove_row(&mut self, position: usize) -> bool {
        if self.rows.len() <= 1 || position >= self.rows.len() {
            return false;
        }
        self.rows.remove(position);
        self.revalidate();
        true
    }

    /// Commit requires every row VALID (warnings block too)
    pub fn can_commit(&self) -> bool {
        !self.committing
            && !self.rows.is_empty()
            && self.rows.iter().all(|row| row.status == RowStatus::Valid)
    }

    /// Recompute every row independently against the batch index
    pub fn revalidate(&mut self) {
        let mut batch_names: HashMap<String, usize> = HashMap::new();
        for row in &self.rows {
            let key = normalize_display_name(row.raw_col(columns::NAME)).to_lowercase();
            if !key.is_empty() {
                *batch_names.entry(key).or_insert(0) += 1;
            }
        }
        let context = CategoryImportContext {
            existing_depths: &self.existing_depths,
            existing_names: &self.existing_names,
            batch_names: &batch_names,
        };
        let outcomes: Vec<RowOutcome> = self
            .rows
            .iter()
            .map(|row| validate_category_row(row, &context))
            .collect();
        for (row, outcome) in self.rows.iter_mut().zip(outcomes) {
            outcome.apply_to(row);
        }
    }

    /// Send the edited batch; per-row failures merge back into the rows
    /// and the flow stays on the review step. Returns true when the
    /// import completed.
    pub async fn commit<T: Transport>(&mut self, client: &DsmsClient<T>) -> bool {
        if !self.can_commit() {
            self.error = Some("Resolve all rows before committing".to_string());
            return false;
        }
        self.committing = true;
        self.error = None;
        let result = client.category_import_commit(self.rows.clone()).await;
        self.committing = false;
        match result {
            Ok(outcome) if outcome.failures.is_empty() => {
                tracing::info!(
                    created = outcome.created,
                    updated = outcome.updated,
                    "Category import committed"
                );
                self.completed = true;
                true
            }
            Ok(outcome) => {
                tracing::warn!(
                    failed = outcome.failures.len(),
                    "Category import partially rejected"
                );
                merge_commit_failures(&mut self.rows, &outcome.failures);
                false
            }
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Category;
    use std::collections::BTreeMap;

    fn preview_row(row_index: usize, name: &str, parent: &str) -> ImportPreviewRow {
        let mut raw = BTreeMap::new();
        raw.insert(columns::NAME.to_string(), name.to_string());
        raw.insert(columns::PARENT.to_string(), parent.to_string());
        ImportPreviewRow {
            row_index,
            raw,
            normalized: BTreeMap::new(),
            status: RowStatus::Valid,
            issues: Vec::new(),
            notes: Vec::new(),
        }
    }

    fn category(id: i64, name: &str, parent_id: Option<i64>) -> Category {
        Category {
            id,
            name: name.to_string(),
            description: None,
            parent_id,
            display_order: 0,
            is_active: true,
        }
    }

    fn flow_with(rows: Vec<ImportPreviewRow>) -> CategoryImportFlow {
        // tree: Tools(1) > Hand Tools(2) > Wrenches(3)
        let tree = CategoryTree::build(vec![
            category(1, "Tools", None),
            category(2, "Hand Tools", Some(1)),
            category(3, "Wrenches", Some(2)),
        ]);
        let preview = CategoryImportPreview {
            rows,
            existing_names: vec!["tools".to_string()],
        };
        CategoryImportFlow::new(preview, &tree)
    }

    #[test]
    fn test_missing_name_is_error() {
        let flow = flow_with(vec![preview_row(0, "  ", "")]);
        assert_eq!(flow.rows[0].status, RowStatus::Error);
        assert!(flow.rows[0].issues.iter().any(|i| i.contains("required")));
        assert!(!flow.can_commit());
    }

    #[test]
    fn test_duplicate_names_flag_both_rows_after_normalization() {
        let flow = flow_with(vec![
            preview_row(0, "Bolts", ""),
            preview_row(1, "bolts ", ""),
        ]);
        for row in &flow.rows {
            assert_eq!(row.status, RowStatus::Error);
            assert!(row.issues.iter().any(|i| i.contains("duplicate")));
        }
    }

    #[test]
    fn test_existing_name_is_informational() {
        let flow = flow_with(vec![preview_row(0, "tools", "")]);
        let row = &flow.rows[0];
        assert_eq!(row.status, RowStatus::Valid);
        assert!(row.notes.iter().any(|n| n.contains("will be updated")));
        assert!(flow.can_commit());
    }

    #[test]
    fn test_self_parenting_is_error() {
        let flow = flow_with(vec![preview_row(0, "Drills", "drills")]);
        assert_eq!(flow.rows[0].status, RowStatus::Error);
        assert!(
            flow.rows[0]
                .issues
                .iter()
                .any(|i| i.contains("its own parent"))
        );
    }

    #[test]
    fn test_parent_at_ceiling_is_error() {
        // Wrenches sits at depth 2, the ceiling
        let flow = flow_with(vec![preview_row(0, "Sockets", "Wrenches")]);
        assert_eq!(flow.rows[0].status, RowStatus::Error);
        assert!(
            flow.rows[0]
                .issues
                .iter()
                .any(|i| i.contains("maximum nesting depth"))
        );
    }

    #[test]
    fn test_unknown_parent_is_note_not_error() {
        let flow = flow_with(vec![preview_row(0, "Sockets", "Air Tools")]);
        let row = &flow.rows[0];
        assert_eq!(row.status, RowStatus::Valid);
        assert!(row.notes.iter().any(|n| n.contains("will be created")));
    }

    #[test]
    fn test_parent_in_batch_needs_no_note() {
        let flow = flow_with(vec![
            preview_row(0, "Air Tools", ""),
            preview_row(1, "Nailers", "Air Tools"),
        ]);
        assert_eq!(flow.rows[1].status, RowStatus::Valid);
        assert!(flow.rows[1].notes.is_empty());
    }

    #[test]
    fn test_edit_revalidates() {
        let mut flow = flow_with(vec![preview_row(0, "", "")]);
        assert_eq!(flow.rows[0].status, RowStatus::Error);

        flow.edit_field(0, columns::NAME, "Grinders");
        assert_eq!(flow.rows[0].status, RowStatus::Valid);
        assert_eq!(flow.rows[0].col(columns::NAME), "Grinders");
        assert!(flow.can_commit());
    }

    #[test]
    fn test_remove_row_keeps_at_least_one() {
        let mut flow = flow_with(vec![
            preview_row(0, "Grinders", ""),
            preview_row(1, "Sanders", ""),
        ]);
        assert!(flow.remove_row(1));
        assert_eq!(flow.rows.len(), 1);
        assert!(!flow.remove_row(0));
        assert_eq!(flow.rows.len(), 1);
    }
}
