//! Machinery import flow
//!
//! Adds auto-generated asset tags on top of the shared preview/commit
//! shape. Unknown types block commit as warnings unless auto-creation
//! is enabled, in which case they downgrade to informational notes and
//! `auto_create_types` rides along on the commit payload.

use std::collections::{HashMap, HashSet};

use dsms_client::{DsmsClient, Transport};
use shared::models::machinery_columns as columns;
use shared::models::{ImportPreviewRow, MachineryImportPreview, MachineryStatus, RowStatus};
use shared::util::normalize_display_name;

use crate::import::{OutcomeBuilder, RowOutcome, merge_commit_failures};

/// Reference data the pure validator runs against
#[derive(Debug)]
pub struct MachineryImportContext<'a> {
    /// Lower-cased existing machine names (from the preview response)
    pub existing_machine_names: &'a HashSet<String>,
    /// Lower-cased known type names
    pub known_type_names: &'a HashSet<String>,
    /// Lower-cased normalized machine name -> occurrence count in batch
    pub batch_names: &'a HashMap<String, usize>,
    /// Upper-cased asset tag -> occurrence count in batch
    pub batch_tags: &'a HashMap<String, usize>,
    /// Whether the commit will auto-create unknown types
    pub auto_create_types: bool,
}

/// Validate one row; pure, recomputed after any row mutation
pub fn validate_machinery_row(
    row: &ImportPreviewRow,
    context: &MachineryImportContext<'_>,
) -> RowOutcome {
    let name = normalize_display_name(row.raw_col(columns::NAME));
    let asset_tag = row.raw_col(columns::ASSET_TAG).trim().to_uppercase();
    let type_name = normalize_display_name(row.raw_col(columns::TYPE));
    let location = row.raw_col(columns::LOCATION).trim().to_string();
    let status_raw = row.raw_col(columns::STATUS).trim().to_string();

    let mut outcome = OutcomeBuilder::new();
    outcome.normalized(columns::NAME, name.clone());
    outcome.normalized(columns::ASSET_TAG, asset_tag.clone());
    outcome.normalized(columns::TYPE, type_name.clone());
    outcome.normalized(columns::LOCATION, location);

    if name.is_empty() {
        outcome.blocking("machine_name is required");
    } else {
        let name_key = name.to_lowercase();
        if context.batch_names.get(&name_key).copied().unwrap_or(0) > 1 {
            outcome.blocking("duplicate machine_name in file");
        } else if context.existing_machine_names.contains(&name_key) {
            outcome.note("already exists, will be updated");
        }
    }

    if asset_tag.is_empty() {
        outcome.blocking("asset_tag is required");
    } else if context.batch_tags.get(&asset_tag).copied().unwrap_or(0) > 1 {
        outcome.blocking("duplicate asset_tag in file");
    }

    if type_name.is_empty() {
        outcome.blocking("type_name is required");
    } else if !context.known_type_names.contains(&type_name.to_lowercase()) {
        if context.auto_create_types {
            outcome.note(format!("type \"{}\" will be created", type_name));
        } else {
            outcome.warning(format!(
                "type \"{}\" does not exist; enable auto-create or use an existing type",
                type_name
            ));
        }
    }

    // empty status defaults to OPERATIONAL; anything else must parse
    match status_raw.parse::<MachineryStatus>() {
        Ok(status) => outcome.normalized(columns::STATUS, status.as_str()),
        Err(_) if status_raw.is_empty() => {
            outcome.normalized(columns::STATUS, MachineryStatus::Operational.as_str());
        }
        Err(_) => {
            outcome.normalized(columns::STATUS, status_raw.clone());
            outcome.blocking(format!(
                "invalid status \"{}\", must be one of OPERATIONAL, MAINTENANCE, OUT_OF_SERVICE",
                status_raw
            ));
        }
    }

    outcome.finish()
}

/// Short tag prefix for a machinery type name: first word, alphanumerics
/// only, upper-cased, one trailing `S` stripped when longer than one
/// character; `MCH` when nothing remains
pub fn derive_type_code(type_name: &str) -> String {
    let first_word = type_name.split_whitespace().next().unwrap_or("");
    let mut code: String = first_word
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_uppercase();
    if code.len() > 1 && code.ends_with('S') {
        code.pop();
    }
    if code.is_empty() { "MCH".to_string() } else { code }
}

/// Next free `CODE-NNN` tag within the batch: one past the highest
/// sequence number already used for that code
pub fn next_asset_tag(code: &str, used: &HashSet<String>) -> String {
    let prefix = format!("{}-", code);
    let highest = used
        .iter()
        .filter_map(|tag| tag.strip_prefix(&prefix).and_then(|n| n.parse::<u32>().ok()))
        .max()
        .unwrap_or(0);
    format!("{}-{:03}", code, highest + 1)
}

/// Review-step state of one machinery import
#[derive(Debug)]
pub struct MachineryImportFlow {
    pub rows: Vec<ImportPreviewRow>,
    /// Rows whose asset tag is auto-generated; a manual tag edit clears
    /// the flag so the tag is never silently overwritten again
    auto_tag: Vec<bool>,
    pub auto_create_types: bool,
    existing_machine_names: HashSet<String>,
    known_type_names: HashSet<String>,
    pub committing: bool,
    pub completed: bool,
    pub error: Option<String>,
}

impl MachineryImportFlow {
    pub fn new(preview: MachineryImportPreview) -> Self {
        let auto_tag = preview
            .rows
            .iter()
            .map(|row| row.raw_col(columns::ASSET_TAG).trim().is_empty())
            .collect();
        let existing_machine_names = preview
            .existing_machine_names
            .iter()
            .map(|name| name.to_lowercase())
            .collect();
        let known_type_names = preview
            .known_type_names
            .iter()
            .map(|name| name.to_lowercase())
            .collect();
        let mut flow = Self {
            rows: preview.rows,
            auto_tag,
            auto_create_types: false,
            existing_machine_names,
            known_type_names,
            committing: false,
            completed: false,
            error: None,
        };
        for position in 0..flow.rows.len() {
            if flow.auto_tag[position] {
                flow.regenerate_tag(position);
            }
        }
        flow.revalidate();
        flow
    }

    /// Whether the given row's tag is still auto-managed
    pub fn is_auto_tag(&self, position: usize) -> bool {
        self.auto_tag.get(position).copied().unwrap_or(false)
    }

    /// Edit one cell (applied on blur) and revalidate. Editing the tag
    /// marks it manual; editing the type of an auto-tagged row derives a
    /// fresh tag from the new type name.
    pub fn edit_field(&mut self, position: usize, column: &str, value: impl Into<String>) {
        let Some(row) = self.rows.get_mut(position) else {
            return;
        };
        row.raw.insert(column.to_string(), value.into());
        if column == columns::ASSET_TAG {
            self.auto_tag[position] = false;
        }
        if column == columns::TYPE && self.auto_tag[position] {
            self.regenerate_tag(position);
        }
        self.revalidate();
    }

    fn regenerate_tag(&mut self, position: usize) {
        let code = derive_type_code(self.rows[position].raw_col(columns::TYPE));
        let used: HashSet<String> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != position)
            .map(|(_, row)| row.raw_col(columns::ASSET_TAG).trim().to_uppercase())
            .filter(|tag| !tag.is_empty())
            .collect();
        let tag = next_asset_tag(&code, &used);
        self.rows[position]
            .raw
            .insert(columns::ASSET_TAG.to_string(), tag);
    }

    /// Remove a row before commit (no minimum for machinery import)
    pub fn remove_row(&mut self, position: usize) -> bool {
        if position >= self.rows.len() {
            return false;
        }
        self.rows.remove(position);
        self.auto_tag.remove(position);
        self.revalidate();
        true
    }

    pub fn set_auto_create_types(&mut self, enabled: bool) {
        self.auto_create_types = enabled;
        self.revalidate();
    }

    /// Commit requires every row VALID (both errors and warnings block)
    pub fn can_commit(&self) -> bool {
        !self.committing
            && !self.rows.is_empty()
            && self.rows.iter().all(|row| row.status == RowStatus::Valid)
    }

    /// Recompute every row independently against the batch index
    pub fn revalidate(&mut self) {
        let mut batch_names: HashMap<String, usize> = HashMap::new();
        let mut batch_tags: HashMap<String, usize> = HashMap::new();
        for row in &self.rows {
            let name_key = normalize_display_name(row.raw_col(columns::NAME)).to_lowercase();
            if !name_key.is_empty() {
                *batch_names.entry(name_key).or_insert(0) += 1;
            }
            let tag_key = row.raw_col(columns::ASSET_TAG).trim().to_uppercase();
            if !tag_key.is_empty() {
                *batch_tags.entry(tag_key).or_insert(0) += 1;
            }
        }
        let context = MachineryImportContext {
            existing_machine_names: &self.existing_machine_names,
            known_type_names: &self.known_type_names,
            batch_names: &batch_names,
            batch_tags: &batch_tags,
            auto_create_types: self.auto_create_types,
        };
        let outcomes: Vec<RowOutcome> = self
            .rows
            .iter()
            .map(|row| validate_machinery_row(row, &context))
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
        let result = client
            .machinery_import_commit(self.rows.clone(), self.auto_create_types)
            .await;
        self.committing = false;
        match result {
            Ok(outcome) if outcome.failures.is_empty() => {
                tracing::info!(
                    created = outcome.created,
                    updated = outcome.updated,
                    "Machinery import committed"
                );
                self.completed = true;
                true
            }
            Ok(outcome) => {
                tracing::warn!(
                    failed = outcome.failures.len(),
                    "Machinery import partially rejected"
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
