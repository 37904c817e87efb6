//! Labels page
//!
//! Display names and group names are normalized on save, never while
//! the user is still typing.

use dsms_client::{DsmsClient, Transport};
use shared::models::{Label, LabelCreate, LabelUpdate};
use shared::util::normalize_display_name;

use crate::labels::{LabelGroup, group_labels};
use crate::page::{PageState, matches_search};
use crate::privileges::{PrivilegeFlag, has_privilege};

/// Form draft for create/edit
#[derive(Debug, Clone, Default)]
pub struct LabelDraft {
    pub name: String,
    pub color: String,
    pub group: String,
    pub description: String,
}

/// Labels page controller
#[derive(Debug, Default)]
pub struct LabelsPage {
    pub state: PageState<Label>,
    pub search: String,
    pub draft: LabelDraft,
    pub pending_deactivate: Option<i64>,
}

impl LabelsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_manage(&self, privileges: &[String]) -> bool {
        has_privilege(privileges, PrivilegeFlag::CanManageLabels)
    }

    pub async fn load<T: Transport>(&mut self, client: &DsmsClient<T>) {
        let generation = self.state.begin_load();
        let result = client.list_labels().await;
        self.state
            .finish_load(generation, result.map_err(|e| e.to_string()));
    }

    /// Labels grouped for faceted display, after the search filter
    pub fn grouped(&self) -> Vec<LabelGroup> {
        let filtered: Vec<Label> = self
            .state
            .collection
            .iter()
            .filter(|label| {
                matches_search(
                    &self.search,
                    &[&label.name, label.group.as_deref().unwrap_or("")],
                )
            })
            .cloned()
            .collect();
        group_labels(&filtered)
    }

    pub fn open_create(&mut self) {
        self.draft = LabelDraft::default();
        self.state.open_dialog(None);
    }

    pub fn open_edit(&mut self, label: &Label) {
        self.draft = LabelDraft {
            name: label.name.clone(),
            color: label.color.clone().unwrap_or_default(),
            group: label.group.clone().unwrap_or_default(),
            description: label.description.clone().unwrap_or_default(),
        };
        self.state.open_dialog(Some(label.clone()));
    }

    pub async fn submit<T: Transport>(&mut self, client: &DsmsClient<T>) {
        self.state.begin_save();
        let name = normalize_display_name(&self.draft.name);
        if name.is_empty() {
            self.state.finish_save(Err("Name is required".to_string()));
            return;
        }
        let group = {
            let normalized = normalize_display_name(&self.draft.group);
            if normalized.is_empty() {
                None
            } else {
                Some(normalized)
            }
        };
        let color = {
            let trimmed = self.draft.color.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };
        let description = {
            let trimmed = self.draft.description.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };
        let result = match &self.state.selected {
            None => client
                .create_label(&LabelCreate {
                    name,
                    color,
                    group,
                    description,
                })
                .await
                .map(|_| ()),
            Some(label) => client
                .update_label(
                    label.id,
                    &LabelUpdate {
                        name: Some(name),
                        color,
                        group,
                        description,
                        is_active: None,
                    },
                )
                .await
                .map(|_| ()),
        };
        if self.state.finish_save(result.map_err(|e| e.to_string())) {
            self.load(client).await;
        }
    }

    pub fn request_deactivate(&mut self, id: i64) {
        self.pending_deactivate = Some(id);
    }

    pub fn cancel_deactivate(&mut self) {
        self.pending_deactivate = None;
    }

    pub async fn confirm_deactivate<T: Transport>(&mut self, client: &DsmsClient<T>) {
        let Some(id) = self.pending_deactivate.take() else {
            return;
        };
        match client.delete_label(id).await {
            Ok(()) => {
                tracing::info!(label_id = id, "Label deactivated");
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
    fn test_grouped_respects_search() {
        let mut page = LabelsPage::new();
        let generation = page.state.begin_load();
        page.state.finish_load(
            generation,
            Ok(vec![
                label(1, "Fragile", Some("Handling")),
                label(2, "Cold Chain", Some("Storage")),
            ]),
        );
        page.search = "stor".to_string();
        let groups = page.grouped();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name.as_deref(), Some("Storage"));
    }

    fn label(id: i64, name: &str, group: Option<&str>) -> Label {
        Label {
            id,
            name: name.to_string(),
            color: None,
            group: group.map(str::to_string),
            description: None,
            is_active: true,
        }
    }
}
