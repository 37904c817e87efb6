//! Items page

use dsms_client::api::ItemQuery;
use dsms_client::{DsmsClient, Transport};
use shared::models::{Item, ItemCreate, ItemUpdate};
use shared::util::normalize_display_name;

use crate::page::{PageState, matches_search};
use crate::privileges::{PrivilegeFlag, has_privilege};

/// Form draft for create/edit
#[derive(Debug, Clone, Default)]
pub struct ItemDraft {
    pub sku: String,
    pub name: String,
    pub description: String,
    pub unit_of_measure: String,
    pub category_id: Option<i64>,
    pub is_spare_part: bool,
}

impl ItemDraft {
    fn from_item(item: &Item) -> Self {
        Self {
            sku: item.sku.clone(),
            name: item.name.clone(),
            description: item.description.clone().unwrap_or_default(),
            unit_of_measure: item.unit_of_measure.clone(),
            category_id: item.category_id,
            is_spare_part: item.is_spare_part,
        }
    }

    /// Synchronous validation; blocking problems never reach the network
    fn validate(&self, creating: bool) -> Result<(), String> {
        if creating && self.sku.trim().is_empty() {
            return Err("SKU is required".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if self.unit_of_measure.trim().is_empty() {
            return Err("Unit of measure is required".to_string());
        }
        Ok(())
    }

    fn to_create(&self) -> ItemCreate {
        ItemCreate {
            sku: self.sku.trim().to_string(),
            name: normalize_display_name(&self.name),
            description: trimmed_opt(&self.description),
            unit_of_measure: self.unit_of_measure.trim().to_string(),
            category_id: self.category_id,
            is_spare_part: Some(self.is_spare_part),
        }
    }

    fn to_update(&self) -> ItemUpdate {
        ItemUpdate {
            name: Some(normalize_display_name(&self.name)),
            description: trimmed_opt(&self.description),
            unit_of_measure: Some(self.unit_of_measure.trim().to_string()),
            category_id: Some(self.category_id),
            is_spare_part: Some(self.is_spare_part),
            is_active: None,
        }
    }
}

fn trimmed_opt(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Items list + detail dialog
#[derive(Debug, Default)]
pub struct ItemsPage {
    pub state: PageState<Item>,
    /// Server-side filters; changing them triggers a reload
    pub query: ItemQuery,
    /// Client-side substring filter over name/SKU
    pub search: String,
    pub draft: ItemDraft,
    pub pending_deactivate: Option<i64>,
}

impl ItemsPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manage affordances are hidden without this flag (display-layer
    /// convenience; the backend enforces authorization)
    pub fn can_manage(&self, privileges: &[String]) -> bool {
        has_privilege(privileges, PrivilegeFlag::CanManageItems)
    }

    pub async fn load<T: Transport>(&mut self, client: &DsmsClient<T>) {
        let generation = self.state.begin_load();
        let result = client.list_items(&self.query).await;
        self.state
            .finish_load(generation, result.map_err(|e| e.to_string()));
    }

    /// Rows after the client-side search filter
    pub fn visible(&self) -> Vec<&Item> {
        self.state
            .collection
            .iter()
            .filter(|item| matches_search(&self.search, &[&item.name, &item.sku]))
            .collect()
    }

    pub fn open_create(&mut self) {
        self.draft = ItemDraft::default();
        self.state.open_dialog(None);
    }

    pub fn open_edit(&mut self, item: &Item) {
        self.draft = ItemDraft::from_item(item);
        self.state.open_dialog(Some(item.clone()));
    }

    /// Create or update from the draft, then reload
    pub async fn submit<T: Transport>(&mut self, client: &DsmsClient<T>) {
        self.state.begin_save();
        let creating = self.state.selected.is_none();
        if let Err(message) = self.draft.validate(creating) {
            self.state.finish_save(Err(message));
            return;
        }
        let result = match &self.state.selected {
            None => client.create_item(&self.draft.to_create()).await.map(|_| ()),
            Some(item) => client
                .update_item(item.id, &self.draft.to_update())
                .await
                .map(|_| ()),
        };
        if self.state.finish_save(result.map_err(|e| e.to_string())) {
            self.load(client).await;
        }
    }

    /// Replace the full label set of an item, then reload
    pub async fn assign_labels<T: Transport>(
        &mut self,
        client: &DsmsClient<T>,
        item_id: i64,
        label_ids: Vec<i64>,
    ) {
        match client.set_item_labels(item_id, label_ids).await {
            Ok(()) => {
                tracing::info!(item_id, "Item labels replaced");
                self.load(client).await;
            }
            Err(e) => self.state.error = Some(e.to_string()),
        }
    }

    // deactivation needs an explicit confirmation step

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
        match client.delete_item(id).await {
            Ok(()) => {
                tracing::info!(item_id = id, "Item deactivated");
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
    fn test_draft_validation_blocks_before_network() {
        let draft = ItemDraft {
            sku: "".to_string(),
            name: "Bolt".to_string(),
            unit_of_measure: "pcs".to_string(),
            ..ItemDraft::default()
        };
        assert!(draft.validate(true).is_err());
        assert!(draft.validate(false).is_ok());
    }

    #[test]
    fn test_draft_normalizes_on_save() {
        let draft = ItemDraft {
            sku: " HB-01 ".to_string(),
            name: "  hex   bolts ".to_string(),
            description: "   ".to_string(),
            unit_of_measure: " pcs ".to_string(),
            category_id: None,
            is_spare_part: false,
        };
        let create = draft.to_create();
        assert_eq!(create.sku, "HB-01");
        assert_eq!(create.name, "Hex Bolts");
        assert_eq!(create.description, None);
        assert_eq!(create.unit_of_measure, "pcs");
    }

    #[test]
    fn test_visible_applies_search() {
        let mut page = ItemsPage::new();
        let generation = page.state.begin_load();
        page.state.finish_load(
            generation,
            Ok(vec![
                sample_item(1, "Hex Bolts", "HB-01"),
                sample_item(2, "Washers", "WA-02"),
            ]),
        );
        page.search = "hb".to_string();
        let visible: Vec<i64> = page.visible().iter().map(|i| i.id).collect();
        assert_eq!(visible, [1]);
    }

    fn sample_item(id: i64, name: &str, sku: &str) -> Item {
        Item {
            id,
            sku: sku.to_string(),
            name: name.to_string(),
            description: None,
            unit_of_measure: "pcs".to_string(),
            category_id: None,
            is_spare_part: false,
            is_active: true,
            label_ids: Vec::new(),
        }
    }
}
