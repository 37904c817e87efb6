//! Categories page
//!
//! Tree display plus create/rename/reparent/reorder/deactivate. Every
//! mutation reloads the full list and rebuilds the tree so depth and
//! order always reflect canonical server state.

use dsms_client::{DsmsClient, Transport};
use shared::models::{Category, CategoryCreate, CategoryUpdate};
use shared::util::normalize_display_name;

use crate::category_tree::{CategoryTree, MoveDirection};
use crate::page::PageState;
use crate::privileges::{PrivilegeFlag, has_privilege};

/// Form draft for create/edit
#[derive(Debug, Clone, Default)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
    pub parent_id: Option<i64>,
}

/// Categories page controller
#[derive(Debug, Default)]
pub struct CategoriesPage {
    pub state: PageState<Category>,
    pub tree: CategoryTree,
    pub draft: CategoryDraft,
    pub pending_deactivate: Option<i64>,
}

impl CategoriesPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_manage(&self, privileges: &[String]) -> bool {
        has_privilege(privileges, PrivilegeFlag::CanManageCategories)
    }

    pub async fn load<T: Transport>(&mut self, client: &DsmsClient<T>) {
        let generation = self.state.begin_load();
        let result = client.list_categories().await;
        if self
            .state
            .finish_load(generation, result.map_err(|e| e.to_string()))
            && self.state.error.is_none()
        {
            self.tree = CategoryTree::build(self.state.collection.clone());
        }
    }

    /// Parent choices for the dialog; excludes ceiling-depth nodes and,
    /// when editing, the category's own subtree
    pub fn parent_choices(&self) -> Vec<&Category> {
        self.tree
            .selectable_parents(self.state.selected.as_ref().map(|c| c.id))
    }

    pub fn open_create(&mut self) {
        self.draft = CategoryDraft::default();
        self.state.open_dialog(None);
    }

    pub fn open_edit(&mut self, category: &Category) {
        self.draft = CategoryDraft {
            name: category.name.clone(),
            description: category.description.clone().unwrap_or_default(),
            parent_id: category.parent_id,
        };
        self.state.open_dialog(Some(category.clone()));
    }

    /// Depth and cycle violations are rejected here, before any network
    /// call; the server re-checks authoritatively
    fn validate_draft(&self) -> Result<String, String> {
        let name = normalize_display_name(&self.draft.name);
        if name.is_empty() {
            return Err("Name is required".to_string());
        }
        let editing = self.state.selected.as_ref().map(|c| c.id);
        if let Some(id) = editing {
            if self.tree.would_create_cycle(id, self.draft.parent_id) {
                return Err("A category cannot be moved inside its own subtree".to_string());
            }
        }
        if self.tree.would_exceed_depth(editing, self.draft.parent_id) {
            return Err("Categories can be nested at most three levels deep".to_string());
        }
        Ok(name)
    }

    /// Create or update from the draft, then reload
    pub async fn submit<T: Transport>(&mut self, client: &DsmsClient<T>) {
        self.state.begin_save();
        let name = match self.validate_draft() {
            Ok(name) => name,
            Err(message) => {
                self.state.finish_save(Err(message));
                return;
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
            None => {
                let payload = CategoryCreate {
                    name,
                    description,
                    parent_id: self.draft.parent_id,
                    display_order: Some(self.tree.next_display_order(self.draft.parent_id)),
                };
                client.create_category(&payload).await.map(|_| ())
            }
            Some(category) => {
                let payload = CategoryUpdate {
                    name: Some(name),
                    description,
                    // always explicit: `Some(None)` moves back to root
                    parent_id: Some(self.draft.parent_id),
                    ..CategoryUpdate::default()
                };
                client.update_category(category.id, &payload).await.map(|_| ())
            }
        };
        if self.state.finish_save(result.map_err(|e| e.to_string())) {
            self.load(client).await;
        }
    }

    /// Swap display orders with the neighbor sibling via two sequential
    /// update calls. A failure between the calls leaves the order
    /// inconsistent on the server; the error is surfaced and the reload
    /// shows whatever state the server now has - no rollback.
    pub async fn move_category<T: Transport>(
        &mut self,
        client: &DsmsClient<T>,
        id: i64,
        direction: MoveDirection,
    ) {
        let Some(plan) = self.tree.reorder_plan(id, direction) else {
            return;
        };
        for (step, (category_id, display_order)) in plan.updates.into_iter().enumerate() {
            let payload = CategoryUpdate {
                display_order: Some(display_order),
                ..CategoryUpdate::default()
            };
            if let Err(e) = client.update_category(category_id, &payload).await {
                tracing::warn!(
                    category_id,
                    step,
                    "Reorder incomplete, reloading server state"
                );
                self.state.error = Some(format!("Reorder incomplete: {}", e));
                self.load(client).await;
                return;
            }
        }
        self.load(client).await;
    }

    // deactivation keeps descendants pointing at the category

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
        match client.delete_category(id).await {
            Ok(()) => {
                tracing::info!(category_id = id, "Category deactivated");
                self.load(client).await;
            }
            Err(e) => self.state.error = Some(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: i64, name: &str, parent_id: Option<i64>, display_order: i32) -> Category {
        Category {
            id,
            name: name.to_string(),
            description: None,
            parent_id,
            display_order,
            is_active: true,
        }
    }

    fn page_with(categories: Vec<Category>) -> CategoriesPage {
        let mut page = CategoriesPage::new();
        let generation = page.state.begin_load();
        page.state.finish_load(generation, Ok(categories.clone()));
        page.tree = CategoryTree::build(categories);
        page
    }

    #[test]
    fn test_validate_rejects_depth_violation_before_network() {
        let mut page = page_with(vec![
            category(1, "Tools", None, 0),
            category(2, "Hand Tools", Some(1), 0),
            category(3, "Wrenches", Some(2), 0),
        ]);
        page.open_create();
        page.draft.name = "Sockets".to_string();
        page.draft.parent_id = Some(3);
        assert!(page.validate_draft().is_err());

        page.draft.parent_id = Some(2);
        assert!(page.validate_draft().is_ok());
    }

    #[test]
    fn test_validate_rejects_cycle() {
        let mut page = page_with(vec![
            category(1, "Tools", None, 0),
            category(2, "Hand Tools", Some(1), 0),
        ]);
        let tools = page.state.collection[0].clone();
        page.open_edit(&tools);
        page.draft.parent_id = Some(2);
        let error = page.validate_draft().unwrap_err();
        assert!(error.contains("own subtree"));
    }

    #[test]
    fn test_parent_choices_respect_selection() {
        let mut page = page_with(vec![
            category(1, "Tools", None, 0),
            category(2, "Hand Tools", Some(1), 0),
            category(5, "Fasteners", None, 1),
        ]);
        let hand_tools = page.state.collection[1].clone();
        page.open_edit(&hand_tools);
        let ids: Vec<i64> = page.parent_choices().iter().map(|c| c.id).collect();
        assert!(!ids.contains(&2));
        assert!(ids.contains(&1));
        assert!(ids.contains(&5));
    }
}
