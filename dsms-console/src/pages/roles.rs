//! Roles page

use dsms_client::{DsmsClient, Transport};
use shared::models::{Role, RoleCreate, RoleUpdate};

use crate::page::PageState;
use crate::privileges::{PrivilegeFlag, has_privilege, is_valid_code};

/// Form draft for create/edit
#[derive(Debug, Clone, Default)]
pub struct RoleDraft {
    pub name: String,
    pub description: String,
    pub privileges: Vec<String>,
}

/// Roles page controller
#[derive(Debug, Default)]
pub struct RolesPage {
    pub state: PageState<Role>,
    pub draft: RoleDraft,
    pub pending_deactivate: Option<i64>,
}

impl RolesPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_manage(&self, privileges: &[String]) -> bool {
        has_privilege(privileges, PrivilegeFlag::CanManageRoles)
    }

    pub async fn load<T: Transport>(&mut self, client: &DsmsClient<T>) {
        let generation = self.state.begin_load();
        let result = client.list_roles().await;
        self.state
            .finish_load(generation, result.map_err(|e| e.to_string()));
    }

    pub fn open_create(&mut self) {
        self.draft = RoleDraft::default();
        self.state.open_dialog(None);
    }

    pub fn open_edit(&mut self, role: &Role) {
        self.draft = RoleDraft {
            name: role.name.clone(),
            description: role.description.clone().unwrap_or_default(),
            privileges: role.privileges.clone(),
        };
        self.state.open_dialog(Some(role.clone()));
    }

    fn validate_draft(&self) -> Result<(), String> {
        if self.draft.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if let Some(bad) = self
            .draft
            .privileges
            .iter()
            .find(|code| !is_valid_code(code))
        {
            return Err(format!("Unknown privilege code: {}", bad));
        }
        Ok(())
    }

    pub async fn submit<T: Transport>(&mut self, client: &DsmsClient<T>) {
        self.state.begin_save();
        if let Err(message) = self.validate_draft() {
            self.state.finish_save(Err(message));
            return;
        }
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
                .create_role(&RoleCreate {
                    name: self.draft.name.trim().to_string(),
                    description,
                    privileges: self.draft.privileges.clone(),
                })
                .await
                .map(|_| ()),
            Some(role) => client
                .update_role(
                    role.id,
                    &RoleUpdate {
                        name: Some(self.draft.name.trim().to_string()),
                        description,
                        privileges: Some(self.draft.privileges.clone()),
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

    /// Replace one role's privilege set directly from the privileges tab
    pub async fn set_privileges<T: Transport>(
        &mut self,
        client: &DsmsClient<T>,
        role_id: i64,
        privileges: Vec<String>,
    ) {
        if let Some(bad) = privileges.iter().find(|code| !is_valid_code(code)) {
            self.state.error = Some(format!("Unknown privilege code: {}", bad));
            return;
        }
        match client.set_role_privileges(role_id, privileges).await {
            Ok(()) => {
                tracing::info!(role_id, "Role privileges replaced");
                self.load(client).await;
            }
            Err(e) => self.state.error = Some(e.to_string()),
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
        match client.delete_role(id).await {
            Ok(()) => {
                tracing::info!(role_id = id, "Role deactivated");
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
    fn test_unknown_privilege_code_is_rejected() {
        let mut page = RolesPage::new();
        page.draft.name = "Storekeeper".to_string();
        page.draft.privileges = vec!["ITEM_VIEW".to_string(), "SUDO".to_string()];
        let error = page.validate_draft().unwrap_err();
        assert!(error.contains("SUDO"));

        page.draft.privileges = vec!["ITEM_VIEW".to_string(), "STOCK_ADJUST".to_string()];
        assert!(page.validate_draft().is_ok());
    }
}
