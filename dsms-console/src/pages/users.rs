//! Users page

use dsms_client::{DsmsClient, Transport};
use shared::client::UserPrivileges;
use shared::models::{Role, User, UserCreate, UserUpdate};

use crate::page::{PageState, matches_search};
use crate::privileges::{PrivilegeFlag, has_privilege};

/// Form draft for create/edit
#[derive(Debug, Clone, Default)]
pub struct UserDraft {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
    pub role_ids: Vec<i64>,
}

/// Users page controller
#[derive(Debug, Default)]
pub struct UsersPage {
    pub state: PageState<User>,
    pub search: String,
    pub draft: UserDraft,
    /// Role picklist for the edit dialog; optional, loads best-effort
    pub roles: Vec<Role>,
    /// Resolved privileges of the user being inspected
    pub inspected: Option<UserPrivileges>,
    pub pending_deactivate: Option<i64>,
}

impl UsersPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_manage(&self, privileges: &[String]) -> bool {
        has_privilege(privileges, PrivilegeFlag::CanManageUsers)
    }

    pub async fn load<T: Transport>(&mut self, client: &DsmsClient<T>) {
        let generation = self.state.begin_load();
        let result = client.list_users().await;
        self.state
            .finish_load(generation, result.map_err(|e| e.to_string()));

        // 角色下拉列表加载失败不阻塞页面渲染
        match client.list_roles().await {
            Ok(roles) => self.roles = roles,
            Err(e) => tracing::warn!("Role picklist load failed, continuing without: {}", e),
        }
    }

    pub fn visible(&self) -> Vec<&User> {
        self.state
            .collection
            .iter()
            .filter(|user| {
                matches_search(
                    &self.search,
                    &[&user.username, user.full_name.as_deref().unwrap_or("")],
                )
            })
            .collect()
    }

    pub fn open_create(&mut self) {
        self.draft = UserDraft::default();
        self.state.open_dialog(None);
    }

    pub fn open_edit(&mut self, user: &User) {
        self.draft = UserDraft {
            username: user.username.clone(),
            password: String::new(),
            full_name: user.full_name.clone().unwrap_or_default(),
            email: user.email.clone().unwrap_or_default(),
            role_ids: user.role_ids.clone(),
        };
        self.state.open_dialog(Some(user.clone()));
    }

    pub async fn submit<T: Transport>(&mut self, client: &DsmsClient<T>) {
        self.state.begin_save();
        let creating = self.state.selected.is_none();
        if creating && self.draft.username.trim().is_empty() {
            self.state
                .finish_save(Err("Username is required".to_string()));
            return;
        }
        if creating && self.draft.password.is_empty() {
            self.state
                .finish_save(Err("Password is required".to_string()));
            return;
        }
        let full_name = trimmed_opt(&self.draft.full_name);
        let email = trimmed_opt(&self.draft.email);
        let result = match &self.state.selected {
            None => client
                .create_user(&UserCreate {
                    username: self.draft.username.trim().to_string(),
                    password: self.draft.password.clone(),
                    full_name,
                    email,
                    role_ids: self.draft.role_ids.clone(),
                })
                .await
                .map(|_| ()),
            Some(user) => client
                .update_user(
                    user.id,
                    &UserUpdate {
                        full_name,
                        email,
                        password: if self.draft.password.is_empty() {
                            None
                        } else {
                            Some(self.draft.password.clone())
                        },
                        role_ids: Some(self.draft.role_ids.clone()),
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

    /// Resolve and show one user's effective backend privilege codes
    pub async fn inspect_privileges<T: Transport>(&mut self, client: &DsmsClient<T>, user_id: i64) {
        match client.user_privileges(user_id).await {
            Ok(privileges) => self.inspected = Some(privileges),
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
        match client.delete_user(id).await {
            Ok(()) => {
                tracing::info!(user_id = id, "User deactivated");
                self.load(client).await;
            }
            Err(e) => self.state.error = Some(e.to_string()),
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
