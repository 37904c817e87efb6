//! Machinery and machinery-type pages

use dsms_client::api::MachineryQuery;
use dsms_client::{DsmsClient, Transport};
use shared::models::{
    Machinery, MachineryCreate, MachineryStatus, MachineryType, MachineryTypeCreate,
    MachineryUpdate, MaintenanceNote, MaintenanceRecord,
};
use shared::util::normalize_display_name;

use crate::page::{PageState, matches_search};
use crate::privileges::{PrivilegeFlag, has_privilege};

/// Form draft for create/edit
#[derive(Debug, Clone, Default)]
pub struct MachineryDraft {
    pub asset_tag: String,
    pub name: String,
    pub type_id: Option<i64>,
    pub location: String,
    pub status: Option<MachineryStatus>,
}

/// Machinery page controller
#[derive(Debug, Default)]
pub struct MachineryPage {
    pub state: PageState<Machinery>,
    pub query: MachineryQuery,
    pub search: String,
    pub draft: MachineryDraft,
    /// History of the machine currently inspected
    pub history: Vec<MaintenanceRecord>,
    pub pending_delete: Option<i64>,
}

impl MachineryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_manage(&self, privileges: &[String]) -> bool {
        has_privilege(privileges, PrivilegeFlag::CanManageMachinery)
    }

    pub async fn load<T: Transport>(&mut self, client: &DsmsClient<T>) {
        let generation = self.state.begin_load();
        let result = client.list_machinery(&self.query).await;
        self.state
            .finish_load(generation, result.map_err(|e| e.to_string()));
    }

    /// Rows after the client-side search over name/asset tag
    pub fn visible(&self) -> Vec<&Machinery> {
        self.state
            .collection
            .iter()
            .filter(|machine| matches_search(&self.search, &[&machine.name, &machine.asset_tag]))
            .collect()
    }

    pub fn open_create(&mut self) {
        self.draft = MachineryDraft::default();
        self.state.open_dialog(None);
    }

    pub fn open_edit(&mut self, machine: &Machinery) {
        self.draft = MachineryDraft {
            asset_tag: machine.asset_tag.clone(),
            name: machine.name.clone(),
            type_id: Some(machine.type_id),
            location: machine.location.clone().unwrap_or_default(),
            status: Some(machine.status),
        };
        self.state.open_dialog(Some(machine.clone()));
    }

    fn validate_draft(&self) -> Result<(), String> {
        if self.draft.asset_tag.trim().is_empty() {
            return Err("Asset tag is required".to_string());
        }
        if self.draft.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if self.draft.type_id.is_none() {
            return Err("Type is required".to_string());
        }
        Ok(())
    }

    pub async fn submit<T: Transport>(&mut self, client: &DsmsClient<T>) {
        self.state.begin_save();
        if let Err(message) = self.validate_draft() {
            self.state.finish_save(Err(message));
            return;
        }
        let location = {
            let trimmed = self.draft.location.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };
        let result = match &self.state.selected {
            None => client
                .create_machinery(&MachineryCreate {
                    asset_tag: self.draft.asset_tag.trim().to_uppercase(),
                    name: normalize_display_name(&self.draft.name),
                    type_id: self.draft.type_id.unwrap_or_default(),
                    location,
                    status: self.draft.status,
                })
                .await
                .map(|_| ()),
            Some(machine) => client
                .update_machinery(
                    machine.id,
                    &MachineryUpdate {
                        asset_tag: Some(self.draft.asset_tag.trim().to_uppercase()),
                        name: Some(normalize_display_name(&self.draft.name)),
                        type_id: self.draft.type_id,
                        location,
                        status: self.draft.status,
                    },
                )
                .await
                .map(|_| ()),
        };
        if self.state.finish_save(result.map_err(|e| e.to_string())) {
            self.load(client).await;
        }
    }

    /// Only operational machines can enter maintenance
    pub async fn start_maintenance<T: Transport>(
        &mut self,
        client: &DsmsClient<T>,
        machine: &Machinery,
        notes: Option<String>,
    ) {
        if machine.status != MachineryStatus::Operational {
            self.state.error = Some("Only operational machinery can enter maintenance".to_string());
            return;
        }
        match client
            .start_maintenance(machine.id, &MaintenanceNote { notes })
            .await
        {
            Ok(()) => {
                tracing::info!(machinery_id = machine.id, "Maintenance started");
                self.load(client).await;
            }
            Err(e) => self.state.error = Some(e.to_string()),
        }
    }

    /// Only machines under maintenance can leave it
    pub async fn end_maintenance<T: Transport>(
        &mut self,
        client: &DsmsClient<T>,
        machine: &Machinery,
        notes: Option<String>,
    ) {
        if machine.status != MachineryStatus::Maintenance {
            self.state.error = Some("Machinery is not under maintenance".to_string());
            return;
        }
        match client
            .end_maintenance(machine.id, &MaintenanceNote { notes })
            .await
        {
            Ok(()) => {
                tracing::info!(machinery_id = machine.id, "Maintenance ended");
                self.load(client).await;
            }
            Err(e) => self.state.error = Some(e.to_string()),
        }
    }

    pub async fn load_history<T: Transport>(&mut self, client: &DsmsClient<T>, machinery_id: i64) {
        match client.machinery_history(machinery_id).await {
            Ok(history) => self.history = history,
            Err(e) => self.state.error = Some(e.to_string()),
        }
    }

    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete<T: Transport>(&mut self, client: &DsmsClient<T>) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        match client.delete_machinery(id).await {
            Ok(()) => {
                tracing::info!(machinery_id = id, "Machinery deleted");
                self.load(client).await;
            }
            Err(e) => self.state.error = Some(e.to_string()),
        }
    }
}

/// Machinery types management (lightweight list + rename)
#[derive(Debug, Default)]
pub struct MachineryTypesPage {
    pub state: PageState<MachineryType>,
    pub draft_name: String,
}

impl MachineryTypesPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load<T: Transport>(&mut self, client: &DsmsClient<T>) {
        let generation = self.state.begin_load();
        let result = client.list_machinery_types().await;
        self.state
            .finish_load(generation, result.map_err(|e| e.to_string()));
    }

    pub async fn submit<T: Transport>(&mut self, client: &DsmsClient<T>) {
        self.state.begin_save();
        let name = normalize_display_name(&self.draft_name);
        if name.is_empty() {
            self.state.finish_save(Err("Name is required".to_string()));
            return;
        }
        let payload = MachineryTypeCreate { name };
        let result = match &self.state.selected {
            None => client.create_machinery_type(&payload).await.map(|_| ()),
            Some(machinery_type) => client
                .update_machinery_type(machinery_type.id, &payload)
                .await
                .map(|_| ()),
        };
        if self.state.finish_save(result.map_err(|e| e.to_string())) {
            self.draft_name.clear();
            self.load(client).await;
        }
    }

    /// Machines of one type, for the drill-down panel
    pub async fn machines_of<T: Transport>(
        &mut self,
        client: &DsmsClient<T>,
        type_id: i64,
    ) -> Vec<Machinery> {
        match client.machinery_of_type(type_id).await {
            Ok(machines) => machines,
            Err(e) => {
                self.state.error = Some(e.to_string());
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use dsms_client::{ClientResult, RawRequest, RawResponse};

    /// Fails the test if any request reaches the wire
    struct NoNetwork;

    #[async_trait]
    impl Transport for NoNetwork {
        async fn send(&self, _: &RawRequest, _: Option<&str>) -> ClientResult<RawResponse> {
            panic!("no network call expected");
        }
    }

    fn machine(status: MachineryStatus) -> Machinery {
        Machinery {
            id: 1,
            asset_tag: "PUMP-001".to_string(),
            name: "Main Pump".to_string(),
            type_id: 1,
            location: None,
            status,
        }
    }

    #[tokio::test]
    async fn test_maintenance_gating_blocks_before_network() {
        let client = DsmsClient::with_transport(NoNetwork);
        let mut page = MachineryPage::new();

        page.start_maintenance(&client, &machine(MachineryStatus::OutOfService), None)
            .await;
        assert!(page.state.error.is_some());

        page.state.error = None;
        page.end_maintenance(&client, &machine(MachineryStatus::Operational), None)
            .await;
        assert!(page.state.error.is_some());
    }

    #[test]
    fn test_draft_validation() {
        let mut page = MachineryPage::new();
        page.draft.name = "Main Pump".to_string();
        assert!(page.validate_draft().is_err());
        page.draft.asset_tag = "PUMP-001".to_string();
        assert!(page.validate_draft().is_err());
        page.draft.type_id = Some(3);
        assert!(page.validate_draft().is_ok());
    }
}
