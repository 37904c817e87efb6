//! Activity log page
//!
//! Read-only audit trail with filterable list, detail view and the
//! age-based cleanup. Cleanup always runs as a dry run first; the
//! destructive call requires an explicit confirmation with the same
//! filter still in place.

use dsms_client::api::ActivityLogQuery;
use dsms_client::{DsmsClient, Transport};
use shared::models::{ActivityLog, ActivityLogCleanup, ActivityLogCleanupResult, User};

use crate::page::PageState;
use crate::privileges::{PrivilegeFlag, has_privilege};

/// Cleanup dialog state
#[derive(Debug, Clone)]
pub struct CleanupDraft {
    pub older_than_days: u32,
    pub resource_type: Option<String>,
    pub action_type: Option<String>,
}

impl Default for CleanupDraft {
    fn default() -> Self {
        Self {
            older_than_days: 90,
            resource_type: None,
            action_type: None,
        }
    }
}

impl CleanupDraft {
    fn to_request(&self, dry_run: bool) -> ActivityLogCleanup {
        ActivityLogCleanup {
            older_than_days: self.older_than_days,
            resource_type: self.resource_type.clone(),
            action_type: self.action_type.clone(),
            dry_run,
        }
    }
}

/// Activity log page controller
#[derive(Debug, Default)]
pub struct ActivityPage {
    pub state: PageState<ActivityLog>,
    pub query: ActivityLogQuery,
    /// Users for the filter dropdown; loads best-effort
    pub user_picklist: Vec<User>,
    pub detail: Option<ActivityLog>,
    pub cleanup_draft: CleanupDraft,
    /// Dry-run result awaiting confirmation; cleared by any filter edit
    pub cleanup_preview: Option<ActivityLogCleanupResult>,
}

impl ActivityPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_cleanup(&self, privileges: &[String]) -> bool {
        has_privilege(privileges, PrivilegeFlag::CanManageActivityLogs)
    }

    pub async fn load<T: Transport>(&mut self, client: &DsmsClient<T>) {
        let generation = self.state.begin_load();
        let result = client.list_activity_logs(&self.query).await;
        self.state
            .finish_load(generation, result.map_err(|e| e.to_string()));

        // 用户筛选下拉列表加载失败不阻塞主列表
        match client.list_users().await {
            Ok(users) => self.user_picklist = users,
            Err(e) => tracing::warn!("User picklist load failed, continuing without: {}", e),
        }
    }

    pub async fn open_detail<T: Transport>(&mut self, client: &DsmsClient<T>, id: i64) {
        match client.get_activity_log(id).await {
            Ok(entry) => self.detail = Some(entry),
            Err(e) => self.state.error = Some(e.to_string()),
        }
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Edit the cleanup filter; any change invalidates a pending preview
    pub fn edit_cleanup(&mut self, draft: CleanupDraft) {
        self.cleanup_draft = draft;
        self.cleanup_preview = None;
    }

    /// Dry run: count what the filter would delete
    pub async fn preview_cleanup<T: Transport>(&mut self, client: &DsmsClient<T>) {
        if self.cleanup_draft.older_than_days == 0 {
            self.state.error = Some("Retention must be at least one day".to_string());
            return;
        }
        match client
            .cleanup_activity_logs(&self.cleanup_draft.to_request(true))
            .await
        {
            Ok(result) => self.cleanup_preview = Some(result),
            Err(e) => self.state.error = Some(e.to_string()),
        }
    }

    /// The destructive call; only reachable after a dry run
    pub async fn confirm_cleanup<T: Transport>(&mut self, client: &DsmsClient<T>) {
        if self.cleanup_preview.is_none() {
            self.state.error = Some("Run a preview before deleting".to_string());
            return;
        }
        match client
            .cleanup_activity_logs(&self.cleanup_draft.to_request(false))
            .await
        {
            Ok(result) => {
                tracing::info!(affected = result.affected, "Activity logs cleaned up");
                self.cleanup_preview = None;
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
    fn test_editing_filter_invalidates_preview() {
        let mut page = ActivityPage::new();
        page.cleanup_preview = Some(ActivityLogCleanupResult {
            affected: 42,
            dry_run: true,
        });
        page.edit_cleanup(CleanupDraft {
            older_than_days: 30,
            resource_type: Some("item".to_string()),
            action_type: None,
        });
        assert!(page.cleanup_preview.is_none());
        assert_eq!(page.cleanup_draft.older_than_days, 30);
    }
}
