//! Activity Log Model
//!
//! Immutable audit records, append-only from the client's perspective.
//! The only write operation is the age/filter-based cleanup.

use serde::{Deserialize, Serialize};

/// Activity log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: i64,
    pub user_id: Option<i64>,
    pub action_type: String,
    pub resource_type: String,
    pub resource_id: Option<i64>,
    pub request_method: String,
    pub request_path: String,
    pub status_code: Option<u16>,
    pub metadata: Option<serde_json::Value>,
    pub error_message: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Cleanup request (`POST /activity-logs/cleanup`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLogCleanup {
    pub older_than_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
    /// When true, the backend only counts matching rows
    pub dry_run: bool,
}

/// Cleanup result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLogCleanupResult {
    /// Rows deleted, or rows that would be deleted on a dry run
    pub affected: u64,
    pub dry_run: bool,
}
