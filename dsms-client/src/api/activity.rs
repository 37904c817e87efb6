//! Activity log endpoints

use shared::models::{ActivityLog, ActivityLogCleanup, ActivityLogCleanupResult};

use crate::error::ClientResult;
use crate::http::DsmsClient;
use crate::transport::{Method, RawRequest, Transport};

/// Server-side activity log filters
#[derive(Debug, Clone, Default)]
pub struct ActivityLogQuery {
    pub user_id: Option<i64>,
    pub resource_type: Option<String>,
    pub action_type: Option<String>,
}

impl ActivityLogQuery {
    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(user_id) = self.user_id {
            query.push(("user_id".to_string(), user_id.to_string()));
        }
        if let Some(resource_type) = &self.resource_type {
            query.push(("resource_type".to_string(), resource_type.clone()));
        }
        if let Some(action_type) = &self.action_type {
            query.push(("action_type".to_string(), action_type.clone()));
        }
        query
    }
}

impl<T: Transport> DsmsClient<T> {
    /// `GET /activity-logs`
    pub async fn list_activity_logs(
        &self,
        query: &ActivityLogQuery,
    ) -> ClientResult<Vec<ActivityLog>> {
        self.request(RawRequest::new(Method::Get, "activity-logs").with_query(query.to_query()))
            .await
    }

    /// `GET /activity-logs/{id}`
    pub async fn get_activity_log(&self, id: i64) -> ClientResult<ActivityLog> {
        self.request(RawRequest::new(Method::Get, format!("activity-logs/{}", id)))
            .await
    }

    /// `POST /activity-logs/cleanup`
    pub async fn cleanup_activity_logs(
        &self,
        payload: &ActivityLogCleanup,
    ) -> ClientResult<ActivityLogCleanupResult> {
        self.request(RawRequest::new(Method::Post, "activity-logs/cleanup").with_json(payload)?)
            .await
    }
}
