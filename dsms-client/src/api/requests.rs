//! Stock request, approval and fulfillment endpoints

use shared::models::{
    ApprovalContext, ApprovalDecision, FulfillmentAction, FulfillmentTask, RequestPriority,
    RequestStatus, StockRequest, StockRequestCreate, StockRequestUpdate,
};

use crate::error::ClientResult;
use crate::http::DsmsClient;
use crate::transport::{Method, RawRequest, Transport};

/// Server-side request list filters
#[derive(Debug, Clone, Default)]
pub struct RequestQuery {
    pub status: Option<RequestStatus>,
    pub priority: Option<RequestPriority>,
    pub requester_id: Option<i64>,
}

impl RequestQuery {
    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(priority) = self.priority {
            query.push(("priority".to_string(), priority.as_str().to_string()));
        }
        if let Some(requester_id) = self.requester_id {
            query.push(("requester_id".to_string(), requester_id.to_string()));
        }
        query
    }
}

impl<T: Transport> DsmsClient<T> {
    /// `GET /requests/`
    pub async fn list_requests(&self, query: &RequestQuery) -> ClientResult<Vec<StockRequest>> {
        self.request(RawRequest::new(Method::Get, "requests/").with_query(query.to_query()))
            .await
    }

    /// `GET /requests/{id}`
    pub async fn get_request(&self, id: i64) -> ClientResult<StockRequest> {
        self.request(RawRequest::new(Method::Get, format!("requests/{}", id)))
            .await
    }

    /// `POST /requests/`
    pub async fn create_request(&self, payload: &StockRequestCreate) -> ClientResult<StockRequest> {
        self.request(RawRequest::new(Method::Post, "requests/").with_json(payload)?)
            .await
    }

    /// `PUT /requests/{id}` (pending requests only)
    pub async fn update_request(
        &self,
        id: i64,
        payload: &StockRequestUpdate,
    ) -> ClientResult<StockRequest> {
        self.request(RawRequest::new(Method::Put, format!("requests/{}", id)).with_json(payload)?)
            .await
    }

    /// `POST /requests/{id}/cancel`
    pub async fn cancel_request(&self, id: i64) -> ClientResult<()> {
        self.request_empty(RawRequest::new(Method::Post, format!("requests/{}/cancel", id)))
            .await
    }

    /// `GET /approval/pending`
    pub async fn pending_approvals(&self) -> ClientResult<Vec<StockRequest>> {
        self.request(RawRequest::new(Method::Get, "approval/pending"))
            .await
    }

    /// `GET /approval/{id}/context`
    pub async fn approval_context(&self, id: i64) -> ClientResult<ApprovalContext> {
        self.request(RawRequest::new(Method::Get, format!("approval/{}/context", id)))
            .await
    }

    /// `POST /approval/{id}/approve`
    pub async fn approve_request(&self, id: i64, decision: &ApprovalDecision) -> ClientResult<()> {
        self.request_empty(
            RawRequest::new(Method::Post, format!("approval/{}/approve", id))
                .with_json(decision)?,
        )
        .await
    }

    /// `POST /approval/{id}/reject`
    pub async fn reject_request(&self, id: i64, decision: &ApprovalDecision) -> ClientResult<()> {
        self.request_empty(
            RawRequest::new(Method::Post, format!("approval/{}/reject", id)).with_json(decision)?,
        )
        .await
    }

    /// `GET /fulfillment/tasks`
    pub async fn fulfillment_tasks(&self) -> ClientResult<Vec<FulfillmentTask>> {
        self.request(RawRequest::new(Method::Get, "fulfillment/tasks"))
            .await
    }

    /// `POST /fulfillment/{id}/fulfill`
    pub async fn fulfill_request(&self, id: i64, action: &FulfillmentAction) -> ClientResult<()> {
        self.request_empty(
            RawRequest::new(Method::Post, format!("fulfillment/{}/fulfill", id))
                .with_json(action)?,
        )
        .await
    }
}
