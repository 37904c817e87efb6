//! Stock request pages: requester list, approval queue, fulfillment queue
//!
//! Every action is gated twice: by the status machine (no transition
//! skips a state) and by the viewer's privilege flags. Both gates are
//! display/client conveniences; the backend re-checks.

use dsms_client::api::RequestQuery;
use dsms_client::{DsmsClient, Transport};
use shared::models::{
    ApprovalContext, ApprovalDecision, FulfillmentAction, FulfillmentTask, RequestPriority,
    RequestStatus, StockRequest, StockRequestCreate,
};

use crate::page::{PageState, matches_search};
use crate::privileges::{PrivilegeFlag, has_privilege};

/// Actions the UI may offer on one request row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAction {
    Approve,
    Reject,
    Fulfill,
    Cancel,
}

/// Actions available for `request` to a viewer holding `privileges`
pub fn available_actions(request: &StockRequest, privileges: &[String]) -> Vec<RequestAction> {
    let mut actions = Vec::new();
    match request.status {
        RequestStatus::Pending => {
            if has_privilege(privileges, PrivilegeFlag::CanApproveRequests) {
                actions.push(RequestAction::Approve);
                actions.push(RequestAction::Reject);
            }
        }
        RequestStatus::Approved => {
            if has_privilege(privileges, PrivilegeFlag::CanFulfillRequests) {
                actions.push(RequestAction::Fulfill);
            }
            if has_privilege(privileges, PrivilegeFlag::CanCreateRequests) {
                actions.push(RequestAction::Cancel);
            }
        }
        // terminal states expose nothing
        RequestStatus::Rejected | RequestStatus::Fulfilled | RequestStatus::Cancelled => {}
    }
    actions
}

/// Form draft for a new request
#[derive(Debug, Clone)]
pub struct RequestDraft {
    pub item_id: Option<i64>,
    pub quantity: i64,
    pub priority: RequestPriority,
    pub reason: String,
}

impl Default for RequestDraft {
    fn default() -> Self {
        Self {
            item_id: None,
            quantity: 1,
            priority: RequestPriority::Medium,
            reason: String::new(),
        }
    }
}

/// Requests list page
#[derive(Debug, Default)]
pub struct RequestsPage {
    pub state: PageState<StockRequest>,
    pub query: RequestQuery,
    pub search: String,
    pub draft: RequestDraft,
    pub pending_cancel: Option<i64>,
}

impl RequestsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_create(&self, privileges: &[String]) -> bool {
        has_privilege(privileges, PrivilegeFlag::CanCreateRequests)
    }

    pub async fn load<T: Transport>(&mut self, client: &DsmsClient<T>) {
        let generation = self.state.begin_load();
        let result = client.list_requests(&self.query).await;
        self.state
            .finish_load(generation, result.map_err(|e| e.to_string()));
    }

    /// Rows after the client-side search over the request number
    pub fn visible(&self) -> Vec<&StockRequest> {
        self.state
            .collection
            .iter()
            .filter(|request| {
                matches_search(&self.search, &[&request.request_number, &request.reason])
            })
            .collect()
    }

    pub fn open_create(&mut self) {
        self.draft = RequestDraft::default();
        self.state.open_dialog(None);
    }

    pub async fn submit<T: Transport>(&mut self, client: &DsmsClient<T>) {
        self.state.begin_save();
        let Some(item_id) = self.draft.item_id else {
            self.state.finish_save(Err("Item is required".to_string()));
            return;
        };
        if self.draft.quantity <= 0 {
            self.state
                .finish_save(Err("Quantity must be positive".to_string()));
            return;
        }
        if self.draft.reason.trim().is_empty() {
            self.state.finish_save(Err("Reason is required".to_string()));
            return;
        }
        let payload = StockRequestCreate {
            item_id,
            quantity: self.draft.quantity,
            priority: self.draft.priority,
            reason: self.draft.reason.trim().to_string(),
        };
        let result = client.create_request(&payload).await.map(|_| ());
        if self.state.finish_save(result.map_err(|e| e.to_string())) {
            self.load(client).await;
        }
    }

    // cancellation is destructive enough to warrant a confirmation step

    pub fn request_cancel(&mut self, request: &StockRequest) -> bool {
        if !request.status.can_transition_to(RequestStatus::Cancelled) {
            return false;
        }
        self.pending_cancel = Some(request.id);
        true
    }

    pub fn dismiss_cancel(&mut self) {
        self.pending_cancel = None;
    }

    pub async fn confirm_cancel<T: Transport>(&mut self, client: &DsmsClient<T>) {
        let Some(id) = self.pending_cancel.take() else {
            return;
        };
        match client.cancel_request(id).await {
            Ok(()) => {
                tracing::info!(request_id = id, "Request cancelled");
                self.load(client).await;
            }
            Err(e) => self.state.error = Some(e.to_string()),
        }
    }
}

/// Approval queue: pending requests with a context panel
#[derive(Debug, Default)]
pub struct ApprovalQueue {
    pub state: PageState<StockRequest>,
    /// Context of the request currently under review
    pub context: Option<ApprovalContext>,
    pub comment: String,
}

impl ApprovalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load<T: Transport>(&mut self, client: &DsmsClient<T>) {
        let generation = self.state.begin_load();
        let result = client.pending_approvals().await;
        self.state
            .finish_load(generation, result.map_err(|e| e.to_string()));
    }

    /// Fetch the request/item/requester context before a decision
    pub async fn open_context<T: Transport>(&mut self, client: &DsmsClient<T>, request_id: i64) {
        match client.approval_context(request_id).await {
            Ok(context) => {
                self.comment.clear();
                self.context = Some(context);
            }
            Err(e) => self.state.error = Some(e.to_string()),
        }
    }

    pub async fn approve<T: Transport>(&mut self, client: &DsmsClient<T>) {
        self.decide(client, true).await;
    }

    pub async fn reject<T: Transport>(&mut self, client: &DsmsClient<T>) {
        self.decide(client, false).await;
    }

    async fn decide<T: Transport>(&mut self, client: &DsmsClient<T>, approve: bool) {
        let Some(context) = &self.context else {
            return;
        };
        // only pending requests may be decided
        if context.request.status != RequestStatus::Pending {
            self.state.error = Some("Request is no longer pending".to_string());
            return;
        }
        let decision = ApprovalDecision {
            comment: {
                let trimmed = self.comment.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            },
        };
        let id = context.request.id;
        let result = if approve {
            client.approve_request(id, &decision).await
        } else {
            client.reject_request(id, &decision).await
        };
        match result {
            Ok(()) => {
                tracing::info!(request_id = id, approve, "Approval decision submitted");
                self.context = None;
                self.comment.clear();
                self.load(client).await;
            }
            Err(e) => self.state.error = Some(e.to_string()),
        }
    }
}

/// Fulfillment queue
#[derive(Debug, Default)]
pub struct FulfillmentQueue {
    pub state: PageState<FulfillmentTask>,
}

impl FulfillmentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load<T: Transport>(&mut self, client: &DsmsClient<T>) {
        let generation = self.state.begin_load();
        let result = client.fulfillment_tasks().await;
        self.state
            .finish_load(generation, result.map_err(|e| e.to_string()));
    }

    /// Fulfill one approved request, then reload the queue
    pub async fn fulfill<T: Transport>(
        &mut self,
        client: &DsmsClient<T>,
        task: &FulfillmentTask,
        action: FulfillmentAction,
    ) {
        if task.request.status != RequestStatus::Approved {
            self.state.error = Some("Only approved requests can be fulfilled".to_string());
            return;
        }
        if action.quantity <= 0 {
            self.state.error = Some("Quantity must be positive".to_string());
            return;
        }
        match client.fulfill_request(task.request.id, &action).await {
            Ok(()) => {
                tracing::info!(request_id = task.request.id, "Request fulfilled");
                self.load(client).await;
            }
            Err(e) => self.state.error = Some(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(status: RequestStatus) -> StockRequest {
        StockRequest {
            id: 1,
            request_number: "REQ-0001".to_string(),
            requester_id: 9,
            item_id: 4,
            quantity: 2,
            priority: RequestPriority::High,
            status,
            reason: "line stoppage".to_string(),
        }
    }

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pending_actions_for_approver() {
        let actions = available_actions(
            &request(RequestStatus::Pending),
            &codes(&["REQUEST_APPROVE"]),
        );
        assert_eq!(actions, [RequestAction::Approve, RequestAction::Reject]);
    }

    #[test]
    fn test_pending_hides_actions_without_privilege() {
        let actions = available_actions(
            &request(RequestStatus::Pending),
            &codes(&["REQUEST_CREATE", "REQUEST_FULFILL"]),
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn test_approved_actions() {
        let actions = available_actions(
            &request(RequestStatus::Approved),
            &codes(&["REQUEST_FULFILL", "REQUEST_CREATE"]),
        );
        assert_eq!(actions, [RequestAction::Fulfill, RequestAction::Cancel]);
    }

    #[test]
    fn test_terminal_states_expose_nothing() {
        let all = codes(&["REQUEST_APPROVE", "REQUEST_FULFILL", "REQUEST_CREATE"]);
        for status in [
            RequestStatus::Rejected,
            RequestStatus::Fulfilled,
            RequestStatus::Cancelled,
        ] {
            assert!(available_actions(&request(status), &all).is_empty());
        }
    }

    #[test]
    fn test_cancel_only_from_approved() {
        let mut page = RequestsPage::new();
        assert!(!page.request_cancel(&request(RequestStatus::Pending)));
        assert!(!page.request_cancel(&request(RequestStatus::Fulfilled)));
        assert!(page.request_cancel(&request(RequestStatus::Approved)));
        assert_eq!(page.pending_cancel, Some(1));
    }
}
