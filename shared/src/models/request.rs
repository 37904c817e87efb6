//! Stock Request Model
//!
//! Request status is a one-directional workflow:
//! `pending -> {approved, rejected}`, `approved -> {fulfilled, cancelled}`.
//! `rejected`, `fulfilled` and `cancelled` are terminal; there is no
//! re-open transition.

use serde::{Deserialize, Serialize};

/// Request priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl RequestPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestPriority::Low => "low",
            RequestPriority::Medium => "medium",
            RequestPriority::High => "high",
            RequestPriority::Critical => "critical",
        }
    }
}

/// Request workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Fulfilled,
    Cancelled,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Fulfilled => "fulfilled",
            RequestStatus::Cancelled => "cancelled",
        }
    }

    /// States reachable from `self` in one step
    pub fn successors(&self) -> &'static [RequestStatus] {
        match self {
            RequestStatus::Pending => &[RequestStatus::Approved, RequestStatus::Rejected],
            RequestStatus::Approved => &[RequestStatus::Fulfilled, RequestStatus::Cancelled],
            RequestStatus::Rejected | RequestStatus::Fulfilled | RequestStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        self.successors().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }
}

/// Stock request entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockRequest {
    pub id: i64,
    pub request_number: String,
    pub requester_id: i64,
    pub item_id: i64,
    pub quantity: i64,
    pub priority: RequestPriority,
    pub status: RequestStatus,
    pub reason: String,
}

/// Create request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockRequestCreate {
    pub item_id: i64,
    pub quantity: i64,
    pub priority: RequestPriority,
    pub reason: String,
}

/// Update request payload (pending requests only)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockRequestUpdate {
    pub quantity: Option<i64>,
    pub priority: Option<RequestPriority>,
    pub reason: Option<String>,
}

/// Approval decision payload (`POST /approval/{id}/approve|reject`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApprovalDecision {
    pub comment: Option<String>,
}

/// Context shown before an approval decision (`GET /approval/{id}/context`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalContext {
    pub request: StockRequest,
    pub item: super::Item,
    pub requester: super::User,
    /// On-hand quantity across stores, when the backend can resolve it
    pub stock_on_hand: Option<i64>,
}

/// Fulfillment work item (`GET /fulfillment/tasks`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FulfillmentTask {
    pub request: StockRequest,
    pub item: super::Item,
    pub store_id: Option<i64>,
}

/// Fulfillment payload (`POST /fulfillment/{id}/fulfill`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FulfillmentAction {
    pub store_id: i64,
    pub quantity: i64,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_transitions() {
        let s = RequestStatus::Pending;
        assert!(s.can_transition_to(RequestStatus::Approved));
        assert!(s.can_transition_to(RequestStatus::Rejected));
        assert!(!s.can_transition_to(RequestStatus::Fulfilled));
        assert!(!s.can_transition_to(RequestStatus::Cancelled));
        assert!(!s.can_transition_to(RequestStatus::Pending));
    }

    #[test]
    fn test_approved_transitions() {
        let s = RequestStatus::Approved;
        assert!(s.can_transition_to(RequestStatus::Fulfilled));
        assert!(s.can_transition_to(RequestStatus::Cancelled));
        assert!(!s.can_transition_to(RequestStatus::Rejected));
    }

    #[test]
    fn test_terminal_states_have_no_successors() {
        for s in [
            RequestStatus::Rejected,
            RequestStatus::Fulfilled,
            RequestStatus::Cancelled,
        ] {
            assert!(s.is_terminal());
            assert!(s.successors().is_empty());
        }
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(!RequestStatus::Approved.is_terminal());
    }

    #[test]
    fn test_priority_order() {
        assert!(RequestPriority::Critical > RequestPriority::High);
        assert!(RequestPriority::High > RequestPriority::Medium);
        assert!(RequestPriority::Medium > RequestPriority::Low);
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&RequestPriority::Critical).unwrap(),
            "\"critical\""
        );
    }
}
