// src/models/request.rs
//! Borrow/lend requests exchanged between municipalities.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Lifecycle of a request: `Pending` moves once to `Approved` or `Rejected`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
    Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Decision {
    Approve,
    Reject,
}

impl RequestStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }

    /// Status reached by applying `decision`, if the transition exists.
    pub fn apply(self, decision: Decision) -> Option<RequestStatus> {
        match (self, decision) {
            (RequestStatus::Pending, Decision::Approve) => Some(RequestStatus::Approved),
            (RequestStatus::Pending, Decision::Reject) => Some(RequestStatus::Rejected),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Εκκρεμεί",
            RequestStatus::Approved => "Εγκρίθηκε",
            RequestStatus::Rejected => "Απορρίφθηκε",
        }
    }
}

/// Anything that can sit in an approval queue.
pub trait Reviewable {
    fn request_id(&self) -> String;
    fn status(&self) -> RequestStatus;
    fn set_status(&mut self, status: RequestStatus);
}

// ==================== INCOMING (EMPLOYEE APPROVALS) ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomingRequest {
    pub id: String,
    pub resource_name: String,
    pub category: String,
    pub requested_by: String,
    pub from_municipality: String,
    pub quantity: u32,
    pub unit: String,
    pub justification: String,
    pub date: String,
    pub status: RequestStatus,
}

impl Reviewable for IncomingRequest {
    fn request_id(&self) -> String {
        self.id.clone()
    }

    fn status(&self) -> RequestStatus {
        self.status
    }

    fn set_status(&mut self, status: RequestStatus) {
        self.status = status;
    }
}

// ==================== LEND (MUNICIPAL) ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LendRequest {
    pub id: u32,
    pub municipality: String,
    pub resource: String,
    pub quantity: u32,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
    pub status: RequestStatus,
    pub request_date: String,
}

impl Reviewable for LendRequest {
    fn request_id(&self) -> String {
        self.id.to_string()
    }

    fn status(&self) -> RequestStatus {
        self.status
    }

    fn set_status(&mut self, status: RequestStatus) {
        self.status = status;
    }
}

// ==================== OUTGOING ====================

pub const AWAITING_APPROVAL: &str = "Σε αναμονή έγκρισης";

/// A request this municipality sent out, listed under "Οι Αιτήσεις Μου".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingRequest {
    pub id: String,
    pub resource_name: String,
    pub quantity: u32,
    pub municipality: String,
    pub status: String,
    pub date: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions_only_from_pending() {
        assert_eq!(RequestStatus::Pending.apply(Decision::Approve), Some(RequestStatus::Approved));
        assert_eq!(RequestStatus::Pending.apply(Decision::Reject), Some(RequestStatus::Rejected));
        assert_eq!(RequestStatus::Approved.apply(Decision::Reject), None);
        assert_eq!(RequestStatus::Rejected.apply(Decision::Approve), None);
        assert_eq!(RequestStatus::Approved.apply(Decision::Approve), None);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(RequestStatus::Approved.is_terminal());
        assert!(RequestStatus::Rejected.is_terminal());
    }
}
