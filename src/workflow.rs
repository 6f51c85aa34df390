// src/workflow.rs
//! Approval queue shared by the employee approvals page and the municipal
//! lend page.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::error::{ApiError, ApiResult};
use crate::models::{Decision, RequestStatus, Reviewable};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
    Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Approved,
    Rejected,
}

impl StatusFilter {
    pub fn matches(&self, status: RequestStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == RequestStatus::Pending,
            StatusFilter::Approved => status == RequestStatus::Approved,
            StatusFilter::Rejected => status == RequestStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusCounts {
    pub all: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone)]
pub struct ApprovalQueue<T> {
    items: Vec<T>,
}

impl<T: Reviewable> ApprovalQueue<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.request_id() == id)
    }

    pub fn pending(&self) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| item.status() == RequestStatus::Pending)
            .collect()
    }

    pub fn processed(&self) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| item.status().is_terminal())
            .collect()
    }

    pub fn filtered(&self, filter: StatusFilter) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| filter.matches(item.status()))
            .collect()
    }

    pub fn counts(&self) -> StatusCounts {
        self.items.iter().fold(
            StatusCounts { all: self.items.len(), ..Default::default() },
            |mut counts, item| {
                match item.status() {
                    RequestStatus::Pending => counts.pending += 1,
                    RequestStatus::Approved => counts.approved += 1,
                    RequestStatus::Rejected => counts.rejected += 1,
                }
                counts
            },
        )
    }

    /// Applies `decision` to a pending request. Terminal requests are refused.
    pub fn decide(&mut self, id: &str, decision: Decision) -> ApiResult<RequestStatus> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.request_id() == id)
            .ok_or_else(|| ApiError::request_not_found(id))?;

        let current = item.status();
        let next = current
            .apply(decision)
            .ok_or_else(|| ApiError::request_already_processed(id, current.as_ref()))?;

        item.set_status(next);
        tracing::info!(request_id = id, decision = %decision, status = %next, "request decided");
        Ok(next)
    }
}
