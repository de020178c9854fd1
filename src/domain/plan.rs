//! Treatment plan domain model
//!
//! Plans are enumerated fresh from the planning application every time a
//! patient is loaded; they are never persisted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Approval state of a treatment plan as reported by the planning application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalState {
    /// Plan has been approved (planning or treatment approval)
    Approved,
    /// Plan has not been approved
    Unapproved,
    /// Any other state the application reports (retired, rejected, ...)
    Other(String),
}

impl ApprovalState {
    /// Whether a plan in this state may be exported
    ///
    /// Everything except `Unapproved` is eligible.
    pub fn is_exportable(&self) -> bool {
        !matches!(self, ApprovalState::Unapproved)
    }
}

impl FromStr for ApprovalState {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        Ok(match normalized.as_str() {
            "approved" | "planning approved" | "planningapproved" | "treatment approved"
            | "treatmentapproved" => ApprovalState::Approved,
            "unapproved" | "not approved" => ApprovalState::Unapproved,
            _ => ApprovalState::Other(s.trim().to_string()),
        })
    }
}

impl fmt::Display for ApprovalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApprovalState::Approved => write!(f, "approved"),
            ApprovalState::Unapproved => write!(f, "unapproved"),
            ApprovalState::Other(state) => write!(f, "{state}"),
        }
    }
}

/// A treatment plan belonging to the currently loaded patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Plan name as shown in the planning application
    pub name: String,

    /// Approval state
    pub approval: ApprovalState,
}

impl Plan {
    /// Create a new plan
    pub fn new(name: impl Into<String>, approval: ApprovalState) -> Self {
        Self {
            name: name.into(),
            approval,
        }
    }

    /// Whether this plan is eligible for export
    pub fn is_exportable(&self) -> bool {
        self.approval.is_exportable()
    }
}
