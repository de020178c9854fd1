//! Wire models for the automation bridge
//!
//! JSON bodies exchanged with the bridge agent. Kept separate from the
//! domain types so the wire format can change without touching the core.

use crate::domain::{ApprovalState, ContentCategory, Plan};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Serialize)]
pub(crate) struct OpenPatientRequest<'a> {
    pub installation: &'a str,
    pub clinic: &'a str,
    pub patient_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct WindowRequest {
    pub visible: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoadPlanRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct OpenExportRequest {
    pub confirm_offset: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct CategoryRequest {
    pub category: ContentCategory,
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct DestinationRequest<'a> {
    pub name: &'a str,
    pub active: bool,
}

/// Plan summary as listed by the bridge
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PlanSummary {
    pub name: String,
    #[serde(default)]
    pub approval_status: String,
}

impl From<PlanSummary> for Plan {
    fn from(summary: PlanSummary) -> Self {
        let approval = match ApprovalState::from_str(&summary.approval_status) {
            Ok(state) => state,
            Err(never) => match never {},
        };
        Plan::new(summary.name, approval)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReadyResponse {
    pub ready: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ToggleResponse {
    pub applied: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExportStateResponse {
    pub open: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DialogResponse {
    pub visible: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body returned by the bridge on 4xx/5xx
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: String,
}
