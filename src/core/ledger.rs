//! Failure ledger
//!
//! Ordered, append-only record of everything that went wrong in a run. A
//! patient appears once for a patient-level failure, or once per failed plan.
//! Records are never merged, reordered or changed after they are appended.

use crate::domain::{DriverFault, PatientId};
use chrono::{DateTime, Utc};
use std::fmt;

/// Where in the per-patient workflow a failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Patient could not be selected or loaded
    PatientLoad,
    /// Plans of a loaded patient could not be enumerated
    PlanListing,
    /// Loaded patient could not be closed
    PatientClose,
    /// Plan could not be made active
    PlanLoad,
    /// Export dialog could not be opened
    ExportSurface,
    /// A category or destination toggle failed
    Configure,
    /// The export itself failed
    Submit,
}

impl FailureKind {
    /// Whether the failure is attributed to a single plan
    pub fn is_plan_level(&self) -> bool {
        matches!(
            self,
            FailureKind::PlanLoad
                | FailureKind::ExportSurface
                | FailureKind::Configure
                | FailureKind::Submit
        )
    }

    /// Short name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::PatientLoad => "patient_load",
            FailureKind::PlanListing => "plan_listing",
            FailureKind::PatientClose => "patient_close",
            FailureKind::PlanLoad => "plan_load",
            FailureKind::ExportSurface => "export_surface",
            FailureKind::Configure => "configure",
            FailureKind::Submit => "submit",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed step, before it is attributed to a patient and plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    /// Step that failed
    pub kind: FailureKind,
    /// Human-readable reason
    pub reason: String,
}

impl StepFailure {
    /// Create a new step failure
    pub fn new(kind: FailureKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }

    /// Create a step failure from a driver fault
    pub fn from_fault(kind: FailureKind, fault: &DriverFault) -> Self {
        if fault.is_abort() {
            tracing::debug!(kind = %kind, "Abort normalized into step failure");
        }
        Self::new(kind, fault.to_string())
    }
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.reason)
    }
}

/// One entry in the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    /// Patient the failure belongs to
    pub patient_id: PatientId,

    /// Plan the failure belongs to; `None` for patient-level failures
    pub plan_name: Option<String>,

    /// Failed step
    pub kind: FailureKind,

    /// Reason reported by the step
    pub reason: String,

    /// When the failure was recorded
    pub occurred_at: DateTime<Utc>,
}

impl FailureRecord {
    /// Record a patient-level failure
    pub fn patient(patient_id: PatientId, failure: StepFailure) -> Self {
        Self {
            patient_id,
            plan_name: None,
            kind: failure.kind,
            reason: failure.reason,
            occurred_at: Utc::now(),
        }
    }

    /// Record a plan-level failure
    pub fn plan(patient_id: PatientId, plan_name: impl Into<String>, failure: StepFailure) -> Self {
        Self {
            patient_id,
            plan_name: Some(plan_name.into()),
            kind: failure.kind,
            reason: failure.reason,
            occurred_at: Utc::now(),
        }
    }

    /// Plan name, or an empty string for patient-level failures
    pub fn plan_label(&self) -> &str {
        self.plan_name.as_deref().unwrap_or("")
    }
}

/// Ordered, append-only collection of failure records
#[derive(Debug, Clone, Default)]
pub struct FailureLedger {
    records: Vec<FailureRecord>,
}

impl FailureLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record
    pub fn append(&mut self, record: FailureRecord) {
        self.records.push(record);
    }

    /// All records in the order they were appended
    pub fn all(&self) -> &[FailureRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing failed
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Emit one log line per record, then a closing summary line
    pub fn log_report(&self) {
        for record in &self.records {
            tracing::warn!(
                patient_id = %record.patient_id,
                plan = %record.plan_label(),
                kind = %record.kind,
                reason = %record.reason,
                occurred_at = %record.occurred_at.to_rfc3339(),
                "Export failure"
            );
        }

        if self.records.is_empty() {
            tracing::info!("Batch completed without failures");
        } else {
            let plan_failures = self
                .records
                .iter()
                .filter(|record| record.kind.is_plan_level())
                .count();
            tracing::warn!(
                failure_count = self.records.len(),
                patient_failures = self.records.len() - plan_failures,
                plan_failures,
                "Batch completed with failures"
            );
        }
    }
}
