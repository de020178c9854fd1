//! Domain error types
//!
//! Two layers of errors live here:
//!
//! - [`PlanvaultError`] for conditions that stop a command (bad configuration,
//!   unreadable input, a session that cannot be established).
//! - [`DriverFault`] for a single failed call against the planning
//!   application. These never stop a run; the core turns them into ledger
//!   entries at the patient or plan boundary.

use thiserror::Error;

/// Main Planvault error type
#[derive(Debug, Error)]
pub enum PlanvaultError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The patient list could not be read
    #[error("Input error: {0}")]
    Input(String),

    /// The planning application session could not be established
    #[error("Session error: {0}")]
    Session(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Failure of one call against the planning application
///
/// `Rejected` is a structured answer ("cannot do that"); `Aborted` is the
/// abrupt abort the automation surface raises instead of returning a status.
/// Both are handled identically at patient and plan boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverFault {
    /// The application refused the operation
    #[error("rejected: {0}")]
    Rejected(String),

    /// The automation surface aborted the operation
    #[error("aborted: {0}")]
    Aborted(String),

    /// The driver could not reach the automation surface
    #[error("transport failure: {0}")]
    Transport(String),
}

impl DriverFault {
    /// Whether the fault came from the abrupt-abort path
    pub fn is_abort(&self) -> bool {
        matches!(self, DriverFault::Aborted(_))
    }
}
