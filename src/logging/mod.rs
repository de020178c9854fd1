//! Logging and observability
//!
//! Structured logging built on `tracing`:
//! - Human-readable console output
//! - Optional JSON lines in a rolling local file
//! - `RUST_LOG` override of the configured level
//!
//! Every batch run executes inside a `batch_run` span carrying its `run_id`.
//!
//! # Example
//!
//! ```no_run
//! use planvault::logging::init_logging;
//! use planvault::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log a patient load attempt
///
/// # Example
///
/// ```no_run
/// use planvault::log_patient_attempt;
/// use planvault::domain::PatientId;
///
/// let patient_id = PatientId::new("RT-1001").unwrap();
/// log_patient_attempt!(&patient_id, 1, 20);
/// ```
#[macro_export]
macro_rules! log_patient_attempt {
    ($patient_id:expr, $position:expr, $total:expr) => {
        tracing::info!(
            patient_id = %$patient_id,
            position = $position,
            total = $total,
            "Loading patient"
        );
    };
}

/// Log a plan-level failure
///
/// # Example
///
/// ```no_run
/// use planvault::log_plan_failure;
/// use planvault::core::{FailureKind, StepFailure};
/// use planvault::domain::PatientId;
///
/// let patient_id = PatientId::new("RT-1001").unwrap();
/// let failure = StepFailure::new(FailureKind::Submit, "export aborted");
/// log_plan_failure!(&patient_id, "Plan1", &failure);
/// ```
#[macro_export]
macro_rules! log_plan_failure {
    ($patient_id:expr, $plan:expr, $failure:expr) => {
        tracing::warn!(
            patient_id = %$patient_id,
            plan = %$plan,
            kind = %$failure.kind,
            reason = %$failure.reason,
            "Plan export failed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use planvault::log_error_with_context;
/// use planvault::domain::PlanvaultError;
///
/// let error = PlanvaultError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
