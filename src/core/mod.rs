//! Core batch export logic for Planvault.
//!
//! # Modules
//!
//! - [`session`] - Planning application lifecycle (launch, terminate)
//! - [`boundary`] - Abort normalization and confirmation dialog handling for every driver call
//! - [`patient`] - Patient loading and closing
//! - [`plan`] - Per-plan export workflow
//! - [`ledger`] - Ordered, append-only failure records
//! - [`orchestrator`] - The per-patient, per-plan control loop
//!
//! # Export Workflow
//!
//! 1. **Launch**: Start the planning application (fatal on failure)
//! 2. **Load patient**: One attempt per patient id, in input order
//! 3. **List plans**: Keep every plan that is not unapproved
//! 4. **Export plan**: Load, open export, configure, submit
//! 5. **Close patient**: Exactly once per loaded patient
//! 6. **Terminate**: Shut the application down and report the ledger
//!
//! # Example
//!
//! ```rust,no_run
//! use planvault::adapters::bridge::BridgeDriver;
//! use planvault::adapters::input::read_patient_ids;
//! use planvault::config::load_config;
//! use planvault::core::orchestrator::BatchOrchestrator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("planvault.toml")?;
//! let patient_ids = read_patient_ids(&config.batch.input_path, &config.input)?;
//!
//! let driver = BridgeDriver::new(&config.bridge)?;
//! let orchestrator = BatchOrchestrator::from_config(&config, Box::new(driver))?;
//! let report = orchestrator.run(&patient_ids).await?;
//!
//! for record in report.ledger.all() {
//!     println!("{} {} {}", record.patient_id, record.plan_label(), record.reason);
//! }
//! # Ok(())
//! # }
//! ```

pub mod boundary;
pub mod ledger;
pub mod orchestrator;
pub mod patient;
pub mod plan;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use ledger::{FailureKind, FailureLedger, FailureRecord, StepFailure};
pub use orchestrator::{BatchOrchestrator, RunReport};
