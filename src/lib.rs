// Planvault - Batch export of approved treatment plans
// Copyright (c) 2025 Planvault Contributors
// Licensed under the MIT License

//! # Planvault - batch treatment plan export
//!
//! Planvault drives a treatment planning application through its automation
//! surface and exports every approved plan of a list of patients to one
//! archive destination.
//!
//! ## Overview
//!
//! A run:
//! - **Launches** the planning application (the only fatal step)
//! - **Loads** each patient of the input list once, in order
//! - **Exports** every plan that is not unapproved, with exactly one
//!   destination active
//! - **Records** every patient- or plan-level failure in an ordered ledger
//!   and carries on with the next unit of work
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Session, patient and plan workflow, failure ledger, orchestrator
//! - [`adapters`] - Planning application driver trait, HTTP automation bridge, patient list reader
//! - [`domain`] - Identifiers, plans, export requests, errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use planvault::adapters::bridge::BridgeDriver;
//! use planvault::adapters::input::read_patient_ids;
//! use planvault::config::load_config;
//! use planvault::core::BatchOrchestrator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("planvault.toml")?;
//!     let patient_ids = read_patient_ids(&config.batch.input_path, &config.input)?;
//!
//!     let driver = BridgeDriver::new(&config.bridge)?;
//!     let report = BatchOrchestrator::from_config(&config, Box::new(driver))?
//!         .run(&patient_ids)
//!         .await?;
//!
//!     println!("{} failures", report.ledger.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Failure Handling
//!
//! Driver calls never unwind past the step that made them. Structured
//! refusals, transport errors and driver panics all become a
//! [`domain::DriverFault`]; the step turns it into a [`core::StepFailure`]
//! and the orchestrator appends a [`core::FailureRecord`]:
//!
//! ```rust
//! use planvault::core::{FailureKind, FailureLedger, FailureRecord, StepFailure};
//! use planvault::domain::PatientId;
//!
//! let mut ledger = FailureLedger::new();
//! ledger.append(FailureRecord::plan(
//!     PatientId::new("RT-1001").unwrap(),
//!     "Plan2",
//!     StepFailure::new(FailureKind::Submit, "aborted: export failed"),
//! ));
//! assert_eq!(ledger.all()[0].plan_label(), "Plan2");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
