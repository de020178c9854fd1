//! Batch orchestrator - top-level control loop of an export run
//!
//! The orchestrator owns the [`ApplicationSession`] for the whole run and
//! visits every patient id exactly once, in input order. Failures below the
//! session level are recorded in the [`FailureLedger`] and never end the run:
//!
//! - a patient that cannot be loaded is recorded and skipped (nothing to close)
//! - a plan that fails at any step is recorded and the next plan is tried
//! - every patient that was loaded is closed exactly once
//!
//! Only a session that cannot be launched aborts the run.

use crate::adapters::driver::ClinicalDriver;
use crate::config::PlanvaultConfig;
use crate::core::ledger::{FailureLedger, FailureRecord};
use crate::core::patient::PatientLoader;
use crate::core::plan::PlanExporter;
use crate::core::session::ApplicationSession;
use crate::domain::{DestinationName, ExportRequest, PatientId, PlanvaultError, Result};
use std::time::{Duration, Instant};
use tracing::Instrument;
use uuid::Uuid;

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Identifier attached to every log line of the run
    pub run_id: Uuid,

    /// Every failure, in the order it happened
    pub ledger: FailureLedger,

    /// Number of patient ids in the input
    pub patients_attempted: usize,

    /// Whether exports were configured but not submitted
    pub dry_run: bool,

    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl RunReport {
    /// Whether the run finished without a single failure
    pub fn is_clean(&self) -> bool {
        self.ledger.is_empty()
    }
}

/// Drives the per-patient, per-plan export loop
pub struct BatchOrchestrator {
    session: ApplicationSession,
    loader: PatientLoader,
    exporter: PlanExporter,
}

impl BatchOrchestrator {
    /// Assemble an orchestrator from its parts
    pub fn new(session: ApplicationSession, loader: PatientLoader, exporter: PlanExporter) -> Self {
        Self {
            session,
            loader,
            exporter,
        }
    }

    /// Build an orchestrator from configuration and a driver
    ///
    /// Checks the four required batch settings and the destination list
    /// first; nothing touches the driver when they are incomplete.
    pub fn from_config(config: &PlanvaultConfig, driver: Box<dyn ClinicalDriver>) -> Result<Self> {
        config.batch.validate().map_err(PlanvaultError::Configuration)?;
        config
            .export
            .validate_destinations(&config.batch.target_destination)
            .map_err(PlanvaultError::Configuration)?;

        let target = DestinationName::new(config.batch.target_destination.as_str())
            .map_err(PlanvaultError::Configuration)?;

        let known = config
            .export
            .known_destinations
            .iter()
            .map(|name| DestinationName::new(name.as_str()))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| PlanvaultError::Configuration(format!("export.known_destinations: {e}")))?;

        let request = ExportRequest::new(&config.export.categories, &known, target)
            .map_err(PlanvaultError::Configuration)?;

        Ok(Self::new(
            ApplicationSession::new(driver, config.bridge.show_window),
            PatientLoader::new(
                config.batch.installation.as_str(),
                config.batch.clinic.as_str(),
            ),
            PlanExporter::new(
                request,
                config.export.confirm_offset,
                config.application.dry_run,
            ),
        ))
    }

    /// Run the batch over `patient_ids`
    ///
    /// # Errors
    ///
    /// Returns [`PlanvaultError::Session`] when the planning application
    /// cannot be launched. Every other failure ends up in the report's ledger.
    pub async fn run(self, patient_ids: &[PatientId]) -> Result<RunReport> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("batch_run", run_id = %run_id);
        self.execute(run_id, patient_ids).instrument(span).await
    }

    async fn execute(mut self, run_id: Uuid, patient_ids: &[PatientId]) -> Result<RunReport> {
        let start_time = Instant::now();
        let dry_run = self.exporter.is_dry_run();

        tracing::info!(
            patients = patient_ids.len(),
            destination = %self.exporter.request().target(),
            deactivated = self.exporter.request().inactive_destinations().len(),
            dry_run,
            "Starting batch export"
        );

        if let Err(e) = self.session.launch().await {
            tracing::error!(error = %e, "Cannot start planning application; no patients processed");
            self.session.terminate().await;
            return Err(e);
        }

        let mut ledger = FailureLedger::new();
        for (index, patient_id) in patient_ids.iter().enumerate() {
            crate::log_patient_attempt!(patient_id, index + 1, patient_ids.len());
            self.process_patient(patient_id, &mut ledger).await;
        }

        self.session.terminate().await;

        let report = RunReport {
            run_id,
            ledger,
            patients_attempted: patient_ids.len(),
            dry_run,
            duration: start_time.elapsed(),
        };

        report.ledger.log_report();
        tracing::info!(
            patients = report.patients_attempted,
            failures = report.ledger.len(),
            duration_secs = report.duration.as_secs(),
            "Batch export finished"
        );

        Ok(report)
    }

    async fn process_patient(&mut self, patient_id: &PatientId, ledger: &mut FailureLedger) {
        let driver = self.session.driver();

        let patient = match self.loader.load(driver, patient_id).await {
            Ok(patient) => patient,
            Err(failure) => {
                tracing::warn!(
                    patient_id = %patient_id,
                    reason = %failure.reason,
                    "Patient could not be loaded"
                );
                ledger.append(FailureRecord::patient(patient_id.clone(), failure));
                return;
            }
        };

        match patient.plans(driver).await {
            Ok(plans) => {
                let (exportable, skipped): (Vec<_>, Vec<_>) =
                    plans.iter().partition(|plan| plan.is_exportable());

                for plan in &skipped {
                    tracing::debug!(
                        patient_id = %patient_id,
                        plan = %plan.name,
                        approval = %plan.approval,
                        "Skipping unapproved plan"
                    );
                }
                if exportable.is_empty() {
                    tracing::info!(patient_id = %patient_id, "No approved plans");
                }

                for plan in exportable {
                    match self.exporter.export(driver, &patient, plan).await {
                        Ok(outcome) => tracing::info!(
                            patient_id = %patient_id,
                            plan = %plan.name,
                            outcome = %outcome,
                            "Plan done"
                        ),
                        Err(failure) => {
                            crate::log_plan_failure!(patient_id, plan.name, failure);
                            ledger.append(FailureRecord::plan(
                                patient_id.clone(),
                                plan.name.as_str(),
                                failure,
                            ));
                        }
                    }
                }
            }
            Err(failure) => {
                tracing::warn!(
                    patient_id = %patient_id,
                    reason = %failure.reason,
                    "Could not list plans"
                );
                ledger.append(FailureRecord::patient(patient_id.clone(), failure));
            }
        }

        if let Err(failure) = patient.close(driver).await {
            tracing::warn!(
                patient_id = %patient_id,
                reason = %failure.reason,
                "Patient could not be closed"
            );
            ledger.append(FailureRecord::patient(patient_id.clone(), failure));
        }
    }
}
