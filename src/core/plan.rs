//! Per-plan export workflow
//!
//! Each plan goes through four steps in order:
//!
//! 1. **LoadPlan** - make the plan active
//! 2. **OpenExportSurface** - open the export dialog, confirming the offset prompt
//! 3. **Configure** - apply every toggle of the [`ExportRequest`]
//! 4. **Submit** - run the export
//!
//! The first failing step ends the plan. Configure applies every toggle even
//! after one fails, so the failure reason lists all of them; the dialog is
//! then cancelled and Submit is never reached. A failed Submit cancels the
//! dialog explicitly because the application leaves it open on that path.

use crate::adapters::driver::ClinicalDriver;
use crate::core::boundary::{guard, resolve};
use crate::core::ledger::{FailureKind, StepFailure};
use crate::core::patient::LoadedPatient;
use crate::domain::{ExportRequest, Plan, Toggle};
use std::fmt;

/// How a plan that did not fail ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOutcome {
    /// Export submitted
    Exported,
    /// Export configured and cancelled without submitting
    DryRun,
}

impl fmt::Display for PlanOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanOutcome::Exported => write!(f, "exported"),
            PlanOutcome::DryRun => write!(f, "dry run"),
        }
    }
}

/// Exports single plans of a loaded patient
#[derive(Debug, Clone)]
pub struct PlanExporter {
    request: ExportRequest,
    confirm_offset: bool,
    dry_run: bool,
}

impl PlanExporter {
    /// Create an exporter applying `request` to every plan
    pub fn new(request: ExportRequest, confirm_offset: bool, dry_run: bool) -> Self {
        Self {
            request,
            confirm_offset,
            dry_run,
        }
    }

    /// Whether plans are configured but never submitted
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// The export configuration applied to each plan
    pub fn request(&self) -> &ExportRequest {
        &self.request
    }

    /// Run the export workflow for one plan
    pub async fn export(
        &self,
        driver: &mut dyn ClinicalDriver,
        patient: &LoadedPatient,
        plan: &Plan,
    ) -> Result<PlanOutcome, StepFailure> {
        tracing::debug!(
            patient_id = %patient.id(),
            plan = %plan.name,
            destination = %self.request.target(),
            "Exporting plan"
        );

        let outcome = guard("load_plan", driver.load_plan(&plan.name)).await;
        resolve(driver, outcome)
            .await
            .map_err(|fault| StepFailure::from_fault(FailureKind::PlanLoad, &fault))?;

        let outcome = guard("open_export", driver.open_export(self.confirm_offset)).await;
        resolve(driver, outcome)
            .await
            .map_err(|fault| StepFailure::from_fault(FailureKind::ExportSurface, &fault))?;

        if let Err(failure) = self.configure(driver).await {
            cancel_surface(driver).await;
            return Err(failure);
        }

        if self.dry_run {
            cancel_surface(driver).await;
            tracing::info!(
                patient_id = %patient.id(),
                plan = %plan.name,
                "Dry run: export configured and cancelled"
            );
            return Ok(PlanOutcome::DryRun);
        }

        self.submit(driver).await?;
        Ok(PlanOutcome::Exported)
    }

    async fn configure(&self, driver: &mut dyn ClinicalDriver) -> Result<(), StepFailure> {
        let mut failures: Vec<String> = Vec::new();

        for toggle in self.request.toggles() {
            let outcome = match &toggle {
                Toggle::Category { category, enabled } => {
                    guard("set_category", driver.set_category(*category, *enabled)).await
                }
                Toggle::Destination {
                    destination,
                    active,
                } => guard("set_destination", driver.set_destination(destination, *active)).await,
            };

            match resolve(driver, outcome).await {
                Ok(true) => tracing::trace!(toggle = %toggle, "Applied"),
                Ok(false) => failures.push(format!("{toggle} not applied")),
                Err(fault) => failures.push(format!("{toggle} failed ({fault})")),
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(StepFailure::new(FailureKind::Configure, failures.join("; ")))
        }
    }

    async fn submit(&self, driver: &mut dyn ClinicalDriver) -> Result<(), StepFailure> {
        let outcome = guard("submit_export", driver.submit_export()).await;

        if let Err(fault) = resolve(driver, outcome).await {
            cancel_surface(driver).await;
            return Err(StepFailure::from_fault(FailureKind::Submit, &fault));
        }

        // A successful export closes the dialog on its own
        match guard("export_open", driver.export_open()).await {
            Ok(false) => {}
            Ok(true) => {
                tracing::warn!("Export dialog still open after a successful export; cancelling");
                cancel_surface(driver).await;
            }
            Err(fault) => {
                tracing::debug!(error = %fault, "Could not query export dialog after export")
            }
        }

        Ok(())
    }
}

async fn cancel_surface(driver: &mut dyn ClinicalDriver) {
    let outcome = guard("cancel_export", driver.cancel_export()).await;
    if let Err(fault) = resolve(driver, outcome).await {
        tracing::warn!(error = %fault, "Failed to cancel export dialog");
    }
}
