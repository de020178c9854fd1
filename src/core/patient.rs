//! Patient loading
//!
//! [`PatientLoader`] makes one attempt per patient. Structured refusals,
//! aborts and confirmation dialogs all end up as a single
//! [`FailureKind::PatientLoad`] failure, with the dialog already dismissed.

use crate::adapters::driver::ClinicalDriver;
use crate::core::boundary::{guard, resolve};
use crate::core::ledger::{FailureKind, StepFailure};
use crate::domain::{PatientId, Plan};

/// Selects and loads patients in the planning application
#[derive(Debug, Clone)]
pub struct PatientLoader {
    installation: String,
    clinic: String,
}

impl PatientLoader {
    /// Create a loader for one installation and clinic
    pub fn new(installation: impl Into<String>, clinic: impl Into<String>) -> Self {
        Self {
            installation: installation.into(),
            clinic: clinic.into(),
        }
    }

    /// Load a patient; never retries
    pub async fn load(
        &self,
        driver: &mut dyn ClinicalDriver,
        patient_id: &PatientId,
    ) -> Result<LoadedPatient, StepFailure> {
        let outcome = guard(
            "open_patient",
            driver.open_patient(&self.installation, &self.clinic, patient_id),
        )
        .await;

        resolve(driver, outcome)
            .await
            .map(|()| LoadedPatient {
                id: patient_id.clone(),
            })
            .map_err(|fault| StepFailure::from_fault(FailureKind::PatientLoad, &fault))
    }
}

/// A patient that is open in the planning application
///
/// Consumed by [`close`](LoadedPatient::close), so a patient cannot be closed
/// twice.
#[must_use = "a loaded patient must be closed"]
#[derive(Debug)]
pub struct LoadedPatient {
    id: PatientId,
}

impl LoadedPatient {
    /// Identifier of the loaded patient
    pub fn id(&self) -> &PatientId {
        &self.id
    }

    /// Enumerate the patient's plans
    pub async fn plans(&self, driver: &mut dyn ClinicalDriver) -> Result<Vec<Plan>, StepFailure> {
        let outcome = guard("list_plans", driver.list_plans()).await;
        resolve(driver, outcome)
            .await
            .map_err(|fault| StepFailure::from_fault(FailureKind::PlanListing, &fault))
    }

    /// Close the patient
    pub async fn close(self, driver: &mut dyn ClinicalDriver) -> Result<(), StepFailure> {
        let outcome = guard("close_patient", driver.close_patient()).await;
        resolve(driver, outcome)
            .await
            .map_err(|fault| StepFailure::from_fault(FailureKind::PatientClose, &fault))
    }
}
