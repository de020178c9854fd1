//! Clinical application driver trait
//!
//! This module defines the `ClinicalDriver` trait: the automation surface of
//! the treatment planning application as the batch sees it. Implementations
//! translate each call into whatever the application understands (UI
//! automation, a scripting bridge, a simulator in tests).
//!
//! Every method takes `&mut self`: the application is a single exclusive
//! resource and is only ever driven by one caller at a time.

use crate::domain::{ContentCategory, DestinationName, DriverResult, PatientId, Plan};
use async_trait::async_trait;

/// Visibility of the application's blocking confirmation dialog
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogState {
    /// No dialog is blocking the application
    #[default]
    Clear,
    /// A dialog is open and must be dismissed before the next operation
    Open {
        /// Text shown in the dialog, if the driver can read it
        message: String,
    },
}

impl DialogState {
    /// Build an open dialog state
    pub fn open(message: impl Into<String>) -> Self {
        DialogState::Open {
            message: message.into(),
        }
    }
}

/// Trait for planning application drivers
///
/// A method returning `Err` is a failure of that one call. A driver may also
/// panic when the underlying automation surface aborts; callers in
/// [`crate::core::boundary`] turn that into [`crate::domain::DriverFault::Aborted`].
///
/// # Example
///
/// ```no_run
/// use planvault::adapters::driver::ClinicalDriver;
/// use planvault::domain::PatientId;
///
/// # async fn example(driver: &mut dyn ClinicalDriver) -> planvault::domain::DriverResult<()> {
/// driver.launch().await?;
/// let patient_id = PatientId::new("RT-1001").unwrap();
/// driver.open_patient("Main", "Clinic A", &patient_id).await?;
/// for plan in driver.list_plans().await? {
///     println!("{} ({})", plan.name, plan.approval);
/// }
/// driver.close_patient().await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ClinicalDriver: Send {
    /// Start (or attach to) the planning application
    async fn launch(&mut self) -> DriverResult<()>;

    /// Whether the application is ready to accept patient work
    async fn is_ready(&mut self) -> DriverResult<bool>;

    /// Show or hide the application's main window
    ///
    /// Purely cosmetic; failures are ignored by the session.
    async fn set_window_visible(&mut self, visible: bool) -> DriverResult<()>;

    /// Shut the application down
    async fn terminate(&mut self) -> DriverResult<()>;

    /// Select and load a patient
    async fn open_patient(
        &mut self,
        installation: &str,
        clinic: &str,
        patient_id: &PatientId,
    ) -> DriverResult<()>;

    /// Close the currently loaded patient
    async fn close_patient(&mut self) -> DriverResult<()>;

    /// Enumerate the plans of the currently loaded patient
    async fn list_plans(&mut self) -> DriverResult<Vec<Plan>>;

    /// Make a plan of the loaded patient the active plan
    async fn load_plan(&mut self, plan_name: &str) -> DriverResult<()>;

    /// Open the export dialog for the active plan
    ///
    /// When `confirm_offset` is set, the "plan offset" prompt the application
    /// raises is answered with continue.
    async fn open_export(&mut self, confirm_offset: bool) -> DriverResult<()>;

    /// Select or deselect a content category; `Ok(false)` when the dialog
    /// did not take the change
    async fn set_category(&mut self, category: ContentCategory, enabled: bool)
        -> DriverResult<bool>;

    /// Activate or deactivate a destination; `Ok(false)` when the dialog
    /// did not take the change
    async fn set_destination(
        &mut self,
        destination: &DestinationName,
        active: bool,
    ) -> DriverResult<bool>;

    /// Run the export configured in the open dialog
    async fn submit_export(&mut self) -> DriverResult<()>;

    /// Close the export dialog without exporting
    async fn cancel_export(&mut self) -> DriverResult<()>;

    /// Whether the export dialog is currently open
    async fn export_open(&mut self) -> DriverResult<bool>;

    /// Current state of the confirmation dialog
    async fn dialog(&mut self) -> DriverResult<DialogState>;

    /// Dismiss the confirmation dialog with cancel
    async fn dismiss_dialog(&mut self) -> DriverResult<()>;
}
