//! Driver call boundary
//!
//! Every call into the planning application goes through this module. It
//! makes two things explicit that the automation surface leaves implicit:
//!
//! - An abrupt abort (a panic inside the driver) is caught at the call and
//!   becomes [`DriverFault::Aborted`], the same shape as a structured failure.
//! - The confirmation dialog is checked after the call and reported next to
//!   the outcome in [`Checked`]. The caller settles it before moving on, so
//!   no dialog survives into the next unit of work.

use crate::adapters::driver::{ClinicalDriver, DialogState};
use crate::domain::{DriverFault, DriverResult};
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

/// Await a driver call, converting a panic into [`DriverFault::Aborted`]
pub async fn guard<T, F>(operation: &str, call: F) -> DriverResult<T>
where
    F: Future<Output = DriverResult<T>>,
{
    match AssertUnwindSafe(call).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(operation = %operation, reason = %message, "Driver aborted");
            Err(DriverFault::Aborted(format!("{operation}: {message}")))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected abort".to_string()
    }
}

/// Outcome of a driver call together with the dialog state observed after it
#[must_use = "a dialog may still be open; call `settle`"]
#[derive(Debug)]
pub struct Checked<T> {
    /// What the call returned
    pub outcome: DriverResult<T>,
    /// Dialog state right after the call
    pub dialog: DialogState,
    /// Set when the dialog state could not be read
    pub dialog_unreadable: Option<DriverFault>,
}

impl<T> Checked<T> {
    /// Dismiss any open dialog and return the call's result
    ///
    /// A dialog left open by an otherwise successful call is a failure of
    /// that call. When the dialog state could not be read a dismiss is still
    /// issued, but the call's own outcome stands.
    pub async fn settle(self, driver: &mut dyn ClinicalDriver) -> DriverResult<T> {
        let Checked {
            outcome,
            dialog,
            dialog_unreadable,
        } = self;

        if let Some(fault) = dialog_unreadable {
            tracing::warn!(error = %fault, "Dialog state unavailable; dismissing without checking");
            dismiss(driver).await;
            return outcome;
        }

        let message = match dialog {
            DialogState::Clear => return outcome,
            DialogState::Open { message } => message,
        };
        tracing::debug!(dialog = %message, "Dismissing confirmation dialog");
        dismiss(driver).await;
        match outcome {
            Err(fault) => Err(fault),
            Ok(_) => Err(DriverFault::Rejected(format!(
                "confirmation dialog: {message}"
            ))),
        }
    }
}

/// Attach the current dialog state to a call outcome
///
/// A dialog state that cannot be read is kept apart from an open dialog:
/// the caller still dismisses, but a successful call is not failed for it.
pub async fn observe<T>(driver: &mut dyn ClinicalDriver, outcome: DriverResult<T>) -> Checked<T> {
    match guard("dialog", driver.dialog()).await {
        Ok(dialog) => Checked {
            outcome,
            dialog,
            dialog_unreadable: None,
        },
        Err(fault) => Checked {
            outcome,
            dialog: DialogState::Clear,
            dialog_unreadable: Some(fault),
        },
    }
}

/// Observe and settle in one step
pub async fn resolve<T>(driver: &mut dyn ClinicalDriver, outcome: DriverResult<T>) -> DriverResult<T> {
    observe(driver, outcome).await.settle(driver).await
}

/// Dismiss the confirmation dialog, logging if that fails
pub async fn dismiss(driver: &mut dyn ClinicalDriver) {
    if let Err(fault) = guard("dismiss_dialog", driver.dismiss_dialog()).await {
        tracing::warn!(error = %fault, "Failed to dismiss confirmation dialog");
    }
}
