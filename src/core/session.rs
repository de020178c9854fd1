//! Application session lifecycle
//!
//! The session owns the one live connection to the planning application for
//! the whole run. Nothing else holds the driver; other components borrow it
//! through [`ApplicationSession::driver`] for the duration of a single step.

use crate::adapters::driver::ClinicalDriver;
use crate::core::boundary::guard;
use crate::domain::{PlanvaultError, Result};
use std::time::Duration;

/// Upper bound for the cosmetic window change after launch
const WINDOW_TIMEOUT: Duration = Duration::from_secs(5);

/// Lifecycle state of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Not launched yet
    Idle,
    /// Launched and ready for patient work
    Ready,
    /// Terminated; the driver must not be used again
    Terminated,
}

/// Exclusive owner of the planning application connection
pub struct ApplicationSession {
    driver: Box<dyn ClinicalDriver>,
    show_window: bool,
    state: SessionState,
}

impl ApplicationSession {
    /// Wrap a driver; nothing is started until [`launch`](Self::launch)
    pub fn new(driver: Box<dyn ClinicalDriver>, show_window: bool) -> Self {
        Self {
            driver,
            show_window,
            state: SessionState::Idle,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Start the application and wait until it accepts patient work
    ///
    /// Any failure here is fatal for the run and is returned as
    /// [`PlanvaultError::Session`]. The window presentation step that follows
    /// is best-effort and bounded.
    pub async fn launch(&mut self) -> Result<()> {
        match self.state {
            SessionState::Ready => return Ok(()),
            SessionState::Terminated => {
                return Err(PlanvaultError::Session(
                    "Session has already been terminated".to_string(),
                ))
            }
            SessionState::Idle => {}
        }

        tracing::info!("Launching planning application");

        guard("launch", self.driver.launch()).await.map_err(|fault| {
            PlanvaultError::Session(format!("Failed to launch planning application: {fault}"))
        })?;

        let ready = guard("is_ready", self.driver.is_ready())
            .await
            .map_err(|fault| {
                PlanvaultError::Session(format!("Failed to query application readiness: {fault}"))
            })?;

        if !ready {
            return Err(PlanvaultError::Session(
                "Planning application is not ready for patient work".to_string(),
            ));
        }

        self.present_window().await;
        self.state = SessionState::Ready;

        tracing::info!("Planning application ready");
        Ok(())
    }

    async fn present_window(&mut self) {
        let visible = self.show_window;
        let change = guard("set_window_visible", self.driver.set_window_visible(visible));

        match tokio::time::timeout(WINDOW_TIMEOUT, change).await {
            Ok(Ok(())) => tracing::debug!(visible, "Window visibility set"),
            Ok(Err(fault)) => {
                tracing::debug!(visible, error = %fault, "Ignoring window visibility failure")
            }
            Err(_) => tracing::debug!(visible, "Window visibility change timed out"),
        }
    }

    /// Shut the application down
    ///
    /// Never fails; a driver error is logged. Calling it again is a no-op.
    pub async fn terminate(&mut self) {
        if self.state == SessionState::Terminated {
            return;
        }

        match guard("terminate", self.driver.terminate()).await {
            Ok(()) => tracing::info!("Planning application terminated"),
            Err(fault) => {
                tracing::warn!(error = %fault, "Failed to terminate planning application")
            }
        }

        self.state = SessionState::Terminated;
    }

    /// Borrow the driver for one step of patient or plan work
    pub fn driver(&mut self) -> &mut dyn ClinicalDriver {
        self.driver.as_mut()
    }
}
