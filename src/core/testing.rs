//! In-memory driver for unit tests of the core workflow

use crate::adapters::driver::{ClinicalDriver, DialogState};
use crate::domain::{ContentCategory, DestinationName, DriverFault, DriverResult, PatientId, Plan};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Driver whose behavior is set per operation name
#[derive(Default)]
pub(crate) struct FakeDriver {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub faults: HashMap<&'static str, DriverFault>,
    pub panics: Vec<&'static str>,
    pub dialog_after: Vec<&'static str>,
    pub dialog_unreadable_after: Vec<&'static str>,
    pub not_applied: Vec<String>,
    pub not_ready: bool,
    pub surface_stays_open: bool,
    pub plans: Vec<Plan>,
    dialog: Option<String>,
    dialog_query_fails: bool,
    surface_open: bool,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(mut self, operation: &'static str, fault: DriverFault) -> Self {
        self.faults.insert(operation, fault);
        self
    }

    pub fn panic_on(mut self, operation: &'static str) -> Self {
        self.panics.push(operation);
        self
    }

    pub fn dialog_after(mut self, operation: &'static str) -> Self {
        self.dialog_after.push(operation);
        self
    }

    pub fn dialog_unreadable_after(mut self, operation: &'static str) -> Self {
        self.dialog_unreadable_after.push(operation);
        self
    }

    pub fn with_plans(mut self, plans: Vec<Plan>) -> Self {
        self.plans = plans;
        self
    }

    pub fn journal(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, operation: &str) -> usize {
        self.journal().iter().filter(|c| c.as_str() == operation).count()
    }

    fn step(&mut self, operation: &'static str) -> DriverResult<()> {
        self.calls.lock().unwrap().push(operation.to_string());
        if self.dialog_after.contains(&operation) {
            self.dialog = Some(format!("{operation} needs attention"));
        }
        if self.dialog_unreadable_after.contains(&operation) {
            self.dialog_query_fails = true;
        }
        if self.panics.contains(&operation) {
            panic!("{operation} aborted");
        }
        match self.faults.get(operation) {
            Some(fault) => Err(fault.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ClinicalDriver for FakeDriver {
    async fn launch(&mut self) -> DriverResult<()> {
        self.step("launch")
    }

    async fn is_ready(&mut self) -> DriverResult<bool> {
        self.step("is_ready")?;
        Ok(!self.not_ready)
    }

    async fn set_window_visible(&mut self, _visible: bool) -> DriverResult<()> {
        self.step("set_window_visible")
    }

    async fn terminate(&mut self) -> DriverResult<()> {
        self.step("terminate")
    }

    async fn open_patient(
        &mut self,
        _installation: &str,
        _clinic: &str,
        _patient_id: &PatientId,
    ) -> DriverResult<()> {
        self.step("open_patient")
    }

    async fn close_patient(&mut self) -> DriverResult<()> {
        self.step("close_patient")
    }

    async fn list_plans(&mut self) -> DriverResult<Vec<Plan>> {
        self.step("list_plans")?;
        Ok(self.plans.clone())
    }

    async fn load_plan(&mut self, _plan_name: &str) -> DriverResult<()> {
        self.step("load_plan")
    }

    async fn open_export(&mut self, _confirm_offset: bool) -> DriverResult<()> {
        self.step("open_export")?;
        self.surface_open = true;
        Ok(())
    }

    async fn set_category(
        &mut self,
        category: ContentCategory,
        _enabled: bool,
    ) -> DriverResult<bool> {
        self.step("set_category")?;
        Ok(!self.not_applied.iter().any(|n| n == category.as_str()))
    }

    async fn set_destination(
        &mut self,
        destination: &DestinationName,
        _active: bool,
    ) -> DriverResult<bool> {
        self.step("set_destination")?;
        Ok(!self.not_applied.iter().any(|n| n == destination.as_str()))
    }

    async fn submit_export(&mut self) -> DriverResult<()> {
        self.step("submit_export")?;
        if !self.surface_stays_open {
            self.surface_open = false;
        }
        Ok(())
    }

    async fn cancel_export(&mut self) -> DriverResult<()> {
        self.step("cancel_export")?;
        self.surface_open = false;
        Ok(())
    }

    async fn export_open(&mut self) -> DriverResult<bool> {
        self.step("export_open")?;
        Ok(self.surface_open)
    }

    async fn dialog(&mut self) -> DriverResult<DialogState> {
        if std::mem::take(&mut self.dialog_query_fails) {
            return Err(DriverFault::Transport("dialog query timed out".to_string()));
        }
        Ok(match &self.dialog {
            Some(message) => DialogState::open(message.clone()),
            None => DialogState::Clear,
        })
    }

    async fn dismiss_dialog(&mut self) -> DriverResult<()> {
        self.step("dismiss_dialog")?;
        self.dialog = None;
        Ok(())
    }
}
