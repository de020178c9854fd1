//! Scripted planning application used by the integration tests
//!
//! Patients, their plans and the failures to inject are declared up front.
//! Every call is appended to a shared journal the test inspects after the run.

#![allow(dead_code)]

use async_trait::async_trait;
use planvault::adapters::driver::{ClinicalDriver, DialogState};
use planvault::config::PlanvaultConfig;
use planvault::domain::{
    ApprovalState, ContentCategory, DestinationName, DriverFault, DriverResult, PatientId, Plan,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A call the orchestrator made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Launch,
    Ready,
    Window(bool),
    Terminate,
    OpenPatient(String),
    ClosePatient(String),
    ListPlans(String),
    LoadPlan(String, String),
    OpenExport(String, String),
    SetCategory(ContentCategory, bool),
    SetDestination(String, bool),
    Submit(String, String),
    Cancel(String, String),
    ExportOpen,
    DismissDialog,
}

/// Step of the workflow a failure is injected into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    OpenPatient,
    ListPlans,
    ClosePatient,
    LoadPlan,
    OpenExport,
    Submit,
}

/// How an injected failure shows up
#[derive(Debug, Clone)]
pub enum Failure {
    /// The call returns an error
    Fault(DriverFault),
    /// The driver panics mid-call
    Abort,
    /// The call succeeds but leaves a confirmation dialog open
    Dialog(String),
    /// The call panics and leaves a confirmation dialog open
    AbortWithDialog(String),
    /// The call succeeds but the next dialog query errors
    DialogUnreadable,
}

type FailureKey = (String, Option<String>, Step);

/// Shared view of the calls made against a [`ScriptedDriver`]
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Event>>>);

impl Journal {
    fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    /// Patient ids in the order they were opened
    pub fn opened(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::OpenPatient(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn closes_of(&self, patient: &str) -> usize {
        self.count(|e| matches!(e, Event::ClosePatient(id) if id == patient))
    }

    pub fn submits_of(&self, patient: &str, plan: &str) -> usize {
        self.count(|e| matches!(e, Event::Submit(p, n) if p == patient && n == plan))
    }

    pub fn cancels_of(&self, patient: &str, plan: &str) -> usize {
        self.count(|e| matches!(e, Event::Cancel(p, n) if p == patient && n == plan))
    }

    pub fn plan_loads_of(&self, patient: &str) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::LoadPlan(p, n) if p == patient => Some(n),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&Event) -> bool) -> usize {
        self.events().iter().filter(|&e| predicate(e)).count()
    }
}

/// In-memory planning application
pub struct ScriptedDriver {
    journal: Journal,
    patients: HashMap<String, Vec<Plan>>,
    failures: HashMap<FailureKey, Failure>,
    not_applied: Vec<String>,
    launch_fault: Option<DriverFault>,
    surface_stays_open: bool,
    current_patient: Option<String>,
    current_plan: Option<String>,
    surface_open: bool,
    dialog: Option<String>,
    dialog_query_fails: bool,
}

impl ScriptedDriver {
    pub fn new() -> Self {
        Self {
            journal: Journal::default(),
            patients: HashMap::new(),
            failures: HashMap::new(),
            not_applied: Vec::new(),
            launch_fault: None,
            surface_stays_open: false,
            current_patient: None,
            current_plan: None,
            surface_open: false,
            dialog: None,
            dialog_query_fails: false,
        }
    }

    /// Declare a patient and its plans
    pub fn patient(mut self, id: &str, plans: &[(&str, ApprovalState)]) -> Self {
        let plans = plans
            .iter()
            .map(|(name, approval)| Plan::new(*name, approval.clone()))
            .collect();
        self.patients.insert(id.to_string(), plans);
        self
    }

    /// Inject a failure into a patient-level step
    pub fn fail_patient(mut self, id: &str, step: Step, failure: Failure) -> Self {
        self.failures.insert((id.to_string(), None, step), failure);
        self
    }

    /// Inject a failure into a plan-level step
    pub fn fail_plan(mut self, id: &str, plan: &str, step: Step, failure: Failure) -> Self {
        self.failures
            .insert((id.to_string(), Some(plan.to_string()), step), failure);
        self
    }

    /// Make toggles for this category or destination name report "not applied"
    pub fn not_applied(mut self, name: &str) -> Self {
        self.not_applied.push(name.to_string());
        self
    }

    pub fn fail_launch(mut self, fault: DriverFault) -> Self {
        self.launch_fault = Some(fault);
        self
    }

    /// Leave the export dialog open after a successful submit
    pub fn surface_stays_open(mut self) -> Self {
        self.surface_stays_open = true;
        self
    }

    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }

    fn patient_key(&self) -> String {
        self.current_patient.clone().unwrap_or_default()
    }

    fn plan_key(&self) -> String {
        self.current_plan.clone().unwrap_or_default()
    }

    fn inject(&mut self, key: FailureKey) -> DriverResult<()> {
        match self.failures.get(&key).cloned() {
            None => Ok(()),
            Some(Failure::Fault(fault)) => Err(fault),
            Some(Failure::Dialog(message)) => {
                self.dialog = Some(message);
                Ok(())
            }
            Some(Failure::DialogUnreadable) => {
                self.dialog_query_fails = true;
                Ok(())
            }
            Some(Failure::Abort) => panic!("automation surface aborted during {:?}", key.2),
            Some(Failure::AbortWithDialog(message)) => {
                self.dialog = Some(message);
                panic!("automation surface aborted during {:?}", key.2)
            }
        }
    }
}

impl Default for ScriptedDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClinicalDriver for ScriptedDriver {
    async fn launch(&mut self) -> DriverResult<()> {
        self.journal.push(Event::Launch);
        match &self.launch_fault {
            Some(fault) => Err(fault.clone()),
            None => Ok(()),
        }
    }

    async fn is_ready(&mut self) -> DriverResult<bool> {
        self.journal.push(Event::Ready);
        Ok(true)
    }

    async fn set_window_visible(&mut self, visible: bool) -> DriverResult<()> {
        self.journal.push(Event::Window(visible));
        Ok(())
    }

    async fn terminate(&mut self) -> DriverResult<()> {
        self.journal.push(Event::Terminate);
        Ok(())
    }

    async fn open_patient(
        &mut self,
        _installation: &str,
        _clinic: &str,
        patient_id: &PatientId,
    ) -> DriverResult<()> {
        let id = patient_id.to_string();
        self.journal.push(Event::OpenPatient(id.clone()));
        self.inject((id.clone(), None, Step::OpenPatient))?;
        if !self.patients.contains_key(&id) {
            return Err(DriverFault::Rejected(format!("patient {id} not found")));
        }
        self.current_patient = Some(id);
        Ok(())
    }

    async fn close_patient(&mut self) -> DriverResult<()> {
        let id = self.patient_key();
        self.journal.push(Event::ClosePatient(id.clone()));
        self.inject((id, None, Step::ClosePatient))?;
        self.current_patient = None;
        self.current_plan = None;
        Ok(())
    }

    async fn list_plans(&mut self) -> DriverResult<Vec<Plan>> {
        let id = self.patient_key();
        self.journal.push(Event::ListPlans(id.clone()));
        self.inject((id.clone(), None, Step::ListPlans))?;
        Ok(self.patients.get(&id).cloned().unwrap_or_default())
    }

    async fn load_plan(&mut self, plan_name: &str) -> DriverResult<()> {
        let id = self.patient_key();
        self.journal
            .push(Event::LoadPlan(id.clone(), plan_name.to_string()));
        self.inject((id, Some(plan_name.to_string()), Step::LoadPlan))?;
        self.current_plan = Some(plan_name.to_string());
        Ok(())
    }

    async fn open_export(&mut self, _confirm_offset: bool) -> DriverResult<()> {
        let (id, plan) = (self.patient_key(), self.plan_key());
        self.journal.push(Event::OpenExport(id.clone(), plan.clone()));
        self.inject((id, Some(plan), Step::OpenExport))?;
        self.surface_open = true;
        Ok(())
    }

    async fn set_category(
        &mut self,
        category: ContentCategory,
        enabled: bool,
    ) -> DriverResult<bool> {
        self.journal.push(Event::SetCategory(category, enabled));
        Ok(!self.not_applied.iter().any(|n| n == category.as_str()))
    }

    async fn set_destination(
        &mut self,
        destination: &DestinationName,
        active: bool,
    ) -> DriverResult<bool> {
        self.journal
            .push(Event::SetDestination(destination.to_string(), active));
        Ok(!self.not_applied.iter().any(|n| n == destination.as_str()))
    }

    async fn submit_export(&mut self) -> DriverResult<()> {
        let (id, plan) = (self.patient_key(), self.plan_key());
        self.journal.push(Event::Submit(id.clone(), plan.clone()));
        self.inject((id, Some(plan), Step::Submit))?;
        if !self.surface_stays_open {
            self.surface_open = false;
        }
        Ok(())
    }

    async fn cancel_export(&mut self) -> DriverResult<()> {
        let (id, plan) = (self.patient_key(), self.plan_key());
        self.journal.push(Event::Cancel(id, plan));
        self.surface_open = false;
        Ok(())
    }

    async fn export_open(&mut self) -> DriverResult<bool> {
        self.journal.push(Event::ExportOpen);
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
        self.journal.push(Event::DismissDialog);
        self.dialog = None;
        Ok(())
    }
}

/// Complete configuration for orchestrator tests
pub fn test_config() -> PlanvaultConfig {
    toml::from_str(
        r#"
[batch]
installation = "Main"
clinic = "Radiation Oncology"
input_path = "patients.csv"
target_destination = "Archive"

[export]
known_destinations = ["PACS", "Archive", "Research"]

[logging]
local_enabled = false
"#,
    )
    .unwrap()
}

pub fn ids(raw: &[&str]) -> Vec<PatientId> {
    raw.iter().map(|id| PatientId::new(*id).unwrap()).collect()
}

pub fn approved(name: &str) -> (&str, ApprovalState) {
    (name, ApprovalState::Approved)
}

pub fn unapproved(name: &str) -> (&str, ApprovalState) {
    (name, ApprovalState::Unapproved)
}
