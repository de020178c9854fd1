//! Automation bridge driver
//!
//! `BridgeDriver` implements [`ClinicalDriver`] by calling a small HTTP agent
//! that runs next to the planning application and performs the UI
//! automation there. Each trait method maps to one request; nothing is
//! retried, so every failure surfaces to the core exactly once.

use super::models::{
    CategoryRequest, DestinationRequest, DialogResponse, ErrorResponse, ExportStateResponse,
    LoadPlanRequest, OpenExportRequest, OpenPatientRequest, PlanSummary, ReadyResponse,
    ToggleResponse, WindowRequest,
};
use crate::adapters::driver::{ClinicalDriver, DialogState};
use crate::config::BridgeConfig;
use crate::domain::{
    ContentCategory, DestinationName, DriverFault, DriverResult, PatientId, Plan, PlanvaultError,
    Result,
};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, RequestBuilder, Response};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// HTTP driver for the automation bridge
///
/// # Example
///
/// ```no_run
/// use planvault::adapters::bridge::BridgeDriver;
/// use planvault::adapters::driver::ClinicalDriver;
/// use planvault::config::BridgeConfig;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut driver = BridgeDriver::new(&BridgeConfig::default())?;
/// driver.launch().await?;
/// # Ok(())
/// # }
/// ```
pub struct BridgeDriver {
    base_url: String,
    client: Client,
    auth_header: Option<String>,
}

impl BridgeDriver {
    /// Create a new bridge driver from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &BridgeConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                PlanvaultError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        let auth_header = config
            .api_token
            .as_ref()
            .map(|token| format!("Bearer {}", token.expose_secret()));

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            auth_header,
        })
    }

    /// Base URL of the bridge agent
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_header {
            Some(auth) => request.header("Authorization", auth),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, path: &str) -> DriverResult<Response> {
        tracing::trace!(path = %path, "Bridge request");

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| DriverFault::Transport(format!("{path}: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or(body);

        if status.is_client_error() {
            Err(DriverFault::Rejected(format!("{path}: {message}")))
        } else {
            Err(DriverFault::Aborted(format!(
                "{path}: status {status}: {message}"
            )))
        }
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> DriverResult<Response> {
        let request = self.client.post(self.url(path)).json(body);
        self.send(request, path).await
    }

    async fn post_empty(&self, path: &str) -> DriverResult<()> {
        let request = self.client.post(self.url(path));
        self.send(request, path).await.map(|_| ())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> DriverResult<T> {
        let request = self.client.get(self.url(path));
        let response = self.send(request, path).await?;
        decode(response, path).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response, path: &str) -> DriverResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| DriverFault::Transport(format!("{path}: invalid response body: {e}")))
}

#[async_trait]
impl ClinicalDriver for BridgeDriver {
    async fn launch(&mut self) -> DriverResult<()> {
        self.post_empty("/session/launch").await
    }

    async fn is_ready(&mut self) -> DriverResult<bool> {
        let response: ReadyResponse = self.get_json("/session/ready").await?;
        Ok(response.ready)
    }

    async fn set_window_visible(&mut self, visible: bool) -> DriverResult<()> {
        self.post("/session/window", &WindowRequest { visible })
            .await
            .map(|_| ())
    }

    async fn terminate(&mut self) -> DriverResult<()> {
        self.post_empty("/session/terminate").await
    }

    async fn open_patient(
        &mut self,
        installation: &str,
        clinic: &str,
        patient_id: &PatientId,
    ) -> DriverResult<()> {
        let body = OpenPatientRequest {
            installation,
            clinic,
            patient_id: patient_id.as_str(),
        };
        self.post("/patient/open", &body).await.map(|_| ())
    }

    async fn close_patient(&mut self) -> DriverResult<()> {
        self.post_empty("/patient/close").await
    }

    async fn list_plans(&mut self) -> DriverResult<Vec<Plan>> {
        let plans: Vec<PlanSummary> = self.get_json("/patient/plans").await?;
        Ok(plans.into_iter().map(Plan::from).collect())
    }

    async fn load_plan(&mut self, plan_name: &str) -> DriverResult<()> {
        self.post("/plan/load", &LoadPlanRequest { name: plan_name })
            .await
            .map(|_| ())
    }

    async fn open_export(&mut self, confirm_offset: bool) -> DriverResult<()> {
        self.post("/export/open", &OpenExportRequest { confirm_offset })
            .await
            .map(|_| ())
    }

    async fn set_category(
        &mut self,
        category: ContentCategory,
        enabled: bool,
    ) -> DriverResult<bool> {
        let path = "/export/category";
        let response = self
            .post(path, &CategoryRequest { category, enabled })
            .await?;
        let toggle: ToggleResponse = decode(response, path).await?;
        Ok(toggle.applied)
    }

    async fn set_destination(
        &mut self,
        destination: &DestinationName,
        active: bool,
    ) -> DriverResult<bool> {
        let path = "/export/destination";
        let body = DestinationRequest {
            name: destination.as_str(),
            active,
        };
        let response = self.post(path, &body).await?;
        let toggle: ToggleResponse = decode(response, path).await?;
        Ok(toggle.applied)
    }

    async fn submit_export(&mut self) -> DriverResult<()> {
        self.post_empty("/export/submit").await
    }

    async fn cancel_export(&mut self) -> DriverResult<()> {
        self.post_empty("/export/cancel").await
    }

    async fn export_open(&mut self) -> DriverResult<bool> {
        let response: ExportStateResponse = self.get_json("/export/state").await?;
        Ok(response.open)
    }

    async fn dialog(&mut self) -> DriverResult<DialogState> {
        let response: DialogResponse = self.get_json("/dialog").await?;
        Ok(if response.visible {
            DialogState::open(response.message.unwrap_or_default())
        } else {
            DialogState::Clear
        })
    }

    async fn dismiss_dialog(&mut self) -> DriverResult<()> {
        self.post_empty("/dialog/dismiss").await
    }
}
