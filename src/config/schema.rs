//! Configuration schema types
//!
//! This module defines the configuration structure for Planvault.

use crate::config::SecretString;
use crate::domain::ContentCategory;
use serde::{Deserialize, Serialize};

/// Main Planvault configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanvaultConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// The settings every batch run requires
    #[serde(default)]
    pub batch: BatchConfig,

    /// Patient list parsing
    #[serde(default)]
    pub input: InputConfig,

    /// Export dialog settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Automation bridge connection
    #[serde(default)]
    pub bridge: BridgeConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PlanvaultConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.batch.validate()?;
        self.application.validate()?;
        self.input.validate()?;
        self.export.validate()?;
        self.export
            .validate_destinations(&self.batch.target_destination)?;
        self.bridge.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (configure each export, then cancel instead of submitting)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Required batch settings
///
/// All four values must be present before a session is launched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Planning application installation to log into
    #[serde(default)]
    pub installation: String,

    /// Clinic (department) the patients belong to
    #[serde(default)]
    pub clinic: String,

    /// Path of the delimited patient list
    #[serde(default)]
    pub input_path: String,

    /// Name of the export destination to activate
    #[serde(default)]
    pub target_destination: String,
}

impl BatchConfig {
    /// Validates that every required setting is non-empty
    ///
    /// All missing settings are reported in one message.
    pub fn validate(&self) -> Result<(), String> {
        let missing: Vec<&str> = [
            ("batch.installation", &self.installation),
            ("batch.clinic", &self.clinic),
            ("batch.input_path", &self.input_path),
            ("batch.target_destination", &self.target_destination),
        ]
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

        if !missing.is_empty() {
            return Err(format!(
                "Missing required settings: {}",
                missing.join(", ")
            ));
        }
        Ok(())
    }
}

/// Patient list parsing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Column delimiter (a single character)
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Skip the first line of the file
    #[serde(default)]
    pub has_header: bool,
}

impl InputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.delimiter.chars().count() != 1 {
            return Err(format!(
                "input.delimiter must be a single character, got '{}'",
                self.delimiter
            ));
        }
        Ok(())
    }

    /// Delimiter as a character, `,` if unset
    pub fn delimiter_char(&self) -> char {
        self.delimiter.chars().next().unwrap_or(',')
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            has_header: false,
        }
    }
}

/// Export dialog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Content categories to select
    #[serde(default = "ContentCategory::defaults")]
    pub categories: Vec<ContentCategory>,

    /// Every destination the export dialog offers; all except the target
    /// are switched off before submission
    #[serde(default)]
    pub known_destinations: Vec<String>,

    /// Answer the plan offset prompt with continue when opening the dialog
    #[serde(default = "default_true")]
    pub confirm_offset: bool,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.categories.is_empty() {
            return Err("export.categories cannot be empty".to_string());
        }

        if self
            .known_destinations
            .iter()
            .any(|name| name.trim().is_empty())
        {
            return Err("export.known_destinations cannot contain empty names".to_string());
        }

        Ok(())
    }

    /// Validates that the destination list covers `target`
    ///
    /// Every destination except the target is switched off before an export
    /// is submitted, so an empty list would leave the dialog's current
    /// selection untouched.
    pub fn validate_destinations(&self, target: &str) -> Result<(), String> {
        if self.known_destinations.is_empty() {
            return Err(
                "export.known_destinations must list every destination the export dialog offers"
                    .to_string(),
            );
        }

        if !self
            .known_destinations
            .iter()
            .any(|name| name.trim() == target.trim())
        {
            return Err(format!(
                "export.known_destinations does not include the target destination '{}'",
                target.trim()
            ));
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            categories: ContentCategory::defaults(),
            known_destinations: Vec::new(),
            confirm_offset: true,
        }
    }
}

/// Automation bridge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Base URL of the bridge agent
    #[serde(default = "default_bridge_url")]
    pub base_url: String,

    /// Bearer token for the bridge (optional)
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub api_token: Option<SecretString>,

    /// Request timeout in seconds
    ///
    /// Exports of large image series can take minutes; there is no other
    /// timeout on a run.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Keep the application window visible while the batch runs
    #[serde(default)]
    pub show_window: bool,
}

impl BridgeConfig {
    fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("bridge.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("bridge.base_url must start with http:// or https://".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("bridge.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_url: default_bridge_url(),
            api_token: None,
            timeout_seconds: default_timeout_seconds(),
            show_window: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_bridge_url() -> String {
    "http://127.0.0.1:7400".to_string()
}

fn default_timeout_seconds() -> u64 {
    300
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_batch() -> BatchConfig {
        BatchConfig {
            installation: "ARIA".to_string(),
            clinic: "Radiation Oncology".to_string(),
            input_path: "patients.csv".to_string(),
            target_destination: "Archive".to_string(),
        }
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_batch_config_complete() {
        assert!(complete_batch().validate().is_ok());
    }

    #[test]
    fn test_batch_config_reports_all_missing_settings_at_once() {
        let config = BatchConfig {
            installation: String::new(),
            clinic: "  ".to_string(),
            input_path: "patients.csv".to_string(),
            target_destination: String::new(),
        };

        let err = config.validate().unwrap_err();
        assert_eq!(
            err,
            "Missing required settings: batch.installation, batch.clinic, batch.target_destination"
        );
    }

    #[test]
    fn test_input_config_validation() {
        let mut config = InputConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.delimiter_char(), ',');

        config.delimiter = ";;".to_string();
        assert!(config.validate().is_err());

        config.delimiter = String::new();
        assert!(config.validate().is_err());

        config.delimiter = "\t".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(config.delimiter_char(), '\t');
    }

    #[test]
    fn test_export_config_validation() {
        let mut config = ExportConfig::default();
        assert!(config.validate().is_ok());

        config.known_destinations = vec!["PACS".to_string(), " ".to_string()];
        assert!(config.validate().is_err());

        config.known_destinations = vec![];
        config.categories = vec![];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_destinations_must_cover_target() {
        let mut config = ExportConfig::default();
        let err = config.validate_destinations("Archive").unwrap_err();
        assert!(err.contains("export.known_destinations"));

        config.known_destinations = vec!["PACS".to_string(), "Research".to_string()];
        let err = config.validate_destinations("Archive").unwrap_err();
        assert!(err.contains("'Archive'"));

        config.known_destinations.push("Archive".to_string());
        assert!(config.validate_destinations("Archive").is_ok());

        config.known_destinations = vec!["Archive".to_string()];
        assert!(config.validate_destinations(" Archive ").is_ok());
    }

    #[test]
    fn test_bridge_config_validation() {
        let mut config = BridgeConfig::default();
        assert!(config.validate().is_ok());

        config.base_url = "ftp://bridge".to_string();
        assert!(config.validate().is_err());

        config.base_url = "https://bridge.local".to_string();
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());

        config.local_rotation = "never".to_string();
        config.local_path = String::new();
        assert!(config.validate().is_err());

        config.local_enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_delimiter(), ",");
        assert_eq!(default_timeout_seconds(), 300);
        assert_eq!(
            ExportConfig::default().categories,
            vec![
                ContentCategory::Images,
                ContentCategory::StructureSet,
                ContentCategory::TotalPlanDose
            ]
        );
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: PlanvaultConfig = toml::from_str(
            r#"
[batch]
installation = "ARIA"
clinic = "Oncology"
input_path = "ids.csv"
target_destination = "Archive"

[export]
known_destinations = ["Archive", "PACS"]
"#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.application.log_level, "info");
        assert!(config.export.confirm_offset);
        assert!(config.bridge.api_token.is_none());
    }

    #[test]
    fn test_batch_only_config_rejected_for_missing_destinations() {
        let config: PlanvaultConfig = toml::from_str(
            r#"
[batch]
installation = "ARIA"
clinic = "Oncology"
input_path = "ids.csv"
target_destination = "Archive"
"#,
        )
        .unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.starts_with("export.known_destinations"));
    }

    #[test]
    fn test_missing_batch_section_reported_as_missing_settings() {
        let config: PlanvaultConfig = toml::from_str("[application]\nlog_level = \"debug\"\n").unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.starts_with("Missing required settings: batch.installation"));
    }
}
