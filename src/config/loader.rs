//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::PlanvaultConfig;
use crate::config::secret_string;
use crate::domain::errors::PlanvaultError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into PlanvaultConfig
/// 4. Applies environment variable overrides (PLANVAULT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use planvault::config::loader::load_config;
///
/// let config = load_config("planvault.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PlanvaultConfig> {
    let config = read_config(path)?;

    config.validate().map_err(|e| {
        PlanvaultError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Reads configuration without validating it
///
/// Used by commands that apply command-line overrides before validation.
pub fn read_config(path: impl AsRef<Path>) -> Result<PlanvaultConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PlanvaultError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PlanvaultError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: PlanvaultConfig = toml::from_str(&contents)
        .map_err(|e| PlanvaultError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| PlanvaultError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(PlanvaultError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using PLANVAULT_* prefix
///
/// Environment variables follow the pattern: PLANVAULT_<SECTION>_<KEY>
/// For example: PLANVAULT_BATCH_CLINIC, PLANVAULT_BRIDGE_BASE_URL
fn apply_env_overrides(config: &mut PlanvaultConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("PLANVAULT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("PLANVAULT_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Batch overrides
    if let Ok(val) = std::env::var("PLANVAULT_BATCH_INSTALLATION") {
        config.batch.installation = val;
    }
    if let Ok(val) = std::env::var("PLANVAULT_BATCH_CLINIC") {
        config.batch.clinic = val;
    }
    if let Ok(val) = std::env::var("PLANVAULT_BATCH_INPUT_PATH") {
        config.batch.input_path = val;
    }
    if let Ok(val) = std::env::var("PLANVAULT_BATCH_TARGET_DESTINATION") {
        config.batch.target_destination = val;
    }

    // Input overrides
    if let Ok(val) = std::env::var("PLANVAULT_INPUT_DELIMITER") {
        config.input.delimiter = val;
    }
    if let Ok(val) = std::env::var("PLANVAULT_INPUT_HAS_HEADER") {
        config.input.has_header = val.parse().unwrap_or(false);
    }

    // Export overrides
    if let Ok(val) = std::env::var("PLANVAULT_EXPORT_CONFIRM_OFFSET") {
        config.export.confirm_offset = val.parse().unwrap_or(true);
    }

    // Bridge overrides
    if let Ok(val) = std::env::var("PLANVAULT_BRIDGE_BASE_URL") {
        config.bridge.base_url = val;
    }
    if let Ok(val) = std::env::var("PLANVAULT_BRIDGE_API_TOKEN") {
        config.bridge.api_token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("PLANVAULT_BRIDGE_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.bridge.timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("PLANVAULT_BRIDGE_SHOW_WINDOW") {
        config.bridge.show_window = val.parse().unwrap_or(false);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("PLANVAULT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("PLANVAULT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
