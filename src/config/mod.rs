//! Configuration management for Planvault.
//!
//! Planvault reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `PLANVAULT_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation before any session is launched
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use planvault::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("planvault.toml")?;
//! println!("Clinic: {}", config.batch.clinic);
//! println!("Target: {}", config.batch.target_destination);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level, dry run
//! - [`BatchConfig`] - The four required settings (installation, clinic,
//!   input path, target destination)
//! - [`InputConfig`] - Patient list parsing
//! - [`ExportConfig`] - Content categories and known destinations
//! - [`BridgeConfig`] - Automation bridge connection
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [batch]
//! installation = "ARIA"
//! clinic = "Radiation Oncology"
//! input_path = "patients.csv"
//! target_destination = "Archive"
//!
//! [export]
//! known_destinations = ["Archive", "PACS", "Research"]
//!
//! [bridge]
//! base_url = "http://127.0.0.1:7400"
//! api_token = "${PLANVAULT_BRIDGE_TOKEN}"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, read_config};
pub use schema::{
    ApplicationConfig, BatchConfig, BridgeConfig, ExportConfig, InputConfig, LoggingConfig,
    PlanvaultConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
