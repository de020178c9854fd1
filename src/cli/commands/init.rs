//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::cli::commands::export::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "planvault.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Planvault configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your installation, clinic and target destination", self.output);
                println!("  2. List every destination the export dialog offers in export.known_destinations");
                println!("  3. Put the patient ids in the file named by batch.input_path, one per line");
                println!("  4. Set PLANVAULT_BRIDGE_TOKEN in .env if the automation bridge requires a token");
                println!("  5. Validate configuration: planvault validate-config");
                println!("  6. Try a dry run: planvault export --dry-run");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Planvault Configuration File
# Batch export of approved treatment plans

[application]
log_level = "info"
dry_run = false

[batch]
installation = "ARIA"
clinic = "Radiation Oncology"
input_path = "patients.csv"
target_destination = "Archive"

[input]
delimiter = ","
has_header = false

[export]
categories = ["images", "structure_set", "total_plan_dose"]
known_destinations = ["Archive", "PACS"]
confirm_offset = true

[bridge]
base_url = "http://127.0.0.1:7400"
# api_token = "${PLANVAULT_BRIDGE_TOKEN}"
timeout_seconds = 300
show_window = false

[logging]
local_enabled = true
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Planvault Configuration File
# Batch export of approved treatment plans
#
# Every value can be overridden with PLANVAULT_<SECTION>_<KEY>, for example
# PLANVAULT_BATCH_TARGET_DESTINATION=Research. ${VAR} references are
# replaced with environment variables when the file is loaded.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Dry run mode (configure every export, then cancel instead of submitting)
dry_run = false

# ============================================================================
# Batch Settings (all four are required)
# ============================================================================
[batch]
# Installation the planning application logs into
installation = "ARIA"

# Clinic (department) the patients belong to
clinic = "Radiation Oncology"

# Patient list: one id per line, first column when delimited
input_path = "patients.csv"

# The one destination that is active when a plan is exported
target_destination = "Archive"

# ============================================================================
# Patient List Parsing
# ============================================================================
[input]
# Single-character field delimiter
delimiter = ","

# Skip the first line
has_header = false

# ============================================================================
# Export Dialog
# ============================================================================
[export]
# Content categories selected for every plan:
# images, structure_set, plan, total_plan_dose, beam_dose, registrations
categories = ["images", "structure_set", "total_plan_dose"]

# Every destination the export dialog offers. All of them except
# target_destination are switched off before each export.
known_destinations = ["Archive", "PACS", "Research"]

# Answer the plan offset prompt with continue
confirm_offset = true

# ============================================================================
# Automation Bridge
# ============================================================================
[bridge]
# Agent running next to the planning application
base_url = "http://127.0.0.1:7400"

# Bearer token (optional)
# api_token = "${PLANVAULT_BRIDGE_TOKEN}"

# Request timeout in seconds; exports of large plans can take minutes
timeout_seconds = 300

# Show the planning application window while the batch runs
show_window = false

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON log files
local_enabled = true

# Directory for log files
local_path = "./logs"

# Log rotation (daily, hourly or never)
local_rotation = "daily"
"#
        .to_string()
    }
}
