//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Planvault configuration file.

use crate::cli::commands::export::{EXIT_CONFIG, EXIT_OK};
use crate::config::{load_config, PlanvaultConfig};
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        match load_config(config_path) {
            Ok(config) => {
                println!("✅ Configuration is valid");
                println!();
                print_summary(&config);
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(EXIT_CONFIG)
            }
        }
    }
}

fn print_summary(config: &PlanvaultConfig) {
    println!("Configuration Summary:");
    println!("  Log Level: {}", config.application.log_level);
    println!("  Dry Run: {}", config.application.dry_run);
    println!("  Installation: {}", config.batch.installation);
    println!("  Clinic: {}", config.batch.clinic);
    println!("  Patient List: {}", config.batch.input_path);
    println!("  Target Destination: {}", config.batch.target_destination);
    println!(
        "  Known Destinations: {}",
        config.export.known_destinations.join(", ")
    );
    println!(
        "  Content: {}",
        config
            .export
            .categories
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  Bridge: {}", config.bridge.base_url);
    println!(
        "  Bridge Token: {}",
        match &config.bridge.api_token {
            Some(token) if !token.expose_secret().is_empty() => "set",
            _ => "not set",
        }
    );
    println!(
        "  File Logging: {}",
        if config.logging.local_enabled {
            format!("{} ({})", config.logging.local_path, config.logging.local_rotation)
        } else {
            "disabled".to_string()
        }
    );
    println!();
}
