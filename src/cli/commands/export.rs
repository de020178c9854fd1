//! Export command implementation
//!
//! This module implements the `export` command: read the patient list, drive
//! the planning application through the batch orchestrator and print the
//! failure report.

use crate::adapters::bridge::BridgeDriver;
use crate::adapters::input::read_patient_ids;
use crate::config::{read_config, PlanvaultConfig};
use crate::core::{BatchOrchestrator, RunReport};
use crate::domain::PlanvaultError;
use clap::Args;
use std::io::{self, Write};

/// Exit code for a run without failures
pub const EXIT_OK: i32 = 0;
/// Exit code for a run that recorded failures
pub const EXIT_FAILURES: i32 = 1;
/// Exit code for configuration errors
pub const EXIT_CONFIG: i32 = 2;
/// Exit code for an unreadable patient list
pub const EXIT_INPUT: i32 = 3;
/// Exit code when the planning application cannot be reached
pub const EXIT_SESSION: i32 = 4;
/// Exit code for anything else
pub const EXIT_FATAL: i32 = 5;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - configure every export but cancel instead of submitting
    #[arg(long)]
    pub dry_run: bool,

    /// Override the patient list path (batch.input_path)
    #[arg(long, value_name = "PATH")]
    pub input: Option<String>,

    /// Override the target destination (batch.target_destination)
    #[arg(long, value_name = "NAME")]
    pub target: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match read_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG);
        }

        let patient_ids = match read_patient_ids(&config.batch.input_path, &config.input) {
            Ok(ids) => ids,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to read patient list");
                eprintln!("Failed to read patient list: {e}");
                return Ok(EXIT_INPUT);
            }
        };

        if patient_ids.is_empty() {
            tracing::warn!(path = %config.batch.input_path, "Patient list is empty");
            println!("No patient ids in {}; nothing to export.", config.batch.input_path);
            return Ok(EXIT_OK);
        }

        if config.application.dry_run {
            tracing::info!("Dry run mode enabled - exports will be cancelled before submission");
            println!("🔍 DRY RUN MODE - exports are configured but never submitted");
            println!();
        }

        if !self.yes && !config.application.dry_run {
            print_plan(&config, patient_ids.len());
            if !confirm("Proceed with export? [y/N]: ")? {
                println!("Export cancelled.");
                return Ok(EXIT_OK);
            }
        }

        let driver = match BridgeDriver::new(&config.bridge) {
            Ok(driver) => driver,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create automation bridge client");
                eprintln!("Failed to initialize automation bridge: {e}");
                return Ok(EXIT_SESSION);
            }
        };

        let orchestrator = match BatchOrchestrator::from_config(&config, Box::new(driver)) {
            Ok(orchestrator) => orchestrator,
            Err(e) => {
                tracing::error!(error = %e, "Invalid export settings");
                eprintln!("Invalid export settings: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!("🚀 Exporting plans for {} patients...", patient_ids.len());
        println!();

        let report = match orchestrator.run(&patient_ids).await {
            Ok(report) => report,
            Err(e @ PlanvaultError::Session(_)) => {
                eprintln!("Could not start the planning application: {e}");
                return Ok(EXIT_SESSION);
            }
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(EXIT_FATAL);
            }
        };

        print_report(&report);
        Ok(exit_code(&report))
    }

    fn apply_overrides(&self, config: &mut PlanvaultConfig) {
        if let Some(input) = &self.input {
            tracing::info!(input = %input, "Overriding patient list from CLI");
            config.batch.input_path = input.clone();
        }

        if let Some(target) = &self.target {
            tracing::info!(destination = %target, "Overriding target destination from CLI");
            config.batch.target_destination = target.clone();
        }

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
    }
}

fn print_plan(config: &PlanvaultConfig, patients: usize) {
    println!("Export Configuration:");
    println!("  Installation: {}", config.batch.installation);
    println!("  Clinic: {}", config.batch.clinic);
    println!("  Patients: {patients} (from {})", config.batch.input_path);
    println!("  Target destination: {}", config.batch.target_destination);
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
    println!();
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn print_report(report: &RunReport) {
    println!();
    println!("📊 Export Summary:");
    println!("  Run ID: {}", report.run_id);
    println!("  Patients: {}", report.patients_attempted);
    println!("  Failures: {}", report.ledger.len());
    println!("  Duration: {:.2}s", report.duration.as_secs_f64());
    if report.dry_run {
        println!("  Mode: dry run (nothing submitted)");
    }
    println!();

    if report.is_clean() {
        println!("✅ All patients processed without failures");
        return;
    }

    println!("⚠️  Failures:");
    for record in report.ledger.all() {
        let plan = match record.plan_label() {
            "" => "-",
            name => name,
        };
        println!(
            "    - {} | {} | {} | {}",
            record.patient_id, plan, record.kind, record.reason
        );
    }
    println!();
}

/// Process exit code for a finished run
pub fn exit_code(report: &RunReport) -> i32 {
    if report.is_clean() {
        EXIT_OK
    } else {
        EXIT_FAILURES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FailureKind, FailureLedger, FailureRecord, StepFailure};
    use crate::domain::PatientId;
    use std::time::Duration;
    use uuid::Uuid;

    fn report(ledger: FailureLedger) -> RunReport {
        RunReport {
            run_id: Uuid::new_v4(),
            ledger,
            patients_attempted: 3,
            dry_run: false,
            duration: Duration::from_secs(1),
        }
    }

    #[test]
    fn test_exit_code_clean_run() {
        assert_eq!(exit_code(&report(FailureLedger::new())), EXIT_OK);
    }

    #[test]
    fn test_exit_code_with_failures() {
        let mut ledger = FailureLedger::new();
        ledger.append(FailureRecord::patient(
            PatientId::new("B").unwrap(),
            StepFailure::new(FailureKind::PatientLoad, "locked"),
        ));
        assert_eq!(exit_code(&report(ledger)), EXIT_FAILURES);
    }

    #[test]
    fn test_cli_overrides() {
        let args = ExportArgs {
            yes: true,
            dry_run: true,
            input: Some("today.csv".to_string()),
            target: Some("Research".to_string()),
        };
        let mut config = PlanvaultConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.batch.input_path, "today.csv");
        assert_eq!(config.batch.target_destination, "Research");
        assert!(config.application.dry_run);
    }
}
