//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Planvault using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Planvault - batch export of approved treatment plans
#[derive(Parser, Debug)]
#[command(name = "planvault")]
#[command(version, about, long_about = None)]
#[command(author = "Planvault Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "planvault.toml", env = "PLANVAULT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PLANVAULT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export approved plans for every patient in the input list
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
