//! External system integrations for Planvault.
//!
//! - [`driver`] - The planning application automation surface (trait)
//! - [`bridge`] - HTTP automation bridge implementation of the driver
//! - [`input`] - Patient list reader
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the core can be
//! exercised with scripted drivers in tests.
//!
//! ```rust,no_run
//! use planvault::adapters::bridge::BridgeDriver;
//! use planvault::adapters::driver::ClinicalDriver;
//! use planvault::config::BridgeConfig;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let driver: Box<dyn ClinicalDriver> = Box::new(BridgeDriver::new(&BridgeConfig::default())?);
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod driver;
pub mod input;
