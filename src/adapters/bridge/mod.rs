//! HTTP automation bridge
//!
//! Concrete [`crate::adapters::driver::ClinicalDriver`] that talks JSON over
//! HTTP to an automation agent running beside the planning application.

pub mod client;
mod models;

pub use client::BridgeDriver;
