//! Domain models and types for Planvault.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PatientId`], [`DestinationName`])
//! - **Plan model** ([`Plan`], [`ApprovalState`])
//! - **Export request** ([`ExportRequest`], [`ContentCategory`], [`Toggle`])
//! - **Error types** ([`PlanvaultError`], [`DriverFault`])
//! - **Result type aliases** ([`Result`], [`DriverResult`])
//!
//! # Type Safety
//!
//! ```rust
//! use planvault::domain::{DestinationName, PatientId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let patient_id = PatientId::new("RT-1001")?;
//! let target = DestinationName::new("Archive")?;
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod export;
pub mod ids;
pub mod plan;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{DriverFault, PlanvaultError};
pub use export::{ContentCategory, ExportRequest, Toggle};
pub use ids::{DestinationName, PatientId};
pub use plan::{ApprovalState, Plan};
pub use result::{DriverResult, Result};
