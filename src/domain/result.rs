//! Result type alias for Planvault

use super::errors::{DriverFault, PlanvaultError};

/// Result type alias for Planvault operations
///
/// # Examples
///
/// ```
/// use planvault::domain::result::Result;
/// use planvault::domain::errors::PlanvaultError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(PlanvaultError::Input("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, PlanvaultError>;

/// Result of a single call against the planning application
pub type DriverResult<T> = std::result::Result<T, DriverFault>;
