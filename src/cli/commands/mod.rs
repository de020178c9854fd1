//! CLI command implementations
//!
//! Each command returns the process exit code; see [`export`] for the codes.

pub mod export;
pub mod init;
pub mod validate;
