//! idealrank-common — Shared error taxonomy and run configuration used across all idealrank crates.

pub mod error;
pub mod run_config;

// Re-export commonly used types
pub use error::{IdealRankError, Result};
pub use run_config::{CriteriaConfig, InputConfig, OutputConfig, OutputFormat, RunConfig};
