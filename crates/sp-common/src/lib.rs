//! sysprobe common types.
//!
//! This crate provides foundational types shared across the sysprobe crates:
//! - The unified error type with stable codes and categories
//! - The probe report model (machine-readable check outcomes)
//! - Output format specifications

pub mod error;
pub mod output;
pub mod report;

pub use error::{Error, ErrorCategory, Result};
pub use output::OutputFormat;
pub use report::{CheckResult, PlatformInfo, ProbeReport, SCHEMA_VERSION};
