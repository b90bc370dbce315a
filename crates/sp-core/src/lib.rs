//! sysprobe core library.
//!
//! This library provides the harness side of the capability probe:
//! - Exit codes for the CLI
//! - Logging initialization
//! - The check harness (result lines, tally, report)
//! - The fixed check battery
//!
//! The binary entry point is in `main.rs`; the portable OS primitives the
//! checks exercise live in `sp-platform`.

pub mod checks;
pub mod exit_codes;
pub mod harness;
pub mod logging;

pub use checks::{run_battery, BatteryOptions};
pub use exit_codes::ExitCode;
pub use harness::{CheckOutcome, Harness};
