//! Exit codes for the sysprobe CLI.
//!
//! The exit status communicates the aggregate outcome without output
//! parsing: individual check failures never abort the run, only the tally
//! decides the status.

use sp_common::ProbeReport;

/// Exit codes for sysprobe runs.
///
/// These are a stable contract for pipelines. Changes require a major
/// version bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// At least one check passed.
    Ok = 0,

    /// Every check failed, or no checks ran.
    NoChecksPassed = 1,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Derive the exit code from a finished report.
    pub fn from_report(report: &ProbeReport) -> Self {
        if report.any_passed() {
            ExitCode::Ok
        } else {
            ExitCode::NoChecksPassed
        }
    }
}
