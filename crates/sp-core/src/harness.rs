//! Check sequencing, result lines, and the final tally.
//!
//! The harness never aborts: a check that returns an error is recorded as a
//! failure (with the error logged) and the battery continues. The
//! `PASS: <description>` / `FAIL: <description>` lines are a stable,
//! greppable shape for external tooling; everything else about the text
//! output is informational.

use std::io::IsTerminal;

use sp_common::{OutputFormat, ProbeReport, Result};
use tracing::error;

const RED: &str = "\x1b[31m";
const LGREEN: &str = "\x1b[92m";
const REDB: &str = "\x1b[1;31m";
const LGREENB: &str = "\x1b[1;92m";
const BLUEB: &str = "\x1b[1;34m";
const RESET: &str = "\x1b[0m";

/// What a check hands back to the harness.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// Whether the check passed.
    pub passed: bool,
    /// Optional observation or failure detail for the report.
    pub detail: Option<String>,
}

impl CheckOutcome {
    pub fn new(passed: bool) -> Self {
        CheckOutcome {
            passed,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Runs checks, prints result lines, and accumulates the report.
pub struct Harness {
    report: ProbeReport,
    format: OutputFormat,
    use_color: bool,
}

impl Harness {
    pub fn new(format: OutputFormat, no_color: bool) -> Self {
        let use_color =
            format == OutputFormat::Text && !no_color && std::io::stdout().is_terminal();
        Harness {
            report: ProbeReport::new(),
            format,
            use_color,
        }
    }

    /// Print a banner line (text mode only).
    pub fn banner(&self, label: &str) {
        if self.format == OutputFormat::Text {
            println!("\t{}", self.paint(BLUEB, &format!("~~~~~~~~~~ {label} ~~~~~~~~~~")));
        }
    }

    /// Run one check and record its outcome.
    ///
    /// An `Err` from the check is an OS/runtime failure of some primitive:
    /// it is logged with its code and counted as a failed check, and the
    /// battery keeps going.
    pub fn run(
        &mut self,
        name: &str,
        description: &str,
        check: impl FnOnce() -> Result<CheckOutcome>,
    ) {
        let outcome = match check() {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(check = name, code = err.code(), os_code = ?err.os_code(), "{err}");
                CheckOutcome::new(false).with_detail(err.to_string())
            }
        };

        if self.format == OutputFormat::Text {
            if outcome.passed {
                println!("\t{}", self.paint(LGREEN, &format!("PASS: {description}")));
            } else {
                eprintln!("\t{}", self.paint(RED, &format!("FAIL: {description}")));
            }
        }

        self.report
            .record(name, description, outcome.passed, outcome.detail);
    }

    /// Print the tally and closing banner (text) or the report document
    /// (json), and hand the report back for the exit-status decision.
    pub fn finish(self) -> ProbeReport {
        match self.format {
            OutputFormat::Text => {
                let attempted = self.report.attempted();
                let passed = self.report.passed();
                if self.report.all_passed() {
                    println!(
                        "\t{}",
                        self.paint(LGREENB, &format!("--- all {attempted} checks passed! ---"))
                    );
                } else {
                    println!(
                        "\t{}",
                        self.paint(REDB, &format!("--- {passed}/{attempted} checks passed ---"))
                    );
                }
                self.banner("</sysprobe>");
            }
            OutputFormat::Json => {
                let doc = serde_json::to_string_pretty(&self.report)
                    .unwrap_or_else(|err| format!(r#"{{"error":"{err}"}}"#));
                println!("{doc}");
            }
        }
        self.report
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_color {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sp_common::Error;

    #[test]
    fn test_outcomes_are_recorded() {
        let mut harness = Harness::new(OutputFormat::Json, true);
        harness.run("ok", "a passing check", || Ok(CheckOutcome::new(true)));
        harness.run("bad", "a failing check", || Ok(CheckOutcome::new(false)));

        let report = harness.finish();
        assert_eq!(report.attempted(), 2);
        assert_eq!(report.passed(), 1);
    }

    #[test]
    fn test_check_error_becomes_failure() {
        let mut harness = Harness::new(OutputFormat::Json, true);
        harness.run("boom", "an erroring check", || {
            Err(Error::EmptyHostname)
        });

        let report = harness.finish();
        assert_eq!(report.passed(), 0);
        assert_eq!(report.checks[0].detail.as_deref(), Some("hostname query returned an empty name"));
    }

    #[test]
    fn test_errors_do_not_abort_the_battery() {
        let mut harness = Harness::new(OutputFormat::Json, true);
        harness.run("boom", "an erroring check", || Err(Error::EmptyHostname));
        harness.run("ok", "a passing check", || Ok(CheckOutcome::new(true)));

        let report = harness.finish();
        assert_eq!(report.attempted(), 2);
        assert!(report.any_passed());
    }
}
