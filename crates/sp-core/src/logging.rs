//! Logging setup for the sysprobe CLI.
//!
//! stdout is reserved for the report (PASS/FAIL lines or the JSON
//! document); all diagnostics go to stderr through tracing. Verbosity comes
//! from the CLI flags, with `SYSPROBE_LOG` / `RUST_LOG` taking precedence
//! when set.

use std::io::IsTerminal;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the logging subsystem.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let directive = format!("sp_core={level},sp_platform={level},sysprobe={level}");

    let filter = EnvFilter::try_from_env("SYSPROBE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(directive));

    let use_ansi = std::io::stderr().is_terminal();
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(use_ansi)
        .without_time()
        .try_init();
}

/// Generate a unique run ID for this invocation.
pub fn generate_run_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("run-{}", &uuid.to_string()[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_run_id() {
        let id1 = generate_run_id();
        let id2 = generate_run_id();

        assert!(id1.starts_with("run-"));
        assert_ne!(id1, id2);
        assert_eq!(id1.len(), 16);
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging(0, false);
        init_logging(2, false);
    }
}
