//! E2E scenarios for the sysprobe binary.
//!
//! Covers:
//! - Stable PASS/FAIL line shape and the final tally
//! - JSON report output
//! - Exit code policy (zero when at least one check passed)
//! - Network skip flag
//!
//! Network-dependent behavior is skipped so the suite runs offline.

use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Get a Command for the sysprobe binary.
fn sysprobe() -> Command {
    let mut cmd = Command::cargo_bin("sysprobe").expect("binary should build");
    cmd.timeout(Duration::from_secs(60));
    cmd
}

#[test]
fn test_default_run_prints_battery_and_tally() {
    sysprobe()
        .args(["--skip-network", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS: get hostname"))
        .stdout(predicate::str::contains("PASS: get uname"))
        .stdout(predicate::str::contains("PASS: filesystem api"))
        .stdout(predicate::str::is_match(r"--- (all )?\d+(/\d+)? checks passed").unwrap())
        .stdout(predicate::str::contains("<sysprobe>"))
        .stdout(predicate::str::contains("</sysprobe>"));
}

#[test]
fn test_no_color_output_has_no_escape_codes() {
    sysprobe()
        .args(["--skip-network", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b").not());
}

#[test]
fn test_result_lines_are_greppable() {
    let output = sysprobe()
        .args(["--skip-network", "--no-color"])
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let pass_lines: Vec<&str> = stdout
        .lines()
        .filter(|l| l.trim_start().starts_with("PASS: "))
        .collect();
    // Every check that passed produced exactly one stable line.
    assert!(!pass_lines.is_empty(), "expected PASS lines, got:\n{stdout}");
}

#[test]
fn test_json_report_parses() -> Result<(), Box<dyn std::error::Error>> {
    let output = sysprobe()
        .args(["--format", "json", "--skip-network"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: Value = serde_json::from_slice(&output)?;
    assert_eq!(
        json.get("schema_version").and_then(Value::as_str),
        Some("1.0.0")
    );

    let checks = json
        .get("checks")
        .and_then(Value::as_array)
        .ok_or("report should have a checks array")?;
    assert!(!checks.is_empty());
    for check in checks {
        assert!(check.get("name").and_then(Value::as_str).is_some());
        assert!(check.get("passed").and_then(Value::as_bool).is_some());
    }

    let platform = json
        .get("platform")
        .ok_or("report should have platform info")?;
    assert_eq!(
        platform.get("os").and_then(Value::as_str),
        Some(std::env::consts::OS)
    );
    Ok(())
}

#[test]
fn test_skip_network_omits_inet_check() -> Result<(), Box<dyn std::error::Error>> {
    let output = sysprobe()
        .args(["--format", "json", "--skip-network"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: Value = serde_json::from_slice(&output)?;
    let names: Vec<&str> = json["checks"]
        .as_array()
        .ok_or("checks array")?
        .iter()
        .filter_map(|c| c.get("name").and_then(Value::as_str))
        .collect();
    assert!(!names.contains(&"inet"));
    assert!(names.contains(&"hostname"));
    Ok(())
}

#[test]
fn test_json_mode_keeps_stdout_clean() -> Result<(), Box<dyn std::error::Error>> {
    let output = sysprobe()
        .args(["--format", "json", "--skip-network", "-v"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    // The whole of stdout must be one JSON document, narration goes to
    // stderr.
    let _: Value = serde_json::from_slice(&output)?;
    Ok(())
}

#[test]
fn test_invalid_format_is_rejected() {
    sysprobe()
        .args(["--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
