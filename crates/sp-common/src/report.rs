//! Probe report model.
//!
//! A [`ProbeReport`] is the machine-readable counterpart of the text battery:
//! one entry per check plus platform identification, a schema version for
//! forward compatibility, and a timestamp. Consumers should treat the
//! `PASS:`/`FAIL:` text lines and this JSON document as the two stable
//! output surfaces.

use serde::{Deserialize, Serialize};

/// Current report schema version.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Complete report for one probe run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeReport {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Compile-time platform identification.
    pub platform: PlatformInfo,

    /// Per-check outcomes, in execution order.
    pub checks: Vec<CheckResult>,

    /// ISO 8601 timestamp of when the probe ran.
    pub detected_at: String,
}

/// Outcome of a single check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Stable check name (snake_case, greppable).
    pub name: String,

    /// Human-readable description, as printed on the PASS/FAIL line.
    pub description: String,

    /// Whether the check passed.
    pub passed: bool,

    /// Optional detail: what was observed, or why the check failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Compile-time platform identification for the probe binary itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformInfo {
    /// Target operating system (e.g. "linux", "macos", "windows").
    pub os: String,

    /// Target architecture (e.g. "x86_64", "aarch64").
    pub arch: String,

    /// Target family ("unix" or "windows").
    pub family: String,

    /// Pointer width in bits.
    pub pointer_width: u32,

    /// Byte-order of the target ("little" or "big").
    pub endian: String,
}

impl PlatformInfo {
    /// Identification of the platform this binary was compiled for.
    pub fn current() -> Self {
        PlatformInfo {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            family: std::env::consts::FAMILY.to_string(),
            pointer_width: (std::mem::size_of::<usize>() * 8) as u32,
            endian: if cfg!(target_endian = "big") {
                "big".to_string()
            } else {
                "little".to_string()
            },
        }
    }
}

impl ProbeReport {
    /// Create an empty report stamped with the current time and platform.
    pub fn new() -> Self {
        ProbeReport {
            schema_version: SCHEMA_VERSION.to_string(),
            platform: PlatformInfo::current(),
            checks: Vec::new(),
            detected_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Record one check outcome.
    pub fn record(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        passed: bool,
        detail: Option<String>,
    ) {
        self.checks.push(CheckResult {
            name: name.into(),
            description: description.into(),
            passed,
            detail,
        });
    }

    /// Number of checks attempted.
    pub fn attempted(&self) -> usize {
        self.checks.len()
    }

    /// Number of checks that passed.
    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Whether every check passed.
    pub fn all_passed(&self) -> bool {
        self.passed() == self.attempted()
    }

    /// Whether at least one check passed (the process-exit-status policy).
    pub fn any_passed(&self) -> bool {
        self.passed() > 0
    }
}

impl Default for ProbeReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> ProbeReport {
        let mut report = ProbeReport::new();
        report.record("hostname", "get hostname", true, Some("'myhost'".into()));
        report.record("uname", "get uname", true, None);
        report.record("inet", "internet connection", false, None);
        report
    }

    #[test]
    fn test_tally() {
        let report = sample_report();
        assert_eq!(report.attempted(), 3);
        assert_eq!(report.passed(), 2);
        assert!(!report.all_passed());
        assert!(report.any_passed());
    }

    #[test]
    fn test_platform_info_current() {
        let info = PlatformInfo::current();
        assert!(!info.os.is_empty());
        assert!(!info.arch.is_empty());
        assert!(info.pointer_width == 32 || info.pointer_width == 64);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let report = sample_report();
        let json = serde_json::to_string_pretty(&report).unwrap();
        let parsed: ProbeReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.schema_version, SCHEMA_VERSION);
        assert_eq!(parsed.checks.len(), 3);
        assert_eq!(parsed.checks[0].detail.as_deref(), Some("'myhost'"));
        // None details are omitted from the document entirely
        assert!(!json.contains("\"detail\": null"));
    }
}
