//! The fixed check battery.
//!
//! One module per probe area; [`run_battery`] sequences them in a fixed
//! order. No check failure stops the run.

pub mod build_env;
pub mod filesystem;
pub mod identity;
pub mod network;
pub mod resources;
pub mod runtime;

use std::time::Duration;

use sp_common::{OutputFormat, ProbeReport};
use tracing::info;

use crate::harness::Harness;

/// Options for one battery run, distilled from the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatteryOptions {
    pub format: OutputFormat,
    pub no_color: bool,
    pub skip_network: bool,
    /// Overall deadline for the connectivity probe.
    pub connect_deadline: Option<Duration>,
}

/// Run every check in order and return the finished report.
pub fn run_battery(opts: &BatteryOptions) -> ProbeReport {
    let mut harness = Harness::new(opts.format, opts.no_color);
    harness.banner("<sysprobe>");

    harness.run("build_env", "build environment", build_env::identify);
    harness.run("sysconf", "sysconf()", runtime::sysconf_support);
    harness.run("system", "system()", runtime::system_available);
    harness.run("format", "usize formatting", runtime::format_portability);
    harness.run("filesystem", "filesystem api", filesystem::filesystem_api);
    harness.run("disk_space", "free disk space", resources::disk_space);
    harness.run("cpu_count", "cpu count", resources::online_cpus);
    harness.run("hostname", "get hostname", identity::hostname);
    harness.run("uname", "get uname", identity::uname);

    if opts.skip_network {
        info!("skipping internet connectivity check");
    } else {
        let deadline = opts.connect_deadline;
        harness.run("inet", "internet connection", || {
            network::internet_connectivity(deadline)
        });
    }

    harness.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_battery_records_every_check() {
        let opts = BatteryOptions {
            format: OutputFormat::Json,
            no_color: true,
            skip_network: true,
            connect_deadline: None,
        };
        let report = run_battery(&opts);

        let names: Vec<&str> = report.checks.iter().map(|c| c.name.as_str()).collect();
        assert!(names.contains(&"hostname"));
        assert!(names.contains(&"filesystem"));
        assert!(!names.contains(&"inet"), "skip_network must omit the probe");
        assert!(report.any_passed());
    }
}
