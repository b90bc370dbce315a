//! sysprobe - cross-platform capability probe
//!
//! Runs a fixed battery of OS and C-runtime feature checks and reports
//! pass/fail for each, so a pipeline can quickly answer whether a target
//! environment supports the primitives other software needs.

use std::time::Duration;

use clap::{Args, Parser};
use sp_common::OutputFormat;
use sp_core::exit_codes::ExitCode;
use sp_core::{logging, run_battery, BatteryOptions};

/// Cross-platform capability probe
#[derive(Parser)]
#[command(name = "sysprobe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,
}

/// Options for the probe run
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', default_value = "text", env = "SYSPROBE_FORMAT")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    no_color: bool,

    /// Overall deadline for the connectivity probe, in seconds
    #[arg(long, env = "SYSPROBE_TIMEOUT")]
    timeout: Option<u64>,

    /// Skip the internet-connectivity check
    #[arg(long, env = "SYSPROBE_SKIP_NETWORK")]
    skip_network: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.global.verbose, cli.global.quiet);

    let run_id = logging::generate_run_id();
    tracing::debug!(%run_id, "starting probe battery");

    let opts = BatteryOptions {
        format: cli.global.format,
        no_color: cli.global.no_color,
        skip_network: cli.global.skip_network,
        connect_deadline: cli.global.timeout.map(Duration::from_secs),
    };
    let report = run_battery(&opts);

    tracing::debug!(
        %run_id,
        attempted = report.attempted(),
        passed = report.passed(),
        "probe battery finished"
    );
    std::process::exit(ExitCode::from_report(&report).as_i32());
}
