//! Outbound connectivity check.

use std::time::Duration;

use sp_common::Result;
use sp_platform::inet::{
    check_connectivity, ConnectivityOptions, Reachability, DEFAULT_PROBE_HOST, DEFAULT_PROBE_PORT,
};
use tracing::info;

use crate::harness::CheckOutcome;

pub fn internet_connectivity(deadline: Option<Duration>) -> Result<CheckOutcome> {
    let opts = ConnectivityOptions {
        overall_deadline: deadline,
        ..ConnectivityOptions::default()
    };

    match check_connectivity(DEFAULT_PROBE_HOST, DEFAULT_PROBE_PORT, opts)? {
        Reachability::Reachable { addr } => {
            info!(%addr, "outbound connection established");
            Ok(CheckOutcome::new(true).with_detail(format!("connected to {addr}")))
        }
        Reachability::Unreachable => Ok(CheckOutcome::new(false).with_detail(format!(
            "{DEFAULT_PROBE_HOST}:{DEFAULT_PROBE_PORT} unreachable"
        ))),
    }
}
