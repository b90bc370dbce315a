//! System resource checks: free disk space and CPU count.

use sp_common::Result;
use sp_platform::{cpu_count, free_disk_space};
use tracing::info;

use crate::harness::CheckOutcome;

pub fn disk_space() -> Result<CheckOutcome> {
    let bytes = free_disk_space()?;
    info!(bytes, "free disk space");
    Ok(CheckOutcome::new(bytes > 0).with_detail(format!("{bytes} bytes free")))
}

pub fn online_cpus() -> Result<CheckOutcome> {
    let count = cpu_count()?;
    info!(count, "logical cpus online");
    Ok(CheckOutcome::new(count >= 1).with_detail(format!("{count} cpus online")))
}
