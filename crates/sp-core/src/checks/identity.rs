//! Host identity checks: hostname and the uname tuple.

use sp_common::Result;
use sp_platform::{host_identity, host_name};
use tracing::info;

use crate::harness::CheckOutcome;

pub fn hostname() -> Result<CheckOutcome> {
    // An empty name is already rejected inside host_name().
    let name = host_name()?;
    info!(hostname = %name, "queried host name");
    Ok(CheckOutcome::new(true).with_detail(format!("'{name}'")))
}

pub fn uname() -> Result<CheckOutcome> {
    let identity = host_identity()?;
    info!(uname = %identity, "queried host identity");
    Ok(CheckOutcome::new(true).with_detail(identity.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostname_check_has_quoted_detail() {
        let outcome = hostname().unwrap();
        assert!(outcome.passed);
        let detail = outcome.detail.unwrap();
        assert!(detail.starts_with('\'') && detail.ends_with('\''));
        assert!(detail.len() > 2);
    }

    #[test]
    fn test_uname_check_passes() {
        let outcome = uname().unwrap();
        assert!(outcome.passed);
        assert!(outcome.detail.is_some());
    }
}
