//! Build-environment identification.
//!
//! Reports what this binary was compiled for, from compile-time constants.
//! Informational by nature: the check passes whenever the constants are
//! coherent, and its value is the detail line.

use sp_common::{PlatformInfo, Result};
use tracing::info;

use crate::harness::CheckOutcome;

pub fn identify() -> Result<CheckOutcome> {
    let platform = PlatformInfo::current();
    info!(
        os = %platform.os,
        arch = %platform.arch,
        family = %platform.family,
        "compiled for target"
    );

    let detail = format!(
        "{} {} ({}, {}-bit, {}-endian)",
        platform.os, platform.arch, platform.family, platform.pointer_width, platform.endian
    );
    let coherent = !platform.os.is_empty() && !platform.arch.is_empty();
    Ok(CheckOutcome::new(coherent).with_detail(detail))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_passes_with_detail() {
        let outcome = identify().unwrap();
        assert!(outcome.passed);
        let detail = outcome.detail.unwrap();
        assert!(detail.contains(std::env::consts::OS));
        assert!(detail.contains(std::env::consts::ARCH));
    }
}
