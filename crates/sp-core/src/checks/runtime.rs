//! C-runtime one-off checks: sysconf, system(), format portability.

use sp_common::Result;
use tracing::{info, warn};

use crate::harness::CheckOutcome;

/// Probe sysconf(3) for a couple of values other software commonly needs.
#[cfg(unix)]
pub fn sysconf_support() -> Result<CheckOutcome> {
    let queries: [(libc::c_int, &str); 2] = [
        (libc::_SC_2_VERSION, "popen() and pclose()"),
        (libc::_SC_HOST_NAME_MAX, "_SC_HOST_NAME_MAX"),
    ];

    let mut all = true;
    for (key, what) in queries {
        let value = unsafe { libc::sysconf(key) };
        if value == -1 {
            warn!(
                key,
                what,
                error = %std::io::Error::last_os_error(),
                "sysconf query failed"
            );
            all = false;
        } else {
            info!(key, what, value, "sysconf");
        }
    }
    Ok(CheckOutcome::new(all))
}

/// Windows has no sysconf; the CRT provides _popen()/_pclose() directly.
#[cfg(windows)]
pub fn sysconf_support() -> Result<CheckOutcome> {
    Ok(CheckOutcome::new(true).with_detail("windows CRT provides _popen()/_pclose()"))
}

/// Is a command processor available to system(3)?
pub fn system_available() -> Result<CheckOutcome> {
    let available = unsafe { libc::system(std::ptr::null()) } != 0;
    if available {
        info!("system() is available to execute commands");
    } else {
        warn!("system() is NOT available to execute commands");
    }
    Ok(CheckOutcome::new(available))
}

/// The Rust analog of the `%zu` probe: a `usize` must format as plain
/// decimal text regardless of the platform's pointer width.
pub fn format_portability() -> Result<CheckOutcome> {
    let n: usize = 10;
    let rendered = format!("printing a usize with the value ten: '{n}'");
    info!("{rendered}");

    let passed = rendered.contains("10");
    Ok(CheckOutcome::new(passed).with_detail(rendered))
}
