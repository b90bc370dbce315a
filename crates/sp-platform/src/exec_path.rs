//! Executable self-path resolution.
//!
//! Each platform exposes a different primitive for "the path of the running
//! executable", and they disagree about how "buffer too small" is signalled:
//! readlink(2) silently truncates and returns the byte count it wrote,
//! `_NSGetExecutablePath` returns -1, `GetModuleFileNameW` returns the
//! buffer size or sets `ERROR_INSUFFICIENT_BUFFER`. None of them can report
//! the required size up front, so resolution runs a grow-and-retry protocol:
//! probe, and on a truncation signal grow the buffer by a fixed increment
//! and probe again. The retry count is capped so a primitive that reports
//! truncation forever produces a bounded failure instead of unbounded
//! allocation.

use std::path::PathBuf;

use sp_common::{Error, Result};
use tracing::debug;

use crate::pathname;

/// Initial buffer capacity, in platform buffer units.
pub(crate) const INITIAL_PATH_CAPACITY: usize = 1024;

/// Fixed increment applied to the capacity after a truncation signal.
pub(crate) const PATH_BUFFER_GROW_BY: usize = 32;

/// Upper bound on probe attempts before resolution fails.
pub(crate) const MAX_GROW_ATTEMPTS: u32 = 64;

/// Outcome of one probe attempt at a given capacity.
pub(crate) enum Step {
    /// The primitive produced a complete path.
    Resolved(PathBuf),
    /// The buffer was too small; retry with a larger one.
    Truncated,
    /// The primitive failed outright.
    Failed(std::io::Error),
}

/// Drive a probe through the bounded grow-and-retry protocol.
///
/// The probe owns its buffer and is handed only the capacity to use, so the
/// same loop serves byte-unit and wide-character platforms alike.
pub(crate) fn resolve_with(mut probe: impl FnMut(usize) -> Step) -> Result<PathBuf> {
    let mut capacity = INITIAL_PATH_CAPACITY;
    for attempt in 0..MAX_GROW_ATTEMPTS {
        match probe(capacity) {
            Step::Resolved(path) => return Ok(path),
            Step::Truncated => {
                debug!(attempt, capacity, "path buffer too small, growing");
                capacity += PATH_BUFFER_GROW_BY;
            }
            Step::Failed(err) => return Err(Error::ExecPath(err)),
        }
    }
    Err(Error::ExecPathTruncated {
        attempts: MAX_GROW_ATTEMPTS,
    })
}

/// Resolve the absolute path of the running executable.
pub fn resolve_app_file_path() -> Result<PathBuf> {
    resolve_with(platform_probe)
}

/// Resolve the directory containing the running executable.
///
/// An independently owned copy, derived by classifying the resolved path.
pub fn resolve_app_dir() -> Result<PathBuf> {
    let path = resolve_app_file_path()?;
    Ok(PathBuf::from(pathname::dir_name(&path.to_string_lossy())))
}

/// Resolve the file-name component of the running executable.
pub fn resolve_app_base_name() -> Result<String> {
    let path = resolve_app_file_path()?;
    Ok(pathname::base_name(&path.to_string_lossy()))
}

/// Query the current working directory.
pub fn working_directory() -> Result<PathBuf> {
    std::env::current_dir().map_err(Error::BaseDir)
}

#[cfg(target_os = "linux")]
fn platform_probe(capacity: usize) -> Step {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    const SELF_EXE: &[u8] = b"/proc/self/exe\0";

    let mut buf = vec![0u8; capacity];
    let read = unsafe {
        libc::readlink(
            SELF_EXE.as_ptr() as *const libc::c_char,
            buf.as_mut_ptr() as *mut libc::c_char,
            buf.len(),
        )
    };
    if read < 0 {
        return Step::Failed(std::io::Error::last_os_error());
    }
    let read = read as usize;
    if read >= capacity {
        // readlink reports only how many bytes it wrote; a result that
        // fills the buffer means the link target was (or may have been)
        // truncated.
        return Step::Truncated;
    }
    buf.truncate(read);
    Step::Resolved(PathBuf::from(OsString::from_vec(buf)))
}

#[cfg(target_os = "macos")]
fn platform_probe(capacity: usize) -> Step {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let mut buf = vec![0u8; capacity];
    let mut size = capacity as u32;
    let ret =
        unsafe { libc::_NSGetExecutablePath(buf.as_mut_ptr() as *mut libc::c_char, &mut size) };
    match ret {
        0 => {
            let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
            buf.truncate(len);
            Step::Resolved(PathBuf::from(OsString::from_vec(buf)))
        }
        -1 => Step::Truncated,
        _ => Step::Failed(std::io::Error::last_os_error()),
    }
}

#[cfg(any(target_os = "freebsd", target_os = "dragonfly"))]
fn platform_probe(capacity: usize) -> Step {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let mib = [
        libc::CTL_KERN,
        libc::KERN_PROC,
        libc::KERN_PROC_PATHNAME,
        -1,
    ];
    let mut buf = vec![0u8; capacity];
    let mut size = capacity;
    let ret = unsafe {
        libc::sysctl(
            mib.as_ptr(),
            mib.len() as libc::c_uint,
            buf.as_mut_ptr() as *mut libc::c_void,
            &mut size,
            std::ptr::null(),
            0,
        )
    };
    if ret == 0 {
        let len = buf.iter().position(|&b| b == 0).unwrap_or(size);
        buf.truncate(len);
        Step::Resolved(PathBuf::from(OsString::from_vec(buf)))
    } else {
        let err = std::io::Error::last_os_error();
        if err.raw_os_error() == Some(libc::ENOMEM) {
            Step::Truncated
        } else {
            Step::Failed(err)
        }
    }
}

#[cfg(windows)]
fn platform_probe(capacity: usize) -> Step {
    use std::ffi::OsString;
    use std::os::windows::ffi::OsStringExt;
    use winapi::shared::winerror::ERROR_INSUFFICIENT_BUFFER;
    use winapi::um::errhandlingapi::GetLastError;
    use winapi::um::libloaderapi::GetModuleFileNameW;

    let mut buf = vec![0u16; capacity];
    let copied =
        unsafe { GetModuleFileNameW(std::ptr::null_mut(), buf.as_mut_ptr(), capacity as u32) };
    if copied == 0 {
        return Step::Failed(std::io::Error::last_os_error());
    }
    let copied = copied as usize;
    if copied >= capacity || unsafe { GetLastError() } == ERROR_INSUFFICIENT_BUFFER {
        return Step::Truncated;
    }
    buf.truncate(copied);
    Step::Resolved(PathBuf::from(OsString::from_wide(&buf)))
}
