//! System resource queries: free disk space and logical CPU count.

use sp_common::{Error, Result};

/// Free disk space, in bytes, on the volume holding the working directory.
///
/// Counts blocks available to unprivileged callers, not the root reserve.
#[cfg(unix)]
pub fn free_disk_space() -> Result<u64> {
    use std::os::unix::ffi::OsStrExt;

    let cwd = crate::exec_path::working_directory()?;
    let c_path = std::ffi::CString::new(cwd.as_os_str().as_bytes())
        .map_err(|_| Error::UnsupportedPlatform("working directory contains a NUL byte"))?;

    let mut vfs = std::mem::MaybeUninit::<libc::statvfs>::zeroed();
    let ret = unsafe { libc::statvfs(c_path.as_ptr(), vfs.as_mut_ptr()) };
    if ret != 0 {
        return Err(Error::Io(std::io::Error::last_os_error()));
    }
    let vfs = unsafe { vfs.assume_init() };
    Ok(vfs.f_bavail as u64 * vfs.f_frsize as u64)
}

/// Number of logical CPUs currently online.
#[cfg(unix)]
pub fn cpu_count() -> Result<u32> {
    let ret = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
    if ret < 1 {
        return Err(Error::Io(std::io::Error::last_os_error()));
    }
    Ok(ret as u32)
}

/// Free disk space, in bytes, on the volume holding the working directory.
#[cfg(windows)]
pub fn free_disk_space() -> Result<u64> {
    use std::os::windows::ffi::OsStrExt;
    use winapi::um::fileapi::GetDiskFreeSpaceExW;
    use winapi::um::winnt::ULARGE_INTEGER;

    let cwd = crate::exec_path::working_directory()?;
    let mut wide: Vec<u16> = cwd.as_os_str().encode_wide().collect();
    wide.push(0);

    let mut available: ULARGE_INTEGER = unsafe { std::mem::zeroed() };
    let ok = unsafe {
        GetDiskFreeSpaceExW(
            wide.as_ptr(),
            &mut available,
            std::ptr::null_mut(),
            std::ptr::null_mut(),
        )
    };
    if ok == 0 {
        return Err(Error::Io(std::io::Error::last_os_error()));
    }
    Ok(unsafe { *available.QuadPart() })
}

/// Number of logical CPUs.
#[cfg(windows)]
pub fn cpu_count() -> Result<u32> {
    use winapi::um::sysinfoapi::{GetNativeSystemInfo, SYSTEM_INFO};

    let mut info: SYSTEM_INFO = unsafe { std::mem::zeroed() };
    unsafe { GetNativeSystemInfo(&mut info) };
    if info.dwNumberOfProcessors == 0 {
        return Err(Error::UnsupportedPlatform("processor count unavailable"));
    }
    Ok(info.dwNumberOfProcessors)
}
