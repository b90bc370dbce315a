//! Host identity: hostname and the OS identity tuple.
//!
//! Unix platforms expose both through single syscalls (gethostname(2),
//! uname(2)). Windows has no combined identity call, so the tuple is
//! synthesized: a fixed OS literal, the queried host name, a kernel version
//! read from kernel32.dll's embedded version resource, and the processor
//! architecture mapped through a fixed table.

use std::fmt;

use sp_common::{Error, Result};

/// Upper bound for hostname buffers; comfortably above every platform's
/// HOST_NAME_MAX.
#[cfg(unix)]
const MAX_HOST_NAME: usize = 256;

/// Host identity tuple, shaped like `struct utsname`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostIdentity {
    /// Operating system name (e.g. "Linux", "Darwin", "Windows").
    pub sysname: String,
    /// Network node (host) name.
    pub nodename: String,
    /// Kernel/OS release (e.g. "6.8.0-40-generic", "10.0.22631").
    pub release: String,
    /// Kernel/OS version string.
    pub version: String,
    /// Hardware architecture (e.g. "x86_64", "aarch64").
    pub machine: String,
}

impl fmt::Display for HostIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}', '{}', '{}', '{}', '{}'",
            self.sysname, self.nodename, self.release, self.version, self.machine
        )
    }
}

/// Query the host name.
///
/// A host always has a name: an empty result from the underlying query is
/// reported as a failure, never as success-with-empty-string.
#[cfg(unix)]
pub fn host_name() -> Result<String> {
    let mut buf = vec![0u8; MAX_HOST_NAME];
    let ret = unsafe { libc::gethostname(buf.as_mut_ptr() as *mut libc::c_char, buf.len() - 1) };
    if ret != 0 {
        return Err(Error::Hostname(std::io::Error::last_os_error()));
    }
    let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    let name = String::from_utf8_lossy(&buf[..len]).into_owned();
    if name.is_empty() {
        return Err(Error::EmptyHostname);
    }
    Ok(name)
}

/// Query the full OS identity tuple via uname(2).
#[cfg(unix)]
pub fn host_identity() -> Result<HostIdentity> {
    let mut raw = std::mem::MaybeUninit::<libc::utsname>::zeroed();
    let ret = unsafe { libc::uname(raw.as_mut_ptr()) };
    if ret != 0 {
        return Err(Error::Identity(std::io::Error::last_os_error()));
    }
    let raw = unsafe { raw.assume_init() };
    Ok(HostIdentity {
        sysname: field_to_string(&raw.sysname),
        nodename: field_to_string(&raw.nodename),
        release: field_to_string(&raw.release),
        version: field_to_string(&raw.version),
        machine: field_to_string(&raw.machine),
    })
}

#[cfg(unix)]
fn field_to_string(field: &[libc::c_char]) -> String {
    let bytes: Vec<u8> = field
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Query the host name.
///
/// Uses the physical DNS host name, which matches what winsock's
/// gethostname would return without requiring WSAStartup.
#[cfg(windows)]
pub fn host_name() -> Result<String> {
    use winapi::um::sysinfoapi::{ComputerNamePhysicalDnsHostname, GetComputerNameExW};

    let mut size: u32 = 0;
    unsafe {
        GetComputerNameExW(
            ComputerNamePhysicalDnsHostname,
            std::ptr::null_mut(),
            &mut size,
        )
    };
    let mut buf = vec![0u16; (size as usize).max(1)];
    let ok = unsafe {
        GetComputerNameExW(ComputerNamePhysicalDnsHostname, buf.as_mut_ptr(), &mut size)
    };
    if ok == 0 {
        return Err(Error::Hostname(std::io::Error::last_os_error()));
    }
    let name = String::from_utf16_lossy(&buf[..size as usize]);
    if name.is_empty() {
        return Err(Error::EmptyHostname);
    }
    Ok(name)
}

/// Synthesize the OS identity tuple: Windows has no uname(2).
///
/// Any failing step aborts the whole operation with that step's error.
#[cfg(windows)]
pub fn host_identity() -> Result<HostIdentity> {
    const SYS_NAME: &str = "Windows";

    let nodename = host_name()?;
    let (major, minor, build) = kernel_library_version()?;
    let machine = machine_label();
    Ok(HostIdentity {
        sysname: SYS_NAME.to_string(),
        nodename,
        release: format!("{major}.{minor}.{build}"),
        version: format!("{SYS_NAME} {major}.{minor}.{build}-{machine}"),
        machine: machine.to_string(),
    })
}

/// Read major.minor.build from kernel32.dll's version resource.
///
/// GetVersionEx lies on manifestless binaries; the kernel DLL's product
/// version does not.
#[cfg(windows)]
fn kernel_library_version() -> Result<(u16, u16, u16)> {
    use winapi::shared::minwindef::{HIWORD, LOWORD};
    use winapi::um::sysinfoapi::GetSystemDirectoryW;
    use winapi::um::winver::{
        GetFileVersionInfoSizeW, GetFileVersionInfoW, VerQueryValueW, VS_FIXEDFILEINFO,
    };

    let mut sysdir = vec![0u16; 260];
    let len = unsafe { GetSystemDirectoryW(sysdir.as_mut_ptr(), sysdir.len() as u32) } as usize;
    if len == 0 {
        return Err(Error::Identity(std::io::Error::last_os_error()));
    }
    if len > sysdir.len() {
        sysdir = vec![0u16; len];
        let retry = unsafe { GetSystemDirectoryW(sysdir.as_mut_ptr(), sysdir.len() as u32) };
        if retry == 0 {
            return Err(Error::Identity(std::io::Error::last_os_error()));
        }
        sysdir.truncate(retry as usize);
    } else {
        sysdir.truncate(len);
    }

    let mut dll_path = sysdir;
    dll_path.extend("\\kernel32.dll".encode_utf16());
    dll_path.push(0);

    let mut ignored: u32 = 0;
    let size = unsafe { GetFileVersionInfoSizeW(dll_path.as_ptr(), &mut ignored) };
    if size == 0 {
        return Err(Error::Identity(std::io::Error::last_os_error()));
    }

    let mut data = vec![0u8; size as usize];
    let ok = unsafe {
        GetFileVersionInfoW(dll_path.as_ptr(), 0, size, data.as_mut_ptr() as *mut _)
    };
    if ok == 0 {
        return Err(Error::Identity(std::io::Error::last_os_error()));
    }

    let root: Vec<u16> = "\\".encode_utf16().chain(std::iter::once(0)).collect();
    let mut block: *mut winapi::ctypes::c_void = std::ptr::null_mut();
    let mut block_size: u32 = 0;
    let ok = unsafe {
        VerQueryValueW(
            data.as_ptr() as *const _,
            root.as_ptr(),
            &mut block,
            &mut block_size,
        )
    };
    if ok == 0 || (block_size as usize) < std::mem::size_of::<VS_FIXEDFILEINFO>() {
        return Err(Error::Identity(std::io::Error::last_os_error()));
    }

    let info = unsafe { &*(block as *const VS_FIXEDFILEINFO) };
    Ok((
        HIWORD(info.dwProductVersionMS),
        LOWORD(info.dwProductVersionMS),
        HIWORD(info.dwProductVersionLS),
    ))
}

/// Map the native processor architecture through the fixed label table.
#[cfg(windows)]
fn machine_label() -> &'static str {
    use winapi::um::sysinfoapi::{GetNativeSystemInfo, SYSTEM_INFO};
    use winapi::um::winnt::{
        PROCESSOR_ARCHITECTURE_AMD64, PROCESSOR_ARCHITECTURE_ARM, PROCESSOR_ARCHITECTURE_ARM64,
        PROCESSOR_ARCHITECTURE_IA64, PROCESSOR_ARCHITECTURE_INTEL,
    };

    let mut info: SYSTEM_INFO = unsafe { std::mem::zeroed() };
    unsafe { GetNativeSystemInfo(&mut info) };
    match unsafe { info.u.s() }.wProcessorArchitecture {
        PROCESSOR_ARCHITECTURE_INTEL => "x86",
        PROCESSOR_ARCHITECTURE_IA64 => "IA64",
        PROCESSOR_ARCHITECTURE_ARM64 => "aarch64",
        PROCESSOR_ARCHITECTURE_ARM => "armhf",
        PROCESSOR_ARCHITECTURE_AMD64 => "x86_64",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_name_is_never_empty() {
        let name = host_name().expect("hostname query should succeed");
        assert!(!name.is_empty());
    }

    #[test]
    fn test_host_identity_fields_populated() {
        let identity = host_identity().expect("identity query should succeed");
        assert!(!identity.sysname.is_empty());
        assert!(!identity.nodename.is_empty());
        assert!(!identity.release.is_empty());
        assert!(!identity.machine.is_empty());
    }

    #[test]
    fn test_identity_nodename_matches_host_name() {
        let identity = host_identity().unwrap();
        let name = host_name().unwrap();
        // uname's nodename and gethostname answer the same question; some
        // systems qualify one but not the other, so compare the first label.
        let node_label = identity.nodename.split('.').next().unwrap_or("");
        let host_label = name.split('.').next().unwrap_or("");
        assert_eq!(node_label, host_label);
    }

    #[test]
    fn test_display_quotes_all_fields() {
        let identity = HostIdentity {
            sysname: "Linux".into(),
            nodename: "box".into(),
            release: "6.8.0".into(),
            version: "#1 SMP".into(),
            machine: "x86_64".into(),
        };
        assert_eq!(
            identity.to_string(),
            "'Linux', 'box', '6.8.0', '#1 SMP', 'x86_64'"
        );
    }
}
