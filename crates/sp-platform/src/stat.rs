//! Filesystem stat probing.
//!
//! A relative path is resolved against a caller-selected base directory
//! ([`PathBase`]), not implicitly against the process working directory. On
//! Unix the probe is race-free with respect to that base: the directory is
//! opened once in a traversal-only mode and the stat runs directory-relative
//! against the open descriptor, so the base cannot be swapped out between
//! path construction and the stat call. On Windows, which has no
//! openat-family, the absolute path is synthesized by concatenation and
//! stat'd directly (weaker guarantee).
//!
//! Symbolic links at the final component are never followed, for relative
//! and absolute paths alike.
//!
//! Non-existence is not a failure: it is the [`StatOutcome::Missing`] value.
//! Only genuinely failing primitives produce errors.

use std::fmt;
use std::path::Path;

use sp_common::{Error, Result};
use tracing::debug;

use crate::exec_path;
use crate::pathname;

/// Which directory a relative path is resolved against.
///
/// Selecting a base never implies ownership of that directory beyond the
/// call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathBase {
    /// The process's current working directory.
    WorkingDirectory,
    /// The directory containing the running executable.
    AppDirectory,
}

/// What kind of entity a path names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    Regular,
    Symlink,
    Socket,
    Fifo,
    BlockDevice,
    CharDevice,
    Unknown,
}

impl EntryKind {
    fn label(self) -> &'static str {
        match self {
            EntryKind::Directory => "directory",
            EntryKind::Regular => "regular",
            EntryKind::Symlink => "symlink",
            EntryKind::Socket => "socket",
            EntryKind::Fifo => "pipe (fifo)",
            EntryKind::BlockDevice => "block device",
            EntryKind::CharDevice => "character special",
            EntryKind::Unknown => "<unknown>",
        }
    }
}

/// Metadata for an existing filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    /// Entity kind.
    pub kind: EntryKind,
    /// Size in bytes.
    pub size: u64,
    /// Permission bits (owner/group/other x rwx plus setuid/setgid/sticky).
    pub mode: u32,
}

impl FileStat {
    /// Render the mode as the familiar `drwxr-xr-x` string.
    fn mode_string(&self) -> String {
        let type_char = match self.kind {
            EntryKind::Directory => 'd',
            EntryKind::Symlink => 'l',
            EntryKind::Socket => 's',
            EntryKind::Fifo => 'p',
            EntryKind::BlockDevice => 'b',
            EntryKind::CharDevice => 'c',
            EntryKind::Regular | EntryKind::Unknown => '-',
        };
        let mut out = String::with_capacity(10);
        out.push(type_char);
        for shift in [6u32, 3, 0] {
            let bits = (self.mode >> shift) & 0o7;
            out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
            out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
            out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
        }
        out
    }
}

impl fmt::Display for FileStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ type: {}, size: {}, mode: {} ({:03o}) }}",
            self.kind.label(),
            self.size,
            self.mode_string(),
            self.mode & 0o777
        )
    }
}

/// Result of a stat probe.
///
/// ENOENT-class outcomes are values, not errors, so "does this exist?" and
/// "could the probe run at all?" stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatOutcome {
    /// The path names nothing.
    Missing,
    /// The path exists with the given metadata.
    Present(FileStat),
}

impl StatOutcome {
    /// Whether the path exists.
    pub fn exists(&self) -> bool {
        matches!(self, StatOutcome::Present(_))
    }

    /// The metadata, if the path exists.
    pub fn stat(&self) -> Option<&FileStat> {
        match self {
            StatOutcome::Present(stat) => Some(stat),
            StatOutcome::Missing => None,
        }
    }
}

/// Stat `path`, resolving it against the base selected by `base` when it is
/// relative. Fails immediately if the base directory cannot be obtained.
pub fn stat_path(path: &str, base: PathBase) -> Result<StatOutcome> {
    if pathname::is_relative(path) {
        let base_dir = match base {
            PathBase::AppDirectory => exec_path::resolve_app_dir()?,
            PathBase::WorkingDirectory => exec_path::working_directory()?,
        };
        stat_at(&base_dir, path)
    } else {
        stat_absolute(Path::new(path))
    }
}

/// Whether `path` names an existing entry, under the same resolution rules
/// as [`stat_path`].
pub fn path_exists(path: &str, base: PathBase) -> Result<bool> {
    Ok(stat_path(path, base)?.exists())
}

/// Interpret an error from the final stat call: ENOENT-class codes mean the
/// path names nothing, everything else is a real failure.
fn classify_stat_error(path: &str, err: std::io::Error) -> Result<StatOutcome> {
    if matches!(err.kind(), std::io::ErrorKind::NotFound) {
        debug!(path, "stat target does not exist");
        return Ok(StatOutcome::Missing);
    }
    #[cfg(unix)]
    if err.raw_os_error() == Some(libc::ENOTDIR) {
        // A non-directory in the middle of the path means the full path
        // cannot name anything either.
        debug!(path, "stat path traverses a non-directory");
        return Ok(StatOutcome::Missing);
    }
    Err(Error::Stat {
        path: path.to_string(),
        source: err,
    })
}

/// Open the base directory for traversal and metadata access only; the
/// descriptor cannot be used to read file data.
#[cfg(target_os = "linux")]
const BASE_DIR_OPEN_FLAGS: libc::c_int = libc::O_PATH | libc::O_DIRECTORY | libc::O_CLOEXEC;

#[cfg(target_os = "macos")]
const BASE_DIR_OPEN_FLAGS: libc::c_int = libc::O_SEARCH | libc::O_CLOEXEC;

#[cfg(any(target_os = "freebsd", target_os = "dragonfly"))]
const BASE_DIR_OPEN_FLAGS: libc::c_int = libc::O_EXEC | libc::O_DIRECTORY | libc::O_CLOEXEC;

#[cfg(all(
    unix,
    not(any(
        target_os = "linux",
        target_os = "macos",
        target_os = "freebsd",
        target_os = "dragonfly"
    ))
))]
const BASE_DIR_OPEN_FLAGS: libc::c_int = libc::O_RDONLY | libc::O_DIRECTORY | libc::O_CLOEXEC;

/// Owned directory descriptor, closed on every exit path.
#[cfg(unix)]
struct DirHandle {
    fd: libc::c_int,
}

#[cfg(unix)]
impl DirHandle {
    fn open(dir: &Path) -> Result<Self> {
        use std::os::unix::ffi::OsStrExt;

        let c_dir = to_cstring(dir.as_os_str().as_bytes()).map_err(|source| {
            Error::OpenBaseDir {
                dir: dir.display().to_string(),
                source,
            }
        })?;
        let fd = unsafe { libc::open(c_dir.as_ptr(), BASE_DIR_OPEN_FLAGS) };
        if fd < 0 {
            return Err(Error::OpenBaseDir {
                dir: dir.display().to_string(),
                source: std::io::Error::last_os_error(),
            });
        }
        Ok(DirHandle { fd })
    }
}

#[cfg(unix)]
impl Drop for DirHandle {
    fn drop(&mut self) {
        unsafe {
            libc::close(self.fd);
        }
    }
}

#[cfg(unix)]
fn to_cstring(bytes: &[u8]) -> std::io::Result<std::ffi::CString> {
    std::ffi::CString::new(bytes).map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "path contains an interior NUL byte",
        )
    })
}

/// Stat `path` relative to an already-known base directory, without
/// following a symlink at the final component.
///
/// This is the race-free seam underneath [`stat_path`]; it is public so
/// callers with their own base directory (including tests) can use the
/// directory-relative semantics directly.
#[cfg(unix)]
pub fn stat_at(base_dir: &Path, path: &str) -> Result<StatOutcome> {
    let dir = DirHandle::open(base_dir)?;
    let c_path = to_cstring(path.as_bytes()).map_err(|source| Error::Stat {
        path: path.to_string(),
        source,
    })?;

    let mut st = std::mem::MaybeUninit::<libc::stat>::zeroed();
    let ret = unsafe {
        libc::fstatat(
            dir.fd,
            c_path.as_ptr(),
            st.as_mut_ptr(),
            libc::AT_SYMLINK_NOFOLLOW,
        )
    };
    if ret != 0 {
        return classify_stat_error(path, std::io::Error::last_os_error());
    }
    let st = unsafe { st.assume_init() };
    Ok(StatOutcome::Present(from_raw_stat(&st)))
}

/// Stat an absolute path directly, without following a final symlink.
#[cfg(unix)]
fn stat_absolute(path: &Path) -> Result<StatOutcome> {
    use std::os::unix::ffi::OsStrExt;

    let display = path.display().to_string();
    let c_path = to_cstring(path.as_os_str().as_bytes()).map_err(|source| Error::Stat {
        path: display.clone(),
        source,
    })?;

    let mut st = std::mem::MaybeUninit::<libc::stat>::zeroed();
    let ret = unsafe { libc::lstat(c_path.as_ptr(), st.as_mut_ptr()) };
    if ret != 0 {
        return classify_stat_error(&display, std::io::Error::last_os_error());
    }
    let st = unsafe { st.assume_init() };
    Ok(StatOutcome::Present(from_raw_stat(&st)))
}

#[cfg(unix)]
fn from_raw_stat(st: &libc::stat) -> FileStat {
    let kind = match st.st_mode & libc::S_IFMT {
        libc::S_IFDIR => EntryKind::Directory,
        libc::S_IFREG => EntryKind::Regular,
        libc::S_IFLNK => EntryKind::Symlink,
        libc::S_IFSOCK => EntryKind::Socket,
        libc::S_IFIFO => EntryKind::Fifo,
        libc::S_IFBLK => EntryKind::BlockDevice,
        libc::S_IFCHR => EntryKind::CharDevice,
        _ => EntryKind::Unknown,
    };
    FileStat {
        kind,
        size: st.st_size.max(0) as u64,
        mode: (st.st_mode as u32) & 0o7777,
    }
}

/// Stat `path` relative to a base directory.
///
/// Windows has no openat-family, so the absolute path is synthesized by
/// concatenation and stat'd directly; the base directory may in principle
/// change between construction and the stat call.
#[cfg(windows)]
pub fn stat_at(base_dir: &Path, path: &str) -> Result<StatOutcome> {
    let full = base_dir.join(path);
    stat_absolute(&full)
}

#[cfg(windows)]
fn stat_absolute(path: &Path) -> Result<StatOutcome> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) => Ok(StatOutcome::Present(from_metadata(&meta))),
        Err(err) => classify_stat_error(&path.display().to_string(), err),
    }
}

#[cfg(windows)]
fn from_metadata(meta: &std::fs::Metadata) -> FileStat {
    let file_type = meta.file_type();
    let kind = if file_type.is_symlink() {
        EntryKind::Symlink
    } else if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::Regular
    } else {
        EntryKind::Unknown
    };
    // Windows has no owner/group/other split; synthesize CRT-style bits
    // from the read-only attribute.
    let mut mode = 0o444;
    if !meta.permissions().readonly() {
        mode |= 0o222;
    }
    if kind == EntryKind::Directory {
        mode |= 0o111;
    }
    FileStat {
        kind,
        size: meta.len(),
        mode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_string_rendering() {
        let stat = FileStat {
            kind: EntryKind::Regular,
            size: 42,
            mode: 0o644,
        };
        assert_eq!(stat.mode_string(), "-rw-r--r--");
        assert_eq!(
            stat.to_string(),
            "{ type: regular, size: 42, mode: -rw-r--r-- (644) }"
        );
    }

    #[test]
    fn test_mode_string_directory() {
        let stat = FileStat {
            kind: EntryKind::Directory,
            size: 4096,
            mode: 0o755,
        };
        assert_eq!(stat.mode_string(), "drwxr-xr-x");
    }

    #[test]
    fn test_outcome_projection() {
        assert!(!StatOutcome::Missing.exists());
        assert!(StatOutcome::Missing.stat().is_none());

        let present = StatOutcome::Present(FileStat {
            kind: EntryKind::Regular,
            size: 0,
            mode: 0o600,
        });
        assert!(present.exists());
        assert_eq!(present.stat().map(|s| s.mode), Some(0o600));
    }

    #[test]
    fn test_stat_path_absolute_root() {
        let sep = if cfg!(windows) { "C:\\" } else { "/" };
        let outcome = stat_path(sep, PathBase::WorkingDirectory).unwrap();
        let stat = outcome.stat().expect("root should exist");
        assert_eq!(stat.kind, EntryKind::Directory);
    }

    #[test]
    fn test_stat_path_missing_is_not_an_error() {
        let outcome = stat_path("definitely_not_here_xyz", PathBase::WorkingDirectory).unwrap();
        assert_eq!(outcome, StatOutcome::Missing);
    }

    #[test]
    fn test_path_exists_agrees_with_stat_path() {
        for path in ["definitely_not_here_xyz", ".", "Cargo.toml"] {
            let exists = path_exists(path, PathBase::WorkingDirectory).unwrap();
            let outcome = stat_path(path, PathBase::WorkingDirectory).unwrap();
            assert_eq!(exists, outcome.exists(), "disagreement for {path:?}");
        }
    }
}
