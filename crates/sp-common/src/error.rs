//! Error types for sysprobe.
//!
//! Two classes of outcome are kept strictly apart throughout the workspace:
//!
//! - **OS/runtime failures** — a platform primitive (syscall, library call,
//!   allocation) failed. These become [`Error`] values carrying the OS error
//!   code and a message, and are propagated to the caller.
//! - **Semantic negatives** — "path does not exist", "host unreachable",
//!   "feature unsupported". These are *successfully computed results* and
//!   are never represented as errors; they travel as ordinary values
//!   (`StatOutcome::Missing`, `Reachability::Unreachable`, a `false` check).
//!
//! Error codes are stable and grouped by category for machine parsing.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for sysprobe operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Executable path resolution errors.
    Path,
    /// Filesystem stat errors.
    Stat,
    /// Host identity errors.
    Identity,
    /// Network resolution and socket errors.
    Network,
    /// General I/O errors.
    Io,
    /// Platform compatibility errors.
    Platform,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Path => write!(f, "path"),
            ErrorCategory::Stat => write!(f, "stat"),
            ErrorCategory::Identity => write!(f, "identity"),
            ErrorCategory::Network => write!(f, "network"),
            ErrorCategory::Io => write!(f, "io"),
            ErrorCategory::Platform => write!(f, "platform"),
        }
    }
}

/// Unified error type for sysprobe.
#[derive(Error, Debug)]
pub enum Error {
    // Path errors (10-19)
    #[error("could not resolve executable path: {0}")]
    ExecPath(#[source] std::io::Error),

    #[error("executable path still truncated after {attempts} grow attempts")]
    ExecPathTruncated { attempts: u32 },

    // Stat errors (20-29)
    #[error("could not determine base directory: {0}")]
    BaseDir(#[source] std::io::Error),

    #[error("could not open base directory '{dir}': {source}")]
    OpenBaseDir {
        dir: String,
        source: std::io::Error,
    },

    #[error("stat failed for '{path}': {source}")]
    Stat {
        path: String,
        source: std::io::Error,
    },

    // Identity errors (30-39)
    #[error("hostname query failed: {0}")]
    Hostname(#[source] std::io::Error),

    #[error("hostname query returned an empty name")]
    EmptyHostname,

    #[error("OS identity query failed: {0}")]
    Identity(#[source] std::io::Error),

    // Network errors (40-49)
    #[error("address resolution failed for {host}:{port}: {source}")]
    Resolve {
        host: String,
        port: u16,
        source: std::io::Error,
    },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Platform errors (70-79)
    #[error("operation not supported on this platform: {0}")]
    UnsupportedPlatform(&'static str),
}

impl Error {
    /// Returns the stable error code for this error type.
    ///
    /// Codes are grouped by category:
    /// - 10-19: path resolution
    /// - 20-29: stat
    /// - 30-39: identity
    /// - 40-49: network
    /// - 60-69: I/O
    /// - 70-79: platform
    pub fn code(&self) -> u32 {
        match self {
            Error::ExecPath(_) => 10,
            Error::ExecPathTruncated { .. } => 11,
            Error::BaseDir(_) => 20,
            Error::OpenBaseDir { .. } => 21,
            Error::Stat { .. } => 22,
            Error::Hostname(_) => 30,
            Error::EmptyHostname => 31,
            Error::Identity(_) => 32,
            Error::Resolve { .. } => 40,
            Error::Io(_) => 60,
            Error::UnsupportedPlatform(_) => 70,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::ExecPath(_) | Error::ExecPathTruncated { .. } => ErrorCategory::Path,

            Error::BaseDir(_) | Error::OpenBaseDir { .. } | Error::Stat { .. } => {
                ErrorCategory::Stat
            }

            Error::Hostname(_) | Error::EmptyHostname | Error::Identity(_) => {
                ErrorCategory::Identity
            }

            Error::Resolve { .. } => ErrorCategory::Network,

            Error::Io(_) => ErrorCategory::Io,

            Error::UnsupportedPlatform(_) => ErrorCategory::Platform,
        }
    }

    /// Returns the raw OS error code (errno / GetLastError) if this error
    /// originated in a failing platform primitive.
    pub fn os_code(&self) -> Option<i32> {
        match self {
            Error::ExecPath(e)
            | Error::BaseDir(e)
            | Error::OpenBaseDir { source: e, .. }
            | Error::Stat { source: e, .. }
            | Error::Hostname(e)
            | Error::Identity(e)
            | Error::Resolve { source: e, .. }
            | Error::Io(e) => e.raw_os_error(),
            Error::ExecPathTruncated { .. }
            | Error::EmptyHostname
            | Error::UnsupportedPlatform(_) => None,
        }
    }
}
