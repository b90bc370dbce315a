//! Portable abstractions over OS path, identity, and network primitives.
//!
//! Each operation in this crate has divergent, non-obvious behavior per
//! platform (Linux/BSD/macOS/Windows) that is unified behind one contract:
//!
//! - [`exec_path`] — resolve the running executable's own absolute path,
//!   with a bounded grow-and-retry protocol for truncation-prone OS APIs
//! - [`pathname`] — pure path decomposition and relative/absolute
//!   classification
//! - [`stat`] — filesystem metadata relative to a caller-selected base
//!   directory, race-free where the platform allows it
//! - [`host`] — hostname and the uname identity tuple, synthesized on
//!   platforms without a native combined call
//! - [`inet`] — outbound connectivity probing with bounded timeouts
//! - [`sysres`] — free disk space and logical CPU count
//!
//! Everything is single-threaded, synchronous, and blocking. Semantic
//! negatives ("path does not exist", "host unreachable") are ordinary
//! values; errors are reserved for failing platform primitives.

pub mod exec_path;
pub mod host;
pub mod inet;
pub mod pathname;
pub mod stat;
pub mod sysres;

pub use exec_path::{
    resolve_app_base_name, resolve_app_dir, resolve_app_file_path, working_directory,
};
pub use host::{host_identity, host_name, HostIdentity};
pub use inet::{check_connectivity, ConnectivityOptions, Reachability};
pub use pathname::{base_name, dir_name, ensure_trailing_separator, is_relative};
pub use stat::{path_exists, stat_at, stat_path, EntryKind, FileStat, PathBase, StatOutcome};
pub use sysres::{cpu_count, free_disk_space};
