//! Filesystem API battery.
//!
//! Exercises the whole path layer end to end: resolve the running binary's
//! own path, decompose it, query the working directory, then drive the
//! existence probe against truths that hold for any installed copy (the
//! binary exists in its own application directory; nonsense names do not).

use sp_common::Result;
use sp_platform::{
    base_name, dir_name, path_exists, resolve_app_base_name, resolve_app_dir,
    resolve_app_file_path, stat_path, working_directory, PathBase,
};
use tracing::{info, warn};

use crate::harness::CheckOutcome;

pub fn filesystem_api() -> Result<CheckOutcome> {
    let mut all = true;

    match resolve_app_file_path() {
        Ok(path) => {
            info!(path = %path.display(), "resolved executable path");

            let as_str = path.to_string_lossy();
            let base = base_name(&as_str);
            info!(%base, "base name");
            all &= !base.is_empty() && base != ".";

            let dir = dir_name(&as_str);
            info!(%dir, "directory name");
            all &= !dir.is_empty() && dir != ".";
        }
        Err(err) => {
            warn!(error = %err, "could not resolve executable path; skipping decomposition");
            all = false;
        }
    }

    match resolve_app_dir() {
        Ok(dir) => info!(dir = %dir.display(), "application directory"),
        Err(err) => {
            warn!(error = %err, "could not resolve application directory");
            all = false;
        }
    }

    let own_name = match resolve_app_base_name() {
        Ok(name) => {
            info!(%name, "application base name");
            Some(name)
        }
        Err(err) => {
            warn!(error = %err, "could not resolve application base name");
            all = false;
            None
        }
    };

    match working_directory() {
        Ok(cwd) => info!(cwd = %cwd.display(), "working directory"),
        Err(err) => {
            warn!(error = %err, "could not query working directory");
            all = false;
        }
    }

    // Existence battery relative to the application directory: the binary
    // itself must be there, the nonsense names must not.
    if let Some(name) = &own_name {
        all &= expect_exists(name, true);
        match stat_path(name, PathBase::AppDirectory) {
            Ok(outcome) => {
                if let Some(stat) = outcome.stat() {
                    info!(path = %name, "{stat}");
                }
            }
            Err(err) => {
                warn!(path = %name, error = %err, "stat failed");
                all = false;
            }
        }
    }
    all &= expect_exists("a_s_d_f_foobar.baz", false);
    all &= expect_exists("idontexist", false);

    Ok(CheckOutcome::new(all))
}

/// Check one path against its expected existence, relative to the
/// application directory. Probe errors count as failures but do not stop
/// the battery.
fn expect_exists(path: &str, expected: bool) -> bool {
    match path_exists(path, PathBase::AppDirectory) {
        Ok(exists) => {
            if exists == expected {
                info!(path, exists, "path existence");
            } else {
                warn!(path, exists, expected, "unexpected path existence");
            }
            exists == expected
        }
        Err(err) => {
            warn!(path, error = %err, "existence probe failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filesystem_api_passes_for_test_binary() {
        let outcome = filesystem_api().unwrap();
        assert!(outcome.passed);
    }

    #[test]
    fn test_expect_exists_detects_missing() {
        assert!(expect_exists("definitely_not_here_xyz", false));
        assert!(!expect_exists("definitely_not_here_xyz", true));
    }
}
