//! Path classification and decomposition.
//!
//! Pure string operations, no I/O, no platform calls. The contract follows
//! basename(3)/dirname(3): degenerate inputs ("" and separator-free names)
//! yield `"."`, the root collapses to itself. Unlike the native calls, every
//! result here is an independently owned `String` — callers never receive a
//! view into their own input.

fn is_separator(c: char) -> bool {
    c == '/' || (cfg!(windows) && c == '\\')
}

/// The root spelled with the input's own separator style.
fn root_of(path: &str) -> String {
    path.chars()
        .next()
        .filter(|&c| is_separator(c))
        .unwrap_or('/')
        .to_string()
}

/// The file-name component of `path`.
///
/// Trailing separators are ignored (`"/usr/lib/"` → `"lib"`); the root maps
/// to itself; empty input maps to `"."`.
pub fn base_name(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let trimmed = path.trim_end_matches(is_separator);
    if trimmed.is_empty() {
        return root_of(path);
    }
    match trimmed.rfind(is_separator) {
        Some(idx) => trimmed[idx + 1..].to_string(),
        None => trimmed.to_string(),
    }
}

/// The directory component of `path`.
///
/// `"/usr/lib"` → `"/usr"`, `"/usr"` → `"/"`, `"usr"` → `"."`, `""` → `"."`.
pub fn dir_name(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let trimmed = path.trim_end_matches(is_separator);
    if trimmed.is_empty() {
        return root_of(path);
    }
    match trimmed.rfind(is_separator) {
        Some(idx) => {
            let parent = trimmed[..idx].trim_end_matches(is_separator);
            if parent.is_empty() {
                root_of(path)
            } else {
                parent.to_string()
            }
        }
        None => ".".to_string(),
    }
}

/// Whether `path` is relative to some base directory.
///
/// A path is relative unless it begins with an absolute-path marker: a
/// leading separator or the home-directory shorthand `~/`.
#[cfg(not(windows))]
pub fn is_relative(path: &str) -> bool {
    !(path.starts_with('/') || path.starts_with("~/"))
}

/// Whether `path` is relative to some base directory.
///
/// Drive-letter paths (`C:...`), UNC paths (`\\server\...`) and
/// root-relative paths (`\foo`) are absolute.
#[cfg(windows)]
pub fn is_relative(path: &str) -> bool {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        return false;
    }
    !bytes.first().is_some_and(|&b| b == b'/' || b == b'\\')
}

/// Append the platform separator unless `path` already ends with one.
pub fn ensure_trailing_separator(path: &str) -> String {
    if path.is_empty() || path.ends_with(is_separator) {
        path.to_string()
    } else {
        format!("{path}{}", std::path::MAIN_SEPARATOR)
    }
}
