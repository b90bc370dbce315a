//! Property-based tests for the path classifier.
//!
//! Uses proptest to verify that classification is pure, idempotent, and
//! never degenerates to empty output across many random inputs.

use proptest::prelude::*;
use sp_platform::{base_name, dir_name, ensure_trailing_separator, is_relative};

/// Path components without separators or NULs.
fn component() -> impl Strategy<Value = String> {
    "[A-Za-z0-9._-]{1,12}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Classification is pure: the same input always yields the same output.
    #[test]
    fn classifier_is_pure(path in "[A-Za-z0-9._/ -]{0,64}") {
        prop_assert_eq!(base_name(&path), base_name(&path));
        prop_assert_eq!(dir_name(&path), dir_name(&path));
        prop_assert_eq!(is_relative(&path), is_relative(&path));
    }

    /// base_name never returns an empty string, whatever the input.
    #[test]
    fn base_name_never_empty(path in "[A-Za-z0-9._/ -]{0,64}") {
        prop_assert!(!base_name(&path).is_empty());
        prop_assert!(!dir_name(&path).is_empty());
    }

    /// base_name is idempotent: classifying a classified name is a no-op.
    #[test]
    fn base_name_idempotent(path in "[A-Za-z0-9._/ -]{0,64}") {
        let once = base_name(&path);
        prop_assert_eq!(base_name(&once), once.clone());
    }

    /// The last component of a joined path is the joined name.
    #[test]
    fn join_then_split_recovers_name(dir in component(), name in component()) {
        let joined = format!("{}{}", ensure_trailing_separator(&dir), name);
        prop_assert_eq!(base_name(&joined), name);
        prop_assert_eq!(dir_name(&joined), dir);
    }

    /// Separator-free names are relative and are their own base name.
    #[test]
    fn bare_names_are_relative(name in component()) {
        prop_assert!(is_relative(&name));
        prop_assert_eq!(base_name(&name), name.clone());
        prop_assert_eq!(dir_name(&name), ".".to_string());
    }
}
