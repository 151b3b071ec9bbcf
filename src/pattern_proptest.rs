//! Property-based tests for URL scrubbing and pattern expansion.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::cache::scrub_url;
    use proptest::prelude::*;

    proptest! {
        /// Property: scrub_url never produces the URL characters that are
        /// unsafe in cache entry names
        #[test]
        fn scrub_url_never_produces_unsafe_chars(input in ".*") {
            let result = scrub_url(&input);
            for ch in ['/', ':', '?'] {
                prop_assert!(
                    !result.contains(ch),
                    "scrub_url produced unsafe character '{}' from input '{}'",
                    ch,
                    input
                );
            }
        }

        /// Property: scrub_url is deterministic (same input = same output)
        #[test]
        fn scrub_url_is_deterministic(input in ".*") {
            prop_assert_eq!(scrub_url(&input), scrub_url(&input));
        }

        /// Property: scrub_url preserves safe characters untouched
        #[test]
        fn scrub_url_preserves_safe_input(input in "[a-zA-Z0-9._-]+") {
            prop_assert_eq!(scrub_url(&input), input);
        }

        /// Property: characters are replaced 1:1, so the character count
        /// never changes
        #[test]
        fn scrub_url_preserves_char_count(input in ".+") {
            prop_assert_eq!(scrub_url(&input).chars().count(), input.chars().count());
        }
    }

    mod find_invariants {
        use crate::pattern::{find, MatchOptions};
        use proptest::prelude::*;
        use std::fs;
        use tempfile::TempDir;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            /// Property: find never returns the root and every match strips
            /// to a non-empty relative path
            #[test]
            fn find_matches_are_strictly_under_root(names in prop::collection::btree_set("[a-z]{1,8}", 1..8)) {
                let temp = TempDir::new().unwrap();
                for name in &names {
                    fs::write(temp.path().join(name), "").unwrap();
                }

                let matches = find(temp.path(), "*", &MatchOptions::default()).unwrap();
                let root = std::path::absolute(temp.path()).unwrap();
                prop_assert_eq!(matches.len(), names.len());
                for item in matches {
                    let relative = item.strip_prefix(&root).unwrap();
                    prop_assert!(!relative.as_os_str().is_empty());
                }
            }
        }
    }
}
