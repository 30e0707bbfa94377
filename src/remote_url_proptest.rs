//! Property-based tests for the URL helpers.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::remote_url::{repo_dir_name, ssh_remote_url};
    use proptest::prelude::*;

    // ============================================================================
    // ssh_remote_url property tests
    // ============================================================================

    proptest! {
        /// Property: a known scheme is stripped and only the first slash becomes ':'
        #[test]
        fn ssh_remote_url_rewrites_known_schemes(
            scheme in prop::sample::select(vec!["ftp://", "http://", "https://", ""]),
            host in "[a-z][a-z0-9.-]{0,20}",
            path in "[a-zA-Z0-9_./-]{0,30}",
            user in "[a-z]{1,8}",
        ) {
            let url = format!("{}{}/{}", scheme, host, path);
            let result = ssh_remote_url(&url, &user);
            prop_assert_eq!(result, format!("{}@{}:{}", user, host, path));
        }

        /// Property: the result always starts with "<user>@"
        #[test]
        fn ssh_remote_url_prefixes_user(url in ".*", user in "[a-z]{1,8}") {
            let result = ssh_remote_url(&url, &user);
            let expected_prefix = format!("{}@", user);
            prop_assert!(result.starts_with(&expected_prefix));
        }

        /// Property: without any slash after the scheme nothing is replaced
        #[test]
        fn ssh_remote_url_without_slash_is_verbatim(host in "[a-z0-9.:-]{0,20}") {
            let url = format!("https://{}", host);
            prop_assert_eq!(ssh_remote_url(&url, "git"), format!("git@{}", host));
        }
    }

    // ============================================================================
    // repo_dir_name property tests
    // ============================================================================

    proptest! {
        /// Property: repo_dir_name never panics
        #[test]
        fn repo_dir_name_never_panics(url in ".*") {
            let _ = repo_dir_name(&url);
        }

        /// Property: a derived name never contains a path separator
        #[test]
        fn repo_dir_name_is_a_single_segment(url in ".*") {
            if let Ok(name) = repo_dir_name(&url) {
                prop_assert!(!name.contains('/'));
                prop_assert!(!name.is_empty());
                prop_assert!(name != "." && name != "..");
            }
        }

        /// Property: well-formed URLs round-trip their repository name
        #[test]
        fn repo_dir_name_recovers_name(
            base in "https://[a-z]{1,10}\\.com/[a-z]{1,10}",
            name in "[a-zA-Z0-9_-][a-zA-Z0-9_.-]{0,20}",
        ) {
            let url = format!("{}/{}.git", base, name);
            prop_assert_eq!(repo_dir_name(&url).unwrap(), name.as_str());
        }
    }
}
