// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `KeyringError` and appends a hint for each
//! error kind. The library keeps structured error data; presentation lives here.

use anyhow::Error;
use hgkeyring_core::error::KeyringError;
use hgkeyring_core::local_config::LOCAL_CONFIG_FILE;

/// Formats an error for CLI display with helpful hints.
///
/// If the error is not a `KeyringError`, returns the original error chain.
pub fn format_error(error: &Error) -> String {
    let Some(keyring_err) = error.downcast_ref::<KeyringError>() else {
        return format!("{error:#}");
    };

    match keyring_err {
        KeyringError::AuthorizationRequired => format!(
            "{keyring_err}\n\nTip: Run from a terminal to be prompted, or put the username in the URL or in {LOCAL_CONFIG_FILE}."
        ),
        KeyringError::ConfigurationConflict { .. } => format!(
            "{keyring_err}\n\nTip: Remove the username from the URL or from the [auth] group in {LOCAL_CONFIG_FILE}."
        ),
        KeyringError::StoreUnavailable { .. } => format!(
            "{keyring_err}\n\nTip: Your system keyring may be locked. Try unlocking it and try again."
        ),
        KeyringError::Config { .. } => format!(
            "{keyring_err}\n\nTip: Check your config file at {} and {LOCAL_CONFIG_FILE} in the repository.",
            hgkeyring_core::config::config_file_path().display()
        ),
        KeyringError::Prompt { .. } => keyring_err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_authorization_required() {
        let err = anyhow::Error::new(KeyringError::AuthorizationRequired);
        let formatted = format_error(&err);

        assert!(formatted.starts_with("mercurial_keyring: http authorization required"));
        assert!(formatted.contains("Tip:"));
    }

    #[test]
    fn test_format_conflict_keeps_both_usernames() {
        let err = anyhow::Error::new(KeyringError::ConfigurationConflict {
            url_user: "bob".to_string(),
            config_user: "alice".to_string(),
            url: "https://h/p".to_string(),
        });
        let formatted = format_error(&err);

        assert!(formatted.contains("bob"));
        assert!(formatted.contains("alice"));
        assert!(formatted.contains(LOCAL_CONFIG_FILE));
    }

    #[test]
    fn test_format_store_unavailable() {
        let err = anyhow::Error::new(KeyringError::StoreUnavailable {
            message: "locked".to_string(),
        });
        assert!(format_error(&err).contains("keyring may be locked"));
    }

    #[test]
    fn test_format_other_error_keeps_context() {
        let err = anyhow::anyhow!("inner").context("outer");
        assert_eq!(format_error(&err), "outer: inner");
    }
}
