// SPDX-License-Identifier: Apache-2.0

//! Error types for hgkeyring.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Application code should use `anyhow::Result` for top-level error handling.

use thiserror::Error;

/// Errors that can occur while resolving HTTP credentials.
#[derive(Error, Debug)]
pub enum KeyringError {
    /// No credentials could be obtained and the session cannot prompt,
    /// or the prompt produced no usable answer.
    #[error("mercurial_keyring: http authorization required")]
    AuthorizationRequired,

    /// The request URL and the local configuration name different users.
    #[error(
        "mercurial_keyring: username for {url} specified both in repository path ({url_user}) and in .hg/hgrc/[auth] ({config_user}). Please, leave only one of those"
    )]
    ConfigurationConflict {
        /// Username embedded in the request URL.
        url_user: String,
        /// Username configured in the local `[auth]` section.
        config_user: String,
        /// Canonical URL both sources refer to.
        url: String,
    },

    /// The secret store backend could not be read or written.
    #[error("Secret store unavailable: {message}")]
    StoreUnavailable {
        /// Error message from the backend.
        message: String,
    },

    /// Configuration file error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// Terminal interaction failed.
    #[error("Prompt failed: {message}")]
    Prompt {
        /// Error message.
        message: String,
    },
}

impl From<config::ConfigError> for KeyringError {
    fn from(err: config::ConfigError) -> Self {
        KeyringError::Config {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "keyring")]
impl From<keyring::Error> for KeyringError {
    fn from(err: keyring::Error) -> Self {
        KeyringError::StoreUnavailable {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_names_both_users_and_url() {
        let err = KeyringError::ConfigurationConflict {
            url_user: "bob".to_string(),
            config_user: "alice".to_string(),
            url: "https://hg.example.com/repo".to_string(),
        };
        let msg = err.to_string();

        assert!(msg.contains("bob"));
        assert!(msg.contains("alice"));
        assert!(msg.contains("https://hg.example.com/repo"));
    }

    #[test]
    fn test_config_error_conversion() {
        let err: KeyringError = config::ConfigError::Message("bad value".to_string()).into();
        assert!(matches!(err, KeyringError::Config { ref message } if message == "bad value"));
    }
}
