// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # hgkeyring Core
//!
//! Credential resolution for HTTP version-control clients, backed by the
//! system keyring.
//!
//! This crate provides reusable components for:
//! - Canonicalizing repository URLs into stable keyring keys
//! - Reading and writing passwords in the platform keyring
//! - Fixed usernames and passwords from `[auth]` configuration
//! - Answering repeated HTTP authentication challenges during one command
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use hgkeyring_core::{
//!     CredentialResolver, LocalAuthLoader, MemoryBackend, PasswordStore, PromptGateway,
//! };
//! use secrecy::SecretString;
//!
//! struct NoTerminal;
//!
//! impl PromptGateway for NoTerminal {
//!     fn is_interactive(&self) -> bool {
//!         false
//!     }
//!     fn prompt_username(&self, _default: Option<&str>) -> hgkeyring_core::Result<String> {
//!         unreachable!()
//!     }
//!     fn prompt_password(&self) -> hgkeyring_core::Result<SecretString> {
//!         unreachable!()
//!     }
//!     fn status(&self, _message: &str) {}
//!     fn debug(&self, _message: &str) {}
//! }
//!
//! # fn example() -> hgkeyring_core::Result<()> {
//! let mut resolver = CredentialResolver::builder()
//!     .store(PasswordStore::new(Arc::new(MemoryBackend::new()), "Mercurial"))
//!     .auth_config(Arc::new(LocalAuthLoader::for_repository(None)))
//!     .prompt(Arc::new(NoTerminal))
//!     .build();
//!
//! let creds = resolver.resolve("Mercurial", "https://alice:pw@hg.example.com/repo")?;
//! assert_eq!(creds.username, "alice");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`canonical`] - URL canonicalization and embedded credentials
//! - [`config`] - Configuration loading and paths
//! - [`error`] - Error types
//! - [`local_config`] - `[auth]` groups and configuration scopes
//! - [`prompt`] - Interactive prompt abstraction
//! - [`resolver`] - Credential resolution state machine
//! - [`store`] - Keyring-backed password store
//! - [`transport`] - HTTP transport integration

// ============================================================================
// Error Handling
// ============================================================================

pub use error::KeyringError;

/// Convenience Result type for keyring operations.
///
/// This is equivalent to `std::result::Result<T, KeyringError>`.
pub type Result<T> = std::result::Result<T, KeyringError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{
    AppConfig, KeyringConfig, UiConfig, config_dir, config_file_path, load_config,
    load_config_from,
};
pub use local_config::{
    AuthConfigLoader, AuthEntry, AuthSection, ConfigScope, FixedAuth, LOCAL_CONFIG_FILE,
    LocalAuthLoader, ScopedAuthConfig, find_repo_root,
};

// ============================================================================
// URLs
// ============================================================================

pub use canonical::{CanonicalUrl, UrlCredentials, canonicalize};

// ============================================================================
// Password Storage
// ============================================================================

#[cfg(feature = "keyring")]
pub use store::SystemKeyring;
pub use store::{DEFAULT_SERVICE, MemoryBackend, PasswordStore, SecretBackend, SecretBackendRef};

// ============================================================================
// Resolution
// ============================================================================

pub use prompt::{PromptGateway, PromptGatewayRef};
pub use resolver::{CredentialResolver, Credentials};
pub use transport::{BasicAuthenticator, PasswordManager, basic_header, parse_realm};

// ============================================================================
// Modules
// ============================================================================

pub mod canonical;
pub mod config;
pub mod error;
pub mod local_config;
pub mod prompt;
pub mod resolver;
pub mod store;
pub mod transport;

#[cfg(test)]
mod testing;
