// SPDX-License-Identifier: Apache-2.0

//! Password persistence in a key/value secret store.
//!
//! Passwords are keyed by `"{username}@@{canonical url}"` under a fixed service
//! name, so entries written by earlier keyring extensions stay readable.
//! The backend itself (macOS Keychain, Windows Credential Manager, or the
//! Secret Service on Linux) sits behind [`SecretBackend`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, instrument};

use crate::canonical::CanonicalUrl;
use crate::error::KeyringError;

/// Default keyring service name.
pub const DEFAULT_SERVICE: &str = "Mercurial";

/// Separator between username and URL in keyring keys.
pub const KEY_SEPARATOR: &str = "@@";

/// Key/value storage for secrets, addressed by service and key.
pub trait SecretBackend: Send + Sync {
    /// Reads the secret stored under `key`, or `None` if there is no entry.
    fn get(&self, service: &str, key: &str) -> crate::Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous entry.
    fn set(&self, service: &str, key: &str, value: &str) -> crate::Result<()>;

    /// Removes the entry stored under `key`. Removing a missing entry succeeds.
    fn delete(&self, service: &str, key: &str) -> crate::Result<()>;
}

/// Shared reference to a secret backend.
pub type SecretBackendRef = Arc<dyn SecretBackend>;

/// Derives the keyring key for a username and repository URL.
#[must_use]
pub fn format_key(url: &CanonicalUrl, username: &str) -> String {
    format!("{username}{KEY_SEPARATOR}{url}")
}

/// Saves and restores repository passwords in a secret backend.
#[derive(Clone)]
pub struct PasswordStore {
    backend: SecretBackendRef,
    service: String,
}

impl PasswordStore {
    /// Creates a store over `backend` using the given service name.
    pub fn new(backend: SecretBackendRef, service: impl Into<String>) -> Self {
        Self {
            backend,
            service: service.into(),
        }
    }

    /// Returns the service name entries are stored under.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Looks up the password saved for `username` at `url`.
    ///
    /// A stored empty string is returned as `Some`; callers decide whether an
    /// empty password counts as usable.
    #[instrument(skip(self, url), fields(url = %url))]
    pub fn get(&self, url: &CanonicalUrl, username: &str) -> crate::Result<Option<SecretString>> {
        let key = format_key(url, username);
        let password = self.backend.get(&self.service, &key)?;
        debug!(found = password.is_some(), "Keyring lookup");
        Ok(password.map(SecretString::from))
    }

    /// Saves `password` for `username` at `url`.
    #[instrument(skip(self, url, password), fields(url = %url))]
    pub fn set(&self, url: &CanonicalUrl, username: &str, password: &SecretString) -> crate::Result<()> {
        let key = format_key(url, username);
        self.backend
            .set(&self.service, &key, password.expose_secret())?;
        info!("Password saved in keyring");
        Ok(())
    }

    /// Deletes the password saved for `username` at `url`.
    #[instrument(skip(self, url), fields(url = %url))]
    pub fn clear(&self, url: &CanonicalUrl, username: &str) -> crate::Result<()> {
        let key = format_key(url, username);
        self.backend.delete(&self.service, &key)?;
        info!("Password removed from keyring");
        Ok(())
    }
}

impl std::fmt::Debug for PasswordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordStore")
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}

/// Secret backend using the platform keyring through the `keyring` crate.
#[cfg(feature = "keyring")]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemKeyring;

#[cfg(feature = "keyring")]
impl SystemKeyring {
    fn entry(service: &str, key: &str) -> Result<keyring::Entry, KeyringError> {
        Ok(keyring::Entry::new(service, key)?)
    }
}

#[cfg(feature = "keyring")]
impl SecretBackend for SystemKeyring {
    fn get(&self, service: &str, key: &str) -> crate::Result<Option<String>> {
        match Self::entry(service, key)?.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, service: &str, key: &str, value: &str) -> crate::Result<()> {
        Self::entry(service, key)?.set_password(value)?;
        Ok(())
    }

    fn delete(&self, service: &str, key: &str) -> crate::Result<()> {
        match Self::entry(service, key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory secret backend.
///
/// Entries live as long as the backend; nothing is persisted.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<(String, String), String>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> crate::Result<MutexGuard<'_, HashMap<(String, String), String>>> {
        self.entries.lock().map_err(|e| KeyringError::StoreUnavailable {
            message: format!("memory backend lock poisoned: {e}"),
        })
    }
}

impl SecretBackend for MemoryBackend {
    fn get(&self, service: &str, key: &str) -> crate::Result<Option<String>> {
        Ok(self
            .lock()?
            .get(&(service.to_string(), key.to_string()))
            .cloned())
    }

    fn set(&self, service: &str, key: &str, value: &str) -> crate::Result<()> {
        self.lock()?
            .insert((service.to_string(), key.to_string()), value.to_string());
        Ok(())
    }

    fn delete(&self, service: &str, key: &str) -> crate::Result<()> {
        self.lock()?
            .remove(&(service.to_string(), key.to_string()));
        Ok(())
    }
}
