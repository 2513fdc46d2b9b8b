// SPDX-License-Identifier: Apache-2.0

//! Keyring management commands.

use std::io::{BufRead, IsTerminal};

use anyhow::{Context, Result, bail};
use dialoguer::Password;
use hgkeyring_core::{CanonicalUrl, PasswordStore};
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use super::types::{StoreAction, StoreUpdateResult, StoredPasswordResult};

/// Reads the password for `store set`.
///
/// Prompts twice without echo on a terminal, otherwise reads one line from stdin.
pub fn read_password() -> Result<SecretString> {
    let password = if std::io::stdin().is_terminal() {
        Password::new()
            .with_prompt("password")
            .with_confirmation("repeat password", "passwords do not match")
            .interact()
            .context("Failed to read password")?
    } else {
        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read password from stdin")?;
        line.trim_end_matches(['\r', '\n']).to_string()
    };

    if password.is_empty() {
        bail!("Refusing to store an empty password");
    }
    Ok(SecretString::from(password))
}

/// Returns the password stored for `user` at `url`.
pub fn run_get(store: &PasswordStore, url: &str, user: &str) -> Result<StoredPasswordResult> {
    let url = CanonicalUrl::from_uri(url);
    let password = store.get(&url, user)?;

    Ok(StoredPasswordResult {
        url: url.to_string(),
        user: user.to_string(),
        password: password.map(|p| p.expose_secret().to_string()),
    })
}

/// Saves `password` for `user` at `url`.
pub fn run_set(
    store: &PasswordStore,
    url: &str,
    user: &str,
    password: &SecretString,
) -> Result<StoreUpdateResult> {
    let url = CanonicalUrl::from_uri(url);
    store.set(&url, user, password)?;
    info!(url = %url, user, "Saved password");

    Ok(StoreUpdateResult {
        action: StoreAction::Saved,
        url: url.to_string(),
        user: user.to_string(),
    })
}

/// Removes the password for `user` at `url`.
pub fn run_clear(store: &PasswordStore, url: &str, user: &str) -> Result<StoreUpdateResult> {
    let url = CanonicalUrl::from_uri(url);
    store.clear(&url, user)?;
    info!(url = %url, user, "Cleared password");

    Ok(StoreUpdateResult {
        action: StoreAction::Cleared,
        url: url.to_string(),
        user: user.to_string(),
    })
}
