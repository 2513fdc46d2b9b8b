// SPDX-License-Identifier: Apache-2.0

//! Configuration management for hgkeyring.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables (prefix: `HGKEYRING_`)
//! 2. Config file: `~/.config/hgkeyring/config.toml`
//! 3. Built-in defaults
//!
//! # Examples
//!
//! ```bash
//! # Store passwords under a different keyring service
//! HGKEYRING_KEYRING__SERVICE=hg-work hg-keyring resolve https://hg.example.com/repo
//! ```

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::KeyringError;
use crate::store::DEFAULT_SERVICE;

/// Application configuration.
///
/// `[auth.<group>]` tables in the same file are read by
/// [`ScopedAuthConfig`](crate::ScopedAuthConfig), not here.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Keyring settings.
    pub keyring: KeyringConfig,
    /// Prompt settings.
    pub ui: UiConfig,
}

/// Keyring settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeyringConfig {
    /// Service name passwords are stored under.
    pub service: String,
}

impl Default for KeyringConfig {
    fn default() -> Self {
        Self {
            service: DEFAULT_SERVICE.to_string(),
        }
    }
}

/// Prompt settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Allow interactive prompts when a terminal is available.
    pub interactive: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { interactive: true }
    }
}

/// Returns the hgkeyring configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/hgkeyring`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join("hgkeyring");
    }
    dirs::home_dir()
        .expect("Could not determine home directory - is HOME set?")
        .join(".config")
        .join("hgkeyring")
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load application configuration.
///
/// Loads from config file (if exists) and environment variables.
/// Environment variables use the prefix `HGKEYRING_` and double underscore
/// for nested keys (e.g., `HGKEYRING_UI__INTERACTIVE=false`).
///
/// # Errors
///
/// Returns `KeyringError::Config` if the config file exists but is invalid.
pub fn load_config() -> Result<AppConfig, KeyringError> {
    load_config_from(&config_file_path())
}

/// Load application configuration from an explicit file path.
///
/// # Errors
///
/// Returns `KeyringError::Config` if the file or an environment override is invalid.
pub fn load_config_from(path: &Path) -> Result<AppConfig, KeyringError> {
    let config = Config::builder()
        // Load from config file (optional - may not exist)
        .add_source(File::new(&path.to_string_lossy(), FileFormat::Toml).required(false))
        // Override with environment variables
        .add_source(
            Environment::with_prefix("HGKEYRING")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}
