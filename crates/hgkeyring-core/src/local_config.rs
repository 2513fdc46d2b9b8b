// SPDX-License-Identifier: Apache-2.0

//! Fixed usernames and passwords from `[auth]` configuration groups.
//!
//! Two configuration scopes exist while a network operation runs:
//!
//! - [`ConfigScope::Session`]: what the operation itself sees, i.e. the
//!   user-level configuration only. It never contains the repository's own
//!   settings.
//! - [`ConfigScope::Local`]: the user-level configuration with the local
//!   clone's `.hg/keyring.toml` layered on top.
//!
//! Credentials are only ever read from the local scope.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::canonical::CanonicalUrl;
use crate::config::config_file_path;

/// Repository-relative path of the local configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".hg/keyring.toml";

/// Scheme matched by auth groups that do not list any.
const DEFAULT_SCHEME: &str = "https";

/// One `[auth.<group>]` entry.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthEntry {
    /// Host and path prefix the group applies to, optionally with a scheme.
    /// `*` matches every host.
    pub prefix: Option<String>,
    /// Fixed username.
    pub username: Option<String>,
    /// Fixed password.
    pub password: Option<String>,
    /// Schemes the group applies to (default: `https`).
    pub schemes: Option<Vec<String>>,
}

impl fmt::Debug for AuthEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthEntry")
            .field("prefix", &self.prefix)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("schemes", &self.schemes)
            .finish()
    }
}

impl AuthEntry {
    /// Returns the length of the matched prefix if this group applies to `url`.
    fn match_len(&self, url: &CanonicalUrl) -> Option<usize> {
        let prefix = self.prefix.as_deref()?;

        let (prefix, scheme_matches) = match prefix.split_once("://") {
            Some((scheme, rest)) => (rest, scheme.eq_ignore_ascii_case(url.scheme())),
            None => {
                let matches = match &self.schemes {
                    Some(schemes) => schemes
                        .iter()
                        .any(|scheme| scheme.eq_ignore_ascii_case(url.scheme())),
                    None => url.scheme() == DEFAULT_SCHEME,
                };
                (prefix, matches)
            }
        };

        if !scheme_matches {
            return None;
        }
        if prefix == "*" || url.host_path().starts_with(prefix) {
            Some(prefix.len())
        } else {
            None
        }
    }
}

/// The `[auth]` groups visible in one configuration scope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthSection {
    auth: BTreeMap<String, AuthEntry>,
}

impl AuthSection {
    /// Creates a section from named groups.
    #[must_use]
    pub fn new(auth: BTreeMap<String, AuthEntry>) -> Self {
        Self { auth }
    }

    /// Returns `true` if the section holds no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.auth.is_empty()
    }

    /// Finds the group that applies to `url`.
    ///
    /// The longest matching prefix wins; on equal length a group with a
    /// username beats one without.
    #[must_use]
    pub fn find(&self, url: &CanonicalUrl) -> Option<(&str, &AuthEntry)> {
        let mut best: Option<(usize, &str, &AuthEntry)> = None;

        for (name, entry) in &self.auth {
            let Some(len) = entry.match_len(url) else {
                continue;
            };
            let better = match best {
                None => true,
                Some((best_len, _, best_entry)) => {
                    len > best_len
                        || (len == best_len
                            && best_entry.username.is_none()
                            && entry.username.is_some())
                }
            };
            if better {
                best = Some((len, name.as_str(), entry));
            }
        }

        best.map(|(_, name, entry)| (name, entry))
    }

    /// Returns the fixed credentials configured for `url`, if a matching group
    /// names a username.
    #[must_use]
    pub fn fixed_auth(&self, url: &CanonicalUrl) -> Option<FixedAuth> {
        let (name, entry) = self.find(url)?;
        let username = entry.username.clone().filter(|user| !user.is_empty())?;
        debug!(group = name, "Matched auth group");

        Some(FixedAuth {
            username,
            password: entry.password.clone().map(SecretString::from),
        })
    }
}

/// Configuration scope a lookup addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// Configuration of the running remote operation. Untrusted for secrets.
    Session,
    /// Configuration of the local clone on disk.
    Local,
}

impl fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigScope::Session => write!(f, "session"),
            ConfigScope::Local => write!(f, "local"),
        }
    }
}

/// Auth groups of both configuration scopes.
#[derive(Debug, Clone, Default)]
pub struct ScopedAuthConfig {
    session: AuthSection,
    local: AuthSection,
}

impl ScopedAuthConfig {
    /// Builds the scopes from already loaded sections.
    #[must_use]
    pub fn from_sections(session: AuthSection, local: AuthSection) -> Self {
        Self { session, local }
    }

    /// Reads both scopes from disk.
    ///
    /// The session scope holds the user configuration; the local scope holds
    /// the user configuration overlaid with `<repo_root>/.hg/keyring.toml`.
    /// Missing files are treated as empty.
    #[instrument]
    pub fn load(user_config: &Path, repo_root: Option<&Path>) -> crate::Result<Self> {
        let session: AuthSection = Config::builder()
            .add_source(toml_file(user_config))
            .build()?
            .try_deserialize()?;

        let mut local = Config::builder().add_source(toml_file(user_config));
        if let Some(root) = repo_root {
            local = local.add_source(toml_file(&root.join(LOCAL_CONFIG_FILE)));
        }
        let local: AuthSection = local.build()?.try_deserialize()?;

        Ok(Self { session, local })
    }

    /// Returns the groups visible in `scope`.
    #[must_use]
    pub fn section(&self, scope: ConfigScope) -> &AuthSection {
        match scope {
            ConfigScope::Session => &self.session,
            ConfigScope::Local => &self.local,
        }
    }
}

fn toml_file(path: &Path) -> File<config::FileSourceFile, FileFormat> {
    File::new(&path.to_string_lossy(), FileFormat::Toml).required(false)
}

/// Username, and optionally password, fixed in configuration for a URL.
#[derive(Clone)]
pub struct FixedAuth {
    /// Fixed username.
    pub username: String,
    /// Fixed password, if configured.
    pub password: Option<SecretString>,
}

impl fmt::Debug for FixedAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedAuth")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .finish()
    }
}

/// Source of fixed credentials for a canonical URL.
pub trait AuthConfigLoader: Send + Sync {
    /// Returns the username (and optional password) configured for `url`.
    fn load(&self, url: &CanonicalUrl) -> crate::Result<Option<FixedAuth>>;
}

/// Reads fixed credentials from the local scope of a repository.
///
/// Files are re-read on every call so edits between operations are picked up.
#[derive(Debug, Clone)]
pub struct LocalAuthLoader {
    user_config: PathBuf,
    repo_root: Option<PathBuf>,
}

impl LocalAuthLoader {
    /// Creates a loader over an explicit user config file and repository root.
    #[must_use]
    pub fn new(user_config: PathBuf, repo_root: Option<PathBuf>) -> Self {
        Self {
            user_config,
            repo_root,
        }
    }

    /// Creates a loader over the default user config file.
    #[must_use]
    pub fn for_repository(repo_root: Option<PathBuf>) -> Self {
        Self::new(config_file_path(), repo_root)
    }

    /// Returns the repository root whose local configuration is read.
    #[must_use]
    pub fn repo_root(&self) -> Option<&Path> {
        self.repo_root.as_deref()
    }

    /// Reads both configuration scopes.
    pub fn scopes(&self) -> crate::Result<ScopedAuthConfig> {
        ScopedAuthConfig::load(&self.user_config, self.repo_root.as_deref())
    }
}

impl AuthConfigLoader for LocalAuthLoader {
    fn load(&self, url: &CanonicalUrl) -> crate::Result<Option<FixedAuth>> {
        Ok(self.scopes()?.section(ConfigScope::Local).fixed_auth(url))
    }
}

/// Finds the root of the repository containing `start`.
///
/// Walks up from `start` to the first directory holding a `.hg` directory.
#[must_use]
pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".hg").is_dir())
        .map(Path::to_path_buf)
}
