// SPDX-License-Identifier: Apache-2.0

//! Result types returned by command handlers.
//!
//! Command handlers return data; the `output` module renders it.

use serde::Serialize;

/// Result from the resolve command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ResolveResult {
    /// Canonical repository URL.
    pub url: String,
    /// Realm the credentials answer.
    pub realm: String,
    /// Resolved username.
    pub username: String,
    /// Resolved password, omitted when only the header was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// `Authorization` header value, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization: Option<String>,
}

/// Result from the store get command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StoredPasswordResult {
    /// Canonical repository URL.
    pub url: String,
    /// Username the password belongs to.
    pub user: String,
    /// Stored password, if any.
    pub password: Option<String>,
}

/// Change made by the store set and clear commands.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreAction {
    /// Password saved.
    Saved,
    /// Password removed.
    Cleared,
}

/// Result from the store set and clear commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StoreUpdateResult {
    /// What was done.
    pub action: StoreAction,
    /// Canonical repository URL.
    pub url: String,
    /// Username the password belongs to.
    pub user: String,
}

/// The `[auth]` group matching a URL in one scope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupMatch {
    /// Group name.
    pub group: String,
    /// Configured prefix.
    pub prefix: Option<String>,
    /// Fixed username, if any.
    pub username: Option<String>,
    /// Whether the group also fixes a password.
    pub has_password: bool,
}

/// Result from the auth show command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AuthShowResult {
    /// Canonical repository URL.
    pub url: String,
    /// Repository root whose local configuration was read.
    pub repository: Option<String>,
    /// Match in the user configuration.
    pub session: Option<GroupMatch>,
    /// Match in the user configuration overlaid with the repository's.
    pub local: Option<GroupMatch>,
}
