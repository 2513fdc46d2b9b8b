// SPDX-License-Identifier: Apache-2.0

//! Auth configuration inspection command.

use anyhow::{Context, Result};
use hgkeyring_core::{AuthSection, CanonicalUrl, ConfigScope, LocalAuthLoader};

use super::types::{AuthShowResult, GroupMatch};

/// Shows which `[auth]` group matches `uri` in each configuration scope.
pub fn run_show(uri: &str, loader: &LocalAuthLoader) -> Result<AuthShowResult> {
    let url = CanonicalUrl::from_uri(uri);
    let scopes = loader
        .scopes()
        .context("Failed to read [auth] configuration")?;

    Ok(AuthShowResult {
        url: url.to_string(),
        repository: loader
            .repo_root()
            .map(|root| root.display().to_string()),
        session: group_match(scopes.section(ConfigScope::Session), &url),
        local: group_match(scopes.section(ConfigScope::Local), &url),
    })
}

fn group_match(section: &AuthSection, url: &CanonicalUrl) -> Option<GroupMatch> {
    section.find(url).map(|(group, entry)| GroupMatch {
        group: group.to_string(),
        prefix: entry.prefix.clone(),
        username: entry.username.clone(),
        has_password: entry.password.is_some(),
    })
}
