// SPDX-License-Identifier: Apache-2.0

//! Credential resolution command.

use std::sync::Arc;

use anyhow::Result;
use hgkeyring_core::{
    AuthConfigLoader, CanonicalUrl, CredentialResolver, PasswordStore, PromptGatewayRef,
    basic_header,
};
use secrecy::ExposeSecret;
use tracing::info;

use super::types::ResolveResult;

/// Resolves credentials for one challenge, exactly as a transport would.
pub fn run(
    uri: &str,
    realm: &str,
    header: bool,
    store: PasswordStore,
    auth_config: Arc<dyn AuthConfigLoader>,
    prompt: PromptGatewayRef,
) -> Result<ResolveResult> {
    let mut resolver = CredentialResolver::builder()
        .store(store)
        .auth_config(auth_config)
        .prompt(prompt)
        .build();

    let creds = resolver.resolve(realm, uri)?;
    let url = CanonicalUrl::from_uri(uri);
    info!(url = %url, username = %creds.username, "Resolved credentials");

    let (password, authorization) = if header {
        (None, Some(basic_header(&creds).expose_secret().to_string()))
    } else {
        (Some(creds.password.expose_secret().to_string()), None)
    };

    Ok(ResolveResult {
        url: url.to_string(),
        realm: realm.to_string(),
        username: creds.username,
        password,
        authorization,
    })
}
