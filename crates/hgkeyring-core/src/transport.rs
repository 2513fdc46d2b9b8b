// SPDX-License-Identifier: Apache-2.0

//! Integration point for HTTP transports.
//!
//! A transport receives its credential strategy at construction as a
//! [`PasswordManager`] and calls it for every `401` challenge.
//! [`BasicAuthenticator`] turns those answers into `Authorization` headers.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use crate::resolver::{CredentialResolver, Credentials};

/// Strategy answering HTTP authentication challenges.
pub trait PasswordManager {
    /// Returns credentials for `realm` and the full request URI `auth_uri`.
    fn find_user_password(&mut self, realm: &str, auth_uri: &str) -> crate::Result<Credentials>;
}

impl PasswordManager for CredentialResolver {
    fn find_user_password(&mut self, realm: &str, auth_uri: &str) -> crate::Result<Credentials> {
        self.resolve(realm, auth_uri)
    }
}

/// Extracts the realm from a `WWW-Authenticate` header value.
///
/// Returns an empty realm when the challenge names none. Only a `realm`
/// parameter counts: `xrealm=` and similar names are skipped.
#[must_use]
pub fn parse_realm(challenge: &str) -> String {
    const PARAM: &str = "realm=";

    let Some(start) = challenge
        .match_indices(PARAM)
        .map(|(idx, _)| idx)
        .find(|&idx| {
            challenge[..idx]
                .chars()
                .next_back()
                .is_none_or(|c| c == ',' || c.is_whitespace())
        })
    else {
        return String::new();
    };
    let value = &challenge[start + PARAM.len()..];

    if let Some(quoted) = value.strip_prefix('"') {
        let mut realm = String::new();
        let mut chars = quoted.chars();
        while let Some(c) = chars.next() {
            match c {
                '"' => break,
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        realm.push(escaped);
                    }
                }
                c => realm.push(c),
            }
        }
        realm
    } else {
        value
            .split([',', ' '])
            .next()
            .unwrap_or_default()
            .to_string()
    }
}

/// Answers `Basic` authentication challenges with an injected strategy.
pub struct BasicAuthenticator {
    manager: Box<dyn PasswordManager>,
}

impl BasicAuthenticator {
    /// Creates an authenticator using `manager` for credential lookups.
    #[must_use]
    pub fn new(manager: Box<dyn PasswordManager>) -> Self {
        Self { manager }
    }

    /// Returns the `Authorization` header value answering `challenge` for a
    /// request to `auth_uri`.
    #[instrument(skip_all)]
    pub fn authorization(&mut self, challenge: &str, auth_uri: &str) -> crate::Result<SecretString> {
        let realm = parse_realm(challenge);
        debug!(realm = %realm, "Answering authentication challenge");

        let creds = self.manager.find_user_password(&realm, auth_uri)?;
        Ok(basic_header(&creds))
    }
}

/// Encodes credentials as a `Basic` authorization header value.
#[must_use]
pub fn basic_header(creds: &Credentials) -> SecretString {
    let raw = format!("{}:{}", creds.username, creds.password.expose_secret());
    SecretString::from(format!("Basic {}", STANDARD.encode(raw)))
}
