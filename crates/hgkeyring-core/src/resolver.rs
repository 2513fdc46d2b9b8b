// SPDX-License-Identifier: Apache-2.0

//! HTTP credential resolution.
//!
//! A single push or pull issues many HTTP requests, and the transport asks for
//! credentials on every authentication challenge. [`CredentialResolver`] answers
//! those challenges from, in order:
//!
//! 1. Credentials embedded in the request URL
//! 2. Its in-memory cache (skipped right after a rejected answer)
//! 3. The local `[auth]` configuration
//! 4. The system keyring (skipped right after a rejected answer)
//! 5. An interactive prompt
//!
//! Passwords typed for a username that is fixed in the URL or configuration are
//! saved to the keyring. A typed username cannot be looked up next time, so its
//! password is kept in memory only.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument, warn};

use crate::canonical::{CanonicalUrl, UrlCredentials};
use crate::error::KeyringError;
use crate::local_config::AuthConfigLoader;
use crate::prompt::PromptGatewayRef;
use crate::store::PasswordStore;

/// Username and password returned for an authentication challenge.
#[derive(Clone)]
pub struct Credentials {
    /// Username.
    pub username: String,
    /// Password.
    pub password: SecretString,
}

impl Credentials {
    /// Creates a credential pair.
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    realm: String,
    url: CanonicalUrl,
}

/// The last answer handed out, compared against the next challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LastReply {
    realm: String,
    auth_uri: String,
    username: String,
}

/// Credential resolution state for one logical command.
///
/// Create one resolver per push/pull/clone and feed it every challenge that
/// command produces. `resolve` takes `&mut self`; share a resolver between
/// threads only behind a mutex.
pub struct CredentialResolver {
    store: PasswordStore,
    auth_config: Arc<dyn AuthConfigLoader>,
    prompt: PromptGatewayRef,
    cache: HashMap<CacheKey, Credentials>,
    last_reply: Option<LastReply>,
}

#[bon::bon]
impl CredentialResolver {
    /// Creates a resolver with an empty cache.
    #[builder]
    pub fn new(
        store: PasswordStore,
        auth_config: Arc<dyn AuthConfigLoader>,
        prompt: PromptGatewayRef,
    ) -> Self {
        Self {
            store,
            auth_config,
            prompt,
            cache: HashMap::new(),
            last_reply: None,
        }
    }
}

impl CredentialResolver {
    /// Returns the username and password for an authentication challenge.
    ///
    /// `auth_uri` is the full request URI. Calling this again with the same
    /// `realm` and `auth_uri` as the previous successful call means the server
    /// rejected that answer: cached and stored passwords are then skipped and
    /// the user is asked again.
    ///
    /// # Errors
    ///
    /// - [`KeyringError::ConfigurationConflict`] if the URL and the local
    ///   configuration name different users
    /// - [`KeyringError::AuthorizationRequired`] if a prompt is needed but the
    ///   session is not interactive, or no username was entered
    #[instrument(skip_all, fields(realm = %realm))]
    pub fn resolve(&mut self, realm: &str, auth_uri: &str) -> crate::Result<Credentials> {
        let after_bad_auth = self.last_reply.as_ref().is_some_and(|last| {
            last.realm == realm && last.auth_uri == auth_uri
        });
        if after_bad_auth {
            debug!("Previous answer was rejected, skipping cache and keyring");
            self.prompt
                .debug("Working after bad authentication, cached passwords not used");
        }

        let url = CanonicalUrl::from_uri(auth_uri);
        let UrlCredentials {
            username: url_user,
            password: url_password,
        } = UrlCredentials::from_uri(auth_uri);

        if let (Some(username), Some(password)) = (url_user.as_deref(), url_password) {
            self.prompt
                .debug(&format!("Auth data found in repository URL: {username}, ********"));
            return Ok(self.reply(realm, auth_uri, Credentials::new(username, password)));
        }

        let key = CacheKey {
            realm: realm.to_string(),
            url: url.clone(),
        };
        // The canonical URL carries no userinfo, so a user named in the URL
        // only accepts its own cached entry.
        if !after_bad_auth
            && let Some(cached) = self
                .cache
                .get(&key)
                .filter(|cached| url_user.as_ref().is_none_or(|user| *user == cached.username))
                .cloned()
        {
            self.prompt.debug(&format!(
                "Found cached auth tokens: {}, ********",
                cached.username
            ));
            return Ok(self.reply(realm, auth_uri, cached));
        }

        let mut username = url_user;
        if let Some(fixed) = self.auth_config.load(&url)? {
            if let Some(url_user) = &username
                && *url_user != fixed.username
            {
                return Err(KeyringError::ConfigurationConflict {
                    url_user: url_user.clone(),
                    config_user: fixed.username,
                    url: url.to_string(),
                });
            }
            self.prompt.debug(&format!(
                "Found .hg/keyring.toml auth tokens: {}, {}",
                fixed.username,
                if fixed.password.is_some() { "********" } else { "" }
            ));
            if let Some(password) = fixed.password {
                let creds = Credentials::new(fixed.username, password);
                self.cache.insert(key, creds.clone());
                return Ok(self.reply(realm, auth_uri, creds));
            }
            username = Some(fixed.username);
        }

        if !after_bad_auth
            && let Some(user) = &username
            && let Some(password) = self.stored_password(&url, user)
        {
            self.prompt
                .debug(&format!("Found keyring password for {user}"));
            let creds = Credentials::new(user.clone(), password);
            self.cache.insert(key, creds.clone());
            return Ok(self.reply(realm, auth_uri, creds));
        }

        if !self.prompt.is_interactive() {
            debug!("No credentials found and session is not interactive");
            return Err(KeyringError::AuthorizationRequired);
        }

        let creds = self.ask(realm, username.as_deref())?;

        if username.is_some() {
            self.save_password(&url, &creds);
        } else {
            self.prompt.debug(&format!(
                "Username {} not fixed in URL or configuration, password not saved in keyring",
                creds.username
            ));
        }

        self.cache.insert(key, creds.clone());
        Ok(self.reply(realm, auth_uri, creds))
    }

    /// Reads a non-empty password from the keyring. Read failures are logged
    /// and treated as a miss.
    fn stored_password(&self, url: &CanonicalUrl, username: &str) -> Option<SecretString> {
        match self.store.get(url, username) {
            Ok(password) => password.filter(|p| !p.expose_secret().is_empty()),
            Err(e) => {
                warn!(error = %e, "Keyring lookup failed");
                self.prompt
                    .debug(&format!("Keyring lookup for {username} failed: {e}"));
                None
            }
        }
    }

    fn ask(&self, realm: &str, fixed_user: Option<&str>) -> crate::Result<Credentials> {
        self.prompt.status("http authorization required");
        self.prompt.status(&format!("realm: {realm}"));

        let username = match fixed_user {
            Some(user) => {
                self.prompt.status(&format!("user: {user} (fixed in configuration)"));
                user.to_string()
            }
            None => self.prompt.prompt_username(None)?,
        };
        if username.is_empty() {
            return Err(KeyringError::AuthorizationRequired);
        }

        let password = self.prompt.prompt_password()?;
        Ok(Credentials::new(username, password))
    }

    fn save_password(&self, url: &CanonicalUrl, creds: &Credentials) {
        match self.store.set(url, &creds.username, &creds.password) {
            Ok(()) => self
                .prompt
                .debug(&format!("Saved keyring password for {}", creds.username)),
            Err(e) => {
                warn!(error = %e, "Failed to save password in keyring");
                self.prompt.status(&format!(
                    "warning: password for {} was not saved in the keyring: {e}",
                    creds.username
                ));
            }
        }
    }

    fn reply(&mut self, realm: &str, auth_uri: &str, creds: Credentials) -> Credentials {
        self.last_reply = Some(LastReply {
            realm: realm.to_string(),
            auth_uri: auth_uri.to_string(),
            username: creds.username.clone(),
        });
        creds
    }
}

impl fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialResolver")
            .field("store", &self.store)
            .field("cached", &self.cache.len())
            .field(
                "last_reply",
                &self
                    .last_reply
                    .as_ref()
                    .map(|last| (&last.realm, &last.username)),
            )
            .finish_non_exhaustive()
    }
}
