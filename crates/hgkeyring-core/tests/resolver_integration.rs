// SPDX-License-Identifier: Apache-2.0

//! Integration tests for `CredentialResolver` over real configuration files.
//!
//! Passwords live in a `MemoryBackend`; `[auth]` groups are read from a
//! temporary user config and repository.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use hgkeyring_core::{
    CredentialResolver, KeyringError, LocalAuthLoader, MemoryBackend, PasswordStore,
    PromptGateway, SecretBackend,
};
use secrecy::{ExposeSecret, SecretString};
use tempfile::TempDir;

/// Prompt answering every password request with a fixed string.
struct TypedPassword {
    password: &'static str,
    asked: Mutex<usize>,
}

impl TypedPassword {
    fn new(password: &'static str) -> Self {
        Self {
            password,
            asked: Mutex::new(0),
        }
    }

    fn asked(&self) -> usize {
        *self.asked.lock().unwrap()
    }
}

impl PromptGateway for TypedPassword {
    fn is_interactive(&self) -> bool {
        true
    }

    fn prompt_username(&self, _default: Option<&str>) -> hgkeyring_core::Result<String> {
        Ok("typed".to_string())
    }

    fn prompt_password(&self) -> hgkeyring_core::Result<SecretString> {
        *self.asked.lock().unwrap() += 1;
        Ok(SecretString::from(self.password))
    }

    fn status(&self, _message: &str) {}

    fn debug(&self, _message: &str) {}
}

struct Fixture {
    dir: TempDir,
    backend: Arc<MemoryBackend>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            backend: Arc::new(MemoryBackend::new()),
        }
    }

    fn user_config(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn repo(&self) -> PathBuf {
        self.dir.path().join("repo")
    }

    fn write_repo_config(&self, contents: &str) {
        write(&self.repo().join(".hg/keyring.toml"), contents);
    }

    fn resolver(&self, prompt: Arc<TypedPassword>) -> CredentialResolver {
        CredentialResolver::builder()
            .store(PasswordStore::new(self.backend.clone(), "Mercurial"))
            .auth_config(Arc::new(LocalAuthLoader::new(
                self.user_config(),
                Some(self.repo()),
            )))
            .prompt(prompt)
            .build()
    }
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn test_fixed_username_round_trips_through_keyring() {
    let fx = Fixture::new();
    fx.write_repo_config("[auth.example]\nprefix = \"hg.example.com\"\nusername = \"alice\"\n");

    // First command: typed once and saved.
    let prompt = Arc::new(TypedPassword::new("secret"));
    let mut resolver = fx.resolver(prompt.clone());
    let creds = resolver
        .resolve("hg", "https://hg.example.com/repo?cmd=capabilities")
        .unwrap();
    assert_eq!(creds.username, "alice");
    assert_eq!(prompt.asked(), 1);
    assert_eq!(
        fx.backend
            .get("Mercurial", "alice@@https://hg.example.com/repo")
            .unwrap()
            .as_deref(),
        Some("secret")
    );

    // Next command: answered from the keyring.
    let prompt = Arc::new(TypedPassword::new("unused"));
    let mut resolver = fx.resolver(prompt.clone());
    let creds = resolver
        .resolve("hg", "https://hg.example.com/repo?cmd=heads")
        .unwrap();
    assert_eq!(creds.password.expose_secret(), "secret");
    assert_eq!(prompt.asked(), 0);
}

#[test]
fn test_local_config_edits_are_picked_up_between_calls() {
    let fx = Fixture::new();
    fx.write_repo_config(
        "[auth.example]\nprefix = \"hg.example.com\"\nusername = \"alice\"\npassword = \"one\"\n",
    );

    let mut resolver = fx.resolver(Arc::new(TypedPassword::new("unused")));
    let first = resolver.resolve("hg", "https://hg.example.com/a").unwrap();
    assert_eq!(first.password.expose_secret(), "one");

    fx.write_repo_config(
        "[auth.example]\nprefix = \"hg.example.com\"\nusername = \"alice\"\npassword = \"two\"\n",
    );
    let other = resolver.resolve("hg", "https://hg.example.com/b").unwrap();
    assert_eq!(other.password.expose_secret(), "two");
}

#[test]
fn test_repository_config_overrides_user_config() {
    let fx = Fixture::new();
    write(
        &fx.user_config(),
        "[auth.example]\nprefix = \"hg.example.com\"\nusername = \"user-level\"\npassword = \"a\"\n",
    );
    fx.write_repo_config("[auth.example]\nusername = \"repo-level\"\n");

    let prompt = Arc::new(TypedPassword::new("typed-pw"));
    let mut resolver = fx.resolver(prompt.clone());
    let creds = resolver.resolve("hg", "https://hg.example.com/r").unwrap();

    // Group keys merge: prefix and password come from the user config.
    assert_eq!(creds.username, "repo-level");
    assert_eq!(creds.password.expose_secret(), "a");
    assert_eq!(prompt.asked(), 0);
}

#[test]
fn test_url_user_conflicting_with_repository_config() {
    let fx = Fixture::new();
    fx.write_repo_config("[auth.example]\nprefix = \"*\"\nusername = \"alice\"\n");

    let mut resolver = fx.resolver(Arc::new(TypedPassword::new("unused")));
    let err = resolver
        .resolve("hg", "https://bob@hg.example.com/r")
        .unwrap_err();

    assert!(matches!(err, KeyringError::ConfigurationConflict { .. }));
}
