// SPDX-License-Identifier: Apache-2.0

//! Recording fakes for the resolver's collaborators.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use secrecy::SecretString;

use crate::canonical::CanonicalUrl;
use crate::error::KeyringError;
use crate::local_config::{AuthConfigLoader, FixedAuth};
use crate::prompt::PromptGateway;
use crate::resolver::CredentialResolver;
use crate::store::{DEFAULT_SERVICE, MemoryBackend, PasswordStore, SecretBackend, format_key};

/// In-memory backend that counts reads and records writes.
#[derive(Default)]
pub(crate) struct RecordingBackend {
    inner: MemoryBackend,
    get_calls: AtomicUsize,
    sets: Mutex<Vec<(String, String)>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl RecordingBackend {
    pub(crate) fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn sets(&self) -> Vec<(String, String)> {
        self.sets.lock().unwrap().clone()
    }

    pub(crate) fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    fn unavailable() -> KeyringError {
        KeyringError::StoreUnavailable {
            message: "keyring locked".to_string(),
        }
    }
}

impl SecretBackend for RecordingBackend {
    fn get(&self, service: &str, key: &str) -> crate::Result<Option<String>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        self.inner.get(service, key)
    }

    fn set(&self, service: &str, key: &str, value: &str) -> crate::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        self.sets
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_string()));
        self.inner.set(service, key, value)
    }

    fn delete(&self, service: &str, key: &str) -> crate::Result<()> {
        self.inner.delete(service, key)
    }
}

/// Local config returning a fixed answer for every URL.
pub(crate) struct FakeAuthConfig {
    fixed: Option<(String, Option<String>)>,
    broken: bool,
    loads: AtomicUsize,
}

impl FakeAuthConfig {
    pub(crate) fn none() -> Self {
        Self {
            fixed: None,
            broken: false,
            loads: AtomicUsize::new(0),
        }
    }

    pub(crate) fn fixed(username: &str, password: Option<&str>) -> Self {
        Self {
            fixed: Some((username.to_string(), password.map(str::to_string))),
            ..Self::none()
        }
    }

    pub(crate) fn broken() -> Self {
        Self {
            broken: true,
            ..Self::none()
        }
    }

    pub(crate) fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl AuthConfigLoader for FakeAuthConfig {
    fn load(&self, _url: &CanonicalUrl) -> crate::Result<Option<FixedAuth>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.broken {
            return Err(KeyringError::Config {
                message: "invalid keyring.toml".to_string(),
            });
        }
        Ok(self.fixed.as_ref().map(|(username, password)| FixedAuth {
            username: username.clone(),
            password: password.clone().map(SecretString::from),
        }))
    }
}

/// Prompt answering from scripted queues and recording what it showed.
pub(crate) struct FakePrompt {
    interactive: bool,
    usernames: Mutex<VecDeque<String>>,
    passwords: Mutex<VecDeque<String>>,
    username_prompts: AtomicUsize,
    password_prompts: AtomicUsize,
    statuses: Mutex<Vec<String>>,
}

impl FakePrompt {
    fn with_interactive(interactive: bool) -> Self {
        Self {
            interactive,
            usernames: Mutex::default(),
            passwords: Mutex::default(),
            username_prompts: AtomicUsize::new(0),
            password_prompts: AtomicUsize::new(0),
            statuses: Mutex::default(),
        }
    }

    pub(crate) fn interactive() -> Self {
        Self::with_interactive(true)
    }

    pub(crate) fn non_interactive() -> Self {
        Self::with_interactive(false)
    }

    pub(crate) fn answering(username: &str, password: &str) -> Self {
        let prompt = Self::interactive();
        prompt.push_answer(username, password);
        prompt
    }

    pub(crate) fn push_answer(&self, username: &str, password: &str) {
        self.usernames
            .lock()
            .unwrap()
            .push_back(username.to_string());
        self.push_password(password);
    }

    pub(crate) fn push_password(&self, password: &str) {
        self.passwords
            .lock()
            .unwrap()
            .push_back(password.to_string());
    }

    pub(crate) fn username_prompts(&self) -> usize {
        self.username_prompts.load(Ordering::SeqCst)
    }

    pub(crate) fn password_prompts(&self) -> usize {
        self.password_prompts.load(Ordering::SeqCst)
    }

    pub(crate) fn prompt_calls(&self) -> usize {
        self.username_prompts() + self.password_prompts()
    }

    pub(crate) fn statuses(&self) -> Vec<String> {
        self.statuses.lock().unwrap().clone()
    }

    fn no_answer() -> KeyringError {
        KeyringError::Prompt {
            message: "no scripted answer left".to_string(),
        }
    }
}

impl PromptGateway for FakePrompt {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn prompt_username(&self, _default: Option<&str>) -> crate::Result<String> {
        assert!(self.interactive, "prompted in a non-interactive session");
        self.username_prompts.fetch_add(1, Ordering::SeqCst);
        self.usernames
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(Self::no_answer)
    }

    fn prompt_password(&self) -> crate::Result<SecretString> {
        assert!(self.interactive, "prompted in a non-interactive session");
        self.password_prompts.fetch_add(1, Ordering::SeqCst);
        self.passwords
            .lock()
            .unwrap()
            .pop_front()
            .map(SecretString::from)
            .ok_or_else(Self::no_answer)
    }

    fn status(&self, message: &str) {
        self.statuses.lock().unwrap().push(message.to_string());
    }

    fn debug(&self, _message: &str) {}
}

/// Fakes wired into a resolver, kept around for assertions.
pub(crate) struct Harness {
    pub(crate) backend: Arc<RecordingBackend>,
    pub(crate) config: Arc<FakeAuthConfig>,
    pub(crate) prompt: Arc<FakePrompt>,
}

impl Harness {
    pub(crate) fn new(config: FakeAuthConfig, prompt: FakePrompt) -> Self {
        Self {
            backend: Arc::new(RecordingBackend::default()),
            config: Arc::new(config),
            prompt: Arc::new(prompt),
        }
    }

    /// Seeds the backend without recording a write.
    pub(crate) fn store_password(&self, uri: &str, username: &str, password: &str) {
        let key = format_key(&CanonicalUrl::from_uri(uri), username);
        self.backend
            .inner
            .set(DEFAULT_SERVICE, &key, password)
            .unwrap();
    }

    pub(crate) fn resolver(&self) -> CredentialResolver {
        CredentialResolver::builder()
            .store(PasswordStore::new(self.backend.clone(), DEFAULT_SERVICE))
            .auth_config(self.config.clone())
            .prompt(self.prompt.clone())
            .build()
    }
}
