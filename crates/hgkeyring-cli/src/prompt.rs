// SPDX-License-Identifier: Apache-2.0

//! Terminal implementation of the prompt gateway.

use std::io::IsTerminal;

use console::style;
use dialoguer::{Input, Password};
use hgkeyring_core::error::KeyringError;
use hgkeyring_core::prompt::PromptGateway;
use secrecy::SecretString;

/// Prompts on the controlling terminal with `dialoguer`.
///
/// Prompts and status messages go to stderr.
pub struct TerminalPrompt {
    interactive: bool,
    verbose: bool,
}

impl TerminalPrompt {
    /// Creates a gateway that prompts only when stdin and stderr are terminals
    /// and `allow_prompts` is set.
    pub fn new(allow_prompts: bool, verbose: bool) -> Self {
        let has_terminal = std::io::stdin().is_terminal() && std::io::stderr().is_terminal();
        Self {
            interactive: allow_prompts && has_terminal,
            verbose,
        }
    }
}

fn prompt_error(err: &dialoguer::Error) -> KeyringError {
    KeyringError::Prompt {
        message: err.to_string(),
    }
}

impl PromptGateway for TerminalPrompt {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn prompt_username(&self, default: Option<&str>) -> hgkeyring_core::Result<String> {
        let mut input = Input::<String>::new().with_prompt("user").allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(|e| prompt_error(&e))
    }

    fn prompt_password(&self) -> hgkeyring_core::Result<SecretString> {
        Password::new()
            .with_prompt("password")
            .allow_empty_password(true)
            .interact()
            .map(SecretString::from)
            .map_err(|e| prompt_error(&e))
    }

    fn status(&self, message: &str) {
        eprintln!("{message}");
    }

    fn debug(&self, message: &str) {
        if self.verbose {
            eprintln!("{}", style(format!("[hgkeyring] {message}")).dim());
        }
    }
}
