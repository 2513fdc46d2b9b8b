// SPDX-License-Identifier: Apache-2.0

//! Interactive prompt abstraction.
//!
//! The resolver never touches the terminal directly. Each frontend implements
//! [`PromptGateway`] over its own I/O: the CLI uses `dialoguer`, tests use
//! recording fakes.

use std::sync::Arc;

use secrecy::SecretString;

/// Blocking user interaction used as the last credential source.
///
/// [`is_interactive`](PromptGateway::is_interactive) is always consulted before
/// any prompt method is called.
pub trait PromptGateway: Send + Sync {
    /// Returns `true` if the user can be asked for input.
    fn is_interactive(&self) -> bool;

    /// Asks for a username, offering `default` if given.
    fn prompt_username(&self, default: Option<&str>) -> crate::Result<String>;

    /// Asks for a password without echoing it.
    fn prompt_password(&self) -> crate::Result<SecretString>;

    /// Shows a status message to the user.
    fn status(&self, message: &str);

    /// Shows a debug message when the user asked for verbose output.
    fn debug(&self, message: &str);
}

/// Shared reference to a prompt gateway.
pub type PromptGatewayRef = Arc<dyn PromptGateway>;
