// SPDX-License-Identifier: Apache-2.0

//! Command handlers for hg-keyring.

pub mod auth;
pub mod resolve;
pub mod store;
pub mod types;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use hgkeyring_core::{
    AppConfig, LocalAuthLoader, PasswordStore, PromptGatewayRef, SystemKeyring, find_repo_root,
};
use tracing::debug;

use crate::cli::{AuthCommand, Commands, OutputContext, StoreCommand};
use crate::output;

/// Dispatch to the appropriate command handler.
pub fn run(
    command: Commands,
    ctx: &OutputContext,
    config: &AppConfig,
    prompt: PromptGatewayRef,
) -> Result<()> {
    match command {
        Commands::Resolve {
            uri,
            realm,
            repository,
            header,
        } => {
            let loader = LocalAuthLoader::for_repository(repository_root(repository)?);
            let result = resolve::run(
                &uri,
                &realm,
                header,
                system_store(config),
                Arc::new(loader),
                prompt,
            )?;
            output::render(&result, ctx)
        }

        Commands::Store(store_cmd) => {
            let store = system_store(config);
            match store_cmd {
                StoreCommand::Get { url, user } => {
                    let result = store::run_get(&store, &url, &user)?;
                    output::render(&result, ctx)
                }
                StoreCommand::Set { url, user } => {
                    let password = store::read_password()?;
                    let result = store::run_set(&store, &url, &user, &password)?;
                    output::render(&result, ctx)
                }
                StoreCommand::Clear { url, user } => {
                    let result = store::run_clear(&store, &url, &user)?;
                    output::render(&result, ctx)
                }
            }
        }

        Commands::Auth(AuthCommand::Show { uri, repository }) => {
            let loader = LocalAuthLoader::for_repository(repository_root(repository)?);
            let result = auth::run_show(&uri, &loader)?;
            output::render(&result, ctx)
        }
    }
}

/// Password store over the system keyring, under the configured service.
fn system_store(config: &AppConfig) -> PasswordStore {
    PasswordStore::new(Arc::new(SystemKeyring), config.keyring.service.clone())
}

/// Uses the explicit repository root, or discovers one from the working directory.
fn repository_root(explicit: Option<PathBuf>) -> Result<Option<PathBuf>> {
    if explicit.is_some() {
        return Ok(explicit);
    }
    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    let root = find_repo_root(&cwd);
    debug!(root = ?root, "Discovered repository root");
    Ok(root)
}
