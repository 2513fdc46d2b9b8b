// SPDX-License-Identifier: Apache-2.0

//! hg-keyring - keyring-backed HTTP credentials for Mercurial repositories.
//!
//! Runs the credential resolver from the command line and manages the
//! passwords it keeps in the system keyring.

mod cli;
mod commands;
mod errors;
mod logging;
mod output;
mod prompt;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use hgkeyring_core::config;
use tracing::debug;

use crate::cli::{Cli, OutputContext};
use crate::prompt::TerminalPrompt;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", errors::format_error(&e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let output_ctx = OutputContext::from_cli(cli.output);

    let config = config::load_config().context("Failed to load configuration")?;
    debug!(service = %config.keyring.service, "Configuration loaded successfully");

    let allow_prompts = config.ui.interactive && !cli.non_interactive;
    let prompt = Arc::new(TerminalPrompt::new(allow_prompts, cli.verbose));

    commands::run(cli.command, &output_ctx, &config, prompt)
}
