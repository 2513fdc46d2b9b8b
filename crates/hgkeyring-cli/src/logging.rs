// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the hg-keyring CLI.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging.
//! Log level can be controlled via the `RUST_LOG` environment variable.
//!
//! The `-v` flag controls the resolver's user-facing debug messages (handled by
//! the terminal prompt). For tracing output, use `RUST_LOG`.
//!
//! # Examples
//!
//! ```bash
//! # Keyring lookups and configuration loading
//! RUST_LOG=hgkeyring_core=debug hg-keyring resolve https://hg.example.com/repo
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Default filter: only warnings unless `RUST_LOG` is set.
const DEFAULT_FILTER: &str = "hgkeyring_core=warn,hgkeyring_cli=warn,hg_keyring=warn";

/// Initialize the logging subsystem.
///
/// Everything goes to stderr so stdout stays clean for credentials and JSON.
pub fn init_logging() {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .expect("valid default filter directives");

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
