// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for hg-keyring.
//!
//! Uses clap's derive API with noun-verb subcommands.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Realm used when a command is not answering a real server challenge.
pub const DEFAULT_REALM: &str = "Mercurial";

/// Output format for CLI results.
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colors (default)
    #[default]
    Text,
    /// JSON output for programmatic consumption
    Json,
}

/// Global output configuration passed to commands.
#[derive(Clone)]
pub struct OutputContext {
    /// Output format (text, json)
    pub format: OutputFormat,
    /// Whether stdout is a terminal (TTY)
    pub is_tty: bool,
}

impl OutputContext {
    /// Creates an `OutputContext` from CLI arguments.
    pub fn from_cli(format: OutputFormat) -> Self {
        Self {
            format,
            is_tty: std::io::stdout().is_terminal(),
        }
    }

    /// Returns true if text output may be styled.
    pub fn use_color(&self) -> bool {
        self.is_tty && matches!(self.format, OutputFormat::Text)
    }
}

/// hg-keyring - keyring-backed HTTP credentials for Mercurial repositories.
///
/// Resolves usernames and passwords the way a Mercurial HTTP transport asks
/// for them, and manages the passwords kept in the system keyring.
#[derive(Parser)]
#[command(name = "hg-keyring")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Output format (text, json)
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    pub output: OutputFormat,

    /// Show resolver debug messages
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Never prompt; fail when credentials are missing
    #[arg(long, global = true)]
    pub non_interactive: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve credentials for a repository URL
    Resolve {
        /// Full request URI, e.g. <https://hg.example.com/repo?cmd=capabilities>
        uri: String,

        /// Authentication realm announced by the server
        #[arg(long, default_value = DEFAULT_REALM)]
        realm: String,

        /// Repository root holding `.hg/keyring.toml` (default: discovered from
        /// the working directory)
        #[arg(long, short = 'R')]
        repository: Option<PathBuf>,

        /// Print the `Authorization` header value instead of the credentials
        #[arg(long)]
        header: bool,
    },

    /// Manage passwords saved in the keyring
    #[command(subcommand)]
    Store(StoreCommand),

    /// Inspect `[auth]` configuration
    #[command(subcommand)]
    Auth(AuthCommand),
}

/// Keyring subcommands
#[derive(Subcommand)]
pub enum StoreCommand {
    /// Print the password saved for a user and repository
    Get {
        /// Repository URL
        #[arg(long)]
        url: String,

        /// Username
        #[arg(long)]
        user: String,
    },

    /// Save a password, read from a hidden prompt or from stdin
    Set {
        /// Repository URL
        #[arg(long)]
        url: String,

        /// Username
        #[arg(long)]
        user: String,
    },

    /// Remove a saved password
    Clear {
        /// Repository URL
        #[arg(long)]
        url: String,

        /// Username
        #[arg(long)]
        user: String,
    },
}

/// Auth configuration subcommands
#[derive(Subcommand)]
pub enum AuthCommand {
    /// Show which `[auth]` group matches a URL in each scope
    Show {
        /// Repository URL
        uri: String,

        /// Repository root holding `.hg/keyring.toml` (default: discovered from
        /// the working directory)
        #[arg(long, short = 'R')]
        repository: Option<PathBuf>,
    },
}
