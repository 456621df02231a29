//! CLI argument definitions using clap
//!
//! Commands:
//! - verselect encode --id <id> [--version <name>]
//! - verselect decode <token>
//! - verselect selections --catalog <path> --factory <id> [--factory-version <name>] [--context <name>]
//! - verselect candidates --catalog <path> [--term <text>] [--scope <name>]
//! - verselect serve --catalog <path>
//!
//! Every command accepts `--config <path>`; defaults apply without one.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// verselect - composite version keys and many-to-many selectors
#[derive(Parser, Debug)]
#[command(name = "verselect")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode an (id, version) pair into a composite key token
    Encode {
        /// Entity identity
        #[arg(long)]
        id: u64,

        /// Version name; empty for the default version
        #[arg(long, default_value = "")]
        version: String,
    },

    /// Decode a composite key token
    Decode {
        /// Token to decode
        token: String,
    },

    /// List the items currently linked to a factory
    Selections {
        /// Path to catalog fixture
        #[arg(long)]
        catalog: PathBuf,

        /// Factory identity
        #[arg(long)]
        factory: u64,

        /// Factory version; empty for the default version
        #[arg(long, default_value = "")]
        factory_version: String,

        /// Resolve as a reader browsing this version instead of listing all versions
        #[arg(long)]
        context: Option<String>,
    },

    /// List item picker candidates
    Candidates {
        /// Path to catalog fixture
        #[arg(long)]
        catalog: PathBuf,

        /// Search keyword
        #[arg(long)]
        term: Option<String>,

        /// Scope name; the default scope when omitted
        #[arg(long)]
        scope: Option<String>,
    },

    /// Serve the picker API over HTTP
    Serve {
        /// Path to catalog fixture
        #[arg(long)]
        catalog: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
