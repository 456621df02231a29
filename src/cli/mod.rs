//! CLI module for verselect
//!
//! Provides command-line interface for:
//! - encode / decode: composite key tokens
//! - selections: items linked to a factory
//! - candidates: item picker search
//! - serve: HTTP picker API

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{candidates, decode, encode, run, run_command, selections, serve};
pub use errors::{CliError, CliResult};
pub use io::write_response;
