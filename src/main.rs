//! verselect CLI entry point
//!
//! Parses arguments, dispatches to `cli::run`, prints `CODE: message` to
//! stderr and exits non-zero on failure.

use verselect::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
