//! JSON output for the CLI
//!
//! - Output: one JSON object per command on stdout
//! - Logs go to stderr and never interleave with output

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Build the success envelope
fn ok_envelope(data: Value) -> Value {
    serde_json::json!({
        "status": "ok",
        "data": data
    })
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &ok_envelope(data))?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
