//! Subcommand implementations.

pub mod call;
pub mod classify;
pub mod tools;

use std::io::Write;

use serde_json::Value;

/// How a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The tool answered with an error result.
    Rejected,
}

/// Write a JSON value to stdout, pretty-printed.
fn print_json(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
