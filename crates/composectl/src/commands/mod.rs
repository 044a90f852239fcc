//! Command implementations

pub mod api;
pub mod catalog;
pub mod deployment;
pub mod profile;

use crate::error::{ComposectlError, Result as CliResult};
use std::io::{self, BufRead, Write};

/// Ask a yes/no question on stdout; anything but `y`/`yes` declines
pub(crate) fn confirm(prompt: &str) -> CliResult<bool> {
    print!("{} (y/N): ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(is_affirmative(&input))
}

fn is_affirmative(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Wrap an output failure in the CLI error type
pub(crate) fn output_error(err: anyhow::Error) -> ComposectlError {
    ComposectlError::OutputError {
        message: format!("{:#}", err),
    }
}
