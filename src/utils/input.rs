use crate::error::{AppError, CliError};
use std::io::{self, Write};

/// Ask the user to confirm a destructive action. Anything other than an
/// explicit yes declines.
pub fn confirm(prompt: &str) -> Result<bool, AppError> {
    print!("{} [y/N]: ", prompt);
    io::stdout().flush().map_err(|e| {
        AppError::Cli(CliError::InvalidArguments(format!(
            "Failed to flush stdout: {}",
            e
        )))
    })?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer).map_err(|e| {
        AppError::Cli(CliError::InvalidArguments(format!(
            "Failed to read confirmation: {}",
            e
        )))
    })?;

    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
