//! Shared helpers for command handlers.

use std::str::FromStr;

use crate::error::CliError;

/// Parse a numeric record id (`42` or `#42`) from the command line.
pub fn parse_id<T>(field: &str, raw: &str) -> Result<T, CliError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e| CliError::Validation {
        field: field.into(),
        reason: format!("'{raw}' is not a valid id: {e}"),
    })
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}
