//! Output formatting utilities

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

/// Format an error for display
pub fn format_error(error: &anyhow::Error) -> String {
    format!("{} {}", "Error:".red().bold(), error)
}

/// Format a success message for display
pub fn format_success(message: &str) -> String {
    format!("{} {}", "Success:".green().bold(), message)
}

/// Serialize a value to JSON, compact or pretty
///
/// Serializes straight to text; going through `serde_json::Value` would
/// re-sort object keys.
pub fn format_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(value).context("Failed to serialize JSON")
    } else {
        serde_json::to_string(value).context("Failed to serialize JSON")
    }
}
