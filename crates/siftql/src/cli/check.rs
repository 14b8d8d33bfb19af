//! Check command implementation

use super::{input, output};
use crate::{CommentMode, parse_with_mode};
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Configuration for the check command
pub struct CheckConfig {
    pub query: Option<String>,
    pub file: Option<PathBuf>,
    pub no_comments: bool,
}

/// Parse a query and report the outcome
pub fn run(config: CheckConfig) -> Result<()> {
    let text = input::read_query(config.query.as_deref(), config.file.as_deref())?;
    let mode = if config.no_comments {
        CommentMode::Deny
    } else {
        CommentMode::Allow
    };

    match parse_with_mode(&text, mode) {
        Ok(tree) => {
            println!(
                "{}",
                output::format_success(&format!("parsed {} top-level field(s)", tree.len()))
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {e}", "Check failed:".red().bold());
            std::process::exit(1);
        }
    }
}
