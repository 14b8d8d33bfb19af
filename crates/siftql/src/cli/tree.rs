//! Tree command implementation

use super::{input, output};
use crate::{CommentMode, parse_with_mode};
use anyhow::Result;
use std::path::PathBuf;

/// Configuration for the tree command
pub struct TreeConfig {
    pub query: Option<String>,
    pub file: Option<PathBuf>,
    pub no_comments: bool,
    pub pretty: bool,
}

/// Parse a query and print its selection tree as JSON
pub fn run(config: TreeConfig) -> Result<()> {
    let text = input::read_query(config.query.as_deref(), config.file.as_deref())?;
    let mode = if config.no_comments {
        CommentMode::Deny
    } else {
        CommentMode::Allow
    };

    let tree = parse_with_mode(&text, mode)?;
    println!("{}", output::format_json(&tree, config.pretty)?);
    Ok(())
}
