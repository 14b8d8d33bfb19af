//! Execute command implementation

use super::{input, output};
use crate::{
    CommentMode, ExecutionStrategy, FieldSpec, Schema, SelectionSet, SiftError, Value,
    parse_with_mode,
};
use anyhow::Result;
use log::debug;
use siftql_diagnostics::{SIFT0401, SIFT0402};
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration for the execute command
pub struct ExecuteConfig {
    pub query: Option<String>,
    pub file: Option<PathBuf>,
    pub data: PathBuf,
    pub no_comments: bool,
    pub concurrent: bool,
    pub pretty: bool,
}

/// Execute a query against a JSON data file
///
/// The schema is synthesized from the selection itself: every requested
/// field resolves by key lookup in the data, and nested selections recurse
/// the same way. Aliases, query-level casts, and list fan-out apply as
/// usual.
pub async fn run(config: ExecuteConfig) -> Result<()> {
    let text = input::read_query(config.query.as_deref(), config.file.as_deref())?;
    let mode = if config.no_comments {
        CommentMode::Deny
    } else {
        CommentMode::Allow
    };
    let selection = parse_with_mode(&text, mode)?;

    let data = load_data(&config.data)?;

    let strategy = if config.concurrent {
        ExecutionStrategy::Concurrent
    } else {
        ExecutionStrategy::Sequential
    };
    let schema = mirror_schema(&selection, strategy);
    debug!("mirrored schema over {} top-level field(s)", selection.len());

    let result = schema.execute(Some(&selection), &data).await?;
    println!(
        "{}",
        output::format_json(&Value::Map(result), config.pretty)?
    );
    Ok(())
}

fn load_data(path: &PathBuf) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| SiftError::system(SIFT0401, format!("{}: {e}", path.display())))?;
    let data = serde_json::from_str(&raw).map_err(|e| {
        SiftError::system(SIFT0402, format!("invalid JSON in {}: {e}", path.display()))
    })?;
    Ok(data)
}

/// Build a schema mirroring the selection shape
fn mirror_schema(selection: &SelectionSet, strategy: ExecutionStrategy) -> Arc<Schema> {
    let mut builder = Schema::builder().strategy(strategy);
    for node in selection.nodes() {
        let spec = match node.children.as_ref().filter(|c| !c.is_empty()) {
            Some(children) => FieldSpec::new().nested(mirror_schema(children, strategy)),
            None => FieldSpec::new(),
        };
        builder = builder.field(&node.name, spec);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn mirror_covers_every_requested_field() {
        let selection = parse("{a b{x y} c}").unwrap();
        let schema = mirror_schema(&selection, ExecutionStrategy::Sequential);

        let names: Vec<_> = schema.field_names().collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn executes_nested_selection_over_json() {
        let selection = parse("{name friends{id}}").unwrap();
        let data: Value = serde_json::from_str(
            r#"{"name":"ada","friends":[{"id":1,"name":"grace"},{"id":2,"name":"alan"}]}"#,
        )
        .unwrap();

        let schema = mirror_schema(&selection, ExecutionStrategy::Sequential);
        let result = schema.execute(Some(&selection), &data).await.unwrap();

        assert_eq!(result["name"], Value::from("ada"));
        let rendered = serde_json::to_string(&result["friends"]).unwrap();
        assert_eq!(rendered, r#"[{"id":1},{"id":2}]"#);
    }

    #[test]
    fn invalid_data_file_reports_code() {
        let err = load_data(&PathBuf::from("/no/such/data.json")).unwrap_err();
        assert!(err.to_string().contains("SIFT0401"));
    }
}
