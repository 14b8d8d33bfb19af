//! Query input handling

use crate::SiftError;
use anyhow::{Result, bail};
use siftql_diagnostics::SIFT0401;
use std::io::Read;
use std::path::Path;

/// Load query text from an inline argument, a file, or stdin (`-`)
pub fn read_query(inline: Option<&str>, file: Option<&Path>) -> Result<String> {
    match (inline, file) {
        (Some(_), Some(_)) => bail!("Give the query either inline or via --file, not both"),
        (Some("-"), None) => read_stdin(),
        (Some(text), None) => Ok(text.to_string()),
        (None, Some(path)) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| SiftError::system(SIFT0401, format!("{}: {e}", path.display())))?;
            Ok(text)
        }
        (None, None) => bail!("No query given; pass it inline, via --file, or as `-` for stdin"),
    }
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(SiftError::io)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn inline_text_passes_through() {
        assert_eq!(read_query(Some("{a b}"), None).unwrap(), "{a b}");
    }

    #[test]
    fn reads_query_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ name friends{{ id }} }}").unwrap();

        let text = read_query(None, Some(file.path())).unwrap();
        assert_eq!(text, "{ name friends{ id } }");
    }

    #[test]
    fn missing_file_reports_path_and_code() {
        let err = read_query(None, Some(Path::new("/no/such/query.sift"))).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("SIFT0401"));
        assert!(message.contains("/no/such/query.sift"));
    }

    #[test]
    fn rejects_both_sources() {
        assert!(read_query(Some("{a}"), Some(Path::new("q.sift"))).is_err());
    }

    #[test]
    fn rejects_no_source() {
        assert!(read_query(None, None).is_err());
    }
}
