//! SiftQL query parser using Winnow
//!
//! Turns query text like `{ user#owner:dict { name friends{ id } } }` into an
//! ordered [`siftql_ast::SelectionSet`]. Parsing is deliberately tolerant:
//! malformed fragments are skipped by the scanning tokenizer, and the only
//! reportable failure is a comment appearing while comments are disallowed.

mod preprocess;
mod selection;

pub use selection::parse;
pub use selection::parse_with_mode;

/// Comment policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentMode {
    /// Strip `//` and `/* */` comments before parsing
    #[default]
    Allow,
    /// Fail when any comment appears in the query text
    Deny,
}
