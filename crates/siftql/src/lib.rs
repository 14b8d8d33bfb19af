//! SiftQL: a compact query language for selecting fields from nested data
//!
//! A query names the fields it wants, optionally aliasing (`#`), casting
//! (`:`), parameterizing (`?k=v`), and recursing into them (`{ ... }`):
//!
//! ```text
//! { user_name#name age:int friends?limit=3{ id name } }
//! ```
//!
//! Parsing produces an ordered selection tree; a [`Schema`] resolves that
//! tree against host data and returns an ordered map keyed by alias.
//!
//! # Example
//!
//! ```ignore
//! use siftql::{parse, FieldSpec, Schema};
//!
//! let selection = parse("{ user_name#name age:int }")?;
//!
//! let schema = Schema::builder()
//!     .field("user_name", FieldSpec::new())
//!     .field("age", FieldSpec::new())
//!     .build();
//!
//! let result = schema.execute(Some(&selection), &data).await?;
//! ```

// Re-export all public APIs from internal crates
pub use siftql_ast as ast;
pub use siftql_diagnostics as diagnostics;
pub use siftql_eval as eval;
pub use siftql_parser as parser;
pub use siftql_types as types;

// Convenience re-exports
pub use siftql_ast::{SelectionNode, SelectionSet};
pub use siftql_diagnostics::{Result, SiftError};
pub use siftql_eval::{BoundField, ExecutionStrategy, FieldSpec, Resolver, Schema, SchemaBuilder};
pub use siftql_parser::{CommentMode, parse, parse_with_mode};
pub use siftql_types::{CastRule, CastTag, Value, ValueMap};

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
