//! SiftQL resolution engine
//!
//! Resolves a parsed selection against host-supplied data. A [`Schema`]
//! declares its capabilities as [`FieldSpec`]s and registers [`Resolver`]s;
//! [`Schema::execute`] binds the requested fields, fetches raw values,
//! shapes them (nested resolution, then cast), and returns an ordered map
//! keyed by alias.
//!
//! # Example
//!
//! ```ignore
//! use siftql_eval::{FieldSpec, Schema};
//!
//! let schema = Schema::builder()
//!     .field("name", FieldSpec::new())
//!     .field("age", FieldSpec::typed("int"))
//!     .build();
//!
//! let result = schema.execute(Some(&selection), &data).await?;
//! ```
//!
//! # Concurrency
//!
//! Each schema carries an [`ExecutionStrategy`]. Sequential resolves one
//! field at a time in request order; Concurrent fetches all sibling fields
//! together and fans out over nested list elements, joining fail-fast.
//! Request order is preserved in the result either way.

pub mod engine;
pub mod field;
pub mod resolver;
pub mod schema;

pub use field::{BoundField, FieldSpec, NestedSchema};
pub use resolver::{DefaultResolver, Resolver, ResolverBinding, ResolverRegistry};
pub use schema::{ExecutionStrategy, Schema, SchemaBuilder};
