//! Resolvers supply the raw value for one field
//!
//! A schema answers a field request in three steps: a parent schema may
//! override a nested field through a scoped registry entry, the field itself
//! may carry a resolver binding, and the schema's own registry is consulted
//! by field name. When none of those apply, [`DefaultResolver`] indexes the
//! input data directly.

use crate::field::BoundField;
use async_trait::async_trait;
use siftql_diagnostics::Result;
use siftql_types::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Trait for producing the raw value of a field from input data
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolve the raw value for `field` against `data`
    async fn resolve(&self, field: &BoundField, data: &Value) -> Result<Value>;
}

/// Fallback resolver used when no registered resolver matches
///
/// Falsy input yields null, non-map input passes through unchanged, and map
/// input is indexed by the field name with a missing key yielding null.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResolver;

#[async_trait]
impl Resolver for DefaultResolver {
    async fn resolve(&self, field: &BoundField, data: &Value) -> Result<Value> {
        if !data.is_truthy() {
            return Ok(Value::Null);
        }
        match data {
            Value::Map(map) => Ok(map.get(&field.name).cloned().unwrap_or(Value::Null)),
            other => Ok(other.clone()),
        }
    }
}

/// How a field spec names its resolver
#[derive(Clone)]
pub enum ResolverBinding {
    /// Look the name up in the owning schema's registry at execution time;
    /// a missing entry falls back to the default resolver
    Named(String),
    /// Use this resolver instance as-is
    Direct(Arc<dyn Resolver>),
}

impl fmt::Debug for ResolverBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Direct(_) => f.write_str("Direct(..)"),
        }
    }
}

/// Resolver lookup table, by field name and by (parent field, field) pair
#[derive(Default, Clone)]
pub struct ResolverRegistry {
    by_name: HashMap<String, Arc<dyn Resolver>>,
    scoped: HashMap<String, HashMap<String, Arc<dyn Resolver>>>,
}

impl ResolverRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolver for a field name
    pub fn register(&mut self, field: impl Into<String>, resolver: Arc<dyn Resolver>) {
        self.by_name.insert(field.into(), resolver);
    }

    /// Register a resolver for a field reached through a parent field
    ///
    /// Scoped entries take precedence over everything the nested schema
    /// declares for that field.
    pub fn register_scoped(
        &mut self,
        parent: impl Into<String>,
        field: impl Into<String>,
        resolver: Arc<dyn Resolver>,
    ) {
        self.scoped
            .entry(parent.into())
            .or_default()
            .insert(field.into(), resolver);
    }

    /// Get the resolver registered for a field name
    pub fn get(&self, field: &str) -> Option<&Arc<dyn Resolver>> {
        self.by_name.get(field)
    }

    /// Get the resolver registered for a (parent field, field) pair
    pub fn get_scoped(&self, parent: &str, field: &str) -> Option<&Arc<dyn Resolver>> {
        self.scoped.get(parent).and_then(|fields| fields.get(field))
    }
}
