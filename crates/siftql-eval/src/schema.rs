//! Schemas declare capabilities and resolvers
//!
//! A [`Schema`] is the immutable capability table for one level of the data
//! shape: field name to [`FieldSpec`], plus the resolver registry and the
//! execution strategy. Schemas are built once through [`SchemaBuilder`],
//! shared behind `Arc`, and never mutated by a resolution pass.

use crate::field::FieldSpec;
use crate::resolver::{Resolver, ResolverRegistry};
use indexmap::IndexMap;
use std::sync::Arc;

/// How a schema schedules the field resolutions of one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// One field at a time, in request order
    #[default]
    Sequential,
    /// All sibling fields fetched together and joined before shaping;
    /// nested list elements likewise resolve together
    Concurrent,
}

/// A capability table plus resolvers for one level of the data shape
pub struct Schema {
    fields: IndexMap<String, FieldSpec>,
    resolvers: ResolverRegistry,
    default_fields: Option<Vec<String>>,
    strategy: ExecutionStrategy,
}

impl Schema {
    /// Start building a schema
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// The execution strategy resolutions of this schema run under
    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    /// Declared field names, in registration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Whether the schema declares a field
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub(crate) fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    pub(crate) fn resolvers(&self) -> &ResolverRegistry {
        &self.resolvers
    }

    /// The field names resolved when a selection requests nothing specific:
    /// the declared default list, or every capability in registration order
    pub(crate) fn default_field_names(&self) -> Vec<&str> {
        match &self.default_fields {
            Some(names) => names.iter().map(String::as_str).collect(),
            None => self.fields.keys().map(String::as_str).collect(),
        }
    }
}

/// Builder for [`Schema`]
#[derive(Default)]
pub struct SchemaBuilder {
    fields: IndexMap<String, FieldSpec>,
    resolvers: ResolverRegistry,
    default_fields: Option<Vec<String>>,
    strategy: ExecutionStrategy,
}

impl SchemaBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a capability
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.insert(name.into(), spec);
        self
    }

    /// Register a resolver for a field name
    pub fn resolver(mut self, field: impl Into<String>, resolver: Arc<dyn Resolver>) -> Self {
        self.resolvers.register(field, resolver);
        self
    }

    /// Register a resolver override for a field reached through one of this
    /// schema's own fields
    pub fn scoped_resolver(
        mut self,
        parent: impl Into<String>,
        field: impl Into<String>,
        resolver: Arc<dyn Resolver>,
    ) -> Self {
        self.resolvers.register_scoped(parent, field, resolver);
        self
    }

    /// Declare the fields resolved when a selection requests nothing
    /// specific, instead of every capability
    pub fn default_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_fields = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Set the execution strategy
    pub fn strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Finish the schema
    pub fn build(self) -> Arc<Schema> {
        Arc::new(Schema {
            fields: self.fields,
            resolvers: self.resolvers,
            default_fields: self.default_fields,
            strategy: self.strategy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_registration_order() {
        let schema = Schema::builder()
            .field("zeta", FieldSpec::new())
            .field("alpha", FieldSpec::new())
            .field("mid", FieldSpec::new())
            .build();

        let names: Vec<_> = schema.field_names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(schema.default_field_names(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_declared_default_fields() {
        let schema = Schema::builder()
            .field("x", FieldSpec::new())
            .field("y", FieldSpec::new())
            .default_fields(["x"])
            .build();

        assert_eq!(schema.default_field_names(), vec!["x"]);
        assert!(schema.has_field("y"));
    }

    #[test]
    fn test_redeclared_field_replaces_spec() {
        let schema = Schema::builder()
            .field("x", FieldSpec::new())
            .field("x", FieldSpec::typed("int"))
            .build();

        let names: Vec<_> = schema.field_names().collect();
        assert_eq!(names, vec!["x"]);
    }
}
