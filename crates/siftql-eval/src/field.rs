//! Field specs and bound fields
//!
//! A [`FieldSpec`] is a schema capability: the declared cast rule, resolver
//! binding, default params, and optional nested schema for one field name.
//! Binding merges a spec with one [`SelectionNode`] into a [`BoundField`],
//! the per-call descriptor handed to resolvers. Bound fields are built fresh
//! for every `execute` call and never cached across passes.

use crate::engine::ParentLink;
use crate::resolver::{Resolver, ResolverBinding};
use crate::schema::Schema;
use futures::FutureExt;
use futures::future::BoxFuture;
use indexmap::IndexMap;
use siftql_ast::{SelectionNode, SelectionSet};
use siftql_diagnostics::{BoxError, Result, SIFT0100, SiftError};
use siftql_types::{CastRule, Value};
use std::fmt;
use std::sync::Arc;

/// A nested schema reference on a field spec
///
/// The lazy form defers construction until bind time, which lets a schema
/// reference itself (a `friends` field resolving through its own schema).
#[derive(Clone)]
pub enum NestedSchema {
    /// An already-built schema
    Direct(Arc<Schema>),
    /// A schema built on demand at bind time
    Lazy(Arc<dyn Fn() -> Arc<Schema> + Send + Sync>),
}

impl NestedSchema {
    pub(crate) fn materialize(&self) -> Arc<Schema> {
        match self {
            Self::Direct(schema) => Arc::clone(schema),
            Self::Lazy(build) => build(),
        }
    }
}

impl fmt::Debug for NestedSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(_) => f.write_str("Direct(..)"),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

/// A declared capability of a schema
#[derive(Default, Clone)]
pub struct FieldSpec {
    cast: CastRule,
    resolver: Option<ResolverBinding>,
    default_params: IndexMap<String, String>,
    nested: Option<NestedSchema>,
    default_selection: Option<SelectionSet>,
}

impl FieldSpec {
    /// Create a spec with no coercion and no resolver binding
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a spec with a preset cast tag
    ///
    /// # Panics
    ///
    /// Panics when the tag is not part of the cast vocabulary. A schema
    /// declaring an unknown tag is a configuration error, unlike an unknown
    /// tag in query text which surfaces as a binding error.
    pub fn typed(tag: &str) -> Self {
        match CastRule::from_tag(tag) {
            Some(cast) => Self {
                cast,
                ..Self::default()
            },
            None => panic!("unknown type tag `{tag}`"),
        }
    }

    /// Create a spec with a custom cast function
    pub fn custom_cast(
        cast: impl Fn(Value) -> std::result::Result<Value, BoxError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            cast: CastRule::custom(cast),
            ..Self::default()
        }
    }

    /// Bind the field to a named resolver, looked up in the owning schema's
    /// registry per call
    pub fn resolver(mut self, name: impl Into<String>) -> Self {
        self.resolver = Some(ResolverBinding::Named(name.into()));
        self
    }

    /// Bind the field to a resolver instance directly
    pub fn resolver_with(mut self, resolver: Arc<dyn Resolver>) -> Self {
        self.resolver = Some(ResolverBinding::Direct(resolver));
        self
    }

    /// Add a default parameter, used when the query declares none
    pub fn default_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_params.insert(key.into(), value.into());
        self
    }

    /// Resolve this field through a nested schema
    pub fn nested(mut self, schema: Arc<Schema>) -> Self {
        self.nested = Some(NestedSchema::Direct(schema));
        self
    }

    /// Resolve this field through a nested schema built on demand
    pub fn nested_with(mut self, build: impl Fn() -> Arc<Schema> + Send + Sync + 'static) -> Self {
        self.nested = Some(NestedSchema::Lazy(Arc::new(build)));
        self
    }

    /// Declare the sub-selection used when the query supplies an empty one
    pub fn default_selection(mut self, selection: SelectionSet) -> Self {
        self.default_selection = Some(selection);
        self
    }

    /// Merge this spec with one selection node into a bound field
    ///
    /// The node's tag, params, and sub-selection each override the spec's
    /// defaults wholesale when present; an unknown node tag is a binding
    /// error attributed to the field.
    pub(crate) fn bind(&self, name: &str, node: &SelectionNode) -> Result<BoundField> {
        let cast = match node.type_tag.as_deref() {
            Some(tag) => CastRule::from_tag(tag).ok_or_else(|| {
                SiftError::binding_in(SIFT0100, format!("Unknown type tag `{tag}`"), name)
            })?,
            None => self.cast.clone(),
        };

        let params = if node.params.is_empty() {
            self.default_params.clone()
        } else {
            node.params.clone()
        };

        let selection = if node.has_children() {
            node.children.clone()
        } else {
            self.default_selection.clone()
        };

        Ok(BoundField {
            name: name.to_string(),
            alias: node.alias.clone(),
            cast,
            resolver: self.resolver.clone(),
            nested: self.nested.as_ref().map(NestedSchema::materialize),
            params,
            selection,
        })
    }
}

/// One field of a resolution pass, produced by [`FieldSpec::bind`]
///
/// Resolvers receive this descriptor alongside the input data; params carry
/// the query-supplied (or default) arguments for the field.
#[derive(Clone)]
pub struct BoundField {
    /// Field name as declared on the schema
    pub name: String,
    /// Output alias from the query, if any
    pub alias: Option<String>,
    /// Coercion applied to the resolved value
    pub cast: CastRule,
    /// Query params, or the spec defaults when the query declared none
    pub params: IndexMap<String, String>,
    pub(crate) resolver: Option<ResolverBinding>,
    pub(crate) nested: Option<Arc<Schema>>,
    pub(crate) selection: Option<SelectionSet>,
}

impl BoundField {
    /// The key this field's value is stored under in the result
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Get a param value
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Shape a resolved raw value into its final form
    ///
    /// Null short-circuits before anything else: no nested resolution and no
    /// cast run for an absent value. Otherwise the nested schema (if any)
    /// resolves the sub-selection, fanning out over list and set elements,
    /// and the cast rule is applied last.
    pub(crate) fn represent<'a>(
        &'a self,
        owner: &'a Schema,
        value: Value,
    ) -> BoxFuture<'a, Result<Value>> {
        async move {
            if matches!(value, Value::Null) {
                return Ok(Value::Null);
            }

            let value = match &self.nested {
                Some(nested) => self.resolve_nested(owner, nested, value).await?,
                None => value,
            };

            if self.cast.is_auto() {
                Ok(value)
            } else {
                self.cast.apply(value)
            }
        }
        .boxed()
    }

    async fn resolve_nested(
        &self,
        owner: &Schema,
        nested: &Arc<Schema>,
        value: Value,
    ) -> Result<Value> {
        let parent = ParentLink {
            schema: owner,
            field: self,
        };
        match value {
            Value::List(items) | Value::Set(items) => {
                let results = nested
                    .execute_each(self.selection.as_ref(), &items, parent)
                    .await?;
                Ok(Value::List(results))
            }
            other => {
                let result = nested
                    .execute_scoped(self.selection.as_ref(), &other, Some(parent))
                    .await?;
                Ok(Value::Map(result))
            }
        }
    }
}

impl fmt::Debug for BoundField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundField")
            .field("name", &self.name)
            .field("alias", &self.alias)
            .field("cast", &self.cast)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
