//! Execution pipeline
//!
//! A resolution pass has four steps: bind the requested fields against the
//! capability table, fetch every field's raw value through its resolver,
//! shape each raw value (nested resolution, then cast), and assemble the
//! ordered result keyed by alias. The strategy decides scheduling only; both
//! run the identical protocol. Under the concurrent strategy the fetch step
//! joins all sibling resolutions fail-fast, each writing into its own
//! pre-addressed output slot so request order survives any completion order.

use crate::field::BoundField;
use crate::resolver::{DefaultResolver, Resolver, ResolverBinding};
use crate::schema::{ExecutionStrategy, Schema};
use futures::future::try_join_all;
use log::debug;
use siftql_ast::{SelectionNode, SelectionSet};
use siftql_diagnostics::Result;
use siftql_types::{Value, ValueMap};
use std::sync::Arc;

/// Link from a nested resolution back to the field it hangs off
///
/// Carried down one level so the parent schema's scoped resolver overrides
/// can be consulted first.
#[derive(Clone, Copy)]
pub(crate) struct ParentLink<'a> {
    pub(crate) schema: &'a Schema,
    pub(crate) field: &'a BoundField,
}

impl Schema {
    /// Resolve a selection against input data
    ///
    /// `None` or an empty selection resolves the schema's default field set.
    /// The result preserves request order and is keyed by each field's
    /// alias, falling back to its name.
    pub async fn execute(
        &self,
        selection: Option<&SelectionSet>,
        data: &Value,
    ) -> Result<ValueMap> {
        self.execute_scoped(selection, data, None).await
    }

    pub(crate) async fn execute_scoped(
        &self,
        selection: Option<&SelectionSet>,
        data: &Value,
        parent: Option<ParentLink<'_>>,
    ) -> Result<ValueMap> {
        let fields = self.bind_query_fields(selection)?;
        let raw = self.fetch_fields_data(&fields, data, parent).await?;
        self.prepare_fields_data(&fields, raw).await
    }

    /// Resolve the same selection once per element, in element order
    pub(crate) async fn execute_each(
        &self,
        selection: Option<&SelectionSet>,
        items: &[Value],
        parent: ParentLink<'_>,
    ) -> Result<Vec<Value>> {
        match self.strategy() {
            ExecutionStrategy::Sequential => {
                let mut results = Vec::with_capacity(items.len());
                for item in items {
                    let map = self.execute_scoped(selection, item, Some(parent)).await?;
                    results.push(Value::Map(map));
                }
                Ok(results)
            }
            ExecutionStrategy::Concurrent => {
                let maps = try_join_all(
                    items
                        .iter()
                        .map(|item| self.execute_scoped(selection, item, Some(parent))),
                )
                .await?;
                Ok(maps.into_iter().map(Value::Map).collect())
            }
        }
    }

    /// Bind every requested field that has a matching capability, in request
    /// order; names with no capability are skipped silently
    fn bind_query_fields(&self, selection: Option<&SelectionSet>) -> Result<Vec<BoundField>> {
        let mut bound = Vec::new();

        match selection.filter(|s| !s.is_empty()) {
            Some(selection) => {
                for node in selection.nodes() {
                    match self.field(&node.name) {
                        Some(spec) => bound.push(spec.bind(&node.name, node)?),
                        None => debug!("no capability for field `{}`, skipping", node.name),
                    }
                }
            }
            None => {
                for name in self.default_field_names() {
                    if let Some(spec) = self.field(name) {
                        bound.push(spec.bind(name, &SelectionNode::new(name))?);
                    }
                }
            }
        }

        Ok(bound)
    }

    async fn fetch_fields_data(
        &self,
        fields: &[BoundField],
        data: &Value,
        parent: Option<ParentLink<'_>>,
    ) -> Result<Vec<Value>> {
        match self.strategy() {
            ExecutionStrategy::Sequential => {
                let mut raw = Vec::with_capacity(fields.len());
                for field in fields {
                    let resolver = self.resolver_for(field, parent);
                    raw.push(resolver.resolve(field, data).await?);
                }
                Ok(raw)
            }
            ExecutionStrategy::Concurrent => {
                try_join_all(fields.iter().map(|field| {
                    let resolver = self.resolver_for(field, parent);
                    async move { resolver.resolve(field, data).await }
                }))
                .await
            }
        }
    }

    /// Shape raw values through each field and assemble the keyed result;
    /// shaping runs in request order under both strategies
    async fn prepare_fields_data(
        &self,
        fields: &[BoundField],
        raw: Vec<Value>,
    ) -> Result<ValueMap> {
        let mut result = ValueMap::new();
        for (field, value) in fields.iter().zip(raw) {
            let prepared = field.represent(self, value).await?;
            result.insert(field.response_key().to_string(), prepared);
        }
        Ok(result)
    }

    /// Pick the resolver for one field: the parent schema's scoped override
    /// first, then the field's own binding, then this schema's registry by
    /// field name, then the default resolver
    fn resolver_for(
        &self,
        field: &BoundField,
        parent: Option<ParentLink<'_>>,
    ) -> Arc<dyn Resolver> {
        if let Some(link) = parent {
            if let Some(resolver) = link
                .schema
                .resolvers()
                .get_scoped(&link.field.name, &field.name)
            {
                return Arc::clone(resolver);
            }
        }

        match &field.resolver {
            Some(ResolverBinding::Direct(resolver)) => Arc::clone(resolver),
            // a named binding that resolves to nothing falls straight back
            // to the default, not to the field-name lookup
            Some(ResolverBinding::Named(name)) => default_if_missing(self.resolvers().get(name)),
            None => default_if_missing(self.resolvers().get(&field.name)),
        }
    }
}

fn default_if_missing(found: Option<&Arc<dyn Resolver>>) -> Arc<dyn Resolver> {
    found.cloned().unwrap_or_else(|| Arc::new(DefaultResolver))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldSpec;
    use async_trait::async_trait;

    struct Marker;

    #[async_trait]
    impl Resolver for Marker {
        async fn resolve(&self, _field: &BoundField, _data: &Value) -> Result<Value> {
            Ok(Value::Null)
        }
    }

    fn bound(spec: FieldSpec, name: &str) -> BoundField {
        spec.bind(name, &SelectionNode::new(name)).unwrap()
    }

    #[test]
    fn test_resolver_precedence_scoped_overrides_all() {
        let scoped: Arc<dyn Resolver> = Arc::new(Marker);
        let own: Arc<dyn Resolver> = Arc::new(Marker);

        let parent_schema = Schema::builder()
            .field("friends", FieldSpec::new())
            .scoped_resolver("friends", "name", Arc::clone(&scoped))
            .build();
        let nested = Schema::builder()
            .field("name", FieldSpec::new())
            .resolver("name", Arc::clone(&own))
            .build();

        let friends = bound(FieldSpec::new(), "friends");
        let link = ParentLink {
            schema: &parent_schema,
            field: &friends,
        };

        let name = bound(FieldSpec::new(), "name");
        let picked = nested.resolver_for(&name, Some(link));
        assert!(Arc::ptr_eq(&picked, &scoped));

        let picked = nested.resolver_for(&name, None);
        assert!(Arc::ptr_eq(&picked, &own));
    }

    #[test]
    fn test_resolver_precedence_direct_binding() {
        let direct: Arc<dyn Resolver> = Arc::new(Marker);
        let by_name: Arc<dyn Resolver> = Arc::new(Marker);

        let schema = Schema::builder()
            .field("age", FieldSpec::new().resolver_with(Arc::clone(&direct)))
            .resolver("age", Arc::clone(&by_name))
            .build();

        let age = bound(FieldSpec::new().resolver_with(Arc::clone(&direct)), "age");
        let picked = schema.resolver_for(&age, None);
        assert!(Arc::ptr_eq(&picked, &direct));
    }

    #[test]
    fn test_resolver_missing_named_binding_uses_default() {
        let by_field_name: Arc<dyn Resolver> = Arc::new(Marker);
        let schema = Schema::builder()
            .field("age", FieldSpec::new())
            .resolver("age", Arc::clone(&by_field_name))
            .build();

        // the named binding loses; it does not fall through to the
        // field-name registry entry
        let age = bound(FieldSpec::new().resolver("load_age"), "age");
        let picked = schema.resolver_for(&age, None);
        assert!(!Arc::ptr_eq(&picked, &by_field_name));
    }
}
