//! Selection tree nodes
//!
//! A parsed query is an ordered set of selection nodes. Each node names a
//! field, optionally carrying an alias, a declared type tag, parameters, and
//! a nested selection of its own. Insertion order is preserved end to end:
//! the order fields appear in the query text is the order they appear in the
//! result object.

use indexmap::IndexMap;
use serde::Serialize;

/// A single requested field within a selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionNode {
    /// Field name as written in the query
    pub name: String,
    /// Output alias (`field#alias`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Declared type tag (`field:int`); `None` means `auto`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_tag: Option<String>,
    /// Field parameters (`field?key=value&key2=value2`)
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub params: IndexMap<String, String>,
    /// Nested sub-selection (`field{ ... }`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<SelectionSet>,
}

impl SelectionNode {
    /// Create a bare field request with no alias, type, params, or children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            type_tag: None,
            params: IndexMap::new(),
            children: None,
        }
    }

    /// Set the output alias
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Set the declared type tag
    pub fn with_type(mut self, tag: impl Into<String>) -> Self {
        self.type_tag = Some(tag.into());
        self
    }

    /// Add a parameter (later values overwrite earlier ones under the same key)
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Set the nested sub-selection
    pub fn with_children(mut self, children: SelectionSet) -> Self {
        self.children = Some(children);
        self
    }

    /// The key this field occupies in the output: alias if given, else name
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Whether this node carries a non-empty nested selection
    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }
}

/// An ordered set of selection nodes, keyed by response key
///
/// Duplicate response keys within one selection overwrite silently: the last
/// node wins, keeping the first insertion position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SelectionSet {
    entries: IndexMap<String, SelectionNode>,
}

impl SelectionSet {
    /// Create an empty selection set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under its response key
    pub fn insert(&mut self, node: SelectionNode) {
        self.entries.insert(node.response_key().to_string(), node);
    }

    /// Look up a node by response key
    pub fn get(&self, key: &str) -> Option<&SelectionNode> {
        self.entries.get(key)
    }

    /// Whether a response key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Response keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate `(response key, node)` pairs in insertion order
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, SelectionNode> {
        self.entries.iter()
    }

    /// Iterate nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &SelectionNode> {
        self.entries.values()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<SelectionNode> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = SelectionNode>>(iter: I) -> Self {
        let mut set = Self::new();
        for node in iter {
            set.insert(node);
        }
        set
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = (&'a String, &'a SelectionNode);
    type IntoIter = indexmap::map::Iter<'a, String, SelectionNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for SelectionSet {
    type Item = (String, SelectionNode);
    type IntoIter = indexmap::map::IntoIter<String, SelectionNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_key_prefers_alias() {
        let node = SelectionNode::new("user_name").with_alias("name");
        assert_eq!(node.response_key(), "name");
        assert_eq!(SelectionNode::new("id").response_key(), "id");
    }

    #[test]
    fn insertion_order_is_preserved() {
        let set: SelectionSet = ["c", "a", "b"]
            .into_iter()
            .map(SelectionNode::new)
            .collect();
        let keys: Vec<_> = set.keys().collect();
        assert_eq!(keys, vec!["c", "a", "b"]);
    }

    #[test]
    fn duplicate_key_keeps_position_takes_last_node() {
        let mut set = SelectionSet::new();
        set.insert(SelectionNode::new("a"));
        set.insert(SelectionNode::new("b"));
        set.insert(SelectionNode::new("a").with_type("int"));

        let keys: Vec<_> = set.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(set.get("a").unwrap().type_tag.as_deref(), Some("int"));
    }

    #[test]
    fn alias_and_name_do_not_collide() {
        let mut set = SelectionSet::new();
        set.insert(SelectionNode::new("name"));
        set.insert(SelectionNode::new("name").with_alias("label"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut set = SelectionSet::new();
        set.insert(SelectionNode::new("a").with_type("int"));
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["a"]["name"], "a");
        assert_eq!(json["a"]["type_tag"], "int");
    }
}
