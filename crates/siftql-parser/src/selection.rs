//! Field grammar
//!
//! The body text is consumed by a scanning loop: at each position we try to
//! match a complete field and otherwise advance one character, so malformed
//! fragments are dropped silently instead of failing the parse. A field is
//!
//! ```text
//! name(#alias)?(:tag)?(?key=value&key2=value2)?({ nested fields })?
//! ```
//!
//! Subqueries recurse into the same field list with `}` closing the nested
//! scope, which keeps brace nesting exact. A field whose subquery block never
//! closes is kept without the subquery and scanning resumes after its head.

use crate::CommentMode;
use crate::preprocess::{contains_comment, extract_body, strip_comments};
use indexmap::IndexMap;
use log::debug;
use siftql_ast::{SelectionNode, SelectionSet};
use siftql_diagnostics::{Result, SIFT0001, SiftError};
use winnow::combinator::{opt, preceded, separated};
use winnow::error::ErrMode;
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

pub(crate) type Input<'a> = &'a str;
pub(crate) type PResult<T> = winnow::ModalResult<T>;

/// Parse a query with comments allowed
pub fn parse(query: &str) -> Result<SelectionSet> {
    parse_with_mode(query, CommentMode::default())
}

/// Parse a query under an explicit comment policy
///
/// Fails only when comments appear under [`CommentMode::Deny`]; any other
/// input yields a selection set, possibly empty.
pub fn parse_with_mode(query: &str, mode: CommentMode) -> Result<SelectionSet> {
    let text = match mode {
        CommentMode::Allow => strip_comments(query),
        CommentMode::Deny => {
            if contains_comment(query) {
                return Err(SiftError::parse(SIFT0001, "Comments not allowed", query));
            }
            query.to_string()
        }
    };

    let selection = scan_fields(extract_body(&text));
    debug!("parsed {} top-level fields", selection.len());
    Ok(selection)
}

/// Scan the whole body, skipping anything that is not a field
fn scan_fields(body: &str) -> SelectionSet {
    let mut input: Input<'_> = body;
    let mut set = SelectionSet::new();

    while !input.is_empty() {
        match field.parse_next(&mut input) {
            Ok(node) => set.insert(node),
            Err(_) => skip_char(&mut input),
        }
    }

    set
}

/// Scan a nested field list; `}` ends the scope instead of being skipped
fn field_list(input: &mut Input<'_>) -> PResult<SelectionSet> {
    let mut set = SelectionSet::new();

    loop {
        if input.is_empty() || input.starts_with('}') {
            break;
        }
        match field.parse_next(input) {
            Ok(node) => set.insert(node),
            Err(ErrMode::Backtrack(_)) => skip_char(input),
            Err(e) => return Err(e),
        }
    }

    Ok(set)
}

fn field(input: &mut Input<'_>) -> PResult<SelectionNode> {
    let name = identifier.parse_next(input)?;
    let alias = opt(preceded('#', identifier)).parse_next(input)?;
    let type_tag = opt(preceded(':', take_while(1.., word_char))).parse_next(input)?;
    let params = opt(preceded('?', param_list)).parse_next(input)?;
    let children = opt(subquery).parse_next(input)?;

    Ok(SelectionNode {
        name: name.to_string(),
        alias: alias.map(str::to_string),
        type_tag: type_tag.map(str::to_string),
        params: params.unwrap_or_default(),
        children,
    })
}

/// A lowercase-leading identifier: `[a-z0-9_]` head, word-character tail
fn identifier<'a>(input: &mut Input<'a>) -> PResult<&'a str> {
    (
        one_of(('a'..='z', '0'..='9', '_')),
        take_while(0.., word_char),
    )
        .take()
        .parse_next(input)
}

/// One or more `key=value` pairs joined by `&`; duplicates keep the last value
fn param_list(input: &mut Input<'_>) -> PResult<IndexMap<String, String>> {
    let pairs: Vec<(&str, &str)> = separated(1.., param, '&').parse_next(input)?;
    // a trailing separator is tolerated
    opt('&').parse_next(input)?;

    let mut params = IndexMap::new();
    for (key, value) in pairs {
        params.insert(key.to_string(), value.to_string());
    }
    Ok(params)
}

fn param<'a>(input: &mut Input<'a>) -> PResult<(&'a str, &'a str)> {
    let key = take_while(1.., param_key_char).parse_next(input)?;
    '='.parse_next(input)?;
    let value = take_while(1.., param_value_char).parse_next(input)?;
    Ok((key, value))
}

fn subquery(input: &mut Input<'_>) -> PResult<SelectionSet> {
    '{'.parse_next(input)?;
    let children = field_list(input)?;
    '}'.parse_next(input)?;
    Ok(children)
}

fn word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn param_key_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '?' | '=' | '&' | '{' | '}' | ',')
}

// values may contain `=`; the key ends at the first one
fn param_value_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '{' | '&' | '}' | ',')
}

fn skip_char(input: &mut Input<'_>) {
    let mut chars = input.chars();
    chars.next();
    *input = chars.as_str();
}
