//! Tests for malformed-input recovery
//!
//! The scanner skips characters that do not begin a well-formed field, so
//! broken fragments degrade into whatever valid pieces remain instead of
//! failing the whole query.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use siftql_parser::parse;

fn keys(query: &str) -> Vec<String> {
    parse(query)
        .unwrap_or_else(|e| panic!("Failed to parse '{}': {:?}", query, e))
        .keys()
        .map(str::to_string)
        .collect()
}

// === Broken Fragments ===

#[rstest]
#[case("{a# b}", vec!["a", "b"])]
#[case("{a: b}", vec!["a", "b"])]
#[case("{a#:x b}", vec!["a", "x", "b"])]
#[case("{a?bare b}", vec!["a", "bare", "b"])]
#[case("{@#$%}", vec![])]
#[case("{...}", vec![])]
fn test_broken_fragment_degrades(#[case] query: &str, #[case] expected: Vec<&str>) {
    assert_eq!(keys(query), expected);
}

#[test]
fn test_uppercase_head_is_skipped() {
    // field names start lowercase; the scanner drops the capital and
    // resumes at the first character that can open an identifier
    assert_eq!(keys("{Foo bar}"), vec!["oo", "bar"]);
}

// === Unbalanced Braces ===

#[test]
fn test_unterminated_subquery_flattens() {
    // "a{b" never closes, so a loses its subquery and b surfaces
    // as a top-level field
    assert_eq!(keys("{a{b}"), vec!["a", "b"]);
    assert!(parse("{a{b}").unwrap().get("a").unwrap().children.is_none());
}

#[test]
fn test_inner_subquery_survives_outer_imbalance() {
    let tree = parse("{a{b{c}}").unwrap();
    let keys: Vec<_> = tree.keys().collect();
    assert_eq!(keys, vec!["a", "b"]);
    let b = tree.get("b").unwrap();
    assert!(b.children.as_ref().unwrap().contains_key("c"));
}

#[test]
fn test_stray_close_braces_are_skipped() {
    assert_eq!(keys("{a }} b}"), vec!["a", "b"]);
}

// === Totality ===

proptest! {
    #[test]
    fn test_parse_never_fails_on_printable_ascii(input in "[ -~]{0,200}") {
        let _ = parse(&input).unwrap();
    }

    #[test]
    fn test_parse_never_fails_on_arbitrary_strings(input in any::<String>()) {
        let _ = parse(&input).unwrap();
    }
}
