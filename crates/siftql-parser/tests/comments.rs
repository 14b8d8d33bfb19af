//! Tests for comment handling
//!
//! Covers:
//! - Line and block comment stripping
//! - Nested and unterminated block comments
//! - Deny-mode rejection

use pretty_assertions::assert_eq;
use rstest::rstest;
use siftql_diagnostics::{SIFT0001, SiftError};
use siftql_parser::{CommentMode, parse, parse_with_mode};

// === Stripping ===

#[rstest]
#[case("// note\n{a}", "{a}")]
#[case("{a // rest of line\n b}", "{a b}")]
#[case("{a /* gone */ b}", "{a b}")]
#[case("/* x /* nested */ y */{a}", "{a}")]
#[case("{a} /* trailing unterminated", "{a}")]
#[case("{a /* swallows the close brace}", "{a}")]
#[case("// only a comment", "")]
fn test_comment_stripping(#[case] commented: &str, #[case] plain: &str) {
    assert_eq!(parse(commented).unwrap(), parse(plain).unwrap());
}

#[test]
fn test_line_comment_ends_at_newline() {
    let tree = parse("{a // note\nb c}").unwrap();
    let keys: Vec<_> = tree.keys().collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
}

#[test]
fn test_double_slash_in_param_value_is_a_comment() {
    // comment stripping runs before tokenization, so a url-style value
    // loses everything from the double slash onward
    let tree = parse("{a?u=http://example}").unwrap();
    assert_eq!(
        tree.get("a").unwrap().params.get("u").map(String::as_str),
        Some("http:")
    );
}

// === Deny Mode ===

#[rstest]
#[case("// leading\n{a}")]
#[case("{a /* inline */}")]
#[case("/* only */")]
fn test_deny_mode_rejects_comments(#[case] query: &str) {
    let err = parse_with_mode(query, CommentMode::Deny).unwrap_err();
    match &err {
        SiftError::Parse { code, message, .. } => {
            assert_eq!(*code, SIFT0001);
            assert!(message.contains("Comments not allowed"), "got: {message}");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_deny_mode_accepts_plain_queries() {
    let tree = parse_with_mode("{a b}", CommentMode::Deny).unwrap();
    assert_eq!(tree.len(), 2);
}

#[test]
fn test_allow_is_the_default_mode() {
    assert_eq!(CommentMode::default(), CommentMode::Allow);
}
