//! Query text pre-passes: comment stripping and outer-brace extraction
//!
//! Comments come off in two passes, line comments first, so a `//` inside a
//! block comment disappears before blocks are matched. Block comments nest:
//! an opener inside a block raises the depth, and the block only closes when
//! the depth returns to zero. An unterminated block swallows the rest of the
//! input.

/// Check whether the text contains any comment opener
pub(crate) fn contains_comment(query: &str) -> bool {
    query.contains("//") || query.contains("/*")
}

/// Strip `//` line comments, then depth-balanced `/* */` block comments
pub(crate) fn strip_comments(query: &str) -> String {
    strip_block_comments(&strip_line_comments(query))
}

fn strip_line_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '/' && chars.peek() == Some(&'/') {
            // skip to end of line, keeping the newline
            for c in chars.by_ref() {
                if c == '\n' {
                    result.push('\n');
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

fn strip_block_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '/' && chars.peek() == Some(&'*') {
            chars.next();
            let mut depth = 1usize;
            while depth > 0 {
                match chars.next() {
                    Some('/') if chars.peek() == Some(&'*') => {
                        chars.next();
                        depth += 1;
                    }
                    Some('*') if chars.peek() == Some(&'/') => {
                        chars.next();
                        depth -= 1;
                    }
                    Some(_) => {}
                    // unterminated block: drop everything to end of input
                    None => break,
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Cut the text down to the field-list body: everything after the first `{`
/// and before the last `}`. A missing brace leaves that side untrimmed.
pub(crate) fn extract_body(text: &str) -> &str {
    let start = text.find('{').map_or(0, |i| i + 1);
    let end = match text.rfind('}') {
        Some(i) if i >= start => i,
        _ => text.len(),
    };
    &text[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_comments_strip_to_eol() {
        assert_eq!(strip_comments("// note\n{a}"), "\n{a}");
        assert_eq!(strip_comments("{a} // trailing"), "{a} ");
    }

    #[test]
    fn nested_block_comments_strip_wholly() {
        assert_eq!(strip_comments("/* x /* y */ z */{a}"), "{a}");
    }

    #[test]
    fn unterminated_block_swallows_rest() {
        assert_eq!(strip_comments("{a} /* open"), "{a} ");
        assert_eq!(strip_comments("{a} /*"), "{a} ");
    }

    #[test]
    fn line_comment_inside_block_strips_first() {
        // the // pass removes "// y */" first, leaving the block unterminated
        assert_eq!(strip_comments("{a} /* x // y */"), "{a} ");
    }

    #[test]
    fn body_extraction() {
        assert_eq!(extract_body("junk {a b} tail"), "a b");
        assert_eq!(extract_body("{a{b}}"), "a{b}");
        assert_eq!(extract_body("a b"), "a b");
        assert_eq!(extract_body("}a{b"), "b");
        assert_eq!(extract_body("a}b"), "a");
        assert_eq!(extract_body("{"), "");
    }
}
