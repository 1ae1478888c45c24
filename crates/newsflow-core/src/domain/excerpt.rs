//! Excerpt derivation: strip markup, cap at 150 plain-text characters.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum number of plain-text characters kept in an excerpt.
pub const EXCERPT_CHARS: usize = 150;

/// Suffix appended when the plain text was longer than `EXCERPT_CHARS`.
pub const ELLIPSIS: &str = "...";

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("markup tag pattern is valid"));

/// Derive a plain-text excerpt from rich content.
///
/// All markup tags are removed, then the text is truncated to the first
/// `EXCERPT_CHARS` characters. The ellipsis is appended only when
/// truncation actually occurred, so the result is at most 153 characters.
///
/// Stripping is idempotent on plain text: input without tags comes back
/// unchanged (modulo truncation).
pub fn derive(content: &str) -> String {
    let text = MARKUP_TAG.replace_all(content, "");

    let mut chars = text.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}{ELLIPSIS}")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags() {
        assert_eq!(derive("<p>Hello <b>world</b></p>"), "Hello world");
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(derive("just words"), "just words");
        // Idempotent: deriving twice yields the same text.
        assert_eq!(derive(&derive("just words")), "just words");
    }

    #[test]
    fn truncates_long_text_and_appends_ellipsis() {
        let content = format!("<p>{}</p>", "a".repeat(200));
        let excerpt = derive(&content);
        assert_eq!(excerpt, format!("{}...", "a".repeat(150)));
        assert_eq!(excerpt.chars().count(), 153);
    }

    #[test]
    fn exactly_150_chars_gets_no_ellipsis() {
        let content = "a".repeat(150);
        assert_eq!(derive(&content), content);
    }

    #[test]
    fn one_char_over_gets_ellipsis() {
        let content = "a".repeat(151);
        let excerpt = derive(&content);
        assert!(excerpt.ends_with(ELLIPSIS));
        assert_eq!(excerpt.chars().count(), 153);
    }

    #[test]
    fn counts_characters_not_bytes() {
        // Multibyte characters: 160 of them is over the cap by count,
        // far over it by bytes. The cut must land on a char boundary.
        let content = "é".repeat(160);
        let excerpt = derive(&content);
        assert_eq!(excerpt.chars().count(), 153);
        assert!(excerpt.starts_with(&"é".repeat(150)));
    }

    #[test]
    fn attributes_inside_tags_are_stripped_too() {
        let content = r#"<a href="https://example.com">link</a> text"#;
        assert_eq!(derive(content), "link text");
    }

    #[test]
    fn empty_content_yields_empty_excerpt() {
        assert_eq!(derive(""), "");
        assert_eq!(derive("<p></p>"), "");
    }
}
