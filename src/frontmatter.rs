//! Frontmatter/body separation for talk source files.
//!
//! A talk file opens with a YAML metadata block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Paradise Lost
//! event: Conference
//! ---
//! First slide
//! ???
//! Intro notes
//! ---
//! Second slide
//! ```
//!
//! Only the first two fences belong to the frontmatter. Every later `---`
//! line stays in the body, where it separates slides.

use std::sync::LazyLock;
use thiserror::Error;

static FRONTMATTER_FENCE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?m)^---").expect("fence pattern is valid"));

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FrontmatterError {
    #[error("content found before the opening `---` of the frontmatter")]
    Malformed,
}

/// Split a raw document into its metadata block and body, both trimmed.
///
/// - No fence at all: empty block, whole document is the body.
/// - Opening fence only: empty block, everything after it is the body.
/// - Opening and closing fence: the text between them is the block.
/// - Any text before the opening fence is an error.
pub fn split_frontmatter(raw: &str) -> Result<(String, String), FrontmatterError> {
    let parts: Vec<&str> = FRONTMATTER_FENCE.splitn(raw, 3).collect();

    if parts.len() > 1 && !parts[0].is_empty() {
        return Err(FrontmatterError::Malformed);
    }

    match parts.as_slice() {
        [_, body] => Ok((String::new(), body.trim().to_string())),
        [_, block, body] => Ok((block.trim().to_string(), body.trim().to_string())),
        [body] => Ok((String::new(), body.trim().to_string())),
        _ => unreachable!("splitn(3) yields one to three parts"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_block_and_body() {
        let (block, body) = split_frontmatter("---\ntitle: A\n---\nHello\n").unwrap();
        assert_eq!(block, "title: A");
        assert_eq!(body, "Hello");
    }

    #[test]
    fn later_fences_stay_in_body() {
        let raw = "---\ntitle: A\n---\nOne\n---\nTwo\n---\nThree\n";
        let (_, body) = split_frontmatter(raw).unwrap();
        assert_eq!(body, "One\n---\nTwo\n---\nThree");
    }

    #[test]
    fn no_fence_is_all_body() {
        let (block, body) = split_frontmatter("  Just a body\n").unwrap();
        assert_eq!(block, "");
        assert_eq!(body, "Just a body");
    }

    #[test]
    fn opening_fence_only_is_all_body() {
        let (block, body) = split_frontmatter("---\ntitle: A\n").unwrap();
        assert_eq!(block, "");
        assert_eq!(body, "title: A");
    }

    #[test]
    fn text_before_opening_fence_is_error() {
        let result = split_frontmatter("oops\n---\ntitle: A\n---\nbody");
        assert_eq!(result, Err(FrontmatterError::Malformed));
    }

    #[test]
    fn empty_document() {
        let (block, body) = split_frontmatter("").unwrap();
        assert_eq!(block, "");
        assert_eq!(body, "");
    }
}
