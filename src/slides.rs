//! Slide segmentation of a talk body.
//!
//! The body (frontmatter already removed) is a sequence of slides separated
//! by `---` lines. Each slide has a caption and, optionally, presenter notes
//! after a `???` line:
//!
//! ```text
//! Caption of slide one
//! ???
//! Notes for slide one
//! ---
//! Caption of slide two
//! ```
//!
//! Segmentation never fails. A body without any separator is a single slide,
//! and a slide without `???` has empty notes.

use crate::naming::slide_number;

/// Separates slides in a talk body.
pub const SLIDE_DELIMITER: &str = "---\n";

/// Separates a slide's caption from its presenter notes.
pub const NOTES_DELIMITER: &str = "???\n";

/// Markdown sources of one slide, before rendering and image resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideSource {
    /// 1-based, zero-padded position (`"001"`).
    pub number: String,
    pub caption_raw: String,
    pub presenter_notes_raw: String,
}

/// Split a talk body into slides in document order.
///
/// Both caption and notes are trimmed. Only the first `???` line of a slide
/// separates caption from notes; any later one is part of the notes.
pub fn split_slides(body: &str) -> Vec<SlideSource> {
    body.split(SLIDE_DELIMITER)
        .enumerate()
        .map(|(i, block)| {
            let (caption, notes) = block.split_once(NOTES_DELIMITER).unwrap_or((block, ""));
            SlideSource {
                number: slide_number(i),
                caption_raw: caption.trim().to_string(),
                presenter_notes_raw: notes.trim().to_string(),
            }
        })
        .collect()
}
