//! Filename and numbering conventions shared by the compiler and the image resolver.
//!
//! ## Slugs
//!
//! A talk's slug is its source filename with the `.md` extension removed:
//! `paradise-lost.md` → `paradise-lost`. The slug addresses the talk on the
//! site and names its image directory.
//!
//! Only the *first* occurrence of `.md` is removed, wherever it appears. A
//! file named `my.md.talk.md` therefore gets the slug `my.talk.md`. Keep
//! talk filenames to a single `.md` to avoid surprises.
//!
//! ## Slide Numbers
//!
//! Slides are numbered from 1 in document order and zero-padded to three
//! digits (`001`, `002`, ...). Past 999 the string simply widens (`1000`).
//! The same string appears in image filenames: `{slug}.{number}.png`.

/// Extension stripped from talk filenames when deriving the slug.
pub const TALK_EXTENSION: &str = ".md";

/// Derive a talk slug from its source filename.
///
/// - `"paradise-lost.md"` → `"paradise-lost"`
/// - `"paradise-lost"` → `"paradise-lost"` (no extension, unchanged)
/// - `"my.md.talk.md"` → `"my.talk.md"` (first occurrence only)
pub fn slug_from_file_name(file_name: &str) -> String {
    file_name.replacen(TALK_EXTENSION, "", 1)
}

/// Format a 0-based slide index as its 1-based, 3-digit zero-padded number.
pub fn slide_number(index: usize) -> String {
    format!("{:03}", index + 1)
}

/// Whether a filename looks like a talk source file.
pub fn is_talk_file(file_name: &str) -> bool {
    !file_name.starts_with('.') && file_name.ends_with(TALK_EXTENSION)
}
