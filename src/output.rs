//! CLI output formatting.
//!
//! Output is **information-centric**: each talk leads with its title and
//! slug, followed by indented context lines for its metadata and slides.
//!
//! ```text
//! Paradise Lost (paradise-lost)
//!     Event: Conference, Berlin
//!     Published: 2016-05-01
//!     Intro: Paradise Lost is a talk about...
//!     001 Title slide
//!         Image: /assets/talks/paradise-lost/paradise-lost.001.png
//!     002 Second slide
//!         Image: /assets/talks/paradise-lost/paradise-lost.002.jpg
//!         Notes: Say it slowly
//! ```
//!
//! `check` prints one line per file, then a summary:
//!
//! ```text
//! ok    paradise-lost.md (12 slides)
//! draft wip.md (3 slides)
//! FAIL  broken.md: No event for talk: content/talks/broken.md
//!
//! Compiled 2 talks, 1 failed
//! ```
//!
//! Each `format_*` function returns `Vec<String>` and does no I/O; the
//! `print_*` wrappers write to stdout.

use crate::compile::FileResult;
use crate::types::Talk;

const EXCERPT_LEN: usize = 60;

// ============================================================================
// Helpers
// ============================================================================

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Strip HTML tags from a string (simple angle-bracket stripping).
fn strip_html_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

/// First line of plain text, truncated to `max` characters with `...`.
fn excerpt(html: &str, max: usize) -> String {
    let text = strip_html_tags(html);
    let line = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("").trim();
    if line.chars().count() <= max {
        line.to_string()
    } else {
        let cut: String = line.chars().take(max).collect();
        format!("{cut}...")
    }
}

// ============================================================================
// Talk output
// ============================================================================

/// Format a compiled talk: header, metadata, then one entry per slide.
pub fn format_talk_output(talk: &Talk) -> Vec<String> {
    let mut lines = Vec::new();

    let mut header = format!("{} ({})", talk.title, talk.slug);
    if talk.draft {
        header.push_str(" [draft]");
    }
    lines.push(header);
    if let Some(subtitle) = &talk.subtitle {
        lines.push(format!("{}Subtitle: {}", indent(1), subtitle));
    }
    lines.push(format!("{}Event: {}, {}", indent(1), talk.event, talk.location));
    lines.push(format!(
        "{}Published: {}",
        indent(1),
        talk.published_at.format("%Y-%m-%d")
    ));
    lines.push(format!(
        "{}Intro: {}",
        indent(1),
        excerpt(&talk.intro, EXCERPT_LEN)
    ));

    for slide in &talk.slides {
        let caption = excerpt(&slide.caption, EXCERPT_LEN);
        if caption.is_empty() {
            lines.push(format!("{}{}", indent(1), slide.number));
        } else {
            lines.push(format!("{}{} {}", indent(1), slide.number, caption));
        }
        lines.push(format!("{}Image: {}", indent(2), slide.image_path));
        if !slide.presenter_notes.is_empty() {
            lines.push(format!(
                "{}Notes: {}",
                indent(2),
                excerpt(&slide.presenter_notes, EXCERPT_LEN)
            ));
        }
    }

    lines
}

pub fn print_talk_output(talk: &Talk) {
    for line in format_talk_output(talk) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format per-file check results followed by a summary line.
pub fn format_check_output(results: &[FileResult]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut failed = 0;

    for (name, result) in results {
        match result {
            Ok(talk) => {
                let status = if talk.draft { "draft" } else { "ok   " };
                lines.push(format!("{} {} ({} slides)", status, name, talk.slides.len()));
            }
            Err(e) => {
                failed += 1;
                lines.push(format!("FAIL  {}: {}", name, e));
            }
        }
    }

    lines.push(String::new());
    let compiled = results.len() - failed;
    let noun = if compiled == 1 { "talk" } else { "talks" };
    if failed == 0 {
        lines.push(format!("Compiled {} {}", compiled, noun));
    } else {
        lines.push(format!("Compiled {} {}, {} failed", compiled, noun, failed));
    }
    lines
}

pub fn print_check_output(results: &[FileResult]) {
    for line in format_check_output(results) {
        println!("{}", line);
    }
}
