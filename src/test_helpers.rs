//! Shared test utilities for the talk compiler test suite.
//!
//! Provides document builders, a temp content root with talk and image
//! writers, and lookup helpers over compiled talks.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let site = ContentFixture::new();
//! site.write_talk("paradise-lost.md", &talk_document(FULL_FRONTMATTER, "A\n???\nIntro"));
//! site.touch_images("paradise-lost", &["001.png"]);
//!
//! let talk = compile(site.root(), &site.talks_dir(), "paradise-lost.md", false).unwrap();
//! assert_eq!(slide_numbers(&talk), vec!["001"]);
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::assets::IMAGES_SUBDIR;
use crate::types::{Slide, Talk};

// =========================================================================
// Documents
// =========================================================================

/// Frontmatter with every recognized key set.
pub const FULL_FRONTMATTER: &str = "title: Paradise Lost\n\
subtitle: Heaven and Hell\n\
event: Conference\n\
location: Berlin\n\
published_at: 2016-05-01T12:00:00Z";

/// Assemble a talk source file from a frontmatter block and a body.
pub fn talk_document(frontmatter: &str, body: &str) -> String {
    format!("---\n{frontmatter}\n---\n{body}\n")
}

// =========================================================================
// Fixture setup
// =========================================================================

/// A temp content root with `talks/`, `drafts/` and `images/talks/`.
///
/// Tests get an isolated directory they can mutate freely.
pub struct ContentFixture {
    tmp: TempDir,
}

impl Default for ContentFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentFixture {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        for dir in ["talks", "drafts", IMAGES_SUBDIR] {
            fs::create_dir_all(tmp.path().join(dir)).unwrap();
        }
        Self { tmp }
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    pub fn talks_dir(&self) -> PathBuf {
        self.root().join("talks")
    }

    pub fn drafts_dir(&self) -> PathBuf {
        self.root().join("drafts")
    }

    /// Write a talk source file into `talks/`.
    pub fn write_talk(&self, file_name: &str, content: &str) -> PathBuf {
        let path = self.talks_dir().join(file_name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Write a talk source file into `drafts/`.
    pub fn write_draft(&self, file_name: &str, content: &str) -> PathBuf {
        let path = self.drafts_dir().join(file_name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Create placeholder images, each given as `NNN.ext` (e.g. `"001.png"`),
    /// named `{slug}.NNN.ext` in the talk's image directory.
    pub fn touch_images(&self, slug: &str, images: &[&str]) {
        let dir = self.root().join(IMAGES_SUBDIR).join(slug);
        fs::create_dir_all(&dir).unwrap();
        for image in images {
            fs::write(dir.join(format!("{slug}.{image}")), b"fake image").unwrap();
        }
    }
}

// =========================================================================
// Talk lookups (panic with a clear message on miss)
// =========================================================================

/// Find a slide by number. Panics if not found.
pub fn find_slide<'a>(talk: &'a Talk, number: &str) -> &'a Slide {
    talk.slides
        .iter()
        .find(|s| s.number == number)
        .unwrap_or_else(|| {
            let numbers = slide_numbers(talk);
            panic!("slide '{number}' not found in '{}'. Available: {numbers:?}", talk.slug)
        })
}

/// All slide numbers in talk order.
pub fn slide_numbers(talk: &Talk) -> Vec<&str> {
    talk.slides.iter().map(|s| s.number.as_str()).collect()
}

/// All raw captions in talk order.
pub fn slide_captions(talk: &Talk) -> Vec<&str> {
    talk.slides.iter().map(|s| s.caption_raw.as_str()).collect()
}

/// A fully populated talk with two slides, for tests that don't compile.
pub fn sample_talk() -> Talk {
    use chrono::TimeZone;

    Talk {
        draft: false,
        event: "Conference".to_string(),
        location: "Berlin".to_string(),
        title: "Paradise Lost".to_string(),
        subtitle: Some("Heaven and Hell".to_string()),
        published_at: chrono::Utc.with_ymd_and_hms(2016, 5, 1, 12, 0, 0).unwrap(),
        slug: "paradise-lost".to_string(),
        intro: "<p>Intro</p>\n".to_string(),
        intro_raw: "Intro".to_string(),
        slides: vec![
            Slide {
                number: "001".to_string(),
                caption: "<p>Title</p>\n".to_string(),
                caption_raw: "Title".to_string(),
                presenter_notes: String::new(),
                presenter_notes_raw: String::new(),
                image_path: "/assets/talks/paradise-lost/paradise-lost.001.png".to_string(),
            },
            Slide {
                number: "002".to_string(),
                caption: "<p>Second</p>\n".to_string(),
                caption_raw: "Second".to_string(),
                presenter_notes: "<p>Say it</p>\n".to_string(),
                presenter_notes_raw: "Say it".to_string(),
                image_path: "/assets/talks/paradise-lost/paradise-lost.002.jpg".to_string(),
            },
        ],
    }
}
