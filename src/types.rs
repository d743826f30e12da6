//! Compiled talk types.
//!
//! These are the compiler's output and are serialized to JSON by the CLI,
//! so a site generator can consume them without linking this crate.

use chrono::{DateTime, Utc};
use maud::{PreEscaped, html};
use serde::{Deserialize, Serialize};

/// A single compiled talk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Talk {
    /// Not yet published. Set by the caller, never read from the source file.
    pub draft: bool,
    /// Event at which the talk was originally given.
    pub event: String,
    /// City where the talk was originally given.
    pub location: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub published_at: DateTime<Utc>,
    /// Source filename without its `.md` extension.
    pub slug: String,
    /// Introduction in HTML, taken from the first slide's presenter notes.
    pub intro: String,
    /// Introduction in Markdown.
    pub intro_raw: String,
    pub slides: Vec<Slide>,
}

/// One slide of a talk, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// 1-based position, zero-padded to three digits (`"001"`).
    pub number: String,
    /// Caption in HTML.
    pub caption: String,
    /// Caption in Markdown.
    pub caption_raw: String,
    /// Presenter notes in HTML. Empty for the first slide of a compiled talk,
    /// whose notes become the talk intro.
    pub presenter_notes: String,
    /// Presenter notes in Markdown.
    pub presenter_notes_raw: String,
    /// Public URL of the slide image, e.g. `/assets/talks/slug/slug.001.png`.
    pub image_path: String,
}

impl Talk {
    /// Sidebar blurb shown next to a talk: title, publication date, location
    /// and event, followed by the site-wide `info_html` snippet (inserted
    /// as-is).
    pub fn publishing_info(&self, info_html: &str) -> String {
        let published = self.published_at.format("%B %-d, %Y").to_string();
        html! {
            p { strong { "Talk" } br; (self.title) }
            p { strong { "Published" } br; (published) }
            p { strong { "Location" } br; (self.location) }
            p { strong { "Event" } br; (self.event) }
            (PreEscaped(info_html))
        }
        .into_string()
    }
}
