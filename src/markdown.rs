//! Markdown rendering for slide captions and presenter notes.
//!
//! Wraps [pulldown-cmark](https://docs.rs/pulldown-cmark) with a fixed set of
//! site-specific rewrites, each of which can be switched off through
//! [`RenderOptions`]:
//!
//! | Rewrite | Effect when enabled |
//! |---|---|
//! | Footnote links | `[^1]` references become links to their definitions |
//! | Header links | headings get an `id` and a self-link for deep linking |
//! | Retina images | `.png`/`.jpg` images get a `srcset` naming the `@2x` variant |
//!
//! Talks render with all three disabled ([`RenderOptions::talks`]): captions
//! and notes are short, headings inside them are not link targets, and slide
//! content never references `@2x` assets.

use maud::html;
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html as md_html};

/// Switches for the site-specific markdown rewrites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub no_footnote_links: bool,
    pub no_header_links: bool,
    pub no_retina: bool,
}

impl RenderOptions {
    /// The configuration used for talk captions and presenter notes.
    pub fn talks() -> Self {
        Self {
            no_footnote_links: true,
            no_header_links: true,
            no_retina: true,
        }
    }
}

/// Markdown → HTML renderer with a fixed [`RenderOptions`].
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::talks())
    }
}

impl MarkdownRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Render markdown to HTML. Empty input renders to an empty string.
    pub fn render(&self, text: &str) -> String {
        let mut parser_options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
        if !self.options.no_footnote_links {
            parser_options |= Options::ENABLE_FOOTNOTES;
        }

        let mut events: Vec<Event> = Parser::new_ext(text, parser_options).collect();
        if !self.options.no_header_links {
            events = link_headers(events);
        }
        if !self.options.no_retina {
            events = retina_images(events);
        }

        let mut out = String::new();
        md_html::push_html(&mut out, events.into_iter());
        out
    }
}

/// Wrap each heading's content in a self-link and give the heading an id.
fn link_headers(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut out = Vec::with_capacity(events.len());
    let mut heading: Option<Vec<Event>> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading { .. }) if heading.is_none() => heading = Some(Vec::new()),
            Event::End(TagEnd::Heading(level)) if heading.is_some() => {
                let inner = heading.take().unwrap_or_default();
                let anchor = heading_anchor(&inner);
                out.push(Event::Html(
                    format!("<{level} id=\"{anchor}\"><a href=\"#{anchor}\">").into(),
                ));
                out.extend(inner);
                out.push(Event::Html(format!("</a></{level}>\n").into()));
            }
            other => match heading.as_mut() {
                Some(inner) => inner.push(other),
                None => out.push(other),
            },
        }
    }
    out
}

/// Anchor id from a heading's text: lowercase ASCII alphanumerics joined by dashes.
fn heading_anchor(events: &[Event]) -> String {
    let text: String = events
        .iter()
        .filter_map(|e| match e {
            Event::Text(t) | Event::Code(t) => Some(t.as_ref()),
            _ => None,
        })
        .collect();

    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

struct PendingImage<'a> {
    url: CowStr<'a>,
    title: CowStr<'a>,
    alt: String,
}

/// Replace images that have a retina variant with an `<img>` carrying a `srcset`.
fn retina_images(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut out = Vec::with_capacity(events.len());
    let mut image: Option<PendingImage> = None;

    for event in events {
        match event {
            Event::Start(Tag::Image {
                dest_url, title, ..
            }) if image.is_none() && retina_variant(&dest_url).is_some() => {
                image = Some(PendingImage {
                    url: dest_url,
                    title,
                    alt: String::new(),
                });
            }
            Event::End(TagEnd::Image) if image.is_some() => {
                if let Some(pending) = image.take() {
                    out.push(Event::Html(retina_img(&pending).into()));
                }
            }
            Event::Text(text) | Event::Code(text) if image.is_some() => {
                if let Some(pending) = image.as_mut() {
                    pending.alt.push_str(&text);
                }
            }
            // Formatting inside alt text is flattened
            _ if image.is_some() => {}
            other => out.push(other),
        }
    }
    out
}

fn retina_img(image: &PendingImage) -> String {
    let url = image.url.as_ref();
    let srcset = match retina_variant(url) {
        Some(at2x) => format!("{at2x} 2x, {url} 1x"),
        None => format!("{url} 1x"),
    };
    let title = Some(image.title.as_ref()).filter(|t| !t.is_empty());
    html! {
        img src=(url) srcset=(srcset) alt=(image.alt) title=[title];
    }
    .into_string()
}

/// The `@2x` path for a PNG or JPEG image URL, if it has one.
fn retina_variant(url: &str) -> Option<String> {
    let dot = url.rfind('.')?;
    let (stem, ext) = url.split_at(dot);
    let is_raster = matches!(
        ext.to_ascii_lowercase().as_str(),
        ".png" | ".jpg" | ".jpeg"
    );
    if !is_raster || stem.ends_with("@2x") || stem.contains('?') {
        return None;
    }
    Some(format!("{stem}@2x{ext}"))
}
