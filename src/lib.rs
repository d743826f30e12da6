//! # Talk Compiler
//!
//! Compiles a single talk file into a structured [`Talk`](types::Talk) ready
//! for rendering as a web page. A talk file is markdown with YAML
//! frontmatter, split into slides and presenter notes:
//!
//! ```text
//! ---
//! title: Paradise Lost
//! event: Some Conference
//! location: Berlin
//! published_at: 2016-05-01T12:00:00Z
//! ---
//! Paradise Lost
//! ???
//! Notes on the title slide become the talk's intro.
//! ---
//! Second slide caption
//! ???
//! Presenter notes for the second slide.
//! ```
//!
//! Each slide is illustrated by an image at
//! `content/images/talks/{slug}/{slug}.{NNN}.png` (or `.jpg`), published as
//! `/assets/talks/{slug}/{slug}.{NNN}.png`.
//!
//! # Pipeline
//!
//! ```text
//! read → frontmatter → metadata → validate → slides → (render + image)* → intro → Talk
//! ```
//!
//! Compilation is one-shot and stateless: each call reads one file, stats
//! its images and returns an owned value or the first error. Independent
//! calls can run in parallel, which is how the CLI checks a whole directory.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`compile`] | Orchestrates the pipeline; required fields, intro extraction, batches |
//! | [`frontmatter`] | Splits a document into metadata block and body |
//! | [`metadata`] | YAML metadata record and timestamp parsing |
//! | [`slides`] | Segments a body into slides with caption and notes |
//! | [`markdown`] | pulldown-cmark rendering with explicit [`RenderOptions`](markdown::RenderOptions) |
//! | [`assets`] | Slide image lookup (PNG, then JPG) behind an [`AssetProbe`](assets::AssetProbe) |
//! | [`naming`] | Slug and slide-number conventions |
//! | [`types`] | Compiled `Talk` and `Slide` |
//! | [`config`] | `talks.toml` loading, validation and merging |
//! | [`output`] | CLI output formatting |

pub mod assets;
pub mod compile;
pub mod config;
pub mod frontmatter;
pub mod markdown;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod slides;
pub mod types;

pub use compile::{CompileError, TalkCompiler, compile, compile_dir};
pub use types::{Slide, Talk};

#[cfg(test)]
pub(crate) mod test_helpers;
