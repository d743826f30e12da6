//! Talk compilation: one source file in, one [`Talk`] out.
//!
//! ## Pipeline
//!
//! ```text
//! read → split frontmatter → parse metadata → validate fields
//!      → segment slides → render + resolve image (per slide)
//!      → extract intro → validate intro → Talk
//! ```
//!
//! The pipeline is linear and fail-fast: the first error aborts the talk and
//! is returned with the source path attached. No partial talk is ever
//! returned, and nothing is written anywhere.
//!
//! ## Intro
//!
//! The presenter notes of the first slide (the title slide) double as the
//! introduction of the whole talk. They are moved onto [`Talk::intro`] and
//! cleared from the slide, so the title slide doesn't repeat them. A talk
//! whose first slide has no notes is rejected.
//!
//! ## Batches
//!
//! [`TalkCompiler`] holds no mutable state, so [`compile_dir`] compiles a
//! directory of talks in parallel. Each file gets its own result; one broken
//! talk does not stop the others.

use crate::assets::{AssetProbe, FsProbe, ImageResolver, ResolveError};
use crate::frontmatter::{FrontmatterError, split_frontmatter};
use crate::markdown::MarkdownRenderer;
use crate::metadata::{TalkMetadata, parse_metadata};
use crate::naming::{is_talk_file, slug_from_file_name};
use crate::slides::split_slides;
use crate::types::{Slide, Talk};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Failed to read talk {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Bad frontmatter in talk {}: {source}", path.display())]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },
    #[error("Invalid metadata in talk {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("No {field} for talk: {}", path.display())]
    MissingField { field: &'static str, path: PathBuf },
    #[error(
        "No intro for talk: {} (provide one as the presenter notes of the first slide)",
        path.display()
    )]
    MissingIntro { path: PathBuf },
    #[error("Talk {}: {source}", path.display())]
    Asset {
        path: PathBuf,
        #[source]
        source: ResolveError,
    },
}

/// Required metadata fields, checked in this order. The first one whose
/// predicate fails is reported.
pub const REQUIRED_FIELDS: &[(&str, fn(&TalkMetadata) -> bool)] = &[
    ("event", has_event),
    ("location", has_location),
    ("title", has_title),
    ("published_at", has_published_at),
];

fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

fn has_event(meta: &TalkMetadata) -> bool {
    is_present(&meta.event)
}

fn has_location(meta: &TalkMetadata) -> bool {
    is_present(&meta.location)
}

fn has_title(meta: &TalkMetadata) -> bool {
    is_present(&meta.title)
}

fn has_published_at(meta: &TalkMetadata) -> bool {
    meta.published_at.is_some()
}

/// Name of the first required field missing from `meta`, if any.
pub fn first_missing_field(meta: &TalkMetadata) -> Option<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .find(|(_, present)| !present(meta))
        .map(|(field, _)| *field)
}

/// Compiles talk files with a fixed renderer and image probe.
#[derive(Debug, Clone)]
pub struct TalkCompiler<P = FsProbe> {
    content_root: PathBuf,
    renderer: MarkdownRenderer,
    resolver: ImageResolver<P>,
}

impl TalkCompiler<FsProbe> {
    /// Compiler for talks whose images live under `content_root`.
    pub fn new(content_root: &Path) -> Self {
        Self::with_probe(content_root, FsProbe)
    }
}

impl<P: AssetProbe> TalkCompiler<P> {
    pub fn with_probe(content_root: &Path, probe: P) -> Self {
        Self {
            content_root: content_root.to_path_buf(),
            renderer: MarkdownRenderer::default(),
            resolver: ImageResolver::with_probe(content_root, probe),
        }
    }

    /// Replace the markdown renderer (and with it, the render options).
    pub fn with_renderer(mut self, renderer: MarkdownRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn content_root(&self) -> &Path {
        &self.content_root
    }

    /// Read `source_dir/file_name` and compile it.
    pub fn compile(
        &self,
        source_dir: &Path,
        file_name: &str,
        draft: bool,
    ) -> Result<Talk, CompileError> {
        let path = source_dir.join(file_name);
        debug!("reading talk {}", path.display());
        let raw = fs::read_to_string(&path).map_err(|source| CompileError::Io {
            path: path.clone(),
            source,
        })?;
        self.compile_str(&raw, &path, file_name, draft)
    }

    /// Compile an already-read document. `path` is only used in errors.
    pub fn compile_str(
        &self,
        raw: &str,
        path: &Path,
        file_name: &str,
        draft: bool,
    ) -> Result<Talk, CompileError> {
        let (block, body) = split_frontmatter(raw).map_err(|source| CompileError::Frontmatter {
            path: path.to_path_buf(),
            source,
        })?;

        let meta = parse_metadata(&block).map_err(|source| CompileError::Metadata {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(field) = first_missing_field(&meta) {
            return Err(CompileError::MissingField {
                field,
                path: path.to_path_buf(),
            });
        }

        let slug = slug_from_file_name(file_name);
        let slides = self
            .build_slides(&slug, &body)
            .map_err(|source| CompileError::Asset {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("talk {slug}: {} slides", slides.len());

        let TalkMetadata {
            event,
            location,
            title,
            subtitle,
            published_at,
        } = meta;
        // Presence was checked against REQUIRED_FIELDS above
        let talk = Talk {
            draft,
            event: event.unwrap_or_default(),
            location: location.unwrap_or_default(),
            title: title.unwrap_or_default(),
            subtitle: subtitle.filter(|s| !s.is_empty()),
            published_at: published_at.ok_or_else(|| CompileError::MissingField {
                field: "published_at",
                path: path.to_path_buf(),
            })?,
            slug,
            intro: String::new(),
            intro_raw: String::new(),
            slides,
        };

        let talk = extract_intro(talk);
        if talk.intro.is_empty() {
            return Err(CompileError::MissingIntro {
                path: path.to_path_buf(),
            });
        }
        Ok(talk)
    }

    fn build_slides(&self, slug: &str, body: &str) -> Result<Vec<Slide>, ResolveError> {
        split_slides(body)
            .into_iter()
            .map(|source| -> Result<Slide, ResolveError> {
                let image_path = self.resolver.resolve(slug, &source.number)?;
                debug!("slide {} → {image_path}", source.number);
                Ok(Slide {
                    caption: self.renderer.render(&source.caption_raw),
                    presenter_notes: self.renderer.render(&source.presenter_notes_raw),
                    number: source.number,
                    caption_raw: source.caption_raw,
                    presenter_notes_raw: source.presenter_notes_raw,
                    image_path,
                })
            })
            .collect()
    }
}

/// Move the first slide's presenter notes onto the talk as its intro.
///
/// The first slide's notes are cleared. A talk without slides is returned
/// unchanged.
pub fn extract_intro(mut talk: Talk) -> Talk {
    if let Some(first) = talk.slides.first_mut() {
        talk.intro = std::mem::take(&mut first.presenter_notes);
        talk.intro_raw = std::mem::take(&mut first.presenter_notes_raw);
    }
    talk
}

/// Compile `source_dir/file_name` against the images under `content_root`.
pub fn compile(
    content_root: &Path,
    source_dir: &Path,
    file_name: &str,
    draft: bool,
) -> Result<Talk, CompileError> {
    TalkCompiler::new(content_root).compile(source_dir, file_name, draft)
}

/// Outcome of compiling one file of a directory.
pub type FileResult = (String, Result<Talk, CompileError>);

/// Compile every talk file directly inside `dir`, in parallel.
///
/// Results are in filename order. A missing directory yields no results.
pub fn compile_dir<P: AssetProbe>(
    compiler: &TalkCompiler<P>,
    dir: &Path,
    draft: bool,
) -> std::io::Result<Vec<FileResult>> {
    let names = talk_file_names(dir)?;
    debug!("compiling {} talks in {}", names.len(), dir.display());
    Ok(names
        .into_par_iter()
        .map(|name| {
            let result = compiler.compile(dir, &name, draft);
            (name, result)
        })
        .collect())
}

/// Sorted names of the talk files directly inside `dir`.
fn talk_file_names(dir: &Path) -> std::io::Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| is_talk_file(name))
        .collect();
    names.sort();
    Ok(names)
}
