//! Slide image resolution.
//!
//! Every slide is illustrated by an image exported from the presentation,
//! stored under the content root by talk slug and slide number:
//!
//! ```text
//! content/images/talks/
//! └── paradise-lost/
//!     ├── paradise-lost.001.png
//!     ├── paradise-lost.002.jpg
//!     └── paradise-lost.003.png
//! ```
//!
//! PNG is tried first, then JPG. The resolved image is published under
//! [`ASSET_PREFIX`]: `/assets/talks/paradise-lost/paradise-lost.001.png`.
//! A slide with neither image is an error. So is any filesystem failure
//! other than "not found" while probing.
//!
//! Existence checks go through the [`AssetProbe`] trait so the resolver can
//! be exercised against an in-memory set of paths. The production probe is
//! [`FsProbe`]; it only stats files and never reads or writes them.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Public URL prefix of published talk images.
pub const ASSET_PREFIX: &str = "/assets/talks";

/// Location of talk images relative to the content root.
pub const IMAGES_SUBDIR: &str = "images/talks";

/// Image extensions in order of preference.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg"];

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Couldn't find any image asset for slide {number} ({png} / {jpg}) at {}", dir.display())]
    MissingAsset {
        number: String,
        png: String,
        jpg: String,
        dir: PathBuf,
    },
    #[error("Failed to check for slide image {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Answers whether a file exists.
///
/// Implementations must distinguish "absent" (`Ok(false)`) from a failed
/// check (`Err`); the resolver never treats an error as absence.
pub trait AssetProbe: Sync {
    fn exists(&self, path: &Path) -> io::Result<bool>;
}

/// [`AssetProbe`] backed by `stat` on the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl AssetProbe for FsProbe {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        match std::fs::metadata(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Locates slide images under `{content_root}/images/talks`.
#[derive(Debug, Clone)]
pub struct ImageResolver<P = FsProbe> {
    images_root: PathBuf,
    probe: P,
}

impl ImageResolver<FsProbe> {
    pub fn new(content_root: &Path) -> Self {
        Self::with_probe(content_root, FsProbe)
    }
}

impl<P: AssetProbe> ImageResolver<P> {
    pub fn with_probe(content_root: &Path, probe: P) -> Self {
        Self {
            images_root: content_root.join(IMAGES_SUBDIR),
            probe,
        }
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Directory holding all talk image directories.
    pub fn images_root(&self) -> &Path {
        &self.images_root
    }

    /// Resolve the public image path for slide `number` of talk `slug`.
    pub fn resolve(&self, slug: &str, number: &str) -> Result<String, ResolveError> {
        let dir = self.images_root.join(slug);

        for ext in IMAGE_EXTENSIONS {
            let name = image_file_name(slug, number, ext);
            let path = dir.join(&name);
            let found = self
                .probe
                .exists(&path)
                .map_err(|source| ResolveError::Stat { path, source })?;
            if found {
                return Ok(format!("{ASSET_PREFIX}/{slug}/{name}"));
            }
        }

        Err(ResolveError::MissingAsset {
            number: number.to_string(),
            png: image_file_name(slug, number, "png"),
            jpg: image_file_name(slug, number, "jpg"),
            dir,
        })
    }
}

/// `{slug}.{number}.{ext}`, e.g. `paradise-lost.001.png`.
pub fn image_file_name(slug: &str, number: &str, ext: &str) -> String {
    format!("{slug}.{number}.{ext}")
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// In-memory probe: a fixed set of existing paths, plus paths whose
    /// check fails. Records every probed path in order.
    #[derive(Default)]
    pub struct MemoryProbe {
        pub existing: HashSet<PathBuf>,
        pub failing: HashSet<PathBuf>,
        pub probed: Mutex<Vec<PathBuf>>,
    }

    impl MemoryProbe {
        pub fn with_files<I, S>(files: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<PathBuf>,
        {
            Self {
                existing: files.into_iter().map(Into::into).collect(),
                ..Self::default()
            }
        }

        pub fn get_probed(&self) -> Vec<PathBuf> {
            self.probed.lock().unwrap().clone()
        }
    }

    impl AssetProbe for MemoryProbe {
        fn exists(&self, path: &Path) -> io::Result<bool> {
            self.probed.lock().unwrap().push(path.to_path_buf());
            if self.failing.contains(path) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "permission denied",
                ));
            }
            Ok(self.existing.contains(path))
        }
    }

    fn root() -> PathBuf {
        PathBuf::from("/site/content")
    }

    fn talk_dir() -> PathBuf {
        root().join("images/talks/paradise-lost")
    }

    #[test]
    fn images_root_under_content_root() {
        let resolver = ImageResolver::new(&root());
        assert_eq!(resolver.images_root(), Path::new("/site/content/images/talks"));
    }

    #[test]
    fn resolves_png() {
        let probe = MemoryProbe::with_files([talk_dir().join("paradise-lost.001.png")]);
        let resolver = ImageResolver::with_probe(&root(), probe);
        assert_eq!(
            resolver.resolve("paradise-lost", "001").unwrap(),
            "/assets/talks/paradise-lost/paradise-lost.001.png"
        );
    }

    #[test]
    fn falls_back_to_jpg() {
        let probe = MemoryProbe::with_files([talk_dir().join("paradise-lost.002.jpg")]);
        let resolver = ImageResolver::with_probe(&root(), probe);
        assert_eq!(
            resolver.resolve("paradise-lost", "002").unwrap(),
            "/assets/talks/paradise-lost/paradise-lost.002.jpg"
        );
    }

    #[test]
    fn png_preferred_over_jpg() {
        let probe = MemoryProbe::with_files([
            talk_dir().join("paradise-lost.001.jpg"),
            talk_dir().join("paradise-lost.001.png"),
        ]);
        let resolver = ImageResolver::with_probe(&root(), probe);
        assert!(
            resolver
                .resolve("paradise-lost", "001")
                .unwrap()
                .ends_with(".png")
        );
    }

    #[test]
    fn probes_png_then_jpg() {
        let resolver = ImageResolver::with_probe(&root(), MemoryProbe::default());
        let _ = resolver.resolve("paradise-lost", "003");
        assert_eq!(
            resolver.probe.get_probed(),
            vec![
                talk_dir().join("paradise-lost.003.png"),
                talk_dir().join("paradise-lost.003.jpg"),
            ]
        );
    }

    #[test]
    fn missing_asset_names_both_files_and_dir() {
        let resolver = ImageResolver::with_probe(&root(), MemoryProbe::default());
        let err = resolver.resolve("paradise-lost", "004").unwrap_err();
        match &err {
            ResolveError::MissingAsset {
                number,
                png,
                jpg,
                dir,
            } => {
                assert_eq!(number, "004");
                assert_eq!(png, "paradise-lost.004.png");
                assert_eq!(jpg, "paradise-lost.004.jpg");
                assert_eq!(dir, &talk_dir());
            }
            other => panic!("expected MissingAsset, got {other:?}"),
        }
        let msg = err.to_string();
        assert!(msg.contains("paradise-lost.004.png"));
        assert!(msg.contains("paradise-lost.004.jpg"));
        assert!(msg.contains("images/talks/paradise-lost"));
    }

    #[test]
    fn stat_failure_is_not_absence() {
        let mut probe = MemoryProbe::with_files([talk_dir().join("paradise-lost.001.jpg")]);
        probe
            .failing
            .insert(talk_dir().join("paradise-lost.001.png"));
        let resolver = ImageResolver::with_probe(&root(), probe);
        let err = resolver.resolve("paradise-lost", "001").unwrap_err();
        assert!(matches!(err, ResolveError::Stat { ref path, .. }
            if path == &talk_dir().join("paradise-lost.001.png")));
    }

    #[test]
    fn fs_probe_reports_presence() {
        let tmp = tempfile::TempDir::new().unwrap();
        let file = tmp.path().join("a.png");
        std::fs::write(&file, b"png").unwrap();
        assert!(FsProbe.exists(&file).unwrap());
        assert!(!FsProbe.exists(&tmp.path().join("b.png")).unwrap());
    }

    #[test]
    fn image_file_name_format() {
        assert_eq!(image_file_name("talk", "010", "jpg"), "talk.010.jpg");
    }
}
