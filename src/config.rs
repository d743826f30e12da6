//! Compiler configuration module.
//!
//! Handles loading, validating, and merging `talks.toml`. Stock defaults are
//! overridden by the values present in the file; a missing file means all
//! defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_root = "content"  # Content directory (images live under images/talks)
//! talks_dir = "talks"       # Published talks, relative to content_root
//! drafts_dir = "drafts"     # Draft talks, relative to content_root
//! info_html = ""            # Snippet appended to every talk's publishing info
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE: &str = "talks.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Talk compiler configuration loaded from `talks.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TalksConfig {
    /// Content directory. Slide images are looked up in `images/talks` below it.
    pub content_root: String,
    /// Directory of published talks, relative to `content_root`.
    pub talks_dir: String,
    /// Directory of draft talks, relative to `content_root`.
    pub drafts_dir: String,
    /// Site-wide HTML appended verbatim to each talk's publishing info.
    pub info_html: String,
    /// Parallel compilation settings.
    pub processing: ProcessingConfig,
}

impl Default for TalksConfig {
    fn default() -> Self {
        Self {
            content_root: "content".to_string(),
            talks_dir: "talks".to_string(),
            drafts_dir: "drafts".to_string(),
            info_html: String::new(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl TalksConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.talks_dir.trim().is_empty() {
            return Err(ConfigError::Validation("talks_dir must not be empty".into()));
        }
        if self.drafts_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "drafts_dir must not be empty".into(),
            ));
        }
        if self.talks_dir == self.drafts_dir {
            return Err(ConfigError::Validation(
                "talks_dir and drafts_dir must differ".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Content root, resolved against `base` when relative.
    pub fn content_root_in(&self, base: &Path) -> PathBuf {
        base.join(&self.content_root)
    }

    /// Published talks directory under `content_root`.
    pub fn talks_path(&self, content_root: &Path) -> PathBuf {
        content_root.join(&self.talks_dir)
    }

    /// Draft talks directory under `content_root`.
    pub fn drafts_path(&self, content_root: &Path) -> PathBuf {
        content_root.join(&self.drafts_dir)
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of talks compiled in parallel.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(TalksConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `talks.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file doesn't exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<TalksConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: TalksConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `talks.toml` in the given directory.
pub fn load_config(dir: &Path) -> Result<TalksConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// Returns a fully-commented stock `talks.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Talk Compiler Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Content directory. Slide images are looked up in
#   <content_root>/images/talks/<slug>/<slug>.<NNN>.png (or .jpg)
content_root = "content"

# Published talks, relative to content_root.
talks_dir = "talks"

# Draft talks, relative to content_root. Compiled with draft = true.
drafts_dir = "drafts"

# HTML appended verbatim to every talk's publishing info sidebar.
info_html = ""

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum talks compiled in parallel.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
