//! Site configuration module.
//!
//! Handles loading and validating `config.toml` from the source directory.
//! The file is optional; stock defaults fill in whatever it leaves out.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "gbgen"                 # Site title (index page, feed, category titles)
//! url = "http://localhost"        # Absolute site URL, used for feed links
//! description = "A static blog"   # Feed description
//! feed_path = "rss.xml"           # Feed location relative to the output root
//! strict_slugs = false            # Fail the build on duplicate article slugs
//!
//! [dirs]
//! templates = "templates"         # Template files, relative to the source dir
//! articles = "articles"           # Article files
//! static_assets = "static"        # Copied verbatim into the output
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse; override just the values you want:
//!
//! ```toml
//! title = "Notes from the Basement"
//! url = "https://example.com"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// Passed explicitly to the build; nothing about the site lives in globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Absolute site URL (`http://` or `https://`). Article links in the feed
    /// are this URL joined with the article path.
    pub url: String,
    /// Site description used by the feed channel.
    pub description: String,
    /// Path of the RSS feed relative to the output root.
    pub feed_path: String,
    /// Reject builds where two articles share a slug. Off by default: pages
    /// are written newest first, so the older article (written last) wins.
    pub strict_slugs: bool,
    /// Source subdirectory names.
    pub dirs: DirsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "gbgen".to_string(),
            url: "http://localhost".to_string(),
            description: "A static blog".to_string(),
            feed_path: "rss.xml".to_string(),
            strict_slugs: false,
            dirs: DirsConfig::default(),
        }
    }
}

/// Source subdirectories, relative to the source root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirsConfig {
    pub templates: String,
    pub articles: String,
    /// Copied to the same relative path under the output root.
    pub static_assets: String,
}

impl Default for DirsConfig {
    fn default() -> Self {
        Self {
            templates: "templates".to_string(),
            articles: "articles".to_string(),
            static_assets: "static".to_string(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(ConfigError::Validation(
                "url must be an absolute http:// or https:// URL".into(),
            ));
        }
        check_relative("feed_path", &self.feed_path)?;
        check_relative("dirs.templates", &self.dirs.templates)?;
        check_relative("dirs.articles", &self.dirs.articles)?;
        check_relative("dirs.static_assets", &self.dirs.static_assets)?;
        Ok(())
    }
}

/// Paths from config must stay inside their root: non-empty, relative, no `..`.
fn check_relative(key: &str, value: &str) -> Result<(), ConfigError> {
    let path = Path::new(value);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if value.trim().is_empty() || escapes {
        return Err(ConfigError::Validation(format!(
            "{key} must be a non-empty relative path without '..'"
        )));
    }
    Ok(())
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// Base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
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

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
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
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given source directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# gbgen Configuration
# ===================
# Place this file at the root of the source directory.
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Site title. Used as the index page title, the feed title, and the
# suffix of category page titles ("Rust - <title>").
title = "gbgen"

# Absolute URL the site is served from. Feed item links are built by
# appending the article path ("/hello-world") to this URL.
url = "http://localhost"

# Feed channel description.
description = "A static blog"

# Where the RSS feed is written, relative to the output directory.
feed_path = "rss.xml"

# Two articles with the same slug write to the same page. By default the
# older article (written last) silently wins; set to true to fail the build
# instead.
strict_slugs = false

# ---------------------------------------------------------------------------
# Source layout (relative to the source directory)
# ---------------------------------------------------------------------------
[dirs]
# Template files; the file name without extension is the template key.
# Required: main, article, articleSummaryWrapper.
templates = "templates"

# Article files named <YYYY.DDD>_<slug>.md
articles = "articles"

# Copied verbatim to the same path under the output directory.
static_assets = "static"
"##
}
