//! Static site generation.
//!
//! The build stage. Loads the catalog, renders every page, copies static
//! assets, and writes the feed.
//!
//! ## Build Order
//!
//! 1. Load templates and articles; check required templates (and duplicate
//!    slugs in strict mode). Nothing on disk changes until this succeeds.
//! 2. Remove and recreate the output directory.
//! 3. Copy the static directory, if any.
//! 4. Article pages, then category pages, then the index.
//! 5. The RSS feed.
//!
//! A failure after step 2 leaves a partially written output directory.
//!
//! ## Output Structure
//!
//! ```text
//! site/
//! ├── index.html                 # Every article summary, newest first
//! ├── hello-world/
//! │   └── index.html             # Article page
//! ├── category/
//! │   └── rust/
//! │       └── index.html         # Summaries of articles labelled "Rust"
//! ├── rss.xml                    # Feed (path from config)
//! └── static/                    # Copied verbatim
//! ```

use crate::catalog::{self, CatalogError};
use crate::config::SiteConfig;
use crate::feed::{self, FeedError};
use crate::render::{self, RenderError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),
    #[error("Static copy failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Duplicate article slug: {0}")]
    DuplicateSlug(String),
    #[error("Output directory {} contains the source directory", .0.display())]
    OutputContainsSource(PathBuf),
}

/// A page written by the build, for CLI output.
#[derive(Debug, Clone, Serialize)]
pub struct PageOutput {
    pub title: String,
    /// Path of the written file, relative to the output root.
    pub path: String,
}

/// What a build produced.
#[derive(Debug, Serialize)]
pub struct BuildSummary {
    pub articles: Vec<PageOutput>,
    pub categories: Vec<PageOutput>,
    pub index: PageOutput,
    pub feed: String,
    /// Number of files copied from the static directory.
    pub static_files: usize,
}

/// Build the site from `source` into `output`.
///
/// `build_time` is stamped into the feed; pass a fixed value for
/// reproducible output.
pub fn generate(
    source: &Path,
    output: &Path,
    config: &SiteConfig,
    build_time: DateTime<Utc>,
) -> Result<BuildSummary, BuildError> {
    let catalog = catalog::load_catalog(source, &config.dirs)?;
    render::require_templates(&catalog.templates)?;
    if config.strict_slugs
        && let Some(slug) = catalog.find_duplicate_slug()
    {
        return Err(BuildError::DuplicateSlug(slug.to_string()));
    }
    check_output_location(source, output)?;

    if output.exists() {
        fs::remove_dir_all(output)?;
    }
    fs::create_dir_all(output)?;

    let static_files = copy_static(
        &source.join(&config.dirs.static_assets),
        &output.join(&config.dirs.static_assets),
    )?;

    let mut articles = Vec::with_capacity(catalog.articles.len());
    for article in &catalog.articles {
        let html = render::render_article_page(article, &catalog.templates)?;
        let path = format!("{}/index.html", article.slug.trim_start_matches('/'));
        write_page(output, &path, &html)?;
        articles.push(PageOutput {
            title: article.title().to_string(),
            path,
        });
    }

    let mut categories = Vec::with_capacity(catalog.categories.len());
    for category in &catalog.categories {
        let html = render::render_category_page(category, &catalog.templates, &config.title)?;
        let path = format!("{}/index.html", category.path());
        write_page(output, &path, &html)?;
        categories.push(PageOutput {
            title: category.label.name.clone(),
            path,
        });
    }

    let html = render::render_index_page(&catalog.articles, &catalog.templates, &config.title)?;
    write_page(output, "index.html", &html)?;
    let index = PageOutput {
        title: config.title.clone(),
        path: "index.html".to_string(),
    };

    let channel = feed::build_feed(&catalog.articles, config, build_time)?;
    feed::write_feed(&channel, &output.join(&config.feed_path))?;

    Ok(BuildSummary {
        articles,
        categories,
        index,
        feed: config.feed_path.clone(),
        static_files,
    })
}

/// Timestamp for the feed's `lastBuildDate`.
///
/// Honors `SOURCE_DATE_EPOCH` (seconds since the Unix epoch) so rebuilds of
/// unchanged content are byte-identical; falls back to the current time.
pub fn build_timestamp() -> DateTime<Utc> {
    std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now)
}

/// Clearing `output` must never delete the source.
fn check_output_location(source: &Path, output: &Path) -> Result<(), BuildError> {
    if !output.exists() {
        return Ok(());
    }
    let output = output.canonicalize()?;
    if source.canonicalize()?.starts_with(&output) {
        return Err(BuildError::OutputContainsSource(output));
    }
    Ok(())
}

fn write_page(output: &Path, relative: &str, html: &str) -> std::io::Result<()> {
    let path = output.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html)
}

/// Recursively copy `src` to `dst`. A missing `src` copies nothing.
fn copy_static(src: &Path, dst: &Path) -> Result<usize, BuildError> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        // strip_prefix can't fail: every entry is under src
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}
