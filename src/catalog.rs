//! Loading templates and articles from the source directory.
//!
//! The first stage of a build. Reads everything the renderers need into memory
//! and fails fast: one malformed article aborts the whole load, before the
//! output directory is touched.
//!
//! ## Directory Structure
//!
//! ```text
//! source_content/
//! ├── config.toml                     # Site configuration (optional)
//! ├── templates/                      # One template per file, keyed by stem
//! │   ├── main.html
//! │   ├── article.html
//! │   └── articleSummaryWrapper.html
//! ├── articles/                       # <ordinal-date>_<slug>.<ext>
//! │   ├── 2012.040_hello-world.md
//! │   └── 2012.060_leap-day.md
//! └── static/                         # Copied verbatim by the build stage
//! ```
//!
//! Only regular, non-hidden files directly inside `templates/` and `articles/`
//! are read; subdirectories are ignored.
//!
//! ## Ordering
//!
//! Articles are scanned in filename order and then stable-sorted by date,
//! newest first, so same-day articles keep their filename order. Categories
//! list their articles in that same order and are themselves sorted by label
//! name.

use crate::article::{self, ArticleError};
use crate::config::DirsConfig;
use crate::template::Templates;
use crate::types::{Article, Category};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{}: {}", .path.display(), .source)]
    Article {
        path: PathBuf,
        #[source]
        source: ArticleError,
    },
    #[error("File name is not valid UTF-8: {}", .0.display())]
    NonUtf8Name(PathBuf),
}

/// Everything loaded for one build.
#[derive(Debug, Serialize)]
pub struct Catalog {
    #[serde(skip)]
    pub templates: Templates,
    /// All articles, newest first.
    pub articles: Vec<Article>,
    /// Categories sorted by label name.
    pub categories: Vec<Category>,
}

impl Catalog {
    /// First slug shared by two articles, if any.
    ///
    /// Colliding slugs write to the same output path; only strict builds
    /// check for this.
    pub fn find_duplicate_slug(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.articles
            .iter()
            .map(|a| a.slug.as_str())
            .find(|slug| !seen.insert(*slug))
    }
}

/// Load the catalog using the directory names from config.
pub fn load_catalog(source: &Path, dirs: &DirsConfig) -> Result<Catalog, CatalogError> {
    build_catalog(&source.join(&dirs.templates), &source.join(&dirs.articles))
}

pub fn build_catalog(templates_dir: &Path, articles_dir: &Path) -> Result<Catalog, CatalogError> {
    let templates = load_templates(templates_dir)?;
    let articles = load_articles(articles_dir)?;
    let categories = group_by_category(&articles);
    Ok(Catalog {
        templates,
        articles,
        categories,
    })
}

/// Read every file in `dir` as a template keyed by its stem.
pub fn load_templates(dir: &Path) -> Result<Templates, CatalogError> {
    let mut templates = Templates::new();
    for path in list_files(dir)? {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| CatalogError::NonUtf8Name(path.clone()))?
            .to_string();
        let text = fs::read_to_string(&path)?;
        templates.insert(name, text);
    }
    Ok(templates)
}

/// Parse every file in `dir` as an article, newest first.
pub fn load_articles(dir: &Path) -> Result<Vec<Article>, CatalogError> {
    let mut articles = Vec::new();
    for path in list_files(dir)? {
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| CatalogError::NonUtf8Name(path.clone()))?;
        let raw = fs::read_to_string(&path)?;
        let article = article::parse(&raw, file_name).map_err(|source| CatalogError::Article {
            path: path.clone(),
            source,
        })?;
        articles.push(article);
    }
    // sort_by is stable: same-day articles keep scan order
    articles.sort_by(|a, b| b.published.cmp(&a.published));
    Ok(articles)
}

/// Group articles by label.
///
/// Walks `articles` in the given order, appending each article to the category
/// of every label it carries. Labels are matched by slug (the page path), so
/// `Rust` and `rust` share one category, displayed with the first spelling
/// seen. Categories come back sorted by label name.
pub fn group_by_category(articles: &[Article]) -> Vec<Category> {
    let mut categories: Vec<Category> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for article in articles {
        let mut joined = HashSet::new();
        for label in article.labels() {
            let slot = *index.entry(label.slug.as_str()).or_insert_with(|| {
                categories.push(Category {
                    label: label.clone(),
                    articles: Vec::new(),
                });
                categories.len() - 1
            });
            // `C#` and `c sharp` on one article still list it once
            if joined.insert(slot) {
                categories[slot].articles.push(article.clone());
            }
        }
    }

    categories.sort_by(|a, b| a.label.name.cmp(&b.label.name));
    categories
}

/// Regular, non-hidden files directly inside `dir`, in filename order.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let hidden = path
            .file_name()
            .map(|n| n.to_string_lossy().starts_with('.'))
            .unwrap_or(true);
        if path.is_file() && !hidden {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
