//! Shared test utilities for the gbgen test suite.
//!
//! Provides fixture setup, article construction, and lookup helpers that work
//! with catalog data (`Article`, `Category`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let catalog = load_catalog(tmp.path(), &DirsConfig::default()).unwrap();
//!
//! let hello = find_article(&catalog.articles, "hello-world");
//! assert_eq!(hello.title(), "Hello, World");
//! assert_eq!(category_names(&catalog.categories), vec!["C#", "Meta", "Rust"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::article;
use crate::template::Templates;
use crate::types::{Article, Category};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Construction
// =========================================================================

/// Parse an article from its parts, going through the real parser.
pub fn make_article(date: &str, slug: &str, title: &str, labels: &[&str], body: &str) -> Article {
    let raw = format!("title: {title}\nlabels: {}\n\n{body}", labels.join(", "));
    let file_name = format!("{date}_{slug}.md");
    article::parse(&raw, &file_name)
        .unwrap_or_else(|e| panic!("test article {file_name} failed to parse: {e}"))
}

/// Minimal templates covering every required key.
pub fn sample_templates() -> Templates {
    [
        ("main", "<main><title>${title}</title>${content}</main>"),
        (
            "article",
            "<article><h1><a href=\"${articleUrl}\">${title}</a></h1><time>${date}</time>${content}</article>",
        ),
        (
            "articleSummaryWrapper",
            "<section><a href=\"${articleUrl}\">${title}</a> ${date}${content}</section>",
        ),
    ]
    .into_iter()
    .collect()
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find an article by slug. Panics if not found.
pub fn find_article<'a>(articles: &'a [Article], slug: &str) -> &'a Article {
    articles.iter().find(|a| a.slug == slug).unwrap_or_else(|| {
        panic!(
            "article '{slug}' not found. Available: {:?}",
            article_slugs(articles)
        )
    })
}

/// Find a category by label name. Panics if not found.
pub fn find_category<'a>(categories: &'a [Category], name: &str) -> &'a Category {
    categories
        .iter()
        .find(|c| c.label.name == name)
        .unwrap_or_else(|| {
            panic!(
                "category '{name}' not found. Available: {:?}",
                category_names(categories)
            )
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

pub fn article_slugs(articles: &[Article]) -> Vec<&str> {
    articles.iter().map(|a| a.slug.as_str()).collect()
}

pub fn article_dates(articles: &[Article]) -> Vec<&str> {
    articles.iter().map(|a| a.date.as_str()).collect()
}

pub fn category_names(categories: &[Category]) -> Vec<&str> {
    categories.iter().map(|c| c.label.name.as_str()).collect()
}
