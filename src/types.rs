//! Shared data model for a build.
//!
//! Everything here is created fresh by the catalog stage and only read by the
//! renderers and the feed builder. The types serialize to JSON for
//! `gbgen check --json`.

use crate::naming;
use crate::render;
use chrono::NaiveDate;
use serde::Serialize;

/// A category tag as written in an article header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    /// Display name, exactly as written (trimmed).
    pub name: String,
    /// URL-safe form of the name, see [`naming::label_slug`].
    pub slug: String,
}

impl Label {
    pub fn new(name: &str) -> Self {
        let name = name.trim();
        Self {
            name: name.to_string(),
            slug: naming::label_slug(name),
        }
    }
}

/// Required header fields of an article.
#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub title: String,
    pub labels: Vec<Label>,
}

/// One parsed article file.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    /// Identifier from the filename, used for the output path and URL.
    pub slug: String,
    /// Ordinal date (`YYYY.DDD`) from the filename.
    pub date: String,
    /// `date` decoded to a calendar date; the sort key.
    #[serde(skip)]
    pub published: NaiveDate,
    pub metadata: Metadata,
    /// Excerpt HTML. Ends with `...` when the body has no break marker.
    pub short_html: String,
    /// Full body HTML.
    pub long_html: String,
    /// `short_html` with markup tags removed.
    pub description: String,
}

impl Article {
    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    pub fn labels(&self) -> &[Label] {
        &self.metadata.labels
    }

    /// Site-relative URL of the article page.
    pub fn url(&self) -> String {
        render::article_url(&self.slug)
    }
}

/// A label together with every article carrying it, in scan order.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub label: Label,
    pub articles: Vec<Article>,
}

impl Category {
    /// Output directory of the category page, relative to the site root.
    pub fn path(&self) -> String {
        format!("category/{}", self.label.slug)
    }
}
