//! Article file parsing.
//!
//! ## File Format
//!
//! ```text
//! 2012.040_hello-world.md
//! ┌──────────────────────────────────────────┐
//! │ title: Hello World                       │  header: `key: value` lines
//! │ labels: Rust, C#                         │
//! │                                          │  first blank line ends the header
//! │ An introduction in **markdown**.         │  body
//! │ <!--break-->                             │  optional excerpt marker
//! │ The rest of the article.                 │
//! └──────────────────────────────────────────┘
//! ```
//!
//! Header lines that don't look like `key: value` are skipped without error.
//! `title` and `labels` are required; `labels` is comma separated.
//!
//! The text before the break marker becomes the excerpt shown on the index
//! and category pages. Without a marker the whole body is the excerpt and
//! `...` is appended to its HTML.

use crate::date::{self, DateError};
use crate::naming;
use crate::types::{Article, Label, Metadata};
use pulldown_cmark::{Parser, html as md_html};
use regex::Regex;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ArticleError {
    #[error("No blank line separating header from body")]
    MalformedArticle,
    #[error("File name {0:?} does not follow <date>_<slug>.<ext>")]
    MalformedFileName(String),
    #[error("Missing required header field '{0}'")]
    MissingMetadata(&'static str),
    #[error("Date error: {0}")]
    Date(#[from] DateError),
}

#[derive(Error, Debug)]
pub enum StubError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Date error: {0}")]
    Date(#[from] DateError),
    #[error("Invalid slug {0:?}: must be non-empty and contain no path separators")]
    InvalidSlug(String),
}

/// Excerpt marker token.
pub const BREAK_MARKER: &str = "<!--break-->";

/// Appended to the excerpt HTML of articles without a break marker.
pub const ELLIPSIS: &str = "...";

/// Header of a freshly created article stub.
pub const STUB_HEADER: &str = "title: \nlabels: \n\n";

static HEADER_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid header separator pattern"));

static HEADER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^:]+):\s*(.*)$").expect("valid header line pattern"));

/// Parse a raw article file into an [`Article`].
///
/// `file_name` is the bare filename (no directories); it supplies the date
/// and slug.
pub fn parse(raw: &str, file_name: &str) -> Result<Article, ArticleError> {
    let (header, body) = split_header(raw).ok_or(ArticleError::MalformedArticle)?;
    let metadata = parse_metadata(header)?;

    let excerpt = split_excerpt(body);
    let mut short_html = markdown_to_html(excerpt.short);
    if !excerpt.has_marker {
        short_html.push_str(ELLIPSIS);
    }
    let long_html = markdown_to_html(&excerpt.long);
    let description = strip_tags(&short_html);

    let name = naming::parse_article_file_name(file_name)
        .ok_or_else(|| ArticleError::MalformedFileName(file_name.to_string()))?;
    let published = date::ordinal_to_date(&name.date)?;

    Ok(Article {
        slug: name.slug,
        date: name.date,
        published,
        metadata,
        short_html,
        long_html,
        description,
    })
}

/// Split at the first blank line. Returns `(header, body)`.
fn split_header(raw: &str) -> Option<(&str, &str)> {
    HEADER_SEPARATOR
        .find(raw)
        .map(|m| (&raw[..m.start()], &raw[m.end()..]))
}

/// Collect `key: value` header lines. Later duplicates win.
fn parse_header(header: &str) -> BTreeMap<String, String> {
    header
        .lines()
        .filter_map(|line| HEADER_LINE.captures(line.trim()))
        .map(|caps| (caps[1].trim().to_string(), caps[2].trim().to_string()))
        .collect()
}

fn parse_metadata(header: &str) -> Result<Metadata, ArticleError> {
    let mut fields = parse_header(header);
    let title = fields
        .remove("title")
        .ok_or(ArticleError::MissingMetadata("title"))?;
    let labels = fields
        .remove("labels")
        .ok_or(ArticleError::MissingMetadata("labels"))?;
    Ok(Metadata {
        title,
        labels: parse_labels(&labels),
    })
}

/// Split a comma-separated label list. Empty entries and repeated names are dropped.
fn parse_labels(value: &str) -> Vec<Label> {
    let mut labels: Vec<Label> = Vec::new();
    for name in value.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        if !labels.iter().any(|l| l.name == name) {
            labels.push(Label::new(name));
        }
    }
    labels
}

struct Excerpt<'a> {
    short: &'a str,
    long: Cow<'a, str>,
    has_marker: bool,
}

fn split_excerpt(body: &str) -> Excerpt<'_> {
    match body.split_once(BREAK_MARKER) {
        Some((before, after)) => Excerpt {
            short: before,
            long: Cow::Owned(format!("{before}{after}")),
            has_marker: true,
        },
        None => Excerpt {
            short: body,
            long: Cow::Borrowed(body),
            has_marker: false,
        },
    }
}

pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html
}

/// Remove markup tags, keeping text content. Whitespace and entities are left as-is.
pub fn strip_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

pub fn stub_file_name(ordinal: &str, slug: &str) -> String {
    format!("{ordinal}_{slug}.md")
}

/// Create an empty article stub in `dir`.
///
/// `date_input` may be an ordinal (`2012.040`) or a human date (`Feb 9 2012`).
/// Never overwrites an existing file.
pub fn create_stub(dir: &Path, date_input: &str, slug: &str) -> Result<PathBuf, StubError> {
    let slug = slug.trim();
    if slug.is_empty() || slug.contains(['/', '\\']) {
        return Err(StubError::InvalidSlug(slug.to_string()));
    }
    let ordinal = date::parse_date_input(date_input)?;

    fs::create_dir_all(dir)?;
    let path = dir.join(stub_file_name(&ordinal, slug));
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)?;
    file.write_all(STUB_HEADER.as_bytes())?;
    Ok(path)
}
