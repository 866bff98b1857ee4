//! CLI output formatting for `check` and `build`.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each entity leads with
//! its positional index and title; dates, labels, and output paths follow as
//! secondary context.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Articles
//! 001 Leap Day
//!     Date: 2012.060
//!     Labels: C#, Rust
//!     Excerpt: February 29th comes around once every four years. In 2012 it...
//!
//! Categories
//! 001 C# (1 article)
//!     001 Leap Day
//!
//! Templates
//!     article, articleSummaryWrapper, main
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! 001 Leap Day → leap-day/index.html
//!
//! Categories
//! 001 C# → category/c-sharp/index.html
//!
//! Feed → rss.xml
//! Static: 2 files
//! Generated 3 articles, 3 categories
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O.

use crate::catalog::Catalog;
use crate::generate::BuildSummary;

const EXCERPT_WIDTH: usize = 60;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn count(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// One-line excerpt: whitespace runs collapsed, then truncated.
fn excerpt_line(description: &str) -> String {
    let collapsed = description.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_desc(&collapsed, EXCERPT_WIDTH)
}

/// Format the loaded catalog as an inventory tree.
pub fn format_catalog_output(catalog: &Catalog) -> Vec<String> {
    let mut lines = vec!["Articles".to_string()];
    for (i, article) in catalog.articles.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), article.title()));
        lines.push(format!("{}Date: {}", indent(1), article.date));
        let labels: Vec<&str> = article.labels().iter().map(|l| l.name.as_str()).collect();
        lines.push(format!("{}Labels: {}", indent(1), labels.join(", ")));
        let excerpt = excerpt_line(&article.description);
        if !excerpt.is_empty() {
            lines.push(format!("{}Excerpt: {}", indent(1), excerpt));
        }
    }

    lines.push(String::new());
    lines.push("Categories".to_string());
    for (i, category) in catalog.categories.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            category.label.name,
            count(category.articles.len(), "article", "articles")
        ));
        for (j, article) in category.articles.iter().enumerate() {
            lines.push(format!(
                "{}{} {}",
                indent(1),
                format_index(j + 1),
                article.title()
            ));
        }
    }

    lines.push(String::new());
    lines.push("Templates".to_string());
    let names: Vec<&str> = catalog.templates.names().collect();
    lines.push(format!("{}{}", indent(1), names.join(", ")));

    lines
}

/// Print catalog output to stdout.
pub fn print_catalog_output(catalog: &Catalog) {
    for line in format_catalog_output(catalog) {
        println!("{}", line);
    }
}

/// Format the pages a build wrote, each with its output path.
pub fn format_build_output(summary: &BuildSummary) -> Vec<String> {
    let mut lines = vec![format!("Home \u{2192} {}", summary.index.path)];
    for (i, page) in summary.articles.iter().enumerate() {
        lines.push(format!(
            "{} {} \u{2192} {}",
            format_index(i + 1),
            page.title,
            page.path
        ));
    }

    if !summary.categories.is_empty() {
        lines.push(String::new());
        lines.push("Categories".to_string());
        for (i, page) in summary.categories.iter().enumerate() {
            lines.push(format!(
                "{} {} \u{2192} {}",
                format_index(i + 1),
                page.title,
                page.path
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!("Feed \u{2192} {}", summary.feed));
    lines.push(format!("Static: {}", count(summary.static_files, "file", "files")));
    lines.push(format!(
        "Generated {}, {}",
        count(summary.articles.len(), "article", "articles"),
        count(summary.categories.len(), "category", "categories")
    ));
    lines
}

/// Print build output to stdout.
pub fn print_build_output(summary: &BuildSummary) {
    for line in format_build_output(summary) {
        println!("{}", line);
    }
}
