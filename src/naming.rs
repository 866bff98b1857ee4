//! Filename and label naming conventions.
//!
//! Article files are named `<ordinal-date>_<slug>.<ext>`:
//! - `2012.040_hello-world.md` → date="2012.040", slug="hello-world"
//! - `2012.040_v1.2-notes.md` → date="2012.040", slug="v1.2-notes"
//!
//! Labels written in article headers get a URL-safe slug used for the
//! category page path (`category/<slug>/`).

use std::path::{Component, Path};

/// Separator between the words of a label slug.
pub const SLUG_SEPARATOR: char = '-';

/// Result of splitting an article filename.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleFileName {
    /// Ordinal date prefix, not yet decoded (e.g. `2012.040`).
    pub date: String,
    /// Everything after the first underscore, extension stripped.
    pub slug: String,
}

/// Split an article filename on its first underscore.
///
/// The split happens before the extension is stripped so that the dot inside
/// the ordinal date is never mistaken for an extension. Returns `None` when
/// there is no underscore, or the slug is empty or not a plain path segment
/// (`.`, `..`), since the slug becomes the page's output directory.
pub fn parse_article_file_name(file_name: &str) -> Option<ArticleFileName> {
    let (date, rest) = file_name.split_once('_')?;
    let slug = match rest.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => rest,
    };
    if !is_plain_segment(slug) {
        return None;
    }
    Some(ArticleFileName {
        date: date.to_string(),
        slug: slug.to_string(),
    })
}

/// Non-empty and made only of normal path components.
fn is_plain_segment(slug: &str) -> bool {
    !slug.is_empty()
        && Path::new(slug)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

/// Normalize a label display name into its slug.
///
/// - lowercased
/// - `#` → ` sharp `, `.` → ` dot `
/// - whitespace runs collapse to a single `-`
/// - leading and trailing `-` trimmed
///
/// `C#` → `c-sharp`, `ASP.NET` → `asp-dot-net`.
pub fn label_slug(name: &str) -> String {
    let expanded = name
        .to_lowercase()
        .replace('#', " sharp ")
        .replace('.', " dot ");
    let joined = expanded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(&SLUG_SEPARATOR.to_string());
    joined.trim_matches(SLUG_SEPARATOR).to_string()
}
