//! # gbgen
//!
//! A small static blog generator. Articles are markdown files with a short
//! header; templates are plain HTML with `${name}` placeholders. The output is
//! a directory of static pages plus an RSS feed.
//!
//! # Architecture: Load, Render, Write
//!
//! ```text
//! 1. Load     source_content/  →  Catalog     (templates + parsed articles + categories)
//! 2. Render   Catalog          →  page HTML   (pure functions, no I/O)
//! 3. Write    page HTML        →  site/       (pages, static copy, feed)
//! ```
//!
//! Everything is loaded and validated before the output directory is touched,
//! so a malformed article or missing template never leaves a half-cleared site
//! behind.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`date`] | `YYYY.DDD` ordinal dates: encode, decode, parse human input |
//! | [`naming`] | `<date>_<slug>.<ext>` filename convention and label slugs |
//! | [`template`] | `${name}` substitution and the bindings each template receives |
//! | [`article`] | Article file parsing, markdown rendering, stub creation |
//! | [`catalog`] | Loads templates and articles, groups articles into categories |
//! | [`render`] | Composes article, category, and index pages from templates |
//! | [`feed`] | RSS 2.0 channel for all articles |
//! | [`generate`] | The build: clear output, copy static files, write pages and feed |
//! | [`config`] | `config.toml` loading, merging over defaults, validation |
//! | [`types`] | Shared data model (`Article`, `Label`, `Category`) |
//! | [`output`] | CLI output formatting for `check` and `build` |
//!
//! # Design Decisions
//!
//! ## Ordinal Dates in Filenames
//!
//! An article's date is part of its filename as `year.dayOfYear`
//! (`2012.040_hello-world.md`). A directory listing is then already a
//! chronological index, and the date never drifts from the file. See
//! [`date::date_to_ordinal`] and [`date::ordinal_to_date`].
//!
//! ## Dumb Templates
//!
//! Templates support substitution and nothing else: no loops, no conditionals,
//! no escaping. Lists (the index page, category pages) are built by rendering
//! the `articleSummaryWrapper` template once per article and concatenating the
//! results. Substituted values are never re-scanned, so `${...}` inside an
//! article body comes out literally.
//!
//! ## Excerpts by Marker
//!
//! An article body may contain `<!--break-->`. Everything before it is the
//! excerpt shown on index and category pages; without a marker the whole body
//! is the excerpt, followed by `...`.
//!
//! ## Reproducible Output
//!
//! The only time-dependent byte in the output is the feed's `lastBuildDate`.
//! [`generate::build_timestamp`] honors `SOURCE_DATE_EPOCH`, so two builds of
//! the same source are byte-identical.

pub mod article;
pub mod catalog;
pub mod config;
pub mod date;
pub mod feed;
pub mod generate;
pub mod naming;
pub mod output;
pub mod render;
pub mod template;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
