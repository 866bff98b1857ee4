//! Page composition from templates.
//!
//! Every page is an inner template wrapped in the `main` shell:
//!
//! | Page | Inner template | `main` title |
//! |------|----------------|--------------|
//! | Article | `article` with the full body | article title |
//! | Category | `articleSummaryWrapper` per article, concatenated | `<label> - <site title>` |
//! | Index | `articleSummaryWrapper` per article, newest first | site title |
//!
//! Renderers are pure: no filesystem access, the caller writes the result.

use crate::template::{Bindings, Templates};
use crate::types::{Article, Category};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum RenderError {
    #[error("Missing template: {0}")]
    MissingTemplate(String),
}

pub const MAIN_TEMPLATE: &str = "main";
pub const ARTICLE_TEMPLATE: &str = "article";
pub const SUMMARY_TEMPLATE: &str = "articleSummaryWrapper";

/// Templates every build needs.
pub const REQUIRED_TEMPLATES: [&str; 3] = [MAIN_TEMPLATE, ARTICLE_TEMPLATE, SUMMARY_TEMPLATE];

/// Fail with the first required template that isn't loaded.
pub fn require_templates(templates: &Templates) -> Result<(), RenderError> {
    match REQUIRED_TEMPLATES
        .iter()
        .find(|name| !templates.contains(name))
    {
        Some(name) => Err(RenderError::MissingTemplate(name.to_string())),
        None => Ok(()),
    }
}

fn lookup<'t>(templates: &'t Templates, name: &str) -> Result<&'t str, RenderError> {
    templates
        .get(name)
        .ok_or_else(|| RenderError::MissingTemplate(name.to_string()))
}

/// URL of an article page: the slug, made absolute with a leading `/`.
pub fn article_url(slug: &str) -> String {
    if slug.starts_with('/') {
        slug.to_string()
    } else {
        format!("/{slug}")
    }
}

pub fn render_article_page(article: &Article, templates: &Templates) -> Result<String, RenderError> {
    let url = article.url();
    let body = Bindings::article(article.title(), &article.long_html, &article.date, &url)
        .apply(lookup(templates, ARTICLE_TEMPLATE)?);
    Ok(Bindings::page(article.title(), &body).apply(lookup(templates, MAIN_TEMPLATE)?))
}

pub fn render_category_page(
    category: &Category,
    templates: &Templates,
    site_title: &str,
) -> Result<String, RenderError> {
    let summaries = render_summaries(&category.articles, templates)?;
    let title = format!("{} - {}", category.label.name, site_title);
    Ok(Bindings::page(&title, &summaries).apply(lookup(templates, MAIN_TEMPLATE)?))
}

/// Home page. Articles are re-sorted newest first whatever order they arrive in.
pub fn render_index_page(
    articles: &[Article],
    templates: &Templates,
    site_title: &str,
) -> Result<String, RenderError> {
    let mut sorted: Vec<&Article> = articles.iter().collect();
    sorted.sort_by(|a, b| b.published.cmp(&a.published));
    let summaries = render_summaries(sorted, templates)?;
    Ok(Bindings::page(site_title, &summaries).apply(lookup(templates, MAIN_TEMPLATE)?))
}

fn render_summaries<'a>(
    articles: impl IntoIterator<Item = &'a Article>,
    templates: &Templates,
) -> Result<String, RenderError> {
    let wrapper = lookup(templates, SUMMARY_TEMPLATE)?;
    Ok(articles
        .into_iter()
        .map(|article| {
            let url = article.url();
            Bindings::article(article.title(), &article.short_html, &article.date, &url)
                .apply(wrapper)
        })
        .collect())
}
