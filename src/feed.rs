//! RSS feed generation.
//!
//! One item per article, in the order given (the catalog passes them newest
//! first):
//!
//! | Item field | Source |
//! |------------|--------|
//! | title | article title |
//! | link / guid | site url + article url |
//! | description | plain-text excerpt |
//! | pubDate | ordinal date at 00:00 UTC |
//! | category | one per label |
//!
//! The channel is validated before it is returned, so a bad site URL or date
//! fails the build instead of producing a feed readers reject.

use crate::config::SiteConfig;
use crate::date::{self, DateError};
use crate::types::Article;
use chrono::{DateTime, NaiveTime, Utc};
use rss::{
    CategoryBuilder, Channel, ChannelBuilder, GuidBuilder, Item, ItemBuilder, validation::Validate,
};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Date error: {0}")]
    Date(#[from] DateError),
    #[error("RSS validation failed: {0}")]
    Validation(String),
}

const GENERATOR: &str = concat!("gbgen ", env!("CARGO_PKG_VERSION"));

/// Build the feed channel for `articles`.
///
/// `build_time` becomes the channel's `lastBuildDate`.
pub fn build_feed(
    articles: &[Article],
    config: &SiteConfig,
    build_time: DateTime<Utc>,
) -> Result<Channel, FeedError> {
    let base_url = config.url.trim_end_matches('/');
    let items = articles
        .iter()
        .map(|article| feed_item(article, base_url))
        .collect::<Result<Vec<_>, _>>()?;

    let channel = ChannelBuilder::default()
        .title(config.title.as_str())
        .link(config.url.as_str())
        .description(config.description.as_str())
        .last_build_date(build_time.to_rfc2822())
        .generator(GENERATOR.to_string())
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| FeedError::Validation(e.to_string()))?;
    Ok(channel)
}

fn feed_item(article: &Article, base_url: &str) -> Result<Item, FeedError> {
    let link = format!("{base_url}{}", article.url());
    let published = date::ordinal_to_date(&article.date)?;
    let pub_date = published.and_time(NaiveTime::MIN).and_utc().to_rfc2822();
    let categories = article
        .labels()
        .iter()
        .map(|label| CategoryBuilder::default().name(label.name.as_str()).build())
        .collect::<Vec<_>>();

    Ok(ItemBuilder::default()
        .title(article.title().to_string())
        .link(link.clone())
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .description(article.description.clone())
        .pub_date(pub_date)
        .categories(categories)
        .build())
}

/// Serialize the channel to XML at `path`, creating parent directories.
pub fn write_feed(channel: &Channel, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, channel.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use chrono::TimeZone;

    fn config() -> SiteConfig {
        SiteConfig {
            title: "Blog".to_string(),
            url: "https://example.com/".to_string(),
            description: "Posts".to_string(),
            ..SiteConfig::default()
        }
    }

    fn build_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn one_item_per_article() {
        let articles = vec![
            make_article("2012.061", "leap", "Leap", &["C#"], "Leap body"),
            make_article("2012.040", "hello", "Hello", &["Rust", "Meta"], "Hi<!--break-->there"),
        ];
        let channel = build_feed(&articles, &config(), build_time()).unwrap();
        assert_eq!(channel.items().len(), 2);

        let hello = &channel.items()[1];
        assert_eq!(hello.title(), Some("Hello"));
        assert_eq!(hello.link(), Some("https://example.com/hello"));
        assert_eq!(hello.guid().map(|g| g.value()), Some("https://example.com/hello"));
        assert_eq!(hello.description(), Some("Hi\n"));
        let labels: Vec<&str> = hello.categories().iter().map(|c| c.name()).collect();
        assert_eq!(labels, vec!["Rust", "Meta"]);
    }

    #[test]
    fn pub_date_is_decoded_ordinal() {
        let articles = vec![make_article("2012.040", "hello", "Hello", &["x"], "b")];
        let channel = build_feed(&articles, &config(), build_time()).unwrap();
        let pub_date = channel.items()[0].pub_date().unwrap();
        assert!(pub_date.contains("9 Feb 2012"), "{pub_date}");
        assert!(pub_date.contains("00:00:00"), "{pub_date}");
    }

    #[test]
    fn channel_fields_come_from_config() {
        let channel = build_feed(&[], &config(), build_time()).unwrap();
        assert_eq!(channel.title(), "Blog");
        assert_eq!(channel.link(), "https://example.com/");
        assert_eq!(channel.description(), "Posts");
        assert!(channel.last_build_date().unwrap().contains("15 Jun 2024"));
        assert!(channel.generator().unwrap().starts_with("gbgen"));
    }

    #[test]
    fn xml_contains_items() {
        let articles = vec![make_article("2012.040", "hello", "Hello", &["x"], "b")];
        let channel = build_feed(&articles, &config(), build_time()).unwrap();
        let xml = channel.to_string();
        assert!(xml.contains("<rss"));
        assert!(xml.contains("<title>Hello</title>"));
        assert!(xml.contains("<link>https://example.com/hello</link>"));
    }

    #[test]
    fn write_feed_creates_parent_dirs() {
        let tmp = tempfile::TempDir::new().unwrap();
        let channel = build_feed(&[], &config(), build_time()).unwrap();
        let path = tmp.path().join("feeds/all.xml");
        write_feed(&channel, &path).unwrap();
        assert!(fs::read_to_string(path).unwrap().contains("<channel>"));
    }
}
