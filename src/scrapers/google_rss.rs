//! Google News RSS search feed.
//!
//! Unlike the HTML providers, Google News exposes search results as an RSS
//! 2.0 feed at `news.google.com/rss/search`. Each `<item>` carries `title`,
//! `link`, `pubDate` and a `<source url="...">Publisher</source>` element, but
//! no excerpt, so every item gets [`NO_SNIPPET_FEED`] as its snippet.
//!
//! Item links point at `news.google.com` redirect URLs, so in practice an
//! allow-list only matches them when it names Google News itself.

use super::{NewsProvider, ProviderKind, escape_spaces};
use crate::errors::FetchResult;
use crate::models::{NO_DATE, NO_SNIPPET_FEED, NO_TITLE, RawItem, UNKNOWN_SOURCE};
use serde::Deserialize;
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<FeedItem>,
}

#[derive(Debug, Deserialize)]
struct FeedItem {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    source: Option<FeedSource>,
}

#[derive(Debug, Deserialize)]
struct FeedSource {
    #[serde(rename = "$text", default)]
    name: String,
}

/// Google News search, read from its RSS feed.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleNewsRss;

impl NewsProvider for GoogleNewsRss {
    fn kind(&self) -> ProviderKind {
        ProviderKind::GoogleRss
    }

    fn query_url(&self, keyword: &str) -> String {
        format!(
            "https://news.google.com/rss/search?q={}&hl=en-US&gl=US&ceid=US:en",
            escape_spaces(keyword, "%20")
        )
    }

    #[instrument(level = "debug", skip_all)]
    fn parse(&self, body: &str) -> FetchResult<Vec<RawItem>> {
        let rss: Rss = quick_xml::de::from_str(body)?;

        let items: Vec<RawItem> = rss
            .channel
            .items
            .into_iter()
            .filter_map(|item| {
                let Some(link) = non_empty(item.link) else {
                    debug!("Skipping feed item without a link");
                    return None;
                };
                Some(RawItem {
                    link,
                    title: non_empty(item.title).unwrap_or_else(|| NO_TITLE.to_string()),
                    snippet: NO_SNIPPET_FEED.to_string(),
                    date: non_empty(item.pub_date).unwrap_or_else(|| NO_DATE.to_string()),
                    source: non_empty(item.source.map(|s| s.name))
                        .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
                })
            })
            .collect();

        debug!(count = items.len(), "Parsed RSS items");
        Ok(items)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FetchError;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <generator>NFE/5.0</generator>
    <title>"climate policy" - Google News</title>
    <link>https://news.google.com/search?q=climate+policy</link>
    <language>en-US</language>
    <description>Google News</description>
    <item>
      <title>EU agrees emissions target - Reuters</title>
      <link>https://news.google.com/rss/articles/CBMiabc?oc=5</link>
      <guid isPermaLink="false">CBMiabc</guid>
      <pubDate>Mon, 06 May 2025 14:00:00 GMT</pubDate>
      <description>&lt;a href="https://www.reuters.com/x"&gt;EU agrees&lt;/a&gt;</description>
      <source url="https://www.reuters.com">Reuters</source>
    </item>
    <item>
      <title>Carbon tax &amp; trade debate</title>
      <link>https://news.google.com/rss/articles/CBMidef?oc=5</link>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_query_url_escapes_spaces_with_percent20() {
        assert_eq!(
            GoogleNewsRss.query_url("climate policy"),
            "https://news.google.com/rss/search?q=climate%20policy&hl=en-US&gl=US&ceid=US:en"
        );
    }

    #[test]
    fn test_parse_feed_items() {
        let items = GoogleNewsRss.parse(FEED).unwrap();
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].title, "EU agrees emissions target - Reuters");
        assert_eq!(items[0].link, "https://news.google.com/rss/articles/CBMiabc?oc=5");
        assert_eq!(items[0].date, "Mon, 06 May 2025 14:00:00 GMT");
        assert_eq!(items[0].source, "Reuters");
        assert_eq!(items[0].snippet, "No Snippet (RSS Feed)");
    }

    #[test]
    fn test_parse_missing_children_use_placeholders() {
        let items = GoogleNewsRss.parse(FEED).unwrap();
        assert_eq!(items[1].title, "Carbon tax & trade debate");
        assert_eq!(items[1].date, "No Date");
        assert_eq!(items[1].source, "Unknown");
        assert_eq!(items[1].snippet, "No Snippet (RSS Feed)");
    }

    #[test]
    fn test_parse_items_separated_by_other_channel_elements() {
        let body = r#"<rss version="2.0"><channel>
            <item><title>A</title><link>https://example.com/a</link></item>
            <lastBuildDate>Mon, 06 May 2025 15:00:00 GMT</lastBuildDate>
            <item><title>B</title><link>https://example.com/b</link></item>
          </channel></rss>"#;

        let items = GoogleNewsRss.parse(body).unwrap();
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn test_parse_empty_channel() {
        let body = r#"<rss version="2.0"><channel><title>Nothing</title></channel></rss>"#;
        assert!(GoogleNewsRss.parse(body).unwrap().is_empty());
    }

    #[test]
    fn test_parse_skips_item_without_link() {
        let body = r#"<rss><channel><item><title>Orphan</title></item><item><link>https://example.com/a</link></item></channel></rss>"#;
        let items = GoogleNewsRss.parse(body).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].link, "https://example.com/a");
        assert_eq!(items[0].title, "No Title");
    }

    #[test]
    fn test_parse_malformed_feed_is_an_error() {
        let body = r#"<rss><channel><item><title>Broken</item></channel></rss>"#;
        assert!(matches!(GoogleNewsRss.parse(body), Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_parse_non_feed_document_is_an_error() {
        let body = "<html><body>Our systems have detected unusual traffic</body></html>";
        assert!(matches!(GoogleNewsRss.parse(body), Err(FetchError::Parse(_))));
    }
}
