//! Google News search result scraper.
//!
//! Queries the news vertical of Google web search (`tbm=nws`) and scrapes the
//! result cards from the returned HTML.
//!
//! # Result Markup
//!
//! Each result is a `div.SoaBEf` card. Inside it:
//! - the first `<a>` carries the article URL,
//! - `div.MBeuO` holds the headline,
//! - `.GI74Re` holds the snippet,
//! - `.LfVVr` holds a relative date such as `"2 hours ago"`,
//! - `.NUnG9d span` holds the publisher name.

use super::{NewsProvider, ProviderKind, escape_spaces, select_text, selector};
use crate::errors::FetchResult;
use crate::models::{NO_DATE, NO_SNIPPET, NO_TITLE, RawItem, UNKNOWN_SOURCE};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, instrument};

static CARD: Lazy<Selector> = Lazy::new(|| selector("div.SoaBEf"));
static ANCHOR: Lazy<Selector> = Lazy::new(|| selector("a"));
static TITLE: Lazy<Selector> = Lazy::new(|| selector("div.MBeuO"));
static SNIPPET: Lazy<Selector> = Lazy::new(|| selector(".GI74Re"));
static DATE: Lazy<Selector> = Lazy::new(|| selector(".LfVVr"));
static SOURCE: Lazy<Selector> = Lazy::new(|| selector(".NUnG9d span"));

/// Google News search, scraped from HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleNews;

impl NewsProvider for GoogleNews {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Google
    }

    fn query_url(&self, keyword: &str) -> String {
        format!(
            "https://www.google.com/search?q={}&gl=us&tbm=nws&num=20",
            escape_spaces(keyword, "+")
        )
    }

    #[instrument(level = "debug", skip_all)]
    fn parse(&self, body: &str) -> FetchResult<Vec<RawItem>> {
        let document = Html::parse_document(body);
        let mut items = Vec::new();

        for card in document.select(&CARD) {
            // A card without an anchor has nothing to filter on
            let Some(link) = card
                .select(&ANCHOR)
                .next()
                .and_then(|a| a.value().attr("href"))
            else {
                debug!("Skipping Google card without a link");
                continue;
            };

            items.push(RawItem {
                link: link.to_string(),
                title: select_text(card, &TITLE).unwrap_or_else(|| NO_TITLE.to_string()),
                snippet: select_text(card, &SNIPPET).unwrap_or_else(|| NO_SNIPPET.to_string()),
                date: select_text(card, &DATE).unwrap_or_else(|| NO_DATE.to_string()),
                source: select_text(card, &SOURCE).unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
            });
        }

        debug!(count = items.len(), "Parsed Google result cards");
        Ok(items)
    }
}
