//! Bing News search result scraper.
//!
//! Each result on `bing.com/news/search` is a `div.news-card`. The card
//! itself carries `url` and `data-author` attributes, which are used when the
//! nested anchor or source line is missing.

use super::{NewsProvider, ProviderKind, escape_spaces, select_text, selector};
use crate::errors::FetchResult;
use crate::models::{NO_DATE, NO_SNIPPET, NO_TITLE, RawItem, UNKNOWN_SOURCE};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, instrument};

static CARD: Lazy<Selector> = Lazy::new(|| selector("div.news-card"));
static TITLE_LINK: Lazy<Selector> = Lazy::new(|| selector("a.title[href]"));
static TITLE: Lazy<Selector> = Lazy::new(|| selector("a.title"));
static SNIPPET: Lazy<Selector> = Lazy::new(|| selector("div.snippet"));
static SOURCE: Lazy<Selector> = Lazy::new(|| selector("div.source a"));
static DATE: Lazy<Selector> = Lazy::new(|| selector("div.source span[aria-label]"));

/// Bing News search, scraped from HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct BingNews;

impl NewsProvider for BingNews {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Bing
    }

    fn query_url(&self, keyword: &str) -> String {
        format!(
            "https://www.bing.com/news/search?q={}",
            escape_spaces(keyword, "+")
        )
    }

    #[instrument(level = "debug", skip_all)]
    fn parse(&self, body: &str) -> FetchResult<Vec<RawItem>> {
        let document = Html::parse_document(body);
        let mut items = Vec::new();

        for card in document.select(&CARD) {
            let link = card
                .select(&TITLE_LINK)
                .next()
                .and_then(|a| a.value().attr("href"))
                .or_else(|| card.value().attr("url"));
            let Some(link) = link else {
                debug!("Skipping Bing card without a link");
                continue;
            };

            let source = select_text(card, &SOURCE).or_else(|| {
                card.value()
                    .attr("data-author")
                    .map(str::trim)
                    .filter(|author| !author.is_empty())
                    .map(str::to_string)
            });

            items.push(RawItem {
                link: link.to_string(),
                title: select_text(card, &TITLE).unwrap_or_else(|| NO_TITLE.to_string()),
                snippet: select_text(card, &SNIPPET).unwrap_or_else(|| NO_SNIPPET.to_string()),
                date: select_text(card, &DATE).unwrap_or_else(|| NO_DATE.to_string()),
                source: source.unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
            });
        }

        debug!(count = items.len(), "Parsed Bing news cards");
        Ok(items)
    }
}
