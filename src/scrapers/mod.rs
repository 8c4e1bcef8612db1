//! News search providers: query URL construction and result parsing.
//!
//! Each provider turns a keyword into a query URL and parses the page the
//! provider serves back into [`RawItem`]s. Providers follow one contract,
//! [`NewsProvider`], so the pipeline never branches on which provider it is
//! talking to.
//!
//! # Supported Providers
//!
//! | Provider | Module | Method | Space escape |
//! |----------|--------|--------|--------------|
//! | Google News search | [`google`] | HTML scraping | `+` |
//! | Bing News search | [`bing`] | HTML scraping | `+` |
//! | Google News RSS | [`google_rss`] | RSS 2.0 feed | `%20` |
//!
//! # Markup Drift
//!
//! The HTML providers are bound to class names the search engines currently
//! serve. When those change, the parsers return zero items rather than an
//! error; there is no attempt to detect drift.

use crate::errors::FetchResult;
use crate::models::RawItem;
use clap::ValueEnum;
use scraper::{ElementRef, Selector};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod bing;
pub mod google;
pub mod google_rss;

/// Contract implemented by every upstream news source.
pub trait NewsProvider: Send + Sync {
    /// Identifies this provider.
    fn kind(&self) -> ProviderKind;

    /// Build the query URL for one keyword.
    ///
    /// Only spaces are escaped. Other special characters pass through as-is
    /// and may produce a URL the fetcher rejects.
    fn query_url(&self, keyword: &str) -> String;

    /// Parse a fetched page body into result items, in document order.
    fn parse(&self, body: &str) -> FetchResult<Vec<RawItem>>;
}

/// Selectable provider identifiers, used by the CLI and the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    Google,
    Bing,
    GoogleRss,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
            ProviderKind::Bing => "bing",
            ProviderKind::GoogleRss => "google-rss",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instantiate providers in the given order.
pub fn build_providers(kinds: &[ProviderKind]) -> Vec<Box<dyn NewsProvider>> {
    kinds
        .iter()
        .map(|kind| -> Box<dyn NewsProvider> {
            match kind {
                ProviderKind::Google => Box::new(google::GoogleNews),
                ProviderKind::Bing => Box::new(bing::BingNews),
                ProviderKind::GoogleRss => Box::new(google_rss::GoogleNewsRss),
            }
        })
        .collect()
}

/// Replace every space in `keyword` with `escape`.
pub(crate) fn escape_spaces(keyword: &str, escape: &str) -> String {
    keyword.replace(' ', escape)
}

/// Trimmed text of the first descendant matching `selector`, if any and non-empty.
///
/// A match whose text is empty or only whitespace counts as missing, so the
/// caller substitutes its placeholder just as it does when nothing matches.
/// This deliberately differs from passing blank text through unchanged.
pub(crate) fn select_text(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|node| node.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Compile a selector literal. Only used for constants known to be valid.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_escape_spaces() {
        assert_eq!(escape_spaces("climate policy", "+"), "climate+policy");
        assert_eq!(escape_spaces("climate policy", "%20"), "climate%20policy");
        assert_eq!(escape_spaces("a&b c", "+"), "a&b+c");
    }

    #[test]
    fn test_build_providers_preserves_order() {
        let providers = build_providers(&[ProviderKind::GoogleRss, ProviderKind::Google]);
        let kinds: Vec<_> = providers.iter().map(|p| p.kind()).collect();
        assert_eq!(kinds, vec![ProviderKind::GoogleRss, ProviderKind::Google]);
    }

    #[test]
    fn test_no_provider_url_contains_space() {
        for provider in build_providers(&[ProviderKind::Google, ProviderKind::Bing, ProviderKind::GoogleRss]) {
            let url = provider.query_url("climate policy reform");
            assert!(!url.contains(' '), "{} produced {}", provider.kind(), url);
        }
    }

    #[test]
    fn test_select_text_trims_and_skips_empty() {
        let html = Html::parse_fragment(r#"<div><p class="a">  hello  </p><p class="b">   </p></div>"#);
        let root = html.root_element();
        assert_eq!(select_text(root, &selector("p.a")), Some("hello".to_string()));
        assert_eq!(select_text(root, &selector("p.b")), None);
        assert_eq!(select_text(root, &selector("p.c")), None);
    }

    #[test]
    fn test_provider_kind_serde_names() {
        let kinds: Vec<ProviderKind> = serde_yaml::from_str("[google, bing, google-rss]").unwrap();
        assert_eq!(kinds, vec![ProviderKind::Google, ProviderKind::Bing, ProviderKind::GoogleRss]);
    }
}
