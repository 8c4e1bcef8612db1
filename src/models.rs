//! Data models for search requests and the news items returned to callers.
//!
//! This module defines the records that flow through the search pipeline:
//! - [`SearchRequest`]: The JSON body accepted by `POST /api/search`
//! - [`RawItem`]: One result as extracted by a provider's parser
//! - [`NewsItem`]: A filtered result tagged with the keyword that found it
//! - [`SearchResponse`] / [`ErrorResponse`]: The JSON bodies sent back
//!
//! Fields a provider does not supply are filled with fixed placeholder
//! strings rather than being omitted or set to `null`.

use serde::{Deserialize, Serialize};

/// Placeholder used when a result carries no title.
pub const NO_TITLE: &str = "No Title";
/// Placeholder used when an HTML result carries no snippet.
pub const NO_SNIPPET: &str = "No Snippet";
/// Snippet used for every feed item, since RSS search results carry no excerpt.
pub const NO_SNIPPET_FEED: &str = "No Snippet (RSS Feed)";
/// Placeholder used when a result carries no date.
pub const NO_DATE: &str = "No Date";
/// Placeholder used when a result carries no publisher name.
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// The body of a search request.
///
/// Neither list is validated: duplicates are searched twice and an empty
/// list simply produces no results. A missing field is read as empty.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchRequest {
    /// Search terms, queried in order.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Allowed publisher domains, matched as substrings of each result link.
    #[serde(default)]
    pub domains: Vec<String>,
}

/// A single result as extracted from a provider page, before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawItem {
    pub link: String,
    pub title: String,
    pub snippet: String,
    pub date: String,
    pub source: String,
}

impl RawItem {
    /// Attach the keyword that produced this item.
    pub fn into_news_item(self, keyword: &str) -> NewsItem {
        NewsItem {
            keyword: keyword.to_string(),
            link: self.link,
            title: self.title,
            snippet: self.snippet,
            date: self.date,
            source: self.source,
        }
    }
}

/// A news result returned to the caller.
///
/// `date` is passed through in whatever format the provider used
/// (e.g. `"3 hours ago"` or an RFC 2822 timestamp); it is never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsItem {
    /// The keyword whose query produced this item.
    pub keyword: String,
    /// The article URL.
    pub link: String,
    /// The headline, or [`NO_TITLE`].
    pub title: String,
    /// A short excerpt, or one of the snippet placeholders.
    pub snippet: String,
    /// The provider's free-form publication date, or [`NO_DATE`].
    pub date: String,
    /// The publisher name, or [`UNKNOWN_SOURCE`].
    pub source: String,
}

/// Successful response body for `POST /api/search`.
#[derive(Debug, Deserialize, Serialize)]
pub struct SearchResponse {
    pub results: Vec<NewsItem>,
}

/// Error response body for any failure that escapes the search pipeline.
#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response body for `GET /health`.
#[derive(Debug, Deserialize, Serialize)]
pub struct HealthStatus {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_deserialization() {
        let json = r#"{"keywords": ["climate policy"], "domains": ["reuters.com"]}"#;
        let request: SearchRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.keywords, vec!["climate policy"]);
        assert_eq!(request.domains, vec!["reuters.com"]);
    }

    #[test]
    fn test_search_request_missing_fields_default_to_empty() {
        let request: SearchRequest = serde_json::from_str("{}").unwrap();
        assert!(request.keywords.is_empty());
        assert!(request.domains.is_empty());
    }

    #[test]
    fn test_search_request_rejects_wrong_shape() {
        let result: Result<SearchRequest, _> = serde_json::from_str(r#"{"keywords": "ai"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_raw_item_into_news_item() {
        let raw = RawItem {
            link: "https://www.reuters.com/world/".to_string(),
            title: "Headline".to_string(),
            snippet: NO_SNIPPET.to_string(),
            date: NO_DATE.to_string(),
            source: UNKNOWN_SOURCE.to_string(),
        };

        let item = raw.into_news_item("elections");
        assert_eq!(item.keyword, "elections");
        assert_eq!(item.link, "https://www.reuters.com/world/");
        assert_eq!(item.snippet, "No Snippet");
        assert_eq!(item.source, "Unknown");
    }

    #[test]
    fn test_search_response_serialization() {
        let response = SearchResponse {
            results: vec![NewsItem {
                keyword: "ai".to_string(),
                link: "https://apnews.com/a".to_string(),
                title: "T".to_string(),
                snippet: "S".to_string(),
                date: "1 hour ago".to_string(),
                source: "AP News".to_string(),
            }],
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["results"][0]["keyword"], "ai");
        assert_eq!(value["results"][0]["date"], "1 hour ago");
        assert_eq!(value["results"][0]["source"], "AP News");
    }
}
