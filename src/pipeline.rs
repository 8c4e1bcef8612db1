//! The fetch, parse, filter pipeline behind `POST /api/search`.
//!
//! For every keyword, and for every configured provider in order:
//! 1. **Query**: the provider builds the query URL
//! 2. **Fetch**: one GET with the next User-Agent from this request's rotation
//! 3. **Parse**: the provider turns the body into [`RawItem`]s
//! 4. **Filter**: items whose link contains no allowed domain are dropped
//!
//! Fetches run one after another; nothing inside a request is parallel.
//! Each (keyword, provider) source yields its own `Result`. Failed sources are
//! recorded in the [`SearchReport`] and logged, then discarded by
//! [`NewsSearch::search`], so callers only ever see the items that succeeded.
//!
//! A source fails when either its fetch or its parse fails. With a non-zero
//! failure pause, the pipeline sleeps for that fixed delay after every failed
//! source before moving on. The delay never grows, has no jitter, and the
//! failed URL is not retried.

use crate::config::UserAgentRotation;
use crate::errors::{FetchError, FetchResult};
use crate::fetch::FetchPage;
use crate::models::{NewsItem, RawItem, SearchRequest};
use crate::scrapers::{NewsProvider, ProviderKind};
use crate::utils::truncate_for_log;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

/// A source that produced no items because its fetch or parse failed.
#[derive(Debug)]
pub struct SourceFailure {
    pub keyword: String,
    pub provider: ProviderKind,
    pub url: String,
    pub error: FetchError,
}

/// Everything one search produced, including the failures.
#[derive(Debug, Default)]
pub struct SearchReport {
    pub items: Vec<NewsItem>,
    pub failures: Vec<SourceFailure>,
}

/// Keep `link` iff it contains at least one allowed domain as a substring.
///
/// The match is deliberately literal: case-sensitive, not aware of host
/// boundaries, and without any URL normalization. `"example.com"` therefore
/// also accepts `https://notexample.com.evil.org/`, and an empty domain
/// accepts every link.
pub fn matches_allowed_domain(link: &str, domains: &[String]) -> bool {
    domains.iter().any(|domain| link.contains(domain.as_str()))
}

/// The configured search pipeline.
pub struct NewsSearch<F> {
    fetcher: F,
    providers: Vec<Box<dyn NewsProvider>>,
    user_agents: Vec<String>,
    failure_pause: Duration,
}

impl<F> NewsSearch<F>
where
    F: FetchPage + Send + Sync,
{
    pub fn new(fetcher: F, providers: Vec<Box<dyn NewsProvider>>, user_agents: Vec<String>) -> Self {
        Self {
            fetcher,
            providers,
            user_agents,
            failure_pause: Duration::ZERO,
        }
    }

    /// Sleep for `pause` after every failed source. Zero disables the pause.
    pub fn with_failure_pause(mut self, pause: Duration) -> Self {
        self.failure_pause = pause;
        self
    }

    /// Run a search and return only the successful, allowed items.
    pub async fn search(&self, request: &SearchRequest) -> Vec<NewsItem> {
        self.search_report(request).await.items
    }

    /// Run a search, keeping per-source failures alongside the items.
    ///
    /// Items are ordered by keyword, then provider, then position on the page.
    /// Nothing is deduplicated.
    #[instrument(
        level = "info",
        skip_all,
        fields(keywords = request.keywords.len(), domains = request.domains.len())
    )]
    pub async fn search_report(&self, request: &SearchRequest) -> SearchReport {
        let mut report = SearchReport::default();

        if request.keywords.is_empty() || request.domains.is_empty() {
            debug!("Nothing to search for; skipping upstream fetches");
            return report;
        }

        let mut rotation = UserAgentRotation::random(&self.user_agents);

        for keyword in &request.keywords {
            for provider in &self.providers {
                let url = provider.query_url(keyword);
                let user_agent = rotation.next_agent();

                match self.collect_source(provider.as_ref(), &url, user_agent).await {
                    Ok(items) => {
                        let found = items.len();
                        let before = report.items.len();
                        report.items.extend(
                            items
                                .into_iter()
                                .filter(|item| matches_allowed_domain(&item.link, &request.domains))
                                .map(|item| item.into_news_item(keyword)),
                        );
                        debug!(
                            %keyword,
                            provider = %provider.kind(),
                            found,
                            kept = report.items.len() - before,
                            "Filtered source results"
                        );
                    }
                    Err(e) => {
                        let failure = SourceFailure {
                            keyword: keyword.clone(),
                            provider: provider.kind(),
                            url,
                            error: e,
                        };
                        error!(
                            keyword = %failure.keyword,
                            provider = %failure.provider,
                            url = %failure.url,
                            error = %failure.error,
                            "Error fetching source; skipping"
                        );
                        report.failures.push(failure);

                        if !self.failure_pause.is_zero() {
                            warn!(pause = ?self.failure_pause, "Pausing before next source");
                            sleep(self.failure_pause).await;
                        }
                    }
                }
            }
        }

        info!(
            results = report.items.len(),
            failed_sources = report.failures.len(),
            "Search complete"
        );
        report
    }

    /// Fetch and parse a single provider URL.
    #[instrument(level = "debug", skip(self, provider, user_agent), fields(provider = %provider.kind()))]
    pub async fn collect_source(
        &self,
        provider: &dyn NewsProvider,
        url: &str,
        user_agent: &str,
    ) -> FetchResult<Vec<RawItem>> {
        let body = self.fetcher.fetch(url, user_agent).await?;
        let items = provider.parse(&body);
        if let Err(e) = &items {
            debug!(error = %e, body_preview = %truncate_for_log(&body, 200), "Unparseable response body");
        }
        items
    }
}
