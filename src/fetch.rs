//! Page fetching for provider URLs.
//!
//! # Architecture
//!
//! The module uses a trait-based design so the pipeline can be driven by a
//! real HTTP client or by an in-memory stub in tests:
//! - [`FetchPage`]: Core trait defining a single GET for one URL
//! - [`HttpFetcher`]: `reqwest`-backed implementation with a fixed timeout
//!
//! # Failure Policy
//!
//! A fetch is attempted exactly once. Timeouts, connection errors and non-2xx
//! statuses all become a [`FetchError`]; nothing is retried and no partial body
//! is salvaged. The optional pause after a failed source lives in the
//! pipeline, where parse failures are seen as well.

use crate::errors::{FetchError, FetchResult};
use reqwest::Client;
use reqwest::header::USER_AGENT;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Trait for downloading one page body.
///
/// Implementors perform a single GET for `url`, identifying themselves with
/// `user_agent`, and return the body text on a 2xx response.
pub trait FetchPage {
    fn fetch(&self, url: &str, user_agent: &str) -> impl Future<Output = FetchResult<String>> + Send;
}

/// HTTP implementation of [`FetchPage`] backed by a shared `reqwest::Client`.
///
/// The client reuses connections across requests on its own; no other pooling
/// is configured.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> FetchResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl FetchPage for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch(&self, url: &str, user_agent: &str) -> FetchResult<String> {
        let t0 = Instant::now();
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}
