//! # News Search
//!
//! A small HTTP service that searches public news surfaces for a list of
//! keywords and returns only the results published on an allow-list of
//! domains.
//!
//! ## Features
//!
//! - Queries Google News search, Bing News search, or the Google News RSS feed
//! - Normalizes every result to `{keyword, link, title, snippet, date, source}`,
//!   filling gaps with fixed placeholders
//! - Filters results by substring match against caller-supplied domains
//! - Isolates upstream failures per source: a failing provider only shrinks
//!   the result list
//!
//! ## Usage
//!
//! ```sh
//! news_search --port 8000
//! curl -X POST localhost:8000/api/search \
//!      -H 'content-type: application/json' \
//!      -d '{"keywords": ["climate policy"], "domains": ["reuters.com"]}'
//! ```
//!
//! ## Architecture
//!
//! Each request runs one sequential pipeline:
//! 1. **Query**: build one URL per keyword and provider
//! 2. **Fetch**: GET each URL with a fixed timeout
//! 3. **Parse**: extract result records from HTML or RSS
//! 4. **Filter**: keep links containing an allowed domain

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod errors;
mod fetch;
mod models;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use config::SearchConfig;
use fetch::HttpFetcher;
use pipeline::NewsSearch;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("news_search starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = SearchConfig::load(&args).await?;
    info!(
        host = %config.host,
        port = config.port,
        providers = ?config.providers,
        user_agent_mode = ?config.user_agent_mode,
        timeout_secs = config.timeout_secs,
        failure_pause_secs = config.failure_pause_secs,
        "Resolved configuration"
    );

    // ---- Build pipeline ----
    let search = NewsSearch::new(
        HttpFetcher::new(config.timeout())?,
        scrapers::build_providers(&config.providers),
        config.user_agent_pool(),
    )
    .with_failure_pause(config.failure_pause());

    let cors = api::cors_layer(&config.cors_origins)?;
    let app = api::router(Arc::new(search), cors);

    // ---- Serve ----
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}
