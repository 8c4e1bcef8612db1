//! Command-line interface definitions for the news search service.
//!
//! Every option can be given as a flag or as an environment variable. All of
//! them are optional: anything left unset falls back to the config file (if
//! `--config` is given) and then to the built-in defaults.

use crate::config::UserAgentMode;
use crate::scrapers::ProviderKind;
use clap::Parser;

/// Command-line arguments for the news search service.
///
/// # Examples
///
/// ```sh
/// # Google and Bing HTML search on port 8000
/// news_search
///
/// # RSS profile: rotating User-Agents and a 5 second pause after failures
/// news_search --provider google-rss --user-agent-mode rotate --failure-pause-secs 5
///
/// # Restrict CORS to the deployed frontend
/// news_search --cors-origin https://news.example.org
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long, env = "NEWS_SEARCH_CONFIG")]
    pub config: Option<String>,

    /// Address to bind the HTTP server to
    #[arg(long, env = "NEWS_SEARCH_HOST")]
    pub host: Option<String>,

    /// Port to bind the HTTP server to
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Provider to query for every keyword (repeatable, queried in order)
    #[arg(long = "provider", value_enum, env = "NEWS_SEARCH_PROVIDERS", value_delimiter = ',')]
    pub providers: Vec<ProviderKind>,

    /// How the User-Agent header is chosen
    #[arg(long, value_enum, env = "NEWS_SEARCH_USER_AGENT_MODE")]
    pub user_agent_mode: Option<UserAgentMode>,

    /// Per-request timeout for upstream fetches, in seconds
    #[arg(long, env = "NEWS_SEARCH_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Pause after a failed upstream fetch, in seconds (0 disables)
    #[arg(long, env = "NEWS_SEARCH_FAILURE_PAUSE_SECS")]
    pub failure_pause_secs: Option<u64>,

    /// Allowed CORS origin (repeatable); any origin is allowed when unset
    #[arg(long = "cors-origin", env = "NEWS_SEARCH_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,
}
