//! Runtime configuration for the search pipeline.
//!
//! Configuration is assembled once at startup from three layers, later layers
//! winning:
//! 1. Built-in defaults
//! 2. An optional YAML file (`--config`)
//! 3. Command-line flags and their environment variables
//!
//! The resulting [`SearchConfig`] is passed into the pipeline explicitly; there
//! is no process-wide mutable configuration.
//!
//! # Example file
//!
//! ```yaml
//! providers: [google-rss]
//! user_agent_mode: rotate
//! timeout_secs: 10
//! failure_pause_secs: 5
//! cors_origins: ["https://news.example.org"]
//! ```

use crate::cli::Cli;
use crate::errors::ConfigError;
use crate::scrapers::ProviderKind;
use clap::ValueEnum;
use rand::{Rng, rng};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, instrument};

/// User-Agent sent when rotation is disabled.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/101.0.4951.54 Safari/537.36";

/// Built-in pool used when rotation is enabled and no custom pool is given.
pub const ROTATION_POOL: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Mobile/15E148 Safari/604.1",
];

/// How the User-Agent header is chosen for each fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserAgentMode {
    /// Always send [`DEFAULT_USER_AGENT`].
    #[default]
    Fixed,
    /// Cycle through the pool, starting at a random offset for every request.
    Rotate,
}

/// Everything the pipeline and server need, fully resolved.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    pub host: String,
    pub port: u16,
    /// Providers queried for every keyword, in this order.
    pub providers: Vec<ProviderKind>,
    pub user_agent_mode: UserAgentMode,
    /// Custom rotation pool; empty means [`ROTATION_POOL`].
    pub user_agents: Vec<String>,
    pub timeout_secs: u64,
    /// Fixed pause after a failed fetch; zero disables it.
    pub failure_pause_secs: u64,
    /// Allowed CORS origins; empty means any origin.
    pub cors_origins: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            providers: vec![ProviderKind::Google, ProviderKind::Bing],
            user_agent_mode: UserAgentMode::Fixed,
            user_agents: Vec::new(),
            timeout_secs: 10,
            failure_pause_secs: 0,
            cors_origins: Vec::new(),
        }
    }
}

impl SearchConfig {
    /// Parse a YAML config document. Missing keys keep their defaults.
    pub fn from_yaml(yaml: &str, path: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|source| ConfigError::Yaml {
            path: path.to_string(),
            source,
        })
    }

    /// Resolve defaults, the optional config file, and CLI overrides.
    #[instrument(level = "info", skip_all)]
    pub async fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => {
                let yaml = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| ConfigError::Io {
                        path: path.clone(),
                        source,
                    })?;
                info!(%path, "Loaded configuration file");
                Self::from_yaml(&yaml, path)?
            }
            None => Self::default(),
        };
        config.apply_cli(cli);
        Ok(config)
    }

    /// Overlay any values given on the command line.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if !cli.providers.is_empty() {
            self.providers = cli.providers.clone();
        }
        if let Some(mode) = cli.user_agent_mode {
            self.user_agent_mode = mode;
        }
        if let Some(timeout) = cli.timeout_secs {
            self.timeout_secs = timeout;
        }
        if let Some(pause) = cli.failure_pause_secs {
            self.failure_pause_secs = pause;
        }
        if !cli.cors_origins.is_empty() {
            self.cors_origins = cli.cors_origins.clone();
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn failure_pause(&self) -> Duration {
        Duration::from_secs(self.failure_pause_secs)
    }

    /// The User-Agent strings this configuration draws from.
    pub fn user_agent_pool(&self) -> Vec<String> {
        match self.user_agent_mode {
            UserAgentMode::Fixed => vec![DEFAULT_USER_AGENT.to_string()],
            UserAgentMode::Rotate if self.user_agents.is_empty() => {
                ROTATION_POOL.iter().map(|ua| ua.to_string()).collect()
            }
            UserAgentMode::Rotate => self.user_agents.clone(),
        }
    }
}

/// Per-request User-Agent cycler.
///
/// A new rotation is created for every search, so no counter is shared
/// between requests.
#[derive(Debug)]
pub struct UserAgentRotation<'a> {
    pool: &'a [String],
    next: usize,
}

impl<'a> UserAgentRotation<'a> {
    /// Start at index `offset` (wrapped to the pool size).
    pub fn starting_at(pool: &'a [String], offset: usize) -> Self {
        let next = if pool.is_empty() { 0 } else { offset % pool.len() };
        Self { pool, next }
    }

    /// Start at a random position in the pool.
    pub fn random(pool: &'a [String]) -> Self {
        let offset = if pool.is_empty() {
            0
        } else {
            rng().random_range(0..pool.len())
        };
        Self::starting_at(pool, offset)
    }

    /// The User-Agent for the next fetch.
    pub fn next_agent(&mut self) -> &'a str {
        if self.pool.is_empty() {
            return DEFAULT_USER_AGENT;
        }
        let agent = &self.pool[self.next];
        self.next = (self.next + 1) % self.pool.len();
        agent
    }
}
