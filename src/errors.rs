//! Error types for fetching, parsing and configuration.

use thiserror::Error;

/// Why a single provider URL produced no items.
///
/// These never reach the caller; the pipeline logs and drops them so that
/// one failing source cannot affect the others.
#[derive(Error, Debug)]
pub enum FetchError {
    // Transport errors: timeouts, connection failures, body reads, bad URLs
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned status {status}")]
    Status { status: u16 },

    // Parsing errors
    #[error("Response parsing failed: {0}")]
    Parse(String),
}

impl From<quick_xml::de::DeError> for FetchError {
    fn from(err: quick_xml::de::DeError) -> Self {
        FetchError::Parse(err.to_string())
    }
}

/// Failures while assembling the runtime configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid CORS origin: {0}")]
    InvalidOrigin(String),
}

pub type FetchResult<T> = Result<T, FetchError>;
