//! APA Crawler: collects Advance Pricing Agreement rulings from the
//! Belastingdienst website
//!
//! The crate ships two independent tools that share one fetch/parse stack:
//! - [`crawler::DocumentCrawler`] follows ruling links from the index page,
//!   resolves the PDF behind each intermediate page and records metadata.
//! - [`crawler::TitleWalker`] walks the site depth-first and collects every
//!   ruling title of the form `20200101 APA 123456`.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for APA crawler operations
#[derive(Debug, Error)]
pub enum ApaError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// A single failed request
///
/// Every variant carries the requested URL so callers can log the failure
/// and move on to the next candidate.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}")]
    Connect { url: String },

    #[error("HTTP error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },
}

impl FetchError {
    /// The URL whose request failed
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. }
            | Self::Timeout { url }
            | Self::Connect { url }
            | Self::Network { url, .. } => url,
        }
    }
}

/// Errors raised while writing reports or downloaded files
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Download failed: {0}")]
    Download(#[from] FetchError),
}

/// Result type alias for APA crawler operations
pub type Result<T> = std::result::Result<T, ApaError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for output operations
pub type OutputResult<T> = std::result::Result<T, OutputError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{DocumentCrawler, TitleWalker};
pub use output::{ApaDocument, CrawlReporter, TracingReporter};
pub use state::{PageOutcome, VisitedSet};
