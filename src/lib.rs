//! Spider-Harvest: a scoped link crawler and address harvester
//!
//! This crate fetches a web page, extracts the hyperlinks it contains, optionally
//! follows them depth-first while they stay inside the current directory scope,
//! and scans every page found for email addresses on a whitelist of mail providers.

pub mod config;
pub mod crawler;
pub mod email;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Spider-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid start URL: {0}")]
    InvalidStartUrl(String),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
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

    #[error("Invalid domain in email whitelist: {0}")]
    InvalidDomain(String),

    #[error("Failed to compile address pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Errors raised while fetching a single page
///
/// These never escape the crawl or email APIs; they are handed to the
/// failure hook and the page is treated as empty.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {source}")]
    Connect { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

impl FetchError {
    /// The URL whose fetch failed
    pub fn url(&self) -> &str {
        match self {
            Self::InvalidUrl { url, .. }
            | Self::Timeout { url }
            | Self::Connect { url, .. }
            | Self::Status { url, .. }
            | Self::Http { url, .. }
            | Self::Body { url, .. } => url,
        }
    }
}

/// Result type alias for Spider-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for single-page fetches
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, CrawlOutput, FailureHook, HttpFetcher, PageSource};
pub use email::{AnchorMode, EmailMatcher};
pub use crate::url::{base_path, resolve_link};
