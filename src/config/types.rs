use crate::crawler::CrawlLimits;
use crate::email::{AnchorMode, DEFAULT_DOMAINS};
use serde::Deserialize;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Main configuration structure for Spider-Harvest
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetcher: FetcherConfig,
    pub crawl: CrawlConfig,
    pub emails: EmailConfig,
    pub output: OutputConfig,
}

/// HTTP fetcher configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Follow discovered URLs depth-first
    pub recursive: bool,

    /// Maximum number of distinct URLs collected by a recursive crawl
    #[serde(rename = "max-pages")]
    pub max_pages: Option<usize>,

    /// Maximum link distance from the start page that is still fetched
    #[serde(rename = "max-depth")]
    pub max_depth: Option<usize>,
}

impl CrawlConfig {
    pub fn limits(&self) -> CrawlLimits {
        CrawlLimits {
            max_pages: self.max_pages,
            max_depth: self.max_depth,
        }
    }
}

/// Address matching configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Scan every collected URL for addresses
    pub enabled: bool,

    /// Whitelisted mail-provider domains
    pub domains: Vec<String>,

    /// What the pattern anchors bind to
    pub anchor: AnchorMode,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            domains: DEFAULT_DOMAINS.iter().map(|d| d.to_string()).collect(),
            anchor: AnchorMode::default(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to an optional markdown report
    #[serde(rename = "summary-path")]
    pub summary_path: Option<String>,
}
