//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`PageSource`] trait
//! - Lenient anchor scanning for raw hrefs
//! - Single-page and depth-first recursive link collection
//! - The full harvest run (crawl, then scan every URL for addresses)

mod coordinator;
mod fetcher;
mod parser;
mod visited;

pub use coordinator::{
    Coordinator, CrawlLimits, CrawlOutput, FailureHook, LimitExceeded, PageScan,
};
pub use fetcher::{build_http_client, fetch_page, HttpFetcher, PageSource};
pub use parser::{extract_links, extract_title};
pub use visited::VisitedSet;

use crate::config::Config;
use crate::email::EmailMatcher;
use crate::output::HarvestReport;
use std::time::Instant;

/// Runs a complete harvest operation
///
/// This is the main entry point for a harvest. It will:
/// 1. Build the HTTP client and address matcher from the configuration
/// 2. Collect URLs from `url` (recursively if configured)
/// 3. Fetch every collected URL and scan it for addresses
///
/// Only the collected URLs are scanned; the start page contributes
/// addresses only when some page links back to it.
///
/// # Arguments
///
/// * `config` - The harvest configuration
/// * `url` - The starting page
/// * `hook` - Optional callback told about every failed fetch
///
/// # Returns
///
/// * `Ok(HarvestReport)` - Harvest completed (individual fetches may have failed)
/// * `Err(HarvestError)` - The client or address matcher could not be built
pub async fn run_harvest(
    config: &Config,
    url: &str,
    hook: Option<FailureHook>,
) -> crate::Result<HarvestReport> {
    let started_at = chrono::Utc::now();
    let start_time = Instant::now();

    let fetcher = HttpFetcher::new(&config.fetcher)?;
    let mut coordinator = Coordinator::new(fetcher).with_limits(config.crawl.limits());
    if config.emails.enabled {
        let matcher = EmailMatcher::new(&config.emails.domains, config.emails.anchor)?;
        coordinator = coordinator.with_matcher(matcher);
    }
    if let Some(hook) = hook {
        coordinator = coordinator.with_failure_hook(hook);
    }

    tracing::info!(
        "Collecting URLs from {} (recursive: {})",
        url,
        config.crawl.recursive
    );
    let output = coordinator.get_urls(url, config.crawl.recursive).await;
    tracing::info!("Collected {} URL(s)", output.urls.len());

    let mut pages = Vec::new();
    if config.emails.enabled {
        for (index, page_url) in output.urls.iter().enumerate() {
            tracing::debug!("Scanning [{}/{}] {}", index + 1, output.urls.len(), page_url);
            pages.push(coordinator.scan_page(page_url).await);
        }
    }

    Ok(HarvestReport {
        start_url: url.to_string(),
        recursive: config.crawl.recursive,
        started_at,
        duration: start_time.elapsed(),
        urls: output.urls,
        pages,
        stats: output.stats,
        limit_exceeded: output.limit_exceeded,
    })
}
