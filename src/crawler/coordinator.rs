//! Crawler coordinator - main crawl orchestration logic
//!
//! This module ties the fetcher, the link extractor and the URL resolver
//! together:
//! - Single-page extraction (no recursion, no deduplication)
//! - Depth-first traversal of every in-scope URL reachable from a start page
//! - Per-page address harvesting
//!
//! Fetches run strictly one after another. A failed fetch never aborts a
//! crawl: the page counts as empty and the failure hook, if any, is told.

use crate::crawler::fetcher::PageSource;
use crate::crawler::parser::{extract_links, extract_title};
use crate::crawler::visited::VisitedSet;
use crate::email::EmailMatcher;
use crate::output::CrawlStatistics;
use crate::url::{base_path, is_uri_reference, resolve_all, start_scope};
use crate::FetchError;
use std::fmt;
use std::sync::Arc;

/// Callback told about every failed fetch
pub type FailureHook = Arc<dyn Fn(&FetchError) + Send + Sync>;

/// Optional bounds on a recursive crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlLimits {
    /// Stop once this many distinct URLs have been collected
    pub max_pages: Option<usize>,

    /// Do not fetch pages more than this many links away from the start page
    pub max_depth: Option<usize>,
}

/// Which limit cut a crawl short
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitExceeded {
    /// More distinct URLs were reachable than `max_pages`
    Pages(usize),
    /// Pages deeper than `max_depth` were recorded but not fetched
    Depth(usize),
}

impl fmt::Display for LimitExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pages(max) => write!(f, "page limit of {} reached", max),
            Self::Depth(max) => write!(f, "depth limit of {} reached", max),
        }
    }
}

/// Result of a crawl call
#[derive(Debug, Clone, Default)]
pub struct CrawlOutput {
    /// Resolved URLs in discovery order
    pub urls: Vec<String>,

    /// Counters for this call only
    pub stats: CrawlStatistics,

    /// Set when a configured limit stopped the traversal early
    pub limit_exceeded: Option<LimitExceeded>,
}

/// Addresses found on one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageScan {
    pub url: String,
    pub title: Option<String>,
    pub emails: Vec<String>,
    /// False when the fetch failed and the page was treated as empty
    pub fetched: bool,
}

/// Main crawler coordinator structure
pub struct Coordinator<S> {
    source: S,
    matcher: EmailMatcher,
    limits: CrawlLimits,
    on_failure: Option<FailureHook>,
}

impl<S: PageSource> Coordinator<S> {
    /// Creates a coordinator reading pages from `source`
    ///
    /// Uses the default address whitelist, no crawl limits and no failure hook.
    pub fn new(source: S) -> Self {
        Self {
            source,
            matcher: EmailMatcher::default(),
            limits: CrawlLimits::default(),
            on_failure: None,
        }
    }

    pub fn with_matcher(mut self, matcher: EmailMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn with_limits(mut self, limits: CrawlLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Registers a callback invoked with every fetch error
    pub fn with_failure_hook(mut self, hook: FailureHook) -> Self {
        self.on_failure = Some(hook);
        self
    }

    /// Collects the URLs reachable from `url`
    ///
    /// # Arguments
    ///
    /// * `url` - The starting page
    /// * `recursive` - Follow discovered URLs depth-first instead of reading
    ///   only the starting page
    ///
    /// # Returns
    ///
    /// The resolved URLs in discovery order. Fetch failures only shrink the
    /// result; they are never returned as errors.
    pub async fn get_urls(&self, url: &str, recursive: bool) -> CrawlOutput {
        if recursive {
            self.crawl_all(url).await
        } else {
            let mut stats = CrawlStatistics::default();
            let urls = self.page_links(url, &start_scope(url), &mut stats).await;
            CrawlOutput {
                urls,
                stats,
                limit_exceeded: None,
            }
        }
    }

    /// Resolves the links of a single page
    ///
    /// The page's scope is `url` itself with a trailing slash. Links are
    /// returned in document order and duplicates are kept.
    pub async fn crawl_one_page(&self, url: &str) -> Vec<String> {
        self.get_urls(url, false).await.urls
    }

    /// Walks every in-scope URL reachable from `url`, depth-first
    ///
    /// # Traversal
    ///
    /// 1. The start page is read with its own URL (plus `/`) as scope
    /// 2. Each resolved link not seen before is recorded, then its page is
    ///    read immediately with that page's directory as scope
    /// 3. When a page's links are exhausted the walk returns to the page
    ///    that linked to it
    ///
    /// The start URL itself is only part of the result if some page links
    /// back to it. Each call owns its visited set, so concurrent calls do not
    /// interfere.
    pub async fn crawl_all(&self, url: &str) -> CrawlOutput {
        let mut stats = CrawlStatistics::default();
        let mut visited = VisitedSet::new();
        let mut limit_exceeded = None;

        tracing::info!("Starting recursive crawl at {}", url);

        let root_links = self.page_links(url, &start_scope(url), &mut stats).await;
        let mut stack = vec![root_links.into_iter()];

        while let Some(frame) = stack.last_mut() {
            let Some(next) = frame.next() else {
                stack.pop();
                continue;
            };

            if visited.contains(&next) {
                continue;
            }

            if let Some(max) = self.limits.max_pages {
                if visited.len() >= max {
                    tracing::warn!("Page limit of {} reached, stopping crawl", max);
                    limit_exceeded = Some(LimitExceeded::Pages(max));
                    break;
                }
            }

            visited.insert(&next);
            let depth = stack.len();
            tracing::debug!("Discovered [depth {}]: {}", depth, next);

            if let Some(max) = self.limits.max_depth {
                if depth > max {
                    limit_exceeded.get_or_insert(LimitExceeded::Depth(max));
                    continue;
                }
            }

            let links = self.page_links(&next, &base_path(&next), &mut stats).await;
            stack.push(links.into_iter());
        }

        tracing::info!(
            "Crawl of {} finished: {} URLs, {} pages fetched, {} failures",
            url,
            visited.len(),
            stats.pages_fetched,
            stats.fetch_failures
        );

        CrawlOutput {
            urls: visited.into_urls(),
            stats,
            limit_exceeded,
        }
    }

    /// Fetches `url` and returns the whitelisted addresses on it
    ///
    /// A failed fetch yields an empty list.
    pub async fn harvest_emails(&self, url: &str) -> Vec<String> {
        self.scan_page(url).await.emails
    }

    /// Fetches `url` and collects its title and whitelisted addresses
    pub async fn scan_page(&self, url: &str) -> PageScan {
        match self.fetch(url).await {
            Some(body) => PageScan {
                url: url.to_string(),
                title: extract_title(&body),
                emails: self.matcher.extract_emails(&body),
                fetched: true,
            },
            None => PageScan {
                url: url.to_string(),
                title: None,
                emails: Vec::new(),
                fetched: false,
            },
        }
    }

    /// Fetches one page and resolves its links against `base`
    async fn page_links(&self, url: &str, base: &str, stats: &mut CrawlStatistics) -> Vec<String> {
        if !is_uri_reference(url) {
            tracing::debug!("Skipping unparseable page URL {:?}", url);
            return Vec::new();
        }

        let Some(body) = self.fetch(url).await else {
            stats.record_failure();
            return Vec::new();
        };

        let raw_links = extract_links(&body);
        let resolved = resolve_all(&raw_links, base);
        stats.record_page(raw_links.len(), resolved.len());

        tracing::debug!(
            "Fetched {}: {} links, {} in scope of {}",
            url,
            raw_links.len(),
            resolved.len(),
            base
        );

        resolved
    }

    async fn fetch(&self, url: &str) -> Option<String> {
        match self.source.fetch(url).await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::debug!("Fetch failed, treating page as empty: {}", e);
                if let Some(hook) = &self.on_failure {
                    hook(&e);
                }
                None
            }
        }
    }
}
