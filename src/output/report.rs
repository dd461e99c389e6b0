//! Harvest report types
//!
//! This module defines the data produced by a harvest run and the error type
//! for writing it out.

use crate::crawler::{LimitExceeded, PageScan};
use crate::output::stats::CrawlStatistics;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Everything a harvest run found
#[derive(Debug, Clone)]
pub struct HarvestReport {
    pub start_url: String,
    pub recursive: bool,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,

    /// Collected URLs in discovery order
    pub urls: Vec<String>,

    /// One scan per collected URL (empty when address scanning is off)
    pub pages: Vec<PageScan>,

    pub stats: CrawlStatistics,
    pub limit_exceeded: Option<LimitExceeded>,
}

impl HarvestReport {
    /// Addresses across all pages, first occurrence wins
    ///
    /// The matcher only deduplicates within a page; this is the
    /// cross-page view used for display.
    pub fn unique_emails(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.pages
            .iter()
            .flat_map(|page| page.emails.iter())
            .map(String::as_str)
            .filter(|email| seen.insert(*email))
            .collect()
    }

    /// Number of address scans whose fetch failed
    pub fn scan_failures(&self) -> usize {
        self.pages.iter().filter(|page| !page.fetched).count()
    }

    /// One-line summary in the form "Found N url(s), M email(s)"
    pub fn headline(&self) -> String {
        format!(
            "Found {} url(s), {} email(s)",
            self.urls.len(),
            self.unique_emails().len()
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn scan(url: &str, emails: &[&str]) -> PageScan {
        PageScan {
            url: url.to_string(),
            title: None,
            emails: emails.iter().map(|e| e.to_string()).collect(),
            fetched: true,
        }
    }

    pub(crate) fn create_test_report() -> HarvestReport {
        HarvestReport {
            start_url: "http://x.test/".to_string(),
            recursive: true,
            started_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            duration: Duration::from_millis(1500),
            urls: vec![
                "http://x.test/a".to_string(),
                "http://x.test/b".to_string(),
            ],
            pages: vec![
                scan("http://x.test/a", &["foo@gmail.com", "bar@yahoo.com"]),
                scan("http://x.test/b", &["foo@gmail.com"]),
            ],
            stats: CrawlStatistics {
                pages_fetched: 3,
                fetch_failures: 0,
                links_extracted: 6,
                links_kept: 4,
                links_rejected: 2,
            },
            limit_exceeded: None,
        }
    }

    #[test]
    fn test_unique_emails_across_pages() {
        let report = create_test_report();
        assert_eq!(report.unique_emails(), vec!["foo@gmail.com", "bar@yahoo.com"]);
    }

    #[test]
    fn test_headline() {
        let report = create_test_report();
        assert_eq!(report.headline(), "Found 2 url(s), 2 email(s)");
    }

    #[test]
    fn test_scan_failures() {
        let mut report = create_test_report();
        assert_eq!(report.scan_failures(), 0);
        report.pages[1].fetched = false;
        assert_eq!(report.scan_failures(), 1);
    }
}
