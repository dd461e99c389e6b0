//! Crawl statistics
//!
//! Counters accumulated by the coordinator during a single crawl call and
//! printed at the end of a harvest run.

/// Crawl statistics summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Pages fetched successfully
    pub pages_fetched: u64,

    /// Fetches that failed (network, timeout, status)
    pub fetch_failures: u64,

    /// Raw hrefs found across all fetched pages
    pub links_extracted: u64,

    /// Hrefs that survived resolution
    pub links_kept: u64,

    /// Hrefs dropped by the resolver
    pub links_rejected: u64,
}

impl CrawlStatistics {
    /// Records one successfully scanned page
    pub fn record_page(&mut self, extracted: usize, kept: usize) {
        self.pages_fetched += 1;
        self.links_extracted += extracted as u64;
        self.links_kept += kept as u64;
        self.links_rejected += extracted.saturating_sub(kept) as u64;
    }

    /// Records one failed fetch
    pub fn record_failure(&mut self) {
        self.fetch_failures += 1;
    }

    /// Total fetch attempts
    pub fn pages_attempted(&self) -> u64 {
        self.pages_fetched + self.fetch_failures
    }

    /// Percentage of fetch attempts that succeeded
    pub fn success_rate(&self) -> f64 {
        let attempted = self.pages_attempted();
        if attempted == 0 {
            return 0.0;
        }
        (self.pages_fetched as f64 / attempted as f64) * 100.0
    }
}

/// Prints statistics to stdout in a human-readable format
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");
    println!("Pages fetched:    {}", stats.pages_fetched);
    println!("Fetch failures:   {}", stats.fetch_failures);
    println!("Success rate:     {:.2}%", stats.success_rate());
    println!("Links extracted:  {}", stats.links_extracted);
    println!("Links kept:       {}", stats.links_kept);
    println!("Links rejected:   {}", stats.links_rejected);
}
