//! Output module for presenting harvest results
//!
//! This module handles:
//! - Printing collected URLs and addresses to the terminal
//! - Generating markdown reports
//! - Recording crawl statistics

mod markdown;
mod report;
pub mod stats;

pub use markdown::{format_markdown_report, generate_markdown_report};
pub use report::{HarvestReport, OutputError, OutputResult};
pub use stats::{print_statistics, CrawlStatistics};

/// Prints a harvest report to stdout
///
/// URLs come first in discovery order, then the addresses with duplicates
/// across pages removed, then the one-line summary.
pub fn print_report(report: &HarvestReport) {
    println!("=== URLs ({}) ===", report.urls.len());
    for url in &report.urls {
        println!("{}", url);
    }

    let emails = report.unique_emails();
    println!("\n=== Emails ({}) ===", emails.len());
    for email in &emails {
        println!("{}", email);
    }

    if let Some(limit) = report.limit_exceeded {
        println!("\nStopped early: {}", limit);
    }

    println!("\n{}", report.headline());
}
