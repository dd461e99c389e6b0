//! Markdown report generation
//!
//! This module renders a harvest report as a markdown document: run
//! information, crawl statistics, the collected URLs and the addresses found
//! on each page.

use crate::output::report::{HarvestReport, OutputResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown report of the harvest to `output_path`
///
/// # Arguments
///
/// * `report` - The harvest report
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to write the report
pub fn generate_markdown_report(report: &HarvestReport, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_report(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a harvest report as markdown
pub fn format_markdown_report(report: &HarvestReport) -> String {
    let mut md = String::new();

    md.push_str("# Spider-Harvest Report\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Start URL**: {}\n", report.start_url));
    md.push_str(&format!(
        "- **Mode**: {}\n",
        if report.recursive {
            "recursive"
        } else {
            "single page"
        }
    ));
    md.push_str(&format!(
        "- **Started**: {}\n",
        report.started_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n",
        report.duration.as_secs_f64()
    ));
    if let Some(limit) = report.limit_exceeded {
        md.push_str(&format!("- **Stopped early**: {}\n", limit));
    }
    md.push_str(&format!("- **Result**: {}\n\n", report.headline()));

    // Crawl statistics
    let stats = &report.stats;
    md.push_str("## Crawl Statistics\n\n");
    md.push_str("| Metric | Count |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Pages Fetched | {} |\n", stats.pages_fetched));
    md.push_str(&format!("| Fetch Failures | {} |\n", stats.fetch_failures));
    md.push_str(&format!("| Links Extracted | {} |\n", stats.links_extracted));
    md.push_str(&format!("| Links Kept | {} |\n", stats.links_kept));
    md.push_str(&format!("| Links Rejected | {} |\n", stats.links_rejected));
    md.push_str(&format!(
        "| Success Rate | {:.2}% |\n\n",
        stats.success_rate()
    ));

    // URLs
    md.push_str("## URLs\n\n");
    if report.urls.is_empty() {
        md.push_str("No URLs found.\n\n");
    } else {
        for url in &report.urls {
            md.push_str(&format!("- {}\n", url));
        }
        md.push('\n');
    }

    // Addresses
    let emails = report.unique_emails();
    if !emails.is_empty() {
        md.push_str("## Email Addresses\n\n");
        for email in &emails {
            md.push_str(&format!("- {}\n", email));
        }
        md.push('\n');

        md.push_str("## Addresses by Page\n\n");
        md.push_str("| Page | Title | Addresses |\n");
        md.push_str("|------|-------|-----------|\n");
        for page in report.pages.iter().filter(|p| !p.emails.is_empty()) {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                page.url,
                page.title.as_deref().unwrap_or("-"),
                page.emails.join(", ")
            ));
        }
        md.push('\n');
    }

    let failures = report.scan_failures();
    if failures > 0 {
        md.push_str(&format!(
            "_{} page(s) could not be fetched for address scanning._\n",
            failures
        ));
    }

    md
}
