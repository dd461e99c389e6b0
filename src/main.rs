//! Spider-Harvest main entry point
//!
//! This is the command-line interface for the Spider-Harvest link crawler.

use clap::Parser;
use spider_harvest::config::{load_config_with_hash, validate, Config};
use spider_harvest::crawler::{run_harvest, FailureHook};
use spider_harvest::email::AnchorMode;
use spider_harvest::output::{generate_markdown_report, print_report, print_statistics};
use spider_harvest::{FetchError, HarvestError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Spider-Harvest: a scoped link crawler and address harvester
///
/// Spider-Harvest collects the links of a page that stay inside its
/// directory scope, optionally follows them depth-first, and scans every
/// page it found for email addresses on a mail-provider whitelist.
#[derive(Parser, Debug)]
#[command(name = "spider-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A scoped link crawler and address harvester", long_about = None)]
struct Cli {
    /// Starting URL
    #[arg(value_name = "URL")]
    url: String,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Follow discovered links depth-first
    #[arg(short, long)]
    recursive: bool,

    /// Only collect URLs, skip the address scan
    #[arg(long)]
    no_emails: bool,

    /// Stop a recursive crawl after this many distinct URLs
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Do not fetch pages further than this many links from the start page
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// What the address pattern anchors bind to (line, token, text)
    #[arg(long, value_name = "MODE")]
    anchor: Option<AnchorMode>,

    /// Write a markdown report to this path
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Print crawl statistics after the results
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    if let Err(e) = url::Url::parse(&cli.url) {
        tracing::error!("Invalid start URL {}: {}", cli.url, e);
        return Err(HarvestError::InvalidStartUrl(format!("{}: {}", cli.url, e)).into());
    }

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Fetch failures never abort the run; surface them as warnings
    let hook: FailureHook = Arc::new(|e: &FetchError| tracing::warn!("{}", e));

    let report = match run_harvest(&config, &cli.url, Some(hook)).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            return Err(e.into());
        }
    };

    print_report(&report);

    if cli.stats {
        println!();
        print_statistics(&report.stats);
    }

    if let Some(path) = &config.output.summary_path {
        generate_markdown_report(&report, Path::new(path)).map_err(HarvestError::from)?;
        tracing::info!("Report written to: {}", path);
    }

    Ok(())
}

/// Loads the configuration file (if any) and applies command-line overrides
fn build_config(cli: &Cli) -> spider_harvest::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if cli.recursive {
        config.crawl.recursive = true;
    }
    if cli.no_emails {
        config.emails.enabled = false;
    }
    if cli.max_pages.is_some() {
        config.crawl.max_pages = cli.max_pages;
    }
    if cli.max_depth.is_some() {
        config.crawl.max_depth = cli.max_depth;
    }
    if let Some(timeout) = cli.timeout {
        config.fetcher.timeout_secs = timeout;
    }
    if let Some(anchor) = cli.anchor {
        config.emails.anchor = anchor;
    }
    if let Some(path) = &cli.summary {
        config.output.summary_path = Some(path.display().to_string());
    }

    validate(&config)?;
    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("spider_harvest=info,warn"),
            1 => EnvFilter::new("spider_harvest=debug,info"),
            2 => EnvFilter::new("spider_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
