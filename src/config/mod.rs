//! Configuration module for Spider-Harvest
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every section has defaults, so running without a
//! file behaves exactly like an empty one.
//!
//! # Example
//!
//! ```no_run
//! use spider_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Recursive crawl: {}", config.crawl.recursive);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlConfig, EmailConfig, FetcherConfig, OutputConfig, DEFAULT_TIMEOUT_SECS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
pub(crate) use validation::validate_domain_string;
