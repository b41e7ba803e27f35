//! Configuration module for Spread-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files
//! and resolving them into the [`CrawlConfig`] a run works from.
//!
//! # Example
//!
//! ```no_run
//! use spread_harvest::config::{load_config, CrawlConfig};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! let crawl = CrawlConfig::try_from(&config).unwrap();
//! println!("Crawling {} with {} workers", crawl.base_url, crawl.concurrency);
//! ```

mod parser;
mod ttl;
mod types;
mod validation;

// Re-export types
pub use types::{CacheConfig, CacheSettings, Config, CrawlConfig, CrawlerConfig, OutputConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, config_digest, load_config, load_config_with_hash, parse_config};
pub use ttl::parse_ttl;
