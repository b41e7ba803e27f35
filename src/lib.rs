//! Spread-Harvest: a sign-language dictionary harvester
//!
//! This crate crawls the category listings of a sign-language dictionary site,
//! extracts each entry page (plus its regional variants) and merges the results
//! into a single dataset keyed by entry id.

pub mod config;
pub mod crawler;
pub mod dataset;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Spread-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Category index unavailable at {url}")]
    Discovery { url: String },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Entry page unavailable: {url}")]
    EntryUnavailable { url: String },

    #[error("Missing {element} on {url}")]
    MissingElement { url: String, element: &'static str },

    #[error("No numeric entry id in {url}")]
    MissingEntryId { url: String },

    #[error("Unknown category: {label}")]
    UnknownCategory { label: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid duration '{0}'")]
    InvalidDuration(String),
}

/// Result type alias for Spread-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, CrawlConfig};
pub use dataset::{tagify, Dataset, EntryRecord};
pub use crate::url::resolve;
