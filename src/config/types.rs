use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Main configuration structure for Spread-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Root of the dictionary site, e.g. `https://www.spreadthesign.com`
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Language code used as the first path segment, e.g. `en.us`
    pub language: String,

    /// Maximum number of tasks in flight at once
    pub concurrency: u32,
}

/// On-disk page cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Folder for cached pages; caching is disabled when absent
    pub folder: Option<String>,

    /// How long a cached page stays fresh, e.g. `1wk` or `12h`
    #[serde(default = "default_ttl")]
    pub ttl: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            folder: None,
            ttl: default_ttl(),
        }
    }
}

fn default_ttl() -> String {
    "1wk".to_string()
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON dataset written at the end of the run
    #[serde(rename = "data-path")]
    pub data_path: String,
}

/// Resolved cache settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    pub folder: PathBuf,
    pub ttl: Duration,
}

/// The immutable settings bundle a crawl run works from
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub base_url: Url,
    pub language: String,
    pub concurrency: usize,
    pub cache: Option<CacheSettings>,
}

impl CrawlConfig {
    /// Drops the cache settings so every page is fetched from the network
    pub fn without_cache(mut self) -> Self {
        self.cache = None;
        self
    }
}
