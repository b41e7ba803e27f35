//! Crawler module for fetching and extracting dictionary pages
//!
//! This module contains the core crawling logic, including:
//! - Cache-aware HTTP fetching
//! - A bounded-concurrency task scheduler with a drain barrier
//! - Category discovery and listing pagination
//! - Entry and variant extraction
//! - Overall crawl coordination

mod cache;
mod coordinator;
mod discovery;
mod extractor;
mod fetcher;
mod pagination;
mod parser;
mod scheduler;

pub use cache::{is_fresh, PageCache};
pub use coordinator::{run_crawl, Coordinator, CrawlOutcome};
pub use discovery::{discover_categories, CategoryIndex};
pub use extractor::{EntryExtractor, SITE_LABEL};
pub use fetcher::{build_http_client, fetch_url, CachedDocument, FetchResult, FetchStats, Fetcher};
pub use pagination::{crawl_category_page, schedule_category, CategoryListing, EntryUrlSet};
pub use parser::{parse_category_index, parse_entry_page, parse_listing_page, EntryPage, ListingPage};
pub use scheduler::{Scheduler, SchedulerStats};

use crate::config::CrawlConfig;
use crate::HarvestError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client and page cache
/// 2. Discover the categories
/// 3. Walk every category listing and collect entry URLs
/// 4. Extract every entry and merge it into the dataset
///
/// # Arguments
///
/// * `config` - The resolved crawl settings
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - The merged dataset and run statistics
/// * `Err(HarvestError)` - The category index could not be fetched
pub async fn crawl(config: CrawlConfig) -> Result<CrawlOutcome, HarvestError> {
    run_crawl(config).await
}
