//! Crawler coordinator - main crawl orchestration logic
//!
//! This module runs the two crawl phases on a shared scheduler:
//! - Discovering categories from the category index
//! - Walking every category listing, page by page, collecting entry URLs
//! - Extracting every collected entry and merging it into the dataset
//!
//! Each phase ends with a drain barrier, so no entry is extracted before all
//! pagination (including pages found along the way) has settled.

use crate::config::CrawlConfig;
use crate::crawler::discovery::{discover_categories, CategoryIndex};
use crate::crawler::extractor::EntryExtractor;
use crate::crawler::fetcher::{build_http_client, Fetcher};
use crate::crawler::pagination::{schedule_category, CategoryListing};
use crate::crawler::scheduler::{Scheduler, SchedulerStats};
use crate::dataset::Dataset;
use crate::output::CrawlStatistics;
use crate::url::language_root_url;
use crate::HarvestError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use url::Url;

/// The result of a finished crawl
#[derive(Debug)]
pub struct CrawlOutcome {
    pub dataset: Dataset,
    pub statistics: CrawlStatistics,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: CrawlConfig,
    fetcher: Arc<Fetcher>,
    scheduler: Scheduler,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The resolved crawl settings
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(HarvestError)` - The HTTP client could not be built
    pub fn new(config: CrawlConfig) -> Result<Self, HarvestError> {
        let client = build_http_client().map_err(HarvestError::HttpClient)?;
        let fetcher = Arc::new(Fetcher::new(client, config.cache.clone()));
        let scheduler = Scheduler::new(config.concurrency);

        if let Some(cache) = &config.cache {
            tracing::info!(
                "Caching pages in {} for {:?}",
                cache.folder.display(),
                cache.ttl
            );
        }

        Ok(Self {
            config,
            fetcher,
            scheduler,
        })
    }

    /// Runs the crawl to completion
    ///
    /// Only a failure to discover categories aborts the run; failures of
    /// individual listing pages or entries are logged and counted.
    pub async fn run(&self) -> Result<CrawlOutcome, HarvestError> {
        let start_time = Instant::now();
        tracing::info!(
            "Starting crawl of {} ({}) with concurrency {}",
            self.config.base_url,
            self.config.language,
            self.scheduler.concurrency()
        );

        let categories = discover_categories(&self.fetcher, &self.config).await?;

        let listings = self.collect_entry_urls(&categories).await;
        let listing_tasks = self.scheduler.stats();
        let entry_urls = count_entry_urls(&listings).await;
        tracing::info!(
            "Pagination finished: {} entry URLs across {} categories",
            entry_urls,
            listings.len()
        );

        let dataset = Arc::new(Mutex::new(Dataset::new()));
        let without_media = Arc::new(AtomicUsize::new(0));
        self.extract_entries(categories, &listings, &dataset, &without_media)
            .await?;
        let all_tasks = self.scheduler.stats();
        let extraction_tasks = SchedulerStats {
            completed: all_tasks.completed - listing_tasks.completed,
            failed: all_tasks.failed - listing_tasks.failed,
        };

        let dataset = std::mem::take(&mut *dataset.lock().await);
        let statistics = CrawlStatistics {
            categories: listings.len(),
            entry_urls,
            listing_tasks,
            extraction_tasks,
            entries_without_media: without_media.load(Ordering::Relaxed),
            records: dataset.len(),
            media: dataset.media_count(),
            fetches: self.fetcher.stats(),
            elapsed: start_time.elapsed(),
        };

        tracing::info!(
            "Crawl completed: {} records from {} entry URLs in {:?} ({} failed tasks)",
            statistics.records,
            statistics.entry_urls,
            statistics.elapsed,
            listing_tasks.failed + extraction_tasks.failed
        );

        Ok(CrawlOutcome {
            dataset,
            statistics,
        })
    }

    /// Phase one: paginate every category, then wait for the queue to drain
    async fn collect_entry_urls(&self, categories: &CategoryIndex) -> Vec<Arc<CategoryListing>> {
        let mut listings = Vec::with_capacity(categories.len());

        for (label, url) in categories {
            let listing = Arc::new(CategoryListing::new(label.clone(), url.clone()));
            schedule_category(&self.scheduler, Arc::clone(&self.fetcher), Arc::clone(&listing))
                .await;
            listings.push(listing);
        }

        self.scheduler.drain().await;
        listings
    }

    /// Phase two: extract every collected entry, then wait for the queue to drain
    ///
    /// An entry listed under several categories is extracted once per
    /// category; the dataset merge folds the category tags together.
    async fn extract_entries(
        &self,
        categories: CategoryIndex,
        listings: &[Arc<CategoryListing>],
        dataset: &Arc<Mutex<Dataset>>,
        without_media: &Arc<AtomicUsize>,
    ) -> Result<(), HarvestError> {
        let home = language_root_url(&self.config.base_url, &self.config.language)?;
        let extractor = Arc::new(EntryExtractor::new(
            Arc::clone(&self.fetcher),
            Arc::new(categories),
            home,
        ));

        for listing in listings {
            for entry_url in listing.entry_urls().await {
                let extractor = Arc::clone(&extractor);
                let dataset = Arc::clone(dataset);
                let without_media = Arc::clone(without_media);
                let category = listing.label.clone();
                let label = format!("entry {} ({})", entry_url, category);

                self.scheduler.add(label, move || async move {
                    extract_and_merge(&extractor, &dataset, &without_media, &entry_url, &category)
                        .await
                });
            }
        }

        self.scheduler.drain().await;
        Ok(())
    }
}

/// One extraction task: extract the entry and fold it into the dataset
async fn extract_and_merge(
    extractor: &EntryExtractor,
    dataset: &Mutex<Dataset>,
    without_media: &AtomicUsize,
    entry_url: &Url,
    category: &str,
) -> Result<(), HarvestError> {
    match extractor.extract(entry_url, category).await? {
        Some(record) => {
            dataset.lock().await.merge(record);
        }
        None => {
            without_media.fetch_add(1, Ordering::Relaxed);
        }
    }
    Ok(())
}

/// Total number of entry URLs collected across listings
async fn count_entry_urls(listings: &[Arc<CategoryListing>]) -> usize {
    let mut total = 0;
    for listing in listings {
        total += listing.entry_count().await;
    }
    total
}

/// Runs a complete crawl with the given settings
pub async fn run_crawl(config: CrawlConfig) -> Result<CrawlOutcome, HarvestError> {
    Coordinator::new(config)?.run().await
}
