//! Statistics for a finished crawl
//!
//! This module provides the run summary the coordinator produces and the
//! console report printed at the end of a run.

use crate::crawler::{FetchStats, SchedulerStats};
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default)]
pub struct CrawlStatistics {
    /// Number of categories discovered
    pub categories: usize,

    /// Entry URLs collected across all categories (an entry listed under two
    /// categories counts twice)
    pub entry_urls: usize,

    /// Listing page tasks
    pub listing_tasks: SchedulerStats,

    /// Entry extraction tasks
    pub extraction_tasks: SchedulerStats,

    /// Extractions that produced no record because no video was found
    pub entries_without_media: usize,

    /// Records in the final dataset
    pub records: usize,

    /// Media references in the final dataset
    pub media: usize,

    /// Where pages came from
    pub fetches: FetchStats,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,
}

impl CrawlStatistics {
    /// Share of extraction tasks that finished without error, in percent
    pub fn extraction_success_rate(&self) -> f64 {
        let total = self.extraction_tasks.completed + self.extraction_tasks.failed;
        if total == 0 {
            return 0.0;
        }
        (self.extraction_tasks.completed as f64 / total as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Categories: {}", stats.categories);
    println!("  Entry URLs collected: {}", stats.entry_urls);
    println!("  Records written: {}", stats.records);
    println!("  Media references: {}", stats.media);
    println!("  Entries without video: {}", stats.entries_without_media);
    println!("  Duration: {:.1}s", stats.elapsed.as_secs_f64());
    println!();

    println!("Pages:");
    println!("  From network: {}", stats.fetches.network_fetches);
    println!("  From cache: {}", stats.fetches.cache_hits);
    println!("  Unavailable: {}", stats.fetches.unavailable);
    println!();

    println!("Tasks:");
    println!(
        "  Listing pages: {} ok, {} failed",
        stats.listing_tasks.completed, stats.listing_tasks.failed
    );
    println!(
        "  Entries: {} ok, {} failed",
        stats.extraction_tasks.completed, stats.extraction_tasks.failed
    );
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} entries extracted without error)",
        stats.extraction_success_rate(),
        stats.extraction_tasks.completed,
        stats.extraction_tasks.completed + stats.extraction_tasks.failed
    );
}
