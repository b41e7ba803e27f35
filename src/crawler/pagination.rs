//! Category pagination: collects every entry URL a category lists
//!
//! Each listing page is its own scheduled task. A page that links to a next
//! page schedules that page on the same scheduler, sharing the category's
//! accumulator, so arbitrarily long listings are walked without recursion.

use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::parse_listing_page;
use crate::crawler::scheduler::Scheduler;
use crate::url::without_fragment;
use crate::HarvestError;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use url::Url;

/// Entry URLs in first-seen order, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryUrlSet {
    urls: Vec<Url>,
}

impl EntryUrlSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `url` unless an equal URL (ignoring fragments) is already present
    ///
    /// Returns whether the URL was added.
    pub fn insert(&mut self, url: &Url) -> bool {
        let url = without_fragment(url);
        if self.urls.contains(&url) {
            return false;
        }
        self.urls.push(url);
        true
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn urls(&self) -> &[Url] {
        &self.urls
    }
}

/// Pagination state for one category
#[derive(Debug)]
pub struct CategoryListing {
    pub label: String,
    pub url: Url,
    entries: Mutex<EntryUrlSet>,
    visited_pages: Mutex<HashSet<Url>>,
}

impl CategoryListing {
    pub fn new(label: impl Into<String>, url: Url) -> Self {
        Self {
            label: label.into(),
            url,
            entries: Mutex::new(EntryUrlSet::new()),
            visited_pages: Mutex::new(HashSet::new()),
        }
    }

    /// Snapshot of the entry URLs collected so far
    pub async fn entry_urls(&self) -> Vec<Url> {
        self.entries.lock().await.urls().to_vec()
    }

    pub async fn entry_count(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Records a listing page as visited; false if it was seen before
    async fn mark_visited(&self, page_url: &Url) -> bool {
        self.visited_pages
            .lock()
            .await
            .insert(without_fragment(page_url))
    }
}

/// Schedules the first page of a category's listing
pub async fn schedule_category(
    scheduler: &Scheduler,
    fetcher: Arc<Fetcher>,
    listing: Arc<CategoryListing>,
) {
    let first_page = listing.url.clone();
    listing.mark_visited(&first_page).await;
    schedule_page(scheduler, fetcher, listing, first_page);
}

fn schedule_page(
    scheduler: &Scheduler,
    fetcher: Arc<Fetcher>,
    listing: Arc<CategoryListing>,
    page_url: Url,
) {
    let handle = scheduler.clone();
    let label = format!("listing {} ({})", listing.label, page_url);
    scheduler.add(label, move || async move {
        crawl_category_page(&handle, fetcher, listing, page_url).await
    });
}

/// Processes one listing page
///
/// New entry links are appended to the category's accumulator and the next
/// page, if any, is scheduled. An unavailable page simply ends the walk; a
/// next link pointing at a page already visited is not followed.
pub async fn crawl_category_page(
    scheduler: &Scheduler,
    fetcher: Arc<Fetcher>,
    listing: Arc<CategoryListing>,
    page_url: Url,
) -> Result<(), HarvestError> {
    let Some(doc) = fetcher.fetch_document(&page_url).await? else {
        tracing::debug!("Listing page {} unavailable, stopping", page_url);
        return Ok(());
    };
    let page = parse_listing_page(&doc);

    let added = {
        let mut entries = listing.entries.lock().await;
        page.entries.iter().filter(|url| entries.insert(url)).count()
    };
    tracing::debug!(
        "{}: {} new entries on {} ({} listed)",
        listing.label,
        added,
        page_url,
        page.entries.len()
    );

    if let Some(next_page) = page.next_page {
        if listing.mark_visited(&next_page).await {
            schedule_page(scheduler, fetcher, listing, next_page);
        } else {
            tracing::warn!(
                "{}: next page {} already visited, stopping pagination",
                listing.label,
                next_page
            );
        }
    }

    Ok(())
}
