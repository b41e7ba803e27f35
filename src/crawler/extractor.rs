//! Entry extraction: turns an entry page and its variants into one record

use crate::crawler::discovery::CategoryIndex;
use crate::crawler::fetcher::{CachedDocument, Fetcher};
use crate::crawler::parser::{parse_entry_page, parse_video_sources};
use crate::dataset::{entry_tags, EntryRecord, MediaSource, Provider};
use crate::url::extract_entry_id;
use crate::HarvestError;
use std::sync::Arc;
use url::Url;

/// Label of the first breadcrumb on every record
pub const SITE_LABEL: &str = "Spread The Sign";

/// Extracts entry records; shared by every extraction task
pub struct EntryExtractor {
    fetcher: Arc<Fetcher>,
    categories: Arc<CategoryIndex>,
    home: Url,
}

impl EntryExtractor {
    /// # Arguments
    ///
    /// * `fetcher` - Page source shared with the rest of the crawl
    /// * `categories` - The discovered category index, used for breadcrumbs
    /// * `home` - The language's home page, the first breadcrumb
    pub fn new(fetcher: Arc<Fetcher>, categories: Arc<CategoryIndex>, home: Url) -> Self {
        Self {
            fetcher,
            categories,
            home,
        }
    }

    /// Extracts the entry at `entry_url`, listed under `category`
    ///
    /// Videos from every variant tab are appended to the entry's own videos,
    /// skipping URLs already present.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(EntryRecord))` - The entry has at least one video
    /// * `Ok(None)` - Neither the entry nor its variants have video
    /// * `Err(HarvestError)` - The entry or a variant could not be fetched, or
    ///   the entry page lacks its id, canonical link or title
    pub async fn extract(
        &self,
        entry_url: &Url,
        category: &str,
    ) -> Result<Option<EntryRecord>, HarvestError> {
        let id = extract_entry_id(entry_url).ok_or_else(|| HarvestError::MissingEntryId {
            url: entry_url.to_string(),
        })?;
        let category_url = self
            .categories
            .get(category)
            .ok_or_else(|| HarvestError::UnknownCategory {
                label: category.to_string(),
            })?;

        let doc = self.fetch_required(entry_url).await?;
        let page = parse_entry_page(&doc);

        let link = page.canonical.ok_or_else(|| HarvestError::MissingElement {
            url: entry_url.to_string(),
            element: "canonical link",
        })?;
        let title = page.title.ok_or_else(|| HarvestError::MissingElement {
            url: entry_url.to_string(),
            element: "entry title",
        })?;

        let mut videos = page.videos;
        for variant_url in &page.variants {
            let variant = self.fetch_required(variant_url).await?;
            for video in parse_video_sources(&variant) {
                if !videos.contains(&video) {
                    videos.push(video);
                }
            }
        }

        if videos.is_empty() {
            tracing::debug!("Entry {} ({}) has no video, skipping", id, entry_url);
            return Ok(None);
        }

        tracing::debug!(
            "Extracted entry {} '{}' with {} videos ({} variants)",
            id,
            title,
            videos.len(),
            page.variants.len()
        );

        let nav = vec![
            (SITE_LABEL.to_string(), self.home.to_string()),
            (category.to_string(), category_url.to_string()),
            (title.clone(), link.to_string()),
        ];

        Ok(Some(EntryRecord {
            id,
            title,
            link: link.into(),
            nav,
            tags: entry_tags(&page.kind, category),
            body: page.description,
            media: videos.into_iter().map(MediaSource::fetch).collect(),
            provider: Provider::spread_the_sign(),
        }))
    }

    /// Fetches a page that must exist; an unavailable page is an error here
    async fn fetch_required(&self, url: &Url) -> Result<CachedDocument, HarvestError> {
        self.fetcher
            .fetch_document(url)
            .await?
            .ok_or_else(|| HarvestError::EntryUnavailable {
                url: url.to_string(),
            })
    }
}
