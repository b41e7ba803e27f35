//! Category discovery: the crawl's starting point

use crate::config::CrawlConfig;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::parse_category_index;
use crate::url::category_index_url;
use crate::HarvestError;
use std::collections::BTreeMap;
use url::Url;

/// Category label to listing URL
pub type CategoryIndex = BTreeMap<String, Url>;

/// Fetches the category index and maps each category label to its listing
///
/// Any failure to obtain the index page is a [`HarvestError::Discovery`];
/// without it there is nothing to crawl. When two anchors share a label the
/// later one wins.
pub async fn discover_categories(
    fetcher: &Fetcher,
    config: &CrawlConfig,
) -> Result<CategoryIndex, HarvestError> {
    let index_url = category_index_url(&config.base_url, &config.language)?;
    tracing::info!("Discovering categories from {}", index_url);

    let doc = match fetcher.fetch_document(&index_url).await {
        Ok(Some(doc)) => doc,
        Ok(None) => {
            return Err(HarvestError::Discovery {
                url: index_url.to_string(),
            })
        }
        Err(e) => {
            tracing::error!("Failed to fetch category index: {}", e);
            return Err(HarvestError::Discovery {
                url: index_url.to_string(),
            });
        }
    };

    let mut index = CategoryIndex::new();
    for (label, url) in parse_category_index(&doc) {
        if let Some(previous) = index.insert(label.clone(), url) {
            tracing::debug!("Category '{}' listed twice, replacing {}", label, previous);
        }
    }

    tracing::info!("Discovered {} categories", index.len());
    Ok(index)
}
