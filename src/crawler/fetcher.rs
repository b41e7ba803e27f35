//! HTTP fetcher implementation
//!
//! This module handles all page requests for the crawler, including:
//! - Building the HTTP client
//! - Serving fresh pages from the on-disk cache
//! - GET requests for everything else, writing successful bodies back to the cache
//! - Mapping non-success statuses to "page unavailable"

use crate::config::CacheSettings;
use crate::crawler::cache::PageCache;
use crate::HarvestError;
use reqwest::Client;
use scraper::Html;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use url::Url;

/// Result of a single network request
#[derive(Debug)]
pub enum FetchResult {
    /// The server answered with a 2xx status
    Success {
        /// Final URL after redirects
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The server answered with any other status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },
}

/// A fetched page: its address and raw HTML
///
/// The parsed form is produced on demand with [`CachedDocument::parse`] and is
/// meant to be dropped before the next await point.
#[derive(Debug, Clone)]
pub struct CachedDocument {
    /// Address the page was requested under; relative links resolve against it
    ///
    /// This is the request URL even after a redirect, so a page resolves the
    /// same way whether it came from the network or the cache.
    pub url: Url,

    /// Raw HTML
    pub body: String,

    /// Whether the body came from the on-disk cache
    pub from_cache: bool,
}

impl CachedDocument {
    pub fn parse(&self) -> Html {
        Html::parse_document(&self.body)
    }
}

/// Counters describing where pages came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    pub cache_hits: usize,
    pub network_fetches: usize,
    pub unavailable: usize,
}

/// Builds an HTTP client with proper configuration
///
/// Requests carry no custom headers; only compression support and a connect
/// timeout are configured.
///
/// # Example
///
/// ```no_run
/// use spread_harvest::crawler::build_http_client;
///
/// let client = build_http_client().unwrap();
/// ```
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sends a GET request and classifies the response
///
/// Transport failures (connection refused, TLS errors, broken bodies) are
/// returned as errors. Any answered request, whatever its status, is a
/// [`FetchResult`].
pub async fn fetch_url(client: &Client, url: &Url) -> Result<FetchResult, HarvestError> {
    let http_error = |source| HarvestError::Http {
        url: url.to_string(),
        source,
    };

    let response = client.get(url.clone()).send().await.map_err(http_error)?;
    let status = response.status();

    if !status.is_success() {
        return Ok(FetchResult::HttpError {
            status_code: status.as_u16(),
        });
    }

    let final_url = response.url().clone();
    let body = response.text().await.map_err(http_error)?;

    Ok(FetchResult::Success {
        final_url,
        status_code: status.as_u16(),
        body,
    })
}

/// Cache-aware page fetcher shared by every crawl task
pub struct Fetcher {
    client: Client,
    cache: Option<PageCache>,
    cache_hits: AtomicUsize,
    network_fetches: AtomicUsize,
    unavailable: AtomicUsize,
}

impl Fetcher {
    pub fn new(client: Client, cache: Option<CacheSettings>) -> Self {
        Self {
            client,
            cache: cache.map(PageCache::new),
            cache_hits: AtomicUsize::new(0),
            network_fetches: AtomicUsize::new(0),
            unavailable: AtomicUsize::new(0),
        }
    }

    /// Resolves `url` to a document
    ///
    /// # Returns
    ///
    /// * `Ok(Some(CachedDocument))` - Page served from a fresh cache file or the network
    /// * `Ok(None)` - The server answered with a non-2xx status
    /// * `Err(HarvestError)` - The request itself failed
    pub async fn fetch_document(&self, url: &Url) -> Result<Option<CachedDocument>, HarvestError> {
        if let Some(cache) = &self.cache {
            if let Some(body) = cache.read_fresh(url).await {
                tracing::trace!("Cache hit for {}", url);
                self.cache_hits.fetch_add(1, Ordering::Relaxed);
                return Ok(Some(CachedDocument {
                    url: url.clone(),
                    body,
                    from_cache: true,
                }));
            }
        }

        tracing::debug!("Fetching {}", url);
        self.network_fetches.fetch_add(1, Ordering::Relaxed);

        match fetch_url(&self.client, url).await? {
            FetchResult::Success {
                final_url,
                status_code,
                body,
            } => {
                if final_url != *url {
                    tracing::trace!("{} redirected to {} ({})", url, final_url, status_code);
                } else {
                    tracing::trace!("{} answered {}", url, status_code);
                }
                if let Some(cache) = &self.cache {
                    cache.store(url, &body).await;
                }
                Ok(Some(CachedDocument {
                    url: url.clone(),
                    body,
                    from_cache: false,
                }))
            }
            FetchResult::HttpError { status_code } => {
                tracing::debug!("{} unavailable (HTTP {})", url, status_code);
                self.unavailable.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
        }
    }

    pub fn stats(&self) -> FetchStats {
        FetchStats {
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            network_fetches: self.network_fetches.load(Ordering::Relaxed),
            unavailable: self.unavailable.load(Ordering::Relaxed),
        }
    }
}
