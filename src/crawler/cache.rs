//! Time-bounded on-disk page cache
//!
//! Each fetched URL is stored as one file named after the percent-encoded URL
//! with an `.html` suffix. A file is fresh while its modification time is
//! strictly newer than `now - ttl`.

use crate::config::CacheSettings;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// On-disk cache of raw page bodies
#[derive(Debug, Clone)]
pub struct PageCache {
    folder: PathBuf,
    ttl: Duration,
}

impl PageCache {
    pub fn new(settings: CacheSettings) -> Self {
        Self {
            folder: settings.folder,
            ttl: settings.ttl,
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Path of the cache file for `url`
    pub fn path_for(&self, url: &Url) -> PathBuf {
        self.folder
            .join(format!("{}.html", urlencoding::encode(url.as_str())))
    }

    /// Returns the cached body for `url` if a fresh copy exists
    ///
    /// Missing, stale or unreadable files all count as a miss.
    pub async fn read_fresh(&self, url: &Url) -> Option<String> {
        let path = self.path_for(url);

        let metadata = tokio::fs::metadata(&path).await.ok()?;
        let modified = metadata.modified().ok()?;
        let modified_ms = DateTime::<Utc>::from(modified).timestamp_millis();
        let now_ms = Utc::now().timestamp_millis();

        if !is_fresh(modified_ms, now_ms, self.ttl_millis()) {
            tracing::trace!("Cache entry for {} is stale", url);
            return None;
        }

        match tokio::fs::read_to_string(&path).await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!("Failed to read cache file {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Stores `body` as the cached copy of `url`
    ///
    /// Failures are logged and otherwise ignored; the caller already holds the
    /// body it fetched.
    pub async fn store(&self, url: &Url, body: &str) {
        if let Err(e) = tokio::fs::create_dir_all(&self.folder).await {
            tracing::warn!(
                "Failed to create cache folder {}: {}",
                self.folder.display(),
                e
            );
            return;
        }

        let path = self.path_for(url);
        if let Err(e) = tokio::fs::write(&path, body).await {
            tracing::warn!("Failed to write cache file {}: {}", path.display(), e);
        }
    }

    fn ttl_millis(&self) -> i64 {
        i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX)
    }
}

/// Freshness test for a cache file
///
/// A file modified exactly `ttl_ms` ago is already stale.
pub fn is_fresh(modified_ms: i64, now_ms: i64, ttl_ms: i64) -> bool {
    modified_ms > now_ms.saturating_sub(ttl_ms)
}
