//! Output module for persisting crawl results
//!
//! This module handles:
//! - Writing the final dataset as a single JSON document
//! - Recording crawl statistics for the end-of-run report

pub mod stats;

pub use stats::{print_statistics, CrawlStatistics};

use crate::dataset::Dataset;
use crate::HarvestError;
use std::path::Path;

/// Writes the dataset as pretty-printed JSON, replacing any existing file
///
/// Missing parent directories are created.
///
/// # Arguments
///
/// * `dataset` - The merged records of the run
/// * `path` - Destination file
pub fn write_dataset(dataset: &Dataset, path: &Path) -> Result<(), HarvestError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(dataset)?;
    std::fs::write(path, json)?;

    tracing::info!("Wrote {} records to {}", dataset.len(), path.display());
    Ok(())
}

/// Reads a dataset previously written by [`write_dataset`]
pub fn read_dataset(path: &Path) -> Result<Dataset, HarvestError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
