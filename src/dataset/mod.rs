//! Harvested records and the merge rules that combine them
//!
//! A [`Dataset`] maps entry ids to [`EntryRecord`]s. The same entry is often
//! listed under several categories, so it gets extracted more than once per
//! run; [`Dataset::merge`] keeps the newest fields but accumulates tags.

mod model;
mod tags;

pub use model::{EntryRecord, MediaMethod, MediaSource, NavLink, Provider};
pub use tags::{entry_tags, tagify, union_tags};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All records harvested so far, keyed by entry id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: BTreeMap<String, EntryRecord>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record`, replacing any earlier record with the same id
    ///
    /// Every field comes from `record` except the tags, which become the union
    /// of the new tags and the ones already stored for this id. Records
    /// without media are ignored and `None` is returned.
    pub fn merge(&mut self, mut record: EntryRecord) -> Option<&EntryRecord> {
        if record.media.is_empty() {
            tracing::debug!("Ignoring entry {} without media", record.id);
            return None;
        }

        if let Some(prior) = self.records.get(&record.id) {
            record.tags = union_tags(std::mem::take(&mut record.tags), &prior.tags);
        }

        let id = record.id.clone();
        self.records.insert(id.clone(), record);
        self.records.get(&id)
    }

    pub fn get(&self, id: &str) -> Option<&EntryRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &EntryRecord)> {
        self.records.iter()
    }

    /// Total number of media references across all records
    pub fn media_count(&self) -> usize {
        self.records.values().map(|r| r.media.len()).sum()
    }
}
