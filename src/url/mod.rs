//! URL handling module for Spread-Harvest
//!
//! This module turns link attributes into absolute addresses, builds the
//! site-specific addresses the crawler starts from, and pulls entry ids out of
//! entry URLs.

mod entry_id;
mod resolve;

pub use entry_id::extract_entry_id;
pub use resolve::{category_index_url, language_root_url, resolve, without_fragment};
