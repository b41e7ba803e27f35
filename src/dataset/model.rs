use serde::{Deserialize, Serialize};

/// How a consumer obtains a media file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaMethod {
    /// Plain HTTP download of the referenced URL
    Fetch,
}

/// A single video reference attached to an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSource {
    pub method: MediaMethod,
    pub url: String,
}

impl MediaSource {
    pub fn fetch(url: impl Into<String>) -> Self {
        Self {
            method: MediaMethod::Fetch,
            url: url.into(),
        }
    }
}

/// Where a record came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub link: String,
    pub verb: String,
}

impl Provider {
    pub const ID: &'static str = "spread-the-sign";
    pub const LINK: &'static str = "https://www.spreadthesign.com/";
    pub const VERB: &'static str = "documented";

    /// The fixed descriptor stamped on every harvested record
    pub fn spread_the_sign() -> Self {
        Self {
            id: Self::ID.to_string(),
            link: Self::LINK.to_string(),
            verb: Self::VERB.to_string(),
        }
    }
}

/// One breadcrumb step: `(label, url)`
pub type NavLink = (String, String);

/// A harvested dictionary entry
///
/// `tags` behaves as a set: it never holds duplicates and its order carries
/// no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub id: String,
    pub title: String,
    pub link: String,
    pub nav: Vec<NavLink>,
    pub tags: Vec<String>,
    pub body: String,
    pub media: Vec<MediaSource>,
    pub provider: Provider,
}
