//! HTML parser for the dictionary's page types
//!
//! This module handles parsing HTML content to extract:
//! - Category anchors from the category index
//! - Entry links and the next-page link from a category listing page
//! - Entry fields, video sources and variant tabs from an entry page
//!
//! Parsing is synchronous and works on a string body; callers parse after the
//! fetch completes and drop the parsed tree before awaiting again.

use crate::crawler::fetcher::CachedDocument;
use scraper::{ElementRef, Html, Selector};
use url::Url;

const CATEGORY_LINK: &str = ".category-list a[href]";
const ENTRY_RESULT_LINK: &str = ".search-result-title a[href]";
const NEXT_PAGE_LINK: &str = "a[rel~=\"next\"][href]";
const CANONICAL_LINK: &str = "link[rel=\"canonical\"][href]";
const ENTRY_TITLE: &str = ".search-result-content h2";
const ENTRY_KIND: &str = ".search-result.open small";
const META_DESCRIPTION: &str = "meta[name=\"description\"][content]";
const VIDEO_SOURCE: &str = "video[src]";
const VARIANT_TAB_LINK: &str = "#show-result a[href], a[href*=\"#show-result\"]";

/// A category listing page: the entries it links to and where the listing continues
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    /// Entry links in document order (absolute URLs)
    pub entries: Vec<Url>,

    /// The "next page" link, if the listing continues
    pub next_page: Option<Url>,
}

/// Fields read from an entry page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPage {
    pub canonical: Option<Url>,
    pub title: Option<String>,

    /// Word class shown next to the title, e.g. "Noun"
    pub kind: String,

    /// Meta description content
    pub description: String,

    /// Video sources in document order (absolute URLs)
    pub videos: Vec<Url>,

    /// Regional variant tabs other than the active one
    pub variants: Vec<Url>,
}

/// Parses the category index into `(label, url)` pairs, in document order
///
/// Anchors with empty labels or unusable hrefs are skipped.
pub fn parse_category_index(doc: &CachedDocument) -> Vec<(String, Url)> {
    let html = doc.parse();

    select_all(&html, CATEGORY_LINK)
        .into_iter()
        .filter_map(|anchor| {
            let label = element_text(&anchor);
            if label.is_empty() {
                return None;
            }
            let url = resolve_link(anchor.value().attr("href")?, &doc.url)?;
            Some((label, url))
        })
        .collect()
}

/// Parses a category listing page
pub fn parse_listing_page(doc: &CachedDocument) -> ListingPage {
    let html = doc.parse();

    let entries = select_all(&html, ENTRY_RESULT_LINK)
        .into_iter()
        .filter_map(|anchor| resolve_link(anchor.value().attr("href")?, &doc.url))
        .collect();

    let next_page = select_all(&html, NEXT_PAGE_LINK)
        .into_iter()
        .find_map(|anchor| resolve_link(anchor.value().attr("href")?, &doc.url));

    ListingPage { entries, next_page }
}

/// Parses an entry page
pub fn parse_entry_page(doc: &CachedDocument) -> EntryPage {
    let html = doc.parse();

    let canonical = select_first(&html, CANONICAL_LINK)
        .and_then(|link| resolve_link(link.value().attr("href")?, &doc.url));

    let title = select_first(&html, ENTRY_TITLE).map(|h2| element_text(&h2));

    let kind = select_first(&html, ENTRY_KIND)
        .map(|small| element_text(&small))
        .unwrap_or_default();

    let description = select_first(&html, META_DESCRIPTION)
        .and_then(|meta| meta.value().attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default();

    EntryPage {
        canonical,
        title,
        kind,
        description,
        videos: extract_videos(&html, &doc.url),
        variants: extract_variants(&html, &doc.url),
    }
}

/// Parses only the video sources of a page, as used for variant pages
pub fn parse_video_sources(doc: &CachedDocument) -> Vec<Url> {
    extract_videos(&doc.parse(), &doc.url)
}

fn extract_videos(html: &Html, base_url: &Url) -> Vec<Url> {
    let mut videos: Vec<Url> = Vec::new();
    for video in select_all(html, VIDEO_SOURCE) {
        let Some(url) = video.value().attr("src").and_then(|src| resolve_link(src, base_url)) else {
            continue;
        };
        if !videos.contains(&url) {
            videos.push(url);
        }
    }
    videos
}

/// Variant tabs, skipping the active tab and links back to this page
///
/// A tab is an anchor inside `#show-result` or one whose href targets the
/// `#show-result` fragment.
fn extract_variants(html: &Html, base_url: &Url) -> Vec<Url> {
    let current = crate::url::without_fragment(base_url);
    let mut variants: Vec<Url> = Vec::new();

    for anchor in select_all(html, VARIANT_TAB_LINK) {
        if is_active_tab(&anchor) {
            continue;
        }
        let Some(url) = anchor.value().attr("href").and_then(|href| resolve_link(href, base_url)) else {
            continue;
        };
        let url = crate::url::without_fragment(&url);
        if url != current && !variants.contains(&url) {
            variants.push(url);
        }
    }

    variants
}

/// A tab is active when the anchor or its parent element carries `active`
fn is_active_tab(anchor: &ElementRef<'_>) -> bool {
    let has_active = |element: &ElementRef<'_>| element.value().classes().any(|c| c == "active");

    has_active(anchor)
        || anchor
            .parent()
            .and_then(ElementRef::wrap)
            .is_some_and(|parent| has_active(&parent))
}

fn select_all<'a>(html: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => html.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

fn select_first<'a>(html: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    html.select(&selector).next()
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Resolves a link attribute to an absolute http(s) URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute_url = crate::url::resolve(href, base_url).ok()?;
    if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
        Some(absolute_url)
    } else {
        None
    }
}
