use crate::dataset::model::Provider;
use regex::Regex;
use std::sync::LazyLock;

static NON_TAG_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z_-]+").unwrap());
static DOT_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.{2,}").unwrap());
static UNDERSCORE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_{2,}").unwrap());
static DASH_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").unwrap());

/// Normalizes free text into a tag
///
/// Every run of characters outside `[A-Za-z_-]` becomes a single `.`, the
/// result is lowercased, and runs of `.`, `_` or `-` collapse to one.
///
/// # Examples
///
/// ```
/// use spread_harvest::tagify;
///
/// assert_eq!(tagify("Noun"), "noun");
/// assert_eq!(tagify("Food & Drink"), "food.drink");
/// assert_eq!(tagify("spread--the__sign"), "spread-the_sign");
/// ```
pub fn tagify(text: &str) -> String {
    let dotted = NON_TAG_CHARS.replace_all(text, ".").to_lowercase();
    let dotted = DOT_RUNS.replace_all(&dotted, ".");
    let dotted = UNDERSCORE_RUNS.replace_all(&dotted, "_");
    DASH_RUNS.replace_all(&dotted, "-").into_owned()
}

/// Tags a fresh extraction contributes: the provider, the entry kind and the
/// category it was listed under
///
/// Labels that normalize to nothing are left out.
pub fn entry_tags(kind: &str, category: &str) -> Vec<String> {
    let mut tags = Vec::with_capacity(3);
    for label in [Provider::ID, kind, category] {
        let tag = tagify(label);
        if !tag.is_empty() {
            push_unique(&mut tags, tag);
        }
    }
    tags
}

/// Union of two tag lists, keeping `newer` first and dropping duplicates
pub fn union_tags(newer: Vec<String>, prior: &[String]) -> Vec<String> {
    let mut merged = Vec::with_capacity(newer.len() + prior.len());
    for tag in newer.into_iter().chain(prior.iter().cloned()) {
        push_unique(&mut merged, tag);
    }
    merged
}

fn push_unique(tags: &mut Vec<String>, tag: String) {
    if !tags.contains(&tag) {
        tags.push(tag);
    }
}
