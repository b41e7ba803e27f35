use url::Url;

/// Extracts the numeric entry id from an entry URL
///
/// The id is the first path segment made up entirely of ASCII digits.
///
/// # Examples
///
/// ```
/// use spread_harvest::url::extract_entry_id;
/// use url::Url;
///
/// let url = Url::parse("https://www.spreadthesign.com/en.us/sign/12345/cat/").unwrap();
/// assert_eq!(extract_entry_id(&url), Some("12345".to_string()));
/// ```
pub fn extract_entry_id(url: &Url) -> Option<String> {
    url.path_segments()?
        .find(|segment| !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()))
        .map(str::to_string)
}
