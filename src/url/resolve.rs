use url::{ParseError, Url};

/// Resolves a link attribute against a base URL
///
/// Relative paths, protocol-relative references (`//host/path`) and absolute
/// URLs all come back fully qualified. Surrounding whitespace in the attribute
/// is ignored.
///
/// # Examples
///
/// ```
/// use spread_harvest::url::resolve;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/en.us/search/").unwrap();
/// assert_eq!(resolve("../sign/42/", &base).unwrap().as_str(), "https://example.com/en.us/sign/42/");
/// assert_eq!(resolve("//cdn.example.com/v.mp4", &base).unwrap().as_str(), "https://cdn.example.com/v.mp4");
/// ```
pub fn resolve(href: &str, base: &Url) -> Result<Url, ParseError> {
    base.join(href.trim())
}

/// Copy of `url` with any fragment removed
///
/// Fragments never change the fetched document, so two links that differ only
/// in their fragment name the same page.
pub fn without_fragment(url: &Url) -> Url {
    let mut url = url.clone();
    url.set_fragment(None);
    url
}

/// Home page for a language, used as the first breadcrumb
pub fn language_root_url(base_url: &Url, language: &str) -> Result<Url, ParseError> {
    let root = base_url.as_str().trim_end_matches('/');
    Url::parse(&format!("{}/{}/", root, urlencoding::encode(language)))
}

/// Address of the category index for a language
///
/// The language code is percent-encoded so odd codes cannot escape the path.
pub fn category_index_url(base_url: &Url, language: &str) -> Result<Url, ParseError> {
    let root = base_url.as_str().trim_end_matches('/');
    Url::parse(&format!(
        "{}/{}/search/by-category/",
        root,
        urlencoding::encode(language)
    ))
}
