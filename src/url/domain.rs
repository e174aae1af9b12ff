use crate::{UrlError, UrlResult};
use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use paragraph_crawl::url::extract_domain;
///
/// let url = Url::parse("https://EN.wikipedia.org/wiki/Robot").unwrap();
/// assert_eq!(extract_domain(&url), Some("en.wikipedia.org".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Parses a seed string into an absolute URL that has a host
///
/// Surrounding whitespace is ignored.
pub fn parse_http_url(raw: &str) -> UrlResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|source| UrlError::Parse {
        url: raw.to_string(),
        source,
    })?;

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(raw.to_string()));
    }

    Ok(url)
}
