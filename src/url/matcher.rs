/// Checks if a host matches an allowed-domain pattern
///
/// Two kinds of pattern are supported:
/// 1. Exact: "example.org" admits only "example.org"
/// 2. Wildcard: "*.example.org" admits "example.org" and any subdomain of it
///
/// Both arguments are expected in lowercase.
///
/// # Examples
///
/// ```
/// use paragraph_crawl::url::matches_domain;
///
/// assert!(matches_domain("en.wikipedia.org", "en.wikipedia.org"));
/// assert!(!matches_domain("en.wikipedia.org", "de.wikipedia.org"));
/// assert!(matches_domain("*.wikipedia.org", "de.wikipedia.org"));
/// ```
pub fn matches_domain(pattern: &str, host: &str) -> bool {
    match pattern.strip_prefix("*.") {
        Some(base) => {
            host == base
                || host
                    .strip_suffix(base)
                    .is_some_and(|prefix| prefix.ends_with('.'))
        }
        None => host == pattern,
    }
}
