//! URL handling module for Paragraph-Crawl
//!
//! This module provides host extraction and the allowed-domain list that
//! restricts which pages the fetcher may visit.

mod domain;
mod matcher;

pub use domain::{extract_domain, parse_http_url};
pub use matcher::matches_domain;

use ::url::Url;

/// The set of hosts the crawler is permitted to fetch from
///
/// Entries are lowercase host names. An entry starting with `*.` also admits
/// every subdomain of its base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedDomains {
    patterns: Vec<String>,
}

impl AllowedDomains {
    /// Builds an allow-list from configured domain patterns
    ///
    /// # Examples
    ///
    /// ```
    /// use paragraph_crawl::url::AllowedDomains;
    ///
    /// let allowed = AllowedDomains::new(["en.wikipedia.org"]);
    /// assert!(allowed.allows_host("en.wikipedia.org"));
    /// assert!(!allowed.allows_host("de.wikipedia.org"));
    /// ```
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();

        Self { patterns }
    }

    /// Returns true if the host matches any configured pattern
    pub fn allows_host(&self, host: &str) -> bool {
        let host = host.to_lowercase();
        self.patterns.iter().any(|p| matches_domain(p, &host))
    }

    /// Returns true if the URL's host is on the allow-list
    pub fn allows_url(&self, url: &Url) -> bool {
        extract_domain(url).is_some_and(|host| self.allows_host(&host))
    }

    /// Returns the configured patterns
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}
