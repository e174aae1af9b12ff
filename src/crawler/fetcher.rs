//! HTTP fetcher implementation
//!
//! This module handles all network access for the crawler:
//! - Building the HTTP client with the configured user agent and timeouts
//! - Refusing URLs (and redirect targets) outside the allowed domains
//! - Turning a successful response into extracted paragraph text
//! - Classifying failures into `FetchError`

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::crawler::extractor::extract_paragraph_text;
use crate::url::{parse_http_url, AllowedDomains};
use crate::UrlError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Maximum number of redirect hops followed for one page
const MAX_REDIRECTS: usize = 10;

/// Errors that can occur while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] UrlError),

    #[error("Domain not allowed for {url}")]
    DomainNotAllowed { url: String },

    #[error("Redirect rejected for {url}: {source}")]
    Redirect { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

/// Capability to fetch a page and extract its paragraph text
///
/// The crawler only depends on this trait, so tests can substitute canned
/// responses for the network.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` and returns its extracted text
    ///
    /// An empty string means the page had no paragraphs. Any error means no
    /// text is valid for this URL.
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed up to `MAX_REDIRECTS` hops, and only while they
/// stay inside `allowed`.
///
/// # Example
///
/// ```no_run
/// use paragraph_crawl::config::Config;
/// use paragraph_crawl::crawler::build_http_client;
/// use paragraph_crawl::url::AllowedDomains;
///
/// let config = Config::default();
/// let allowed = AllowedDomains::new(&config.crawler.allowed_domains);
/// let client = build_http_client(&config.crawler, &config.user_agent, &allowed).unwrap();
/// ```
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: &UserAgentConfig,
    allowed: &AllowedDomains,
) -> Result<Client, reqwest::Error> {
    let redirect_allowed = allowed.clone();
    let redirect_policy = Policy::custom(move |attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.error(format!("more than {} redirects", MAX_REDIRECTS))
        } else if !redirect_allowed.allows_url(attempt.url()) {
            let target = attempt.url().to_string();
            attempt.error(format!("redirect to {} leaves the allowed domains", target))
        } else {
            attempt.follow()
        }
    });

    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(crawler.connect_timeout_secs))
        .redirect(redirect_policy)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher backed by a `reqwest` client and an allowed-domain list
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    allowed: AllowedDomains,
}

impl HttpFetcher {
    /// Creates a fetcher from the crawler configuration
    pub fn new(crawler: &CrawlerConfig, user_agent: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        let allowed = AllowedDomains::new(&crawler.allowed_domains);
        let client = build_http_client(crawler, user_agent, &allowed)?;
        Ok(Self { client, allowed })
    }

    /// Returns the allowed-domain list this fetcher enforces
    pub fn allowed_domains(&self) -> &AllowedDomains {
        &self.allowed
    }

    /// Fetches the raw HTML body of an allowed URL
    ///
    /// # Request Flow
    ///
    /// 1. Parse the URL; reject it if its host is not allowed
    /// 2. Send a GET request (redirects are checked by the client policy)
    /// 3. Reject anything but 200, 201 and 202
    /// 4. Read the body as text
    pub async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let parsed = parse_http_url(url)?;

        if !self.allowed.allows_url(&parsed) {
            return Err(FetchError::DomainNotAllowed {
                url: url.to_string(),
            });
        }

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| classify_request_error(url, e))?;

        let status = response.status();
        if !is_accepted_status(status) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let html = self.fetch_html(url).await?;
        Ok(extract_paragraph_text(&html))
    }
}

/// Returns true for the statuses whose body is treated as a page
///
/// Only 200, 201 and 202 count; other 2xx codes (204 No Content, 206
/// Partial Content, ...) are failures like any error status.
fn is_accepted_status(status: StatusCode) -> bool {
    (200..203).contains(&status.as_u16())
}

/// Maps a `reqwest` send error onto the fetch error taxonomy
fn classify_request_error(url: &str, error: reqwest::Error) -> FetchError {
    let url = url.to_string();

    if error.is_timeout() {
        FetchError::Timeout { url }
    } else if error.is_redirect() {
        FetchError::Redirect { url, source: error }
    } else {
        FetchError::Http { url, source: error }
    }
}
