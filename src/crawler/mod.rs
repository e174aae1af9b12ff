//! Crawler module for page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching restricted to the allowed domains
//! - Paragraph text extraction
//! - Concurrent fan-out over seed URLs with a completion barrier

mod extractor;
mod fetcher;
mod orchestrator;

pub use extractor::extract_paragraph_text;
pub use fetcher::{build_http_client, FetchError, HttpFetcher, PageFetcher};
pub use orchestrator::{crawl_page, run_crawl, Orchestrator};
