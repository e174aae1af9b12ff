//! Crawl orchestrator - fan-out and completion tracking
//!
//! This module launches one task per seed URL and waits for all of them:
//! - Each task fetches its page, extracts text, and writes one record
//! - Failures are logged and end only the task that hit them
//! - The writer is closed only after every task has finished

use crate::config::Config;
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::output::{CrawlReport, JsonLinesWriter, OutputResult, PageRecord, RecordWriter};
use crate::state::{PageOutcome, PageState};
use crate::CrawlError;
use std::sync::Arc;

/// Runs crawl tasks against a shared fetcher and writer
pub struct Orchestrator<F: ?Sized, W: ?Sized> {
    fetcher: Arc<F>,
    writer: Arc<W>,
}

impl<F, W> Orchestrator<F, W>
where
    F: PageFetcher + ?Sized + 'static,
    W: RecordWriter + ?Sized + 'static,
{
    /// Creates a new orchestrator
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Fetch+extract capability shared by all tasks
    /// * `writer` - The single output sink shared by all tasks
    pub fn new(fetcher: Arc<F>, writer: Arc<W>) -> Self {
        Self { fetcher, writer }
    }

    /// Crawls every seed URL concurrently and waits for all of them
    ///
    /// One task is spawned per entry, duplicates included. The returned
    /// future resolves only once every task has reached `Done`, whichever
    /// path it took. The writer is left open.
    pub async fn run(&self, seeds: &[String]) -> CrawlReport {
        let mut report = CrawlReport::new();

        if seeds.is_empty() {
            tracing::info!("No seed URLs, nothing to crawl");
            return report;
        }

        tracing::info!("Launching {} crawl tasks", seeds.len());

        let handles: Vec<_> = seeds
            .iter()
            .map(|url| {
                let fetcher = Arc::clone(&self.fetcher);
                let writer = Arc::clone(&self.writer);
                let url = url.clone();
                tokio::spawn(async move { crawl_page(&*fetcher, &*writer, &url).await })
            })
            .collect();

        // Completion barrier: every handle resolves exactly once
        let results = futures::future::join_all(handles).await;

        for (url, result) in seeds.iter().zip(results) {
            match result {
                Ok(outcome) => report.record(outcome),
                Err(e) => {
                    tracing::error!("Crawl task for {} did not finish: {}", url, e);
                    report.record_panic();
                }
            }
        }

        report
    }

    /// Crawls every seed URL, then closes the writer
    ///
    /// The close is ordered after the last write of the last task.
    pub async fn run_and_close(&self, seeds: &[String]) -> OutputResult<CrawlReport> {
        let report = self.run(seeds).await;
        self.writer.close().await?;
        Ok(report)
    }
}

/// Runs one seed URL through fetch, extract and write
///
/// Never fails: the outcome says which terminal path the task took, and any
/// error is logged with the URL.
pub async fn crawl_page<F, W>(fetcher: &F, writer: &W, url: &str) -> PageOutcome
where
    F: PageFetcher + ?Sized,
    W: RecordWriter + ?Sized,
{
    trace_transition(url, PageState::Pending, PageState::Fetching);

    let text = match fetcher.fetch_text(url).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Failed to visit {}: {}", url, e);
            return finish(url, PageOutcome::FetchFailed);
        }
    };

    trace_transition(url, PageState::Fetching, PageState::Extracted);

    if text.is_empty() {
        tracing::debug!("No paragraph text found on {}", url);
    }

    match writer.write_record(PageRecord::new(url, text)).await {
        Ok(()) => {
            tracing::info!("Scraped {}", url);
            finish(url, PageOutcome::Written)
        }
        Err(e) => {
            tracing::error!("Error writing data for {}: {}", url, e);
            finish(url, PageOutcome::WriteFailed)
        }
    }
}

fn finish(url: &str, outcome: PageOutcome) -> PageOutcome {
    let state = outcome.state();
    let from = if state == PageState::FetchFailed {
        PageState::Fetching
    } else {
        PageState::Extracted
    };
    trace_transition(url, from, state);
    trace_transition(url, state, PageState::Done);
    outcome
}

fn trace_transition(url: &str, from: PageState, to: PageState) {
    debug_assert!(from.can_transition_to(to), "illegal transition {} -> {}", from, to);
    tracing::trace!("{}: {} -> {}", url, from, to);
    if to.is_terminal() {
        tracing::debug!("Crawl task for {} finished", url);
    }
}

/// Runs a complete crawl operation
///
/// This is the main entry point for a crawl. It will:
/// 1. Create (truncate) the output file; failure here aborts the run
/// 2. Build the HTTP fetcher
/// 3. Crawl every seed URL concurrently
/// 4. Close the output file after the last task finishes
///
/// # Arguments
///
/// * `config` - The effective configuration for this run
///
/// # Returns
///
/// * `Ok(CrawlReport)` - All tasks finished and the output was closed
/// * `Err(CrawlError)` - The output could not be opened or closed, or the
///   HTTP client could not be built
pub async fn run_crawl(config: &Config) -> Result<CrawlReport, CrawlError> {
    let writer = Arc::new(JsonLinesWriter::open(&config.output.path).await?);
    tracing::info!("Writing records to {}", writer.path().display());

    let fetcher = Arc::new(HttpFetcher::new(&config.crawler, &config.user_agent)?);
    tracing::info!(
        "Allowed domains: {}",
        fetcher.allowed_domains().patterns().join(", ")
    );

    let orchestrator = Orchestrator::new(fetcher, writer);
    let report = orchestrator.run_and_close(&config.crawler.seeds).await?;

    Ok(report)
}
