//! Crawl outcome statistics
//!
//! This module tallies the terminal outcome of every crawl task and prints
//! the end-of-run summary.

use crate::state::PageOutcome;
use std::path::Path;

/// Per-run tally of task outcomes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Pages fetched and written to the output
    pub written: u64,

    /// Pages whose fetch or extraction failed
    pub fetch_failed: u64,

    /// Pages fetched but not persisted
    pub write_failed: u64,

    /// Tasks that panicked before reaching a terminal state
    pub panicked: u64,
}

impl CrawlReport {
    /// Creates a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one finished task
    pub fn record(&mut self, outcome: PageOutcome) {
        match outcome {
            PageOutcome::Written => self.written += 1,
            PageOutcome::FetchFailed => self.fetch_failed += 1,
            PageOutcome::WriteFailed => self.write_failed += 1,
        }
    }

    /// Counts one task that panicked
    pub fn record_panic(&mut self) {
        self.panicked += 1;
    }

    /// Returns the number of tasks that reached the barrier
    pub fn total(&self) -> u64 {
        self.written + self.fetch_failed + self.write_failed + self.panicked
    }

    /// Returns the number of tasks that did not produce a record
    pub fn failures(&self) -> u64 {
        self.total() - self.written
    }

    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.written as f64 / total as f64) * 100.0
    }
}

/// Logs the report and prints the final summary line to stdout
///
/// Per-page detail stays in the log; stdout only names the output file.
pub fn print_report(report: &CrawlReport, output_path: &Path) {
    tracing::info!(
        "Crawl finished: {} written, {} fetch failures, {} write failures, {} panicked ({:.1}% success)",
        report.written,
        report.fetch_failed,
        report.write_failed,
        report.panicked,
        report.success_rate()
    );

    println!("Crawling complete. Output saved to: {}", output_path.display());
}
