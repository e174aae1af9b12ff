//! In-memory record writer
//!
//! Keeps every record in a vector instead of a file. Used by tests to observe
//! exactly what the orchestrator wrote, and in which order writes and close
//! happened.

use crate::output::traits::{OutputError, OutputResult, RecordWriter};
use crate::output::PageRecord;
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct MemoryState {
    records: Vec<PageRecord>,
    closed: bool,
    close_calls: usize,
}

/// Recording writer backed by a `Vec<PageRecord>`
#[derive(Debug, Default)]
pub struct MemoryWriter {
    state: Mutex<MemoryState>,
}

impl MemoryWriter {
    /// Creates an empty, open writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the records written so far
    pub fn records(&self) -> Vec<PageRecord> {
        self.lock().records.clone()
    }

    /// Returns true once `close` has been called
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Returns how many times `close` was called
    pub fn close_calls(&self) -> usize {
        self.lock().close_calls
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        // A panicking test thread must not hide the records from the others
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl RecordWriter for MemoryWriter {
    async fn write_record(&self, record: PageRecord) -> OutputResult<()> {
        let mut state = self.lock();
        if state.closed {
            return Err(OutputError::Closed);
        }
        state.records.push(record);
        Ok(())
    }

    async fn close(&self) -> OutputResult<()> {
        let mut state = self.lock();
        state.closed = true;
        state.close_calls += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_are_kept_in_order() {
        let writer = MemoryWriter::new();
        writer
            .write_record(PageRecord::new("http://example.com", "This is synthetic test data."))
            .await
            .unwrap();
        writer
            .write_record(PageRecord::new("http://example.com/2", ""))
            .await
            .unwrap();

        let records = writer.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "This is synthetic test data.");
        assert_eq!(records[1].url, "http://example.com/2");
    }

    #[tokio::test]
    async fn test_close_blocks_further_writes() {
        let writer = MemoryWriter::new();
        writer.close().await.unwrap();
        writer.close().await.unwrap();

        let result = writer
            .write_record(PageRecord::new("http://example.com", "late"))
            .await;

        assert!(matches!(result, Err(OutputError::Closed)));
        assert!(writer.is_closed());
        assert_eq!(writer.close_calls(), 2);
        assert!(writer.records().is_empty());
    }
}
