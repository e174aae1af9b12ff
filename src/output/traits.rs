//! Record writer trait and error types
//!
//! This module defines the capability interface every output sink implements,
//! so the orchestrator can be driven against a file or an in-memory recorder.

use crate::output::PageRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Writer is closed")]
    Closed,

    #[error("Output holds a partial line that could not be removed")]
    Poisoned,
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for page record sinks
///
/// Implementations must be safe to share between concurrently running tasks:
/// two overlapping `write_record` calls never interleave their output.
#[async_trait]
pub trait RecordWriter: Send + Sync {
    /// Appends one record to the sink
    ///
    /// A failure affects only this record; later calls may still succeed.
    ///
    /// # Arguments
    ///
    /// * `record` - The record to persist; ownership ends when the call returns
    async fn write_record(&self, record: PageRecord) -> OutputResult<()>;

    /// Releases the underlying resource
    ///
    /// Calling `close` more than once is a no-op.
    async fn close(&self) -> OutputResult<()>;
}
