//! JSON Lines record writer
//!
//! Each record is encoded as one JSON object followed by a newline and
//! appended to a single destination file. A mutex guards the file handle so
//! concurrent writers never interleave bytes within a line.

use crate::output::traits::{OutputError, OutputResult, RecordWriter};
use crate::output::PageRecord;
use async_trait::async_trait;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;

/// Storage a `JsonLinesWriter` appends to
///
/// `truncate_to` must discard everything past `len` and leave the next
/// `append` writing at `len`.
#[async_trait]
pub trait AppendTarget: Send {
    /// Writes all of `bytes` and hands them to the storage layer
    async fn append(&mut self, bytes: &[u8]) -> std::io::Result<()>;

    /// Cuts the target back to `len` bytes
    async fn truncate_to(&mut self, len: u64) -> std::io::Result<()>;

    /// Makes appended bytes durable
    async fn sync(&mut self) -> std::io::Result<()>;
}

#[async_trait]
impl AppendTarget for File {
    async fn append(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        self.write_all(bytes).await?;
        self.flush().await
    }

    async fn truncate_to(&mut self, len: u64) -> std::io::Result<()> {
        // A failed write may still report its error on the next flush
        let _ = self.flush().await;
        self.set_len(len).await?;
        self.seek(SeekFrom::Start(len)).await?;
        Ok(())
    }

    async fn sync(&mut self) -> std::io::Result<()> {
        self.flush().await?;
        self.sync_all().await
    }
}

#[derive(Debug)]
struct Sink<D> {
    target: D,
    /// Bytes of complete lines written so far
    len: u64,
    /// Set when a partial line could not be rolled back
    poisoned: bool,
}

/// Append-only JSON Lines writer shared by all crawl tasks
///
/// A record that fails part-way is cut back out of the destination, so the
/// file only ever holds complete lines. The handle is released by `close`,
/// or when the writer is dropped.
#[derive(Debug)]
pub struct JsonLinesWriter<D = File> {
    path: PathBuf,
    sink: Mutex<Option<Sink<D>>>,
}

impl JsonLinesWriter<File> {
    /// Creates the destination file, truncating any previous content
    ///
    /// The parent directory must already exist.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the `.jl` file to create
    ///
    /// # Returns
    ///
    /// * `Ok(JsonLinesWriter)` - The destination is open and empty
    /// * `Err(OutputError::Io)` - The file could not be created
    pub async fn open(path: impl AsRef<Path>) -> OutputResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).await?;

        tracing::debug!("Opened output file {}", path.display());

        Ok(Self::with_target(path, file))
    }
}

impl<D: AppendTarget> JsonLinesWriter<D> {
    /// Wraps an already-empty target
    pub fn with_target(path: impl Into<PathBuf>, target: D) -> Self {
        Self {
            path: path.into(),
            sink: Mutex::new(Some(Sink {
                target,
                len: 0,
                poisoned: false,
            })),
        }
    }

    /// Returns the destination path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl<D: AppendTarget> RecordWriter for JsonLinesWriter<D> {
    async fn write_record(&self, record: PageRecord) -> OutputResult<()> {
        let line = record.to_json_line()?;

        let mut guard = self.sink.lock().await;
        let sink = guard.as_mut().ok_or(OutputError::Closed)?;
        if sink.poisoned {
            return Err(OutputError::Poisoned);
        }

        // The whole line reaches the OS before the next writer gets the handle
        match sink.target.append(&line).await {
            Ok(()) => {
                sink.len += line.len() as u64;
                Ok(())
            }
            Err(e) => {
                if let Err(rollback) = sink.target.truncate_to(sink.len).await {
                    tracing::error!(
                        "Could not remove partial line from {}: {}",
                        self.path.display(),
                        rollback
                    );
                    sink.poisoned = true;
                }
                Err(e.into())
            }
        }
    }

    async fn close(&self) -> OutputResult<()> {
        let mut guard = self.sink.lock().await;

        if let Some(mut sink) = guard.take() {
            sink.target.sync().await?;
            tracing::debug!("Closed output file {}", self.path.display());
        }

        Ok(())
    }
}
