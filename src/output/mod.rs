//! Output module for persisting crawl results
//!
//! This module handles everything that leaves the crawler as data:
//! - The `PageRecord` produced for each successfully fetched page
//! - The `RecordWriter` capability and its JSON Lines implementation
//! - An in-memory writer for tests and dry runs
//! - The per-run outcome report

mod jsonl;
mod memory;
mod record;
mod stats;
mod traits;

pub use jsonl::{AppendTarget, JsonLinesWriter};
pub use memory::MemoryWriter;
pub use record::PageRecord;
pub use stats::{print_report, CrawlReport};
pub use traits::{OutputError, OutputResult, RecordWriter};
