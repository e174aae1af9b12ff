//! State module for tracking crawl progress
//!
//! Every seed URL is handled by one task that walks a small state machine
//! from `Pending` to `Done`. `PageOutcome` names the path it took.

mod page_state;

pub use page_state::{PageOutcome, PageState};
