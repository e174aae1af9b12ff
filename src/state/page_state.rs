/// Page state definitions for tracking a single crawl task
///
/// This module defines the states a seed URL passes through and the legal
/// transitions between them. There is no retry edge: every failure goes
/// straight to `Done`.
use std::fmt;

/// Represents the current state of a seed URL's crawl task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    // ===== Active States =====
    /// Task has been launched but has not started fetching
    Pending,

    /// Page is being fetched and its text extracted
    Fetching,

    /// Text was extracted and a record is being written
    Extracted,

    // ===== Outcome States =====
    /// Record was handed to the writer successfully
    Written,

    /// Fetch or extraction failed (network, HTTP status, domain restriction)
    FetchFailed,

    /// Record could not be written
    WriteFailed,

    // ===== Terminal State =====
    /// Task has finished and released its completion signal
    Done,
}

impl PageState {
    /// Returns true if this is the terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if `next` is a legal successor of this state
    pub fn can_transition_to(&self, next: PageState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Fetching)
                | (Self::Fetching, Self::Extracted)
                | (Self::Fetching, Self::FetchFailed)
                | (Self::Extracted, Self::Written)
                | (Self::Extracted, Self::WriteFailed)
                | (Self::Written, Self::Done)
                | (Self::FetchFailed, Self::Done)
                | (Self::WriteFailed, Self::Done)
        )
    }

    /// Returns the log representation of the state
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetching => "fetching",
            Self::Extracted => "extracted",
            Self::Written => "written",
            Self::FetchFailed => "fetch_failed",
            Self::WriteFailed => "write_failed",
            Self::Done => "done",
        }
    }

    /// Returns all possible page states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Pending,
            Self::Fetching,
            Self::Extracted,
            Self::Written,
            Self::FetchFailed,
            Self::WriteFailed,
            Self::Done,
        ]
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The path a finished task took to `Done`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageOutcome {
    Written,
    FetchFailed,
    WriteFailed,
}

impl PageOutcome {
    /// Returns the state that precedes `Done` for this outcome
    pub fn state(&self) -> PageState {
        match self {
            Self::Written => PageState::Written,
            Self::FetchFailed => PageState::FetchFailed,
            Self::WriteFailed => PageState::WriteFailed,
        }
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state())
    }
}
