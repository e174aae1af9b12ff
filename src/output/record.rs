use serde::{Deserialize, Serialize};

/// The text extracted from one successfully fetched page
///
/// Serializes to exactly two string fields, `url` and `text`, in that order.
/// `text` may be empty when the page has no paragraph blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// The seed URL the page was fetched from
    pub url: String,

    /// Concatenated paragraph text, one block per line
    pub text: String,
}

impl PageRecord {
    /// Creates a new page record
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
        }
    }

    /// Encodes the record as a single JSON line, including the trailing newline
    pub fn to_json_line(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        Ok(line)
    }
}
