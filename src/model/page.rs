//! Page-level types.

use serde::Serialize;

/// Outcome of extracting one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageStatus {
    /// The decoder returned text for the page (possibly empty)
    Extracted,

    /// The decoder failed on this page; the page text is empty
    Failed {
        /// Decoder message
        reason: String,
    },
}

/// The stored result for one page of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    /// Page number (1-indexed)
    pub number: u32,

    /// Extracted text; empty when extraction failed
    pub text: String,

    /// Whether the text came from the decoder or the page failed
    #[serde(flatten)]
    pub status: PageStatus,
}

impl PageRecord {
    /// Record text the decoder returned for a page.
    pub fn extracted(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
            status: PageStatus::Extracted,
        }
    }

    /// Record a page whose extraction failed.
    pub fn failed(number: u32, reason: impl Into<String>) -> Self {
        Self {
            number,
            text: String::new(),
            status: PageStatus::Failed {
                reason: reason.into(),
            },
        }
    }

    /// Check if extraction of this page failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.status, PageStatus::Failed { .. })
    }

    /// Failure reason, if the page failed.
    pub fn failure_reason(&self) -> Option<&str> {
        match &self.status {
            PageStatus::Failed { reason } => Some(reason),
            PageStatus::Extracted => None,
        }
    }

    /// Check if the page has any non-whitespace text.
    ///
    /// A page can be blank without having failed (e.g. a scanned image page).
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Character count of the page text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
