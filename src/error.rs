//! Error types for pagewise library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pagewise operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while opening, extracting or exporting a document.
#[derive(Error, Debug)]
pub enum Error {
    /// The source path does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file could not be decoded as a PDF.
    #[error("Invalid PDF: {0}")]
    Format(String),

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// The PDF document is encrypted and cannot be decoded.
    #[error("Document is encrypted")]
    Encrypted,

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Result accessed before `extract_all` ran.
    #[error("Document has not been extracted yet")]
    NotExtracted,

    /// Extraction requested on a session that was closed without a result.
    #[error("Extraction session is closed")]
    Closed,

    /// Writing the extracted text failed.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON rendering failed.
    #[error("JSON error: {0}")]
    Json(String),

    /// I/O error when reading files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether this error aborts opening a document.
    pub fn is_fatal_open_error(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_)
                | Error::Format(_)
                | Error::UnsupportedVersion(_)
                | Error::Encrypted
        )
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::Format(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

/// Failure to decode the text of a single page.
///
/// Never escapes [`Extractor::extract_all`](crate::Extractor::extract_all);
/// it is recorded on the page instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("page {page}: {message}")]
pub struct DecodeError {
    /// 1-based page number that failed
    pub page: u32,
    /// Decoder message
    pub message: String,
}

impl DecodeError {
    /// Create a decode error for a page.
    pub fn new(page: u32, message: impl Into<String>) -> Self {
        Self {
            page,
            message: message.into(),
        }
    }
}
