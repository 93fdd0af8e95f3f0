//! # pagewise
//!
//! Page-by-page PDF text extraction that survives bad pages.
//!
//! A document is decoded one page at a time, in order. When a page cannot be
//! decoded (a scanned image, a malformed font, an unsupported encoding) that
//! page is recorded as failed with empty text and extraction carries on, so
//! one bad page never costs the rest of a long filing.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pagewise::Extractor;
//!
//! fn main() -> pagewise::Result<()> {
//!     let mut extractor = Extractor::open("filing.pdf")?;
//!     let result = extractor.extract_all()?;
//!
//!     for page in result.pages() {
//!         if page.is_failed() {
//!             eprintln!("page {} could not be read", page.number);
//!         }
//!     }
//!
//!     result.export("filing_extracted.txt")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Per-page fault isolation**: decode errors and decoder panics stay on their page
//! - **Page-indexed results**: 1-based lookup plus a delimited full-text view
//! - **Atomic export**: text files are written completely or not at all
//! - **Batch runs**: several documents, each isolated from the others
//! - **Pluggable decoders**: anything implementing [`PageDecoder`]

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use batch::{BatchEntry, BatchOutcome, BatchProcessor, BatchSummary, DocumentStats};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf, PdfFormat};
pub use error::{DecodeError, Error, Result};
pub use model::{ExtractionResult, PageRecord, PageStatus};
pub use parser::{ExtractOptions, Extractor, LopdfDecoder, OpenDecoder, PageDecoder, Stage};
pub use render::JsonFormat;

use std::path::Path;

/// Extract every page of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pagewise::extract_file;
///
/// let result = extract_file("filing.pdf").unwrap();
/// println!("Pages: {}", result.page_count());
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<ExtractionResult> {
    extract_file_with_options(path, ExtractOptions::default())
}

/// Extract every page of a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use pagewise::{extract_file_with_options, ExtractOptions};
///
/// let options = ExtractOptions::new().raw();
/// let result = extract_file_with_options("filing.pdf", options).unwrap();
/// ```
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<ExtractionResult> {
    let mut extractor = Extractor::open_with_options(path, options)?;
    extractor.extract_all()?;
    extractor.into_result()
}

/// Extract every page of a PDF held in memory.
///
/// `name` is only used for reporting.
pub fn extract_bytes(name: &str, data: &[u8]) -> Result<ExtractionResult> {
    let decoder = LopdfDecoder::load_bytes(data)?;
    Ok(parser::extract_pages(name, &decoder, &ExtractOptions::default()))
}

/// Extract the delimited full text of a PDF file.
///
/// # Example
///
/// ```no_run
/// let text = pagewise::extract_text("filing.pdf").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(extract_file(path)?.full_text())
}

/// Extract a PDF file and render the result as JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let result = extract_file(path)?;
    render::to_json(&result, format)
}
