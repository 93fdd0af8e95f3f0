//! Extraction model types.
//!
//! A document's extracted text is kept as one [`PageRecord`] per page inside
//! an [`ExtractionResult`]; the concatenated text is always derived from the
//! records, never stored separately.

mod document;
mod page;

pub use document::ExtractionResult;
pub use page::{PageRecord, PageStatus};
