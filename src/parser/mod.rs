//! Page decoding and the resilient extraction loop.

mod backend;
mod extractor;
mod options;

pub use backend::{LopdfDecoder, OpenDecoder, PageDecoder};
pub use extractor::{Extractor, Stage};
pub use options::ExtractOptions;

pub(crate) use extractor::extract_pages;
