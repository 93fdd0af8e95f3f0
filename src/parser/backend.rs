//! PDF decoder abstraction layer.
//!
//! The extractor only needs two things from a PDF library: how many pages a
//! document has and the text of one page. [`PageDecoder`] captures exactly
//! that, so the concrete library (lopdf) stays behind this module.

use std::path::Path;

use lopdf::Document as LopdfDocument;

use crate::detect::detect_format_from_path;
use crate::error::{DecodeError, Error, Result};

/// Page-level text access to an opened document.
pub trait PageDecoder {
    /// Number of pages the document reports.
    fn page_count(&self) -> u32;

    /// Extract the text of a single 1-based page.
    fn extract_page_text(&self, page: u32) -> std::result::Result<String, DecodeError>;
}

/// A [`PageDecoder`] that can open itself from a filesystem path.
pub trait OpenDecoder: PageDecoder + Sized {
    /// Open and decode the document at `path`.
    ///
    /// Implementations return [`Error::Format`] (or [`Error::Encrypted`])
    /// when the file is not a document they can decode.
    fn open(path: &Path) -> Result<Self>;
}

impl<D: PageDecoder + ?Sized> PageDecoder for Box<D> {
    fn page_count(&self) -> u32 {
        (**self).page_count()
    }

    fn extract_page_text(&self, page: u32) -> std::result::Result<String, DecodeError> {
        (**self).extract_page_text(page)
    }
}

impl<D: PageDecoder + ?Sized> PageDecoder for &D {
    fn page_count(&self) -> u32 {
        (**self).page_count()
    }

    fn extract_page_text(&self, page: u32) -> std::result::Result<String, DecodeError> {
        (**self).extract_page_text(page)
    }
}

// ---------------------------------------------------------------------------
// LopdfDecoder: concrete implementation backed by lopdf
// ---------------------------------------------------------------------------

/// Concrete [`PageDecoder`] backed by `lopdf::Document`.
pub struct LopdfDecoder {
    doc: LopdfDocument,
    page_count: u32,
}

impl LopdfDecoder {
    /// Load from a file path, checking the PDF header first.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        detect_format_from_path(path)?;
        let doc = LopdfDocument::load(path).map_err(Error::from)?;
        Self::from_document(doc)
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        crate::detect::detect_format_from_bytes(data)?;
        let doc = LopdfDocument::load_mem(data).map_err(Error::from)?;
        Self::from_document(doc)
    }

    /// lopdf 0.34 loads encrypted documents without decrypting them, so
    /// their page text would be ciphertext.
    fn from_document(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        let page_count = doc.get_pages().len() as u32;
        Ok(Self { doc, page_count })
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// Get PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }
}

impl PageDecoder for LopdfDecoder {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn extract_page_text(&self, page: u32) -> std::result::Result<String, DecodeError> {
        if page == 0 || page > self.page_count {
            return Err(DecodeError::new(page, "no such page"));
        }
        self.doc
            .extract_text(&[page])
            .map_err(|e| DecodeError::new(page, e.to_string()))
    }
}

impl OpenDecoder for LopdfDecoder {
    fn open(path: &Path) -> Result<Self> {
        Self::load_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDecoder(u32);

    impl PageDecoder for FixedDecoder {
        fn page_count(&self) -> u32 {
            self.0
        }

        fn extract_page_text(&self, page: u32) -> std::result::Result<String, DecodeError> {
            Ok(format!("text {}", page))
        }
    }

    #[test]
    fn test_boxed_decoder_delegates() {
        let boxed: Box<dyn PageDecoder> = Box::new(FixedDecoder(2));
        assert_eq!(boxed.page_count(), 2);
        assert_eq!(boxed.extract_page_text(2).unwrap(), "text 2");
    }

    #[test]
    fn test_load_bytes_rejects_non_pdf() {
        let result = LopdfDecoder::load_bytes(b"plain text, not a document");
        assert!(matches!(result, Err(Error::Format(_))));
    }

    #[test]
    fn test_load_bytes_rejects_broken_body() {
        let result = LopdfDecoder::load_bytes(b"%PDF-1.4\nthis is not an object graph\n");
        assert!(matches!(result, Err(Error::Format(_))));
    }

    #[test]
    fn test_load_file_rejects_non_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.pdf");
        std::fs::write(&path, "quarterly notes").unwrap();
        assert!(matches!(LopdfDecoder::open(&path), Err(Error::Format(_))));
    }
}
