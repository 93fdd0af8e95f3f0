//! Document-level types.

use std::fs::{File, Permissions};
use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tempfile::NamedTempFile;

use super::PageRecord;
use crate::error::{Error, Result};

/// The pages extracted from one document, in page order.
///
/// Built once by [`Extractor::extract_all`](crate::Extractor::extract_all)
/// and read-only afterwards. Page `n` is stored at index `n - 1`, and there
/// is exactly one record per page the decoder reported.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Source document file name
    name: String,

    /// Total number of pages
    page_count: u32,

    /// One record per page
    pages: Vec<PageRecord>,

    /// Number of pages whose extraction failed
    failed_count: u32,

    /// When the extraction ran
    extracted_at: DateTime<Utc>,
}

impl ExtractionResult {
    /// Assemble a result from records numbered 1..=N in order.
    pub(crate) fn new(name: impl Into<String>, pages: Vec<PageRecord>) -> Self {
        debug_assert!(pages
            .iter()
            .enumerate()
            .all(|(i, p)| p.number as usize == i + 1));

        let failed_count = pages.iter().filter(|p| p.is_failed()).count() as u32;
        Self {
            name: name.into(),
            page_count: pages.len() as u32,
            pages,
            failed_count,
            extracted_at: Utc::now(),
        }
    }

    /// Source document name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// All page records in page order.
    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }

    /// Get a page record by number (1-indexed).
    pub fn page(&self, number: u32) -> Result<&PageRecord> {
        if number == 0 || number > self.page_count {
            return Err(Error::PageOutOfRange(number, self.page_count));
        }
        Ok(&self.pages[(number - 1) as usize])
    }

    /// Get the stored text of a page (1-indexed). Empty for failed pages.
    pub fn page_text(&self, number: u32) -> Result<&str> {
        self.page(number).map(|p| p.text.as_str())
    }

    /// Full text: every page, in order, preceded by its page delimiter.
    pub fn full_text(&self) -> String {
        crate::render::to_text(self)
    }

    /// Write [`full_text`](Self::full_text) to `destination`.
    ///
    /// The text goes to a temporary file next to the destination, which
    /// replaces the destination only once fully written. On failure the
    /// destination is left as it was.
    pub fn export<P: AsRef<Path>>(&self, destination: P) -> Result<()> {
        let path = destination.as_ref();
        let write_error = |source| Error::Write {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_error)?;
        tmp.write_all(self.full_text().as_bytes())
            .map_err(write_error)?;
        tmp.as_file().sync_all().map_err(write_error)?;

        // Temp files are created owner-only; keep the target's mode instead.
        let permissions = match std::fs::metadata(path) {
            Ok(meta) => meta.permissions(),
            Err(_) => new_file_permissions(tmp.as_file()).map_err(write_error)?,
        };
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(write_error)?;
        tmp.persist(path).map_err(|e| write_error(e.error))?;

        log::info!("Saved {} pages of {} to {}", self.page_count, self.name, path.display());
        Ok(())
    }

    /// Page numbers whose extraction failed.
    pub fn failed_pages(&self) -> Vec<u32> {
        self.pages
            .iter()
            .filter(|p| p.is_failed())
            .map(|p| p.number)
            .collect()
    }

    /// Number of pages whose extraction failed.
    pub fn failed_count(&self) -> u32 {
        self.failed_count
    }

    /// Number of pages with non-blank text.
    pub fn pages_with_text(&self) -> u32 {
        self.pages.iter().filter(|p| p.has_text()).count() as u32
    }

    /// Total characters across all pages.
    pub fn char_count(&self) -> usize {
        self.pages.iter().map(PageRecord::char_count).sum()
    }

    /// Whitespace-separated word count across all pages.
    pub fn word_count(&self) -> usize {
        self.pages
            .iter()
            .map(|p| p.text.split_whitespace().count())
            .sum()
    }

    /// When the extraction ran.
    pub fn extracted_at(&self) -> DateTime<Utc> {
        self.extracted_at
    }

    /// Check if the document has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(unix)]
fn new_file_permissions(_file: &File) -> io::Result<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Ok(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions(file: &File) -> io::Result<Permissions> {
    Ok(file.metadata()?.permissions())
}
