//! Sequential extraction of several documents.
//!
//! Documents are isolated from each other the same way pages are isolated
//! within a document: a file that cannot be opened is recorded as a failed
//! entry and the batch moves on.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::model::ExtractionResult;
use crate::parser::{Extractor, ExtractOptions, LopdfDecoder, OpenDecoder};
use crate::render::RULE_WIDTH;

/// Default destination for a document's extracted text:
/// `<stem>_extracted.txt` next to the source.
///
/// ```
/// use std::path::Path;
///
/// let out = pagewise::batch::default_output_path(Path::new("reports/q3.pdf"));
/// assert_eq!(out, Path::new("reports/q3_extracted.txt"));
/// ```
pub fn default_output_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    source.with_file_name(format!("{}_extracted.txt", stem))
}

/// Per-document figures for a successful extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    /// Total number of pages
    pub total_pages: u32,
    /// Pages with non-blank text
    pub pages_with_text: u32,
    /// Pages whose extraction failed
    pub failed_pages: u32,
    /// Characters across all pages
    pub chars: usize,
    /// Where the text was saved, if saving was enabled
    pub output: Option<PathBuf>,
}

impl DocumentStats {
    fn from_result(result: &ExtractionResult, output: Option<PathBuf>) -> Self {
        Self {
            total_pages: result.page_count(),
            pages_with_text: result.pages_with_text(),
            failed_pages: result.failed_count(),
            chars: result.char_count(),
            output,
        }
    }
}

/// What happened to one document in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BatchOutcome {
    /// The document was extracted (and saved, when enabled)
    Extracted(DocumentStats),
    /// The document could not be opened or saved
    Failed {
        /// Error message
        error: String,
    },
}

/// One document's entry in a batch summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchEntry {
    /// Source path
    pub path: PathBuf,
    /// File name for display
    pub file_name: String,
    /// Result of processing
    pub outcome: BatchOutcome,
}

impl BatchEntry {
    /// Check if this document was extracted.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, BatchOutcome::Extracted(_))
    }
}

/// Results of a batch run, in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    /// One entry per input path
    pub entries: Vec<BatchEntry>,
}

impl BatchSummary {
    /// Number of documents processed.
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// Number of documents extracted.
    pub fn successful(&self) -> usize {
        self.entries.iter().filter(|e| e.is_success()).count()
    }

    /// Number of documents that failed.
    pub fn failed(&self) -> usize {
        self.total() - self.successful()
    }

    /// Plain text summary of the run.
    pub fn render(&self) -> String {
        let banner = "=".repeat(RULE_WIDTH);
        let rule = "─".repeat(RULE_WIDTH);

        let mut out = format!("{banner}\nBATCH PROCESSING SUMMARY\n{banner}\n\n");
        out.push_str(&format!("Total PDFs: {}\n", self.total()));
        out.push_str(&format!("Successful: {}\n", self.successful()));
        out.push_str(&format!("Failed: {}\n\n", self.failed()));
        out.push_str(&format!("{rule}\nIndividual Results:\n{rule}\n"));

        for (idx, entry) in self.entries.iter().enumerate() {
            match &entry.outcome {
                BatchOutcome::Extracted(stats) => out.push_str(&format!(
                    "{}. OK {} - {}/{} pages with text, {} chars\n",
                    idx + 1,
                    entry.file_name,
                    stats.pages_with_text,
                    stats.total_pages,
                    stats.chars
                )),
                BatchOutcome::Failed { error } => out.push_str(&format!(
                    "{}. FAILED {} - {}\n",
                    idx + 1,
                    entry.file_name,
                    error
                )),
            }
        }

        out
    }
}

/// Extracts several documents one after another.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    paths: Vec<PathBuf>,
    save_individual: bool,
    options: ExtractOptions,
}

impl BatchProcessor {
    /// Create a processor over the given paths. Saving is on by default.
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            save_individual: true,
            options: ExtractOptions::default(),
        }
    }

    /// Enable or disable writing `<stem>_extracted.txt` per document.
    pub fn with_save_individual(mut self, save: bool) -> Self {
        self.save_individual = save;
        self
    }

    /// Set extraction options used for every document.
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Input paths.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Process every document with the lopdf decoder.
    pub fn run(&self) -> BatchSummary {
        self.run_with::<LopdfDecoder, _>(|_, _| {})
    }

    /// Process every document with decoder `D`, calling `on_entry` after each
    /// one with its index and entry.
    pub fn run_with<D, F>(&self, mut on_entry: F) -> BatchSummary
    where
        D: OpenDecoder,
        F: FnMut(usize, &BatchEntry),
    {
        let mut summary = BatchSummary::default();
        log::info!("Starting batch of {} documents", self.paths.len());

        for (idx, path) in self.paths.iter().enumerate() {
            let outcome = match self.process_one::<D>(path) {
                Ok(stats) => BatchOutcome::Extracted(stats),
                Err(e) => {
                    log::warn!("{}: {}", path.display(), e);
                    BatchOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };

            let entry = BatchEntry {
                path: path.clone(),
                file_name: display_name(path),
                outcome,
            };
            on_entry(idx, &entry);
            summary.entries.push(entry);
        }

        summary
    }

    fn process_one<D: OpenDecoder>(&self, path: &Path) -> Result<DocumentStats> {
        let mut extractor = Extractor::<D>::open_decoder(path, self.options.clone())?;
        let result = extractor.extract_all()?;

        let output = if self.save_individual {
            let destination = default_output_path(path);
            result.export(&destination)?;
            Some(destination)
        } else {
            None
        };

        Ok(DocumentStats::from_result(result, output))
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
