//! Resilient page-by-page extraction.
//!
//! An [`Extractor`] owns the opened decoder for one session. `extract_all`
//! walks pages 1..=N in order and records a [`PageRecord`] for every page,
//! turning a page's decode failure (or decoder panic) into a failed record
//! instead of an error.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::error::{DecodeError, Error, Result};
use crate::model::{ExtractionResult, PageRecord};

use super::backend::{LopdfDecoder, OpenDecoder, PageDecoder};
use super::options::ExtractOptions;

/// Where an extraction session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Document handle held, nothing extracted yet
    Opened,
    /// Pages extracted; the handle has been released
    Extracted,
    /// Session closed; a result is kept if one was extracted
    Closed,
}

enum State<D> {
    Opened(D),
    Extracted(ExtractionResult),
    Closed(Option<ExtractionResult>),
}

/// One extraction session over one document.
///
/// # Example
///
/// ```no_run
/// use pagewise::Extractor;
///
/// let mut extractor = Extractor::open("filing.pdf")?;
/// let result = extractor.extract_all()?;
/// println!("{} pages, {} failed", result.page_count(), result.failed_count());
/// println!("{}", extractor.page_text(1)?);
/// # Ok::<(), pagewise::Error>(())
/// ```
pub struct Extractor<D: PageDecoder = LopdfDecoder> {
    name: String,
    page_count: u32,
    options: ExtractOptions,
    state: State<D>,
}

impl Extractor<LopdfDecoder> {
    /// Open a PDF file with the lopdf decoder.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ExtractOptions::default())
    }

    /// Open a PDF file with the lopdf decoder and custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<Self> {
        Self::open_decoder(path, options)
    }
}

impl<D: PageDecoder> Extractor<D> {
    /// Open a document with any decoder that can open paths.
    ///
    /// Fails with [`Error::NotFound`] before the decoder is touched when the
    /// path does not exist, so no handle is ever acquired in that case.
    pub fn open_decoder<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<Self>
    where
        D: OpenDecoder,
    {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }

        let decoder = D::open(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        log::debug!("Opened {} ({} pages)", name, decoder.page_count());
        Ok(Self::from_decoder(name, decoder).with_options(options))
    }

    /// Start a session over an already-opened decoder.
    pub fn from_decoder(name: impl Into<String>, decoder: D) -> Self {
        Self {
            name: name.into(),
            page_count: decoder.page_count(),
            options: ExtractOptions::default(),
            state: State::Opened(decoder),
        }
    }

    /// Replace the extraction options.
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Document name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Page count reported by the decoder when the session started.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Current lifecycle stage.
    pub fn stage(&self) -> Stage {
        match self.state {
            State::Opened(_) => Stage::Opened,
            State::Extracted(_) => Stage::Extracted,
            State::Closed(_) => Stage::Closed,
        }
    }

    /// Check whether the document handle is still held.
    pub fn holds_handle(&self) -> bool {
        matches!(self.state, State::Opened(_))
    }

    /// Extract every page in order and release the document handle.
    ///
    /// Page failures never make this return an error; they are recorded on
    /// the page. Calling it again returns the same result. Fails with
    /// [`Error::Closed`] if the session was closed before extracting.
    pub fn extract_all(&mut self) -> Result<&ExtractionResult> {
        let decoder = match std::mem::replace(&mut self.state, State::Closed(None)) {
            State::Opened(decoder) => decoder,
            State::Closed(None) => return Err(Error::Closed),
            other => {
                self.state = other;
                return self.result();
            }
        };

        let result = extract_pages(&self.name, &decoder, &self.options);
        drop(decoder);

        self.state = State::Extracted(result);
        self.result()
    }

    /// The extraction result, once `extract_all` has run.
    pub fn result(&self) -> Result<&ExtractionResult> {
        match &self.state {
            State::Extracted(result) | State::Closed(Some(result)) => Ok(result),
            State::Opened(_) | State::Closed(None) => Err(Error::NotExtracted),
        }
    }

    /// Consume the session and return its result.
    pub fn into_result(self) -> Result<ExtractionResult> {
        match self.state {
            State::Extracted(result) | State::Closed(Some(result)) => Ok(result),
            State::Opened(_) | State::Closed(None) => Err(Error::NotExtracted),
        }
    }

    /// Text of a page (1-indexed).
    pub fn page_text(&self, number: u32) -> Result<&str> {
        self.result()?.page_text(number)
    }

    /// Full text with page delimiters.
    pub fn full_text(&self) -> Result<String> {
        Ok(self.result()?.full_text())
    }

    /// Write the full text to `destination`.
    pub fn export<P: AsRef<Path>>(&self, destination: P) -> Result<()> {
        self.result()?.export(destination)
    }

    /// Close the session, releasing the handle if it is still held.
    ///
    /// An extracted result stays readable after closing.
    pub fn close(&mut self) {
        self.state = match std::mem::replace(&mut self.state, State::Closed(None)) {
            State::Opened(_) => State::Closed(None),
            State::Extracted(result) => State::Closed(Some(result)),
            closed @ State::Closed(_) => closed,
        };
    }
}

/// Run the page loop over a decoder.
pub(crate) fn extract_pages<D: PageDecoder + ?Sized>(
    name: &str,
    decoder: &D,
    options: &ExtractOptions,
) -> ExtractionResult {
    let page_count = decoder.page_count();
    let mut pages = Vec::with_capacity(page_count as usize);

    for number in 1..=page_count {
        let record = match decode_page(decoder, number, options) {
            Ok(text) => {
                log::debug!("{}: page {} extracted ({} bytes)", name, number, text.len());
                if options.trim {
                    PageRecord::extracted(number, text.trim())
                } else {
                    PageRecord::extracted(number, text)
                }
            }
            Err(e) => {
                log::warn!(
                    "{}: failed to extract text from page {}: {}",
                    name,
                    number,
                    e.message
                );
                PageRecord::failed(number, e.message)
            }
        };
        pages.push(record);
    }

    let result = ExtractionResult::new(name, pages);
    if result.failed_count() > 0 {
        log::warn!(
            "{}: extracted {} pages, {} failed {:?}",
            name,
            result.page_count(),
            result.failed_count(),
            result.failed_pages()
        );
    } else {
        log::info!("{}: extracted {} pages", name, result.page_count());
    }
    result
}

fn decode_page<D: PageDecoder + ?Sized>(
    decoder: &D,
    number: u32,
    options: &ExtractOptions,
) -> std::result::Result<String, DecodeError> {
    if !options.catch_panics {
        return decoder.extract_page_text(number);
    }

    match panic::catch_unwind(AssertUnwindSafe(|| decoder.extract_page_text(number))) {
        Ok(result) => result,
        Err(payload) => Err(DecodeError::new(
            number,
            format!("decoder panicked: {}", panic_message(payload.as_ref())),
        )),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
