//! Extraction options and configuration.

/// Options controlling how page text is collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Trim leading and trailing whitespace from each page's text
    pub trim: bool,

    /// Treat a decoder panic on a page as a failure of that page only.
    ///
    /// The process panic hook still runs, so the default hook prints the
    /// panic message to stderr even though extraction continues.
    pub catch_panics: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable whitespace trimming.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Keep page text exactly as the decoder returned it.
    pub fn raw(mut self) -> Self {
        self.trim = false;
        self
    }

    /// Enable or disable panic isolation around the decoder.
    pub fn with_catch_panics(mut self, catch: bool) -> Self {
        self.catch_panics = catch;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            trim: true,
            catch_panics: true,
        }
    }
}
