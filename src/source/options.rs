//! Source loading options.

/// How per-page text extraction failures are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorMode {
    /// Use empty text for the page and log a warning
    #[default]
    Lenient,
    /// Fail on the first page that cannot be read
    Strict,
}

/// Options for reading a source PDF.
#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,
}

impl SourceOptions {
    /// Create new source options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail when a page's text cannot be extracted.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }
}
