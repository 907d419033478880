//! Error types for docsort library.

use std::io;
use thiserror::Error;

/// Result type alias for docsort operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while sorting a bundle.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing or writing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// A page extraction was requested with no pages.
    #[error("No pages requested")]
    EmptyPageList,

    /// The page-extraction collaborator failed for a page list.
    #[error("Failed to extract pages {pages:?}: {message}")]
    Extraction {
        /// Page numbers that were requested
        pages: Vec<u32>,
        /// Underlying failure
        message: String,
    },

    /// The configured company column does not exist in the spreadsheet.
    #[error("Column \"{0}\" not found")]
    MissingColumn(String),

    /// The spreadsheet contains no rows.
    #[error("Spreadsheet is empty")]
    EmptySpreadsheet,

    /// Spreadsheet could not be read.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// A review plan does not match the page set.
    #[error("Invalid review plan: {0}")]
    Plan(String),

    /// A configured extraction pattern does not compile.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap any failure as an extraction error for the given pages.
    pub fn extraction(pages: &[u32], err: impl std::fmt::Display) -> Self {
        Error::Extraction {
            pages: pages.to_vec(),
            message: err.to_string(),
        }
    }

    /// Page numbers attached to this error, if any.
    pub fn pages(&self) -> Option<&[u32]> {
        match self {
            Error::Extraction { pages, .. } => Some(pages),
            _ => None,
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

#[cfg(feature = "spreadsheet")]
impl From<calamine::Error> for Error {
    fn from(err: calamine::Error) -> Self {
        Error::Spreadsheet(err.to_string())
    }
}
