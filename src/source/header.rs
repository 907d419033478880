//! `%PDF-x.y` header check.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

const MAGIC: &[u8] = b"%PDF-";

/// How far into the file the header may start. Some scanners prepend junk.
const SEARCH_WINDOW: usize = 1024;

/// Header information of a PDF file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfHeader {
    /// Version such as "1.7" or "2.0"
    pub version: String,
    /// Byte offset of `%PDF-`
    pub offset: usize,
}

impl std::fmt::Display for PdfHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// Read the header from the start of `data`.
///
/// Returns `UnknownFormat` when no `%PDF-` marker is found near the start and
/// `UnsupportedVersion` when the version is not of the form `d.d`.
pub fn read_header(data: &[u8]) -> Result<PdfHeader> {
    let window = &data[..data.len().min(SEARCH_WINDOW)];
    let offset = window
        .windows(MAGIC.len())
        .position(|w| w == MAGIC)
        .ok_or(Error::UnknownFormat)?;

    let version: String = data[offset + MAGIC.len()..]
        .iter()
        .take(3)
        .map(|&b| b as char)
        .collect();

    if version.len() < 3 {
        return Err(Error::UnknownFormat);
    }

    let bytes = version.as_bytes();
    if !(bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()) {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(PdfHeader { version, offset })
}

/// Read the header of a file on disk.
pub fn read_header_from_path<P: AsRef<Path>>(path: P) -> Result<PdfHeader> {
    let mut head = Vec::with_capacity(SEARCH_WINDOW);
    File::open(path)?
        .take(SEARCH_WINDOW as u64)
        .read_to_end(&mut head)?;
    read_header(&head)
}

/// Check whether `data` looks like a PDF.
pub fn is_pdf(data: &[u8]) -> bool {
    read_header(data).is_ok()
}
