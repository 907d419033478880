//! Output group types produced by the grouping engine.

use super::Page;
use serde::{Deserialize, Serialize};

/// Metadata shared by every group under one envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeInfo {
    /// Date (YYMMDD or placeholder)
    pub date: String,
    /// Company name (or placeholder)
    pub company_name: String,
}

impl EnvelopeInfo {
    /// Create envelope info.
    pub fn new(date: impl Into<String>, company_name: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            company_name: company_name.into(),
        }
    }
}

/// One logical output document before file-name collision resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Envelope-level metadata
    pub envelope_info: EnvelopeInfo,
    /// Document title (or placeholder)
    pub document_type: String,
    /// Person name, possibly empty
    pub person_name: String,
    /// Member pages in original relative order
    pub pages: Vec<Page>,
    /// Whether this group holds excluded pages
    pub is_excluded_data: bool,
    /// Reviewer-supplied file name of the first member page
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub manual_file_name: String,
}

impl Group {
    /// Page numbers of the member pages, in group order.
    pub fn page_numbers(&self) -> Vec<u32> {
        self.pages.iter().map(|p| p.page_number).collect()
    }

    /// Number of member pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Check if the group holds deliverable (non-excluded) pages.
    pub fn is_effective(&self) -> bool {
        !self.is_excluded_data
    }
}
