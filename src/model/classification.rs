//! Per-page classification types.

use super::Page;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a page relates to the pages before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Starts a new correspondence unit (new sender).
    Envelope,
    /// Starts a new sub-document inside the current correspondence unit.
    Document,
    /// Continues the current sub-document.
    #[default]
    Same,
}

impl Mode {
    /// All modes in display order.
    pub const ALL: [Mode; 3] = [Mode::Envelope, Mode::Document, Mode::Same];

    /// Lowercase name used in plans and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Envelope => "envelope",
            Mode::Document => "document",
            Mode::Same => "same",
        }
    }

    /// Check if this mode opens a new group.
    pub fn is_boundary(self) -> bool {
        !matches!(self, Mode::Same)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A metadata field that participates in inheritance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Receipt date (YYMMDD)
    Date,
    /// Sender company
    CompanyName,
    /// Document title
    DocumentType,
    /// Person the document concerns
    PersonName,
}

impl Field {
    /// All fields in table order.
    pub const ALL: [Field; 4] = [
        Field::Date,
        Field::CompanyName,
        Field::DocumentType,
        Field::PersonName,
    ];

    /// Position of the field in [`Field::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Fields detected on a single page by the field extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedInfo {
    /// Detected company name (empty when none matched)
    pub company_name: String,
    /// Detected person name (empty when none matched)
    pub person_name: String,
    /// Detected title line (empty when none qualified)
    pub document_type: String,
    /// Whether the page looks like an envelope or cover letter
    pub is_envelope: bool,
}

/// User-editable classification of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Classification {
    /// Boundary mode
    pub mode: Mode,
    /// Route this page to the aggregate excluded output
    pub is_excluded: bool,
    /// Date as YYMMDD, or empty
    pub date: String,
    /// Sender company, or empty
    pub company_name: String,
    /// Document title, or empty
    pub document_type: String,
    /// Person name, or empty
    pub person_name: String,
    /// File name typed by the reviewer, or empty
    pub manual_file_name: String,
}

impl Classification {
    /// Create a classification with the given mode and empty fields.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Envelope-mode classification.
    pub fn envelope() -> Self {
        Self::new(Mode::Envelope)
    }

    /// Document-mode classification.
    pub fn document() -> Self {
        Self::new(Mode::Document)
    }

    /// Same-mode classification.
    pub fn same() -> Self {
        Self::new(Mode::Same)
    }

    /// Set the date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Set the company name.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company_name = company.into();
        self
    }

    /// Set the document type.
    pub fn with_document_type(mut self, document_type: impl Into<String>) -> Self {
        self.document_type = document_type.into();
        self
    }

    /// Set the person name.
    pub fn with_person(mut self, person: impl Into<String>) -> Self {
        self.person_name = person.into();
        self
    }

    /// Set the manual file name.
    pub fn with_manual_file_name(mut self, name: impl Into<String>) -> Self {
        self.manual_file_name = name.into();
        self
    }

    /// Mark the page as excluded (or not).
    pub fn excluded(mut self, excluded: bool) -> Self {
        self.is_excluded = excluded;
        self
    }

    /// Stored value of a field.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Date => &self.date,
            Field::CompanyName => &self.company_name,
            Field::DocumentType => &self.document_type,
            Field::PersonName => &self.person_name,
        }
    }

    /// Mutable access to a field, for reviewers editing a plan.
    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Date => &mut self.date,
            Field::CompanyName => &mut self.company_name,
            Field::DocumentType => &mut self.document_type,
            Field::PersonName => &mut self.person_name,
        }
    }
}

impl AsRef<Classification> for Classification {
    fn as_ref(&self) -> &Classification {
        self
    }
}

/// A page together with its confirmed classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedPage {
    /// The source page
    pub page: Page,
    /// The page's classification
    pub classification: Classification,
}

impl ClassifiedPage {
    /// Pair a page with a classification.
    pub fn new(page: Page, classification: Classification) -> Self {
        Self {
            page,
            classification,
        }
    }

    /// Page number of the underlying page.
    pub fn page_number(&self) -> u32 {
        self.page.page_number
    }
}

impl AsRef<Classification> for ClassifiedPage {
    fn as_ref(&self) -> &Classification {
        &self.classification
    }
}
