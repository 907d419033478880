//! Heuristic per-page field extraction.
//!
//! All functions here are pure: they look at a page's text (and the company
//! reference list) and never at neighbouring pages. Missing fields are
//! reported as `None` / empty rather than guessed.
//!
//! # Example
//!
//! ```
//! use docsort::extract::{extract_company_name, extract_document_type};
//!
//! let text = "請求書\n株式会社サンプル 御中";
//! assert_eq!(extract_document_type(text), "請求書");
//! assert_eq!(
//!     extract_company_name::<&str>(text, &[]).as_deref(),
//!     Some("株式会社サンプル")
//! );
//! ```

mod companies;
mod options;

pub use companies::CompanyList;
pub use options::{
    ExtractOptions, DEFAULT_COMPANY_MARKERS, DEFAULT_ENVELOPE_KEYWORDS, DEFAULT_MAX_TITLE_CHARS,
    DEFAULT_PERSON_LABELS,
};

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::ExtractedInfo;

/// Compiled field extractor.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    options: ExtractOptions,
    company_pattern: Option<Regex>,
    person_patterns: Vec<Regex>,
    noise_line: Regex,
}

impl FieldExtractor {
    /// Compile an extractor from options.
    pub fn new(options: ExtractOptions) -> Result<Self> {
        let company_pattern = if options.company_markers.is_empty() {
            None
        } else {
            let markers = options
                .company_markers
                .iter()
                .map(|m| regex::escape(m))
                .collect::<Vec<_>>()
                .join("|");
            Some(compile(&format!(r"\S*(?:{})\S*", markers))?)
        };

        let person_patterns = options
            .person_labels
            .iter()
            .map(|label| {
                let label = label
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| regex::escape(&c.to_string()))
                    .collect::<Vec<_>>()
                    .join(r"\s*");
                compile(&format!(r"{}\s*[：:]*\s*(\S{{2,5}}\s+\S{{2,5}})", label))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            options,
            company_pattern,
            person_patterns,
            noise_line: compile(r"^[\d\p{P}\p{S}\s]+$")?,
        })
    }

    /// Options this extractor was built from.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Find the sender company.
    ///
    /// The first entry of `companies` that occurs in `text` wins. Without a
    /// list match, the first whitespace-delimited token containing a
    /// legal-entity marker is returned.
    pub fn company_name<S: AsRef<str>>(&self, text: &str, companies: &[S]) -> Option<String> {
        if let Some(company) = companies
            .iter()
            .map(|c| c.as_ref())
            .find(|c| !c.is_empty() && text.contains(c))
        {
            return Some(company.to_string());
        }

        self.company_pattern
            .as_ref()
            .and_then(|re| re.find(text))
            .map(|m| m.as_str().to_string())
    }

    /// Find a labelled person name ("surname given-name").
    pub fn person_name(&self, text: &str) -> Option<String> {
        self.person_patterns.iter().find_map(|re| {
            re.captures(text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
        })
    }

    /// First line that looks like a title, truncated to the configured length.
    pub fn document_type(&self, text: &str) -> String {
        for line in text.split(['\n', '\r']) {
            let trimmed = line.trim();
            if trimmed.chars().count() < self.options.min_title_chars {
                continue;
            }
            if self.noise_line.is_match(trimmed) {
                continue;
            }
            let max = self.options.max_title_chars;
            return trimmed.chars().take(max).collect();
        }

        String::new()
    }

    /// Check for envelope or cover-letter wording.
    pub fn is_envelope(&self, text: &str) -> bool {
        self.options
            .envelope_keywords
            .iter()
            .any(|k| !k.is_empty() && text.contains(k.as_str()))
    }

    /// Run every extractor over one page's text.
    pub fn extract<S: AsRef<str>>(&self, text: &str, companies: &[S]) -> ExtractedInfo {
        ExtractedInfo {
            company_name: self.company_name(text, companies).unwrap_or_default(),
            person_name: self.person_name(text).unwrap_or_default(),
            document_type: self.document_type(text),
            is_envelope: self.is_envelope(text),
        }
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        default_extractor().clone()
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::InvalidPattern(e.to_string()))
}

fn default_extractor() -> &'static FieldExtractor {
    static DEFAULT: OnceLock<FieldExtractor> = OnceLock::new();
    DEFAULT.get_or_init(|| {
        FieldExtractor::new(ExtractOptions::default()).expect("default patterns compile")
    })
}

/// Find the sender company using the default markers.
pub fn extract_company_name<S: AsRef<str>>(text: &str, companies: &[S]) -> Option<String> {
    default_extractor().company_name(text, companies)
}

/// Find a labelled person name using the default labels.
pub fn extract_person_name(text: &str) -> Option<String> {
    default_extractor().person_name(text)
}

/// First title-like line of the page (at most 30 characters).
pub fn extract_document_type(text: &str) -> String {
    default_extractor().document_type(text)
}

/// Check for the default envelope / cover-letter keywords.
pub fn is_envelope_or_cover_letter(text: &str) -> bool {
    default_extractor().is_envelope(text)
}
