//! File naming options.

use serde::{Deserialize, Serialize};

use crate::grouping::Placeholders;

/// Default file extension.
pub const DEFAULT_EXTENSION: &str = ".pdf";

/// Default honorific appended to person names.
pub const DEFAULT_HONORIFIC: &str = "様";

/// Default marker meaning "no person".
pub const DEFAULT_NO_PERSON: &str = "（なし）";

/// Default name of the aggregate excluded output.
pub const DEFAULT_EXCLUDED_FILE_NAME: &str = "除外データ.pdf";

/// Options for file-name synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NamingOptions {
    /// Markers for missing metadata
    pub placeholders: Placeholders,

    /// Extension appended to every name (with leading dot)
    pub extension: String,

    /// Suffix appended to a person name
    pub honorific: String,

    /// Person value treated the same as an empty person
    pub no_person_marker: String,

    /// Reserved name of the aggregate excluded output
    pub excluded_file_name: String,
}

impl NamingOptions {
    /// Create new naming options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set placeholders.
    pub fn with_placeholders(mut self, placeholders: Placeholders) -> Self {
        self.placeholders = placeholders;
        self
    }

    /// Set the honorific.
    pub fn with_honorific(mut self, honorific: impl Into<String>) -> Self {
        self.honorific = honorific.into();
        self
    }

    /// Set the "no person" marker.
    pub fn with_no_person_marker(mut self, marker: impl Into<String>) -> Self {
        self.no_person_marker = marker.into();
        self
    }

    /// Set the reserved excluded-output name.
    pub fn with_excluded_file_name(mut self, name: impl Into<String>) -> Self {
        self.excluded_file_name = name.into();
        self
    }

    /// Set the file extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

impl Default for NamingOptions {
    fn default() -> Self {
        Self {
            placeholders: Placeholders::default(),
            extension: DEFAULT_EXTENSION.to_string(),
            honorific: DEFAULT_HONORIFIC.to_string(),
            no_person_marker: DEFAULT_NO_PERSON.to_string(),
            excluded_file_name: DEFAULT_EXCLUDED_FILE_NAME.to_string(),
        }
    }
}
