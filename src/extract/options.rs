//! Field extraction options.

/// Default legal-entity markers used to spot company names.
pub const DEFAULT_COMPANY_MARKERS: &[&str] = &["株式会社", "有限会社", "合同会社"];

/// Default person-name labels, in priority order.
pub const DEFAULT_PERSON_LABELS: &[&str] = &["氏名", "被保険者", "名前"];

/// Default envelope / cover letter keywords.
pub const DEFAULT_ENVELOPE_KEYWORDS: &[&str] = &["送付状", "送り状", "封筒", "拝啓", "敬具", "記"];

/// Maximum title length in characters.
pub const DEFAULT_MAX_TITLE_CHARS: usize = 30;

/// Options for the field extractor.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Legal-entity markers (matched literally)
    pub company_markers: Vec<String>,

    /// Person-name labels in priority order; whitespace between label characters is tolerated
    pub person_labels: Vec<String>,

    /// Keywords that mark envelopes and cover letters
    pub envelope_keywords: Vec<String>,

    /// Titles longer than this are truncated
    pub max_title_chars: usize,

    /// Minimum title length after trimming
    pub min_title_chars: usize,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the company markers.
    pub fn with_company_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.company_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the person labels.
    pub fn with_person_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.person_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the envelope keywords.
    pub fn with_envelope_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.envelope_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the maximum title length.
    pub fn with_max_title_chars(mut self, max: usize) -> Self {
        self.max_title_chars = max;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            company_markers: DEFAULT_COMPANY_MARKERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            person_labels: DEFAULT_PERSON_LABELS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            envelope_keywords: DEFAULT_ENVELOPE_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_title_chars: DEFAULT_MAX_TITLE_CHARS,
            min_title_chars: 2,
        }
    }
}
