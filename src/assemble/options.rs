//! Assembly options.

/// Options for producing output documents.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Extract outputs on the rayon thread pool
    pub parallel: bool,

    /// Emit the aggregate excluded output
    pub include_excluded: bool,
}

impl AssembleOptions {
    /// Create new assemble options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel extraction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel extraction.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable the aggregate excluded output.
    pub fn with_excluded(mut self, include: bool) -> Self {
        self.include_excluded = include;
        self
    }
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            include_excluded: true,
        }
    }
}
