//! # docsort
//!
//! Split scanned multi-page mail bundles into named documents.
//!
//! A bundle is a single PDF holding many letters: envelopes, cover letters,
//! invoices, notices. docsort reads the text of every page, suggests where
//! each letter starts and what it is, lets a reviewer confirm those
//! classifications, and then cuts the bundle into one PDF per document with a
//! `date_company_type[_person様].pdf` name.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docsort::Docsort;
//!
//! fn main() -> docsort::Result<()> {
//!     let result = Docsort::new()
//!         .with_default_date("240101")
//!         .sort_file("bundle.pdf", None)?;
//!
//!     for output in &result.assembly.outputs {
//!         std::fs::write(&output.document.file_name, &output.data)?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - [`extract`]: per-page company, person, title and envelope detection
//! - [`classify`]: first-pass suggestions, review plans and field inheritance
//! - [`grouping`]: partition of confirmed pages into output groups
//! - [`naming`]: file names and collision numbering
//! - [`assemble`]: one PDF per group, plus one for all excluded pages
//! - [`source`]: reading the bundle and cutting pages out of it with lopdf

pub mod assemble;
pub mod classify;
pub mod error;
pub mod extract;
pub mod grouping;
pub mod json;
pub mod model;
pub mod naming;
pub mod source;

// Re-export commonly used types
pub use assemble::{AssembleOptions, Assembler, Assembly, PageSource};
pub use classify::{Resolver, ReviewPlan, Suggester, Suggestion};
pub use error::{Error, Result};
pub use extract::{CompanyList, ExtractOptions, FieldExtractor};
pub use grouping::{group_pages, GroupingEngine, Placeholders};
pub use json::JsonFormat;
pub use model::{
    AssembledDocument, AssemblyFailure, Classification, ClassifiedPage, EnvelopeInfo,
    ExtractedInfo, Field, Group, Manifest, Mode, OutputDocument, Page, TextItem,
};
pub use naming::{NameSynthesizer, NamingOptions};
pub use source::{ErrorMode, SourceDocument, SourceOptions};

use std::path::Path;

/// Options for a whole sorting run.
#[derive(Debug, Clone, Default)]
pub struct SortOptions {
    /// Field extraction settings
    pub extract: ExtractOptions,

    /// File naming settings, including placeholders
    pub naming: NamingOptions,

    /// Output assembly settings
    pub assemble: AssembleOptions,

    /// Source reading settings
    pub source: SourceOptions,

    /// Date (YYMMDD) pre-filled on the first envelope page
    pub default_date: String,
}

/// Everything a sorting run produced.
#[derive(Debug, Clone)]
pub struct SortResult {
    /// Pages with the classifications that were used
    pub pages: Vec<ClassifiedPage>,
    /// Groups in emission order
    pub groups: Vec<Group>,
    /// Extracted outputs and failures
    pub assembly: Assembly,
}

impl SortResult {
    /// Serializable summary of the outputs.
    pub fn manifest(&self) -> Manifest {
        self.assembly.manifest()
    }
}

/// Builder for sorting bundles.
///
/// # Example
///
/// ```no_run
/// use docsort::{CompanyList, Docsort, ReviewPlan};
///
/// let plan = ReviewPlan::load("plan.json")?;
/// let result = Docsort::new()
///     .with_companies(CompanyList::from_lines("株式会社サンプル\nテスト工業"))
///     .sequential()
///     .sort_file("bundle.pdf", Some(&plan))?;
/// println!("{} outputs", result.assembly.outputs.len());
/// # Ok::<(), docsort::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Docsort {
    options: SortOptions,
    companies: CompanyList,
}

impl Docsort {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder from complete options.
    pub fn with_options(options: SortOptions) -> Self {
        Self {
            options,
            companies: CompanyList::default(),
        }
    }

    /// Set the company reference list.
    pub fn with_companies(mut self, companies: CompanyList) -> Self {
        self.companies = companies;
        self
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.options.extract = options;
        self
    }

    /// Set naming options.
    pub fn with_naming(mut self, naming: NamingOptions) -> Self {
        self.options.naming = naming;
        self
    }

    /// Set the markers used for missing metadata.
    pub fn with_placeholders(mut self, placeholders: Placeholders) -> Self {
        self.options.naming = self.options.naming.with_placeholders(placeholders);
        self
    }

    /// Pre-fill the first envelope page with this date (YYMMDD).
    pub fn with_default_date(mut self, date: impl Into<String>) -> Self {
        self.options.default_date = date.into();
        self
    }

    /// Extract outputs one after another.
    pub fn sequential(mut self) -> Self {
        self.options.assemble = self.options.assemble.sequential();
        self
    }

    /// Do not emit the aggregate excluded output.
    pub fn without_excluded(mut self) -> Self {
        self.options.assemble = self.options.assemble.with_excluded(false);
        self
    }

    /// Fail when a page's text cannot be read.
    pub fn strict(mut self) -> Self {
        self.options.source = self.options.source.strict();
        self
    }

    /// Options in use.
    pub fn options(&self) -> &SortOptions {
        &self.options
    }

    /// Company reference list in use.
    pub fn companies(&self) -> &CompanyList {
        &self.companies
    }

    /// Open a source PDF with the configured source options.
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<SourceDocument> {
        SourceDocument::open_with_options(path, self.options.source.clone())
    }

    /// Suggester configured from these options.
    pub fn suggester(&self) -> Result<Suggester> {
        let extractor = FieldExtractor::new(self.options.extract.clone())?;
        Ok(Suggester::new(extractor, self.companies.clone())
            .with_default_date(self.options.default_date.clone()))
    }

    /// Initial, reviewable classifications for `pages`.
    pub fn suggest(&self, pages: &[Page]) -> Result<Vec<ClassifiedPage>> {
        Ok(self.suggester()?.plan(pages))
    }

    /// Partition confirmed pages into groups.
    pub fn group(&self, pages: &[ClassifiedPage]) -> Vec<Group> {
        GroupingEngine::new(self.options.naming.placeholders.clone()).group(pages)
    }

    /// Assembler configured from these options.
    pub fn assembler(&self) -> Assembler {
        Assembler::new(
            NameSynthesizer::new(self.options.naming.clone()),
            self.options.assemble.clone(),
        )
    }

    /// Output descriptors for confirmed pages, without extracting anything.
    pub fn preview(&self, pages: &[ClassifiedPage]) -> Vec<OutputDocument> {
        self.assembler().plan(&self.group(pages))
    }

    /// Group confirmed pages and extract every output from `source`.
    pub fn split<S: PageSource + ?Sized>(
        &self,
        source: &S,
        pages: Vec<ClassifiedPage>,
    ) -> SortResult {
        let groups = self.group(&pages);
        let assembly = self.assembler().assemble(source, &groups);
        SortResult {
            pages,
            groups,
            assembly,
        }
    }

    /// Classify and split an opened source.
    ///
    /// With a plan, its classifications are used as confirmed; without one,
    /// the suggestions are used unreviewed.
    pub fn sort(&self, source: &SourceDocument, plan: Option<&ReviewPlan>) -> Result<SortResult> {
        let pages = source.pages()?;
        let classified = match plan {
            Some(plan) => plan.apply(&pages)?,
            None => self.suggest(&pages)?,
        };
        Ok(self.split(source, classified))
    }

    /// Open, classify and split a PDF file.
    pub fn sort_file<P: AsRef<Path>>(
        &self,
        path: P,
        plan: Option<&ReviewPlan>,
    ) -> Result<SortResult> {
        let source = self.open(path)?;
        self.sort(&source, plan)
    }

    /// Open, classify and split a PDF held in memory.
    pub fn sort_bytes(&self, data: &[u8], plan: Option<&ReviewPlan>) -> Result<SortResult> {
        let source = SourceDocument::from_bytes_with_options(data, self.options.source.clone())?;
        self.sort(&source, plan)
    }
}

/// Suggest a review plan for a PDF file with default options.
///
/// # Example
///
/// ```no_run
/// let plan = docsort::suggest_file("bundle.pdf")?;
/// plan.save("plan.json")?;
/// # Ok::<(), docsort::Error>(())
/// ```
pub fn suggest_file<P: AsRef<Path>>(path: P) -> Result<ReviewPlan> {
    let docsort = Docsort::new();
    let pages = docsort.open(path)?.pages()?;
    Ok(ReviewPlan::from_classified(&docsort.suggest(&pages)?))
}

/// Split a PDF file according to a review plan with default options.
pub fn split_file<P: AsRef<Path>>(path: P, plan: &ReviewPlan) -> Result<SortResult> {
    Docsort::new().sort_file(path, Some(plan))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docsort_builder() {
        let docsort = Docsort::new()
            .with_default_date("240101")
            .sequential()
            .without_excluded()
            .strict();

        assert_eq!(docsort.options.default_date, "240101");
        assert!(!docsort.options.assemble.parallel);
        assert!(!docsort.options.assemble.include_excluded);
        assert_eq!(docsort.options.source.error_mode, ErrorMode::Strict);
    }

    #[test]
    fn test_docsort_builder_default() {
        let docsort = Docsort::default();
        assert!(docsort.options.assemble.parallel);
        assert!(docsort.options.assemble.include_excluded);
        assert!(docsort.companies.is_empty());
        assert_eq!(docsort.options.source.error_mode, ErrorMode::Lenient);
    }

    #[test]
    fn test_placeholders_reach_grouping() {
        let docsort = Docsort::new().with_placeholders(Placeholders {
            date: "[d]".to_string(),
            company_name: "[c]".to_string(),
            document_type: "[t]".to_string(),
        });
        let pages = vec![ClassifiedPage::new(
            Page::new(1, ""),
            Classification::envelope(),
        )];
        let outputs = docsort.preview(&pages);
        assert_eq!(outputs[0].file_name, "[d]_[c]_[t].pdf");
    }

    #[test]
    fn test_suggest_then_preview() {
        let pages = vec![
            Page::new(1, "送付状\n株式会社サンプル\n拝啓"),
            Page::new(2, "請求書"),
        ];
        let docsort = Docsort::new().with_default_date("240101");
        let classified = docsort.suggest(&pages).unwrap();
        let outputs = docsort.preview(&classified);
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].file_name, "240101_株式会社サンプル_送付状.pdf");
        assert_eq!(outputs[0].page_numbers, vec![1, 2]);
    }

    #[test]
    fn test_company_list_reaches_suggester() {
        let docsort = Docsort::new().with_companies(CompanyList::from_names(["サンプル"]));
        let classified = docsort
            .suggest(&[Page::new(1, "株式会社サンプル 御中")])
            .unwrap();
        assert_eq!(classified[0].classification.company_name, "サンプル");
    }

    #[test]
    fn test_custom_markers_are_literal() {
        let docsort = Docsort::new()
            .with_extract_options(ExtractOptions::new().with_company_markers(["(株)"]));
        let classified = docsort.suggest(&[Page::new(1, "サンプル(株)")]).unwrap();
        assert_eq!(classified[0].classification.company_name, "サンプル(株)");
    }

    #[test]
    fn test_sort_bytes_rejects_non_pdf() {
        let result = Docsort::new().sort_bytes(b"not a pdf", None);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }
}
