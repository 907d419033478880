//! First-pass classification suggestions, before user review.

use serde::{Deserialize, Serialize};

use crate::extract::{CompanyList, FieldExtractor};
use crate::model::{Classification, ClassifiedPage, ExtractedInfo, Mode, Page};

/// Minor category used when no title was detected.
pub const DEFAULT_MINOR_CATEGORY: &str = "書類";

/// Document type given to envelope pages without a detected title.
pub const ENVELOPE_DOCUMENT_TYPE: &str = "封筒";

/// Suggested classification for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Category of the correspondence unit the page belongs to
    pub major_category: String,
    /// Category of the page itself (its title, or a generic label)
    pub minor_category: String,
    /// Always false: exclusion is a reviewer decision
    pub is_excluded: bool,
    /// Raw extractor output
    pub info: ExtractedInfo,
}

/// Rolling category reference threaded through the suggestion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryRef {
    /// Category of the most recent envelope
    pub major: String,
    /// Category of the most recent page
    pub minor: String,
}

impl CategoryRef {
    /// Next reference after seeing a page with the given info and minor category.
    ///
    /// Envelopes start a new reference; other pages keep the major category
    /// and adopt their own minor category.
    pub fn advance(previous: Option<&CategoryRef>, info: &ExtractedInfo, minor: &str) -> Self {
        match previous {
            Some(prev) if !info.is_envelope => CategoryRef {
                major: prev.major.clone(),
                minor: minor.to_string(),
            },
            _ => CategoryRef {
                major: minor.to_string(),
                minor: minor.to_string(),
            },
        }
    }
}

/// Produces first-pass suggestions and initial classifications.
#[derive(Debug, Clone, Default)]
pub struct Suggester {
    extractor: FieldExtractor,
    companies: CompanyList,
    default_date: String,
}

impl Suggester {
    /// Create a suggester.
    pub fn new(extractor: FieldExtractor, companies: CompanyList) -> Self {
        Self {
            extractor,
            companies,
            default_date: String::new(),
        }
    }

    /// Pre-fill envelope pages with this date (YYMMDD).
    pub fn with_default_date(mut self, date: impl Into<String>) -> Self {
        self.default_date = date.into();
        self
    }

    /// Company reference list in use.
    pub fn companies(&self) -> &CompanyList {
        &self.companies
    }

    /// Run the field extractor over one page.
    pub fn extract(&self, page: &Page) -> ExtractedInfo {
        self.extractor.extract(&page.text, self.companies.as_slice())
    }

    /// Suggest a classification for one page given the rolling reference.
    ///
    /// Returns the suggestion and the reference to pass to the next page.
    pub fn suggest(
        &self,
        page: &Page,
        previous: Option<&CategoryRef>,
    ) -> (Suggestion, CategoryRef) {
        let info = self.extract(page);
        let minor = if info.document_type.is_empty() {
            DEFAULT_MINOR_CATEGORY.to_string()
        } else {
            info.document_type.clone()
        };
        let next = CategoryRef::advance(previous, &info, &minor);

        let suggestion = Suggestion {
            major_category: next.major.clone(),
            minor_category: minor,
            is_excluded: false,
            info,
        };
        (suggestion, next)
    }

    /// Suggest classifications for every page in one left-to-right fold.
    pub fn suggest_all(&self, pages: &[Page]) -> Vec<Suggestion> {
        let mut reference: Option<CategoryRef> = None;
        pages
            .iter()
            .map(|page| {
                let (suggestion, next) = self.suggest(page, reference.as_ref());
                reference = Some(next);
                suggestion
            })
            .collect()
    }

    /// Initial, reviewable classifications.
    ///
    /// The first page opens an envelope and every other page continues it.
    /// A page without a detected company borrows one from the nearest earlier
    /// page that has one, never looking past the opening envelope page.
    pub fn initial_classifications(&self, suggestions: &[Suggestion]) -> Vec<Classification> {
        let modes: Vec<Mode> = (0..suggestions.len())
            .map(|i| if i == 0 { Mode::Envelope } else { Mode::Same })
            .collect();

        suggestions
            .iter()
            .enumerate()
            .map(|(index, suggestion)| {
                let info = &suggestion.info;
                let mode = modes[index];
                let mut classification = Classification::new(mode).excluded(suggestion.is_excluded);
                if mode == Mode::Envelope {
                    classification.date = self.default_date.clone();
                }

                if info.is_envelope {
                    classification.company_name = info.company_name.clone();
                    classification.document_type = if info.document_type.is_empty() {
                        ENVELOPE_DOCUMENT_TYPE.to_string()
                    } else {
                        info.document_type.clone()
                    };
                    return classification;
                }

                classification.company_name = if info.company_name.is_empty() {
                    inherited_company(suggestions, &modes, index)
                } else {
                    info.company_name.clone()
                };
                classification.document_type = info.document_type.clone();
                classification.person_name = info.person_name.clone();
                classification
            })
            .collect()
    }

    /// Suggestions plus initial classifications, paired with their pages.
    pub fn plan(&self, pages: &[Page]) -> Vec<ClassifiedPage> {
        let suggestions = self.suggest_all(pages);
        let classifications = self.initial_classifications(&suggestions);
        log::debug!("Suggested classifications for {} pages", pages.len());

        pages
            .iter()
            .cloned()
            .zip(classifications)
            .map(|(page, classification)| ClassifiedPage::new(page, classification))
            .collect()
    }
}

fn inherited_company(suggestions: &[Suggestion], modes: &[Mode], index: usize) -> String {
    for i in (0..index).rev() {
        let company = &suggestions[i].info.company_name;
        if !company.is_empty() {
            return company.clone();
        }
        if modes[i] == Mode::Envelope {
            break;
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages() -> Vec<Page> {
        vec![
            Page::new(1, "送付状\n株式会社サンプル\n拝啓"),
            Page::new(2, "請求書\n氏名 山田 太郎"),
            Page::new(3, "2024-01-01\n"),
            Page::new(4, "明細書\nテスト工業株式会社"),
            Page::new(5, "領収書"),
        ]
    }

    #[test]
    fn test_never_excludes() {
        let suggester = Suggester::default();
        assert!(suggester.suggest_all(&pages()).iter().all(|s| !s.is_excluded));
    }

    #[test]
    fn test_minor_category_fallback() {
        let suggestions = Suggester::default().suggest_all(&pages());
        assert_eq!(suggestions[1].minor_category, "請求書");
        assert_eq!(suggestions[2].minor_category, DEFAULT_MINOR_CATEGORY);
    }

    #[test]
    fn test_rolling_major_category() {
        let suggestions = Suggester::default().suggest_all(&pages());
        assert_eq!(suggestions[0].major_category, "送付状");
        assert!(suggestions.iter().all(|s| s.major_category == "送付状"));

        let more = vec![
            Page::new(1, "請求書"),
            Page::new(2, "送り状\n拝啓"),
            Page::new(3, "明細"),
        ];
        let suggestions = Suggester::default().suggest_all(&more);
        assert_eq!(suggestions[0].major_category, "請求書");
        assert_eq!(suggestions[1].major_category, "送り状");
        assert_eq!(suggestions[2].major_category, "送り状");
        assert_eq!(suggestions[2].minor_category, "明細");
    }

    #[test]
    fn test_initial_modes_and_fields() {
        let suggester = Suggester::default().with_default_date("240101");
        let plan = suggester.plan(&pages());
        let modes: Vec<Mode> = plan.iter().map(|p| p.classification.mode).collect();
        assert_eq!(
            modes,
            vec![
                Mode::Envelope,
                Mode::Same,
                Mode::Same,
                Mode::Same,
                Mode::Same,
            ]
        );

        let first = &plan[0].classification;
        assert_eq!(first.date, "240101");
        assert_eq!(first.company_name, "株式会社サンプル");
        assert_eq!(first.document_type, "送付状");
        assert!(first.person_name.is_empty());

        let second = &plan[1].classification;
        assert!(second.date.is_empty());
        assert_eq!(second.company_name, "株式会社サンプル");
        assert_eq!(second.person_name, "山田 太郎");
        assert_eq!(second.document_type, "請求書");

        assert_eq!(plan[2].classification.company_name, "株式会社サンプル");
        assert_eq!(plan[3].classification.company_name, "テスト工業株式会社");
        assert_eq!(plan[4].classification.company_name, "テスト工業株式会社");
    }

    #[test]
    fn test_company_list_drives_detection() {
        let suggester = Suggester::new(
            FieldExtractor::default(),
            CompanyList::from_names(["サンプル"]),
        );
        let info = suggester.extract(&Page::new(1, "株式会社サンプル 御中"));
        assert_eq!(info.company_name, "サンプル");
    }

    #[test]
    fn test_envelope_page_without_title() {
        let suggester = Suggester::default();
        let pages = vec![Page::new(1, "封"), Page::new(2, "1\n記")];
        let plan = suggester.plan(&pages);
        assert_eq!(plan[1].classification.document_type, "封筒");
        assert!(plan[0].classification.document_type.is_empty());
    }
}
