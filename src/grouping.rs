//! Boundary detection: partitions classified pages into output groups.
//!
//! The engine walks the pages once, in order. Envelope pages open a new
//! correspondence unit and a new group, document pages open a new group under
//! the current unit, and same pages extend the open group. Each closed group
//! is emitted as up to two groups: its effective pages first, then its
//! excluded pages, both carrying the same metadata.
//!
//! # Example
//!
//! ```
//! use docsort::grouping::group_pages;
//! use docsort::model::{Classification, ClassifiedPage, Page};
//!
//! let pages = vec![
//!     ClassifiedPage::new(
//!         Page::new(1, ""),
//!         Classification::envelope()
//!             .with_date("240101")
//!             .with_company("Acme")
//!             .with_document_type("Invoice"),
//!     ),
//!     ClassifiedPage::new(Page::new(2, ""), Classification::same()),
//! ];
//!
//! let groups = group_pages(&pages);
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].page_numbers(), vec![1, 2]);
//! ```

use serde::{Deserialize, Serialize};

use crate::classify::Resolver;
use crate::model::{ClassifiedPage, EnvelopeInfo, Group, Mode};

/// Default marker for a missing date.
pub const DATE_PLACEHOLDER: &str = "[日付]";

/// Default marker for a missing company name.
pub const COMPANY_PLACEHOLDER: &str = "[会社名]";

/// Default marker for a missing document type.
pub const DOCUMENT_TYPE_PLACEHOLDER: &str = "[書類名]";

/// Visible markers substituted for missing metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placeholders {
    /// Missing date
    pub date: String,
    /// Missing company name
    pub company_name: String,
    /// Missing document type
    pub document_type: String,
}

impl Placeholders {
    /// Envelope info made only of placeholders.
    pub fn envelope(&self) -> EnvelopeInfo {
        EnvelopeInfo::new(&self.date, &self.company_name)
    }
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            date: DATE_PLACEHOLDER.to_string(),
            company_name: COMPANY_PLACEHOLDER.to_string(),
            document_type: DOCUMENT_TYPE_PLACEHOLDER.to_string(),
        }
    }
}

/// Group under construction.
struct OpenGroup<'a> {
    envelope: EnvelopeInfo,
    document_type: String,
    person_name: String,
    members: Vec<&'a ClassifiedPage>,
}

impl OpenGroup<'_> {
    fn emit(&self, is_excluded: bool) -> Option<Group> {
        let members: Vec<&ClassifiedPage> = self
            .members
            .iter()
            .copied()
            .filter(|p| p.classification.is_excluded == is_excluded)
            .collect();

        // only a deliverable page can name the effective group
        let manual_file_name = match members.first() {
            None => return None,
            Some(_) if is_excluded => String::new(),
            Some(first) => first.classification.manual_file_name.clone(),
        };

        Some(Group {
            envelope_info: self.envelope.clone(),
            document_type: self.document_type.clone(),
            person_name: self.person_name.clone(),
            pages: members.iter().map(|p| p.page.clone()).collect(),
            is_excluded_data: is_excluded,
            manual_file_name,
        })
    }
}

/// The grouping state machine.
#[derive(Debug, Clone, Default)]
pub struct GroupingEngine {
    placeholders: Placeholders,
}

impl GroupingEngine {
    /// Create an engine with the given placeholders.
    pub fn new(placeholders: Placeholders) -> Self {
        Self { placeholders }
    }

    /// Placeholders in use.
    pub fn placeholders(&self) -> &Placeholders {
        &self.placeholders
    }

    /// Partition confirmed pages into groups, in emission order.
    pub fn group(&self, pages: &[ClassifiedPage]) -> Vec<Group> {
        let resolver = Resolver::new(pages);
        let mut groups = Vec::new();
        let mut envelope: Option<EnvelopeInfo> = None;
        let mut current: Option<OpenGroup<'_>> = None;

        for (index, page) in pages.iter().enumerate() {
            match page.classification.mode {
                Mode::Envelope => {
                    self.flush(current.take(), &mut groups);
                    let resolved = resolver.resolved(index);
                    let info = EnvelopeInfo::new(
                        or_placeholder(&resolved.date, &self.placeholders.date),
                        or_placeholder(&resolved.company_name, &self.placeholders.company_name),
                    );
                    current = Some(self.open(
                        info.clone(),
                        page,
                        &resolved.document_type,
                        &resolved.person_name,
                    ));
                    envelope = Some(info);
                }
                Mode::Document => {
                    self.flush(current.take(), &mut groups);
                    let resolved = resolver.resolved(index);
                    current = Some(self.open(
                        self.current_envelope(&envelope),
                        page,
                        &resolved.document_type,
                        &resolved.person_name,
                    ));
                }
                Mode::Same => match current.as_mut() {
                    Some(open) => open.members.push(page),
                    None => {
                        log::debug!(
                            "Page {} continues nothing; opening a group for it",
                            page.page_number()
                        );
                        let own = &page.classification;
                        current = Some(self.open(
                            self.current_envelope(&envelope),
                            page,
                            &own.document_type,
                            &own.person_name,
                        ));
                    }
                },
            }
        }

        self.flush(current.take(), &mut groups);
        log::debug!("Grouped {} pages into {} groups", pages.len(), groups.len());
        groups
    }

    fn current_envelope(&self, envelope: &Option<EnvelopeInfo>) -> EnvelopeInfo {
        envelope
            .clone()
            .unwrap_or_else(|| self.placeholders.envelope())
    }

    fn open<'a>(
        &self,
        envelope: EnvelopeInfo,
        page: &'a ClassifiedPage,
        document_type: &str,
        person_name: &str,
    ) -> OpenGroup<'a> {
        OpenGroup {
            envelope,
            document_type: or_placeholder(document_type, &self.placeholders.document_type),
            person_name: person_name.to_string(),
            members: vec![page],
        }
    }

    fn flush(&self, open: Option<OpenGroup<'_>>, groups: &mut Vec<Group>) {
        let Some(open) = open else {
            return;
        };

        for group in [open.emit(false), open.emit(true)].into_iter().flatten() {
            log::debug!(
                "Group {} {}/{}/{}: pages {:?}",
                if group.is_excluded_data { "(excluded)" } else { "" },
                group.envelope_info.date,
                group.envelope_info.company_name,
                group.document_type,
                group.page_numbers()
            );
            groups.push(group);
        }
    }
}

/// Group pages with the default placeholders.
pub fn group_pages(pages: &[ClassifiedPage]) -> Vec<Group> {
    GroupingEngine::default().group(pages)
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Classification, Page};

    fn page(n: u32, c: Classification) -> ClassifiedPage {
        ClassifiedPage::new(Page::new(n, format!("page {}", n)), c)
    }

    #[test]
    fn test_empty_input() {
        assert!(group_pages(&[]).is_empty());
    }

    #[test]
    fn test_document_keeps_envelope_info() {
        let pages = vec![
            page(
                1,
                Classification::envelope()
                    .with_date("240101")
                    .with_company("Acme")
                    .with_document_type("送付状"),
            ),
            page(
                2,
                Classification::document()
                    .with_document_type("請求書")
                    .with_person("山田 太郎")
                    .with_company("ignored"),
            ),
            page(3, Classification::same()),
            page(4, Classification::document()),
        ];
        let groups = group_pages(&pages);
        assert_eq!(groups.len(), 3);

        assert_eq!(groups[0].page_numbers(), vec![1]);
        assert_eq!(groups[0].document_type, "送付状");

        assert_eq!(groups[1].page_numbers(), vec![2, 3]);
        assert_eq!(groups[1].envelope_info, EnvelopeInfo::new("240101", "Acme"));
        assert_eq!(groups[1].person_name, "山田 太郎");

        assert_eq!(groups[2].document_type, DOCUMENT_TYPE_PLACEHOLDER);
        assert!(groups[2].person_name.is_empty());
        assert_eq!(groups[2].envelope_info.company_name, "Acme");
    }

    #[test]
    fn test_envelope_placeholders() {
        let pages = vec![page(1, Classification::envelope())];
        let groups = group_pages(&pages);
        assert_eq!(
            groups[0].envelope_info,
            EnvelopeInfo::new(DATE_PLACEHOLDER, COMPANY_PLACEHOLDER)
        );
    }

    #[test]
    fn test_document_before_any_envelope() {
        let opener = Classification::document().with_document_type("請求書");
        let groups = group_pages(&[page(1, opener)]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].envelope_info.date, DATE_PLACEHOLDER);
        assert_eq!(groups[0].document_type, "請求書");
    }

    #[test]
    fn test_same_first_uses_own_fields() {
        let pages = vec![
            page(
                1,
                Classification::same()
                    .with_document_type("明細")
                    .with_company("Acme"),
            ),
            page(2, Classification::same()),
        ];
        let groups = group_pages(&pages);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].page_numbers(), vec![1, 2]);
        assert_eq!(groups[0].document_type, "明細");
        assert_eq!(groups[0].envelope_info.company_name, COMPANY_PLACEHOLDER);
    }

    #[test]
    fn test_excluded_split_order() {
        let pages = vec![
            page(
                1,
                Classification::envelope()
                    .with_company("Acme")
                    .excluded(true),
            ),
            page(2, Classification::same()),
            page(3, Classification::same().excluded(true)),
            page(4, Classification::same()),
        ];
        let groups = group_pages(&pages);
        assert_eq!(groups.len(), 2);
        assert!(!groups[0].is_excluded_data);
        assert_eq!(groups[0].page_numbers(), vec![2, 4]);
        assert!(groups[1].is_excluded_data);
        assert_eq!(groups[1].page_numbers(), vec![1, 3]);
        assert_eq!(groups[0].envelope_info, groups[1].envelope_info);
    }

    #[test]
    fn test_fully_excluded_group() {
        let pages = vec![
            page(1, Classification::envelope().excluded(true)),
            page(2, Classification::document().with_document_type("請求書")),
        ];
        let groups = group_pages(&pages);
        assert_eq!(groups.len(), 2);
        assert!(groups[0].is_excluded_data);
        assert!(!groups[1].is_excluded_data);
    }

    #[test]
    fn test_manual_file_name_from_opening_page() {
        let pages = vec![
            page(
                1,
                Classification::envelope().with_manual_file_name("custom"),
            ),
            page(2, Classification::same().with_manual_file_name("ignored")),
        ];
        let groups = group_pages(&pages);
        assert_eq!(groups[0].manual_file_name, "custom");
    }

    #[test]
    fn test_manual_file_name_skips_excluded_opener() {
        let pages = vec![
            page(
                1,
                Classification::envelope()
                    .with_manual_file_name("cover-letter")
                    .excluded(true),
            ),
            page(2, Classification::same()),
            page(3, Classification::same().with_manual_file_name("statement")),
        ];
        let groups = group_pages(&pages);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].page_numbers(), vec![2, 3]);
        assert!(groups[0].manual_file_name.is_empty());
        assert!(groups[1].is_excluded_data);
        assert!(groups[1].manual_file_name.is_empty());
    }

    #[test]
    fn test_manual_file_name_from_first_effective_page() {
        let pages = vec![
            page(1, Classification::envelope().excluded(true)),
            page(2, Classification::same().with_manual_file_name("statement")),
        ];
        let groups = group_pages(&pages);
        assert_eq!(groups[0].page_numbers(), vec![2]);
        assert_eq!(groups[0].manual_file_name, "statement");
    }

    #[test]
    fn test_custom_placeholders() {
        let engine = GroupingEngine::new(Placeholders {
            date: "[date]".to_string(),
            company_name: "[company]".to_string(),
            document_type: "[type]".to_string(),
        });
        let groups = engine.group(&[page(1, Classification::same())]);
        assert_eq!(
            groups[0].envelope_info,
            EnvelopeInfo::new("[date]", "[company]")
        );
        assert_eq!(groups[0].document_type, "[type]");
    }
}
