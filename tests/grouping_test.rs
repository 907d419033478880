//! Integration tests for grouping, inheritance and naming.

use std::collections::BTreeSet;

use docsort::classify::resolve_field;
use docsort::grouping::{COMPANY_PLACEHOLDER, DATE_PLACEHOLDER};
use docsort::naming::DEFAULT_EXCLUDED_FILE_NAME;
use docsort::{
    group_pages, Assembler, Classification, ClassifiedPage, Field, Mode, NameSynthesizer, Page,
};
use proptest::prelude::*;

fn page(n: u32, c: Classification) -> ClassifiedPage {
    ClassifiedPage::new(Page::new(n, ""), c)
}

/// Bundles of 1 to `max_len` classified pages with random modes and fields.
fn bundle_strategy(max_len: usize) -> impl Strategy<Value = Vec<ClassifiedPage>> {
    let mode = prop_oneof![
        1 => Just(Mode::Envelope),
        1 => Just(Mode::Document),
        2 => Just(Mode::Same),
    ];
    let entry = (
        mode,
        prop_oneof![Just(""), Just("240101"), Just("240315")],
        prop_oneof![Just(""), Just("Acme"), Just("Globex")],
        prop_oneof![Just(""), Just("Invoice"), Just("Notice")],
        prop::bool::weighted(0.2),
    );

    prop::collection::vec(entry, 1..=max_len).prop_map(|entries| {
        entries
            .into_iter()
            .zip(1..)
            .map(|((mode, date, company, document_type, excluded), n)| {
                let c = Classification::new(mode)
                    .with_date(date)
                    .with_company(company)
                    .with_document_type(document_type)
                    .excluded(excluded);
                page(n, c)
            })
            .collect()
    })
}

#[test]
fn test_scenario_single_envelope() {
    let pages = vec![
        page(
            1,
            Classification::envelope()
                .with_company("Acme")
                .with_date("240101")
                .with_document_type("Invoice"),
        ),
        page(2, Classification::same()),
    ];

    let groups = group_pages(&pages);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].page_numbers(), vec![1, 2]);

    let names = NameSynthesizer::default().name_groups(&groups);
    assert_eq!(names, vec!["240101_Acme_Invoice.pdf"]);
}

#[test]
fn test_scenario_excluded_envelope() {
    let pages = vec![
        page(
            1,
            Classification::envelope()
                .with_company("Acme")
                .with_date("240101")
                .with_document_type("Invoice")
                .excluded(true),
        ),
        page(2, Classification::same()),
    ];

    let groups = group_pages(&pages);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].page_numbers(), vec![2]);
    assert!(!groups[0].is_excluded_data);
    assert_eq!(groups[1].page_numbers(), vec![1]);
    assert!(groups[1].is_excluded_data);
    assert_eq!(groups[0].envelope_info, groups[1].envelope_info);

    let outputs = Assembler::default().plan(&groups);
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0].file_name, "240101_Acme_Invoice.pdf");
    assert_eq!(outputs[1].file_name, DEFAULT_EXCLUDED_FILE_NAME);
    assert_eq!(outputs[1].page_numbers, vec![1]);
}

#[test]
fn test_scenario_same_first_page() {
    let pages = vec![page(1, Classification::same())];

    let groups = group_pages(&pages);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].envelope_info.date, DATE_PLACEHOLDER);
    assert_eq!(groups[0].envelope_info.company_name, COMPANY_PLACEHOLDER);
}

#[test]
fn test_grouping_is_a_partition() {
    proptest!(|(pages in bundle_strategy(40))| {
        let groups = group_pages(&pages);

        let mut seen = BTreeSet::new();
        let mut total = 0;
        for group in &groups {
            prop_assert!(!group.pages.is_empty());
            for n in group.page_numbers() {
                seen.insert(n);
                total += 1;
            }
        }
        prop_assert_eq!(total, pages.len());
        let expected: BTreeSet<u32> = pages.iter().map(|p| p.page_number()).collect();
        prop_assert_eq!(seen, expected);
    });
}

#[test]
fn test_group_pages_keep_relative_order() {
    proptest!(|(pages in bundle_strategy(30))| {
        for group in group_pages(&pages) {
            let numbers = group.page_numbers();
            prop_assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        }
    });
}

#[test]
fn test_company_comes_from_nearest_envelope() {
    proptest!(|(pages in bundle_strategy(30))| {
        for (i, p) in pages.iter().enumerate() {
            if p.classification.mode != Mode::Same {
                continue;
            }
            let expected = pages[..i]
                .iter()
                .rev()
                .find(|q| q.classification.mode == Mode::Envelope)
                .map(|q| q.classification.company_name.clone())
                .unwrap_or_default();
            prop_assert_eq!(resolve_field(Field::CompanyName, &pages, i), expected);
        }
    });
}

#[test]
fn test_date_never_crosses_a_boundary() {
    proptest!(|(pages in bundle_strategy(30))| {
        for (i, p) in pages.iter().enumerate() {
            if p.classification.mode != Mode::Same {
                continue;
            }
            let expected = pages[..i]
                .iter()
                .rev()
                .find(|q| q.classification.mode.is_boundary())
                .map(|q| q.classification.date.clone())
                .unwrap_or_default();
            prop_assert_eq!(resolve_field(Field::Date, &pages, i), expected);
        }
    });
}

#[test]
fn test_grouping_and_naming_are_deterministic() {
    proptest!(|(pages in bundle_strategy(60))| {
        let assembler = Assembler::default();
        let first = assembler.plan(&group_pages(&pages));
        let second = assembler.plan(&group_pages(&pages));
        prop_assert_eq!(first, second);
    });
}

#[test]
fn test_at_most_one_excluded_output_and_it_is_last() {
    proptest!(|(pages in bundle_strategy(40))| {
        let outputs = Assembler::default().plan(&group_pages(&pages));
        let excluded: Vec<u32> = pages
            .iter()
            .filter(|p| p.classification.is_excluded)
            .map(|p| p.page_number())
            .collect();

        let excluded_outputs = outputs.iter().filter(|o| o.is_excluded).count();
        if excluded.is_empty() {
            prop_assert_eq!(excluded_outputs, 0);
        } else {
            let last = outputs.last().unwrap();
            prop_assert_eq!(excluded_outputs, 1);
            prop_assert!(last.is_excluded);
            prop_assert_eq!(&last.page_numbers, &excluded);
        }
    });
}

#[test]
fn test_collision_numbering_follows_emission_order() {
    let invoice = || {
        Classification::envelope()
            .with_company("Acme")
            .with_date("240101")
            .with_document_type("Invoice")
    };
    let pages = vec![
        page(1, invoice()),
        page(2, Classification::document().with_document_type("Invoice")),
        page(3, Classification::document().with_document_type("Receipt")),
        page(4, invoice()),
    ];

    let names = NameSynthesizer::default().name_groups(&group_pages(&pages));
    assert_eq!(
        names,
        vec![
            "240101_Acme_Invoice.pdf",
            "240101_Acme_Invoice_2.pdf",
            "240101_Acme_Receipt.pdf",
            "240101_Acme_Invoice_3.pdf",
        ]
    );
}

#[test]
fn test_excluded_pages_merge_across_envelopes() {
    let pages = vec![
        page(1, Classification::envelope().with_company("Acme")),
        page(2, Classification::same().excluded(true)),
        page(3, Classification::envelope().with_company("Globex")),
        page(4, Classification::same().excluded(true)),
        page(5, Classification::document().excluded(true)),
    ];

    let outputs = Assembler::default().plan(&group_pages(&pages));
    let excluded: Vec<_> = outputs.iter().filter(|o| o.is_excluded).collect();
    assert_eq!(excluded.len(), 1);
    assert_eq!(excluded[0].page_numbers, vec![2, 4, 5]);
    assert_eq!(outputs.last().map(|o| o.is_excluded), Some(true));
}

#[test]
fn test_person_name_in_file_name() {
    let pages = vec![
        page(
            1,
            Classification::envelope()
                .with_company("株式会社サンプル")
                .with_date("240301")
                .with_document_type("通知書")
                .with_person("山田 太郎"),
        ),
        page(
            2,
            Classification::document()
                .with_document_type("通知書")
                .with_person("（なし）"),
        ),
    ];

    let names = NameSynthesizer::default().name_groups(&group_pages(&pages));
    assert_eq!(
        names,
        vec![
            "240301_株式会社サンプル_通知書_山田 太郎様.pdf",
            "240301_株式会社サンプル_通知書.pdf",
        ]
    );
}
