//! Company reference list.

use std::collections::HashSet;
#[cfg(feature = "spreadsheet")]
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// De-duplicated, trimmed list of known company names.
///
/// List order is match priority: [`super::FieldExtractor::company_name`]
/// returns the first entry found in the page text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyList {
    names: Vec<String>,
}

impl CompanyList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from raw names: trims, drops blanks, keeps the first of each duplicate.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let names = names
            .into_iter()
            .filter_map(|n| {
                let trimmed = n.as_ref().trim();
                if trimmed.is_empty() || !seen.insert(trimmed.to_string()) {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect();
        Self { names }
    }

    /// One company per line.
    pub fn from_lines(text: &str) -> Self {
        Self::from_names(text.lines())
    }

    /// Pick the named column out of a table whose first row is the header.
    ///
    /// Cells are `None` when they are not text; those are skipped.
    pub fn from_rows<R, C>(header: &[String], rows: R, column: &str) -> Result<Self>
    where
        R: IntoIterator<Item = C>,
        C: AsRef<[Option<String>]>,
    {
        let index = header
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| Error::MissingColumn(column.to_string()))?;

        let cells: Vec<String> = rows
            .into_iter()
            .filter_map(|row| row.as_ref().get(index).cloned().flatten())
            .collect();

        Ok(Self::from_names(cells))
    }

    /// Read the first sheet of a spreadsheet and take the named column.
    #[cfg(feature = "spreadsheet")]
    pub fn from_spreadsheet<P: AsRef<Path>>(path: P, column: &str) -> Result<Self> {
        use calamine::{open_workbook_auto, Data, Reader};

        let path = path.as_ref();
        let mut workbook = open_workbook_auto(path)?;
        let first = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(Error::EmptySpreadsheet)?;
        let range = workbook.worksheet_range(&first)?;

        let mut rows = range.rows();
        let header: Vec<String> = rows
            .next()
            .ok_or(Error::EmptySpreadsheet)?
            .iter()
            .map(|cell| match cell {
                Data::Empty => String::new(),
                other => other.to_string(),
            })
            .collect();

        let body = rows.map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::String(s) => Some(s.clone()),
                    _ => None,
                })
                .collect::<Vec<_>>()
        });

        let list = Self::from_rows(&header, body, column)?;
        log::info!(
            "Loaded {} companies from {} (column \"{}\")",
            list.len(),
            path.display(),
            column
        );
        Ok(list)
    }

    /// Names in priority order.
    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    /// Iterate over names in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl AsRef<[String]> for CompanyList {
    fn as_ref(&self) -> &[String] {
        &self.names
    }
}

impl<S: AsRef<str>> FromIterator<S> for CompanyList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_names(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Vec<String> {
        vec!["No".to_string(), "会社名".to_string()]
    }

    fn row(no: Option<&str>, name: Option<&str>) -> Vec<Option<String>> {
        vec![no.map(String::from), name.map(String::from)]
    }

    #[test]
    fn test_from_names_dedup_and_trim() {
        let list = CompanyList::from_names(["  Acme ", "", "Beta", "Acme", "   "]);
        assert_eq!(list.as_slice(), &["Acme".to_string(), "Beta".to_string()]);
    }

    #[test]
    fn test_from_lines() {
        let list = CompanyList::from_lines("Acme\r\n\nBeta\nAcme\n");
        assert_eq!(list.len(), 2);
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["Acme", "Beta"]);
    }

    #[test]
    fn test_from_rows_picks_column() {
        let rows = vec![
            row(Some("1"), Some("サンプル商事")),
            row(Some("2"), None),
            row(Some("3"), Some(" テスト工業 ")),
            row(Some("4"), Some("サンプル商事")),
        ];
        let list = CompanyList::from_rows(&header(), rows, "会社名").unwrap();
        assert_eq!(
            list.iter().collect::<Vec<_>>(),
            vec!["サンプル商事", "テスト工業"]
        );
    }

    #[test]
    fn test_from_rows_short_rows() {
        let rows = vec![vec![Some("1".to_string())], row(None, Some("Acme"))];
        let list = CompanyList::from_rows(&header(), rows, "会社名").unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_from_rows_missing_column() {
        let rows: Vec<Vec<Option<String>>> = Vec::new();
        let result = CompanyList::from_rows(&header(), rows, "取引先");
        assert!(matches!(result, Err(Error::MissingColumn(c)) if c == "取引先"));
    }

    #[test]
    fn test_collect() {
        let list: CompanyList = vec!["a", "b", "a"].into_iter().collect();
        assert_eq!(list.len(), 2);
        assert!(!list.is_empty());
    }
}
