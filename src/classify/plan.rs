//! Review plans: the reviewable, serializable list of page classifications.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::json::{to_json, JsonFormat};
use crate::model::{Classification, ClassifiedPage, Page};

/// Classification of one page inside a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntry {
    /// Page the entry applies to
    pub page_number: u32,
    /// The page's classification
    #[serde(flatten)]
    pub classification: Classification,
}

/// Per-page classifications for a whole bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPlan {
    /// Entries in page order
    pub pages: Vec<PlanEntry>,
}

impl ReviewPlan {
    /// Build a plan from classified pages.
    pub fn from_classified(pages: &[ClassifiedPage]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|p| PlanEntry {
                    page_number: p.page_number(),
                    classification: p.classification.clone(),
                })
                .collect(),
        }
    }

    /// Parse a plan from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the plan.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        to_json(self, format)
    }

    /// Read a plan file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write a plan file (pretty JSON).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json(JsonFormat::Pretty)?)?;
        Ok(())
    }

    /// Attach the plan's classifications to `pages`.
    ///
    /// The plan must name every page exactly once and nothing else; the result
    /// keeps the order of `pages`.
    pub fn apply(&self, pages: &[Page]) -> Result<Vec<ClassifiedPage>> {
        let mut by_number: HashMap<u32, &Classification> = HashMap::with_capacity(self.pages.len());
        for entry in &self.pages {
            if by_number
                .insert(entry.page_number, &entry.classification)
                .is_some()
            {
                return Err(Error::Plan(format!(
                    "page {} is classified more than once",
                    entry.page_number
                )));
            }
        }

        let classified = pages
            .iter()
            .map(|page| {
                by_number
                    .remove(&page.page_number)
                    .map(|c| ClassifiedPage::new(page.clone(), c.clone()))
                    .ok_or_else(|| {
                        Error::Plan(format!("page {} has no classification", page.page_number))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        if let Some(extra) = by_number.keys().min() {
            return Err(Error::Plan(format!(
                "page {} is not part of the document",
                extra
            )));
        }

        Ok(classified)
    }
}
