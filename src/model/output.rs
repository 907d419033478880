//! Output descriptors and the run manifest.

use serde::{Deserialize, Serialize};

/// Final descriptor of one output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputDocument {
    /// Sequential id in emission order
    pub id: usize,
    /// Collision-free file name
    pub file_name: String,
    /// Source page numbers, ascending
    pub page_numbers: Vec<u32>,
    /// Whether this is the aggregate excluded output
    pub is_excluded: bool,
}

impl OutputDocument {
    /// Number of pages in the output.
    pub fn page_count(&self) -> usize {
        self.page_numbers.len()
    }
}

/// An output descriptor together with the extracted document bytes.
#[derive(Debug, Clone)]
pub struct AssembledDocument {
    /// Descriptor
    pub document: OutputDocument,
    /// Document produced by the page source
    pub data: Vec<u8>,
}

/// An output that could not be extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyFailure {
    /// Id the output would have had
    pub id: usize,
    /// File name the output would have had
    pub file_name: String,
    /// Page numbers that were requested
    pub page_numbers: Vec<u32>,
    /// Whether the failed output was the aggregate excluded output
    pub is_excluded: bool,
    /// Error message
    pub error: String,
}

/// Serializable summary of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Successfully produced outputs, in emission order
    pub outputs: Vec<OutputDocument>,
    /// Outputs that failed to extract
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<AssemblyFailure>,
}

impl Manifest {
    /// Check if every planned output was produced.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total pages across produced outputs.
    pub fn total_pages(&self) -> usize {
        self.outputs.iter().map(|o| o.page_count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_json() {
        let manifest = Manifest {
            outputs: vec![OutputDocument {
                id: 0,
                file_name: "240101_Acme_Invoice.pdf".to_string(),
                page_numbers: vec![1, 2],
                is_excluded: false,
            }],
            failures: Vec::new(),
        };

        let json = serde_json::to_string(&manifest).unwrap();
        assert!(json.contains("\"fileName\":\"240101_Acme_Invoice.pdf\""));
        assert!(json.contains("\"pageNumbers\":[1,2]"));
        assert!(!json.contains("failures"));
        assert!(manifest.is_complete());
        assert_eq!(manifest.total_pages(), 2);
    }
}
