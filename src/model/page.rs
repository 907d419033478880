//! Page-level types.

use serde::{Deserialize, Serialize};

/// A single page of the source bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Page number (1-indexed, matches source page order)
    pub page_number: u32,

    /// Extracted page text
    pub text: String,

    /// Positioned text runs, when the text source provides them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<TextItem>>,
}

impl Page {
    /// Create a new page with the given text.
    pub fn new(page_number: u32, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
            items: None,
        }
    }

    /// Attach positioned text runs.
    pub fn with_items(mut self, items: Vec<TextItem>) -> Self {
        self.items = Some(items);
        self
    }

    /// Check if the page carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A positioned run of text on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    /// Text content
    pub text: String,
    /// X position in points
    pub x: f32,
    /// Y position in points
    pub y: f32,
    /// Run width in points
    pub width: f32,
    /// Run height in points
    pub height: f32,
}

impl TextItem {
    /// Create a new text item.
    pub fn new(text: impl Into<String>, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
            height,
        }
    }
}
