//! JSON output for plans and manifests.

use serde::Serialize;

use crate::error::Result;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize any value to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value)?,
        JsonFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Page;

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&Page::new(1, "請求書"), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"pageNumber\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let pages = vec![Page::new(1, "a"), Page::new(2, "b")];
        let json = to_json(&pages, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }
}
