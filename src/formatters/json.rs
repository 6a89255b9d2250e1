//! Canonical JSON formatting.

use super::{FormatError, StructuralFormatter};
use crate::languages::Language;

/// Strict JSON reformatter.
///
/// Parses the whole fragment and re-serializes it with 2-space indentation.
/// Object keys come out lexicographically sorted because `serde_json::Value`
/// maps are `BTreeMap`-backed here (the `preserve_order` feature is
/// deliberately off). Non-ASCII text is emitted verbatim, not escaped.
#[derive(Debug, Default, Clone)]
pub struct JsonFormatter;

impl StructuralFormatter for JsonFormatter {
    fn language(&self) -> Language {
        Language::Json
    }

    fn format(&self, content: &str) -> Result<String, FormatError> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        Ok(serde_json::to_string_pretty(&value)?)
    }
}
