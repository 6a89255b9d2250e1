//! Canonical YAML formatting.

use super::{FormatError, StructuralFormatter};
use crate::languages::Language;

/// Line-oriented YAML normalizer.
///
/// Does not parse YAML; it only normalizes layout. Leading indentation is
/// rounded down to the nearest even number of spaces, `key: value` pairs and
/// `- item` entries are re-rendered with single-space separators, and blank
/// or comment lines pass through stripped.
#[derive(Debug, Default, Clone)]
pub struct YamlFormatter;

impl StructuralFormatter for YamlFormatter {
    fn language(&self) -> Language {
        Language::Yaml
    }

    fn format(&self, content: &str) -> Result<String, FormatError> {
        let formatted: Vec<String> = content.lines().map(format_line).collect();
        Ok(formatted.join("\n"))
    }
}

fn format_line(line: &str) -> String {
    let stripped = line.trim();

    if stripped.is_empty() || stripped.starts_with('#') {
        return stripped.to_string();
    }

    let leading = line.len() - line.trim_start().len();
    let indent = " ".repeat((leading / 2) * 2);

    if let Some(rest) = stripped.strip_prefix('-') {
        return format!("{indent}- {}", rest.trim());
    }

    if let Some((key, value)) = stripped.split_once(':') {
        let key = key.trim();
        let value = value.trim();
        if value.is_empty() {
            return format!("{indent}{key}:");
        }
        return format!("{indent}{key}: {value}");
    }

    format!("{indent}{stripped}")
}
