//! Pipeline configuration.
//!
//! Everything here is loaded once before any processing begins and treated
//! as immutable afterwards. The property indent table in particular is
//! deliberately configuration rather than code: it encodes one observed
//! document schema and new schemas should be supportable without a rebuild.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// How code block layout is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatMode {
    /// Recompute indentation from scratch, discarding extracted layout.
    #[default]
    Canonical,
    /// Keep extracted layout for content without a canonical formatter.
    /// Recognized languages are still formatted canonically.
    Preserve,
}

/// Top-level configuration for the post-processing pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PostprocessConfig {
    /// Reformat fenced code blocks (the repair pass runs regardless).
    pub format_code_blocks: bool,
    pub mode: FormatMode,
    pub indent_table: IndentTableConfig,
}

impl Default for PostprocessConfig {
    fn default() -> Self {
        PostprocessConfig {
            format_code_blocks: true,
            mode: FormatMode::default(),
            indent_table: IndentTableConfig::default(),
        }
    }
}

impl PostprocessConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

/// Property name -> target indent mapping used by the YAML repair pass.
///
/// The defaults describe the one schema observed in extracted documents
/// (a MachineHealthCheck-style manifest). They are not expected to
/// generalize; point `properties`/`prefixes` at your own schema instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct IndentTableConfig {
    /// Exact property names.
    pub properties: BTreeMap<String, usize>,
    /// Prefix matches, for domain-qualified keys like `machine.openshift.io/...`.
    pub prefixes: BTreeMap<String, usize>,
    /// Indent for properties the table does not know.
    pub default_indent: usize,
}

impl Default for IndentTableConfig {
    fn default() -> Self {
        let mut properties = BTreeMap::new();
        // metadata-level properties
        properties.insert("name".to_string(), 2);
        properties.insert("namespace".to_string(), 2);
        // spec-level properties
        properties.insert("maxUnhealthy".to_string(), 2);
        properties.insert("nodeStartupTimeout".to_string(), 2);
        properties.insert("selector".to_string(), 2);
        properties.insert("unhealthyConditions".to_string(), 2);
        // nested under selector
        properties.insert("matchLabels".to_string(), 4);
        // continuation fields of unhealthyConditions list items
        properties.insert("timeout".to_string(), 4);
        properties.insert("type".to_string(), 4);

        let mut prefixes = BTreeMap::new();
        // nested under matchLabels
        prefixes.insert("machine.openshift.io/".to_string(), 6);

        IndentTableConfig {
            properties,
            prefixes,
            default_indent: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PostprocessConfig::default();
        assert!(config.format_code_blocks);
        assert_eq!(config.mode, FormatMode::Canonical);
        assert_eq!(config.indent_table.default_indent, 2);
        assert_eq!(config.indent_table.properties.get("matchLabels"), Some(&4));
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = PostprocessConfig::from_toml_str("").unwrap();
        assert_eq!(config, PostprocessConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = PostprocessConfig::from_toml_str(
            r#"
format-code-blocks = false
mode = "preserve"
"#,
        )
        .unwrap();
        assert!(!config.format_code_blocks);
        assert_eq!(config.mode, FormatMode::Preserve);
        // Untouched sections keep their defaults.
        assert_eq!(config.indent_table, IndentTableConfig::default());
    }

    #[test]
    fn test_indent_table_override() {
        let config = PostprocessConfig::from_toml_str(
            r#"
[indent-table]
default-indent = 4

[indent-table.properties]
replicas = 2

[indent-table.prefixes]
"app.kubernetes.io/" = 6
"#,
        )
        .unwrap();
        assert_eq!(config.indent_table.default_indent, 4);
        assert_eq!(config.indent_table.properties.get("replicas"), Some(&2));
        assert_eq!(config.indent_table.prefixes.get("app.kubernetes.io/"), Some(&6));
        // Overriding the table replaces the fixture wholesale.
        assert_eq!(config.indent_table.properties.get("name"), None);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(PostprocessConfig::from_toml_str("mode = \"shiny\"").is_err());
        assert!(PostprocessConfig::from_toml_str("not toml [").is_err());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = PostprocessConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let reparsed = PostprocessConfig::from_toml_str(&serialized).unwrap();
        assert_eq!(config, reparsed);
    }
}
