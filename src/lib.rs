//! Post-processing for Markdown recovered from PDF extraction.
//!
//! Extraction tools flatten code block layout and mangle YAML indentation.
//! This crate puts documents back together in three stages:
//!
//! 1. **Repair**: line-level fixes for characteristic YAML corruption
//!    (one-space indentation, spurious or glued list dashes), applied to
//!    fenced YAML blocks and to YAML-shaped lines anywhere in the document.
//! 2. **Classification**: weighted signature scoring that assigns each
//!    fenced block a language (`json`, `yaml`, `bash`, `go`, `python`) or
//!    falls back to `text`.
//! 3. **Formatting**: a deterministic structural formatter per language
//!    that recomputes indentation from scratch.
//!
//! The pipeline is total and idempotent: arbitrary input never aborts
//! processing, and running it twice equals running it once.
//!
//! ```
//! let doc = "```\n{\"b\":1,\"a\":2}\n```";
//! let out = mdmend_lib::format_code_blocks(doc);
//! assert_eq!(out, "```json\n{\n  \"a\": 2,\n  \"b\": 1\n}\n```");
//! ```

pub mod classifier;
pub mod config;
pub mod formatters;
pub mod languages;
pub mod processor;
pub mod repair;
pub mod signatures;

pub use classifier::classify;
pub use config::{ConfigError, FormatMode, PostprocessConfig};
pub use formatters::{format_block, format_block_with, FormatError, StructuralFormatter};
pub use languages::Language;
pub use processor::{scan_blocks, CodeBlock, DocumentProcessor};
pub use repair::{PropertyIndentTable, RepairPass};

use std::sync::LazyLock;

static DEFAULT_CONFIG: LazyLock<PostprocessConfig> = LazyLock::new(PostprocessConfig::default);

/// Repair YAML-shaped corruption in a document using the default
/// property indent table.
pub fn repair_document(document: &str) -> String {
    DocumentProcessor::new(&DEFAULT_CONFIG).repair_document(document)
}

/// Run the full pipeline with default configuration: repair, then
/// classify and reformat every fenced code block.
pub fn format_code_blocks(document: &str) -> String {
    DocumentProcessor::new(&DEFAULT_CONFIG).format_code_blocks(document)
}
