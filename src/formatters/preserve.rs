//! Layout-preserving formatting for content that should not be rebuilt.
//!
//! The extraction stage sometimes captures indentation that carries meaning
//! the canonical formatters would destroy (tables, column-aligned output,
//! unknown languages). This path keeps leading whitespace byte-for-byte and
//! only strips trailing whitespace, collapsing whitespace-only lines.

use crate::languages::Language;
use crate::signatures;

/// Strip trailing whitespace per line, keep leading whitespace exactly.
pub fn preserve_layout(content: &str) -> String {
    let preserved: Vec<&str> = content
        .split('\n')
        .map(|line| if line.trim().is_empty() { "" } else { line.trim_end() })
        .collect();
    preserved.join("\n")
}

/// Language detection that never consults indentation, so preserved layout
/// cannot skew the result: shebangs, bracket bounding, and a few keyword
/// substrings only.
pub fn detect_language_loose(content: &str) -> Language {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Language::Text;
    }

    if signatures::has_shell_shebang(trimmed) {
        return Language::Bash;
    }
    if signatures::is_bracket_bounded(trimmed) {
        return Language::Json;
    }

    let lower = trimmed.to_lowercase();
    if lower.contains("echo ") || lower.contains("if [") || trimmed.contains("$(") {
        return Language::Bash;
    }
    if trimmed.contains("package ") && trimmed.contains("func ") {
        return Language::Go;
    }
    if trimmed.contains("def ") || (lower.contains("import ") && trimmed.contains("print(")) {
        return Language::Python;
    }
    if trimmed.contains("---") || trimmed.contains("apiVersion:") || trimmed.contains("kind:") {
        return Language::Yaml;
    }

    Language::Text
}
