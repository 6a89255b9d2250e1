//! Canonical Go formatting.

use super::{FormatError, IndentationState, StructuralFormatter};
use crate::languages::Language;

/// Go reformatter: tab indentation driven by a brace/paren/bracket depth
/// counter. A line starting with a closing token dedents before rendering
/// (which also keeps `} else {` at its construct's level); a line ending in
/// an opening token indents after rendering.
#[derive(Debug, Default, Clone)]
pub struct GoFormatter;

impl StructuralFormatter for GoFormatter {
    fn language(&self) -> Language {
        Language::Go
    }

    fn format(&self, content: &str) -> Result<String, FormatError> {
        let mut state = IndentationState::new();
        let mut formatted = Vec::new();

        for line in content.lines() {
            let stripped = line.trim();

            if stripped.is_empty() {
                formatted.push(String::new());
                continue;
            }

            if starts_with_closer(stripped) {
                state.dedent();
            }

            formatted.push(format!("{}{stripped}", "\t".repeat(state.level())));

            if ends_with_opener(stripped) {
                state.indent();
            }
        }

        Ok(formatted.join("\n"))
    }
}

fn starts_with_closer(stripped: &str) -> bool {
    stripped.starts_with(['}', ')', ']'])
}

fn ends_with_opener(stripped: &str) -> bool {
    stripped.ends_with(['{', '(', '['])
}
