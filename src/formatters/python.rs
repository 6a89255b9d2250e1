//! Canonical Python formatting.

use super::{FormatError, IndentationState, PendingScope, StructuralFormatter};
use crate::languages::Language;

/// Keywords that re-attach to an enclosing suite one level out.
const DEDENT_KEYWORDS: [&str; 5] = ["else", "elif", "except", "finally", "case"];

/// Python reformatter: 4 spaces per level. Suite-continuing keywords and
/// lines that are solely a closing bracket dedent before rendering; lines
/// ending in `:` or carrying unmatched opening brackets indent after.
#[derive(Debug, Default, Clone)]
pub struct PythonFormatter;

impl StructuralFormatter for PythonFormatter {
    fn language(&self) -> Language {
        Language::Python
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

            if is_closing_bracket_line(stripped) {
                state.dedent();
                if state.in_scope(PendingScope::Bracket) {
                    state.pop_scope();
                }
            } else if is_dedent_keyword(stripped) {
                state.dedent();
            }

            formatted.push(format!("{}{stripped}", "    ".repeat(state.level())));

            if stripped.ends_with(':') && !stripped.starts_with('#') {
                state.indent();
            } else if bracket_balance(stripped) > 0 {
                state.push_scope(PendingScope::Bracket);
                state.indent();
            }
        }

        Ok(formatted.join("\n"))
    }
}

fn is_dedent_keyword(stripped: &str) -> bool {
    let head = stripped
        .split(|c: char| c == ':' || c.is_whitespace())
        .next()
        .unwrap_or("");
    DEDENT_KEYWORDS.contains(&head)
}

/// Line consisting only of closing brackets (plus trailing `,` or `:`).
fn is_closing_bracket_line(stripped: &str) -> bool {
    !stripped.is_empty() && stripped.chars().all(|c| matches!(c, ')' | ']' | '}' | ',' | ':'))
}

/// Net open brackets on the line; string contents are not tracked, this is
/// a layout heuristic, not a parser.
fn bracket_balance(stripped: &str) -> i32 {
    stripped.chars().fold(0, |acc, c| match c {
        '(' | '[' | '{' => acc + 1,
        ')' | ']' | '}' => acc - 1,
        _ => acc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn format(content: &str) -> String {
        PythonFormatter.format(content).unwrap()
    }

    #[test]
    fn test_function_body_four_spaces() {
        let input = "def f(x):\nreturn x + 1";
        let expected = "def f(x):\n    return x + 1";
        assert_eq!(format(input), expected);
    }

    #[test]
    fn test_else_and_elif_dedent() {
        let input = "if x:\na()\nelif y:\nb()\nelse:\nc()";
        let expected = "if x:\n    a()\nelif y:\n    b()\nelse:\n    c()";
        assert_eq!(format(input), expected);
    }

    #[test]
    fn test_try_except_finally() {
        let input = "try:\nrisky()\nexcept ValueError as e:\nhandle(e)\nfinally:\ncleanup()";
        let expected = "try:\n    risky()\nexcept ValueError as e:\n    handle(e)\nfinally:\n    cleanup()";
        assert_eq!(format(input), expected);
    }

    #[test]
    fn test_nested_suites() {
        let input = "def f():\nfor x in xs:\nif x:\ng(x)";
        let expected = "def f():\n    for x in xs:\n        if x:\n            g(x)";
        assert_eq!(format(input), expected);
    }

    #[test]
    fn test_bracket_continuation() {
        let input = "result = call(\na,\nb,\n)";
        let expected = "result = call(\n    a,\n    b,\n)";
        assert_eq!(format(input), expected);
    }

    #[test]
    fn test_closing_bracket_line_dedents() {
        let input = "xs = [\n1,\n2,\n]";
        let expected = "xs = [\n    1,\n    2,\n]";
        assert_eq!(format(input), expected);
    }

    #[test]
    fn test_level_never_goes_negative() {
        let input = "else:\nx = 1";
        let expected = "else:\n    x = 1";
        assert_eq!(format(input), expected);
    }

    #[test]
    fn test_idempotent() {
        let input = "def f():\ntry:\ng()\nexcept Exception:\npass";
        let once = format(input);
        assert_eq!(format(&once), once);
    }
}
