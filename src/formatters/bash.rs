//! Canonical Bash formatting.

use super::{FormatError, IndentationState, PendingScope, StructuralFormatter};
use crate::languages::Language;
use fancy_regex::Regex as FancyRegex;
use std::sync::LazyLock;

/// Bare `$var` references; already-braced `${var}` never matches because a
/// letter must follow the `$`.
static BARE_VAR_RE: LazyLock<FancyRegex> =
    LazyLock::new(|| FancyRegex::new(r"\$([a-zA-Z_][a-zA-Z0-9_]*)\b(?!\})").unwrap());

/// Keywords that close a nesting level.
const DECREASE_KEYWORDS: [&str; 3] = ["fi", "done", "esac"];

/// Shell script reformatter: explicit nesting counter, 2 spaces per level.
///
/// Same-level keywords (`else`, `elif`) and decrease keywords (`fi`, `done`,
/// `esac`, `;;`, closing braces) render one level out before the counter
/// updates; only the decrease keywords decrement it. `then`/`do` line
/// endings, opening braces, `case` headers, and case-arm patterns push a
/// level. Bare `$var` references are normalized to `${var}`.
#[derive(Debug, Default, Clone)]
pub struct BashFormatter;

impl StructuralFormatter for BashFormatter {
    fn language(&self) -> Language {
        Language::Bash
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

            if stripped.starts_with('#') {
                formatted.push(render(stripped, state.level()));
                continue;
            }

            let decrease = is_decrease(stripped);
            let same_level = is_same_level(stripped);

            let render_level = if decrease || same_level {
                state.outer_level()
            } else {
                state.level()
            };

            let normalized = BARE_VAR_RE.replace_all(stripped, "$${${1}}");
            formatted.push(render(&normalized, render_level));

            if decrease {
                state.dedent();
                if stripped == "esac" {
                    state.pop_scope();
                }
            } else if same_level {
                // else/elif stay inside their construct; no level change.
            } else if ends_block_opener(stripped) {
                state.indent();
            } else if stripped.starts_with("case ") {
                state.push_scope(PendingScope::Case);
                state.indent();
            } else if is_case_arm(stripped, &state) {
                state.indent();
            }
        }

        Ok(formatted.join("\n"))
    }
}

fn render(content: &str, level: usize) -> String {
    format!("{}{content}", "  ".repeat(level))
}

fn is_decrease(stripped: &str) -> bool {
    DECREASE_KEYWORDS.contains(&stripped) || stripped.starts_with(";;") || stripped.starts_with('}')
}

fn is_same_level(stripped: &str) -> bool {
    stripped == "else"
        || stripped == "elif"
        || stripped.starts_with("else ")
        || stripped.starts_with("elif ")
}

/// Line opens a block: ends in `then`/`do` or an opening brace.
fn ends_block_opener(stripped: &str) -> bool {
    matches!(stripped.split_whitespace().last(), Some("then") | Some("do")) || stripped.ends_with('{')
}

/// Case-arm pattern such as `foo)`, `a|b)`, or `*)`. Requiring no opening
/// paren keeps commands like `echo $(date)` from opening a level.
fn is_case_arm(stripped: &str, state: &IndentationState) -> bool {
    state.in_scope(PendingScope::Case) && stripped.ends_with(')') && !stripped.contains('(')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn format(content: &str) -> String {
        BashFormatter.format(content).unwrap()
    }

    #[test]
    fn test_if_block_from_extraction_output() {
        let input = "#!/bin/bash\nif [ -z \"$NS\" ]; then\necho hi\nfi";
        let expected = "#!/bin/bash\nif [ -z \"${NS}\" ]; then\n  echo hi\nfi";
        assert_eq!(format(input), expected);
    }

    #[test]
    fn test_else_and_elif_render_one_level_out() {
        let input = "if a; then\nx\nelif b; then\ny\nelse\nz\nfi";
        let expected = "if a; then\n  x\nelif b; then\n  y\nelse\n  z\nfi";
        assert_eq!(format(input), expected);
    }

    #[test]
    fn test_elif_chains_stay_balanced() {
        // Each elif renders one level out without touching the counter, so
        // every branch body sits at the same depth and the single fi
        // returns the level to its if's base.
        let input = "if a; then\nx\nelif b; then\ny\nelif c; then\nz\nfi\necho after";
        let expected = "if a; then\n  x\nelif b; then\n  y\nelif c; then\n  z\nfi\necho after";
        assert_eq!(format(input), expected);
    }

    #[test]
    fn test_while_loop() {
        let input = "while read -r line; do\nprocess $line\ndone";
        let expected = "while read -r line; do\n  process ${line}\ndone";
        assert_eq!(format(input), expected);
    }

    #[test]
    fn test_case_statement() {
        // Positional parameters like $1 are not identifiers and stay bare.
        let input = "case \"$1\" in\nstart)\necho starting\n;;\n*)\necho usage\n;;\nesac";
        let expected = "case \"$1\" in\n  start)\n    echo starting\n  ;;\n  *)\n    echo usage\n  ;;\nesac";
        assert_eq!(format(input), expected);
    }

    #[test]
    fn test_arm_terminator_renders_one_level_out() {
        // `;;` sits at its pattern's level, one level out of the arm body,
        // and closes the arm so the next pattern lines up with the first.
        let input = "case $mode in\nup)\nstart\n;;\ndown)\nstop\n;;\nesac";
        let expected = "case ${mode} in\n  up)\n    start\n  ;;\n  down)\n    stop\n  ;;\nesac";
        assert_eq!(format(input), expected);
    }

    #[test]
    fn test_function_braces() {
        let input = "deploy() {\nkubectl apply -f $FILE\n}";
        let expected = "deploy() {\n  kubectl apply -f ${FILE}\n}";
        assert_eq!(format(input), expected);
    }

    #[test]
    fn test_braced_vars_left_alone() {
        assert_eq!(format("echo ${HOME} $USER"), "echo ${HOME} ${USER}");
    }

    #[test]
    fn test_command_substitution_does_not_open_level() {
        let input = "case x in\na)\necho $(date)\necho after\n;;\nesac";
        let expected = "case x in\n  a)\n    echo $(date)\n    echo after\n  ;;\nesac";
        assert_eq!(format(input), expected);
    }

    #[test]
    fn test_comments_follow_current_level() {
        let input = "if a; then\n# inside\nb\nfi";
        let expected = "if a; then\n  # inside\n  b\nfi";
        assert_eq!(format(input), expected);
    }

    #[test]
    fn test_level_never_goes_negative() {
        let input = "fi\ndone\nesac\necho ok";
        let expected = "fi\ndone\nesac\necho ok";
        assert_eq!(format(input), expected);
    }

    #[test]
    fn test_blank_lines_collapse() {
        let input = "if a; then\n   \nb\nfi";
        let expected = "if a; then\n\n  b\nfi";
        assert_eq!(format(input), expected);
    }

    #[test]
    fn test_idempotent() {
        let input = "#!/bin/bash\nNS=api\nif [ -z \"$NS\" ]; then\ncase $1 in\nup)\necho up\n;;\nesac\nfi";
        let once = format(input);
        assert_eq!(format(&once), once);
    }
}
