//! The static Signature Table used by the language classifier.
//!
//! Each recognized language owns an ordered list of weighted detection
//! patterns. The table is built once, is immutable afterwards, and is the
//! only state the classifier consults, which keeps classification a pure
//! function of its input.

use crate::languages::Language;
use fancy_regex::Regex as FancyRegex;
use regex::Regex;
use std::sync::LazyLock;

/// A single weighted detection pattern.
///
/// Patterns are compiled case-insensitive and multi-line. Weight is the
/// score contributed when the pattern matches anywhere in the fragment;
/// strong single signatures carry weight 2 so they can reach the
/// classifier's decision threshold on their own.
pub struct SignaturePattern {
    regex: FancyRegex,
    pub weight: u32,
}

impl SignaturePattern {
    fn new(pattern: &str, weight: u32) -> Self {
        let regex = FancyRegex::new(&format!("(?im){pattern}"))
            .unwrap_or_else(|e| panic!("invalid signature pattern {pattern:?}: {e}"));
        SignaturePattern { regex, weight }
    }

    /// Whether the pattern matches anywhere in the fragment. A pattern that
    /// fails to evaluate (fancy-regex backtracking limits) counts as a miss.
    pub fn matches(&self, fragment: &str) -> bool {
        self.regex.is_match(fragment).unwrap_or(false)
    }
}

/// Ordered detection patterns for one language.
pub struct LanguageSignature {
    pub language: Language,
    pub patterns: Vec<SignaturePattern>,
}

impl LanguageSignature {
    /// Sum of the weights of all patterns matching the fragment.
    pub fn score(&self, fragment: &str) -> u32 {
        self.patterns
            .iter()
            .filter(|p| p.matches(fragment))
            .map(|p| p.weight)
            .sum()
    }
}

/// The signature table, in the classifier's fixed tie-break order
/// (json, yaml, bash, go, python).
pub static SIGNATURES: LazyLock<Vec<LanguageSignature>> = LazyLock::new(|| {
    vec![
        LanguageSignature {
            language: Language::Json,
            patterns: vec![
                // Starts with { or [
                SignaturePattern::new(r"^\s*[{\[]", 1),
                // Quoted key-value pairs
                SignaturePattern::new(r#"["']:\s*["']"#, 1),
                // Ends with }
                SignaturePattern::new(r"\}\s*,?\s*$", 1),
            ],
        },
        LanguageSignature {
            language: Language::Yaml,
            patterns: vec![
                // key: value
                SignaturePattern::new(r"^\s*[a-zA-Z_][a-zA-Z0-9_]*\s*:", 1),
                // List items
                SignaturePattern::new(r"^\s*-\s+", 1),
                // Block scalars
                SignaturePattern::new(r":\s*[|>]", 1),
            ],
        },
        LanguageSignature {
            language: Language::Bash,
            patterns: vec![
                // Shebang
                SignaturePattern::new(r"#!/bin/(bash|sh)", 1),
                // Variables
                SignaturePattern::new(r"\$\{?[a-zA-Z_][a-zA-Z0-9_]*\}?", 1),
                // Shell keywords
                SignaturePattern::new(
                    r"\b(echo|if|then|else|elif|fi|for|while|do|done|case|esac|function)\b",
                    1,
                ),
                // Variable assignments
                SignaturePattern::new(r"^\s*[a-zA-Z_][a-zA-Z0-9_]*\s*=", 1),
                // [[ ... ]] conditionals
                SignaturePattern::new(r"\[\[.*\]\]", 1),
                // Comments, but not JSON-like content
                SignaturePattern::new(r"^\s*#(?!\s*[{\[])", 1),
            ],
        },
        LanguageSignature {
            language: Language::Go,
            patterns: vec![
                // Package clause is decisive on its own
                SignaturePattern::new(r"^\s*package\s+[a-z_][a-z0-9_]*\s*$", 2),
                // Function declarations, with optional receiver
                SignaturePattern::new(r"\bfunc\s+(\(\s*\w+\s+\*?[\w.]+\s*\)\s*)?\w+\s*\(", 1),
                // Short variable declarations
                SignaturePattern::new(r":=", 1),
                // Import blocks
                SignaturePattern::new(r"^\s*import\s+\(", 1),
                // fmt.Println and friends
                SignaturePattern::new(r"\bfmt\.[A-Z][a-zA-Z]*\(", 1),
                // Concurrency keywords
                SignaturePattern::new(r"\b(defer|go\s+func|chan\s+\w+)\b", 1),
            ],
        },
        LanguageSignature {
            language: Language::Python,
            patterns: vec![
                // def name(...): is decisive on its own
                SignaturePattern::new(r"^\s*def\s+\w+\s*\(.*\)\s*:", 2),
                // Imports
                SignaturePattern::new(r"^\s*(from\s+[\w.]+\s+import\b|import\s+[\w.]+\s*$)", 1),
                // Class definitions
                SignaturePattern::new(r"^\s*class\s+\w+.*:\s*$", 1),
                // print() calls
                SignaturePattern::new(r"\bprint\(", 1),
                // Keywords that rarely appear elsewhere
                SignaturePattern::new(r"\b(elif|None|self)\b", 1),
            ],
        },
    ]
});

// Strong single-shot checks, applied before any scoring.

static SHEBANG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#!\s*/(usr/)?bin/(env\s+)?(ba|z)?sh\b").unwrap());
static LEADING_ASSIGNMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z_][A-Z0-9_]*=").unwrap());

/// Fragment starts with a shell interpreter shebang.
pub fn has_shell_shebang(fragment: &str) -> bool {
    SHEBANG_RE.is_match(fragment.trim_start())
}

/// Fragment starts with an `UPPER_SNAKE=` shell assignment.
pub fn starts_with_shell_assignment(fragment: &str) -> bool {
    LEADING_ASSIGNMENT_RE.is_match(fragment.trim_start())
}

/// Trimmed fragment is bounded by matching `{...}` or `[...]`.
pub fn is_bracket_bounded(fragment: &str) -> bool {
    let trimmed = fragment.trim();
    (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'))
}
