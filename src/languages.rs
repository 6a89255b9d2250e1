//! Language tags and fence-hint alias resolution.
//!
//! The classifier and formatters only ever deal in the canonical tags below.
//! Fence hints coming from the extracted document ("yml", "sh", "golang", ...)
//! are resolved to canonical tags through a static alias map.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Canonical language tags the pipeline knows how to format.
///
/// The variant order `json, yaml, bash, go, python` is load-bearing: the
/// classifier resolves scoring ties by picking the first language in this
/// order whose score reaches the decision threshold. Do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Json,
    Yaml,
    Bash,
    Go,
    Python,
    /// Unclassifiable content; passes through untouched.
    Text,
}

impl Language {
    /// All languages with a structural formatter, in tie-break order.
    pub const RECOGNIZED: [Language; 5] = [
        Language::Json,
        Language::Yaml,
        Language::Bash,
        Language::Go,
        Language::Python,
    ];

    /// The lowercase tag written on Markdown fences.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Json => "json",
            Language::Yaml => "yaml",
            Language::Bash => "bash",
            Language::Go => "go",
            Language::Python => "python",
            Language::Text => "text",
        }
    }

    /// Whether a structural formatter exists for this language.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Language::Text)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a fence language hint to a canonical tag.
///
/// Returns `None` for unknown hints so callers can fall back to content
/// classification instead of trusting a tag the extraction stage may have
/// hallucinated. Case-insensitive.
pub fn resolve_hint(hint: &str) -> Option<Language> {
    let lower = hint.trim().to_lowercase();
    HINT_ALIASES.get(lower.as_str()).copied()
}

/// Embedded alias map: fence hint -> canonical language.
///
/// Includes the canonical names themselves plus the aliases the extraction
/// stage has been observed to emit. Curated in the spirit of GitHub
/// Linguist's alias lists.
static HINT_ALIASES: LazyLock<HashMap<&'static str, Language>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // JSON
    m.insert("json", Language::Json);
    m.insert("jsonc", Language::Json);
    m.insert("json5", Language::Json);

    // YAML
    m.insert("yaml", Language::Yaml);
    m.insert("yml", Language::Yaml);

    // Shell
    m.insert("bash", Language::Bash);
    m.insert("sh", Language::Bash);
    m.insert("shell", Language::Bash);
    m.insert("zsh", Language::Bash);
    m.insert("shellscript", Language::Bash);
    m.insert("shell-script", Language::Bash);

    // Go
    m.insert("go", Language::Go);
    m.insert("golang", Language::Go);

    // Python
    m.insert("python", Language::Python);
    m.insert("py", Language::Python);
    m.insert("python3", Language::Python);
    m.insert("py3", Language::Python);

    // Plain text
    m.insert("text", Language::Text);
    m.insert("txt", Language::Text);
    m.insert("plaintext", Language::Text);
    m.insert("plain", Language::Text);

    m
});
