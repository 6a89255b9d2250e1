//! Heuristic language classification for extracted code fragments.
//!
//! Classification is a pure function of the fragment and the static
//! signature table: no configuration, no hidden state, deterministic output.

use crate::languages::Language;
use crate::signatures::{self, SIGNATURES};

/// Score a language must reach before it can win outright.
const DECISION_THRESHOLD: u32 = 2;

/// Loose keywords checked as a last resort; any hit selects bash.
const BASH_FALLBACK_KEYWORDS: [&str; 5] = ["while", "case", "esac", "done", "echo"];

/// Classify a code fragment into one of the recognized languages.
///
/// Priority order:
/// 1. Empty or whitespace-only input is `Text`.
/// 2. Strong single-shot signatures: a shell shebang or a leading
///    `NAME=` assignment selects `Bash`; a fragment bounded by matching
///    `{...}` or `[...]` selects `Json`.
/// 3. Every language is scored against its signature patterns.
/// 4. Bash wins any tie it reaches the threshold in; otherwise the first
///    language in `Language::RECOGNIZED` order at the threshold wins.
///    The bash priority is deliberate: shell fragments in extracted docs
///    tend to look like several languages at once.
/// 5. A handful of loose shell keywords select `Bash`; otherwise `Text`.
pub fn classify(fragment: &str) -> Language {
    let fragment = fragment.trim();

    if fragment.is_empty() {
        return Language::Text;
    }

    if signatures::has_shell_shebang(fragment) || signatures::starts_with_shell_assignment(fragment) {
        return Language::Bash;
    }

    if signatures::is_bracket_bounded(fragment) {
        return Language::Json;
    }

    let scores: Vec<(Language, u32)> = SIGNATURES
        .iter()
        .map(|sig| (sig.language, sig.score(fragment)))
        .collect();

    let max_score = scores.iter().map(|&(_, s)| s).max().unwrap_or(0);
    let bash_score = scores
        .iter()
        .find(|&&(lang, _)| lang == Language::Bash)
        .map(|&(_, s)| s)
        .unwrap_or(0);

    if bash_score >= DECISION_THRESHOLD && bash_score >= max_score {
        return Language::Bash;
    }

    for &(language, score) in &scores {
        if score >= DECISION_THRESHOLD {
            return language;
        }
    }

    let lower = fragment.to_lowercase();
    if BASH_FALLBACK_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return Language::Bash;
    }

    Language::Text
}
