//! Per-language structural formatters and the dispatch layer.
//!
//! Every recognized language gets the same treatment: a single-pass,
//! line-oriented state machine that recomputes indentation from scratch with
//! a clamped nesting counter. The formatters share one trait so the block
//! orchestrator can select them by resolved language tag instead of
//! duplicating dispatch logic per language.

pub mod bash;
pub mod go;
pub mod json;
pub mod preserve;
pub mod python;
pub mod yaml;

use crate::classifier::classify;
use crate::config::FormatMode;
use crate::languages::{self, Language};
use log::{debug, warn};
use thiserror::Error;

pub use bash::BashFormatter;
pub use go::GoFormatter;
pub use json::JsonFormatter;
pub use preserve::{detect_language_loose, preserve_layout};
pub use python::PythonFormatter;
pub use yaml::YamlFormatter;

/// Error raised by a single formatter invocation.
///
/// Formatting failures never escape the dispatch layer; the worst observable
/// outcome is the original content returned unchanged.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A deterministic, line-oriented reformatter for one language.
///
/// Implementations are stateless unit structs; all per-invocation state
/// lives in an [`IndentationState`] local to the `format` call.
pub trait StructuralFormatter: Send + Sync {
    fn language(&self) -> Language;

    /// Recompute the fragment's layout. Original indentation is discarded.
    fn format(&self, content: &str) -> Result<String, FormatError>;
}

/// Scopes a formatter may still owe a closing token for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingScope {
    /// Inside a `case ... in` body; arm patterns ending in `)` indent.
    Case,
    /// Inside an unmatched bracket run (Python line continuations).
    Bracket,
}

/// Mutable nesting state for one formatter invocation.
///
/// The level is clamped at zero: corrupted input with surplus closing
/// tokens must never drive indentation negative.
#[derive(Debug, Default)]
pub struct IndentationState {
    level: usize,
    pending: Vec<PendingScope>,
}

impl IndentationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn indent(&mut self) {
        self.level += 1;
    }

    /// Decrease the level, clamped at zero.
    pub fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// The level a same-level keyword (`else`, `;;`, ...) renders at.
    pub fn outer_level(&self) -> usize {
        self.level.saturating_sub(1)
    }

    pub fn push_scope(&mut self, scope: PendingScope) {
        self.pending.push(scope);
    }

    pub fn pop_scope(&mut self) -> Option<PendingScope> {
        self.pending.pop()
    }

    pub fn in_scope(&self, scope: PendingScope) -> bool {
        self.pending.last() == Some(&scope)
    }
}

static JSON: JsonFormatter = JsonFormatter;
static YAML: YamlFormatter = YamlFormatter;
static BASH: BashFormatter = BashFormatter;
static GO: GoFormatter = GoFormatter;
static PYTHON: PythonFormatter = PythonFormatter;

/// Select the structural formatter for a resolved language tag.
pub fn formatter_for(language: Language) -> Option<&'static dyn StructuralFormatter> {
    match language {
        Language::Json => Some(&JSON),
        Language::Yaml => Some(&YAML),
        Language::Bash => Some(&BASH),
        Language::Go => Some(&GO),
        Language::Python => Some(&PYTHON),
        Language::Text => None,
    }
}

/// Format a code block, resolving its language along the way.
///
/// Total: any failure inside a formatter degrades to the original content.
/// Equivalent to [`format_block_with`] in canonical mode.
pub fn format_block(content: &str, hint: Option<&str>) -> (String, Language) {
    format_block_with(content, hint, FormatMode::Canonical)
}

/// Format a code block under an explicit formatting mode.
///
/// An explicit `json` hint takes the strict path: a parse failure re-runs
/// the classifier and, when it disagrees, the block is redirected to the
/// newly detected language. Unknown or missing hints classify first. The
/// five recognized languages always get their canonical formatter, even in
/// preserve mode; preserve mode only changes how unclassifiable content and
/// language resolution are handled.
pub fn format_block_with(content: &str, hint: Option<&str>, mode: FormatMode) -> (String, Language) {
    let hinted = hint.and_then(languages::resolve_hint);

    let resolved = match hinted {
        Some(lang) if lang.is_recognized() => lang,
        _ => match mode {
            FormatMode::Canonical => classify(content),
            // Preserve mode resolves language without looking at layout.
            FormatMode::Preserve => detect_language_loose(content),
        },
    };

    debug!(
        "dispatching block: hint={:?} resolved={resolved}",
        hint.unwrap_or("")
    );

    match resolved {
        Language::Json => format_json_with_fallback(content, mode),
        lang => match formatter_for(lang) {
            Some(formatter) => match formatter.format(content) {
                Ok(formatted) => (formatted, lang),
                Err(e) => {
                    warn!("failed to format {lang} block, keeping original: {e}");
                    (content.to_string(), lang)
                }
            },
            None => match mode {
                FormatMode::Canonical => (content.to_string(), Language::Text),
                FormatMode::Preserve => (preserve_layout(content), Language::Text),
            },
        },
    }
}

/// Strict JSON formatting with re-classification on parse failure.
fn format_json_with_fallback(content: &str, mode: FormatMode) -> (String, Language) {
    match JSON.format(content) {
        Ok(formatted) => (formatted, Language::Json),
        Err(e) => {
            debug!("JSON formatting failed ({e}), re-running classification");
            let detected = classify(content);
            if detected != Language::Json && detected.is_recognized() {
                if let Some(formatter) = formatter_for(detected) {
                    if let Ok(formatted) = formatter.format(content) {
                        return (formatted, detected);
                    }
                }
            }
            if detected == Language::Text {
                warn!("unparseable JSON block reclassified as text, keeping original");
                let formatted = match mode {
                    FormatMode::Canonical => content.to_string(),
                    FormatMode::Preserve => preserve_layout(content),
                };
                return (formatted, Language::Text);
            }
            // Detection still says JSON: keep the original content.
            (content.to_string(), Language::Json)
        }
    }
}
