//! Whole-document orchestration: repair pass, fenced-block scan, per-block
//! formatting, and reassembly.

use crate::config::PostprocessConfig;
use crate::formatters::format_block_with;
use crate::languages::Language;
use crate::repair::{PropertyIndentTable, RepairPass};
use log::debug;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The fence wire contract with the surrounding document assembler:
/// triple-backtick opening with an optional language tag, non-greedy
/// content, triple-backtick closing.
static FENCED_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```(\w+)?\n(.*?)```").unwrap());

/// One fenced code region, scanned out of the document. Consumed once,
/// never persisted.
#[derive(Debug, Clone)]
pub struct CodeBlock {
    /// Language tag from the opening fence, if any.
    pub hint: Option<String>,
    /// Content between the fences, without the trailing newline that
    /// precedes the closing fence.
    pub content: String,
    /// Byte span of the whole fenced region in the document.
    pub span: Range<usize>,
}

/// Scan a document for fenced code regions.
pub fn scan_blocks(document: &str) -> Vec<CodeBlock> {
    FENCED_BLOCK_RE
        .captures_iter(document)
        .map(|caps| {
            let whole = caps.get(0).expect("capture 0 always present");
            let content = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            CodeBlock {
                hint: caps.get(1).map(|m| m.as_str().to_string()),
                content: content.strip_suffix('\n').unwrap_or(content).to_string(),
                span: whole.range(),
            }
        })
        .collect()
}

/// Document-level processor tying the repair pass and the per-block
/// formatters together. Holds only read-only state; blocks are independent,
/// so formatting runs in parallel when the `parallel` feature is on.
pub struct DocumentProcessor<'a> {
    config: &'a PostprocessConfig,
    repair: RepairPass,
}

impl<'a> DocumentProcessor<'a> {
    pub fn new(config: &'a PostprocessConfig) -> Self {
        DocumentProcessor {
            config,
            repair: RepairPass::new(PropertyIndentTable::from_config(&config.indent_table)),
        }
    }

    /// Run only the repair pass.
    pub fn repair_document(&self, document: &str) -> String {
        self.repair.repair_document(document)
    }

    /// Classify and reformat every fenced block, leaving the rest of the
    /// document untouched. A block that cannot be formatted is re-emitted
    /// with its original content; one bad block never aborts the rest.
    pub fn format_blocks(&self, document: &str) -> String {
        let blocks = scan_blocks(document);
        if blocks.is_empty() {
            return document.to_string();
        }
        debug!("formatting {} fenced blocks", blocks.len());

        #[cfg(feature = "parallel")]
        let rendered: Vec<(Range<usize>, String)> = blocks
            .par_iter()
            .map(|block| (block.span.clone(), self.render_block(block)))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let rendered: Vec<(Range<usize>, String)> = blocks
            .iter()
            .map(|block| (block.span.clone(), self.render_block(block)))
            .collect();

        let mut result = String::with_capacity(document.len());
        let mut cursor = 0;
        for (span, replacement) in rendered {
            result.push_str(&document[cursor..span.start]);
            result.push_str(&replacement);
            cursor = span.end;
        }
        result.push_str(&document[cursor..]);
        result
    }

    /// The pipeline entry point: repair the whole document, then reformat
    /// its fenced blocks (unless block formatting is configured off).
    pub fn format_code_blocks(&self, document: &str) -> String {
        let repaired = self.repair_document(document);
        if !self.config.format_code_blocks {
            return repaired;
        }
        self.format_blocks(&repaired)
    }

    fn render_block(&self, block: &CodeBlock) -> String {
        let (formatted, language) =
            format_block_with(&block.content, block.hint.as_deref(), self.config.mode);
        render_fence(&formatted, language)
    }
}

fn render_fence(content: &str, language: Language) -> String {
    format!("```{language}\n{content}\n```")
}
