mod file_collector;
mod parser;
pub mod simple_parser;

use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::class::types::{AttributeMode, ClassSet};
use crate::utils::file_utils;

// Re-export from submodules
pub use file_collector::FileCollector;
pub use parser::{ElementNode, Html5everParser, MarkupParser};
pub use simple_parser::SimpleParser;

/// Which markup parser backs a scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParserKind {
    /// HTML5 tree builder
    Html5,

    /// Regex tag tokenizer; keeps every tag, including stray table rows
    #[default]
    Simple,
}

/// Classes found in one markup snapshot
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Distinct class tokens in first-seen order
    pub classes: ClassSet,

    /// Number of element nodes visited
    pub tags_visited: usize,

    /// Number of tokens read, duplicates included
    pub tokens_seen: usize,
}

/// Extracts class tokens from markup attributes
pub struct ClassScanner {
    /// Markup parser used for every scan
    parser: Box<dyn MarkupParser>,
}

impl std::fmt::Debug for ClassScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassScanner").finish_non_exhaustive()
    }
}

impl Default for ClassScanner {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ClassScanner {
    /// Create a scanner over any markup parser
    pub fn new(parser: Box<dyn MarkupParser>) -> Self {
        Self { parser }
    }

    /// Create a scanner backed by the default (tag soup) parser
    pub fn with_defaults() -> Self {
        Self::for_kind(ParserKind::default())
    }

    /// Create a scanner for the given parser kind
    pub fn for_kind(kind: ParserKind) -> Self {
        match kind {
            ParserKind::Html5 => Self::new(Box::new(Html5everParser::new())),
            ParserKind::Simple => Self::new(Box::new(SimpleParser::new(false))),
        }
    }

    /// Collect the distinct class tokens of `markup`
    pub fn extract(&self, markup: &str, mode: AttributeMode) -> ClassSet {
        self.scan(markup, mode).classes
    }

    /// Like [`extract`](Self::extract), also reporting visit counts
    pub fn scan(&self, markup: &str, mode: AttributeMode) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();
        self.scan_into(markup, mode, &mut outcome);
        outcome
    }

    /// Scan several markup files into a single class set
    pub fn scan_files(&self, files: &[PathBuf], mode: AttributeMode) -> Result<ScanOutcome> {
        let mut outcome = ScanOutcome::default();

        for file in files {
            debug!("Scanning markup file: {}", file.display());
            let content = file_utils::read_file_to_string(file)?;
            self.scan_into(&content, mode, &mut outcome);
        }

        debug!(
            "Found {} classes in {} files",
            outcome.classes.len(),
            files.len()
        );
        Ok(outcome)
    }

    fn scan_into(&self, markup: &str, mode: AttributeMode, outcome: &mut ScanOutcome) {
        if markup.trim().is_empty() {
            return;
        }

        let nodes = self.parser.parse(markup);
        let attribute_names = mode.attribute_names();

        // Explicit stack: nesting depth is unbounded
        let mut stack: Vec<&ElementNode> = nodes.iter().rev().collect();
        while let Some(node) = stack.pop() {
            outcome.tags_visited += 1;

            for name in attribute_names {
                let Some(value) = node.attribute(name) else {
                    continue;
                };
                for token in value.split_whitespace() {
                    outcome.tokens_seen += 1;
                    if outcome.classes.insert(token.to_string()) {
                        trace!("New class token: {}", token);
                    }
                }
            }

            stack.extend(node.children.iter().rev());
        }
    }
}
