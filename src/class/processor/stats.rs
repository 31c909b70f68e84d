use serde::Serialize;

use crate::class::types::Block;

/// Counters for one render
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessingStats {
    /// Element nodes visited in the markup
    pub tags_visited: usize,

    /// Class tokens read, duplicates included
    pub tokens_seen: usize,

    /// Distinct class tokens
    pub unique_classes: usize,

    /// Tokens dropped by the ignore rules
    pub ignored_tokens: usize,

    pub blocks: usize,
    pub elements: usize,
    pub modifiers: usize,

    /// Selector rules written
    pub rules: usize,
}

impl ProcessingStats {
    /// Create a new processing stats instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the blocks, elements and modifiers of a grouping
    pub fn record_blocks(&mut self, blocks: &[Block]) {
        self.blocks = blocks.len();
        self.elements = blocks.iter().map(|b| b.elements.len()).sum();
        self.modifiers = blocks
            .iter()
            .map(|b| b.modifiers.len() + b.elements.values().map(|e| e.modifiers.len()).sum::<usize>())
            .sum();
    }

    /// Share of distinct tokens that made it past the ignore rules, in percent
    pub fn kept_rate(&self) -> f64 {
        if self.unique_classes == 0 {
            return 0.0;
        }

        let kept = self.unique_classes - self.ignored_tokens.min(self.unique_classes);
        (kept as f64 / self.unique_classes as f64) * 100.0
    }
}
