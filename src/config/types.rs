use serde::{Deserialize, Serialize};

use crate::class::scanner::ParserKind;
use crate::class::types::{AttributeMode, CommentStyle, Destination, RenderOptions};

/// Stored configuration, as read from a config file.
///
/// Every key is optional; missing keys fall back to the render defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// One indent unit
    pub indentation: String,

    /// Separator between block and element
    pub element_separator: String,

    /// Separator before a modifier
    pub modifier_separator: String,

    /// Placeholder for the parent selector in nested rules
    pub parent_symbol: String,

    pub brackets: bool,

    pub brackets_newline_after: bool,

    pub empty_line_before_nested_selector: bool,

    pub add_comment: bool,

    pub comment_style: CommentStyle,

    pub destination: Destination,

    pub attribute_mode: AttributeMode,

    /// Block names never rendered
    pub ignore: Vec<String>,

    /// Regular expressions; a matching block name is never rendered
    pub ignore_patterns: Vec<String>,

    pub bem_nesting: bool,

    /// Markup parser backing the scanner
    pub parser: ParserKind,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        let options = RenderOptions::default();
        Self {
            indentation: options.indentation,
            element_separator: options.element_separator,
            modifier_separator: options.modifier_separator,
            parent_symbol: options.parent_symbol,
            brackets: options.brackets,
            brackets_newline_after: options.brackets_newline_after,
            empty_line_before_nested_selector: options.empty_line_before_nested_selector,
            add_comment: options.add_comment,
            comment_style: options.comment_style,
            destination: options.destination,
            attribute_mode: options.attribute_mode,
            ignore: Vec::new(),
            ignore_patterns: Vec::new(),
            bem_nesting: options.bem_nesting,
            parser: ParserKind::default(),
        }
    }
}
