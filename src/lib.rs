pub mod class;
pub mod config;
pub mod output;
pub mod utils;

// Re-export main types and functions for easier access
pub use class::types::{
    AttributeMode, Block, ClassSet, CommentStyle, Destination, Element, IgnoreRules, RenderOptions,
};
pub use class::scanner::{ClassScanner, Html5everParser, MarkupParser, ParserKind, SimpleParser};
pub use class::processor::{ClassProcessor, ProcessingStats};

pub use config::{CommandPreset, ConfigStorage, Overrides, ScannerConfig};
pub use output::{sink_for, OutputSink};

// Re-export utility functions
pub use utils::file_utils;

/// Render the classes of `markup` with the given options.
///
/// This is the whole pipeline: extract class tokens, then emit flat or
/// nested BEM rules. Blank markup renders to an empty string.
pub fn render(markup: &str, options: &RenderOptions) -> String {
    ClassProcessor::with_defaults().render(markup, options)
}
