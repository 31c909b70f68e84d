mod class_processor;
pub mod grouping;
pub mod rules;
mod stats;

// Re-export from submodules
pub use class_processor::{flatten, render_bem, ClassProcessor};
pub use grouping::{group, split_class, ClassParts};
pub use rules::{format_lines, render_rule, Rule, RuleLine};
pub use stats::ProcessingStats;
