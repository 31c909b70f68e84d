pub mod types;
pub mod storage;
pub mod presets;

// Re-export main types and functions for easier access
pub use types::ScannerConfig;
pub use presets::{compile_patterns, CommandPreset, Overrides};
pub use storage::{ConfigFormat, ConfigStorage};
