use std::str::FromStr;

use anyhow::{anyhow, Result};
use log::{debug, warn};
use regex::Regex;

use crate::class::types::{AttributeMode, Destination, IgnoreRules, RenderOptions};
use super::types::ScannerConfig;

/// Per-invocation values that win over the stored config
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub brackets: Option<bool>,
    pub add_comment: Option<bool>,
    pub bem_nesting: Option<bool>,
    pub destination: Option<Destination>,
    pub attribute_mode: Option<AttributeMode>,
}

/// The fixed command variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandPreset {
    /// Use the stored config as is
    #[default]
    Run,

    /// Nested BEM rules, no comments
    RunWithBem,

    /// Nested BEM rules with selector comments
    RunWithBemAndComments,

    /// One rule per class, no brackets
    RunWithoutBem,
}

impl CommandPreset {
    /// Overrides forced by this preset
    pub fn overrides(&self) -> Overrides {
        match self {
            CommandPreset::Run => Overrides::default(),
            CommandPreset::RunWithBem => Overrides {
                brackets: Some(true),
                add_comment: Some(false),
                bem_nesting: Some(true),
                ..Overrides::default()
            },
            CommandPreset::RunWithBemAndComments => Overrides {
                brackets: Some(true),
                add_comment: Some(true),
                bem_nesting: Some(true),
                ..Overrides::default()
            },
            CommandPreset::RunWithoutBem => Overrides {
                brackets: Some(false),
                add_comment: Some(false),
                bem_nesting: Some(false),
                ..Overrides::default()
            },
        }
    }
}

impl FromStr for CommandPreset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "run" | "default" => Ok(CommandPreset::Run),
            "bem" => Ok(CommandPreset::RunWithBem),
            "bem-comments" => Ok(CommandPreset::RunWithBemAndComments),
            "flat" | "no-bem" => Ok(CommandPreset::RunWithoutBem),
            other => Err(anyhow!("Unknown preset: {}", other)),
        }
    }
}

impl Overrides {
    /// Layer `other` on top of `self`; values set in `other` win
    pub fn merge(self, other: Overrides) -> Overrides {
        Overrides {
            brackets: other.brackets.or(self.brackets),
            add_comment: other.add_comment.or(self.add_comment),
            bem_nesting: other.bem_nesting.or(self.bem_nesting),
            destination: other.destination.or(self.destination),
            attribute_mode: other.attribute_mode.or(self.attribute_mode),
        }
    }
}

/// Compile ignore patterns, dropping the ones that are not valid regexes
pub fn compile_patterns(patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("Dropping invalid ignore pattern {:?}: {}", pattern, e);
                None
            }
        })
        .collect()
}

impl ScannerConfig {
    /// Resolve the render options for one invocation
    pub fn resolve(&self, overrides: &Overrides) -> RenderOptions {
        let options = RenderOptions {
            indentation: self.indentation.clone(),
            element_separator: self.element_separator.clone(),
            modifier_separator: self.modifier_separator.clone(),
            parent_symbol: self.parent_symbol.clone(),
            brackets: overrides.brackets.unwrap_or(self.brackets),
            brackets_newline_after: self.brackets_newline_after,
            empty_line_before_nested_selector: self.empty_line_before_nested_selector,
            add_comment: overrides.add_comment.unwrap_or(self.add_comment),
            comment_style: self.comment_style,
            destination: overrides.destination.unwrap_or(self.destination),
            attribute_mode: overrides.attribute_mode.unwrap_or(self.attribute_mode),
            ignore: IgnoreRules::new(
                self.ignore.iter().cloned(),
                compile_patterns(&self.ignore_patterns),
            ),
            bem_nesting: overrides.bem_nesting.unwrap_or(self.bem_nesting),
        };

        debug!(
            "Resolved options: bem_nesting={}, brackets={}, add_comment={}, {} ignore patterns",
            options.bem_nesting,
            options.brackets,
            options.add_comment,
            options.ignore.patterns.len()
        );
        options
    }

    /// Resolve the render options for a preset
    pub fn resolve_preset(&self, preset: CommandPreset) -> RenderOptions {
        self.resolve(&preset.overrides())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(CommandPreset::Run, true, false, true; "run keeps stored values")]
    #[test_case(CommandPreset::RunWithBem, true, false, true; "bem")]
    #[test_case(CommandPreset::RunWithBemAndComments, true, true, true; "bem with comments")]
    #[test_case(CommandPreset::RunWithoutBem, false, false, false; "without bem")]
    fn test_preset_overrides(preset: CommandPreset, brackets: bool, add_comment: bool, bem_nesting: bool) {
        let options = ScannerConfig::default().resolve_preset(preset);

        assert_eq!(options.brackets, brackets);
        assert_eq!(options.add_comment, add_comment);
        assert_eq!(options.bem_nesting, bem_nesting);
    }

    #[test]
    fn test_presets_win_over_stored_config() {
        let config = ScannerConfig {
            add_comment: true,
            brackets: false,
            bem_nesting: false,
            ..ScannerConfig::default()
        };

        let options = config.resolve_preset(CommandPreset::RunWithBem);
        assert!(options.brackets);
        assert!(!options.add_comment);
        assert!(options.bem_nesting);

        let options = config.resolve_preset(CommandPreset::Run);
        assert!(!options.brackets);
        assert!(options.add_comment);
    }

    #[test]
    fn test_invalid_pattern_is_dropped() {
        let config = ScannerConfig {
            ignore_patterns: vec!["^is-".to_string(), "([".to_string(), "-js$".to_string()],
            ..ScannerConfig::default()
        };

        let options = config.resolve(&Overrides::default());
        assert_eq!(options.ignore.patterns.len(), 2);
        assert!(options.ignore.is_ignored("is-open"));
        assert!(options.ignore.is_ignored("menu-js"));
        assert!(!options.ignore.is_ignored("menu"));
    }

    #[test]
    fn test_merge_prefers_later_values() {
        let cli = Overrides {
            destination: Some(Destination::NewDocument),
            brackets: Some(false),
            ..Overrides::default()
        };

        let merged = CommandPreset::RunWithBem.overrides().merge(cli);
        assert_eq!(merged.brackets, Some(false));
        assert_eq!(merged.bem_nesting, Some(true));
        assert_eq!(merged.destination, Some(Destination::NewDocument));
    }

    #[test]
    fn test_preset_names() {
        assert_eq!("bem-comments".parse::<CommandPreset>().unwrap(), CommandPreset::RunWithBemAndComments);
        assert_eq!("flat".parse::<CommandPreset>().unwrap(), CommandPreset::RunWithoutBem);
        assert!("bogus".parse::<CommandPreset>().is_err());
    }
}
