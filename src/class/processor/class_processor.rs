use log::{debug, info};

use crate::class::scanner::{ClassScanner, ScanOutcome};
use crate::class::types::{Block, ClassSet, RenderOptions};

use super::grouping::group_classes;
use super::rules::{format_lines, render_rule, Rule, RuleLine};
use super::stats::ProcessingStats;

/// Turns markup into a stylesheet skeleton
#[derive(Debug, Default)]
pub struct ClassProcessor {
    /// Scanner used to pull class tokens out of markup
    scanner: ClassScanner,
}

impl ClassProcessor {
    /// Create a new class processor around a scanner
    pub fn new(scanner: ClassScanner) -> Self {
        Self { scanner }
    }

    /// Create a new class processor with the default scanner
    pub fn with_defaults() -> Self {
        Self::new(ClassScanner::with_defaults())
    }

    pub fn scanner(&self) -> &ClassScanner {
        &self.scanner
    }

    /// Render the classes of `markup`; blank markup renders to `""`
    pub fn render(&self, markup: &str, options: &RenderOptions) -> String {
        self.render_with_stats(markup, options).0
    }

    pub fn render_with_stats(&self, markup: &str, options: &RenderOptions) -> (String, ProcessingStats) {
        if markup.trim().is_empty() {
            debug!("Nothing to scan");
            return (String::new(), ProcessingStats::default());
        }

        let outcome = self.scanner.scan(markup, options.attribute_mode);
        self.render_outcome(&outcome, options)
    }

    /// Render an already collected scan
    pub fn render_outcome(&self, outcome: &ScanOutcome, options: &RenderOptions) -> (String, ProcessingStats) {
        let mut stats = ProcessingStats {
            tags_visited: outcome.tags_visited,
            tokens_seen: outcome.tokens_seen,
            unique_classes: outcome.classes.len(),
            ..ProcessingStats::default()
        };

        let lines = if options.bem_nesting {
            bem_lines(&outcome.classes, options, &mut stats)
        } else {
            flat_lines(&outcome.classes, options, &mut stats)
        };

        info!(
            "Rendered {} rules from {} classes ({} ignored)",
            stats.rules, stats.unique_classes, stats.ignored_tokens
        );

        (format_lines(&lines, &options.indentation), stats)
    }
}

/// One independent rule per class
pub fn flatten(classes: &ClassSet, options: &RenderOptions) -> String {
    let lines = flat_lines(classes, options, &mut ProcessingStats::default());
    format_lines(&lines, &options.indentation)
}

/// Nested BEM rules grouped by block
pub fn render_bem(classes: &ClassSet, options: &RenderOptions) -> String {
    let lines = bem_lines(classes, options, &mut ProcessingStats::default());
    format_lines(&lines, &options.indentation)
}

fn flat_lines(classes: &ClassSet, options: &RenderOptions, stats: &mut ProcessingStats) -> Vec<RuleLine> {
    let mut lines = Vec::new();

    for class in classes {
        if options.ignore.is_ignored(class) {
            stats.ignored_tokens += 1;
            continue;
        }

        // Without brackets, consecutive rules need a blank line between them
        if !options.brackets && !lines.is_empty() {
            lines.push(RuleLine::blank());
        }

        lines.extend(render_rule(Rule::new(format!(".{}", class)), options));
        stats.rules += 1;
    }

    lines
}

fn bem_lines(classes: &ClassSet, options: &RenderOptions, stats: &mut ProcessingStats) -> Vec<RuleLine> {
    let grouping = group_classes(
        classes,
        &options.element_separator,
        &options.modifier_separator,
        &options.ignore,
    );
    stats.ignored_tokens = grouping.ignored_tokens;
    stats.record_blocks(&grouping.blocks);

    let mut lines = Vec::new();
    for block in &grouping.blocks {
        // Without brackets, consecutive blocks need a blank line between them
        if !options.brackets && !lines.is_empty() {
            lines.push(RuleLine::blank());
        }
        lines.extend(block_lines(block, options, stats));
    }
    lines
}

fn block_lines(block: &Block, options: &RenderOptions, stats: &mut ProcessingStats) -> Vec<RuleLine> {
    let parent = &options.parent_symbol;
    let element_separator = &options.element_separator;
    let modifier_separator = &options.modifier_separator;

    let mut children = Vec::new();

    for modifier in &block.modifiers {
        let rule = Rule::nested(
            format!("{}{}{}", parent, modifier_separator, modifier),
            format!(".{}{}{}", block.name, modifier_separator, modifier),
        );
        children.extend(render_rule(rule, options));
        stats.rules += 1;
    }

    for element in block.elements.values() {
        let path = format!("{}{}{}", block.name, element_separator, element.name);

        let mut element_children = Vec::new();
        for modifier in &element.modifiers {
            let rule = Rule::nested(
                format!("{}{}{}", parent, modifier_separator, modifier),
                format!(".{}{}{}", path, modifier_separator, modifier),
            );
            element_children.extend(render_rule(rule, options));
            stats.rules += 1;
        }

        let rule = Rule::nested(
            format!("{}{}{}", parent, element_separator, element.name),
            format!(".{}", path),
        )
        .with_children(element_children);
        children.extend(render_rule(rule, options));
        stats.rules += 1;
    }

    stats.rules += 1;
    render_rule(Rule::new(format!(".{}", block.name)).with_children(children), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::types::{CommentStyle, IgnoreRules};
    use pretty_assertions::assert_eq;

    fn set(tokens: &[&str]) -> ClassSet {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn flat(options: RenderOptions) -> RenderOptions {
        RenderOptions {
            bem_nesting: false,
            ..options
        }
    }

    #[test]
    fn test_flatten_with_brackets() {
        let options = flat(RenderOptions::default());
        assert_eq!(flatten(&set(&["btn", "nav"]), &options), ".btn {}\n.nav {}");
    }

    #[test]
    fn test_flatten_without_brackets_separates_rules() {
        let options = flat(RenderOptions {
            brackets: false,
            ..RenderOptions::default()
        });
        assert_eq!(flatten(&set(&["btn"]), &options), ".btn");
        assert_eq!(flatten(&set(&["btn", "nav"]), &options), ".btn\n\n.nav");
    }

    #[test]
    fn test_flatten_newline_after() {
        let options = flat(RenderOptions {
            brackets_newline_after: true,
            ..RenderOptions::default()
        });
        assert_eq!(flatten(&set(&["btn"]), &options), ".btn {\n}");
    }

    #[test]
    fn test_flatten_ignores_whole_tokens() {
        let options = flat(RenderOptions {
            ignore: IgnoreRules::new(vec!["js-hook".to_string()], Vec::new()),
            ..RenderOptions::default()
        });
        assert_eq!(flatten(&set(&["js-hook", "btn"]), &options), ".btn {}");
    }

    #[test]
    fn test_render_bem_nested_blocks() {
        let output = render_bem(
            &set(&["block__el", "block__el--mod", "block--mod"]),
            &RenderOptions::default(),
        );

        assert_eq!(
            output,
            ".block {\n    &--mod {}\n    &__el {\n        &--mod {}\n    }\n}"
        );
    }

    #[test]
    fn test_render_bem_with_comments() {
        let options = RenderOptions {
            add_comment: true,
            comment_style: CommentStyle::Scss,
            indentation: "  ".to_string(),
            ..RenderOptions::default()
        };
        let output = render_bem(&set(&["card", "card__title--big"]), &options);

        assert_eq!(
            output,
            [
                ".card {",
                "  // .card__title",
                "  &__title {",
                "    // .card__title--big",
                "    &--big {}",
                "  }",
                "}",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_render_bem_without_brackets() {
        let options = RenderOptions {
            brackets: false,
            ..RenderOptions::default()
        };
        let output = render_bem(&set(&["menu--open", "menu__item"]), &options);

        assert_eq!(output, ".menu\n    &--open\n    &__item");
    }

    #[test]
    fn test_render_bem_without_brackets_separates_blocks() {
        let options = RenderOptions {
            brackets: false,
            ..RenderOptions::default()
        };
        let output = render_bem(&set(&["a--x", "b__y"]), &options);

        assert_eq!(output, ".a\n    &--x\n\n.b\n    &__y");
    }

    #[test]
    fn test_render_bem_empty_block() {
        let output = render_bem(&set(&["a", "b"]), &RenderOptions::default());
        assert_eq!(output, ".a {}\n.b {}");
    }

    #[test]
    fn test_render_is_deterministic() {
        let processor = ClassProcessor::with_defaults();
        let markup = r#"<div class="card card--big"><h2 class="card__title">x</h2></div>"#;
        let options = RenderOptions::default();

        assert_eq!(processor.render(markup, &options), processor.render(markup, &options));
    }

    #[test]
    fn test_render_blank_markup_is_empty() {
        let processor = ClassProcessor::with_defaults();
        let (output, stats) = processor.render_with_stats("  ", &RenderOptions::default());

        assert_eq!(output, "");
        assert_eq!(stats, ProcessingStats::default());
    }

    #[test]
    fn test_render_with_stats_counts_rules() {
        let processor = ClassProcessor::with_defaults();
        let markup = r#"<div class="card card--big js"><h2 class="card__title card__title--red">x</h2></div>"#;
        let options = RenderOptions {
            ignore: IgnoreRules::new(vec!["js".to_string()], Vec::new()),
            ..RenderOptions::default()
        };

        let (_, stats) = processor.render_with_stats(markup, &options);
        assert_eq!(stats.unique_classes, 5);
        assert_eq!(stats.ignored_tokens, 1);
        assert_eq!(stats.blocks, 1);
        assert_eq!(stats.elements, 1);
        assert_eq!(stats.modifiers, 2);
        assert_eq!(stats.rules, 4);
    }
}
