use crate::class::types::{CommentStyle, RenderOptions};

/// One output line with its nesting level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleLine {
    pub text: String,

    /// Nesting depth, in indent units
    pub level: usize,

    /// Blank spacer lines are written verbatim, without indentation
    pub auto_indent: bool,
}

impl RuleLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: 0,
            auto_indent: true,
        }
    }

    pub fn blank() -> Self {
        Self {
            text: String::new(),
            level: 0,
            auto_indent: false,
        }
    }

    fn nested(mut self) -> Self {
        self.level += 1;
        self
    }
}

/// A selector rule waiting to be laid out
#[derive(Debug, Clone, Default)]
pub struct Rule {
    pub selector: String,

    /// Comment placed above the selector when comments are enabled
    pub comment: Option<String>,

    /// Already rendered body lines
    pub children: Vec<RuleLine>,

    /// Nested rules get the optional leading blank line
    pub nested: bool,
}

impl Rule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            ..Self::default()
        }
    }

    pub fn nested(selector: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            comment: Some(comment.into()),
            children: Vec::new(),
            nested: true,
        }
    }

    pub fn with_children(mut self, children: Vec<RuleLine>) -> Self {
        self.children = children;
        self
    }
}

fn comment_line(text: &str, style: CommentStyle) -> String {
    match style {
        CommentStyle::Css => format!("/* {} */", text),
        CommentStyle::Scss => format!("// {}", text),
    }
}

/// Lay out one rule and its body
pub fn render_rule(rule: Rule, options: &RenderOptions) -> Vec<RuleLine> {
    let mut lines = Vec::with_capacity(rule.children.len() + 4);

    if rule.nested && options.empty_line_before_nested_selector {
        lines.push(RuleLine::blank());
    }

    if options.add_comment {
        if let Some(comment) = &rule.comment {
            lines.push(RuleLine::new(comment_line(comment, options.comment_style)));
        }
    }

    if rule.children.is_empty() {
        match (options.brackets, options.brackets_newline_after) {
            (true, true) => {
                lines.push(RuleLine::new(format!("{} {{", rule.selector)));
                lines.push(RuleLine::new("}"));
            }
            (true, false) => lines.push(RuleLine::new(format!("{} {{}}", rule.selector))),
            (false, _) => lines.push(RuleLine::new(rule.selector)),
        }
        return lines;
    }

    if options.brackets {
        lines.push(RuleLine::new(format!("{} {{", rule.selector)));
    } else {
        lines.push(RuleLine::new(rule.selector));
    }

    lines.extend(rule.children.into_iter().map(RuleLine::nested));

    if options.brackets {
        lines.push(RuleLine::new("}"));
    }

    lines
}

/// Join lines into the final text, indenting structural lines
pub fn format_lines(lines: &[RuleLine], indentation: &str) -> String {
    lines
        .iter()
        .map(|line| {
            if line.auto_indent {
                format!("{}{}", indentation.repeat(line.level), line.text)
            } else {
                line.text.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(rule: Rule, options: &RenderOptions) -> String {
        format_lines(&render_rule(rule, options), &options.indentation)
    }

    #[test]
    fn test_empty_rule_with_brackets() {
        let options = RenderOptions::default();
        assert_eq!(render(Rule::new(".btn"), &options), ".btn {}");

        let options = RenderOptions {
            brackets_newline_after: true,
            ..RenderOptions::default()
        };
        assert_eq!(render(Rule::new(".btn"), &options), ".btn {\n}");
    }

    #[test]
    fn test_empty_rule_without_brackets() {
        let options = RenderOptions {
            brackets: false,
            brackets_newline_after: true,
            ..RenderOptions::default()
        };
        assert_eq!(render(Rule::new(".btn"), &options), ".btn");
    }

    #[test]
    fn test_children_are_indented_one_level() {
        let options = RenderOptions {
            indentation: "\t".to_string(),
            ..RenderOptions::default()
        };
        let inner = render_rule(Rule::nested("&--a", ".b--a"), &options);
        let outer = render_rule(Rule::new(".b").with_children(inner), &options);

        assert_eq!(format_lines(&outer, "\t"), ".b {\n\t&--a {}\n}");
    }

    #[test]
    fn test_comments_follow_style() {
        let mut options = RenderOptions {
            add_comment: true,
            ..RenderOptions::default()
        };
        assert_eq!(render(Rule::nested("&--a", ".b--a"), &options), "/* .b--a */\n&--a {}");

        options.comment_style = CommentStyle::Scss;
        assert_eq!(render(Rule::nested("&--a", ".b--a"), &options), "// .b--a\n&--a {}");

        options.add_comment = false;
        assert_eq!(render(Rule::nested("&--a", ".b--a"), &options), "&--a {}");
    }

    #[test]
    fn test_blank_line_before_nested_rule_is_not_indented() {
        let options = RenderOptions {
            empty_line_before_nested_selector: true,
            ..RenderOptions::default()
        };
        let inner = render_rule(Rule::nested("&__el", ".b__el"), &options);
        let outer = render_rule(Rule::new(".b").with_children(inner), &options);

        assert_eq!(format_lines(&outer, "  "), ".b {\n\n  &__el {}\n}");
    }
}
