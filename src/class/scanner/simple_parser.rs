use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

use super::parser::{ElementNode, MarkupParser};

// Opening or self-closing tag; quoted values may contain `>`
static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<([A-Za-z][A-Za-z0-9:._-]*)((?:[^>"']|"[^"]*"|'[^']*')*)>"#)
        .expect("tag pattern is valid")
});

static ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([^\s"'=<>/]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("attribute pattern is valid")
});

/// A regex tag tokenizer.
///
/// It builds no tree: every opening tag becomes a childless node, in source
/// order. Useful for template dialects (JSX, Vue, PHP) that an HTML5 tree
/// builder would restructure or drop.
#[derive(Debug, Default, Clone)]
pub struct SimpleParser {
    /// Whether to output verbose logs
    pub verbose: bool,
}

impl SimpleParser {
    /// Create a new simple parser
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn parse_attributes(&self, source: &str) -> Vec<(String, String)> {
        ATTR_RE
            .captures_iter(source)
            .map(|cap| {
                let name = cap[1].to_ascii_lowercase();
                let value = cap
                    .get(2)
                    .or_else(|| cap.get(3))
                    .or_else(|| cap.get(4))
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();
                (name, value)
            })
            .collect()
    }
}

impl MarkupParser for SimpleParser {
    fn parse(&self, markup: &str) -> Vec<ElementNode> {
        let nodes: Vec<ElementNode> = TAG_RE
            .captures_iter(markup)
            .map(|cap| {
                let node = ElementNode {
                    name: cap[1].to_ascii_lowercase(),
                    attributes: self.parse_attributes(&cap[2]),
                    children: Vec::new(),
                };
                if self.verbose {
                    trace!("Found tag <{}> with {} attributes", node.name, node.attributes.len());
                }
                node
            })
            .collect();

        debug!("Found {} tags", nodes.len());
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_become_flat_nodes() {
        let nodes = SimpleParser::new(false).parse(r#"<div class="a"><span class='b c'>x</span></div>"#);

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].name, "div");
        assert_eq!(nodes[0].attribute("class"), Some("a"));
        assert_eq!(nodes[1].attribute("class"), Some("b c"));
        assert!(nodes.iter().all(|n| n.children.is_empty()));
    }

    #[test]
    fn test_unquoted_and_valueless_attributes() {
        let nodes = SimpleParser::new(false).parse(r#"<input disabled class=field type="text">"#);

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].attribute("disabled"), Some(""));
        assert_eq!(nodes[0].attribute("class"), Some("field"));
        assert_eq!(nodes[0].attribute("type"), Some("text"));
    }

    #[test]
    fn test_quoted_angle_bracket_does_not_end_tag() {
        let nodes = SimpleParser::new(false).parse(r#"<a title="1 > 0" class="link">x</a>"#);

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].attribute("class"), Some("link"));
    }

    #[test]
    fn test_jsx_class_name_is_lower_cased() {
        let nodes = SimpleParser::new(true).parse(r#"<Button className="btn btn--primary" />"#);

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "button");
        assert_eq!(nodes[0].attribute("classname"), Some("btn btn--primary"));
    }

    #[test]
    fn test_closing_tags_and_comments_are_skipped() {
        let nodes = SimpleParser::new(false).parse("<!-- <b class=\"x\"> --></div><p>");

        // The commented tag is still a tag to a tokenizer; closing tags are not.
        assert_eq!(nodes.iter().filter(|n| n.name == "p").count(), 1);
        assert!(nodes.iter().all(|n| n.name != "div"));
    }
}
