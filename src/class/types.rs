use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Distinct class tokens in first-seen order
pub type ClassSet = IndexSet<String>;

/// Comment syntax used for selector comments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentStyle {
    /// `/* text */`
    #[default]
    Css,

    /// `// text`
    Scss,
}

/// Where the rendered stylesheet is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    #[default]
    Clipboard,
    NewDocument,
}

/// Which markup attributes supply class tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeMode {
    /// The `class` attribute only
    #[default]
    Class,

    /// The JSX `className` attribute only
    #[serde(alias = "classname")]
    ClassName,

    /// Both attributes, `class` tokens first
    Both,
}

impl AttributeMode {
    /// Lower-cased attribute names read for this mode
    pub fn attribute_names(&self) -> &'static [&'static str] {
        match self {
            AttributeMode::Class => &["class"],
            AttributeMode::ClassName => &["classname"],
            AttributeMode::Both => &["class", "classname"],
        }
    }
}

/// Exact block names and patterns that exclude a class from the output
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    /// Exact names to skip
    pub names: HashSet<String>,

    /// A name matching any of these is skipped
    pub patterns: Vec<Regex>,
}

impl IgnoreRules {
    pub fn new(names: impl IntoIterator<Item = String>, patterns: Vec<Regex>) -> Self {
        Self {
            names: names.into_iter().collect(),
            patterns,
        }
    }

    /// Whether `name` is listed exactly or matched by any pattern
    pub fn is_ignored(&self, name: &str) -> bool {
        self.names.contains(name) || self.patterns.iter().any(|re| re.is_match(name))
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.patterns.is_empty()
    }
}

/// Resolved formatting configuration for a single render
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// One indent unit
    pub indentation: String,

    /// Separator between a block and its element
    pub element_separator: String,

    /// Separator between a block or element and its modifier
    pub modifier_separator: String,

    /// Placeholder for the enclosing selector inside nested rules
    pub parent_symbol: String,

    /// Emit `{` and `}` around rule bodies
    pub brackets: bool,

    /// Put the closing bracket of an empty rule on its own line
    pub brackets_newline_after: bool,

    /// Insert a blank line before every nested rule
    pub empty_line_before_nested_selector: bool,

    /// Emit a comment with the full selector above nested rules
    pub add_comment: bool,

    pub comment_style: CommentStyle,

    pub destination: Destination,

    pub attribute_mode: AttributeMode,

    /// Block names excluded from the output
    pub ignore: IgnoreRules,

    /// Render nested BEM blocks instead of one flat rule per class
    pub bem_nesting: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indentation: "    ".to_string(),
            element_separator: "__".to_string(),
            modifier_separator: "--".to_string(),
            parent_symbol: "&".to_string(),
            brackets: true,
            brackets_newline_after: false,
            empty_line_before_nested_selector: false,
            add_comment: false,
            comment_style: CommentStyle::Css,
            destination: Destination::Clipboard,
            attribute_mode: AttributeMode::Class,
            ignore: IgnoreRules::default(),
            bem_nesting: true,
        }
    }
}

/// A BEM element and the modifiers applied to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub modifiers: IndexSet<String>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: IndexSet::new(),
        }
    }
}

/// A BEM block with its own modifiers and its elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub name: String,

    /// Modifiers applied directly to the block
    pub modifiers: IndexSet<String>,

    /// Elements keyed by name, in first-seen order
    pub elements: IndexMap<String, Element>,
}

impl Block {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: IndexSet::new(),
            elements: IndexMap::new(),
        }
    }

    /// Fetch the element called `name`, creating it on first use
    pub fn element_mut(&mut self, name: &str) -> &mut Element {
        self.elements
            .entry(name.to_string())
            .or_insert_with(|| Element::new(name))
    }
}
