use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{parse_document, ParseOpts};
use log::{debug, trace};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// An element node produced by a markup parser
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementNode {
    /// Tag name
    pub name: String,

    /// Attributes in source order; names are lower-cased
    pub attributes: Vec<(String, String)>,

    /// Nested element nodes
    pub children: Vec<ElementNode>,
}

impl ElementNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style attribute helper, mostly for tests
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_ascii_lowercase(), value.to_string()));
        self
    }

    pub fn with_child(mut self, child: ElementNode) -> Self {
        self.children.push(child);
        self
    }

    /// Value of the first attribute called `name` (lower-case)
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Lenient markup parser turning a text fragment into element nodes.
///
/// Implementations must never fail: malformed or partial markup yields
/// whatever elements could be recovered.
pub trait MarkupParser {
    fn parse(&self, markup: &str) -> Vec<ElementNode>;
}

/// HTML5 tree builder backed by `html5ever`.
///
/// Scripting is off so `<noscript>` bodies are parsed as markup, and
/// `<template>` contents are walked like ordinary children. Stray table
/// rows outside a `<table>` are still dropped by the tree builder.
#[derive(Debug, Default, Clone, Copy)]
pub struct Html5everParser;

impl Html5everParser {
    pub fn new() -> Self {
        Self
    }
}

impl MarkupParser for Html5everParser {
    fn parse(&self, markup: &str) -> Vec<ElementNode> {
        trace!("Parsing {} bytes of markup with html5ever", markup.len());
        let opts = ParseOpts {
            tree_builder: TreeBuilderOpts {
                scripting_enabled: false,
                ..Default::default()
            },
            ..Default::default()
        };
        let dom = parse_document(RcDom::default(), opts).one(markup);
        let nodes = convert_dom(&dom.document);
        debug!("html5ever produced {} top-level elements", nodes.len());
        nodes
    }
}

struct Frame {
    handle: Handle,
    next_child: usize,
    node: Option<ElementNode>,
}

/// Copy the element nodes below `root` into owned `ElementNode`s.
/// Uses an explicit stack so deeply nested documents cannot overflow.
fn convert_dom(root: &Handle) -> Vec<ElementNode> {
    let mut roots = Vec::new();
    let mut stack = vec![Frame {
        handle: root.clone(),
        next_child: 0,
        node: None,
    }];

    while let Some(frame) = stack.last_mut() {
        let child = frame.handle.children.borrow().get(frame.next_child).cloned();

        if let Some(child) = child {
            frame.next_child += 1;
            if let Some(node) = element_of(&child) {
                stack.push(Frame {
                    handle: children_of(&child),
                    next_child: 0,
                    node: Some(node),
                });
            }
            continue;
        }

        let finished = stack.pop().and_then(|frame| frame.node);
        if let Some(node) = finished {
            match stack.last_mut().and_then(|parent| parent.node.as_mut()) {
                Some(parent) => parent.children.push(node),
                None => roots.push(node),
            }
        }
    }

    roots
}

/// The node whose children hold an element's content: the contents
/// fragment for `<template>`, the element itself otherwise
fn children_of(handle: &Handle) -> Handle {
    if let NodeData::Element { template_contents, .. } = &handle.data {
        if let Some(contents) = template_contents.borrow().as_ref() {
            return contents.clone();
        }
    }
    handle.clone()
}

fn element_of(handle: &Handle) -> Option<ElementNode> {
    match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let attributes = attrs
                .borrow()
                .iter()
                .map(|attr| {
                    (
                        attr.name.local.to_string().to_ascii_lowercase(),
                        attr.value.to_string(),
                    )
                })
                .collect();

            Some(ElementNode {
                name: name.local.to_string(),
                attributes,
                children: Vec::new(),
            })
        }
        _ => None,
    }
}
