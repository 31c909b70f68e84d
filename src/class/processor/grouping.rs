use indexmap::IndexMap;
use log::{debug, trace};

use crate::class::types::{Block, ClassSet, IgnoreRules};

/// A class token split into its BEM parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassParts<'a> {
    /// No separator present
    Block(&'a str),

    /// `block<mod-sep>modifier`
    BlockModifier { block: &'a str, modifier: &'a str },

    /// `block<el-sep>element[<mod-sep>modifier]`
    Element {
        block: &'a str,
        element: &'a str,
        modifier: Option<&'a str>,
    },
}

impl<'a> ClassParts<'a> {
    pub fn block(&self) -> &'a str {
        match *self {
            ClassParts::Block(block) => block,
            ClassParts::BlockModifier { block, .. } => block,
            ClassParts::Element { block, .. } => block,
        }
    }
}

fn split_at<'a>(token: &'a str, separator: &str) -> Option<(&'a str, &'a str)> {
    if separator.is_empty() {
        return None;
    }
    token.split_once(separator)
}

/// Split a class token, first match wins.
///
/// A token holding the element separator is always element-bearing. Both
/// splits happen at the first occurrence, so later separators stay in the
/// element name or modifier: `b__e__x` has element `e__x`.
pub fn split_class<'a>(token: &'a str, element_separator: &str, modifier_separator: &str) -> ClassParts<'a> {
    if let Some((block, rest)) = split_at(token, element_separator) {
        return match split_at(rest, modifier_separator) {
            Some((element, modifier)) => ClassParts::Element {
                block,
                element,
                modifier: Some(modifier),
            },
            None => ClassParts::Element {
                block,
                element: rest,
                modifier: None,
            },
        };
    }

    match split_at(token, modifier_separator) {
        Some((block, modifier)) => ClassParts::BlockModifier { block, modifier },
        None => ClassParts::Block(token),
    }
}

/// Blocks built from a class set
#[derive(Debug, Clone, Default)]
pub struct Grouping {
    /// Blocks in first-seen order
    pub blocks: Vec<Block>,

    /// Tokens skipped by the ignore rules
    pub ignored_tokens: usize,
}

/// Group class tokens into BEM blocks.
///
/// Ignore rules are checked per token against its block name; a matching
/// token leaves the tree untouched even when its block already exists.
pub fn group_classes(
    classes: &ClassSet,
    element_separator: &str,
    modifier_separator: &str,
    ignore: &IgnoreRules,
) -> Grouping {
    let mut blocks: IndexMap<String, Block> = IndexMap::new();
    let mut ignored_tokens = 0;

    for token in classes {
        let parts = split_class(token, element_separator, modifier_separator);
        let block_name = parts.block();

        if ignore.is_ignored(block_name) {
            trace!("Ignoring {} (block {})", token, block_name);
            ignored_tokens += 1;
            continue;
        }

        let block = blocks
            .entry(block_name.to_string())
            .or_insert_with(|| Block::new(block_name));

        match parts {
            ClassParts::Block(_) => {}
            ClassParts::BlockModifier { modifier, .. } => {
                block.modifiers.insert(modifier.to_string());
            }
            ClassParts::Element { element, modifier, .. } => {
                let element = block.element_mut(element);
                if let Some(modifier) = modifier {
                    element.modifiers.insert(modifier.to_string());
                }
            }
        }
    }

    debug!("Grouped {} classes into {} blocks ({} ignored)", classes.len(), blocks.len(), ignored_tokens);

    Grouping {
        blocks: blocks.into_values().collect(),
        ignored_tokens,
    }
}

/// Group class tokens into BEM blocks, discarding the ignore count
pub fn group(
    classes: &ClassSet,
    element_separator: &str,
    modifier_separator: &str,
    ignore: &IgnoreRules,
) -> Vec<Block> {
    group_classes(classes, element_separator, modifier_separator, ignore).blocks
}
