//! Node extraction.
//!
//! Flattens the forest into concept nodes in depth-first preorder: every
//! node is immediately followed by its descendants, before its next sibling.
//! The traversal keeps its own stack, so it is restartable and not bounded
//! by the call stack.

use crate::{Node, Options, ParseError};

use super::reader::{Forest, Scope, read_forest};
use super::tokenizer::Token;

/// Preorder walk over every scope of a forest.
pub(crate) struct Preorder<'f, 'a> {
    stack: Vec<&'f Scope<'a>>,
}

impl<'f, 'a> Preorder<'f, 'a> {
    pub fn new(forest: &'f Forest<'a>) -> Self {
        Preorder { stack: forest.roots.iter().rev().collect() }
    }
}

impl<'f, 'a> Iterator for Preorder<'f, 'a> {
    type Item = &'f Scope<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let scope = self.stack.pop()?;
        self.stack.extend(scope.children().rev());
        Some(scope)
    }
}

/// Flatten `forest` into owned `Node` records.
pub(crate) fn flatten(forest: &Forest<'_>) -> Vec<Node> {
    Preorder::new(forest)
        .map(|scope| Node {
            position: scope.position.clone(),
            handle: scope.handle.to_string(),
            concept: scope.concept.to_string(),
        })
        .collect()
}

/// Extract every concept node from `tokens`, in depth-first preorder.
///
/// Fails if the token sequence is not structurally balanced.
pub fn extract_nodes(tokens: &[Token<'_>], options: &Options) -> Result<Vec<Node>, ParseError> {
    let forest = read_forest(tokens, options)?;
    let nodes = flatten(&forest);
    tracing::debug!(nodes = nodes.len(), "extracted nodes");
    Ok(nodes)
}
