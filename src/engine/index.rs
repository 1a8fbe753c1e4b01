//! Handle index.
//!
//! Maps each handle to the node that first defined it. Later definitions of
//! the same handle never replace the canonical entry; they are reported as
//! diagnostics instead. A lookup miss is not an error: it means the value is
//! a literal rather than a reentrant reference.

use crate::{Diagnostic, Node, NodeId};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    by_handle: HashMap<String, NodeId>,
    diagnostics: Vec<Diagnostic>,
}

impl NodeIndex {
    /// Index `nodes` (as produced by [`crate::extract_nodes`]). `NodeId`s are
    /// offsets into that same slice.
    pub fn build(nodes: &[Node]) -> Self {
        let mut index = NodeIndex::default();

        for (offset, node) in nodes.iter().enumerate() {
            let Some(&canonical) = index.by_handle.get(&node.handle) else {
                index.by_handle.insert(node.handle.clone(), NodeId(offset));
                continue;
            };

            let kept = &nodes[canonical.0];
            if kept.concept != node.concept {
                tracing::warn!(
                    handle = %node.handle,
                    kept = %kept.concept,
                    ignored = %node.concept,
                    position = %node.position,
                    "handle redefined with a different concept; keeping the first definition"
                );
                index.diagnostics.push(Diagnostic::AmbiguousHandle {
                    handle: node.handle.clone(),
                    kept: kept.concept.clone(),
                    ignored: node.concept.clone(),
                    position: node.position.clone(),
                });
            } else {
                tracing::debug!(handle = %node.handle, position = %node.position, "handle redefined");
                index
                    .diagnostics
                    .push(Diagnostic::RedefinedHandle { handle: node.handle.clone(), position: node.position.clone() });
            }
        }

        tracing::debug!(handles = index.by_handle.len(), diagnostics = index.diagnostics.len(), "built node index");
        index
    }

    /// Id of the canonical node for `handle`.
    pub fn lookup(&self, handle: &str) -> Option<NodeId> {
        self.by_handle.get(handle).copied()
    }

    /// The canonical node for `handle`, taken from `nodes`.
    pub fn resolve<'n>(&self, nodes: &'n [Node], handle: &str) -> Option<&'n Node> {
        self.lookup(handle).and_then(|id| nodes.get(id.0))
    }

    pub fn contains(&self, handle: &str) -> bool {
        self.by_handle.contains_key(handle)
    }

    /// Number of distinct handles.
    pub fn len(&self) -> usize {
        self.by_handle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_handle.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Options, extract_nodes, tokenize};

    fn nodes(text: &str) -> Vec<Node> {
        extract_nodes(&tokenize(text), &Options::default()).unwrap()
    }

    #[test]
    fn first_definition_wins() {
        let nodes = nodes("(a / x :r (b / y) :s (b / z))");
        let index = NodeIndex::build(&nodes);

        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup("b"), Some(NodeId(1)));
        assert_eq!(index.resolve(&nodes, "b").unwrap().concept, "y");
        assert_eq!(
            index.diagnostics(),
            &[Diagnostic::AmbiguousHandle {
                handle: "b".into(),
                kept: "y".into(),
                ignored: "z".into(),
                position: nodes[2].position.clone(),
            }]
        );
    }

    #[test]
    fn same_concept_redefinition_is_reported_separately() {
        let nodes = nodes("(a / x :r (b / y) :s (b / y))");
        let index = NodeIndex::build(&nodes);
        assert!(matches!(index.diagnostics(), [Diagnostic::RedefinedHandle { handle, .. }] if handle == "b"));
    }

    #[test]
    fn missing_handle_is_not_found() {
        let nodes = nodes("(a / x)");
        let index = NodeIndex::build(&nodes);
        assert_eq!(index.lookup("zz"), None);
        assert!(index.resolve(&nodes, "zz").is_none());
        assert!(!index.contains("4600000000"));
    }

    #[test]
    fn resolve_returns_the_same_node_each_time() {
        let nodes = nodes("(s / x :r (p / project) :t (c / y :u p))");
        let index = NodeIndex::build(&nodes);
        let first = index.resolve(&nodes, "p").unwrap();
        let again = index.resolve(&nodes, "p").unwrap();
        assert!(std::ptr::eq(first, again));
    }
}
