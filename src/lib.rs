#[macro_use]
mod macros;
mod api;
mod engine;
mod error;

pub use api::{AmrGraph, Options, ParseResultVerbose, StageTimings, parse, parse_verbose_with, parse_with};
pub use engine::{NodeIndex, Token, TokenShape, enrich_edges, extract_edges, extract_nodes, tokenize, tokenize_with};
pub use error::ParseError;

use serde::{Serialize, Serializer};
use std::fmt;

// --- Graph model ------------------------------------------------------------

/// Hierarchical location of a node in depth-first preorder.
///
/// Displays (and serializes) as a dotted path such as `0.1.2`. A root node
/// has a single component; every child extends its parent's path by the
/// index of the child among its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position(Vec<usize>);

impl Position {
    /// Position of the `index`-th top-level node.
    pub fn root(index: usize) -> Self {
        Position(vec![index])
    }

    /// Position of the `index`-th nested node under `self`.
    pub fn child(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        Position(path)
    }

    /// Position of the enclosing node, or `None` for a root.
    pub fn parent(&self) -> Option<Position> {
        match self.0.len() {
            0 | 1 => None,
            n => Some(Position(self.0[..n - 1].to_vec())),
        }
    }

    /// Nesting depth (roots are at depth 0).
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn components(&self) -> &[usize] {
        &self.0
    }

    /// True when `self` is a strict dotted prefix of `other`.
    pub fn is_ancestor_of(&self, other: &Position) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Index of a node inside [`AmrGraph::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

/// One concept instance introduced by a `(handle / concept ...)` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub position: Position,
    pub handle: String,
    pub concept: String,
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.position, self.handle, self.concept)
    }
}

/// One side of an [`Edge`].
///
/// `handle` is always set. The remaining fields are filled in by
/// [`enrich_edges`] from the canonical node and stay `None` when the handle
/// is not in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub handle: String,
    pub id: Option<NodeId>,
    pub position: Option<Position>,
    pub concept: Option<String>,
}

impl Endpoint {
    pub(crate) fn bare(handle: &str) -> Self {
        Endpoint { handle: handle.to_string(), id: None, position: None, concept: None }
    }

    pub fn is_resolved(&self) -> bool {
        self.id.is_some()
    }
}

/// A directed, labeled relation between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub source: Endpoint,
    /// Role label without the leading `:`.
    pub relation: String,
    pub target: Endpoint,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})-> {}", self.source.handle, self.relation, self.target.handle)
    }
}

/// Non-fatal observations made while indexing nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A handle was defined again with a different concept. The first
    /// definition stays canonical.
    AmbiguousHandle { handle: String, kept: String, ignored: String, position: Position },
    /// A handle was defined again with the same concept.
    RedefinedHandle { handle: String, position: Position },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_paths() {
        let root = Position::root(0);
        let child = root.child(2).child(1);
        assert_eq!(child.to_string(), "0.2.1");
        assert_eq!(child.depth(), 2);
        assert_eq!(child.parent().map(|p| p.to_string()), Some("0.2".to_string()));
        assert_eq!(root.parent(), None);
        assert!(root.is_ancestor_of(&child));
        assert!(!child.is_ancestor_of(&child));
        assert!(!Position::root(1).is_ancestor_of(&child));
    }

    #[test]
    fn node_display() {
        let node = Node { position: Position::root(0).child(1), handle: "d2".into(), concept: "date-entity".into() };
        assert_eq!(node.to_string(), "0.1 d2 date-entity");
    }

    #[test]
    fn edge_display() {
        let edge = Edge { source: Endpoint::bare("c"), relation: "ARG1".into(), target: Endpoint::bare("p") };
        assert_eq!(edge.to_string(), "c (ARG1)-> p");
    }
}
