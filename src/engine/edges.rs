//! Edge extraction.
//!
//! Walks the forest depth-first and emits one edge per relation whose value
//! is a node:
//!
//! ```text
//! :ARG1 (p / project)   → new nested node:  edge to p, then p's own edges
//! :ARG1 p               → p is indexed:     reentrant edge to canonical p
//! :quant 4600000000     → not indexed:      literal, no edge
//! ```
//!
//! Edges come out in the order their relations appear in the text. Endpoints
//! carry only handles here; see `enrich.rs` for attaching node data.

use crate::{Edge, Endpoint, Options, ParseError};

use super::index::NodeIndex;
use super::reader::{Forest, Item, Scope, Value, read_forest};
use super::tokenizer::Token;

/// Collect the edges of every root in `forest`.
pub(crate) fn collect_edges(forest: &Forest<'_>, index: &NodeIndex) -> Vec<Edge> {
    let mut edges = Vec::new();
    for root in &forest.roots {
        collect_scope(root, index, &mut edges);
    }
    tracing::debug!(edges = edges.len(), "collected edges");
    edges
}

fn collect_scope(scope: &Scope<'_>, index: &NodeIndex, edges: &mut Vec<Edge>) {
    for item in &scope.items {
        match item {
            Item::Relation { label, value: Value::Node(target), .. } => {
                edges.push(edge(scope.handle, label, target.handle));
                collect_scope(target, index, edges);
            }
            Item::Relation { label, index: at, value: Value::Atom(atom) } => {
                if index.contains(atom) {
                    tracing::trace!(source = scope.handle, relation = *label, target = *atom, "reentrant reference");
                    edges.push(edge(scope.handle, label, atom));
                } else {
                    tracing::trace!(relation = *label, value = *atom, index = *at, "literal value dropped");
                }
            }
            Item::Nested(child) => collect_scope(child, index, edges),
        }
    }
}

fn edge(source: &str, relation: &str, target: &str) -> Edge {
    Edge { source: Endpoint::bare(source), relation: relation.to_string(), target: Endpoint::bare(target) }
}

/// Extract every relation edge from `tokens`, resolving bare values against
/// `index`.
///
/// Values that are neither nested nodes nor indexed handles are literals and
/// produce no edge. The returned endpoints are not yet enriched.
pub fn extract_edges(tokens: &[Token<'_>], index: &NodeIndex, options: &Options) -> Result<Vec<Edge>, ParseError> {
    let forest = read_forest(tokens, options)?;
    Ok(collect_edges(&forest, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{extract_nodes, tokenize};

    fn triples(text: &str) -> Vec<(String, String, String)> {
        let tokens = tokenize(text);
        let opts = Options::default();
        let index = NodeIndex::build(&extract_nodes(&tokens, &opts).unwrap());
        extract_edges(&tokens, &index, &opts)
            .unwrap()
            .into_iter()
            .map(|e| (e.source.handle, e.relation, e.target.handle))
            .collect()
    }

    fn t(s: &str, r: &str, o: &str) -> (String, String, String) {
        (s.to_string(), r.to_string(), o.to_string())
    }

    #[test]
    fn nested_edges_follow_their_parent_edge() {
        let got = triples("(a / x :r (b / y :s (c / z)) :t (d / w))");
        assert_eq!(got, vec![t("a", "r", "b"), t("b", "s", "c"), t("a", "t", "d")]);
    }

    #[test]
    fn reentrant_reference_becomes_an_edge() {
        let got = triples("(a / x :r (b / y) :s b)");
        assert_eq!(got, vec![t("a", "r", "b"), t("a", "s", "b")]);
    }

    #[test]
    fn forward_reference_resolves() {
        let got = triples("(a / x :r b :s (b / y))");
        assert_eq!(got, vec![t("a", "r", "b"), t("a", "s", "b")]);
    }

    #[test]
    fn literals_are_dropped() {
        let got = triples("(n / name :op1 \"Naif\" :op2 \"Arab\" :quant 5 :polarity -)");
        assert!(got.is_empty());
    }

    #[test]
    fn reference_closing_a_scope_still_resolves() {
        let got = triples("(s / x :r (c / y :u s))");
        assert_eq!(got, vec![t("s", "r", "c"), t("c", "u", "s")]);
    }

    #[test]
    fn unlabeled_nested_node_keeps_its_own_edges() {
        let got = triples("(a / x (b / y :r a))");
        assert_eq!(got, vec![t("b", "r", "a")]);
    }

    #[test]
    fn malformed_tokens_fail() {
        let tokens = tokenize("(a / x :r (b / y)");
        let err = extract_edges(&tokens, &NodeIndex::default(), &Options::default()).unwrap_err();
        assert!(matches!(err, ParseError::UnclosedScope { .. }));
    }
}
