//! Edge enrichment.
//!
//! Copies the canonical node's id, position and concept onto both endpoints
//! of every edge so consumers never need the index again. Both endpoints are
//! resolved by handle. An endpoint whose handle is not indexed is left bare.

use crate::{Edge, Endpoint, Node};

use super::index::NodeIndex;

/// Fill in endpoint data on `edges` in place.
pub fn enrich_edges(edges: &mut [Edge], index: &NodeIndex, nodes: &[Node]) {
    let mut unresolved = 0usize;
    for edge in edges.iter_mut() {
        for endpoint in [&mut edge.source, &mut edge.target] {
            if !enrich_endpoint(endpoint, index, nodes) {
                unresolved += 1;
            }
        }
    }
    tracing::debug!(edges = edges.len(), unresolved, "enriched edges");
}

fn enrich_endpoint(endpoint: &mut Endpoint, index: &NodeIndex, nodes: &[Node]) -> bool {
    let Some(id) = index.lookup(&endpoint.handle) else {
        tracing::trace!(handle = %endpoint.handle, "endpoint not in index");
        return false;
    };
    let Some(node) = nodes.get(id.0) else {
        return false;
    };
    endpoint.id = Some(id);
    endpoint.position = Some(node.position.clone());
    endpoint.concept = Some(node.concept.clone());
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NodeId, Options, extract_edges, extract_nodes, tokenize};

    #[test]
    fn both_endpoints_are_resolved_by_handle() {
        let tokens = tokenize("(a / x :r (b / y) :s b)");
        let opts = Options::default();
        let nodes = extract_nodes(&tokens, &opts).unwrap();
        let index = NodeIndex::build(&nodes);
        let mut edges = extract_edges(&tokens, &index, &opts).unwrap();
        enrich_edges(&mut edges, &index, &nodes);

        for edge in &edges {
            assert_eq!(edge.source.id, Some(NodeId(0)));
            assert_eq!(edge.source.concept.as_deref(), Some("x"));
            assert_eq!(edge.target.id, Some(NodeId(1)));
            assert_eq!(edge.target.position.as_ref().map(|p| p.to_string()), Some("0.0".to_string()));
            assert_eq!(edge.target.concept.as_deref(), Some("y"));
        }
    }

    #[test]
    fn unknown_handles_stay_bare() {
        let mut edges = vec![Edge { source: Endpoint::bare("a"), relation: "r".into(), target: Endpoint::bare("zz") }];
        let nodes = extract_nodes(&tokenize("(a / x)"), &Options::default()).unwrap();
        let index = NodeIndex::build(&nodes);
        enrich_edges(&mut edges, &index, &nodes);

        assert!(edges[0].source.is_resolved());
        assert!(!edges[0].target.is_resolved());
        assert_eq!(edges[0].target.position, None);
        assert_eq!(edges[0].target.concept, None);
    }
}
