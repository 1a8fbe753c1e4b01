use crate::engine::{self, NodeIndex, RunResult};
use crate::{Diagnostic, Edge, Node, NodeId, ParseError};
use serde::Serialize;
use std::time::Duration;

/// Options that affect tokenizing and reading.
///
/// The defaults accept exactly the notation described in the crate docs:
/// any separator token, no comment handling, unbounded nesting, and words
/// outside any node skipped.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Require the token between handle and concept to be exactly `/`.
    pub strict_separator: bool,
    /// Drop lines starting with `#` (AMR corpus metadata such as `# ::snt`)
    /// before tokenizing.
    pub skip_comment_lines: bool,
    /// Maximum node nesting; `Some(1)` allows only root nodes.
    pub max_depth: Option<usize>,
    /// Fail on words outside any node and on a relation followed directly by
    /// another relation, instead of skipping them.
    pub reject_stray_tokens: bool,
}

/// A parsed graph: nodes in preorder, the handle index, and enriched edges.
#[derive(Debug, Clone, Serialize)]
pub struct AmrGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    diagnostics: Vec<Diagnostic>,
    #[serde(skip)]
    index: NodeIndex,
}

impl AmrGraph {
    fn from_run(run: RunResult) -> Self {
        let diagnostics = run.index.diagnostics().to_vec();
        AmrGraph { nodes: run.nodes, edges: run.edges, diagnostics, index: run.index }
    }

    /// Every node, in depth-first preorder. Redefinitions of a handle appear
    /// here too; only the first is canonical.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Every relation edge, in textual order, with enriched endpoints.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Canonical node for `handle`.
    pub fn node_by_handle(&self, handle: &str) -> Option<&Node> {
        self.index.resolve(&self.nodes, handle)
    }

    pub fn index(&self) -> &NodeIndex {
        &self.index
    }

    /// Top-level nodes, one per graph in the input.
    pub fn root_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.position.parent().is_none())
    }

    /// Edges leaving the canonical node for `handle`.
    pub fn outgoing<'g>(&'g self, handle: &'g str) -> impl Iterator<Item = &'g Edge> {
        self.edges.iter().filter(move |e| e.source.handle == handle)
    }

    /// Edges entering the canonical node for `handle`.
    pub fn incoming<'g>(&'g self, handle: &'g str) -> impl Iterator<Item = &'g Edge> {
        self.edges.iter().filter(move |e| e.target.handle == handle)
    }

    /// Handles referenced by more than one edge (reentrancies).
    pub fn reentrant_handles(&self) -> Vec<&str> {
        let mut handles: Vec<&str> = self.edges.iter().map(|e| e.target.handle.as_str()).collect();
        handles.sort_unstable();
        let mut out: Vec<&str> = Vec::new();
        for pair in handles.windows(2) {
            if pair[0] == pair[1] && out.last() != Some(&pair[0]) {
                out.push(pair[0]);
            }
        }
        out
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Per-stage timings returned by [`parse_verbose_with`].
#[derive(Debug, Clone, Serialize)]
pub struct StageTimings {
    pub total: Duration,
    pub tokenize: Duration,
    pub read: Duration,
    pub index: Duration,
    pub edges: Duration,
    pub enrich: Duration,
    pub tokens: usize,
    pub literals_dropped: usize,
}

/// Result from [`parse_verbose_with`].
#[derive(Debug, Clone)]
pub struct ParseResultVerbose {
    pub text: String,
    pub graph: AmrGraph,
    pub timings: StageTimings,
}

/// Parse `text` with default [`Options`].
///
/// # Example
/// ```
/// let graph = amrgraph::parse("(c / complete-01 :ARG1 (p / project))").unwrap();
/// assert_eq!(graph.nodes().len(), 2);
/// assert_eq!(graph.edges()[0].relation, "ARG1");
/// ```
pub fn parse(text: &str) -> Result<AmrGraph, ParseError> {
    parse_with(text, &Options::default())
}

/// Parse `text` with the provided `options`.
pub fn parse_with(text: &str, options: &Options) -> Result<AmrGraph, ParseError> {
    let run = engine::Parser::new(text, options).run_with_metrics()?;
    Ok(AmrGraph::from_run(run))
}

/// Parse `text` and also return per-stage timings.
pub fn parse_verbose_with(text: &str, options: &Options) -> Result<ParseResultVerbose, ParseError> {
    let run = engine::Parser::new(text, options).run_with_metrics()?;
    let m = &run.metrics;
    let timings = StageTimings {
        total: m.total,
        tokenize: m.tokenize,
        read: m.read,
        index: m.index,
        edges: m.edges,
        enrich: m.enrich,
        tokens: m.tokens,
        literals_dropped: m.literals_dropped,
    };

    Ok(ParseResultVerbose { text: text.to_string(), graph: AmrGraph::from_run(run), timings })
}
