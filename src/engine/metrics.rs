//! Engine run metrics.
//!
//! `Parser::run_with_metrics` records how long each stage took. Metrics are
//! plain durations and counts; nothing here allocates per token.

use crate::{Edge, Node};
use std::time::Duration;

use super::index::NodeIndex;

// --- Metrics -----------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for [`Parser::run_with_metrics`](super::Parser::run_with_metrics).
    pub total: Duration,
    pub tokenize: Duration,
    /// Reading the token stream into a forest of scopes.
    pub read: Duration,
    /// Flattening nodes and building the handle index.
    pub index: Duration,
    pub edges: Duration,
    pub enrich: Duration,
    pub tokens: usize,
    /// Relations whose value was a literal and produced no edge.
    pub literals_dropped: usize,
}

/// Parser output bundled with timing information.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub nodes: Vec<Node>,
    pub index: NodeIndex,
    /// Enriched edges.
    pub edges: Vec<Edge>,
    pub metrics: RunMetrics,
}
