//! Parse pipeline.
//!
//! Runs every stage over one input:
//!
//! ```text
//! tokenize ─▶ read_forest ─▶ flatten ─▶ NodeIndex::build ─▶ collect_edges ─▶ enrich_edges
//! ```
//!
//! The forest is read once and shared by node and edge extraction. Any
//! structural error aborts the run before an index or edge list is built.

use super::edges::collect_edges;
use super::enrich::enrich_edges;
use super::index::NodeIndex;
use super::metrics::{RunMetrics, RunResult};
use super::nodes::{Preorder, flatten};
use super::reader::{Item, Value, read_forest};
use super::tokenizer::tokenize_with;
use crate::{Options, ParseError};
use std::time::Instant;

/// Parser for one input text.
///
/// Usage: `Parser::new(text, &options).run_with_metrics()`.
#[derive(Debug)]
pub struct Parser<'a> {
    input: &'a str,
    options: &'a Options,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, options: &'a Options) -> Self {
        Parser { input, options }
    }

    /// Run every stage and return timing details alongside the graph.
    pub fn run_with_metrics(self) -> Result<RunResult, ParseError> {
        let total_start = Instant::now();
        let mut metrics = RunMetrics::default();

        let start = Instant::now();
        let tokens = tokenize_with(self.input, self.options);
        metrics.tokenize = start.elapsed();
        metrics.tokens = tokens.len();

        let start = Instant::now();
        let forest = read_forest(&tokens, self.options)?;
        metrics.read = start.elapsed();

        let start = Instant::now();
        let nodes = flatten(&forest);
        let index = NodeIndex::build(&nodes);
        metrics.index = start.elapsed();

        let start = Instant::now();
        let mut edges = collect_edges(&forest, &index);
        metrics.edges = start.elapsed();

        let start = Instant::now();
        enrich_edges(&mut edges, &index, &nodes);
        metrics.enrich = start.elapsed();

        metrics.literals_dropped = Preorder::new(&forest)
            .flat_map(|scope| scope.items.iter())
            .filter(|item| matches!(item, Item::Relation { value: Value::Atom(atom), .. } if !index.contains(atom)))
            .count();
        metrics.total = total_start.elapsed();

        tracing::debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            literals = metrics.literals_dropped,
            elapsed = ?metrics.total,
            "parsed graph"
        );

        Ok(RunResult { nodes, index, edges, metrics })
    }
}
