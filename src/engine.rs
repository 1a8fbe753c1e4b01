//! Parsing engine.
//!
//! The engine turns AMR-style bracketed text into a flat list of concept
//! nodes and a list of relation edges. Each stage lives in its own submodule
//! under `src/engine/` and can be called on its own; [`Parser`] strings them
//! together and records per-stage timings.
//!
//! ## How the parts work together
//!
//! ```text
//! text ── tokenize ──────────────── Vec<Token>           (tokenizer.rs)
//!                                        │
//!                                        v
//!                     Reader::read_forest                 (reader.rs)
//!                       - OPEN / RELATION / CLOSE state machine
//!                       - cursor + pending closers per token
//!                                        │
//!                         ┌──────────────┴──────────────┐
//!                         v                             v
//!              flatten (preorder)                collect_edges    (edges.rs)
//!                 (nodes.rs)                         ▲
//!                         │                          │
//!                         v                          │
//!                NodeIndex::build ───────────────────┘            (index.rs)
//!                         │
//!                         v
//!                  enrich_edges                                   (enrich.rs)
//! ```
//!
//! The forest is read once per [`Parser`] run. [`extract_nodes`] and
//! [`extract_edges`] each read their own forest from the token slice so they
//! can be used independently; neither ever mutates the tokens.
//!
//! ## Responsibilities by module
//!
//! - `tokenizer.rs`: whitespace split and token shape classification.
//! - `reader.rs`: recursive descent over tokens into a forest of scopes, and
//!   all structural error reporting.
//! - `nodes.rs`: preorder flattening of the forest into `Node`s.
//! - `index.rs`: handle → canonical node, first definition wins.
//! - `edges.rs`: relation edges, reentrancy resolution, literal dropping.
//! - `enrich.rs`: copies canonical node data onto edge endpoints.
//! - `metrics.rs`: stage timings for verbose runs.
//!
//! ## Debugging
//!
//! Stages log through `tracing`: stage summaries at `debug`, per-token
//! decisions at `trace`.

#[path = "engine/edges.rs"]
mod edges;
#[path = "engine/enrich.rs"]
mod enrich;
#[path = "engine/index.rs"]
mod index;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/nodes.rs"]
mod nodes;
#[path = "engine/parser.rs"]
mod parser;
#[path = "engine/reader.rs"]
mod reader;
#[path = "engine/tokenizer.rs"]
mod tokenizer;


pub use edges::extract_edges;
pub use enrich::enrich_edges;
pub use index::NodeIndex;
pub use metrics::RunResult;
pub use nodes::extract_nodes;
pub use parser::Parser;
pub use tokenizer::{Token, TokenShape, tokenize, tokenize_with};
