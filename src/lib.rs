//! BMSSP - recursive bounded multi-source shortest paths
//!
//! Single-source shortest paths on directed graphs with non-negative weights.
//! The work is split into bounded frontiers: every recursion level owns a
//! batched bucket queue, pulls bounded batches from it, narrows them down with
//! a pivot selection phase and bottoms out in a capped Dijkstra. A final,
//! unconditional Dijkstra sweep warm-started from the recursive result makes
//! the published distances exact.
//!
//! Dijkstra and Bellman-Ford are included as baselines and as the oracle the
//! engine is tested against.

pub mod algorithm;
pub mod data_structures;
pub mod graph;
pub mod instrument;
pub mod solver;

pub use algorithm::{
    bellman_ford::BellmanFord, bmssp::BMSSP, dijkstra::Dijkstra, params::BmsspParams,
    BmsspOutput, ShortestPathAlgorithm, ShortestPathResult,
};
/// Re-export main types for convenient use
pub use graph::directed::DirectedGraph;
pub use instrument::{Instrument, Metrics, NoopInstrument};
pub use solver::BmsspSolver;

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid edge: from {0} to {1}")]
    InvalidEdge(usize, usize),

    #[error("Negative edge weight: {0}")]
    NegativeWeight(f64),

    #[error("Source vertex {vertex} out of range for graph with {vertex_count} vertices")]
    SourceOutOfRange { vertex: usize, vertex_count: usize },

    #[error("Source vertex not found in graph")]
    SourceNotFound,

    #[error("Negative cycle reachable from source {0}")]
    NegativeCycle(usize),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Algorithm execution error: {0}")]
    AlgorithmError(String),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
