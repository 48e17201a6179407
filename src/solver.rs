use std::fmt::Debug;

use num_traits::{Float, Zero};

use crate::algorithm::bmssp::{BmsspOutput, BMSSP};
use crate::algorithm::params::BmsspParams;
use crate::graph::{DirectedGraph, Graph};
use crate::instrument::{Instrument, NoopInstrument};
use crate::Result;

/// Owns a graph with a fixed vertex count and runs BMSSP on it.
///
/// ```
/// use bmssp::BmsspSolver;
/// use ordered_float::OrderedFloat;
///
/// let mut solver = BmsspSolver::new(3);
/// solver.add_edge(0, 1, OrderedFloat(2.0)).unwrap();
/// solver.add_edge(1, 2, OrderedFloat(3.0)).unwrap();
///
/// let out = solver.execute(0).unwrap();
/// assert_eq!(out.distances[2], OrderedFloat(5.0));
/// assert_eq!(out.predecessors[2], Some(1));
/// ```
#[derive(Debug)]
pub struct BmsspSolver<W>
where
    W: Float + Zero + Debug + Copy + Ord,
{
    graph: DirectedGraph<W>,
    engine: BMSSP<W, DirectedGraph<W>>,
}

impl<W> BmsspSolver<W>
where
    W: Float + Zero + Debug + Copy + Ord,
{
    /// Creates a solver over `n` vertices and no edges. Parameters are derived from `n`.
    pub fn new(n: usize) -> Self {
        BmsspSolver {
            graph: DirectedGraph::with_capacity(n),
            engine: BMSSP::new(),
        }
    }

    /// Creates a solver that runs with explicit recursion parameters
    pub fn with_params(n: usize, params: BmsspParams) -> Self {
        BmsspSolver {
            graph: DirectedGraph::with_capacity(n),
            engine: BMSSP::new_with_params(params),
        }
    }

    /// Wraps an already built graph
    pub fn from_graph(graph: DirectedGraph<W>) -> Self {
        BmsspSolver {
            graph,
            engine: BMSSP::new(),
        }
    }

    /// Adds the directed edge `u -> v`.
    ///
    /// Fails with `InvalidEdge` if an endpoint is outside `[0, n)` and with
    /// `NegativeWeight` for negative or NaN weights. Parallel edges and
    /// self-loops are accepted.
    pub fn add_edge(&mut self, u: usize, v: usize, weight: W) -> Result<()> {
        self.graph.try_add_edge(u, v, weight)
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn graph(&self) -> &DirectedGraph<W> {
        &self.graph
    }

    /// Parameters a run on the current graph would use
    pub fn params(&self) -> BmsspParams {
        self.engine.params_for(self.graph.vertex_count())
    }

    /// Computes distances and predecessors from `source`. Each call starts
    /// from fresh state, so repeated calls give identical results.
    pub fn execute(&self, source: usize) -> Result<BmsspOutput<W>> {
        self.execute_with(source, &mut NoopInstrument)
    }

    /// Same as [`execute`](Self::execute) while counting operations into `instrument`
    pub fn execute_with<I: Instrument>(&self, source: usize, instrument: &mut I) -> Result<BmsspOutput<W>> {
        self.engine.run_instrumented(&self.graph, source, instrument)
    }
}
