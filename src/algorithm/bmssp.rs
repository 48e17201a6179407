use std::fmt::Debug;
use std::marker::PhantomData;

use log::{debug, trace};
use num_traits::{Float, Zero};

use crate::algorithm::base_case::{base_case, LevelOutcome};
use crate::algorithm::correction::final_correction;
use crate::algorithm::params::BmsspParams;
use crate::algorithm::pivots::find_pivots;
use crate::algorithm::state::RunState;
use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::data_structures::BatchBucketQueue;
use crate::graph::Graph;
use crate::instrument::{Instrument, NoopInstrument};
use crate::{Error, Result};

/// Implementation of the Bounded Multi-Source Shortest Path (BMSSP) recursion
/// followed by an exact correction sweep.
///
/// Level `L` is seeded with the source. Every level above 0 selects pivots
/// from its frontier, feeds them to a fresh [`BatchBucketQueue`] of capacity
/// `2^(l t)`, and repeatedly pulls a batch, recurses one level down on it and
/// relaxes the edges of whatever the recursion completed. Level 0 (and any
/// frontier of at most `k` vertices below the top level) runs the capped
/// base-case Dijkstra.
///
/// Edge weights must be non-negative. This is checked by the graph builders,
/// not here; with negative weights the output is unspecified.
#[derive(Debug)]
pub struct BMSSP<W, G>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    /// Fixed parameters, or `None` to derive them from each graph's size
    params: Option<BmsspParams>,

    /// Graph type marker
    _graph_marker: PhantomData<G>,

    /// Weight type marker
    _weight_marker: PhantomData<W>,
}

/// Distances and predecessors produced by one BMSSP execution
#[derive(Debug, Clone, PartialEq)]
pub struct BmsspOutput<W> {
    /// Exact distances; `W::infinity()` for unreachable vertices
    pub distances: Vec<W>,

    /// Predecessor on a shortest path; `None` for the source and unreachable vertices
    pub predecessors: Vec<Option<usize>>,

    /// Source vertex ID
    pub source: usize,
}

impl<W> BmsspOutput<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Converts to the `Option`-based result shared with the baselines
    pub fn into_result(self) -> ShortestPathResult<W> {
        let distances = self
            .distances
            .into_iter()
            .map(|d| if d.is_infinite() { None } else { Some(d) })
            .collect();
        ShortestPathResult {
            distances,
            predecessors: self.predecessors,
            source: self.source,
        }
    }
}

impl<W, G> Default for BMSSP<W, G>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W, G> BMSSP<W, G>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    /// Create a new BMSSP instance that derives its parameters from each graph
    pub fn new() -> Self {
        BMSSP {
            params: None,
            _graph_marker: PhantomData,
            _weight_marker: PhantomData,
        }
    }

    /// Create a new BMSSP instance with explicit parameters
    pub fn new_with_params(params: BmsspParams) -> Self {
        BMSSP {
            params: Some(params),
            _graph_marker: PhantomData,
            _weight_marker: PhantomData,
        }
    }

    /// Parameters used for a graph with `vertex_count` vertices
    pub fn params_for(&self, vertex_count: usize) -> BmsspParams {
        self.params
            .unwrap_or_else(|| BmsspParams::for_vertex_count(vertex_count))
    }

    /// Computes exact distances from `source`
    pub fn run(&self, graph: &G, source: usize) -> Result<BmsspOutput<W>> {
        self.run_instrumented(graph, source, &mut NoopInstrument)
    }

    /// Computes exact distances from `source`, counting operations into `instrument`.
    ///
    /// Fails with [`Error::SourceOutOfRange`] before allocating anything if
    /// `source` is not a vertex of `graph`.
    pub fn run_instrumented<I: Instrument>(
        &self,
        graph: &G,
        source: usize,
        instrument: &mut I,
    ) -> Result<BmsspOutput<W>> {
        let n = graph.vertex_count();
        if source >= n {
            return Err(Error::SourceOutOfRange {
                vertex: source,
                vertex_count: n,
            });
        }

        let params = self.params_for(n);
        params.validate()?;
        debug!(
            "BMSSP from {} on {} vertices / {} edges (k={}, t={}, L={})",
            source,
            n,
            graph.edge_count(),
            params.k,
            params.t,
            params.levels
        );

        let mut state = RunState::new(n, source, params.levels);
        instrument.assign(4 * n as u64);

        let outcome = self.execute(
            graph,
            &params,
            params.levels,
            W::infinity(),
            &[source],
            &mut state,
            instrument,
        );
        debug!(
            "recursion completed {} vertices before correction",
            outcome.completed.len()
        );

        final_correction(graph, &mut state, instrument);

        Ok(BmsspOutput {
            distances: state.dist,
            predecessors: state.parent,
            source,
        })
    }

    /// One recursive BMSSP call at `level` on `frontier` below `bound`.
    ///
    /// Returns the vertices this call completed and a bound no larger than
    /// `bound`. Vertices already complete are dropped from the frontier; any
    /// call on a non-empty incomplete frontier completes at least one vertex.
    pub fn execute<I: Instrument>(
        &self,
        graph: &G,
        params: &BmsspParams,
        level: usize,
        bound: W,
        frontier: &[usize],
        state: &mut RunState<W>,
        instrument: &mut I,
    ) -> LevelOutcome<W> {
        instrument.call(1);
        let frontier: Vec<usize> = frontier
            .iter()
            .copied()
            .filter(|&v| !state.complete[v])
            .collect();
        instrument.compare(frontier.len() as u64);

        if frontier.is_empty() {
            return LevelOutcome {
                bound,
                completed: Vec::new(),
            };
        }

        // Base case (level 0, or a frontier that shrank to at most k vertices)
        if level == 0 || (level < params.levels && frontier.len() <= params.k) {
            return self.resolve_leaf(graph, params, bound, frontier, state, instrument);
        }

        let selection = find_pivots(graph, state, params, &frontier, bound, instrument);

        let mut queue = BatchBucketQueue::new(params.batch_capacity(level), bound);
        for &pivot in &selection.pivots {
            queue.insert(pivot, state.key(pivot));
            instrument.call(1);
        }

        trace!(
            "level {}: |S|={}, {} pivots, |W|={}, M={}",
            level,
            frontier.len(),
            selection.pivots.len(),
            selection.discovered.len(),
            queue.capacity()
        );

        let mut completed = Vec::new();
        let mut last_bound = bound;

        while !queue.is_empty() {
            instrument.compare(1);
            let pulled = queue.pull();
            instrument.call(1);

            let batch: Vec<usize> = pulled
                .vertices
                .into_iter()
                .filter(|&v| !state.complete[v])
                .collect();
            if batch.is_empty() {
                continue;
            }

            let sub = self.execute(graph, params, level - 1, pulled.bound, &batch, state, instrument);
            last_bound = sub.bound;

            // Relax edges out of everything the recursion finalized
            for &u in &sub.completed {
                for (v, weight) in graph.outgoing_edges(u) {
                    state.relax(u, v, weight, level, instrument);
                    instrument.compare(2);
                    if !state.complete[v] && state.dist[v] < bound {
                        queue.insert(v, state.key(v));
                        instrument.call(1);
                    }
                }
            }
            completed.extend(sub.completed);

            // Residual frontier goes back for the next pull
            for &x in &batch {
                instrument.compare(2);
                if !state.complete[x] && state.dist[x] < bound {
                    queue.insert(x, state.key(x));
                    instrument.call(1);
                }
            }
        }

        // Fold in the vertices discovered while selecting pivots
        for &v in &selection.discovered {
            instrument.compare(2);
            if state.dist[v] < bound && state.mark_complete(v) {
                completed.push(v);
                instrument.assign(1);
            }
        }

        LevelOutcome {
            bound: Ord::min(last_bound, bound),
            completed,
        }
    }

    /// Runs the base case from each frontier vertex in key order
    fn resolve_leaf<I: Instrument>(
        &self,
        graph: &G,
        params: &BmsspParams,
        bound: W,
        mut frontier: Vec<usize>,
        state: &mut RunState<W>,
        instrument: &mut I,
    ) -> LevelOutcome<W> {
        frontier.sort_unstable_by_key(|&v| state.key(v));

        let mut completed = Vec::new();
        let mut new_bound = bound;
        for source in frontier {
            instrument.compare(1);
            if state.complete[source] {
                continue;
            }
            let outcome = base_case(graph, state, params, source, bound, instrument);
            new_bound = Ord::min(new_bound, outcome.bound);
            completed.extend(outcome.completed);
        }

        LevelOutcome {
            bound: new_bound,
            completed,
        }
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for BMSSP<W, G>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "BMSSP"
    }

    fn compute_shortest_paths_instrumented<I: Instrument>(
        &self,
        graph: &G,
        source: usize,
        instrument: &mut I,
    ) -> Result<ShortestPathResult<W>> {
        Ok(self.run_instrumented(graph, source, instrument)?.into_result())
    }
}
