use std::collections::HashSet;
use std::fmt::Debug;

use log::trace;
use num_traits::{Float, Zero};

use crate::algorithm::params::BmsspParams;
use crate::algorithm::state::RunState;
use crate::data_structures::LazyMinHeap;
use crate::graph::Graph;
use crate::instrument::Instrument;

/// Outcome of one recursive call: a bound and the vertices it completed
#[derive(Debug, Clone, PartialEq)]
pub struct LevelOutcome<W> {
    /// New boundary value, never above the bound the call was given
    pub bound: W,

    /// Vertices marked complete by this call, each listed once
    pub completed: Vec<usize>,
}

/// Capped Dijkstra from a single source: the leaf of the recursion.
///
/// Settles at most `base_case_limit` vertices, the source always first, and
/// never relaxes an edge to a distance at or above `bound`. Writes the shared
/// arrays directly and marks every settled vertex complete. If vertices were
/// still pending when the cap was hit, the returned bound is the distance of
/// the first one; otherwise it is `bound` itself.
pub fn base_case<W, G, I>(
    graph: &G,
    state: &mut RunState<W>,
    params: &BmsspParams,
    source: usize,
    bound: W,
    instrument: &mut I,
) -> LevelOutcome<W>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
    I: Instrument,
{
    instrument.call(1);
    let expected = params.base_case_limit.min(graph.vertex_count());
    let mut heap = LazyMinHeap::with_capacity(expected.saturating_mul(2));
    let mut settled = HashSet::with_capacity(expected);
    let mut completed = Vec::new();

    heap.push(source, state.key(source));
    instrument.call(1);
    instrument.access(1);

    while settled.len() < params.base_case_limit {
        instrument.compare(1);
        let Some((u, _)) = heap.pop_live(|v, key| key == state.key(v) && !settled.contains(&v)) else {
            break;
        };
        settled.insert(u);
        instrument.call(1);
        instrument.compare(2);
        instrument.assign(2);

        if state.mark_complete(u) {
            completed.push(u);
        }
        instrument.assign(2);

        for (v, weight) in graph.outgoing_edges(u) {
            let candidate = state.dist[u] + weight;
            instrument.arithmetic(1);
            instrument.compare(1);
            if candidate >= bound {
                continue;
            }
            if state.relax(u, v, weight, 0, instrument) {
                heap.push(v, state.key(v));
                instrument.call(1);
            }
        }
    }

    // First still-current entry left in the heap, if the cap cut us short
    let new_bound = heap
        .pop_live(|v, key| key == state.key(v) && !settled.contains(&v))
        .map_or(bound, |(_, key)| Ord::min(key.distance, bound));
    instrument.compare(heap.discarded() as u64);

    trace!(
        "base_case from {}: settled {}, completed {}, bound {:?}",
        source,
        settled.len(),
        completed.len(),
        new_bound
    );

    LevelOutcome {
        bound: new_bound,
        completed,
    }
}
