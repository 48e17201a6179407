use std::fmt::Debug;

use log::debug;
use num_traits::{Float, Zero};

use crate::algorithm::state::RunState;
use crate::data_structures::LazyMinHeap;
use crate::graph::Graph;
use crate::instrument::Instrument;

/// Full Dijkstra sweep warm-started from the current distances.
///
/// Every vertex with a finite distance seeds the heap with its current key;
/// distances are not reset. Since each finite entry is the length of a real
/// path from the source, the sweep converges to the exact shortest-path
/// distances whatever the recursion left behind. Every vertex is complete
/// afterwards. Returns how many distances the sweep had to lower.
pub fn final_correction<W, G, I>(graph: &G, state: &mut RunState<W>, instrument: &mut I) -> usize
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
    I: Instrument,
{
    instrument.call(1);
    let n = graph.vertex_count();
    let mut heap = LazyMinHeap::with_capacity(n);

    for v in 0..n {
        instrument.compare(1);
        if state.is_finite(v) {
            heap.push(v, state.key(v));
            instrument.call(1);
        }
    }

    let mut lowered = 0;
    while let Some((u, _)) = heap.pop_live(|v, key| key == state.key(v)) {
        instrument.call(1);
        instrument.assign(2);
        instrument.compare(1);

        for (v, weight) in graph.outgoing_edges(u) {
            if state.relax(u, v, weight, 0, instrument) {
                lowered += 1;
                heap.push(v, state.key(v));
                instrument.call(1);
            }
        }
    }

    state.complete.iter_mut().for_each(|c| *c = true);
    instrument.assign(n as u64);
    instrument.compare(heap.discarded() as u64);

    debug!("final correction lowered {} distances", lowered);
    lowered
}
