use std::fmt::Debug;

use num_traits::{Float, Zero};

use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::graph::Graph;
use crate::data_structures::LazyMinHeap;
use crate::instrument::Instrument;
use crate::{Error, Result};

/// Classic Dijkstra's algorithm implementation
///
/// Serves as the baseline and as the oracle the BMSSP engine is checked against.
#[derive(Debug, Default)]
pub struct Dijkstra;

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for Dijkstra
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn compute_shortest_paths_instrumented<I: Instrument>(
        &self,
        graph: &G,
        source: usize,
        instrument: &mut I,
    ) -> Result<ShortestPathResult<W>> {
        if !graph.has_vertex(source) {
            return Err(Error::SourceNotFound);
        }

        let n = graph.vertex_count();

        // Initialize distances and predecessors
        let mut distances: Vec<Option<W>> = vec![None; n];
        let mut predecessors: Vec<Option<usize>> = vec![None; n];
        instrument.assign(2 * n as u64);

        // Distance to source is 0
        distances[source] = Some(W::zero());
        instrument.assign(1);

        let mut queue = LazyMinHeap::with_capacity(n);
        queue.push(source, W::zero());
        instrument.call(1);

        // Entries superseded by a shorter path are skipped
        while let Some((u, dist_u)) = queue.pop_live(|v, d| distances[v].map_or(true, |current| current >= d)) {
            instrument.compare(2);
            instrument.call(2);
            instrument.assign(2);
            instrument.access(1);

            for (v, weight) in graph.outgoing_edges(u) {
                let new_dist = dist_u + weight;
                instrument.access(2);
                instrument.arithmetic(1);
                instrument.assign(2);

                let should_update = match distances[v] {
                    None => true,
                    Some(current_dist) => new_dist < current_dist,
                };
                instrument.compare(1);

                if should_update {
                    instrument.distance_lowered(v, distances[v].unwrap_or_else(W::infinity), new_dist);
                    distances[v] = Some(new_dist);
                    predecessors[v] = Some(u);
                    queue.push(v, new_dist);
                    instrument.assign(2);
                    instrument.call(1);
                }
            }
        }

        instrument.compare(queue.discarded() as u64);

        Ok(ShortestPathResult {
            distances,
            predecessors,
            source,
        })
    }
}
