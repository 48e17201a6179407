use std::fmt::Debug;

use num_traits::{Float, Zero};

use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::graph::Graph;
use crate::instrument::Instrument;
use crate::{Error, Result};

/// Bellman-Ford baseline.
///
/// Relaxes every edge up to `n - 1` times, stopping early once a full round
/// changes nothing. Unlike the rest of the crate it tolerates negative
/// weights and reports a negative cycle reachable from the source as
/// [`Error::NegativeCycle`].
#[derive(Debug, Default)]
pub struct BellmanFord;

impl BellmanFord {
    pub fn new() -> Self {
        BellmanFord
    }

    /// Runs one extra relaxation round over a finished distance vector; any
    /// improvement means a negative cycle is reachable.
    pub fn has_negative_cycle<W, G>(&self, graph: &G, distances: &[Option<W>]) -> bool
    where
        W: Float + Zero + Debug + Copy,
        G: Graph<W>,
    {
        (0..graph.vertex_count()).any(|u| match distances[u] {
            Some(dist_u) => graph.outgoing_edges(u).any(|(v, weight)| match distances[v] {
                Some(dist_v) => dist_u + weight < dist_v,
                None => true,
            }),
            None => false,
        })
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for BellmanFord
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "BellmanFord"
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
        let mut distances: Vec<Option<W>> = vec![None; n];
        let mut predecessors: Vec<Option<usize>> = vec![None; n];
        instrument.assign(2 * n as u64);

        distances[source] = Some(W::zero());
        instrument.assign(1);

        for _round in 0..n.saturating_sub(1) {
            instrument.compare(1);
            let mut relaxed = false;
            instrument.assign(1);

            for u in 0..n {
                instrument.access(1);
                let Some(dist_u) = distances[u] else {
                    instrument.compare(1);
                    continue;
                };

                for (v, weight) in graph.outgoing_edges(u) {
                    instrument.access(3);
                    let new_dist = dist_u + weight;
                    instrument.arithmetic(1);
                    instrument.assign(1);

                    let improves = match distances[v] {
                        None => true,
                        Some(current) => new_dist < current,
                    };
                    instrument.compare(1);

                    if improves {
                        instrument.distance_lowered(v, distances[v].unwrap_or_else(W::infinity), new_dist);
                        distances[v] = Some(new_dist);
                        predecessors[v] = Some(u);
                        relaxed = true;
                        instrument.access(2);
                        instrument.assign(2);
                    }
                }
            }

            if !relaxed {
                instrument.compare(1);
                break;
            }
        }

        if self.has_negative_cycle(graph, &distances) {
            return Err(Error::NegativeCycle(source));
        }

        Ok(ShortestPathResult {
            distances,
            predecessors,
            source,
        })
    }
}
