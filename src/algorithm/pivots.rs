use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Debug;

use log::trace;
use num_traits::{Float, Zero};

use crate::algorithm::params::BmsspParams;
use crate::algorithm::state::RunState;
use crate::graph::Graph;
use crate::instrument::Instrument;

/// Output of pivot selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotSelection {
    /// Frontier vertices chosen to seed the next level; never empty for a
    /// non-empty frontier
    pub pivots: Vec<usize>,

    /// Vertices whose tentative distance improved below the bound during the
    /// relaxation rounds, in discovery order
    pub discovered: Vec<usize>,
}

/// Tentative distances layered over the shared array. Writes stay local to
/// one pivot selection.
struct Overlay<'a, W> {
    base: &'a [W],
    local: HashMap<usize, W>,
}

impl<'a, W: Copy> Overlay<'a, W> {
    fn get(&self, vertex: usize) -> W {
        self.local.get(&vertex).copied().unwrap_or(self.base[vertex])
    }
}

/// Narrows `frontier` down to the vertices worth recursing on.
///
/// Runs `pivot_rounds` rounds of relaxation from the frontier on a
/// temporary copy of the distances, restricted to values below `bound`. Then
/// each frontier vertex gets a reachability search capped at `pivot_bfs_cap`
/// vertices; those reaching at least `pivot_reach` vertices under the bound
/// become pivots. With no qualifying vertex the whole frontier is returned.
pub fn find_pivots<W, G, I>(
    graph: &G,
    state: &RunState<W>,
    params: &BmsspParams,
    frontier: &[usize],
    bound: W,
    instrument: &mut I,
) -> PivotSelection
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
    I: Instrument,
{
    instrument.call(1);
    let mut overlay = Overlay {
        base: &state.dist,
        local: HashMap::new(),
    };

    let mut discovered = Vec::new();
    let mut seen = HashSet::new();
    let mut layer: Vec<usize> = frontier.to_vec();

    for _ in 0..params.pivot_rounds {
        if layer.is_empty() {
            break;
        }
        let mut next = Vec::new();
        let mut queued = HashSet::new();

        for &u in &layer {
            let dist_u = overlay.get(u);
            instrument.access(1);
            for (v, weight) in graph.outgoing_edges(u) {
                let candidate = dist_u + weight;
                instrument.arithmetic(1);
                instrument.compare(2);
                if candidate < bound && candidate < overlay.get(v) {
                    overlay.local.insert(v, candidate);
                    instrument.assign(1);
                    if seen.insert(v) {
                        discovered.push(v);
                    }
                    if queued.insert(v) {
                        next.push(v);
                    }
                }
            }
        }
        layer = next;
    }

    let mut pivots = Vec::new();
    for &root in frontier {
        let reach = bounded_reach(graph, &overlay, root, bound, params.pivot_bfs_cap, instrument);
        instrument.compare(1);
        if reach >= params.pivot_reach {
            pivots.push(root);
        }
    }

    if pivots.is_empty() {
        pivots = frontier.to_vec();
        instrument.assign(1);
    }

    trace!(
        "find_pivots: |S|={} -> {} pivots, |W|={}",
        frontier.len(),
        pivots.len(),
        discovered.len()
    );

    PivotSelection { pivots, discovered }
}

/// Breadth-first count of vertices reachable from `root` whose tentative
/// distance is below `bound`, stopping once `cap` vertices have been visited.
fn bounded_reach<W, G, I>(
    graph: &G,
    overlay: &Overlay<'_, W>,
    root: usize,
    bound: W,
    cap: usize,
    instrument: &mut I,
) -> usize
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
    I: Instrument,
{
    instrument.call(1);
    let mut visited = HashSet::from([root]);
    let mut queue = VecDeque::from([root]);
    let mut reached = 0;

    while let Some(u) = queue.pop_front() {
        for (v, _) in graph.outgoing_edges(u) {
            instrument.access(1);
            instrument.compare(1);
            if overlay.get(v) < bound && visited.insert(v) {
                reached += 1;
                if reached >= cap {
                    return reached;
                }
                queue.push_back(v);
            }
        }
    }

    reached
}
