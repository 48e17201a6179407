use std::fmt::Debug;

use num_traits::{Float, Zero};

use crate::data_structures::UniqueKey;
use crate::instrument::Instrument;

/// Per-run arrays shared by every recursion level.
///
/// `dist`, `parent` and `depth` are only ever written together, by
/// [`RunState::relax`], and only to lower `dist`. Allocated fresh for every
/// execution and dropped when it returns.
#[derive(Debug, Clone)]
pub struct RunState<W> {
    pub dist: Vec<W>,
    pub parent: Vec<Option<usize>>,
    pub depth: Vec<usize>,
    pub complete: Vec<bool>,
}

impl<W> RunState<W>
where
    W: Float + Zero + Debug + Copy + Ord,
{
    /// Every vertex at +inf except `source`, which starts at 0 with no parent
    pub fn new(n: usize, source: usize, source_depth: usize) -> Self {
        let mut state = RunState {
            dist: vec![W::infinity(); n],
            parent: vec![None; n],
            depth: vec![0; n],
            complete: vec![false; n],
        };
        state.dist[source] = W::zero();
        state.depth[source] = source_depth;
        state
    }

    /// Current ordering key of `vertex`
    #[inline]
    pub fn key(&self, vertex: usize) -> UniqueKey<W> {
        UniqueKey::new(
            self.dist[vertex],
            self.depth[vertex],
            vertex,
            self.parent[vertex],
        )
    }

    #[inline]
    pub fn is_finite(&self, vertex: usize) -> bool {
        self.dist[vertex] < W::infinity()
    }

    /// Relaxes the edge `u -> v`. Writes distance, parent and depth of `v` in
    /// one step when `dist[u] + weight` is a strict improvement, and returns
    /// whether it did.
    #[inline]
    pub fn relax<I: Instrument>(
        &mut self,
        u: usize,
        v: usize,
        weight: W,
        depth: usize,
        instrument: &mut I,
    ) -> bool {
        let candidate = self.dist[u] + weight;
        instrument.access(2);
        instrument.arithmetic(1);
        instrument.compare(1);
        if candidate < self.dist[v] {
            instrument.distance_lowered(v, self.dist[v], candidate);
            self.dist[v] = candidate;
            self.parent[v] = Some(u);
            self.depth[v] = depth;
            instrument.assign(3);
            true
        } else {
            false
        }
    }

    /// Marks a vertex complete, returning true if it was not already
    #[inline]
    pub fn mark_complete(&mut self, vertex: usize) -> bool {
        !std::mem::replace(&mut self.complete[vertex], true)
    }
}
