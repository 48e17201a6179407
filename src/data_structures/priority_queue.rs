use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Debug;

/// Min-heap with lazy decrease-key, shared by the Dijkstra-style loops
/// (oracle, base case, correction pass).
///
/// Lowering a priority is a plain `push`; the outdated entry stays behind and
/// is discarded by [`pop_live`](LazyMinHeap::pop_live) once it surfaces.
#[derive(Debug)]
pub struct LazyMinHeap<V, P>
where
    V: Copy + Ord + Debug,
    P: Copy + Ord + Debug,
{
    heap: BinaryHeap<Reverse<(P, V)>>,

    /// Entries dropped as stale so far
    discarded: usize,
}

impl<V, P> Default for LazyMinHeap<V, P>
where
    V: Copy + Ord + Debug,
    P: Copy + Ord + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, P> LazyMinHeap<V, P>
where
    V: Copy + Ord + Debug,
    P: Copy + Ord + Debug,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        LazyMinHeap {
            heap: BinaryHeap::with_capacity(capacity),
            discarded: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of entries held, stale ones included
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn discarded(&self) -> usize {
        self.discarded
    }

    pub fn push(&mut self, item: V, priority: P) {
        self.heap.push(Reverse((priority, item)));
    }

    /// Removes the entry with the smallest priority, stale or not
    pub fn pop(&mut self) -> Option<(V, P)> {
        self.heap.pop().map(|Reverse((priority, item))| (item, priority))
    }

    /// Pops until an entry passes `is_live`, dropping everything before it
    pub fn pop_live<F>(&mut self, mut is_live: F) -> Option<(V, P)>
    where
        F: FnMut(V, P) -> bool,
    {
        while let Some((item, priority)) = self.pop() {
            if is_live(item, priority) {
                return Some((item, priority));
            }
            self.discarded += 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_priority_order() {
        let mut heap = LazyMinHeap::new();
        heap.push(1usize, 30u32);
        heap.push(2, 10);
        heap.push(3, 20);
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.pop(), Some((2, 10)));
        assert_eq!(heap.pop(), Some((3, 20)));
        assert_eq!(heap.pop(), Some((1, 30)));
        assert!(heap.is_empty());
    }

    #[test]
    fn stale_entries_are_skipped() {
        let current = [5u32, 1, 7];
        let mut heap = LazyMinHeap::new();
        heap.push(0usize, 9u32);
        heap.push(0, 5);
        heap.push(1, 4);
        heap.push(1, 1);
        heap.push(2, 7);

        let mut order = Vec::new();
        while let Some((v, _)) = heap.pop_live(|v, p| current[v] == p) {
            order.push(v);
        }
        assert_eq!(order, vec![1, 0, 2]);
        assert_eq!(heap.discarded(), 2);
    }
}
