use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;

use crate::data_structures::UniqueKey;

/// Batched bucket priority queue used by one recursion level.
///
/// Pending `(vertex, key)` pairs live in an ordered sequence of buckets. Each
/// bucket carries an upper-bound key; bucket `i` only holds keys in
/// `(upper[i-1], upper[i]]`, so the smallest keys are always at the front.
/// A side table remembers the best key inserted for every vertex: entries
/// whose key no longer matches it are stale and are dropped lazily.
///
/// Supports:
/// - Insert: binary search over the bucket bounds, amortized O(1) append,
///   median split when a bucket outgrows the capacity `M`
/// - Pull: the at most `M` smallest live entries, in key order, together with
///   a bound separating them from everything left behind
#[derive(Debug)]
pub struct BatchBucketQueue<W>
where
    W: Copy + Ord + Debug,
{
    /// Maximum batch size `M`, also the bucket split threshold
    capacity: usize,

    /// Upper bound `B` on every distance this level cares about
    bound: W,

    /// Buckets in ascending order of their upper bound
    buckets: VecDeque<Bucket<W>>,

    /// Best key inserted so far for every live vertex
    best: HashMap<usize, UniqueKey<W>>,

    /// Number of live entries
    live: usize,
}

/// A bucket in the queue
#[derive(Debug, Clone)]
struct Bucket<W> {
    /// Largest key this bucket may hold
    upper: UniqueKey<W>,

    /// Entries appended in arrival order, possibly stale
    entries: Vec<(usize, UniqueKey<W>)>,
}

/// Result of a [`BatchBucketQueue::pull`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pulled<W> {
    /// Vertices in ascending key order
    pub vertices: Vec<usize>,

    /// Every returned vertex has a distance `<= bound`; every vertex still in
    /// the queue has a key above the returned ones
    pub bound: W,
}

impl<W> BatchBucketQueue<W>
where
    W: Copy + Ord + Debug,
{
    /// Creates a queue with batch capacity `M` and upper bound `B`
    pub fn new(capacity: usize, bound: W) -> Self {
        let mut queue = BatchBucketQueue {
            capacity: 1,
            bound,
            buckets: VecDeque::new(),
            best: HashMap::new(),
            live: 0,
        };
        queue.init(capacity, bound);
        queue
    }

    /// Resets to a single open bucket labelled with `bound` and forgets every key
    pub fn init(&mut self, capacity: usize, bound: W) {
        self.capacity = capacity.max(1);
        self.bound = bound;
        self.buckets.clear();
        self.buckets.push_back(Bucket {
            upper: UniqueKey::ceiling(bound),
            entries: Vec::new(),
        });
        self.best.clear();
        self.live = 0;
    }

    /// Checks if the data structure is empty
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns the number of live vertices
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn bound(&self) -> W {
        self.bound
    }

    /// Returns the live key of a vertex if it has one
    pub fn get(&self, vertex: usize) -> Option<UniqueKey<W>> {
        self.best.get(&vertex).copied()
    }

    /// Inserts a vertex with the given key.
    ///
    /// A no-op (returning false) if the vertex already holds a key that is
    /// smaller or equal. Otherwise the new key replaces the old one.
    pub fn insert(&mut self, vertex: usize, key: UniqueKey<W>) -> bool {
        match self.best.get(&vertex) {
            Some(current) if *current <= key => return false,
            Some(_) => {}
            None => self.live += 1,
        }
        self.best.insert(vertex, key);

        let idx = self.find_bucket(key);
        self.buckets[idx].entries.push((vertex, key));
        if self.buckets[idx].entries.len() > self.capacity {
            self.split_bucket(idx);
        }
        true
    }

    /// Pulls the smallest live entries.
    ///
    /// With at most `M` live entries everything is returned along with the
    /// queue's own bound and the queue ends up empty. Otherwise the `M`
    /// entries strictly smaller than the `(M+1)`-th smallest key are returned,
    /// with that key's distance as the new bound.
    pub fn pull(&mut self) -> Pulled<W> {
        debug_assert_eq!(self.live, self.best.len());

        if self.live <= self.capacity {
            let mut taken = Vec::with_capacity(self.live);
            for bucket in self.buckets.drain(..) {
                for (vertex, key) in bucket.entries {
                    if self.best.get(&vertex) == Some(&key) {
                        self.best.remove(&vertex);
                        taken.push((vertex, key));
                    }
                }
            }
            taken.sort_unstable_by_key(|&(_, key)| key);

            let bound = self.bound;
            self.init(self.capacity, bound);
            return Pulled {
                vertices: taken.into_iter().map(|(vertex, _)| vertex).collect(),
                bound,
            };
        }

        // Gather whole buckets from the front until M+1 live entries are in
        // hand; bucket ordering guarantees they contain the M+1 smallest keys.
        let mut gathered = Vec::with_capacity(self.capacity + 1);
        let mut last_upper = UniqueKey::ceiling(self.bound);
        while gathered.len() <= self.capacity {
            let Some(bucket) = self.buckets.pop_front() else {
                break;
            };
            last_upper = bucket.upper;
            for (vertex, key) in bucket.entries {
                if self.best.get(&vertex) == Some(&key) {
                    self.best.remove(&vertex);
                    gathered.push((vertex, key));
                }
            }
        }

        let m = self.capacity;
        if gathered.len() <= m {
            // Only reachable if the live counter drifted; hand back what is left.
            gathered.sort_unstable_by_key(|&(_, key)| key);
            let bound = self.bound;
            self.init(self.capacity, bound);
            return Pulled {
                vertices: gathered.into_iter().map(|(vertex, _)| vertex).collect(),
                bound,
            };
        }
        gathered.select_nth_unstable_by_key(m, |&(_, key)| key);
        let boundary = gathered[m].1;
        let rest = gathered.split_off(m);
        gathered.sort_unstable_by_key(|&(_, key)| key);

        for &(vertex, key) in &rest {
            self.best.insert(vertex, key);
        }
        self.buckets.push_front(Bucket {
            upper: last_upper,
            entries: rest,
        });
        if self.buckets[0].entries.len() > self.capacity {
            self.split_bucket(0);
        }

        self.live -= gathered.len();
        Pulled {
            vertices: gathered.into_iter().map(|(vertex, _)| vertex).collect(),
            bound: boundary.distance,
        }
    }

    /// Index of the bucket with the smallest upper bound >= key. Keys above
    /// every bound go to the last bucket.
    fn find_bucket(&self, key: UniqueKey<W>) -> usize {
        let idx = self.buckets.partition_point(|bucket| bucket.upper < key);
        idx.min(self.buckets.len() - 1)
    }

    /// Splits an oversized bucket at its median key
    fn split_bucket(&mut self, idx: usize) {
        let best = &self.best;
        let bucket = &mut self.buckets[idx];
        bucket
            .entries
            .retain(|(vertex, key)| best.get(vertex) == Some(key));
        if bucket.entries.len() <= self.capacity {
            return;
        }

        bucket.entries.sort_unstable_by_key(|&(_, key)| key);
        let median = bucket.entries.len() / 2;
        let upper_half = bucket.entries.split_off(median);
        let new_bucket = Bucket {
            upper: bucket.upper,
            entries: upper_half,
        };
        if let Some(&(_, max_lower)) = bucket.entries.last() {
            bucket.upper = max_lower;
        }

        self.buckets.insert(idx + 1, new_bucket);
    }
}
