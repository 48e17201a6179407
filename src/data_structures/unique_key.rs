use std::fmt::Debug;

/// Total order over relaxation events.
///
/// Keys compare by distance, then by the recursion depth that produced the
/// distance, then by vertex id, then by parent id (`None` first). Two distinct
/// vertices never share a key, so equal-distance vertices are always ordered
/// the same way no matter which recursion level looks at them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UniqueKey<W> {
    pub distance: W,
    pub depth: usize,
    pub vertex: usize,
    pub parent: Option<usize>,
}

impl<W> UniqueKey<W>
where
    W: Copy + Ord + Debug,
{
    pub fn new(distance: W, depth: usize, vertex: usize, parent: Option<usize>) -> Self {
        UniqueKey {
            distance,
            depth,
            vertex,
            parent,
        }
    }

    /// The largest key with the given distance. Every key whose distance is
    /// `<= distance` compares `<=` to it.
    pub fn ceiling(distance: W) -> Self {
        UniqueKey {
            distance,
            depth: usize::MAX,
            vertex: usize::MAX,
            parent: Some(usize::MAX),
        }
    }
}
