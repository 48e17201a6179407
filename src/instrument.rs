//! Operation counting.
//!
//! Every algorithm in the crate takes an instrument by `&mut` and reports the
//! elementary operations it performs: comparisons, assignments, memory
//! accesses, arithmetic and procedure invocations. Counting is observational
//! only; an instrument never influences control flow or results.

use serde::Serialize;

/// Sink for elementary operation counts.
///
/// All methods default to no-ops so that an implementation only overrides
/// what it cares about.
pub trait Instrument {
    fn compare(&mut self, _n: u64) {}
    fn assign(&mut self, _n: u64) {}
    fn access(&mut self, _n: u64) {}
    fn arithmetic(&mut self, _n: u64) {}
    fn call(&mut self, _n: u64) {}

    /// Called every time a shared distance entry is lowered.
    ///
    /// `previous` is the value before the write, `current` the value after it.
    fn distance_lowered<W: PartialOrd + Copy>(&mut self, _vertex: usize, _previous: W, _current: W) {}
}

/// Instrument that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopInstrument;

impl Instrument for NoopInstrument {}

/// Per-category operation counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub comparisons: u64,
    pub assignments: u64,
    pub accesses: u64,
    pub arithmetic: u64,
    pub calls: u64,
    /// Number of successful distance decreases
    pub relaxations: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all elementary operations (relaxations are not counted twice)
    pub fn total(&self) -> u64 {
        self.comparisons + self.assignments + self.accesses + self.arithmetic + self.calls
    }
}

impl Instrument for Metrics {
    fn compare(&mut self, n: u64) {
        self.comparisons += n;
    }

    fn assign(&mut self, n: u64) {
        self.assignments += n;
    }

    fn access(&mut self, n: u64) {
        self.accesses += n;
    }

    fn arithmetic(&mut self, n: u64) {
        self.arithmetic += n;
    }

    fn call(&mut self, n: u64) {
        self.calls += n;
    }

    fn distance_lowered<W: PartialOrd + Copy>(&mut self, _vertex: usize, _previous: W, _current: W) {
        self.relaxations += 1;
    }
}
