//! Recursion parameters of the BMSSP engine.
//!
//! `k`, `t` and the level count `L` are derived from `log2(n)`. The
//! thresholds built on top of `k` (pivot relaxation rounds, pivot reach,
//! pivot BFS cap and the base-case limit) can each be overridden; they only
//! shape the recursion and never affect the final distances.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Parameters governing batch sizes and recursion depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BmsspParams {
    /// `ceil(log2(n)^(1/3))`
    pub k: usize,
    /// `ceil(log2(n)^(2/3))`
    pub t: usize,
    /// Top recursion level `L = ceil(log2(n) / t)`
    pub levels: usize,
    /// Rounds of bounded relaxation in pivot selection (default `k`)
    pub pivot_rounds: usize,
    /// Vertices a frontier vertex must reach to become a pivot (default `k`)
    pub pivot_reach: usize,
    /// Cap on vertices visited by each pivot reachability search (default `2k`)
    pub pivot_bfs_cap: usize,
    /// Vertices settled by one base-case Dijkstra (default `k²`)
    pub base_case_limit: usize,
}

/// Partial overrides as read from a configuration file. Missing fields keep
/// the values derived from the vertex count.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ParamOverrides {
    k: Option<usize>,
    t: Option<usize>,
    levels: Option<usize>,
    pivot_rounds: Option<usize>,
    pivot_reach: Option<usize>,
    pivot_bfs_cap: Option<usize>,
    base_case_limit: Option<usize>,
}

impl BmsspParams {
    /// Derives every parameter from the vertex count. All values are at least 1,
    /// also for empty and single-vertex graphs.
    pub fn for_vertex_count(n: usize) -> Self {
        let log_n = if n > 1 { (n as f64).log2() } else { 0.0 };

        let k = (log_n.powf(1.0 / 3.0).ceil() as usize).max(1);
        let t = (log_n.powf(2.0 / 3.0).ceil() as usize).max(1);
        let levels = ((log_n / t as f64).ceil() as usize).max(1);

        let params = Self::from_k(k, t, levels);
        debug!(
            "BMSSP parameters for n={}: k={}, t={}, L={}",
            n, params.k, params.t, params.levels
        );
        params
    }

    fn from_k(k: usize, t: usize, levels: usize) -> Self {
        BmsspParams {
            k,
            t,
            levels,
            pivot_rounds: k,
            pivot_reach: k,
            pivot_bfs_cap: 2 * k,
            base_case_limit: k * k,
        }
    }

    /// Reads overrides from JSON on top of the values derived for `n`
    pub fn from_json(n: usize, json: &str) -> Result<Self> {
        let overrides: ParamOverrides =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;

        let mut params = Self::for_vertex_count(n);
        if let Some(k) = overrides.k {
            params = params.with_k(k);
        }
        if let Some(t) = overrides.t {
            params.t = t;
        }
        if let Some(levels) = overrides.levels {
            params.levels = levels;
        }
        if let Some(rounds) = overrides.pivot_rounds {
            params.pivot_rounds = rounds;
        }
        if let Some(reach) = overrides.pivot_reach {
            params.pivot_reach = reach;
        }
        if let Some(cap) = overrides.pivot_bfs_cap {
            params.pivot_bfs_cap = cap;
        }
        if let Some(limit) = overrides.base_case_limit {
            params.base_case_limit = limit;
        }
        params.validate()?;
        Ok(params)
    }

    /// Sets `k` and re-derives the thresholds that default to multiples of it
    pub fn with_k(mut self, k: usize) -> Self {
        let k = k.max(1);
        self.k = k;
        self.pivot_rounds = k;
        self.pivot_reach = k;
        self.pivot_bfs_cap = 2 * k;
        self.base_case_limit = k * k;
        self
    }

    pub fn with_t(mut self, t: usize) -> Self {
        self.t = t.max(1);
        self
    }

    pub fn with_levels(mut self, levels: usize) -> Self {
        self.levels = levels.max(1);
        self
    }

    pub fn with_pivot_rounds(mut self, rounds: usize) -> Self {
        self.pivot_rounds = rounds.max(1);
        self
    }

    pub fn with_pivot_reach(mut self, reach: usize) -> Self {
        self.pivot_reach = reach.max(1);
        self
    }

    pub fn with_pivot_bfs_cap(mut self, cap: usize) -> Self {
        self.pivot_bfs_cap = cap.max(1);
        self
    }

    pub fn with_base_case_limit(mut self, limit: usize) -> Self {
        self.base_case_limit = limit.max(1);
        self
    }

    /// Rejects zero values, which would stall the recursion
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("k", self.k),
            ("t", self.t),
            ("levels", self.levels),
            ("pivot_rounds", self.pivot_rounds),
            ("pivot_reach", self.pivot_reach),
            ("pivot_bfs_cap", self.pivot_bfs_cap),
            ("base_case_limit", self.base_case_limit),
        ];
        for (name, value) in fields {
            if value == 0 {
                return Err(Error::Config(format!("{} must be at least 1", name)));
            }
        }
        Ok(())
    }

    /// Batch capacity `2^(level * t)` of the queue at `level`, saturating at `usize::MAX`
    pub fn batch_capacity(&self, level: usize) -> usize {
        let shift = level.saturating_mul(self.t);
        if shift >= usize::BITS as usize {
            usize::MAX
        } else {
            1usize << shift
        }
    }
}
