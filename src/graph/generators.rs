use crate::graph::loader::EdgeList;
use crate::graph::{DirectedGraph, MutableGraph};
use log::debug;
use ordered_float::OrderedFloat;
use rand::prelude::*;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Edge density class of a synthetic benchmark graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Density {
    /// E ≈ V
    Low,
    /// E ≈ V log2 V
    Medium,
    /// E ≈ V² / 2
    High,
}

impl Density {
    pub const ALL: [Density; 3] = [Density::Low, Density::Medium, Density::High];

    /// Target edge count for a graph with `n` vertices, capped at `n (n - 1)`
    pub fn target_edges(self, n: usize) -> usize {
        let max_edges = n.saturating_mul(n.saturating_sub(1));
        let target = match self {
            Density::Low => n,
            Density::Medium => (n as f64 * (n.max(1) as f64).log2()) as usize,
            Density::High => n.saturating_mul(n) / 2,
        };
        target.min(max_edges)
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Density::Low => write!(f, "low"),
            Density::Medium => write!(f, "medium"),
            Density::High => write!(f, "high"),
        }
    }
}

impl FromStr for Density {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Density::Low),
            "medium" => Ok(Density::Medium),
            "high" => Ok(Density::High),
            other => Err(crate::Error::Config(format!("unknown density '{}'", other))),
        }
    }
}

fn random_weight(rng: &mut StdRng) -> OrderedFloat<f64> {
    OrderedFloat(rng.gen_range(1..=100) as f64)
}

/// Generates a benchmark graph of the given density with integer weights in [1, 100].
///
/// Low and medium graphs start from a random arborescence rooted at vertex 0
/// (every vertex `i > 0` gets an edge from some `j < i`), so everything is
/// reachable from 0. High density graphs take the first `V² / 2` ordered
/// pairs.
pub fn generate_density(density: Density, n: usize, seed: u64) -> EdgeList<OrderedFloat<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let target = density.target_edges(n);
    let mut edges = Vec::with_capacity(target);

    match density {
        Density::Low | Density::Medium => {
            let mut used = HashSet::with_capacity(target);
            for i in 1..n {
                let parent = rng.gen_range(0..i);
                used.insert((parent, i));
                edges.push((parent, i, random_weight(&mut rng)));
            }

            let mut extra = target.saturating_sub(edges.len());
            while extra > 0 && used.len() < n * n.saturating_sub(1) {
                let u = rng.gen_range(0..n);
                let v = rng.gen_range(0..n);
                if u != v && used.insert((u, v)) {
                    edges.push((u, v, random_weight(&mut rng)));
                    extra -= 1;
                }
            }
        }
        Density::High => {
            'outer: for u in 0..n {
                for v in 0..n {
                    if edges.len() >= target {
                        break 'outer;
                    }
                    if u != v {
                        edges.push((u, v, random_weight(&mut rng)));
                    }
                }
            }
        }
    }

    debug!("Generated {} graph: V={}, E={}", density, n, edges.len());
    EdgeList {
        vertex_count: n,
        edges,
    }
}

/// Generates `m` random edges over `n` vertices with integer weights in
/// `[0, max_weight]`. Self-loops, parallel edges and zero weights are all
/// allowed, which makes this a good stress input for equivalence checks.
pub fn generate_random(n: usize, m: usize, max_weight: u32, seed: u64) -> DirectedGraph<OrderedFloat<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = DirectedGraph::with_capacity(n);
    if n == 0 {
        return graph;
    }
    for _ in 0..m {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        let weight = OrderedFloat(rng.gen_range(0..=max_weight) as f64);
        graph.add_edge(u, v, weight);
    }
    graph
}

/// Generates a width x height grid with edges in all four directions.
/// Weights are derived from the coordinates so the graph is deterministic
/// but not uniform.
pub fn generate_grid(width: usize, height: usize) -> DirectedGraph<OrderedFloat<f64>> {
    let mut graph = DirectedGraph::with_capacity(width * height);
    let index = |x: usize, y: usize| y * width + x;

    for y in 0..height {
        for x in 0..width {
            let current = index(x, y);
            let weight = OrderedFloat(((x * 7 + y * 13) % 9 + 1) as f64);
            if x + 1 < width {
                graph.add_edge(current, index(x + 1, y), weight);
                graph.add_edge(index(x + 1, y), current, weight);
            }
            if y + 1 < height {
                graph.add_edge(current, index(x, y + 1), weight);
                graph.add_edge(index(x, y + 1), current, weight);
            }
        }
    }

    graph
}

/// Generates a directed path 0 -> 1 -> ... -> n-1 with a constant weight
pub fn generate_path(n: usize, weight: f64) -> DirectedGraph<OrderedFloat<f64>> {
    let mut graph = DirectedGraph::with_capacity(n);
    for v in 1..n {
        graph.add_edge(v - 1, v, OrderedFloat(weight));
    }
    graph
}
