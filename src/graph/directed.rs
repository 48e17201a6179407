use std::fmt::Debug;

use num_traits::{Float, Zero};

use crate::graph::traits::{Graph, MutableGraph};

/// A directed graph implementation using adjacency lists
///
/// Vertices are dense indices in `[0, n)`. Parallel edges and self-loops are
/// kept as given; nothing is ever removed.
#[derive(Debug, Clone)]
pub struct DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Outgoing edges for each vertex: vertex_id -> [(target_vertex, weight)]
    adjacency: Vec<Vec<(usize, W)>>,

    /// Total number of edges across all adjacency lists
    edge_count: usize,
}

impl<W> Default for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Creates a new empty directed graph
    pub fn new() -> Self {
        DirectedGraph {
            adjacency: Vec::new(),
            edge_count: 0,
        }
    }

    /// Creates a new directed graph with the specified number of vertices
    pub fn with_capacity(vertices: usize) -> Self {
        DirectedGraph {
            adjacency: vec![Vec::new(); vertices],
            edge_count: 0,
        }
    }

    /// Builds a graph from an edge list, failing on the first invalid edge
    pub fn from_edges<I>(vertices: usize, edges: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, W)>,
    {
        let mut graph = Self::with_capacity(vertices);
        for (from, to, weight) in edges {
            graph.try_add_edge(from, to, weight)?;
        }
        Ok(graph)
    }

    /// Like [`MutableGraph::add_edge`] but reports why an edge was refused
    pub fn try_add_edge(&mut self, from: usize, to: usize, weight: W) -> crate::Result<()> {
        if !self.has_vertex(from) || !self.has_vertex(to) {
            return Err(crate::Error::InvalidEdge(from, to));
        }
        if weight < W::zero() || weight.is_nan() {
            return Err(crate::Error::NegativeWeight(weight.to_f64().unwrap_or(f64::NAN)));
        }
        self.adjacency[from].push((to, weight));
        self.edge_count += 1;
        Ok(())
    }

    /// Iterates over every edge as `(from, to, weight)`
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, W)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(from, edges)| edges.iter().map(move |&(to, w)| (from, to, w)))
    }

    /// Direct slice access to a vertex's adjacency list
    pub fn neighbors(&self, vertex: usize) -> &[(usize, W)] {
        self.adjacency.get(vertex).map_or(&[], |edges| edges.as_slice())
    }
}

impl<W> Graph<W> for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        Box::new(self.neighbors(vertex).iter().copied())
    }

    fn has_vertex(&self, vertex: usize) -> bool {
        vertex < self.adjacency.len()
    }
}

impl<W> MutableGraph<W> for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn add_vertex(&mut self) -> usize {
        self.adjacency.push(Vec::new());
        self.adjacency.len() - 1
    }

    fn add_edge(&mut self, from: usize, to: usize, weight: W) -> bool {
        self.try_add_edge(from, to, weight).is_ok()
    }
}
