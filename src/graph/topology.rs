//! Default graph store: vertices on a plane, edges weighted by distance.

use super::store::GraphStore;
use rand::Rng;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised while building a [`Topology`] from an explicit edge list.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("vertex {vertex} out of range for a graph with {count} vertices")]
    VertexOutOfRange { vertex: usize, count: usize },

    #[error("self loop on vertex {0} is not allowed")]
    SelfLoop(usize),
}

/// Planar position of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An undirected graph whose vertices have planar positions.
///
/// Adding an edge weights it by the Euclidean distance between its
/// endpoints, so the total edge cost models the physical cost of wiring
/// the network.
///
/// # Examples
///
/// ```
/// use u_netanneal::graph::{GraphStore, Point, Topology};
///
/// let positions = vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0), Point::new(6.0, 8.0)];
/// let graph = Topology::with_edges(positions, &[(0, 1), (1, 2)]).unwrap();
/// assert!(graph.is_connected());
/// assert!((graph.edge_weight(0, 1).unwrap() - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Topology {
    positions: Vec<Point>,
    adjacency: Vec<BTreeMap<usize, f64>>,
    edge_count: usize,
}

impl Topology {
    /// Creates an edgeless topology over the given vertex positions.
    pub fn new(positions: Vec<Point>) -> Self {
        let n = positions.len();
        Self {
            positions,
            adjacency: vec![BTreeMap::new(); n],
            edge_count: 0,
        }
    }

    /// Creates a topology from positions and an explicit edge list.
    ///
    /// Duplicate edges are collapsed.
    pub fn with_edges(positions: Vec<Point>, edges: &[(usize, usize)]) -> Result<Self, GraphError> {
        let mut graph = Self::new(positions);
        let count = graph.vertex_count();
        for &(u, v) in edges {
            for vertex in [u, v] {
                if vertex >= count {
                    return Err(GraphError::VertexOutOfRange { vertex, count });
                }
            }
            if u == v {
                return Err(GraphError::SelfLoop(u));
            }
            if !graph.has_edge(u, v) {
                let weight = graph.proposed_weight(u, v);
                graph.add_edge(u, v, weight);
            }
        }
        Ok(graph)
    }

    /// Creates `n` edgeless vertices at uniform random positions in
    /// `[0, extent) x [0, extent)`.
    pub fn random<R: Rng>(n: usize, extent: f64, rng: &mut R) -> Self {
        let positions = (0..n)
            .map(|_| Point::new(rng.random_range(0.0..extent), rng.random_range(0.0..extent)))
            .collect();
        Self::new(positions)
    }

    /// Vertex positions, indexed by vertex id.
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }
}

impl GraphStore for Topology {
    fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    fn edge_weight(&self, u: usize, v: usize) -> Option<f64> {
        self.adjacency.get(u)?.get(&v).copied()
    }

    fn proposed_weight(&self, u: usize, v: usize) -> f64 {
        self.positions[u].distance(&self.positions[v])
    }

    fn add_edge(&mut self, u: usize, v: usize, weight: f64) {
        debug_assert_ne!(u, v, "self loops are not stored");
        if self.adjacency[u].insert(v, weight).is_none() {
            self.edge_count += 1;
        }
        self.adjacency[v].insert(u, weight);
    }

    fn remove_edge(&mut self, u: usize, v: usize) -> Option<f64> {
        let weight = self.adjacency[u].remove(&v)?;
        self.adjacency[v].remove(&u);
        self.edge_count -= 1;
        Some(weight)
    }

    fn neighbours(&self, u: usize) -> Vec<usize> {
        self.adjacency[u].keys().copied().collect()
    }

    fn edges(&self) -> Vec<(usize, usize, f64)> {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, row)| {
                row.range(u + 1..)
                    .map(move |(&v, &weight)| (u, v, weight))
            })
            .collect()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }
}
