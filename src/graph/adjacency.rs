//! Dense adjacency indicator.

use super::store::GraphStore;

/// Symmetric `N x N` edge indicator.
///
/// `get(u, v) == 1` iff edge `(u, v)` exists. The annealer keeps one of
/// these alongside the graph store for O(1) move legality checks; every
/// write goes to both cells so the matrix never becomes asymmetric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    n: usize,
    cells: Vec<u8>,
}

impl AdjacencyMatrix {
    /// An all-zero indicator over `n` vertices.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            cells: vec![0; n * n],
        }
    }

    /// Builds the indicator from the current edges of `graph`.
    pub fn from_graph<G: GraphStore>(graph: &G) -> Self {
        let mut matrix = Self::new(graph.vertex_count());
        for (u, v, _) in graph.edges() {
            matrix.set(u, v);
        }
        matrix
    }

    /// Number of vertices.
    pub fn dimension(&self) -> usize {
        self.n
    }

    /// Indicator value for the pair `(u, v)`: `1` if connected, else `0`.
    pub fn get(&self, u: usize, v: usize) -> u8 {
        self.cells[u * self.n + v]
    }

    /// Returns `true` if `(u, v)` is marked as an edge.
    pub fn contains(&self, u: usize, v: usize) -> bool {
        self.get(u, v) == 1
    }

    /// Marks `(u, v)` and `(v, u)` as connected.
    pub fn set(&mut self, u: usize, v: usize) {
        self.cells[u * self.n + v] = 1;
        self.cells[v * self.n + u] = 1;
    }

    /// Clears `(u, v)` and `(v, u)`.
    pub fn clear(&mut self, u: usize, v: usize) {
        self.cells[u * self.n + v] = 0;
        self.cells[v * self.n + u] = 0;
    }

    /// Number of undirected edges marked.
    pub fn edge_count(&self) -> usize {
        (0..self.n)
            .map(|u| ((u + 1)..self.n).filter(|&v| self.contains(u, v)).count())
            .sum()
    }
}
