//! The graph storage capability.

use std::collections::VecDeque;

/// Owns the vertex and edge state of an undirected weighted graph.
///
/// Vertices are identified by `0..vertex_count()`. Implementations only
/// need to provide edge bookkeeping and neighbour enumeration; the
/// connectivity queries default to breadth-first search.
///
/// Mutating methods assume valid, distinct vertex ids. Legality of a
/// mutation (self loops, duplicate or missing edges) is decided by the
/// caller before it reaches the store, see
/// [`MoveModel`](crate::moves::MoveModel).
pub trait GraphStore: Clone {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Weight of edge `(u, v)`, or `None` if it does not exist.
    fn edge_weight(&self, u: usize, v: usize) -> Option<f64>;

    /// Returns `true` if edge `(u, v)` exists.
    fn has_edge(&self, u: usize, v: usize) -> bool {
        self.edge_weight(u, v).is_some()
    }

    /// The weight edge `(u, v)` receives when it is added.
    fn proposed_weight(&self, u: usize, v: usize) -> f64;

    /// Inserts edge `(u, v)` with the given weight.
    fn add_edge(&mut self, u: usize, v: usize, weight: f64);

    /// Deletes edge `(u, v)`, returning its weight if it existed.
    fn remove_edge(&mut self, u: usize, v: usize) -> Option<f64>;

    /// Vertices adjacent to `u`.
    fn neighbours(&self, u: usize) -> Vec<usize>;

    /// All edges as `(u, v, weight)` with `u < v`.
    fn edges(&self) -> Vec<(usize, usize, f64)>;

    /// Number of edges.
    fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Returns `true` if a path joins `u` and `v`.
    fn are_connected(&self, u: usize, v: usize) -> bool {
        if u == v {
            return true;
        }
        let mut seen = vec![false; self.vertex_count()];
        let mut queue = VecDeque::from([u]);
        seen[u] = true;
        while let Some(node) = queue.pop_front() {
            for next in self.neighbours(node) {
                if next == v {
                    return true;
                }
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }
        false
    }

    /// Returns `true` if every vertex is reachable from every other.
    ///
    /// The empty graph and the single-vertex graph are connected.
    fn is_connected(&self) -> bool {
        let n = self.vertex_count();
        if n <= 1 {
            return true;
        }
        let mut seen = vec![false; n];
        let mut queue = VecDeque::from([0]);
        seen[0] = true;
        let mut reached = 1;
        while let Some(node) = queue.pop_front() {
            for next in self.neighbours(node) {
                if !seen[next] {
                    seen[next] = true;
                    reached += 1;
                    queue.push_back(next);
                }
            }
        }
        reached == n
    }

    /// An independent deep copy of the current state.
    fn snapshot(&self) -> Self {
        self.clone()
    }
}
