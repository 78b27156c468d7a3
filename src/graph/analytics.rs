//! Scalar graph measurements.

use super::adjacency::AdjacencyMatrix;
use super::spectral::laplacian_spectrum;
use super::store::GraphStore;

/// Pure measurements over a graph state.
///
/// Implementations must not mutate or retain the graph. The annealer
/// calls these once per evaluated move, so they dominate the run time of
/// a solve.
pub trait GraphAnalytics: Send + Sync {
    /// Total weighted edge cost. Lower is cheaper.
    fn edge_cost<G: GraphStore>(&self, graph: &G) -> f64;

    /// Consensus convergence rate in `[0, 1]`. Lower converges faster;
    /// `1.0` means the averaging process never converges.
    fn convergence_rate<G: GraphStore>(&self, graph: &G) -> f64;

    /// Dense edge indicator of `graph`.
    fn neighbour_matrix<G: GraphStore>(&self, graph: &G) -> AdjacencyMatrix {
        AdjacencyMatrix::from_graph(graph)
    }
}

/// Analytics based on the Laplacian spectrum.
///
/// The convergence rate is the per-step contraction factor of distributed
/// averaging `x <- (I - a L) x` under the best constant edge weight
/// `a = 2 / (λ2 + λn)`, which evaluates to `(λn - λ2) / (λn + λ2)` where
/// `λ2` is the algebraic connectivity and `λn` the largest Laplacian
/// eigenvalue.
///
/// # Examples
///
/// ```
/// use u_netanneal::graph::{GraphAnalytics, Point, SpectralAnalytics, Topology};
///
/// let positions = (0..3).map(|i| Point::new(i as f64, 0.0)).collect();
/// let path = Topology::with_edges(positions, &[(0, 1), (1, 2)]).unwrap();
///
/// let analytics = SpectralAnalytics::new();
/// assert!((analytics.edge_cost(&path) - 2.0).abs() < 1e-12);
/// assert!((analytics.convergence_rate(&path) - 0.5).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SpectralAnalytics {
    /// Algebraic connectivity at or below this counts as disconnected.
    pub connectivity_tolerance: f64,
}

impl Default for SpectralAnalytics {
    fn default() -> Self {
        Self {
            connectivity_tolerance: 1e-9,
        }
    }
}

impl SpectralAnalytics {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GraphAnalytics for SpectralAnalytics {
    fn edge_cost<G: GraphStore>(&self, graph: &G) -> f64 {
        graph.edges().iter().map(|&(_, _, weight)| weight).sum()
    }

    fn convergence_rate<G: GraphStore>(&self, graph: &G) -> f64 {
        let n = graph.vertex_count();
        if n <= 1 {
            return 0.0;
        }
        let eigenvalues = laplacian_spectrum(graph);
        let lambda_2 = eigenvalues[1];
        let lambda_n = eigenvalues[n - 1];
        if lambda_2 <= self.connectivity_tolerance {
            return 1.0;
        }
        ((lambda_n - lambda_2) / (lambda_n + lambda_2)).clamp(0.0, 1.0)
    }
}
