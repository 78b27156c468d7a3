//! Spectral helpers: graph Laplacian and its eigenvalues.

use super::store::GraphStore;
use nalgebra::{DMatrix, SymmetricEigen};

/// Unweighted Laplacian `L = D - A` of `graph`.
pub(crate) fn laplacian<G: GraphStore>(graph: &G) -> DMatrix<f64> {
    let n = graph.vertex_count();
    let mut l = DMatrix::<f64>::zeros(n, n);
    for (u, v, _) in graph.edges() {
        l[(u, v)] = -1.0;
        l[(v, u)] = -1.0;
        l[(u, u)] += 1.0;
        l[(v, v)] += 1.0;
    }
    l
}

/// Eigenvalues of the unweighted Laplacian of `graph`, ascending.
pub(crate) fn laplacian_spectrum<G: GraphStore>(graph: &G) -> Vec<f64> {
    if graph.vertex_count() == 0 {
        return Vec::new();
    }
    let eig = SymmetricEigen::new(laplacian(graph));
    let mut eigenvalues: Vec<f64> = eig.eigenvalues.iter().copied().collect();
    eigenvalues.sort_by(|a, b| a.total_cmp(b));
    eigenvalues
}
