//! Connectivity repair for starting topologies.

use super::store::GraphStore;

/// Makes a possibly disconnected graph connected by adding edges.
///
/// Repairs never remove edges. After `make_connected` returns, the graph
/// is expected to be connected; the runner verifies this and reports
/// [`AnnealError::RepairFailed`](crate::AnnealError::RepairFailed) otherwise.
pub trait TopologyRepair {
    fn make_connected<G: GraphStore>(&self, graph: &mut G);
}

/// Threads a path through the vertices in id order: `0-1-2-...-(n-1)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathRepair;

impl TopologyRepair for PathRepair {
    fn make_connected<G: GraphStore>(&self, graph: &mut G) {
        for u in 1..graph.vertex_count() {
            link(graph, u - 1, u);
        }
    }
}

/// Greedy nearest-neighbour path.
///
/// Starts at vertex 0 and repeatedly walks to the unvisited vertex with
/// the cheapest [`proposed_weight`](GraphStore::proposed_weight), adding
/// each step's edge. Produces a much cheaper spanning path than
/// [`PathRepair`] when weights reflect geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighbourPath;

impl TopologyRepair for NearestNeighbourPath {
    fn make_connected<G: GraphStore>(&self, graph: &mut G) {
        let n = graph.vertex_count();
        if n <= 1 {
            return;
        }
        let mut visited = vec![false; n];
        let mut current = 0;
        visited[0] = true;

        for _ in 1..n {
            let next = (0..n)
                .filter(|&v| !visited[v])
                .min_by(|&a, &b| {
                    graph
                        .proposed_weight(current, a)
                        .total_cmp(&graph.proposed_weight(current, b))
                });
            let Some(next) = next else { break };
            link(graph, current, next);
            visited[next] = true;
            current = next;
        }
    }
}

fn link<G: GraphStore>(graph: &mut G, u: usize, v: usize) {
    if !graph.has_edge(u, v) {
        let weight = graph.proposed_weight(u, v);
        graph.add_edge(u, v, weight);
    }
}
