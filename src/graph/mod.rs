//! Graph state and the analytics the annealer consumes.
//!
//! The annealing engine never inspects graph internals directly. It talks
//! to three narrow capabilities:
//!
//! - [`GraphStore`]: owns vertices and weighted edges, answers connectivity
//!   queries and produces independent snapshots.
//! - [`GraphAnalytics`]: pure scalar measurements of a graph (edge cost,
//!   consensus convergence rate).
//! - [`TopologyRepair`]: turns a disconnected starting topology into a
//!   connected one before the search begins.
//!
//! [`Topology`], [`SpectralAnalytics`], [`PathRepair`] and
//! [`NearestNeighbourPath`] are the default implementations.

mod adjacency;
mod analytics;
mod repair;
mod spectral;
mod store;
mod topology;

pub use adjacency::AdjacencyMatrix;
pub use analytics::{GraphAnalytics, SpectralAnalytics};
pub use repair::{NearestNeighbourPath, PathRepair, TopologyRepair};
pub use store::GraphStore;
pub use topology::{GraphError, Point, Topology};
