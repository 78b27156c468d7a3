//! The move model over graph topologies.
//!
//! Three perturbations are legal on an undirected simple graph:
//!
//! - [`Move::Add`]: insert a missing edge.
//! - [`Move::Remove`]: delete an existing edge.
//! - [`Move::Relocate`]: move one endpoint of an existing edge to a vertex
//!   the origin is not yet adjacent to.
//!
//! [`MoveModel`] checks legality before any mutation, applies legal moves
//! to the graph store and its adjacency indicator together, and undoes
//! them exactly.

mod model;
mod types;

pub use model::{AppliedMove, MoveModel};
pub use types::{Move, MoveError, MoveKind};
