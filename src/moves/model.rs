//! Move legality, application and undo.

use super::types::{Move, MoveError};
use crate::graph::{AdjacencyMatrix, GraphStore};

/// Receipt for a move that has been applied.
///
/// Carries the weight of any removed edge so [`MoveModel::undo`] can
/// restore the exact prior edge set, including weights a store could not
/// recompute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedMove {
    mv: Move,
    removed_weight: Option<f64>,
}

impl AppliedMove {
    /// The move that was applied.
    pub fn applied(&self) -> Move {
        self.mv
    }

    /// Weight of the edge the move removed, if it removed one.
    pub fn removed_weight(&self) -> Option<f64> {
        self.removed_weight
    }
}

/// Validates and applies moves against a graph store.
///
/// The model owns the adjacency indicator used for O(1) legality checks.
/// Every mutation routed through [`apply`](Self::apply) or
/// [`undo`](Self::undo) updates the store and the indicator together, so
/// the two never disagree between calls.
#[derive(Debug, Clone)]
pub struct MoveModel {
    adjacency: AdjacencyMatrix,
}

impl MoveModel {
    /// Creates a model around an indicator that mirrors the graph it will
    /// be used with.
    pub fn new(adjacency: AdjacencyMatrix) -> Self {
        Self { adjacency }
    }

    /// Creates a model whose indicator is built from `graph`.
    pub fn from_graph<G: GraphStore>(graph: &G) -> Self {
        Self::new(AdjacencyMatrix::from_graph(graph))
    }

    pub fn adjacency(&self) -> &AdjacencyMatrix {
        &self.adjacency
    }

    /// Checks whether `mv` is legal in the current state. Never mutates.
    pub fn check(&self, mv: &Move) -> Result<(), MoveError> {
        let count = self.adjacency.dimension();
        if let Some(vertex) = mv.vertices().into_iter().find(|&v| v >= count) {
            return Err(MoveError::OutOfRange { vertex, count });
        }

        match *mv {
            Move::Add(u, v) => self.check_add(u, v),
            Move::Remove(u, v) => self.check_remove(u, v),
            Move::Relocate {
                origin,
                old_dest,
                new_dest,
            } => {
                if old_dest == new_dest {
                    return Err(MoveError::DegenerateRelocate {
                        origin,
                        dest: old_dest,
                    });
                }
                self.check_remove(origin, old_dest)?;
                self.check_add(origin, new_dest)
            }
        }
    }

    /// Applies `mv` if it is legal; an illegal move leaves both the graph
    /// and the indicator untouched.
    pub fn apply<G: GraphStore>(&mut self, graph: &mut G, mv: Move) -> Result<AppliedMove, MoveError> {
        self.check(&mv)?;

        let removed_weight = match mv {
            Move::Add(u, v) => {
                self.insert(graph, u, v, None);
                None
            }
            Move::Remove(u, v) => self.delete(graph, u, v),
            Move::Relocate {
                origin,
                old_dest,
                new_dest,
            } => {
                let weight = self.delete(graph, origin, old_dest);
                self.insert(graph, origin, new_dest, None);
                weight
            }
        };

        Ok(AppliedMove { mv, removed_weight })
    }

    /// Reverts a move previously returned by [`apply`](Self::apply).
    ///
    /// Must be called before any other mutation of the same graph.
    pub fn undo<G: GraphStore>(&mut self, graph: &mut G, applied: AppliedMove) {
        match applied.mv {
            Move::Add(u, v) => {
                self.delete(graph, u, v);
            }
            Move::Remove(u, v) => self.insert(graph, u, v, applied.removed_weight),
            Move::Relocate {
                origin,
                old_dest,
                new_dest,
            } => {
                self.delete(graph, origin, new_dest);
                self.insert(graph, origin, old_dest, applied.removed_weight);
            }
        }
    }

    fn check_add(&self, u: usize, v: usize) -> Result<(), MoveError> {
        if u == v {
            return Err(MoveError::SelfLoop(u));
        }
        if self.adjacency.contains(u, v) {
            return Err(MoveError::EdgeExists(u, v));
        }
        Ok(())
    }

    fn check_remove(&self, u: usize, v: usize) -> Result<(), MoveError> {
        if u == v {
            return Err(MoveError::SelfLoop(u));
        }
        if !self.adjacency.contains(u, v) {
            return Err(MoveError::EdgeMissing(u, v));
        }
        Ok(())
    }

    fn insert<G: GraphStore>(&mut self, graph: &mut G, u: usize, v: usize, weight: Option<f64>) {
        let weight = weight.unwrap_or_else(|| graph.proposed_weight(u, v));
        graph.add_edge(u, v, weight);
        self.adjacency.set(u, v);
    }

    fn delete<G: GraphStore>(&mut self, graph: &mut G, u: usize, v: usize) -> Option<f64> {
        let weight = graph.remove_edge(u, v);
        self.adjacency.clear(u, v);
        weight
    }
}
