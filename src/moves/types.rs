//! Topology perturbations.

use thiserror::Error;

/// The kind of a [`Move`], without its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveKind {
    Add,
    Remove,
    Relocate,
}

/// A single perturbation of the edge set.
///
/// A `Relocate` is one logical move: it removes `(origin, old_dest)` and
/// adds `(origin, new_dest)`, and it is applied and undone as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Move {
    /// Insert edge `(u, v)`.
    Add(usize, usize),
    /// Delete edge `(u, v)`.
    Remove(usize, usize),
    /// Move the far endpoint of edge `(origin, old_dest)` to `new_dest`.
    Relocate {
        origin: usize,
        old_dest: usize,
        new_dest: usize,
    },
}

impl Move {
    pub fn kind(&self) -> MoveKind {
        match self {
            Move::Add(..) => MoveKind::Add,
            Move::Remove(..) => MoveKind::Remove,
            Move::Relocate { .. } => MoveKind::Relocate,
        }
    }

    /// The move that exactly undoes this one.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_netanneal::moves::Move;
    ///
    /// let mv = Move::Relocate { origin: 0, old_dest: 1, new_dest: 2 };
    /// assert_eq!(mv.inverse(), Move::Relocate { origin: 0, old_dest: 2, new_dest: 1 });
    /// assert_eq!(mv.inverse().inverse(), mv);
    /// ```
    pub fn inverse(&self) -> Move {
        match *self {
            Move::Add(u, v) => Move::Remove(u, v),
            Move::Remove(u, v) => Move::Add(u, v),
            Move::Relocate {
                origin,
                old_dest,
                new_dest,
            } => Move::Relocate {
                origin,
                old_dest: new_dest,
                new_dest: old_dest,
            },
        }
    }

    /// The vertex pair that loses its direct edge, if any.
    ///
    /// After applying the move the graph stays connected iff this pair is
    /// still joined by some path.
    pub fn severed(&self) -> Option<(usize, usize)> {
        match *self {
            Move::Add(..) => None,
            Move::Remove(u, v) => Some((u, v)),
            Move::Relocate {
                origin, old_dest, ..
            } => Some((origin, old_dest)),
        }
    }

    /// Every vertex id the move touches.
    pub fn vertices(&self) -> Vec<usize> {
        match *self {
            Move::Add(u, v) | Move::Remove(u, v) => vec![u, v],
            Move::Relocate {
                origin,
                old_dest,
                new_dest,
            } => vec![origin, old_dest, new_dest],
        }
    }
}

/// Why a proposed move is structurally illegal.
///
/// Illegal proposals are a normal outcome of random sampling: the
/// annealer discards them without touching any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("edge ({0}, {0}) would be a self loop")]
    SelfLoop(usize),

    #[error("vertex {vertex} out of range for {count} vertices")]
    OutOfRange { vertex: usize, count: usize },

    #[error("edge ({0}, {1}) already exists")]
    EdgeExists(usize, usize),

    #[error("edge ({0}, {1}) does not exist")]
    EdgeMissing(usize, usize),

    #[error("relocate of edge ({origin}, {dest}) onto the same destination")]
    DegenerateRelocate { origin: usize, dest: usize },
}
