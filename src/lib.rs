//! Network topology optimization by connectivity-preserving annealing.
//!
//! Searches the space of connected undirected graphs over a fixed vertex
//! set for a topology that minimizes a cost relevant to distributed
//! average consensus:
//!
//! - **Graph** ([`graph`]): the storage, analytics and repair capabilities
//!   the search consumes, with default implementations (planar
//!   [`Topology`](graph::Topology), Laplacian-spectrum
//!   [`SpectralAnalytics`](graph::SpectralAnalytics)).
//! - **Moves** ([`moves`]): add, remove and relocate perturbations with
//!   pure legality checks and exact undo.
//! - **Energy** ([`energy`]): edge cost, convergence rate, or their
//!   combined ratio, chosen once per solve.
//! - **Annealing** ([`anneal`]): the Metropolis search loop with cooling
//!   schedules, connectivity rollback and best-state retention.
//!
//! # Architecture
//!
//! Like the rest of the U-Engine algorithm layer, this crate carries no
//! plotting, I/O or CLI concerns. The search is single-threaded per solve;
//! independent restarts may run in parallel with the `parallel` feature.

pub mod anneal;
pub mod energy;
mod error;
pub mod graph;
pub mod moves;

pub use error::AnnealError;
