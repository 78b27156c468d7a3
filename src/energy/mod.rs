//! Pluggable energy functions.
//!
//! An [`EnergyFunction`] wraps a [`GraphAnalytics`](crate::graph::GraphAnalytics)
//! implementation behind one of three [`EnergyStrategy`] variants. The
//! annealer treats it as an opaque `graph -> f64` map.

mod strategy;

pub use strategy::{combined_energy, EnergyFunction, EnergyStrategy, RATE_EPSILON};
