//! Connectivity-preserving Simulated Annealing over graph topologies.
//!
//! Each inner iteration draws a random edge perturbation, checks it
//! against the move model, applies it, undoes it if it split the graph,
//! and otherwise keeps or undoes it by the Metropolis criterion. The best
//! state seen is retained as an independent snapshot. Temperature follows
//! a cooling schedule until it reaches a floor.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"
//! - Xiao & Boyd (2004), "Fast linear iterations for distributed averaging"

mod annealer;
mod config;
mod observer;
mod runner;

pub use annealer::{metropolis_accept, AnnealStats, Annealer, Phase, StepOutcome};
pub use config::{
    AnnealConfig, ConnectivityCheck, CoolingSchedule, ResultPolicy, MAX_TEMPERATURE_STEPS,
};
pub use observer::{AnnealObserver, NoopObserver, SampleRecorder, TemperatureSample};
pub use runner::{AnnealResult, AnnealRunner};
