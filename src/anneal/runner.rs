//! Solve entry points.

use super::annealer::{AnnealStats, Annealer};
use super::config::AnnealConfig;
use super::observer::{AnnealObserver, NoopObserver};
use crate::energy::EnergyFunction;
use crate::error::AnnealError;
use crate::graph::{GraphAnalytics, GraphStore, TopologyRepair};
use tracing::info;
use u_numflow::random::create_rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of a topology annealing solve.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealResult<G> {
    /// The graph selected by the result policy (best seen by default).
    pub graph: G,

    /// Energy of `graph`.
    pub energy: f64,

    /// Lowest energy seen during the solve.
    pub best_energy: f64,

    /// Temperature when the solve stopped.
    pub final_temperature: f64,

    /// Number of temperature steps run.
    pub temperature_steps: usize,

    /// Move counters.
    pub stats: AnnealStats,

    /// Best energy at the start and after every temperature step.
    pub energy_history: Vec<f64>,
}

/// Runs topology annealing solves.
///
/// # Usage
///
/// ```
/// use u_netanneal::anneal::{AnnealConfig, AnnealRunner};
/// use u_netanneal::energy::EnergyFunction;
/// use u_netanneal::graph::{GraphStore, NearestNeighbourPath, SpectralAnalytics, Topology};
///
/// let mut rng = u_numflow::random::create_rng(1);
/// let graph = Topology::random(8, 100.0, &mut rng);
/// let energy = EnergyFunction::<SpectralAnalytics>::default();
/// let config = AnnealConfig::default()
///     .with_initial_temperature(100.0)
///     .with_min_temperature(1.0)
///     .with_iterations_per_temperature(20)
///     .with_seed(42);
///
/// let result = AnnealRunner::solve(graph, &NearestNeighbourPath, &energy, &config).unwrap();
/// assert!(result.graph.is_connected());
/// ```
pub struct AnnealRunner;

impl AnnealRunner {
    /// Anneals a connected graph.
    pub fn run<G: GraphStore, A: GraphAnalytics>(
        graph: G,
        energy: &EnergyFunction<A>,
        config: &AnnealConfig,
    ) -> Result<AnnealResult<G>, AnnealError> {
        Self::run_with_observer(graph, energy, config, &mut NoopObserver)
    }

    /// Anneals a connected graph, reporting temperature steps to `observer`.
    pub fn run_with_observer<G: GraphStore, A: GraphAnalytics, O: AnnealObserver>(
        graph: G,
        energy: &EnergyFunction<A>,
        config: &AnnealConfig,
        observer: &mut O,
    ) -> Result<AnnealResult<G>, AnnealError> {
        let mut annealer = Annealer::new(graph, energy, config)?;

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        info!(
            vertices = annealer.graph().vertex_count(),
            edges = annealer.graph().edge_count(),
            strategy = %energy.strategy(),
            energy = annealer.current_energy(),
            planned_steps = config.temperature_steps(),
            "starting topology anneal"
        );

        annealer.run_to_floor(&mut rng, observer);
        let result = annealer.into_result();

        info!(
            energy = result.energy,
            best_energy = result.best_energy,
            steps = result.temperature_steps,
            accepted = result.stats.accepted_moves,
            iterations = result.stats.iterations,
            "topology anneal finished"
        );
        Ok(result)
    }

    /// Repairs `graph` if it is disconnected, then anneals it.
    ///
    /// # Errors
    ///
    /// [`AnnealError::RepairFailed`] if the graph is still disconnected
    /// after `repair`, plus everything [`run`](Self::run) reports.
    pub fn solve<G: GraphStore, A: GraphAnalytics, P: TopologyRepair>(
        mut graph: G,
        repair: &P,
        energy: &EnergyFunction<A>,
        config: &AnnealConfig,
    ) -> Result<AnnealResult<G>, AnnealError> {
        if !graph.is_connected() {
            let before = graph.edge_count();
            repair.make_connected(&mut graph);
            if !graph.is_connected() {
                return Err(AnnealError::RepairFailed);
            }
            info!(
                added_edges = graph.edge_count() - before,
                "repaired disconnected starting topology"
            );
        }
        Self::run(graph, energy, config)
    }

    /// Runs `restarts` independent solves from copies of `graph` and keeps
    /// the one with the lowest energy.
    ///
    /// Restart `i` uses seed `seed + i` when a seed is configured. With the
    /// `parallel` feature the restarts run on the rayon thread pool; each
    /// owns its own graph copy.
    pub fn run_restarts<G, A>(
        graph: &G,
        energy: &EnergyFunction<A>,
        config: &AnnealConfig,
        restarts: usize,
    ) -> Result<AnnealResult<G>, AnnealError>
    where
        G: GraphStore + Send + Sync,
        A: GraphAnalytics,
    {
        if restarts == 0 {
            return Err(AnnealError::InvalidConfig("restarts must be at least 1".into()));
        }

        let solve_one = |i: usize| {
            let mut restart_config = config.clone();
            restart_config.seed = Some(match config.seed {
                Some(seed) => seed.wrapping_add(i as u64),
                None => rand::random(),
            });
            Self::run(graph.snapshot(), energy, &restart_config)
        };

        #[cfg(feature = "parallel")]
        let results: Vec<_> = (0..restarts).into_par_iter().map(solve_one).collect();
        #[cfg(not(feature = "parallel"))]
        let results: Vec<_> = (0..restarts).map(solve_one).collect();

        let mut best: Option<AnnealResult<G>> = None;
        for result in results {
            let result = result?;
            if best.as_ref().is_none_or(|b| result.energy < b.energy) {
                best = Some(result);
            }
        }
        best.ok_or(AnnealError::InvalidConfig("restarts must be at least 1".into()))
    }
}
