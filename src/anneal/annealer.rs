//! The annealing search state machine.

use super::config::{AnnealConfig, ConnectivityCheck, ResultPolicy};
use super::observer::{AnnealObserver, TemperatureSample};
use super::runner::AnnealResult;
use crate::energy::EnergyFunction;
use crate::error::AnnealError;
use crate::graph::{AdjacencyMatrix, GraphAnalytics, GraphStore};
use crate::moves::{Move, MoveError, MoveModel};
use rand::Rng;
use tracing::{debug, trace};

/// Lifecycle of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, no move proposed yet.
    Initializing,
    /// Temperature above the floor; more steps to run.
    Cooling,
    /// Temperature at or below the floor.
    Terminated,
}

/// What happened to a single proposed move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Structurally illegal; nothing was touched.
    Illegal(MoveError),
    /// Applied, but it split the graph, so it was undone.
    Disconnected,
    /// Applied and evaluated, but the Metropolis test failed, so it was undone.
    Rejected { energy: f64 },
    /// Applied and kept.
    Accepted { energy: f64, new_best: bool },
}

impl StepOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, StepOutcome::Accepted { .. })
    }
}

/// Move counters accumulated over a solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealStats {
    /// Proposed moves, legal or not.
    pub iterations: usize,
    /// Moves kept, including improvements.
    pub accepted_moves: usize,
    /// Moves that strictly lowered the energy.
    pub improving_moves: usize,
    /// Proposals discarded as structurally illegal.
    pub illegal_moves: usize,
    /// Moves undone because they disconnected the graph.
    pub disconnecting_moves: usize,
}

/// Metropolis acceptance criterion.
///
/// Improvements (`delta < 0`) are always accepted, regardless of
/// temperature. Otherwise the move is accepted with probability
/// `exp(-delta / temperature)`. A NaN `delta` is never accepted.
pub fn metropolis_accept<R: Rng>(delta: f64, temperature: f64, rng: &mut R) -> bool {
    if delta.is_nan() {
        return false;
    }
    if delta < 0.0 {
        return true;
    }
    if temperature <= 0.0 {
        return false;
    }
    let probability = (-delta / temperature).exp();
    rng.random_range(0.0..1.0) < probability
}

/// Search state of one solve.
///
/// Owns the working graph, the adjacency indicator (through its
/// [`MoveModel`]) and the best snapshot. The best snapshot is an
/// independent copy taken only when a strictly lower energy is reached.
///
/// [`AnnealRunner`](super::AnnealRunner) drives an `Annealer` to
/// termination; the step-level methods are public for callers that want
/// to interleave their own logic.
///
/// # Examples
///
/// ```
/// use u_netanneal::anneal::{AnnealConfig, Annealer, StepOutcome};
/// use u_netanneal::energy::{EnergyFunction, EnergyStrategy};
/// use u_netanneal::graph::{GraphStore, Point, SpectralAnalytics, Topology};
/// use u_netanneal::moves::Move;
///
/// let positions = (0..3).map(|i| Point::new(i as f64, 0.0)).collect();
/// let path = Topology::with_edges(positions, &[(0, 1), (1, 2)]).unwrap();
/// let energy = EnergyFunction::new(EnergyStrategy::EdgeCost, SpectralAnalytics::new());
///
/// let mut annealer = Annealer::new(path, &energy, &AnnealConfig::default()).unwrap();
/// let mut rng = u_numflow::random::create_rng(1);
/// let outcome = annealer.step(Move::Remove(0, 1), &mut rng);
///
/// assert_eq!(outcome, StepOutcome::Disconnected);
/// assert_eq!(annealer.graph().edge_count(), 2);
/// ```
pub struct Annealer<'a, G, A> {
    graph: G,
    model: MoveModel,
    energy: &'a EnergyFunction<A>,
    config: AnnealConfig,
    temperature: f64,
    current_energy: f64,
    best: G,
    best_energy: f64,
    steps: usize,
    stats: AnnealStats,
    energy_history: Vec<f64>,
}

impl<'a, G: GraphStore, A: GraphAnalytics> Annealer<'a, G, A> {
    /// Prepares a solve over a connected `graph`.
    ///
    /// # Errors
    ///
    /// Fails fast on an invalid configuration, an empty graph, origins
    /// outside the vertex range, or a disconnected graph. Disconnected
    /// inputs must be repaired first, see
    /// [`AnnealRunner::solve`](super::AnnealRunner::solve).
    pub fn new(
        graph: G,
        energy: &'a EnergyFunction<A>,
        config: &AnnealConfig,
    ) -> Result<Self, AnnealError> {
        config.validate().map_err(AnnealError::InvalidConfig)?;

        let count = graph.vertex_count();
        if count == 0 {
            return Err(AnnealError::EmptyGraph);
        }
        if let Some(&vertex) = config.origins.iter().flatten().find(|&&v| v >= count) {
            return Err(AnnealError::OriginOutOfRange { vertex, count });
        }
        if !graph.is_connected() {
            return Err(AnnealError::Disconnected);
        }

        let model = MoveModel::new(energy.analytics().neighbour_matrix(&graph));
        let current_energy = energy.evaluate(&graph);
        let best = graph.snapshot();

        Ok(Self {
            graph,
            model,
            energy,
            config: config.clone(),
            temperature: config.initial_temperature,
            current_energy,
            best,
            best_energy: current_energy,
            steps: 0,
            stats: AnnealStats::default(),
            energy_history: vec![current_energy],
        })
    }

    pub fn phase(&self) -> Phase {
        if self.temperature <= self.config.min_temperature {
            Phase::Terminated
        } else if self.steps == 0 && self.stats.iterations == 0 {
            Phase::Initializing
        } else {
            Phase::Cooling
        }
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn best(&self) -> &G {
        &self.best
    }

    pub fn adjacency(&self) -> &AdjacencyMatrix {
        self.model.adjacency()
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn current_energy(&self) -> f64 {
        self.current_energy
    }

    pub fn best_energy(&self) -> f64 {
        self.best_energy
    }

    /// Completed temperature steps.
    pub fn temperature_steps(&self) -> usize {
        self.steps
    }

    pub fn stats(&self) -> AnnealStats {
        self.stats
    }

    /// Draws a random move.
    ///
    /// `origin` comes from the configured origin set (or all vertices),
    /// `dest` and an alternate `new_dest` from all vertices. A missing
    /// edge `(origin, dest)` proposes `Add`, an existing one `Remove`. A
    /// `Remove` is upgraded to `Relocate` when `new_dest` is a distinct
    /// vertex not adjacent to `origin` and a coin with
    /// `relocate_probability` comes up. The proposal may be illegal.
    pub fn propose<R: Rng>(&self, rng: &mut R) -> Move {
        let n = self.graph.vertex_count();
        let origin = match &self.config.origins {
            Some(origins) => origins[rng.random_range(0..origins.len())],
            None => rng.random_range(0..n),
        };
        let dest = rng.random_range(0..n);
        let new_dest = rng.random_range(0..n);

        let adjacency = self.model.adjacency();
        if !adjacency.contains(origin, dest) {
            return Move::Add(origin, dest);
        }

        let relocatable = new_dest != origin
            && new_dest != dest
            && !adjacency.contains(origin, new_dest)
            && self.config.relocate_probability > 0.0;
        if relocatable && rng.random_bool(self.config.relocate_probability) {
            Move::Relocate {
                origin,
                old_dest: dest,
                new_dest,
            }
        } else {
            Move::Remove(origin, dest)
        }
    }

    /// Runs one move through legality, connectivity and acceptance.
    ///
    /// Whatever the outcome, the graph is connected when this returns.
    pub fn step<R: Rng>(&mut self, mv: Move, rng: &mut R) -> StepOutcome {
        self.stats.iterations += 1;

        let applied = match self.model.apply(&mut self.graph, mv) {
            Ok(applied) => applied,
            Err(err) => {
                self.stats.illegal_moves += 1;
                trace!(?mv, %err, "discarded illegal move");
                return StepOutcome::Illegal(err);
            }
        };

        if let Some((u, v)) = mv.severed() {
            let connected = match self.config.connectivity_check {
                ConnectivityCheck::Endpoints => self.graph.are_connected(u, v),
                ConnectivityCheck::FullGraph => self.graph.is_connected(),
            };
            if !connected {
                self.model.undo(&mut self.graph, applied);
                self.stats.disconnecting_moves += 1;
                trace!(?mv, "reverted disconnecting move");
                return StepOutcome::Disconnected;
            }
        }

        let new_energy = self.energy.evaluate(&self.graph);
        let delta = new_energy - self.current_energy;
        if !metropolis_accept(delta, self.temperature, rng) {
            self.model.undo(&mut self.graph, applied);
            return StepOutcome::Rejected { energy: new_energy };
        }

        if delta < 0.0 {
            self.stats.improving_moves += 1;
        }
        self.stats.accepted_moves += 1;
        self.current_energy = new_energy;

        let new_best = new_energy < self.best_energy;
        if new_best {
            self.best = self.graph.snapshot();
            self.best_energy = new_energy;
        }
        StepOutcome::Accepted {
            energy: new_energy,
            new_best,
        }
    }

    /// Proposes one random move and runs it through [`step`](Self::step).
    pub fn inner_iteration<R: Rng>(&mut self, rng: &mut R) -> StepOutcome {
        let mv = self.propose(rng);
        self.step(mv, rng)
    }

    /// Runs one full temperature step and cools.
    ///
    /// Performs `iterations_per_temperature` inner iterations, optionally
    /// resets to the best snapshot, records the best energy, reports to
    /// `observer` at the configured cadence and applies the cooling
    /// schedule.
    pub fn temperature_step<R: Rng, O: AnnealObserver>(&mut self, rng: &mut R, observer: &mut O) {
        for _ in 0..self.config.iterations_per_temperature {
            self.inner_iteration(rng);
        }

        if self.config.restart_from_best && self.best_energy < self.current_energy {
            self.restore_best();
        }
        self.energy_history.push(self.best_energy);

        let interval = self.config.sample_interval;
        if interval > 0 && observer.is_enabled() && (self.steps + 1) % interval == 0 {
            observer.observe(&TemperatureSample {
                step: self.steps,
                temperature: self.temperature,
                energy: self.current_energy,
                best_energy: self.best_energy,
                convergence_rate: self.energy.analytics().convergence_rate(&self.graph),
            });
        }

        debug!(
            step = self.steps,
            temperature = self.temperature,
            energy = self.current_energy,
            best_energy = self.best_energy,
            "temperature step finished"
        );

        self.temperature = self.config.cooling.next(self.temperature);
        self.steps += 1;
    }

    /// Runs temperature steps until the floor is reached.
    pub fn run_to_floor<R: Rng, O: AnnealObserver>(&mut self, rng: &mut R, observer: &mut O) {
        while self.phase() != Phase::Terminated {
            self.temperature_step(rng, observer);
        }
    }

    /// Finishes the solve, handing back the graph chosen by the
    /// configured [`ResultPolicy`].
    pub fn into_result(self) -> AnnealResult<G> {
        let (graph, energy) = match self.config.result_policy {
            ResultPolicy::Best => (self.best, self.best_energy),
            ResultPolicy::Current => (self.graph, self.current_energy),
        };
        AnnealResult {
            graph,
            energy,
            best_energy: self.best_energy,
            final_temperature: self.temperature,
            temperature_steps: self.steps,
            stats: self.stats,
            energy_history: self.energy_history,
        }
    }

    fn restore_best(&mut self) {
        self.graph = self.best.snapshot();
        self.model = MoveModel::new(self.energy.analytics().neighbour_matrix(&self.graph));
        self.current_energy = self.best_energy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anneal::{CoolingSchedule, NoopObserver, SampleRecorder};
    use crate::energy::EnergyStrategy;
    use crate::graph::{Point, SpectralAnalytics, Topology};
    use proptest::prelude::*;
    use u_numflow::random::create_rng;

    /// Energy = `sign * edge_count`, independent of geometry.
    struct EdgeCounting {
        sign: f64,
    }

    impl GraphAnalytics for EdgeCounting {
        fn edge_cost<G: GraphStore>(&self, graph: &G) -> f64 {
            self.sign * graph.edge_count() as f64
        }

        fn convergence_rate<G: GraphStore>(&self, _graph: &G) -> f64 {
            0.5
        }
    }

    fn points(n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| Point::new((i % 3) as f64, (i / 3) as f64))
            .collect()
    }

    fn path(n: usize) -> Topology {
        let edges: Vec<(usize, usize)> = (1..n).map(|v| (v - 1, v)).collect();
        Topology::with_edges(points(n), &edges).unwrap()
    }

    fn complete_minus(n: usize, missing: (usize, usize)) -> Topology {
        let edges: Vec<(usize, usize)> = (0..n)
            .flat_map(|u| ((u + 1)..n).map(move |v| (u, v)))
            .filter(|&e| e != missing)
            .collect();
        Topology::with_edges(points(n), &edges).unwrap()
    }

    fn small_config() -> AnnealConfig {
        AnnealConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(0.01)
            .with_cooling(CoolingSchedule::Geometric { alpha: 0.8 })
            .with_iterations_per_temperature(20)
            .with_seed(42)
    }

    #[test]
    fn test_remove_bridge_is_reverted() {
        let energy = EnergyFunction::new(EnergyStrategy::EdgeCost, SpectralAnalytics::new());
        let mut annealer = Annealer::new(path(3), &energy, &small_config()).unwrap();
        let mut rng = create_rng(3);

        let outcome = annealer.step(Move::Remove(0, 1), &mut rng);

        assert_eq!(outcome, StepOutcome::Disconnected);
        assert_eq!(annealer.graph().edge_count(), 2);
        assert_eq!(annealer.graph(), &path(3));
        assert_eq!(annealer.adjacency(), &AdjacencyMatrix::from_graph(&path(3)));
        assert_eq!(annealer.stats().disconnecting_moves, 1);
    }

    #[test]
    fn test_remove_bridge_reverted_with_full_check() {
        let energy = EnergyFunction::new(EnergyStrategy::EdgeCost, SpectralAnalytics::new());
        let config = small_config().with_connectivity_check(ConnectivityCheck::FullGraph);
        let mut annealer = Annealer::new(path(3), &energy, &config).unwrap();
        let mut rng = create_rng(3);
        assert_eq!(annealer.step(Move::Remove(2, 1), &mut rng), StepOutcome::Disconnected);
        assert_eq!(annealer.graph().edge_count(), 2);
    }

    #[test]
    fn test_stranding_relocate_is_reverted() {
        // P4 0-1-2-3: moving 2-3 to 2-0 leaves vertex 3 isolated.
        let energy = EnergyFunction::new(EnergyStrategy::EdgeCost, SpectralAnalytics::new());
        let mut annealer = Annealer::new(path(4), &energy, &small_config()).unwrap();
        let mut rng = create_rng(3);
        let before_energy = annealer.current_energy();

        let mv = Move::Relocate {
            origin: 2,
            old_dest: 3,
            new_dest: 0,
        };
        assert_eq!(annealer.step(mv, &mut rng), StepOutcome::Disconnected);

        assert_eq!(annealer.graph(), &path(4));
        assert_eq!(annealer.adjacency(), &AdjacencyMatrix::from_graph(&path(4)));
        assert_eq!(annealer.current_energy(), before_energy);
        assert_eq!(annealer.stats().disconnecting_moves, 1);
    }

    #[test]
    fn test_relocate_keeping_connectivity_accepted() {
        // Moving 3-2 to 3-1 keeps P4 connected and the edge count unchanged.
        let energy = EnergyFunction::new(EnergyStrategy::EdgeCost, EdgeCounting { sign: 1.0 });
        let mut annealer = Annealer::new(path(4), &energy, &small_config()).unwrap();
        let mut rng = create_rng(3);

        let mv = Move::Relocate {
            origin: 3,
            old_dest: 2,
            new_dest: 1,
        };
        let outcome = annealer.step(mv, &mut rng);

        assert_eq!(
            outcome,
            StepOutcome::Accepted {
                energy: 3.0,
                new_best: false
            }
        );
        let graph = annealer.graph();
        assert!(graph.has_edge(3, 1));
        assert!(!graph.has_edge(3, 2));
        assert!(graph.is_connected());
        assert!(annealer.adjacency().contains(1, 3));
        assert!(!annealer.adjacency().contains(2, 3));
    }

    #[test]
    fn test_infinite_energies_still_compare() {
        struct Unbounded;

        impl GraphAnalytics for Unbounded {
            fn edge_cost<G: GraphStore>(&self, _graph: &G) -> f64 {
                f64::INFINITY
            }

            fn convergence_rate<G: GraphStore>(&self, _graph: &G) -> f64 {
                0.5
            }
        }

        let energy = EnergyFunction::new(EnergyStrategy::EdgeCost, Unbounded);
        let mut annealer = Annealer::new(path(4), &energy, &small_config()).unwrap();
        let mut rng = create_rng(3);

        assert_eq!(annealer.current_energy(), f64::MAX);
        assert!(annealer.step(Move::Add(0, 3), &mut rng).is_accepted());
        assert_eq!(annealer.graph().edge_count(), 4);
    }

    #[test]
    fn test_improving_add_accepted() {
        let energy = EnergyFunction::new(EnergyStrategy::EdgeCost, EdgeCounting { sign: -1.0 });
        let mut annealer = Annealer::new(complete_minus(4, (0, 3)), &energy, &small_config()).unwrap();
        let mut rng = create_rng(5);

        let outcome = annealer.step(Move::Add(0, 3), &mut rng);

        assert_eq!(
            outcome,
            StepOutcome::Accepted {
                energy: -6.0,
                new_best: true
            }
        );
        assert_eq!(annealer.graph().edge_count(), 6);
        assert_eq!(annealer.best().edge_count(), 6);
        assert_eq!(annealer.best_energy(), -6.0);
    }

    #[test]
    fn test_improvement_accepted_at_any_temperature() {
        let energy = EnergyFunction::new(EnergyStrategy::EdgeCost, EdgeCounting { sign: -1.0 });
        let config = small_config()
            .with_initial_temperature(1e-6)
            .with_min_temperature(1e-9);
        for seed in 0..20 {
            let mut annealer = Annealer::new(complete_minus(4, (1, 2)), &energy, &config).unwrap();
            let mut rng = create_rng(seed);
            assert!(annealer.step(Move::Add(1, 2), &mut rng).is_accepted());
        }
    }

    #[test]
    fn test_metropolis_improvement_always_accepted() {
        let mut rng = create_rng(11);
        for _ in 0..1000 {
            assert!(metropolis_accept(-1e-12, 1e-12, &mut rng));
            assert!(metropolis_accept(-5.0, 1e6, &mut rng));
        }
    }

    #[test]
    fn test_metropolis_cold_rejects_uphill() {
        let mut rng = create_rng(11);
        for _ in 0..1000 {
            assert!(!metropolis_accept(1.0, 1e-6, &mut rng));
        }
        assert!(!metropolis_accept(1.0, 0.0, &mut rng));
    }

    #[test]
    fn test_metropolis_nan_delta_rejected() {
        let mut rng = create_rng(11);
        assert!(!metropolis_accept(f64::NAN, 1e6, &mut rng));
    }

    #[test]
    fn test_metropolis_hot_accepts_most_uphill() {
        let mut rng = create_rng(11);
        let accepted = (0..1000)
            .filter(|_| metropolis_accept(1.0, 1e6, &mut rng))
            .count();
        assert!(accepted > 990, "accepted {accepted}");
    }

    #[test]
    fn test_worsening_move_rejected_when_cold() {
        // Adding an edge raises edge cost; at near-zero temperature it must be undone.
        let energy = EnergyFunction::new(EnergyStrategy::EdgeCost, SpectralAnalytics::new());
        let config = small_config()
            .with_initial_temperature(1e-9)
            .with_min_temperature(1e-12);
        let mut annealer = Annealer::new(path(4), &energy, &config).unwrap();
        let mut rng = create_rng(9);

        let outcome = annealer.step(Move::Add(0, 3), &mut rng);

        assert!(matches!(outcome, StepOutcome::Rejected { .. }));
        assert_eq!(annealer.graph(), &path(4));
        assert_eq!(annealer.adjacency(), &AdjacencyMatrix::from_graph(&path(4)));
    }

    #[test]
    fn test_illegal_moves_do_not_touch_state() {
        let energy = EnergyFunction::new(EnergyStrategy::EdgeCost, SpectralAnalytics::new());
        let mut annealer = Annealer::new(path(3), &energy, &small_config()).unwrap();
        let mut rng = create_rng(1);
        let before_energy = annealer.current_energy();

        for u in 0..3 {
            assert!(matches!(
                annealer.step(Move::Add(u, u), &mut rng),
                StepOutcome::Illegal(MoveError::SelfLoop(_))
            ));
            assert!(matches!(
                annealer.step(Move::Remove(u, u), &mut rng),
                StepOutcome::Illegal(MoveError::SelfLoop(_))
            ));
        }
        assert_eq!(annealer.graph(), &path(3));
        assert_eq!(annealer.current_energy(), before_energy);
        assert_eq!(annealer.stats().illegal_moves, 6);
    }

    #[test]
    fn test_rejects_disconnected_input() {
        let energy = EnergyFunction::new(EnergyStrategy::EdgeCost, SpectralAnalytics::new());
        let graph = Topology::new(points(3));
        let err = Annealer::new(graph, &energy, &small_config()).err();
        assert_eq!(err, Some(AnnealError::Disconnected));
    }

    #[test]
    fn test_rejects_empty_graph() {
        let energy = EnergyFunction::new(EnergyStrategy::EdgeCost, SpectralAnalytics::new());
        let err = Annealer::new(Topology::new(Vec::new()), &energy, &small_config()).err();
        assert_eq!(err, Some(AnnealError::EmptyGraph));
    }

    #[test]
    fn test_rejects_origin_out_of_range() {
        let energy = EnergyFunction::new(EnergyStrategy::EdgeCost, SpectralAnalytics::new());
        let config = small_config().with_origins(vec![0, 5]);
        let err = Annealer::new(path(3), &energy, &config).err();
        assert_eq!(err, Some(AnnealError::OriginOutOfRange { vertex: 5, count: 3 }));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let energy = EnergyFunction::new(EnergyStrategy::EdgeCost, SpectralAnalytics::new());
        let config = small_config().with_min_temperature(100.0);
        assert!(matches!(
            Annealer::new(path(3), &energy, &config),
            Err(AnnealError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_proposals_respect_origins() {
        let energy = EnergyFunction::new(EnergyStrategy::EdgeCost, SpectralAnalytics::new());
        let config = small_config().with_origins(vec![2]);
        let annealer = Annealer::new(complete_minus(5, (0, 1)), &energy, &config).unwrap();
        let mut rng = create_rng(13);
        for _ in 0..200 {
            let origin = match annealer.propose(&mut rng) {
                Move::Add(u, _) | Move::Remove(u, _) => u,
                Move::Relocate { origin, .. } => origin,
            };
            assert_eq!(origin, 2);
        }
    }

    #[test]
    fn test_proposals_match_indicator() {
        let energy = EnergyFunction::new(EnergyStrategy::EdgeCost, SpectralAnalytics::new());
        let annealer = Annealer::new(path(6), &energy, &small_config()).unwrap();
        let mut rng = create_rng(17);
        let mut relocates = 0;
        for _ in 0..500 {
            match annealer.propose(&mut rng) {
                Move::Add(u, v) => assert!(!annealer.adjacency().contains(u, v)),
                Move::Remove(u, v) => assert!(annealer.adjacency().contains(u, v)),
                Move::Relocate {
                    origin,
                    old_dest,
                    new_dest,
                } => {
                    relocates += 1;
                    assert!(annealer.adjacency().contains(origin, old_dest));
                    assert!(!annealer.adjacency().contains(origin, new_dest));
                    assert_ne!(new_dest, old_dest);
                    assert_ne!(new_dest, origin);
                }
            }
        }
        assert!(relocates > 0);
    }

    #[test]
    fn test_relocate_disabled() {
        let energy = EnergyFunction::new(EnergyStrategy::EdgeCost, SpectralAnalytics::new());
        let config = small_config().with_relocate_probability(0.0);
        let annealer = Annealer::new(path(6), &energy, &config).unwrap();
        let mut rng = create_rng(17);
        for _ in 0..500 {
            assert!(!matches!(annealer.propose(&mut rng), Move::Relocate { .. }));
        }
    }

    #[test]
    fn test_phases() {
        let energy = EnergyFunction::new(EnergyStrategy::EdgeCost, SpectralAnalytics::new());
        let mut annealer = Annealer::new(path(4), &energy, &small_config()).unwrap();
        let mut rng = create_rng(2);
        assert_eq!(annealer.phase(), Phase::Initializing);
        annealer.temperature_step(&mut rng, &mut NoopObserver);
        assert_eq!(annealer.phase(), Phase::Cooling);
        annealer.run_to_floor(&mut rng, &mut NoopObserver);
        assert_eq!(annealer.phase(), Phase::Terminated);
        assert_eq!(annealer.temperature_steps(), small_config().temperature_steps());
    }

    #[test]
    fn test_temperature_decays_geometrically() {
        let energy = EnergyFunction::new(EnergyStrategy::EdgeCost, SpectralAnalytics::new());
        let config = small_config();
        let mut annealer = Annealer::new(path(4), &energy, &config).unwrap();
        let mut rng = create_rng(2);
        for n in 1..=5 {
            annealer.temperature_step(&mut rng, &mut NoopObserver);
            let expected = 10.0 * 0.8f64.powi(n);
            assert!((annealer.temperature() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_observer_cadence() {
        let energy = EnergyFunction::new(EnergyStrategy::EdgeCost, SpectralAnalytics::new());
        let config = small_config().with_sample_interval(3);
        let mut annealer = Annealer::new(path(4), &energy, &config).unwrap();
        let mut rng = create_rng(2);
        let mut recorder = SampleRecorder::new();
        for _ in 0..9 {
            annealer.temperature_step(&mut rng, &mut recorder);
        }
        let steps: Vec<usize> = recorder.samples.iter().map(|s| s.step).collect();
        assert_eq!(steps, vec![2, 5, 8]);
        assert!(recorder
            .samples
            .iter()
            .all(|s| (0.0..=1.0).contains(&s.convergence_rate)));
    }

    #[test]
    fn test_restart_from_best_resets_working_graph() {
        let energy = EnergyFunction::new(EnergyStrategy::EdgeCost, SpectralAnalytics::new());
        let config = small_config()
            .with_initial_temperature(1e6)
            .with_min_temperature(1.0)
            .with_restart_from_best(true);
        let mut annealer = Annealer::new(path(6), &energy, &config).unwrap();
        let mut rng = create_rng(21);
        annealer.temperature_step(&mut rng, &mut NoopObserver);
        assert!(annealer.current_energy() <= annealer.best_energy());
        assert_eq!(annealer.adjacency(), &AdjacencyMatrix::from_graph(annealer.graph()));
    }

    fn arb_connected(n: usize) -> impl Strategy<Value = Topology> {
        proptest::collection::vec((0..n, 0..n), 0..(2 * n)).prop_map(move |extra| {
            let mut edges: Vec<(usize, usize)> = (1..n).map(|v| (v - 1, v)).collect();
            edges.extend(extra.into_iter().filter(|(u, v)| u != v));
            Topology::with_edges(points(n), &edges).unwrap()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_graph_stays_connected(graph in arb_connected(7), seed in any::<u64>()) {
            let energy = EnergyFunction::new(EnergyStrategy::EdgeCost, SpectralAnalytics::new());
            let config = small_config().with_initial_temperature(1e4).with_min_temperature(1.0);
            let mut annealer = Annealer::new(graph, &energy, &config).unwrap();
            let mut rng = create_rng(seed);

            for _ in 0..300 {
                annealer.inner_iteration(&mut rng);
                prop_assert!(annealer.graph().is_connected());
                prop_assert_eq!(annealer.adjacency(), &AdjacencyMatrix::from_graph(annealer.graph()));
            }
        }

        #[test]
        fn prop_best_dominates_visited(graph in arb_connected(6), seed in any::<u64>()) {
            let energy = EnergyFunction::new(EnergyStrategy::Combined, SpectralAnalytics::new());
            let mut annealer = Annealer::new(graph, &energy, &small_config()).unwrap();
            let mut rng = create_rng(seed);
            let mut lowest_visited = annealer.current_energy();

            for _ in 0..200 {
                if let StepOutcome::Accepted { energy, .. } = annealer.inner_iteration(&mut rng) {
                    lowest_visited = lowest_visited.min(energy);
                }
                prop_assert!(annealer.best_energy() <= annealer.current_energy());
            }
            prop_assert_eq!(annealer.best_energy(), lowest_visited);
            prop_assert!((energy.evaluate(annealer.best()) - annealer.best_energy()).abs() < 1e-9);
        }
    }
}
