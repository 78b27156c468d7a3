//! Annealer configuration and cooling schedules.

/// Upper bound on the outer steps a valid configuration may plan.
pub const MAX_TEMPERATURE_STEPS: usize = 1_000_000;

/// Cooling schedule for temperature reduction.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Geometric (exponential) cooling: `T_{k+1} = alpha * T_k`.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    ///
    /// Cools fast at high T, slow at low T. Reaching `T_min` takes about
    /// `(1/T_min - 1/T_0) / beta` steps, so a tiny `beta` means a very long
    /// run; see [`MAX_TEMPERATURE_STEPS`].
    LundyMees {
        /// Cooling parameter, positive.
        beta: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.92 }
    }
}

impl CoolingSchedule {
    /// Temperature after one outer step from `temperature`.
    pub fn next(&self, temperature: f64) -> f64 {
        match *self {
            CoolingSchedule::Geometric { alpha } => temperature * alpha,
            CoolingSchedule::LundyMees { beta } => temperature / (1.0 + beta * temperature),
        }
    }
}

/// How the annealer verifies connectivity after a removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectivityCheck {
    /// Check that the two vertices which lost their direct edge are still
    /// joined by a path. Equivalent to a full check on a connected graph,
    /// and usually stops early.
    #[default]
    Endpoints,
    /// Traverse the whole graph.
    FullGraph,
}

/// Which graph a finished solve hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResultPolicy {
    /// The lowest-energy state seen during the solve.
    #[default]
    Best,
    /// The working state at termination.
    Current,
}

/// Configuration for a topology annealing solve.
///
/// # Examples
///
/// ```
/// use u_netanneal::anneal::{AnnealConfig, CoolingSchedule};
///
/// let config = AnnealConfig::default()
///     .with_initial_temperature(100.0)
///     .with_min_temperature(0.01)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.9 })
///     .with_iterations_per_temperature(50)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealConfig {
    /// Starting temperature.
    pub initial_temperature: f64,

    /// Temperature floor. The solve terminates once T drops to or below it.
    pub min_temperature: f64,

    /// Cooling schedule applied after every temperature step.
    pub cooling: CoolingSchedule,

    /// Proposed moves per temperature step.
    pub iterations_per_temperature: usize,

    /// Probability of upgrading a `Remove` proposal to a `Relocate` when a
    /// free alternate destination was drawn. 0 disables relocation.
    pub relocate_probability: f64,

    pub connectivity_check: ConnectivityCheck,

    pub result_policy: ResultPolicy,

    /// Reset the working graph to the best snapshot at the end of every
    /// temperature step.
    pub restart_from_best: bool,

    /// Restrict move origins to these vertices. `None` draws from all.
    pub origins: Option<Vec<usize>>,

    /// Observer cadence in temperature steps. 0 = never.
    pub sample_interval: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 10_000.0,
            min_temperature: 0.001,
            cooling: CoolingSchedule::default(),
            iterations_per_temperature: 200,
            relocate_probability: 0.5,
            connectivity_check: ConnectivityCheck::default(),
            result_policy: ResultPolicy::default(),
            restart_from_best: false,
            origins: None,
            sample_interval: 1,
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_relocate_probability(mut self, p: f64) -> Self {
        self.relocate_probability = p;
        self
    }

    pub fn with_connectivity_check(mut self, check: ConnectivityCheck) -> Self {
        self.connectivity_check = check;
        self
    }

    pub fn with_result_policy(mut self, policy: ResultPolicy) -> Self {
        self.result_policy = policy;
        self
    }

    pub fn with_restart_from_best(mut self, enabled: bool) -> Self {
        self.restart_from_best = enabled;
        self
    }

    pub fn with_origins(mut self, origins: Vec<usize>) -> Self {
        self.origins = Some(origins);
        self
    }

    pub fn with_sample_interval(mut self, n: usize) -> Self {
        self.sample_interval = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of temperature steps a solve with this configuration runs.
    ///
    /// For geometric cooling this is
    /// `ceil(ln(min / initial) / ln(alpha))`. The count is obtained by
    /// replaying the schedule, so it matches the engine exactly. Returns 0
    /// for a configuration that fails [`validate`](Self::validate).
    pub fn temperature_steps(&self) -> usize {
        if self.validate().is_err() {
            return 0;
        }
        let mut temperature = self.initial_temperature;
        let mut steps = 0;
        while temperature > self.min_temperature {
            temperature = self.cooling.next(temperature);
            steps += 1;
        }
        steps
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err("initial_temperature must be positive and finite".into());
        }
        if self.min_temperature.is_nan() || self.min_temperature <= 0.0 {
            return Err("min_temperature must be positive".into());
        }
        if self.min_temperature >= self.initial_temperature {
            return Err("min_temperature must be less than initial_temperature".into());
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if alpha.is_nan() || alpha <= 0.0 || alpha >= 1.0 {
                    return Err(format!("geometric alpha must be in (0, 1), got {alpha}"));
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if !beta.is_finite() || beta <= 0.0 {
                    return Err(format!("lundy-mees beta must be positive, got {beta}"));
                }
            }
        }
        let planned = self.planned_steps();
        if planned > MAX_TEMPERATURE_STEPS as f64 {
            return Err(format!(
                "cooling schedule needs about {planned:.0} temperature steps, more than {MAX_TEMPERATURE_STEPS}"
            ));
        }
        if !(0.0..=1.0).contains(&self.relocate_probability) {
            return Err(format!(
                "relocate_probability must be in [0, 1], got {}",
                self.relocate_probability
            ));
        }
        if let Some(origins) = &self.origins {
            if origins.is_empty() {
                return Err("origins must not be empty".into());
            }
        }
        Ok(())
    }

    /// Closed-form step count of the cooling schedule.
    fn planned_steps(&self) -> f64 {
        let (t0, t_min) = (self.initial_temperature, self.min_temperature);
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => ((t_min / t0).ln() / alpha.ln()).ceil(),
            CoolingSchedule::LundyMees { beta } => ((1.0 / t_min - 1.0 / t0) / beta).ceil(),
        }
    }
}
