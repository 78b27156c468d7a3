//! Energy strategies.

use crate::graph::{GraphAnalytics, GraphStore};
use std::fmt;
use std::str::FromStr;

/// Lower clamp for the convergence rate in the combined objective, and
/// distance kept from `1.0` at the upper end.
pub const RATE_EPSILON: f64 = 1e-8;

/// Which scalar the annealer minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EnergyStrategy {
    /// Total weighted edge cost.
    EdgeCost,
    /// Raw consensus convergence rate.
    ConvergenceRate,
    /// Edge cost per unit of convergence speed: `cost / -ln(rate)`.
    #[default]
    Combined,
}

impl EnergyStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyStrategy::EdgeCost => "edge_cost",
            EnergyStrategy::ConvergenceRate => "convergence_rate",
            EnergyStrategy::Combined => "combined",
        }
    }
}

impl fmt::Display for EnergyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnergyStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "edge_cost" => Ok(EnergyStrategy::EdgeCost),
            "convergence_rate" => Ok(EnergyStrategy::ConvergenceRate),
            "combined" => Ok(EnergyStrategy::Combined),
            other => Err(format!(
                "unknown energy strategy '{other}', expected edge_cost, convergence_rate or combined"
            )),
        }
    }
}

/// Combined objective `edge_cost / -ln(rate)` with explicit clamps.
///
/// - `rate` is clamped into `[RATE_EPSILON, 1 - RATE_EPSILON]`. At the low
///   end this avoids `ln(0)`; at the high end it keeps a never-converging
///   graph finite (`cost * ~1e8`) instead of `+inf`, so such states still
///   rank by edge cost and can be improved upon.
/// - A NaN rate is treated as `1.0`.
///
/// # Examples
///
/// ```
/// use u_netanneal::energy::combined_energy;
///
/// assert!(combined_energy(10.0, 1.0).is_finite());
/// assert!(combined_energy(10.0, 0.0).is_finite());
/// assert!(combined_energy(10.0, 0.2) < combined_energy(10.0, 0.8));
/// ```
pub fn combined_energy(edge_cost: f64, rate: f64) -> f64 {
    let rate = if rate.is_nan() { 1.0 } else { rate };
    let rate = rate.clamp(RATE_EPSILON, 1.0 - RATE_EPSILON);
    edge_cost / -rate.ln()
}

/// Maps a graph state to the scalar the annealer minimizes.
///
/// The strategy is fixed at construction; swap it between solves with
/// [`with_strategy`](Self::with_strategy).
#[derive(Debug, Clone)]
pub struct EnergyFunction<A> {
    strategy: EnergyStrategy,
    analytics: A,
}

impl<A: GraphAnalytics> EnergyFunction<A> {
    pub fn new(strategy: EnergyStrategy, analytics: A) -> Self {
        Self {
            strategy,
            analytics,
        }
    }

    pub fn with_strategy(mut self, strategy: EnergyStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> EnergyStrategy {
        self.strategy
    }

    pub fn analytics(&self) -> &A {
        &self.analytics
    }

    /// Energy of `graph`. Lower is better; always finite.
    ///
    /// A NaN or `+inf` produced by the analytics is mapped to `f64::MAX`,
    /// `-inf` to `f64::MIN`, so energy differences never become NaN.
    pub fn evaluate<G: GraphStore>(&self, graph: &G) -> f64 {
        let energy = match self.strategy {
            EnergyStrategy::EdgeCost => self.analytics.edge_cost(graph),
            EnergyStrategy::ConvergenceRate => self.analytics.convergence_rate(graph),
            EnergyStrategy::Combined => combined_energy(
                self.analytics.edge_cost(graph),
                self.analytics.convergence_rate(graph),
            ),
        };
        if energy.is_nan() {
            f64::MAX
        } else {
            energy.clamp(f64::MIN, f64::MAX)
        }
    }
}

impl<A: GraphAnalytics + Default> Default for EnergyFunction<A> {
    fn default() -> Self {
        Self::new(EnergyStrategy::default(), A::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Point, SpectralAnalytics, Topology};

    struct Fixed {
        cost: f64,
        rate: f64,
    }

    impl GraphAnalytics for Fixed {
        fn edge_cost<G: GraphStore>(&self, _graph: &G) -> f64 {
            self.cost
        }

        fn convergence_rate<G: GraphStore>(&self, _graph: &G) -> f64 {
            self.rate
        }
    }

    fn any_graph() -> Topology {
        Topology::new(vec![Point::default(); 2])
    }

    #[test]
    fn test_parse_round_trip_names() {
        for strategy in [
            EnergyStrategy::EdgeCost,
            EnergyStrategy::ConvergenceRate,
            EnergyStrategy::Combined,
        ] {
            assert_eq!(strategy.to_string().parse::<EnergyStrategy>(), Ok(strategy));
        }
        assert!("fastest".parse::<EnergyStrategy>().is_err());
    }

    #[test]
    fn test_default_is_combined() {
        let energy: EnergyFunction<SpectralAnalytics> = EnergyFunction::default();
        assert_eq!(energy.strategy(), EnergyStrategy::Combined);
    }

    #[test]
    fn test_combined_formula() {
        let energy = EnergyFunction::new(EnergyStrategy::Combined, Fixed { cost: 6.0, rate: 0.5 });
        let expected = 6.0 / -(0.5f64).ln();
        assert!((energy.evaluate(&any_graph()) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_combined_rate_one_is_finite_and_ranks_by_cost() {
        let cheap = EnergyFunction::new(EnergyStrategy::Combined, Fixed { cost: 1.0, rate: 1.0 });
        let dear = EnergyFunction::new(EnergyStrategy::Combined, Fixed { cost: 2.0, rate: 1.0 });
        let a = cheap.evaluate(&any_graph());
        let b = dear.evaluate(&any_graph());
        assert!(a.is_finite() && b.is_finite());
        assert!(a < b);
        // Any converging graph of the same cost scores better.
        assert!(combined_energy(1.0, 0.999) < a);
    }

    #[test]
    fn test_combined_rate_zero_uses_epsilon() {
        let value = combined_energy(3.0, 0.0);
        let expected = 3.0 / -RATE_EPSILON.ln();
        assert!((value - expected).abs() < 1e-12);
    }

    #[test]
    fn test_nan_never_escapes() {
        let energy = EnergyFunction::new(
            EnergyStrategy::Combined,
            Fixed {
                cost: 1.0,
                rate: f64::NAN,
            },
        );
        assert!(!energy.evaluate(&any_graph()).is_nan());

        let energy = EnergyFunction::new(
            EnergyStrategy::EdgeCost,
            Fixed {
                cost: f64::NAN,
                rate: 0.5,
            },
        );
        assert_eq!(energy.evaluate(&any_graph()), f64::MAX);
    }

    #[test]
    fn test_infinite_energy_is_saturated() {
        let energy = EnergyFunction::new(
            EnergyStrategy::EdgeCost,
            Fixed {
                cost: f64::INFINITY,
                rate: 0.5,
            },
        );
        let e = energy.evaluate(&any_graph());
        assert_eq!(e, f64::MAX);
        assert_eq!(e - energy.evaluate(&any_graph()), 0.0);

        let energy = EnergyFunction::new(
            EnergyStrategy::Combined,
            Fixed {
                cost: f64::INFINITY,
                rate: 0.5,
            },
        );
        assert_eq!(energy.evaluate(&any_graph()), f64::MAX);

        let energy = EnergyFunction::new(
            EnergyStrategy::EdgeCost,
            Fixed {
                cost: f64::NEG_INFINITY,
                rate: 0.5,
            },
        );
        assert_eq!(energy.evaluate(&any_graph()), f64::MIN);
    }

    #[test]
    fn test_single_strategies_delegate() {
        let fixed = Fixed { cost: 7.5, rate: 0.25 };
        let energy = EnergyFunction::new(EnergyStrategy::EdgeCost, fixed);
        assert_eq!(energy.evaluate(&any_graph()), 7.5);
        let energy = energy.with_strategy(EnergyStrategy::ConvergenceRate);
        assert_eq!(energy.evaluate(&any_graph()), 0.25);
    }
}
