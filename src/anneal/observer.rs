//! Observation hooks for temperature steps.

/// State of the search at the end of a temperature step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemperatureSample {
    /// Zero-based index of the temperature step that just finished.
    pub step: usize,
    /// Temperature the step ran at.
    pub temperature: f64,
    /// Energy of the working graph.
    pub energy: f64,
    /// Lowest energy seen so far.
    pub best_energy: f64,
    /// Convergence rate of the working graph.
    pub convergence_rate: f64,
}

/// Receives samples during a solve.
///
/// Observers are informational only: nothing they do can influence which
/// moves are accepted.
pub trait AnnealObserver {
    fn observe(&mut self, sample: &TemperatureSample);

    /// Whether samples should be built at all. Building a sample costs one
    /// convergence-rate evaluation.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Discards every sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl AnnealObserver for NoopObserver {
    fn observe(&mut self, _sample: &TemperatureSample) {}

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Keeps every sample in memory.
#[derive(Debug, Clone, Default)]
pub struct SampleRecorder {
    pub samples: Vec<TemperatureSample>,
}

impl SampleRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnnealObserver for SampleRecorder {
    fn observe(&mut self, sample: &TemperatureSample) {
        self.samples.push(*sample);
    }
}
