//! Simulated sensor source for demos and tests.
//!
//! Generates a bounded random walk per metric, which makes sparklines
//! look like real sensor drift rather than white noise.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{SampleError, SampleSource};
use crate::data::ValidRange;

/// Overshoot past the absolute bounds when registering from a range,
/// as a fraction of the absolute span.
const RANGE_OVERSHOOT: f64 = 0.05;

#[derive(Debug, Clone, Copy)]
struct Channel {
    min: f64,
    max: f64,
    step: f64,
    last: f64,
}

/// A fake sensor producing plausible readings for registered metrics.
///
/// Compatible with real sensor sources: callers register each metric
/// with the band it should wander in, then poll it like any other
/// [`SampleSource`].
#[derive(Debug)]
pub struct SimulatedSource {
    channels: HashMap<String, Channel>,
    rng: StdRng,
    description: String,
}

impl SimulatedSource {
    pub fn new() -> Self {
        Self {
            channels: HashMap::new(),
            rng: StdRng::from_os_rng(),
            description: "simulated sensors".to_string(),
        }
    }

    /// Deterministic variant for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ..Self::new()
        }
    }

    /// Register a metric that wanders within `[min, max]`, starting at the
    /// band midpoint and moving at most 5% of the band per reading.
    pub fn register(&mut self, metric_id: &str, min: f64, max: f64) {
        let span = (max - min).max(f64::MIN_POSITIVE);
        self.channels.insert(
            metric_id.to_string(),
            Channel {
                min,
                max,
                step: span * 0.05,
                last: min + span / 2.0,
            },
        );
    }

    /// Register a metric wandering across its full valid range, with a
    /// small overshoot past the absolute bounds. Readings visit every
    /// zone over time, including the occasional invalid one.
    pub fn register_range(&mut self, metric_id: &str, range: &ValidRange) {
        let margin = (range.absolute_max() - range.absolute_min()) * RANGE_OVERSHOOT;
        self.register(
            metric_id,
            range.absolute_min() - margin,
            range.absolute_max() + margin,
        );
    }
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleSource for SimulatedSource {
    fn next_value(&mut self, metric_id: &str) -> Result<f64, SampleError> {
        let channel = self
            .channels
            .get_mut(metric_id)
            .ok_or_else(|| SampleError::UnknownMetric(metric_id.to_string()))?;

        let delta = self.rng.random_range(-channel.step..=channel.step);
        channel.last = (channel.last + delta).clamp(channel.min, channel.max);
        Ok(channel.last)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readings_stay_within_band() {
        let mut source = SimulatedSource::with_seed(42);
        source.register("temperature", 10.0, 30.0);
        for _ in 0..500 {
            let v = source.next_value("temperature").unwrap();
            assert!((10.0..=30.0).contains(&v), "reading {v} escaped the band");
        }
    }

    #[test]
    fn test_unknown_metric_is_an_error() {
        let mut source = SimulatedSource::with_seed(1);
        assert!(matches!(
            source.next_value("nope"),
            Err(SampleError::UnknownMetric(_))
        ));
    }

    #[test]
    fn test_walk_is_deterministic_per_seed() {
        let mut a = SimulatedSource::with_seed(7);
        let mut b = SimulatedSource::with_seed(7);
        a.register("m", 0.0, 100.0);
        b.register("m", 0.0, 100.0);
        for _ in 0..20 {
            assert_eq!(a.next_value("m").unwrap(), b.next_value("m").unwrap());
        }
    }

    #[test]
    fn test_range_registration_leaves_the_normal_band() {
        let range = ValidRange::new(0.0, 40.0, 60.0, 100.0).unwrap();
        let mut source = SimulatedSource::with_seed(11);
        source.register_range("m", &range);

        let mut outside_normal = false;
        for _ in 0..2000 {
            let v = source.next_value("m").unwrap();
            // Walk is bounded by the overshot absolute range
            assert!((-5.0..=105.0).contains(&v), "reading {v} escaped the band");
            if !(range.normal_min()..=range.normal_max()).contains(&v) {
                outside_normal = true;
            }
        }
        assert!(outside_normal, "walk never left the normal band");
    }

    #[test]
    fn test_walk_moves_gradually() {
        let mut source = SimulatedSource::with_seed(3);
        source.register("m", 0.0, 100.0);
        let mut prev = source.next_value("m").unwrap();
        for _ in 0..100 {
            let next = source.next_value("m").unwrap();
            assert!((next - prev).abs() <= 5.0 + 1e-9);
            prev = next;
        }
    }
}
