//! Sample source abstraction for acquiring sensor readings.
//!
//! The dashboard pulls one value per registered metric per tick through
//! the [`SampleSource`] trait. Sources may be real sensors, simulated
//! data, or readings pushed in by a host application over a channel.

mod channel;
mod simulated;

pub use channel::{ChannelSource, ReadingBatch};
pub use simulated::SimulatedSource;

use std::fmt::Debug;

use thiserror::Error;

/// A failed sample acquisition.
///
/// Always transient and per-metric: the dashboard treats it as "no new
/// sample this tick", renders a degraded row, and keeps running.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("no reading available for metric '{0}'")]
    Unavailable(String),
    #[error("metric '{0}' is not provided by this source")]
    UnknownMetric(String),
    #[error("sensor read failed: {0}")]
    Acquisition(String),
}

/// Trait for pulling sensor readings on demand.
///
/// `next_value` is called once per metric per tick and may block briefly
/// or fail transiently; it is the only fallible call in the tick loop.
pub trait SampleSource: Send + Debug {
    /// Acquire the latest value for the given metric.
    fn next_value(&mut self, metric_id: &str) -> Result<f64, SampleError>;

    /// Human-readable description of the source, shown in the status panel.
    fn description(&self) -> &str;
}
