//! Data models for sensor readings.
//!
//! - [`range`]: valid/normal range definitions and value classification
//! - [`series`]: fixed-capacity sample windows for trend display
//!
//! Both are pure in-memory types: ranges are configuration-time constants,
//! series are owned by the dashboard and mutated once per tick.

pub mod range;
pub mod series;

pub use range::{Classification, RangeError, ValidRange, Zone};
pub use series::SampleSeries;
