//! Valid-range definitions and sensor value classification.
//!
//! Every metric carries a [`ValidRange`]: an absolute range outside of
//! which a reading is considered a sensor fault, and a nested "normal"
//! sub-range. [`ValidRange::classify`] places a value in a [`Zone`] and
//! computes a signed, saturating deviation ratio used for color mapping.

use thiserror::Error;

/// Errors raised when constructing a malformed range.
///
/// These are configuration-time errors: a `ValidRange` that constructs
/// successfully never fails at classification time.
#[derive(Debug, Error, PartialEq)]
pub enum RangeError {
    #[error("range bounds must be finite numbers")]
    NonFinite,
    #[error("range ordering violated: expected {0} <= {1} <= {2} <= {3}")]
    BadOrdering(f64, f64, f64, f64),
}

/// Classification bucket for a value relative to its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// Below the normal sub-range but still within the absolute range.
    BelowNormal,
    /// Within the normal sub-range.
    Normal,
    /// Above the normal sub-range but still within the absolute range.
    AboveNormal,
    /// Outside the absolute range; the reading itself is suspect.
    Invalid,
}

/// Result of evaluating one value against a [`ValidRange`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// False when the value falls outside the absolute range.
    pub is_valid: bool,
    /// Which bucket the value landed in.
    pub zone: Zone,
    /// Signed measure of how far the value sits from the normal range:
    /// 0 at the nearer normal boundary, ±1 at or beyond the absolute
    /// boundary. Always in `[-1.0, 1.0]`.
    pub deviation: f64,
}

/// Absolute and normal bounds for one sensor metric.
///
/// Invariant: `absolute_min <= normal_min <= normal_max <= absolute_max`.
/// Instances are created at configuration time and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidRange {
    absolute_min: f64,
    normal_min: f64,
    normal_max: f64,
    absolute_max: f64,
}

impl ValidRange {
    /// Build a range, enforcing ordering and finiteness.
    pub fn new(
        absolute_min: f64,
        normal_min: f64,
        normal_max: f64,
        absolute_max: f64,
    ) -> Result<Self, RangeError> {
        if ![absolute_min, normal_min, normal_max, absolute_max].iter().all(|v| v.is_finite()) {
            return Err(RangeError::NonFinite);
        }
        if !(absolute_min <= normal_min && normal_min <= normal_max && normal_max <= absolute_max) {
            return Err(RangeError::BadOrdering(
                absolute_min,
                normal_min,
                normal_max,
                absolute_max,
            ));
        }
        Ok(Self {
            absolute_min,
            normal_min,
            normal_max,
            absolute_max,
        })
    }

    pub fn absolute_min(&self) -> f64 {
        self.absolute_min
    }

    pub fn absolute_max(&self) -> f64 {
        self.absolute_max
    }

    pub fn normal_min(&self) -> f64 {
        self.normal_min
    }

    pub fn normal_max(&self) -> f64 {
        self.normal_max
    }

    /// Classify a value against this range.
    ///
    /// Pure function: values outside the absolute range saturate the
    /// deviation at ±1 toward the exceeded side; values in a zero-width
    /// side zone (e.g. `normal_min == absolute_min`) saturate immediately
    /// once they cross the normal boundary.
    pub fn classify(&self, value: f64) -> Classification {
        if !value.is_finite() || value < self.absolute_min {
            return Classification {
                is_valid: false,
                zone: Zone::Invalid,
                deviation: -1.0,
            };
        }
        if value > self.absolute_max {
            return Classification {
                is_valid: false,
                zone: Zone::Invalid,
                deviation: 1.0,
            };
        }

        if value < self.normal_min {
            let width = self.normal_min - self.absolute_min;
            let deviation = if width > 0.0 {
                -((self.normal_min - value) / width)
            } else {
                -1.0
            };
            Classification {
                is_valid: true,
                zone: Zone::BelowNormal,
                deviation: deviation.max(-1.0),
            }
        } else if value > self.normal_max {
            let width = self.absolute_max - self.normal_max;
            let deviation = if width > 0.0 {
                (value - self.normal_max) / width
            } else {
                1.0
            };
            Classification {
                is_valid: true,
                zone: Zone::AboveNormal,
                deviation: deviation.min(1.0),
            }
        } else {
            Classification {
                is_valid: true,
                zone: Zone::Normal,
                deviation: 0.0,
            }
        }
    }
}
