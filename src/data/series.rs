//! Fixed-capacity sample history for sparklines and trend arrows.

use std::collections::VecDeque;

/// An ordered window of recent samples for one metric.
///
/// Ring-buffer semantics: pushing beyond capacity evicts the oldest
/// sample. Owned by the dashboard and mutated only during its tick.
#[derive(Debug, Clone)]
pub struct SampleSeries {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl SampleSeries {
    /// Create an empty series holding at most `capacity` samples.
    /// A zero capacity is bumped to one so `push` always retains the
    /// latest reading.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest when at capacity.
    pub fn push(&mut self, value: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Most recent sample, if any.
    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    /// Sample before the most recent one, if any.
    pub fn previous(&self) -> Option<f64> {
        if self.samples.len() < 2 {
            return None;
        }
        self.samples.get(self.samples.len() - 2).copied()
    }

    /// Samples in insertion order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
