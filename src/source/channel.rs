//! Channel-based sample source.
//!
//! Receives reading batches via a tokio watch channel. This is the
//! integration point for host applications that already own the sensor
//! hardware: they push `{metric → value}` batches and the dashboard
//! pulls from the latest batch each tick.

use std::collections::HashMap;

use tokio::sync::watch;

use super::{SampleError, SampleSource};

/// The latest reading per metric, as pushed by a producer.
pub type ReadingBatch = HashMap<String, f64>;

/// A sample source fed by a watch channel.
///
/// The producer side sends complete batches; `next_value` reads from the
/// most recent batch. A metric missing from the current batch is a
/// transient [`SampleError::Unavailable`], not a fatal condition.
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<ReadingBatch>,
    description: String,
}

impl ChannelSource {
    /// Wrap the receiving end of a watch channel.
    pub fn new(receiver: watch::Receiver<ReadingBatch>, producer: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {producer}"),
        }
    }

    /// Create a connected (sender, source) pair.
    pub fn create(producer: &str) -> (watch::Sender<ReadingBatch>, Self) {
        let (tx, rx) = watch::channel(ReadingBatch::default());
        let source = Self::new(rx, producer);
        (tx, source)
    }
}

impl SampleSource for ChannelSource {
    fn next_value(&mut self, metric_id: &str) -> Result<f64, SampleError> {
        let batch = self.receiver.borrow_and_update();
        batch
            .get(metric_id)
            .copied()
            .ok_or_else(|| SampleError::Unavailable(metric_id.to_string()))
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_latest_batch() {
        let (tx, mut source) = ChannelSource::create("test");

        // Nothing pushed yet
        assert!(matches!(
            source.next_value("temperature"),
            Err(SampleError::Unavailable(_))
        ));

        let mut batch = ReadingBatch::new();
        batch.insert("temperature".to_string(), 21.5);
        tx.send(batch).unwrap();

        assert_eq!(source.next_value("temperature").unwrap(), 21.5);
        // Re-reading the same batch is fine; one batch can serve many metrics
        assert_eq!(source.next_value("temperature").unwrap(), 21.5);
    }

    #[test]
    fn test_newer_batch_replaces_older() {
        let (tx, mut source) = ChannelSource::create("test");

        let mut batch = ReadingBatch::new();
        batch.insert("humidity".to_string(), 40.0);
        tx.send(batch.clone()).unwrap();
        assert_eq!(source.next_value("humidity").unwrap(), 40.0);

        batch.insert("humidity".to_string(), 55.0);
        tx.send(batch).unwrap();
        assert_eq!(source.next_value("humidity").unwrap(), 55.0);
    }

    #[test]
    fn test_missing_metric_in_batch_is_transient() {
        let (tx, mut source) = ChannelSource::create("test");

        let mut batch = ReadingBatch::new();
        batch.insert("pressure".to_string(), 1013.0);
        tx.send(batch).unwrap();

        assert!(source.next_value("pressure").is_ok());
        assert!(matches!(
            source.next_value("temperature"),
            Err(SampleError::Unavailable(_))
        ));
        assert_eq!(source.description(), "channel: test");
    }
}
