//! Upload boundary between the dashboard and cloud service SDKs.
//!
//! Cloud SDKs expose their own response shapes; the dashboard never sees
//! them. It hands a fixed [`Reading`] record to an [`Uploader`] and moves
//! on. Rendering correctness never depends on upload success, and the
//! upload wrappers' retry/auth behavior lives outside this crate.

use std::fmt::Debug;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// One reading handed to an upload wrapper. Plain record shape; no
/// SDK-specific types leak through this boundary.
#[derive(Debug, Clone, Serialize)]
pub struct Reading {
    pub metric: String,
    pub value: f64,
    pub unit: String,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload sink failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize reading: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Trait implemented by cloud upload wrappers.
pub trait Uploader: Send {
    /// Deliver a batch of readings, one per metric for this tick.
    fn send(&mut self, readings: &[Reading]) -> Result<(), UploadError>;

    /// Description of the upload target, for logs and the status panel.
    fn description(&self) -> &str;
}

/// Uploader that writes readings as JSON lines.
///
/// Used by the demo harness and as a diagnostic sink; point it at a file
/// to capture exactly what would be sent to a cloud feed.
pub struct JsonLinesUploader<W: Write + Send> {
    writer: W,
    description: String,
}

impl<W: Write + Send> JsonLinesUploader<W> {
    pub fn new(writer: W, target: &str) -> Self {
        Self {
            writer,
            description: format!("json-lines: {target}"),
        }
    }
}

impl<W: Write + Send> Uploader for JsonLinesUploader<W> {
    fn send(&mut self, readings: &[Reading]) -> Result<(), UploadError> {
        for reading in readings {
            serde_json::to_writer(&mut self.writer, reading)?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(metric: &str, value: f64) -> Reading {
        Reading {
            metric: metric.to_string(),
            value,
            unit: "C".to_string(),
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn test_json_lines_uploader_writes_one_line_per_reading() {
        let mut uploader = JsonLinesUploader::new(Vec::new(), "memory");
        uploader
            .send(&[reading("temperature", 21.5), reading("humidity", 40.0)])
            .unwrap();

        let out = String::from_utf8(uploader.writer).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["metric"], "temperature");
        assert_eq!(first["value"], 21.5);
        assert_eq!(first["unit"], "C");
        assert!(first["recorded_at"].is_string());
    }

    #[test]
    fn test_empty_batch_is_a_noop() {
        let mut uploader = JsonLinesUploader::new(Vec::<u8>::new(), "memory");
        uploader.send(&[]).unwrap();
        assert!(uploader.writer.is_empty());
        assert_eq!(uploader.description(), "json-lines: memory");
    }
}
