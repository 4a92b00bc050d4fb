//! Dashboard state machine and per-tick logic.
//!
//! The [`App`] owns every metric's sample window and drives one tick at
//! a time: pull a value per metric from the injected [`SampleSource`],
//! append it, hand the fresh readings to the [`Uploader`], and recompute
//! the display rows. Acquisition and upload failures are contained per
//! tick; only a stop request or the upload limit ends the run.

use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use tracing::{info, warn};

use crate::cloud::{Reading, Uploader};
use crate::config::{MetricSpec, Settings};
use crate::source::SampleSource;
use crate::ui::row::DataRow;
use crate::ui::sparkline;
use crate::data::SampleSeries;

/// Remaining wait below this keeps the status panel on the running line
/// rather than flashing an almost-complete gauge between samples.
pub const WAIT_GAUGE_MIN_REMAINING: Duration = Duration::from_millis(500);

/// Dashboard lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Layout built, metrics registered, no tick yet.
    Init,
    /// Actively sampling and redrawing.
    Running,
    /// Between ticks, showing the countdown progress indicator.
    WaitingForSample,
    /// Terminal: no further sampling or redraws.
    Stopped,
}

/// One registered metric with its accumulated samples.
#[derive(Debug)]
struct Metric {
    spec: MetricSpec,
    series: SampleSeries,
    /// Whether the last acquisition for this metric failed.
    missed: bool,
}

/// Main dashboard state.
pub struct App {
    phase: Phase,
    metrics: Vec<Metric>,
    source: Box<dyn SampleSource>,
    uploader: Box<dyn Uploader>,
    delta_factor: f64,
    tick_interval: Duration,
    max_uploads: u64,
    num_uploads: u64,
    last_upload: Option<(DateTime<Local>, bool)>,
    next_upload_due: Option<DateTime<Local>>,
    wait_progress: f64,
    started_at: DateTime<Local>,
}

impl App {
    /// Register one metric slot per settings entry and enter `Init`.
    pub fn new(
        settings: &Settings,
        source: Box<dyn SampleSource>,
        uploader: Box<dyn Uploader>,
    ) -> Self {
        let metrics = settings
            .metrics
            .iter()
            .map(|spec| Metric {
                spec: spec.clone(),
                series: SampleSeries::new(settings.window),
                missed: false,
            })
            .collect();

        Self {
            phase: Phase::Init,
            metrics,
            source,
            uploader,
            delta_factor: settings.delta_factor,
            tick_interval: settings.tick_interval,
            max_uploads: settings.max_uploads,
            num_uploads: 0,
            last_upload: None,
            next_upload_due: None,
            wait_progress: 0.0,
            started_at: Local::now(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_stopped(&self) -> bool {
        self.phase == Phase::Stopped
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn num_uploads(&self) -> u64 {
        self.num_uploads
    }

    pub fn max_uploads(&self) -> u64 {
        self.max_uploads
    }

    /// Time and success of the most recent upload attempt.
    pub fn last_upload(&self) -> Option<(DateTime<Local>, bool)> {
        self.last_upload
    }

    /// When the next tick (and upload) is due.
    pub fn next_upload_due(&self) -> Option<DateTime<Local>> {
        self.next_upload_due
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    pub fn uploader_description(&self) -> &str {
        self.uploader.description()
    }

    /// Fraction of the inter-tick wait already elapsed, in `0..=1`.
    pub fn wait_progress(&self) -> f64 {
        self.wait_progress
    }

    /// Leave `Init` and start the run loop.
    pub fn start(&mut self) {
        if self.phase == Phase::Init {
            self.phase = Phase::Running;
            self.next_upload_due = Some(Local::now() + self.tick_interval);
            info!(source = self.source.description(), "dashboard started");
        }
    }

    /// Enter the between-ticks wait with the given elapsed fraction.
    pub fn begin_wait(&mut self, progress: f64) {
        if self.phase == Phase::Stopped {
            return;
        }
        self.phase = Phase::WaitingForSample;
        self.wait_progress = progress.clamp(0.0, 1.0);
    }

    /// Update the phase for time elapsed since the last tick.
    ///
    /// Shows the wait gauge only while the remaining wait exceeds
    /// [`WAIT_GAUGE_MIN_REMAINING`]; in the run-up to the next sample
    /// the panel keeps the running line instead of a nearly full gauge.
    pub fn update_wait(&mut self, elapsed: Duration) {
        if self.phase == Phase::Stopped || self.phase == Phase::Init {
            return;
        }
        let remaining = self.tick_interval.saturating_sub(elapsed);
        if remaining > WAIT_GAUGE_MIN_REMAINING {
            self.begin_wait(elapsed.as_secs_f64() / self.tick_interval.as_secs_f64());
        } else {
            self.phase = Phase::Running;
            self.wait_progress = 0.0;
        }
    }

    /// Request a clean stop (interrupt, quit key). Idempotent; safe to
    /// call from any phase.
    pub fn request_stop(&mut self) {
        if self.phase != Phase::Stopped {
            info!(uploads = self.num_uploads, "stop requested");
            self.phase = Phase::Stopped;
        }
    }

    /// Run one tick: sample every metric, upload fresh readings, and
    /// check the upload limit.
    ///
    /// Per-metric acquisition failures are logged and leave that metric
    /// degraded for this tick; they never abort the tick or the loop.
    pub fn tick(&mut self) {
        if self.phase == Phase::Stopped {
            return;
        }
        self.phase = Phase::Running;
        self.wait_progress = 0.0;

        let mut fresh = Vec::with_capacity(self.metrics.len());
        for metric in &mut self.metrics {
            match self.source.next_value(&metric.spec.id) {
                Ok(value) => {
                    metric.series.push(value);
                    metric.missed = false;
                    fresh.push(Reading {
                        metric: metric.spec.id.clone(),
                        value,
                        unit: metric.spec.unit.clone(),
                        recorded_at: Utc::now(),
                    });
                }
                Err(err) => {
                    warn!(metric = %metric.spec.id, error = %err, "sample acquisition failed");
                    metric.missed = true;
                }
            }
        }

        if !fresh.is_empty() {
            match self.uploader.send(&fresh) {
                Ok(()) => {
                    self.num_uploads += 1;
                    self.last_upload = Some((Local::now(), true));
                    info!(
                        readings = fresh.len(),
                        total = self.num_uploads,
                        "readings uploaded"
                    );
                }
                Err(err) => {
                    warn!(error = %err, "upload failed");
                    self.last_upload = Some((Local::now(), false));
                }
            }
        }

        self.next_upload_due = Some(Local::now() + self.tick_interval);

        if self.max_uploads > 0 && self.num_uploads >= self.max_uploads {
            info!(limit = self.max_uploads, "upload limit reached");
            self.phase = Phase::Stopped;
        }
    }

    /// Recompute the display row for every metric.
    pub fn rows(&self) -> Vec<DataRow> {
        self.metrics
            .iter()
            .map(|metric| {
                if metric.missed {
                    let spark = sparkline::render(
                        &metric.series,
                        &metric.spec.range,
                        &metric.spec.gradient,
                    );
                    DataRow::degraded(&metric.spec.label, &metric.spec.unit, spark)
                } else {
                    DataRow::format(
                        &metric.spec.label,
                        &metric.spec.unit,
                        &metric.series,
                        &metric.spec.range,
                        &metric.spec.gradient,
                        self.delta_factor,
                    )
                }
            })
            .collect()
    }

    /// Latest raw value per metric (exposed for host applications).
    pub fn latest_values(&self) -> Vec<(&str, Option<f64>)> {
        self.metrics
            .iter()
            .map(|m| (m.spec.id.as_str(), m.series.latest()))
            .collect()
    }
}
