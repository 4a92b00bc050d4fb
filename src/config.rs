//! Settings loading and eager validation.
//!
//! Settings arrive as TOML and are validated into typed [`MetricSpec`]s
//! at start-up: range ordering and every color name are checked here, so
//! the render path never has to handle a bad range or an unknown color.
//! Any problem is a fatal [`ConfigError`] raised before the dashboard
//! enters its run loop.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::data::{RangeError, ValidRange};
use crate::ui::palette::{Gradient, PaletteError};

const DEFAULT_TICK_INTERVAL_SECS: u64 = 5;
const DEFAULT_WINDOW: usize = 40;
const DEFAULT_DELTA_FACTOR: f64 = 0.02;
const DEFAULT_INVALID_COLOR: &str = "magenta";

/// Fatal start-up configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("metric '{metric}': {source}")]
    Range {
        metric: String,
        source: RangeError,
    },
    #[error("metric '{metric}': {source}")]
    Color {
        metric: String,
        source: PaletteError,
    },
    #[error("settings define no metrics")]
    NoMetrics,
    #[error("tick interval must be at least 1 second")]
    ZeroTickInterval,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    tick_interval: Option<u64>,
    window: Option<usize>,
    max_uploads: Option<u64>,
    delta_factor: Option<f64>,
    #[serde(default)]
    metric: Vec<RawMetric>,
}

#[derive(Debug, Deserialize)]
struct RawMetric {
    id: String,
    label: String,
    unit: String,
    range: RawRange,
    gradient: Option<RawGradient>,
}

#[derive(Debug, Deserialize)]
struct RawRange {
    absolute_min: f64,
    normal_min: f64,
    normal_max: f64,
    absolute_max: f64,
}

#[derive(Debug, Deserialize)]
struct RawGradient {
    low: String,
    normal: String,
    high: String,
    invalid: Option<String>,
}

/// Validated definition of one dashboard metric.
#[derive(Debug, Clone)]
pub struct MetricSpec {
    pub id: String,
    pub label: String,
    pub unit: String,
    pub range: ValidRange,
    pub gradient: Gradient,
}

/// Validated dashboard settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Time between dashboard ticks (sample pull + upload + redraw).
    pub tick_interval: Duration,
    /// Sample window capacity per metric.
    pub window: usize,
    /// Stop after this many successful uploads; 0 means unlimited.
    pub max_uploads: u64,
    /// Relative change below which a reading counts as "steady".
    pub delta_factor: f64,
    pub metrics: Vec<MetricSpec>,
}

impl Settings {
    /// Load and validate settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawSettings = toml::from_str(content)?;

        if raw.metric.is_empty() {
            return Err(ConfigError::NoMetrics);
        }
        let tick_secs = raw.tick_interval.unwrap_or(DEFAULT_TICK_INTERVAL_SECS);
        if tick_secs == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        let metrics = raw
            .metric
            .into_iter()
            .map(|m| {
                let range = ValidRange::new(
                    m.range.absolute_min,
                    m.range.normal_min,
                    m.range.normal_max,
                    m.range.absolute_max,
                )
                .map_err(|source| ConfigError::Range {
                    metric: m.id.clone(),
                    source,
                })?;

                let gradient = match m.gradient {
                    Some(g) => Gradient::from_names(
                        &g.low,
                        &g.normal,
                        &g.high,
                        g.invalid.as_deref().unwrap_or(DEFAULT_INVALID_COLOR),
                    )
                    .map_err(|source| ConfigError::Color {
                        metric: m.id.clone(),
                        source,
                    })?,
                    None => Gradient::default(),
                };

                Ok(MetricSpec {
                    id: m.id,
                    label: m.label,
                    unit: m.unit,
                    range,
                    gradient,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self {
            tick_interval: Duration::from_secs(tick_secs),
            window: raw.window.unwrap_or(DEFAULT_WINDOW).max(1),
            max_uploads: raw.max_uploads.unwrap_or(0),
            delta_factor: raw.delta_factor.unwrap_or(DEFAULT_DELTA_FACTOR),
            metrics,
        })
    }

    /// Built-in settings for the demo harness: two simulated channels in
    /// the spirit of a temperature/humidity sensor pair.
    pub fn demo() -> Self {
        Self::from_toml_str(
            r#"
            tick_interval = 2
            window = 40
            max_uploads = 0

            [[metric]]
            id = "number1"
            label = "Magic #"
            unit = ""
            range = { absolute_min = 0.0, normal_min = 40.0, normal_max = 160.0, absolute_max = 200.0 }
            gradient = { low = "red", normal = "green", high = "blue" }

            [[metric]]
            id = "number2"
            label = "Magic %"
            unit = "%"
            range = { absolute_min = 0.0, normal_min = 20.0, normal_max = 80.0, absolute_max = 100.0 }
            gradient = { low = "yellow", normal = "seagreen", high = "cyan" }
            "#,
        )
        .expect("built-in demo settings must be valid")
    }
}
