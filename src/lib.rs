//! # sensordeck
//!
//! A terminal dashboard toolkit for sensor readings: range classification,
//! color-graded sparklines, and a live upload status panel.
//!
//! This crate provides the building blocks for small sensor monitors that
//! sample one or more metrics on a fixed interval, render them as a compact
//! terminal dashboard, and forward each batch of readings to an uploader.
//!
//! ## Architecture
//!
//! The crate is organized into five main modules:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Application                           │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal │ │
//! │  │ (loop)  │    │(classify)│    │(render) │    │          │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └──────────┘ │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  ┌─────────┐                         ┌─────────┐             │
//! │  │ source  │◀─ Simulated | Channel   │  cloud  │──▶ Uploader │
//! │  │ (input) │                         │(output) │             │
//! │  └─────────┘                         └─────────┘             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: The sampling loop state machine: tick scheduling, upload
//!   counting, and the stop conditions (upload limit or user request)
//! - **[`data`]**: Value classification against a [`ValidRange`] and the
//!   bounded [`SampleSeries`] history behind each sparkline
//! - **[`source`]**: The [`SampleSource`] trait with a random-walk
//!   [`SimulatedSource`] and a channel-backed [`ChannelSource`]
//! - **[`ui`]**: Terminal rendering using ratatui: the data table with
//!   color-graded sparklines, the upload status panel, and the logo banner
//! - **[`cloud`]**: The [`Uploader`] trait and a JSON-lines implementation
//!
//! ## Usage
//!
//! ```no_run
//! use sensordeck::{App, JsonLinesUploader, Settings, SimulatedSource};
//!
//! let settings = Settings::demo();
//! let mut source = SimulatedSource::new();
//! for metric in &settings.metrics {
//!     source.register_range(&metric.id, &metric.range);
//! }
//! let uploader = JsonLinesUploader::new(std::io::sink(), "discard");
//!
//! let mut app = App::new(&settings, Box::new(source), Box::new(uploader));
//! app.start();
//! while !app.is_stopped() {
//!     app.tick();
//! }
//! ```

pub mod app;
pub mod cloud;
pub mod config;
pub mod data;
pub mod events;
pub mod source;
pub mod ui;

pub use app::{App, Phase};
pub use cloud::{JsonLinesUploader, Reading, UploadError, Uploader};
pub use config::{ConfigError, MetricSpec, Settings};
pub use data::{Classification, RangeError, SampleSeries, ValidRange, Zone};
pub use source::{ChannelSource, ReadingBatch, SampleError, SampleSource, SimulatedSource};
pub use ui::{
    DataRow, Gradient, Logo, PaletteError, Rgb, RowState, SparkCell, Trend, SPARKLINE_GLYPHS,
};
