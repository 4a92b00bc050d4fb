//! Per-metric dashboard rows: label, current value, trend, sparkline.
//!
//! A [`DataRow`] is derived state, recomputed from the sample series on
//! every tick and never persisted. Formatting problems (no reading yet,
//! non-finite sample) degrade to placeholder rows for that metric only.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::data::{SampleSeries, ValidRange, Zone};
use crate::ui::palette::{Gradient, Rgb};
use crate::ui::sparkline::{self, SparkCell};

/// Shown when a metric has no reading yet.
pub const BLANK_VALUE: &str = "--";
/// Shown when the latest reading cannot be formatted.
pub const ERROR_VALUE: &str = "Error";

const CHAR_UP: char = '↑';
const CHAR_STEADY: char = '↔';
const CHAR_DOWN: char = '↓';
const CHAR_NONE: char = ' ';

/// Direction of the latest reading relative to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Steady,
    Down,
    /// No previous reading to compare against.
    Unknown,
}

impl Trend {
    pub fn symbol(self) -> char {
        match self {
            Trend::Up => CHAR_UP,
            Trend::Steady => CHAR_STEADY,
            Trend::Down => CHAR_DOWN,
            Trend::Unknown => CHAR_NONE,
        }
    }
}

/// Compare two readings, treating changes within `delta_factor` of the
/// previous value as steady. Evens out minor jitter between readings.
pub fn trend_between(latest: Option<f64>, previous: Option<f64>, delta_factor: f64) -> Trend {
    let (Some(latest), Some(previous)) = (latest, previous) else {
        return Trend::Unknown;
    };
    let lower = previous * (1.0 - delta_factor);
    let upper = previous * (1.0 + delta_factor);
    // A negative previous value flips the band bounds
    let (lower, upper) = if lower <= upper { (lower, upper) } else { (upper, lower) };
    if latest > upper {
        Trend::Up
    } else if latest < lower {
        Trend::Down
    } else {
        Trend::Steady
    }
}

/// How the current-value cell should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    /// Normal reading with a zone color.
    Live,
    /// No reading yet; dashes and a blank sparkline.
    Blank,
    /// Latest reading invalid or unformattable.
    Errored,
}

/// One fully composed dashboard row for a metric.
#[derive(Debug, Clone)]
pub struct DataRow {
    pub label: String,
    pub state: RowState,
    pub trend: Trend,
    pub value_text: String,
    pub value_color: Rgb,
    pub spark: Vec<SparkCell>,
}

impl DataRow {
    /// Compose a row from the metric's current window.
    ///
    /// Classifies the latest sample, renders the sparkline, and picks the
    /// discrete zone color for the value cell. Empty windows and
    /// non-finite latest samples produce placeholder rows instead of
    /// failing.
    pub fn format(
        label: &str,
        unit: &str,
        series: &SampleSeries,
        range: &ValidRange,
        gradient: &Gradient,
        delta_factor: f64,
    ) -> Self {
        let spark = sparkline::render(series, range, gradient);

        let Some(latest) = series.latest() else {
            return Self {
                label: label.to_string(),
                state: RowState::Blank,
                trend: Trend::Unknown,
                value_text: format!("{CHAR_NONE} {BLANK_VALUE:>8} {unit}"),
                value_color: Rgb(128, 128, 128),
                spark,
            };
        };

        if !latest.is_finite() {
            return Self {
                label: label.to_string(),
                state: RowState::Errored,
                trend: Trend::Unknown,
                value_text: format!("{CHAR_NONE} {ERROR_VALUE:>8}"),
                value_color: gradient.invalid,
                spark,
            };
        }

        let classification = range.classify(latest);
        let trend = trend_between(Some(latest), series.previous(), delta_factor);
        let state = if classification.zone == Zone::Invalid {
            RowState::Errored
        } else {
            RowState::Live
        };

        Self {
            label: label.to_string(),
            state,
            trend,
            value_text: format!("{} {latest:>8.2} {unit}", trend.symbol()),
            value_color: gradient.for_zone(classification.zone),
            spark,
        }
    }

    /// Row for a metric whose acquisition failed this tick: blank current
    /// value, but the accumulated sparkline is kept on screen.
    pub fn degraded(label: &str, unit: &str, spark: Vec<SparkCell>) -> Self {
        Self {
            label: label.to_string(),
            state: RowState::Blank,
            trend: Trend::Unknown,
            value_text: format!("{CHAR_NONE} {BLANK_VALUE:>8} {unit}"),
            value_color: Rgb(128, 128, 128),
            spark,
        }
    }

    /// The current-value cell as a styled line.
    pub fn value_line(&self) -> Line<'static> {
        Line::from(Span::styled(
            self.value_text.clone(),
            Style::default().fg(Color::from(self.value_color)),
        ))
    }

    /// The sparkline cell as one span per glyph.
    pub fn spark_line(&self) -> Line<'static> {
        let spans: Vec<Span<'static>> = self
            .spark
            .iter()
            .map(|cell| {
                Span::styled(
                    cell.glyph.to_string(),
                    Style::default().fg(Color::from(cell.color)),
                )
            })
            .collect();
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SampleSeries;

    fn demo_range() -> ValidRange {
        ValidRange::new(0.0, 40.0, 60.0, 100.0).unwrap()
    }

    fn series_of(values: &[f64]) -> SampleSeries {
        let mut s = SampleSeries::new(40);
        for &v in values {
            s.push(v);
        }
        s
    }

    #[test]
    fn test_empty_series_renders_placeholder() {
        let row = DataRow::format(
            "Temp",
            "C",
            &series_of(&[]),
            &demo_range(),
            &Gradient::default(),
            0.02,
        );
        assert_eq!(row.state, RowState::Blank);
        assert!(row.value_text.contains(BLANK_VALUE));
        assert!(row.spark.is_empty());
    }

    #[test]
    fn test_live_row_uses_zone_color() {
        let gradient = Gradient::default();
        let row = DataRow::format(
            "Temp",
            "C",
            &series_of(&[20.0]),
            &demo_range(),
            &gradient,
            0.02,
        );
        assert_eq!(row.state, RowState::Live);
        assert_eq!(row.value_color, gradient.low);
        assert!(row.value_text.contains("20.00"));
    }

    #[test]
    fn test_invalid_reading_renders_errored() {
        let gradient = Gradient::default();
        let row = DataRow::format(
            "Temp",
            "C",
            &series_of(&[50.0, 150.0]),
            &demo_range(),
            &gradient,
            0.02,
        );
        assert_eq!(row.state, RowState::Errored);
        assert_eq!(row.value_color, gradient.invalid);
    }

    #[test]
    fn test_nan_reading_renders_error_text() {
        let row = DataRow::format(
            "Temp",
            "C",
            &series_of(&[50.0, f64::NAN]),
            &demo_range(),
            &Gradient::default(),
            0.02,
        );
        assert_eq!(row.state, RowState::Errored);
        assert!(row.value_text.contains(ERROR_VALUE));
        // Still renders a sparkline cell per sample
        assert_eq!(row.spark.len(), 2);
    }

    #[test]
    fn test_trend_directions() {
        assert_eq!(trend_between(Some(110.0), Some(100.0), 0.02), Trend::Up);
        assert_eq!(trend_between(Some(90.0), Some(100.0), 0.02), Trend::Down);
        assert_eq!(trend_between(Some(101.0), Some(100.0), 0.02), Trend::Steady);
        assert_eq!(trend_between(Some(100.0), None, 0.02), Trend::Unknown);
        assert_eq!(trend_between(None, Some(100.0), 0.02), Trend::Unknown);
    }

    #[test]
    fn test_trend_band_with_negative_previous() {
        assert_eq!(trend_between(Some(-90.0), Some(-100.0), 0.02), Trend::Up);
        assert_eq!(trend_between(Some(-110.0), Some(-100.0), 0.02), Trend::Down);
        assert_eq!(trend_between(Some(-100.5), Some(-100.0), 0.02), Trend::Steady);
    }

    #[test]
    fn test_trend_arrow_shown_in_value_text() {
        let row = DataRow::format(
            "Temp",
            "C",
            &series_of(&[40.0, 55.0]),
            &demo_range(),
            &Gradient::default(),
            0.02,
        );
        assert_eq!(row.trend, Trend::Up);
        assert!(row.value_text.starts_with('↑'));
    }
}
