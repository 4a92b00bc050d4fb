//! Sparkline projection: samples → colored block glyphs.
//!
//! A read-only projection of a [`SampleSeries`] into one glyph per sample.
//! Glyph height is scaled against the metric's *absolute* range rather
//! than the visible window, so the visual scale stays stable from one
//! refresh to the next.

use crate::data::{SampleSeries, ValidRange};
use crate::ui::palette::{Gradient, Rgb};

/// Block glyphs in increasing height order.
pub const SPARKLINE_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One glyph of a rendered sparkline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkCell {
    pub glyph: char,
    pub color: Rgb,
}

/// Render a series into colored glyphs, one per sample.
///
/// Out-of-range and non-finite samples clamp to the nearest glyph and
/// take the gradient's saturated endpoint color via their deviation
/// ratio. Zero or one samples produce a degenerate (empty or single-cell)
/// result without error.
pub fn render(series: &SampleSeries, range: &ValidRange, gradient: &Gradient) -> Vec<SparkCell> {
    series
        .iter()
        .map(|value| SparkCell {
            glyph: glyph_for(value, range),
            color: gradient.at(range.classify(value).deviation),
        })
        .collect()
}

/// Map a value to a glyph relative to the absolute range.
fn glyph_for(value: f64, range: &ValidRange) -> char {
    let span = range.absolute_max() - range.absolute_min();
    let t = if span > 0.0 && value.is_finite() {
        ((value - range.absolute_min()) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let idx = (t * (SPARKLINE_GLYPHS.len() - 1) as f64).round() as usize;
    SPARKLINE_GLYPHS[idx.min(SPARKLINE_GLYPHS.len() - 1)]
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
    fn test_output_length_matches_sample_count() {
        let range = demo_range();
        let gradient = Gradient::default();
        for n in 0..10 {
            let values: Vec<f64> = (0..n).map(|i| i as f64 * 10.0).collect();
            let cells = render(&series_of(&values), &range, &gradient);
            assert_eq!(cells.len(), n);
        }
    }

    #[test]
    fn test_degenerate_series_render_without_error() {
        let range = demo_range();
        let gradient = Gradient::default();
        assert!(render(&series_of(&[]), &range, &gradient).is_empty());
        assert_eq!(render(&series_of(&[50.0]), &range, &gradient).len(), 1);
    }

    #[test]
    fn test_glyph_height_scales_against_absolute_range() {
        let range = demo_range();
        let gradient = Gradient::default();
        let cells = render(&series_of(&[0.0, 50.0, 100.0]), &range, &gradient);
        assert_eq!(cells[0].glyph, '▁');
        assert_eq!(cells[2].glyph, '█');
        // Middle of the range lands mid-ladder regardless of window contents
        assert!(cells[1].glyph == '▄' || cells[1].glyph == '▅');
    }

    #[test]
    fn test_glyph_heights_monotonic_in_value() {
        let range = demo_range();
        let gradient = Gradient::default();
        let values: Vec<f64> = (0..=20).map(|i| i as f64 * 5.0).collect();
        let cells = render(&series_of(&values), &range, &gradient);
        let heights: Vec<usize> = cells
            .iter()
            .map(|c| SPARKLINE_GLYPHS.iter().position(|&g| g == c.glyph).unwrap())
            .collect();
        assert!(heights.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_render_is_pure_and_repeatable() {
        let range = demo_range();
        let gradient = Gradient::default();
        let series = series_of(&[10.0, 45.0, 80.0, 120.0]);
        let before: Vec<f64> = series.iter().collect();

        let first = render(&series, &range, &gradient);
        let second = render(&series, &range, &gradient);
        assert_eq!(first, second);
        assert_eq!(series.iter().collect::<Vec<f64>>(), before);
    }

    #[test]
    fn test_cells_colored_by_deviation() {
        let range = demo_range();
        let gradient = Gradient::default();
        let cells = render(&series_of(&[0.0, 50.0, 100.0]), &range, &gradient);
        assert_eq!(cells[0].color, gradient.low);
        assert_eq!(cells[1].color, gradient.normal);
        assert_eq!(cells[2].color, gradient.high);
    }

    #[test]
    fn test_out_of_range_samples_clamp() {
        let range = demo_range();
        let gradient = Gradient::default();
        let cells = render(&series_of(&[-50.0, 500.0]), &range, &gradient);
        assert_eq!(cells[0].glyph, '▁');
        assert_eq!(cells[1].glyph, '█');
        assert_eq!(cells[0].color, gradient.low);
        assert_eq!(cells[1].color, gradient.high);
    }
}
