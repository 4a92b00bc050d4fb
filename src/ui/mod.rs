//! Terminal rendering: colors, sparklines, rows, and the dashboard.
//!
//! Composition runs bottom-up: the palette colors classifications, the
//! sparkline projects a sample window through the palette, a row bundles
//! label + value + sparkline, and the dashboard lays rows out with the
//! logo and status panels.

pub mod dashboard;
pub mod logo;
pub mod palette;
pub mod row;
pub mod sparkline;

pub use logo::Logo;
pub use palette::{Gradient, PaletteError, Rgb};
pub use row::{DataRow, RowState, Trend};
pub use sparkline::{SparkCell, SPARKLINE_GLYPHS};
