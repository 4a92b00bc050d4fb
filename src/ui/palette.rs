//! Named colors and low/normal/high gradients.
//!
//! The color table is a read-only constant resolved once at configuration
//! load; render code only ever sees concrete [`Rgb`] triples. Unknown
//! color names fail loudly at the settings boundary, never at draw time.

use ratatui::style::Color;
use thiserror::Error;

use crate::data::Zone;

#[derive(Debug, Error, PartialEq)]
pub enum PaletteError {
    #[error("unknown color name: '{0}'")]
    ColorNotFound(String),
}

/// An RGB triple with channels in `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

/// Name → RGB table, sorted by name for binary search.
///
/// A subset of the classic X11/web color constants, covering the names
/// sensor applications actually put in their settings files. Both `gray`
/// and `grey` spellings resolve.
const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("aqua", Rgb(0, 255, 255)),
    ("aquamarine", Rgb(127, 255, 212)),
    ("azure", Rgb(240, 255, 255)),
    ("beige", Rgb(245, 245, 220)),
    ("black", Rgb(0, 0, 0)),
    ("blue", Rgb(0, 0, 255)),
    ("blueviolet", Rgb(138, 43, 226)),
    ("brown", Rgb(165, 42, 42)),
    ("cadetblue", Rgb(95, 158, 160)),
    ("chartreuse", Rgb(127, 255, 0)),
    ("chocolate", Rgb(210, 105, 30)),
    ("coral", Rgb(255, 127, 80)),
    ("cornflowerblue", Rgb(100, 149, 237)),
    ("crimson", Rgb(220, 20, 60)),
    ("cyan", Rgb(0, 255, 255)),
    ("darkgoldenrod", Rgb(184, 134, 11)),
    ("darkgray", Rgb(169, 169, 169)),
    ("darkgreen", Rgb(0, 100, 0)),
    ("darkgrey", Rgb(169, 169, 169)),
    ("darkkhaki", Rgb(189, 183, 107)),
    ("darkorange", Rgb(255, 140, 0)),
    ("darkorchid", Rgb(153, 50, 204)),
    ("darksalmon", Rgb(233, 150, 122)),
    ("darkseagreen", Rgb(143, 188, 143)),
    ("darkslateblue", Rgb(72, 61, 139)),
    ("darkslategray", Rgb(47, 79, 79)),
    ("darkturquoise", Rgb(0, 206, 209)),
    ("darkviolet", Rgb(148, 0, 211)),
    ("deeppink", Rgb(255, 20, 147)),
    ("deepskyblue", Rgb(0, 191, 255)),
    ("dimgray", Rgb(105, 105, 105)),
    ("dodgerblue", Rgb(30, 144, 255)),
    ("firebrick", Rgb(178, 34, 34)),
    ("forestgreen", Rgb(34, 139, 34)),
    ("gold", Rgb(255, 215, 0)),
    ("goldenrod", Rgb(218, 165, 32)),
    ("gray", Rgb(128, 128, 128)),
    ("green", Rgb(0, 128, 0)),
    ("greenyellow", Rgb(173, 255, 47)),
    ("grey", Rgb(128, 128, 128)),
    ("hotpink", Rgb(255, 105, 180)),
    ("indianred", Rgb(205, 92, 92)),
    ("indigo", Rgb(75, 0, 130)),
    ("ivory", Rgb(255, 255, 240)),
    ("khaki", Rgb(240, 230, 140)),
    ("lavender", Rgb(230, 230, 250)),
    ("lawngreen", Rgb(124, 252, 0)),
    ("lightblue", Rgb(173, 216, 230)),
    ("lightcoral", Rgb(240, 128, 128)),
    ("lightgray", Rgb(211, 211, 211)),
    ("lightgreen", Rgb(144, 238, 144)),
    ("lightgrey", Rgb(211, 211, 211)),
    ("lightpink", Rgb(255, 182, 193)),
    ("lightsalmon", Rgb(255, 160, 122)),
    ("lightseagreen", Rgb(32, 178, 170)),
    ("lightskyblue", Rgb(135, 206, 250)),
    ("lightyellow", Rgb(255, 255, 224)),
    ("lime", Rgb(0, 255, 0)),
    ("limegreen", Rgb(50, 205, 50)),
    ("magenta", Rgb(255, 0, 255)),
    ("maroon", Rgb(128, 0, 0)),
    ("mediumblue", Rgb(0, 0, 205)),
    ("mediumorchid", Rgb(186, 85, 211)),
    ("mediumpurple", Rgb(147, 112, 219)),
    ("mediumseagreen", Rgb(60, 179, 113)),
    ("midnightblue", Rgb(25, 25, 112)),
    ("navy", Rgb(0, 0, 128)),
    ("olive", Rgb(128, 128, 0)),
    ("orange", Rgb(255, 165, 0)),
    ("orangered", Rgb(255, 69, 0)),
    ("orchid", Rgb(218, 112, 214)),
    ("peru", Rgb(205, 133, 63)),
    ("pink", Rgb(255, 192, 203)),
    ("plum", Rgb(221, 160, 221)),
    ("purple", Rgb(128, 0, 128)),
    ("red", Rgb(255, 0, 0)),
    ("rosybrown", Rgb(188, 143, 143)),
    ("royalblue", Rgb(65, 105, 225)),
    ("salmon", Rgb(250, 128, 114)),
    ("seagreen", Rgb(46, 139, 87)),
    ("sienna", Rgb(160, 82, 45)),
    ("silver", Rgb(192, 192, 192)),
    ("skyblue", Rgb(135, 206, 235)),
    ("slateblue", Rgb(106, 90, 205)),
    ("slategray", Rgb(112, 128, 144)),
    ("springgreen", Rgb(0, 255, 127)),
    ("steelblue", Rgb(70, 130, 180)),
    ("tan", Rgb(210, 180, 140)),
    ("teal", Rgb(0, 128, 128)),
    ("tomato", Rgb(255, 99, 71)),
    ("turquoise", Rgb(64, 224, 208)),
    ("violet", Rgb(238, 130, 238)),
    ("wheat", Rgb(245, 222, 179)),
    ("white", Rgb(255, 255, 255)),
    ("yellow", Rgb(255, 255, 0)),
    ("yellowgreen", Rgb(154, 205, 50)),
];

/// Resolve a color name to its RGB triple.
///
/// Names are matched case-insensitively. Callers are expected to do this
/// at configuration load and hold on to the `Rgb`.
pub fn lookup(name: &str) -> Result<Rgb, PaletteError> {
    let needle = name.trim().to_ascii_lowercase();
    NAMED_COLORS
        .binary_search_by_key(&needle.as_str(), |&(n, _)| n)
        .map(|i| NAMED_COLORS[i].1)
        .map_err(|_| PaletteError::ColorNotFound(name.to_string()))
}

/// Three-point color set for one metric, plus the fault color.
///
/// `low`/`normal`/`high` color the below/within/above zones; `invalid`
/// marks readings outside the absolute range and must stay visually
/// distinct from the other three.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    pub low: Rgb,
    pub normal: Rgb,
    pub high: Rgb,
    pub invalid: Rgb,
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            low: Rgb(255, 0, 0),
            normal: Rgb(0, 128, 0),
            high: Rgb(0, 0, 255),
            invalid: Rgb(255, 0, 255),
        }
    }
}

impl Gradient {
    /// Resolve a gradient from color names, failing on any unknown name.
    pub fn from_names(
        low: &str,
        normal: &str,
        high: &str,
        invalid: &str,
    ) -> Result<Self, PaletteError> {
        Ok(Self {
            low: lookup(low)?,
            normal: lookup(normal)?,
            high: lookup(high)?,
            invalid: lookup(invalid)?,
        })
    }

    /// Discrete mode: the color for a classification zone.
    pub fn for_zone(&self, zone: Zone) -> Rgb {
        match zone {
            Zone::BelowNormal => self.low,
            Zone::Normal => self.normal,
            Zone::AboveNormal => self.high,
            Zone::Invalid => self.invalid,
        }
    }

    /// Continuous mode: interpolate along the gradient for a deviation
    /// ratio in `[-1, 1]`.
    ///
    /// Negative ratios blend `normal` toward `low`, positive ratios blend
    /// `normal` toward `high`. Ratios outside the range are clamped, so
    /// `at(-1) == low`, `at(0) == normal`, `at(1) == high` exactly.
    pub fn at(&self, ratio: f64) -> Rgb {
        let ratio = ratio.clamp(-1.0, 1.0);
        if ratio < 0.0 {
            lerp(self.normal, self.low, -ratio)
        } else {
            lerp(self.normal, self.high, ratio)
        }
    }
}

/// Per-channel linear interpolation, rounding to the nearest integer.
fn lerp(from: Rgb, to: Rgb, t: f64) -> Rgb {
    let channel = |a: u8, b: u8| -> u8 {
        let v = f64::from(a) + t * (f64::from(b) - f64::from(a));
        v.round().clamp(0.0, 255.0) as u8
    };
    Rgb(
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_for_binary_search() {
        let mut prev = "";
        for &(name, _) in NAMED_COLORS {
            assert!(name > prev, "table out of order at '{name}'");
            prev = name;
        }
    }

    #[test]
    fn test_lookup_known_names() {
        assert_eq!(lookup("red").unwrap(), Rgb(255, 0, 0));
        assert_eq!(lookup("GREEN").unwrap(), Rgb(0, 128, 0));
        assert_eq!(lookup(" blue ").unwrap(), Rgb(0, 0, 255));
        // Both spellings resolve to the same triple
        assert_eq!(lookup("gray").unwrap(), lookup("grey").unwrap());
    }

    #[test]
    fn test_lookup_unknown_name_fails() {
        assert_eq!(
            lookup("notacolor"),
            Err(PaletteError::ColorNotFound("notacolor".to_string()))
        );
    }

    #[test]
    fn test_gradient_endpoints_are_exact() {
        let g = Gradient::default();
        assert_eq!(g.at(-1.0), g.low);
        assert_eq!(g.at(0.0), g.normal);
        assert_eq!(g.at(1.0), g.high);
    }

    #[test]
    fn test_gradient_clamps_out_of_range_ratios() {
        let g = Gradient::default();
        assert_eq!(g.at(-3.0), g.low);
        assert_eq!(g.at(7.5), g.high);
    }

    #[test]
    fn test_gradient_midpoints_interpolate() {
        let g = Gradient {
            low: Rgb(0, 0, 0),
            normal: Rgb(100, 100, 100),
            high: Rgb(200, 0, 0),
            invalid: Rgb(255, 0, 255),
        };
        assert_eq!(g.at(-0.5), Rgb(50, 50, 50));
        assert_eq!(g.at(0.5), Rgb(150, 50, 50));
    }

    #[test]
    fn test_discrete_zone_colors() {
        let g = Gradient::default();
        assert_eq!(g.for_zone(Zone::BelowNormal), g.low);
        assert_eq!(g.for_zone(Zone::Normal), g.normal);
        assert_eq!(g.for_zone(Zone::AboveNormal), g.high);
        assert_eq!(g.for_zone(Zone::Invalid), g.invalid);
    }

    #[test]
    fn test_from_names_validates_every_slot() {
        assert!(Gradient::from_names("red", "green", "blue", "magenta").is_ok());
        assert!(Gradient::from_names("red", "green", "nope", "magenta").is_err());
    }
}
