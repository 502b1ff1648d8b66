//! Text measurement and chip sizing.

use geom::{Expanse, Insets};
use serde::{Deserialize, Serialize};

use crate::text::display_width;

/// Fixed chip height, in layout units.
pub const CHIP_HEIGHT: u32 = 30;

/// Font size the measurer's column width is calibrated against.
pub const BASE_FONT_SIZE: u32 = 14;

/// Font description handed to a measurer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    /// Point size.
    pub size: u32,
    /// Bold face.
    pub bold: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            size: BASE_FONT_SIZE,
            bold: false,
        }
    }
}

/// Computes the rendered width of a string.
///
/// Implementations must be deterministic: the same text and font always
/// measure the same. The empty string measures zero.
pub trait TextMeasurer {
    /// Width of `text` rendered in `font`, in layout units.
    fn measure(&self, text: &str, font: &Font) -> u32;

    /// Width of `text`, clamped to `max`.
    fn measure_clamped(&self, text: &str, font: &Font, max: u32) -> u32 {
        self.measure(text, font).min(max)
    }
}

/// Measures text in terminal columns scaled to layout units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMeasurer {
    /// Layout units per terminal column at `BASE_FONT_SIZE`.
    column_width: u32,
}

impl CellMeasurer {
    /// Construct a measurer where one column at the base font size spans
    /// `column_width` layout units.
    pub fn new(column_width: u32) -> Self {
        Self { column_width }
    }

    /// Layout units per column.
    pub fn column_width(&self) -> u32 {
        self.column_width
    }
}

impl Default for CellMeasurer {
    fn default() -> Self {
        Self::new(8)
    }
}

impl TextMeasurer for CellMeasurer {
    fn measure(&self, text: &str, font: &Font) -> u32 {
        let cols = u32::try_from(display_width(text)).unwrap_or(u32::MAX);
        let unit = self.column_width.saturating_mul(font.size) / BASE_FONT_SIZE;
        cols.saturating_mul(unit)
    }
}

/// Width of a chip whose label measures `measured`, inside a container
/// `container_width` wide.
pub fn chip_width(measured: u32, space: Insets, container_width: u32) -> u32 {
    let natural = measured.saturating_add(space.x.saturating_mul(4));
    natural.min(container_width.saturating_sub(space.horizontal()))
}

/// Full chip size for a measured label.
pub fn chip_size(measured: u32, space: Insets, container_width: u32) -> Expanse {
    Expanse::new(chip_width(measured, space, container_width), CHIP_HEIGHT)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn cell_measurer_scales_columns() {
        let m = CellMeasurer::new(8);
        let f = Font::default();
        assert_eq!(m.measure("", &f), 0);
        assert_eq!(m.measure("crazy", &f), 40);
        assert_eq!(m.measure("界", &f), 16);
        let big = Font {
            size: 28,
            bold: true,
        };
        assert_eq!(m.measure("ab", &big), 32);
        assert_eq!(m.measure_clamped("crazy", &f, 10), 10);
    }

    #[test]
    fn width_clamps_to_container() {
        let space = Insets::new(3, 0);
        assert_eq!(chip_width(20, space, 100), 32);
        assert_eq!(chip_width(200, space, 100), 94);
        assert_eq!(chip_width(0, Insets::default(), 0), 0);
        assert_eq!(chip_size(5, Insets::default(), 50).h, CHIP_HEIGHT);
    }

    proptest! {
        #[test]
        fn width_rule(text in "\\PC{0,24}", inset in 0u32..20, container in 0u32..400) {
            let m = CellMeasurer::new(8);
            let space = Insets::new(inset, 0);
            let measured = m.measure(&text, &Font::default());
            let w = chip_width(measured, space, container);
            let limit = container.saturating_sub(2 * inset);
            if measured + 4 * inset <= limit {
                prop_assert_eq!(w, measured + 4 * inset);
            } else {
                prop_assert_eq!(w, limit);
            }
        }

        #[test]
        fn measurement_is_deterministic(text in "\\PC{0,24}") {
            let m = CellMeasurer::default();
            prop_assert_eq!(m.measure(&text, &Font::default()), m.measure(&text, &Font::default()));
        }
    }
}
