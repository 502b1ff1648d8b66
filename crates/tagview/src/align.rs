//! Row alignment policies.

use geom::Rect;
use serde::{Deserialize, Serialize};

/// Positions the items of one laid-out row.
///
/// The flow layout packs each row's items left to right from `bounds.tl.x`,
/// top-aligned at `bounds.tl.y`, then hands the row to the policy. `bounds`
/// spans the full available row width and the height of the row's tallest
/// item. Policies may only move items, never resize them.
pub trait AlignPolicy {
    /// Adjust the frames of a single row in place.
    fn align_row(&self, row: &mut [Rect], bounds: Rect);
}

/// Horizontal placement of a row within the available width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    /// Rows start at the left edge.
    Left,
    /// Rows are centred.
    #[default]
    Center,
    /// Rows end at the right edge.
    Right,
}

/// Vertical placement of an item within its row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    /// Items sit on the top of the row.
    Top,
    /// Items are centred in the row.
    #[default]
    Center,
    /// Items sit on the bottom of the row.
    Bottom,
}

/// The built-in alignment policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Alignment {
    /// Horizontal placement of each row.
    pub horizontal: HAlign,
    /// Vertical placement of items within a row.
    pub vertical: VAlign,
}

impl Alignment {
    /// Construct an alignment.
    pub fn new(horizontal: HAlign, vertical: VAlign) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Rows centred horizontally, items centred vertically.
    pub fn center_center() -> Self {
        Self::new(HAlign::Center, VAlign::Center)
    }

    /// Rows packed to the top left.
    pub fn top_left() -> Self {
        Self::new(HAlign::Left, VAlign::Top)
    }
}

impl AlignPolicy for Alignment {
    fn align_row(&self, row: &mut [Rect], bounds: Rect) {
        let (Some(first), Some(last)) = (row.first(), row.last()) else {
            return;
        };
        let used = last.right().saturating_sub(first.tl.x);
        let slack = bounds.w.saturating_sub(used);
        let dx = match self.horizontal {
            HAlign::Left => 0,
            HAlign::Center => slack / 2,
            HAlign::Right => slack,
        };
        for r in row.iter_mut() {
            let vslack = bounds.h.saturating_sub(r.h);
            let dy = match self.vertical {
                VAlign::Top => 0,
                VAlign::Center => vslack / 2,
                VAlign::Bottom => vslack,
            };
            r.tl.x = r.tl.x.saturating_add(dx);
            r.tl.y = bounds.tl.y.saturating_add(dy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Vec<Rect> {
        vec![Rect::new(0, 0, 10, 30), Rect::new(10, 0, 20, 20)]
    }

    #[test]
    fn horizontal_placement() {
        let bounds = Rect::new(0, 0, 100, 30);

        let mut r = row();
        Alignment::top_left().align_row(&mut r, bounds);
        assert_eq!(r, row());

        let mut r = row();
        Alignment::new(HAlign::Center, VAlign::Top).align_row(&mut r, bounds);
        assert_eq!(r[0].tl.x, 35);
        assert_eq!(r[1].tl.x, 45);

        let mut r = row();
        Alignment::new(HAlign::Right, VAlign::Top).align_row(&mut r, bounds);
        assert_eq!(r[1].right(), 100);
    }

    #[test]
    fn vertical_placement() {
        let bounds = Rect::new(0, 40, 100, 30);
        let mut r = row();
        Alignment::center_center().align_row(&mut r, bounds);
        assert_eq!(r[0].tl.y, 40);
        assert_eq!(r[1].tl.y, 45);

        let mut r = row();
        Alignment::new(HAlign::Left, VAlign::Bottom).align_row(&mut r, bounds);
        assert_eq!(r[1].tl.y, 50);
    }

    #[test]
    fn empty_row_is_untouched() {
        let mut r: Vec<Rect> = vec![];
        Alignment::default().align_row(&mut r, Rect::new(0, 0, 10, 10));
        assert!(r.is_empty());
    }
}
