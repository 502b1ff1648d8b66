//! Wrapping row layout.

use std::ops::Range;

use geom::{Expanse, Insets, Rect};

use crate::align::AlignPolicy;

/// Parameters for a wrapping left-to-right layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowLayout {
    /// Container width.
    pub width: u32,
    /// Padding between the container edge and the content.
    pub insets: Insets,
    /// Horizontal gap between items in a row.
    pub item_spacing: u32,
    /// Vertical gap between rows.
    pub line_spacing: u32,
}

/// The outcome of a flow layout pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowResult {
    /// One frame per input size, in input order.
    pub frames: Vec<Rect>,
    /// Item index ranges making up each row, top to bottom.
    pub rows: Vec<Range<usize>>,
    /// Total content size.
    pub extent: Expanse,
}

impl FlowLayout {
    /// A layout for a container of the given width with no padding or spacing.
    pub fn new(width: u32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Width available to items on one row.
    pub fn available_width(&self) -> u32 {
        self.width.saturating_sub(self.insets.horizontal())
    }

    /// Lay out `sizes` in rows, wrapping when the next item would overflow.
    /// An item wider than the row occupies a row of its own.
    pub fn layout(&self, sizes: &[Expanse], policy: &dyn AlignPolicy) -> FlowResult {
        let avail = self.available_width();
        let x0 = self.insets.x;

        let mut frames = Vec::with_capacity(sizes.len());
        let mut rows = Vec::new();
        let mut row_start = 0;
        let mut used = 0u32;
        let mut row_h = 0u32;
        let mut y = self.insets.y;

        for (i, size) in sizes.iter().enumerate() {
            let gap = if i > row_start { self.item_spacing } else { 0 };
            if i > row_start && used.saturating_add(gap).saturating_add(size.w) > avail {
                self.finish_row(&mut frames, row_start..i, y, row_h, policy);
                rows.push(row_start..i);
                y = y.saturating_add(row_h).saturating_add(self.line_spacing);
                row_start = i;
                used = 0;
                row_h = 0;
            }
            let gap = if i > row_start { self.item_spacing } else { 0 };
            let x = x0.saturating_add(used).saturating_add(gap);
            frames.push(Rect::new(x, y, size.w, size.h));
            used = used.saturating_add(gap).saturating_add(size.w);
            row_h = row_h.max(size.h);
        }

        let extent = if sizes.is_empty() {
            Expanse::new(self.width, 0)
        } else {
            self.finish_row(&mut frames, row_start..sizes.len(), y, row_h, policy);
            rows.push(row_start..sizes.len());
            Expanse::new(
                self.width,
                y.saturating_add(row_h).saturating_add(self.insets.y),
            )
        };

        FlowResult {
            frames,
            rows,
            extent,
        }
    }

    /// Hand a completed row to the alignment policy.
    fn finish_row(
        &self,
        frames: &mut [Rect],
        range: Range<usize>,
        y: u32,
        row_h: u32,
        policy: &dyn AlignPolicy,
    ) {
        let bounds = Rect::new(self.insets.x, y, self.available_width(), row_h);
        policy.align_row(&mut frames[range], bounds);
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::align::Alignment;

    fn sizes(ws: &[u32]) -> Vec<Expanse> {
        ws.iter().map(|w| Expanse::new(*w, 30)).collect()
    }

    #[test]
    fn wraps_rows() {
        let l = FlowLayout::new(100);
        let r = l.layout(&sizes(&[40, 40, 40, 90, 10]), &Alignment::top_left());
        assert_eq!(r.rows, vec![0..2, 2..3, 3..5]);
        assert_eq!(r.frames[1], Rect::new(40, 0, 40, 30));
        assert_eq!(r.frames[2], Rect::new(0, 30, 40, 30));
        assert_eq!(r.frames[4], Rect::new(90, 60, 10, 30));
        assert_eq!(r.extent, Expanse::new(100, 90));
    }

    #[test]
    fn centres_rows() {
        let l = FlowLayout::new(100);
        let r = l.layout(&sizes(&[40, 40, 40]), &Alignment::center_center());
        assert_eq!(r.frames[0].tl.x, 10);
        assert_eq!(r.frames[2], Rect::new(30, 30, 40, 30));
    }

    #[test]
    fn spacing_and_insets() {
        let l = FlowLayout {
            width: 100,
            insets: Insets::new(5, 4),
            item_spacing: 10,
            line_spacing: 2,
        };
        let r = l.layout(&sizes(&[40, 40, 40]), &Alignment::top_left());
        assert_eq!(r.frames[0], Rect::new(5, 4, 40, 30));
        assert_eq!(r.frames[1], Rect::new(55, 4, 40, 30));
        assert_eq!(r.frames[2], Rect::new(5, 36, 40, 30));
        assert_eq!(r.extent.h, 70);
    }

    #[test]
    fn oversized_item_gets_own_row() {
        let l = FlowLayout::new(50);
        let r = l.layout(&sizes(&[10, 80, 10]), &Alignment::top_left());
        assert_eq!(r.rows, vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn empty_layout() {
        let r = FlowLayout::new(80).layout(&[], &Alignment::default());
        assert!(r.frames.is_empty() && r.rows.is_empty());
        assert_eq!(r.extent, Expanse::new(80, 0));
    }

    proptest! {
        #[test]
        fn rows_never_overlap(ws in proptest::collection::vec(1u32..120, 0..40), width in 1u32..300) {
            let l = FlowLayout::new(width);
            let r = l.layout(&sizes(&ws), &Alignment::center_center());
            prop_assert_eq!(r.frames.len(), ws.len());
            let covered: usize = r.rows.iter().map(|row| row.len()).sum();
            prop_assert_eq!(covered, ws.len());
            for row in &r.rows {
                for i in row.clone() {
                    let f = r.frames[i];
                    if row.len() > 1 {
                        prop_assert!(f.right() <= width);
                    }
                    if i + 1 < row.end {
                        prop_assert!(f.right() <= r.frames[i + 1].tl.x);
                    }
                    prop_assert!(f.bottom() <= r.extent.h);
                }
            }
        }
    }
}
