use super::{Error, Expanse, Insets, Point, Result};

/// A rectangle.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Point,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl Rect {
    /// Construct a rectangle.
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            tl: Point { x, y },
            w,
            h,
        }
    }

    /// A zero-sized rectangle at the origin.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The rectangle's size.
    pub fn expanse(&self) -> Expanse {
        Expanse::new(self.w, self.h)
    }

    /// One past the rightmost column.
    pub fn right(&self) -> u32 {
        self.tl.x.saturating_add(self.w)
    }

    /// One past the bottom row.
    pub fn bottom(&self) -> u32 {
        self.tl.y.saturating_add(self.h)
    }

    /// Does the rectangle contain the point?
    pub fn contains_point(&self, p: impl Into<Point>) -> bool {
        let p = p.into();
        p.x >= self.tl.x && p.x < self.right() && p.y >= self.tl.y && p.y < self.bottom()
    }

    /// Do the two rectangles share any area? Zero-sized rectangles never intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        if self.w == 0 || self.h == 0 || other.w == 0 || other.h == 0 {
            return false;
        }
        self.tl.x < other.right()
            && other.tl.x < self.right()
            && self.tl.y < other.bottom()
            && other.tl.y < self.bottom()
    }

    /// Given a point that falls within this rectangle, rebase the point to be
    /// relative to our origin. If the point falls outside the rect, an error is
    /// returned.
    pub fn rebase(&self, pt: Point) -> Result<Point> {
        if !self.contains_point(pt) {
            return Err(Error::Geometry("co-ords outside rectangle".into()));
        }
        Ok(Point {
            x: pt.x - self.tl.x,
            y: pt.y - self.tl.y,
        })
    }

    /// Shrink the rectangle by the insets on every side. If the insets are
    /// larger than the rectangle, the result collapses to zero size at the
    /// clamped inset position.
    pub fn inset(&self, insets: Insets) -> Self {
        let x = self.tl.x.saturating_add(insets.x.min(self.w / 2));
        let y = self.tl.y.saturating_add(insets.y.min(self.h / 2));
        Self {
            tl: Point { x, y },
            w: self.w.saturating_sub(insets.horizontal()),
            h: self.h.saturating_sub(insets.vertical()),
        }
    }

    /// Place the rectangle at a new top-left corner.
    pub fn at(&self, tl: impl Into<Point>) -> Self {
        Self {
            tl: tl.into(),
            ..*self
        }
    }
}
