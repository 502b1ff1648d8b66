//! Objects that glide across the onboarding pages as the pager scrolls.
//!
//! A `TutorialObject` has keyframe points in content space, measured in
//! screen fractions: `(1.5, 0.65)` is the horizontal middle of page one, 65%
//! of the way down. Each keyframe is tied to the page its `x` falls in. When
//! the pager sits between two keyed pages the object's centre is interpolated
//! between their points, so an object keyed on consecutive pages appears
//! fixed on screen while its vertical position drifts. Outside the keyed
//! range the object holds its first or last point and scrolls with the
//! content.

use tagview::geom::Expanse;

/// Linear interpolation between two values.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Find the bracketing keys for `pos` and the fraction between them.
fn bracket<T: Copy>(keys: &[(f64, T)], pos: f64) -> Option<(T, T, f64)> {
    let (first, last) = (keys.first()?, keys.last()?);
    if pos <= first.0 {
        return Some((first.1, first.1, 0.0));
    }
    if pos >= last.0 {
        return Some((last.1, last.1, 0.0));
    }
    keys.windows(2).find_map(|w| {
        let (a, b) = (w[0], w[1]);
        (pos >= a.0 && pos <= b.0).then(|| {
            let span = b.0 - a.0;
            let t = if span > 0.0 { (pos - a.0) / span } else { 0.0 };
            (a.1, b.1, t)
        })
    })
}

/// Where an object lands on screen for one frame. The top left may be off
/// screen in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Left column.
    pub left: i64,
    /// Top row.
    pub top: i64,
    /// Size in cells.
    pub size: Expanse,
}

impl Placement {
    /// Does any part of the placement fall on a screen of this size?
    pub fn is_visible(&self, screen: Expanse) -> bool {
        let (w, h) = (i64::from(self.size.w), i64::from(self.size.h));
        w > 0
            && h > 0
            && self.left + w > 0
            && self.top + h > 0
            && self.left < i64::from(screen.w)
            && self.top < i64::from(screen.h)
    }
}

/// A screen element animated by page position.
#[derive(Debug, Clone, Default)]
pub struct TutorialObject {
    /// Centre keyframes, keyed by page.
    points: Vec<(f64, (f64, f64))>,
    /// Resize actions, keyed by page position.
    sizes: Vec<(f64, Expanse)>,
}

impl TutorialObject {
    /// Construct an object with no keyframes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the centre keyframes. Each is keyed on the page its `x` falls in.
    pub fn with_points(mut self, points: &[(f64, f64)]) -> Self {
        self.points = points.iter().map(|p| (p.0.floor(), *p)).collect();
        self.points.sort_by(|a, b| a.0.total_cmp(&b.0));
        self
    }

    /// Resize to `size` when the pager reaches `position`.
    pub fn resize_at(mut self, position: f64, size: impl Into<Expanse>) -> Self {
        self.sizes.push((position, size.into()));
        self.sizes.sort_by(|a, b| a.0.total_cmp(&b.0));
        self
    }

    /// Centre in content space, in screen fractions, at a page position.
    pub fn center_at(&self, position: f64) -> Option<(f64, f64)> {
        let ((ax, ay), (bx, by), t) = bracket(&self.points, position)?;
        Some((lerp(ax, bx, t), lerp(ay, by, t)))
    }

    /// Size at a page position, or `None` with no resize actions.
    pub fn size_at(&self, position: f64) -> Option<Expanse> {
        let (a, b, t) = bracket(&self.sizes, position)?;
        let w = lerp(f64::from(a.w), f64::from(b.w), t).round();
        let h = lerp(f64::from(a.h), f64::from(b.h), t).round();
        Some(Expanse::new(w as u32, h as u32))
    }

    /// Screen placement at a page position. `fallback` is used when the
    /// object has no resize actions.
    pub fn place(&self, position: f64, screen: Expanse, fallback: Expanse) -> Option<Placement> {
        let (cx, cy) = self.center_at(position)?;
        let size = self.size_at(position).unwrap_or(fallback);
        let (sw, sh) = (f64::from(screen.w), f64::from(screen.h));
        let left = (cx - position) * sw - f64::from(size.w) / 2.0;
        let top = cy * sh - f64::from(size.h) / 2.0;
        Some(Placement {
            left: left.round() as i64,
            top: top.round() as i64,
            size,
        })
    }
}
