//! Drawing a tag collection onto a cell canvas.

use geom::{Point, Rect};

use crate::{
    canvas::Canvas,
    chip::{Chip, LabelText},
    collection::TagCollection,
    error::{Error, Result},
    style::{Attr, AttrSet},
    text::display_width,
};

/// Maps layout units onto terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellScale {
    /// Layout units per column.
    pub x: u32,
    /// Layout units per row.
    pub y: u32,
}

impl Default for CellScale {
    fn default() -> Self {
        Self { x: 8, y: 10 }
    }
}

impl CellScale {
    /// Construct a scale, treating zero as one.
    pub fn new(x: u32, y: u32) -> Self {
        Self {
            x: x.max(1),
            y: y.max(1),
        }
    }

    /// Project a layout-unit rectangle onto cells.
    pub fn project(&self, r: Rect) -> Rect {
        let x0 = r.tl.x / self.x;
        let y0 = r.tl.y / self.y;
        Rect::new(x0, y0, r.right() / self.x - x0, r.bottom() / self.y - y0)
    }

    /// Map a cell position back to layout units, at the cell's top left.
    pub fn unproject(&self, p: Point) -> Point {
        Point {
            x: p.x.saturating_mul(self.x),
            y: p.y.saturating_mul(self.y),
        }
    }
}

/// Attributes used when drawing chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    /// Attributes for chip borders.
    pub border: AttrSet,
    /// Base attributes for labels, merged with styled spans.
    pub label: AttrSet,
    /// Draw borders around chips that are tall and wide enough.
    pub borders: bool,
    /// Embolden chips whose content was re-fetched by the last layout pass.
    pub highlight_updates: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            border: AttrSet::new(Attr::Dim),
            label: AttrSet::default(),
            borders: true,
            highlight_updates: false,
        }
    }
}

/// Draw every visible chip of `tags`. `origin` is the canvas cell where the
/// collection's viewport begins. Chips partly scrolled off the top are
/// clipped at `origin`.
pub fn render_tags(
    tags: &TagCollection,
    canvas: &mut Canvas,
    origin: Point,
    scale: CellScale,
    style: &RenderStyle,
) -> Result<()> {
    let size = canvas.size();
    if origin.x >= size.w || origin.y >= size.h {
        return Err(Error::Render(format!(
            "origin {origin:?} outside canvas {size:?}"
        )));
    }
    let scroll_rows = i64::from(tags.scroll_offset() / scale.y);
    let updated = &tags.last_changes().updated;
    let mut viewport = Canvas::new((size.w - origin.x, size.h - origin.y));

    for chip in tags.visible_chips() {
        let cells = scale.project(chip.frame());
        if i64::from(cells.bottom()) <= scroll_rows {
            continue;
        }
        let mut label = style.label;
        if style.highlight_updates && chip.index().is_some_and(|i| updated.contains(&i)) {
            label = label.with(Attr::Bold);
        }
        let mut block = Canvas::new(cells.expanse());
        draw_chip(&mut block, chip, cells.expanse().rect(), label, style);
        viewport.blit(
            &block,
            i64::from(cells.tl.x),
            i64::from(cells.tl.y) - scroll_rows,
        );
    }
    canvas.blit(&viewport, i64::from(origin.x), i64::from(origin.y));
    Ok(())
}

/// Draw one chip into its cell rectangle.
fn draw_chip(canvas: &mut Canvas, chip: &Chip, cells: Rect, label: AttrSet, style: &RenderStyle) {
    let boxed = style.borders && cells.w >= 3 && cells.h >= 3;
    let inner = if boxed {
        canvas.draw_box(cells, style.border);
        Rect::new(cells.tl.x + 1, cells.tl.y + 1, cells.w - 2, cells.h - 2)
    } else {
        cells
    };
    if inner.w == 0 || inner.h == 0 {
        return;
    }

    let text = chip.label().text.plain();
    let width = u32::try_from(display_width(&text)).unwrap_or(u32::MAX);
    let pad = inner.w.saturating_sub(width) / 2;
    let mut at = Point {
        x: inner.tl.x + pad,
        y: inner.tl.y + (inner.h - 1) / 2,
    };
    let mut room = inner.w - pad;

    match &chip.label().text {
        LabelText::Empty => {}
        LabelText::Plain(s) => {
            canvas.put_text(at, s, label, room);
        }
        LabelText::Styled(styled) => {
            for span in styled.spans() {
                let written = canvas.put_text(at, &span.text, label.union(span.attrs), room);
                at.x += written;
                room -= written;
                if room == 0 {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection() {
        let s = CellScale::default();
        assert_eq!(s.project(Rect::new(4, 30, 56, 30)), Rect::new(0, 3, 7, 3));
        assert_eq!(s.project(Rect::new(12, 0, 56, 30)), Rect::new(1, 0, 7, 3));
        assert_eq!(s.unproject(Point::from((2, 1))), Point::from((16, 10)));
        assert_eq!(CellScale::new(0, 0), CellScale::new(1, 1));
    }
}
