//! A grid of styled terminal cells.

use unicode_segmentation::UnicodeSegmentation;

use geom::{Expanse, Point, Rect};

use crate::{
    style::AttrSet,
    text::{grapheme_width, truncate_to_columns},
};

/// NULL character constant marking an unwritten cell.
const NULL: char = '\0';

/// A cell with glyph and attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Base glyph character.
    pub ch: char,
    /// Additional grapheme characters stored with the base glyph.
    pub suffix: String,
    /// Attributes applied to the cell.
    pub attrs: AttrSet,
    /// True when this cell continues a wide glyph from the previous column.
    pub continuation: bool,
}

impl Cell {
    /// Construct an empty cell.
    fn empty() -> Self {
        Self {
            ch: NULL,
            suffix: String::new(),
            attrs: AttrSet::default(),
            continuation: false,
        }
    }

    /// Return true when the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.ch == NULL && self.suffix.is_empty() && !self.continuation
    }

    /// Append this cell's renderable text to the output buffer.
    pub fn push_text(&self, out: &mut String) {
        if self.continuation {
            return;
        }
        if self.is_empty() {
            out.push(' ');
            return;
        }
        out.push(self.ch);
        out.push_str(&self.suffix);
    }
}

/// A 2D buffer of cells, drawn into by renderers and flushed by a backend.
#[derive(Clone, Debug)]
pub struct Canvas {
    /// Buffer size in cells.
    size: Expanse,
    /// Backing cell storage, row-major.
    cells: Vec<Cell>,
}

impl Canvas {
    /// Create an empty canvas.
    pub fn new(size: impl Into<Expanse>) -> Self {
        let size = size.into();
        Self {
            size,
            cells: vec![Cell::empty(); size.area() as usize],
        }
    }

    /// Canvas size.
    pub fn size(&self) -> Expanse {
        self.size
    }

    /// Reset every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::empty());
    }

    /// Offset of a point in the cell vector.
    fn offset(&self, p: Point) -> Option<usize> {
        if p.x < self.size.w && p.y < self.size.h {
            Some((p.y * self.size.w + p.x) as usize)
        } else {
            None
        }
    }

    /// Get a cell.
    pub fn get(&self, p: Point) -> Option<&Cell> {
        self.offset(p).and_then(|o| self.cells.get(o))
    }

    /// Set a single-column glyph. Out-of-bounds writes are dropped.
    pub fn put(&mut self, p: Point, ch: char, attrs: AttrSet) {
        if let Some(o) = self.offset(p) {
            self.cells[o] = Cell {
                ch,
                suffix: String::new(),
                attrs,
                continuation: false,
            };
        }
    }

    /// Write text starting at `p`, clipped to `max_cols` and the canvas
    /// edge. Returns the number of columns written.
    pub fn put_text(&mut self, p: Point, txt: &str, attrs: AttrSet, max_cols: u32) -> u32 {
        let room = self.size.w.saturating_sub(p.x).min(max_cols);
        if p.y >= self.size.h || room == 0 {
            return 0;
        }
        let (txt, _) = truncate_to_columns(txt, room as usize);
        let mut x = p.x;
        for g in txt.graphemes(true) {
            let w = grapheme_width(g) as u32;
            let mut chars = g.chars();
            let ch = chars.next().unwrap_or(' ');
            if let Some(o) = self.offset(Point { x, y: p.y }) {
                self.cells[o] = Cell {
                    ch,
                    suffix: chars.collect(),
                    attrs,
                    continuation: false,
                };
            }
            for extra in 1..w {
                if let Some(o) = self.offset(Point { x: x + extra, y: p.y }) {
                    self.cells[o] = Cell {
                        ch: NULL,
                        suffix: String::new(),
                        attrs,
                        continuation: true,
                    };
                }
            }
            x += w;
        }
        x - p.x
    }

    /// Fill a rectangle with a character.
    pub fn fill(&mut self, r: Rect, ch: char, attrs: AttrSet) {
        for y in r.tl.y..r.bottom() {
            for x in r.tl.x..r.right() {
                self.put(Point { x, y }, ch, attrs);
            }
        }
    }

    /// Draw a single-line box around the edge of a rectangle. Rectangles
    /// smaller than 2x2 are skipped.
    pub fn draw_box(&mut self, r: Rect, attrs: AttrSet) {
        if r.w < 2 || r.h < 2 {
            return;
        }
        let (l, t, rt, b) = (r.tl.x, r.tl.y, r.right() - 1, r.bottom() - 1);
        for x in l + 1..rt {
            self.put(Point { x, y: t }, '─', attrs);
            self.put(Point { x, y: b }, '─', attrs);
        }
        for y in t + 1..b {
            self.put(Point { x: l, y }, '│', attrs);
            self.put(Point { x: rt, y }, '│', attrs);
        }
        self.put(Point { x: l, y: t }, '┌', attrs);
        self.put(Point { x: rt, y: t }, '┐', attrs);
        self.put(Point { x: l, y: b }, '└', attrs);
        self.put(Point { x: rt, y: b }, '┘', attrs);
    }

    /// Copy every written cell of `src` onto this canvas with its top left at
    /// `(left, top)`, which may lie outside the canvas. Cells landing out of
    /// bounds are dropped.
    pub fn blit(&mut self, src: &Canvas, left: i64, top: i64) {
        for y in 0..src.size.h {
            for x in 0..src.size.w {
                let (dx, dy) = (left + i64::from(x), top + i64::from(y));
                let (Ok(dx), Ok(dy)) = (u32::try_from(dx), u32::try_from(dy)) else {
                    continue;
                };
                let Some(cell) = src.get(Point { x, y }) else {
                    continue;
                };
                if cell.is_empty() {
                    continue;
                }
                if let Some(o) = self.offset(Point { x: dx, y: dy }) {
                    self.cells[o] = cell.clone();
                }
            }
        }
    }

    /// The text of one row, with empty cells as spaces.
    pub fn line_text(&self, y: u32) -> String {
        let mut out = String::new();
        for x in 0..self.size.w {
            if let Some(c) = self.get(Point { x, y }) {
                c.push_text(&mut out);
            }
        }
        out
    }

    /// Every row, right-trimmed.
    pub fn lines(&self) -> Vec<String> {
        (0..self.size.h)
            .map(|y| self.line_text(y).trim_end().to_string())
            .collect()
    }
}
