//! The onboarding screen: a paged strip with a logo, a subtitle, the quote
//! tags view and a start button.

use std::rc::Rc;

use anyhow::Result;
use tagview::{
    CellMeasurer, PagedScroll, TagCollection, TagDataSource, TagDelegate, TextState,
    canvas::Canvas,
    geom::{Expanse, Point, Rect},
    render::{CellScale, RenderStyle, render_tags},
    style::{Attr, AttrSet},
    text::display_width,
};

use crate::{
    config::Config,
    quote::QuoteSource,
    tutorial::{Placement, TutorialObject},
};

/// Logo centre keyframes, one per page.
const LOGO_POINTS: &[(f64, f64)] = &[(0.5, 0.35), (1.5, 0.15), (2.5, 0.15), (3.5, 0.35)];

/// Vertical centre of the subtitle and start button.
const LOWER_THIRD: f64 = 1.0 / 1.4;

/// Subtitle on the first page.
const SUBTITLE: &str = "An app to showcase the winners of the WWDC Scholarship.";

/// Start button label.
const START: &str = "Start";

/// Logo label.
const LOGO: &str = "WWDC";

/// Width of the start button in cells.
const BUTTON_WIDTH: u32 = 13;

/// State for the whole onboarding screen.
pub struct Onboarding {
    /// Screen size in cells.
    screen: Expanse,
    /// Layout units per cell.
    scale: CellScale,
    /// Horizontal paging, in cells.
    pager: PagedScroll,
    /// Columns moved per scroll step.
    step: u32,
    /// Logo block.
    logo: TutorialObject,
    /// Quote view.
    quote_object: TutorialObject,
    /// Subtitle under the big logo.
    subtitle: TutorialObject,
    /// Start button on the last page.
    start: TutorialObject,
    /// Quote view size in cells.
    quote_size: Expanse,
    /// Words of the quote.
    source: Rc<QuoteSource>,
    /// The quote's tags view.
    quote: TagCollection,
    /// Chip drawing style.
    style: RenderStyle,
}

impl Onboarding {
    /// Build the screen for a terminal of the given size.
    pub fn new(config: &Config, screen: Expanse) -> Result<Self> {
        let scale = CellScale::new(config.demo.column_width, config.demo.row_height);
        let source = Rc::new(QuoteSource::default());
        let mut quote = TagCollection::new(config.tags, Box::new(CellMeasurer::new(scale.x)));
        let data: Rc<dyn TagDataSource> = source.clone();
        let delegate: Rc<dyn TagDelegate> = source.clone();
        quote.set_delegate(Some(delegate));
        quote.set_data_source(Some(data));

        let mut screen_state = Self {
            screen,
            scale,
            pager: PagedScroll::new(config.demo.pages, screen.w),
            step: config.demo.step.max(1),
            logo: TutorialObject::new(),
            quote_object: TutorialObject::new(),
            subtitle: TutorialObject::new(),
            start: TutorialObject::new(),
            quote_size: Expanse::new(1, 1),
            source,
            quote,
            style: RenderStyle::default(),
        };
        screen_state.resize(screen)?;
        Ok(screen_state)
    }

    /// Screen size in cells.
    pub fn screen(&self) -> Expanse {
        self.screen
    }

    /// The pager.
    pub fn pager(&self) -> &PagedScroll {
        &self.pager
    }

    /// The quote's tags view.
    pub fn quote(&self) -> &TagCollection {
        &self.quote
    }

    /// The quote's data source.
    pub fn source(&self) -> &QuoteSource {
        &self.source
    }

    /// Recompute every object's keyframes for a new screen size. The pager
    /// keeps its position, which may move the substitution boundary.
    pub fn resize(&mut self, screen: Expanse) -> Result<()> {
        let (w, h) = (screen.w.max(8), screen.h.max(8));
        self.screen = Expanse::new(w, h);
        self.pager.set_page_width(w);

        let big = Expanse::new(w.saturating_sub(4), (h * 2 / 5).max(3));
        let small = Expanse::new((w / 3).max(6), (h / 6).max(3));
        self.logo = TutorialObject::new()
            .with_points(LOGO_POINTS)
            .resize_at(0.0, big)
            .resize_at(1.0, small)
            .resize_at(3.0, big);

        // The quote sits under the small logo, above the page indicator.
        let small_bottom = 0.15 * f64::from(h) + f64::from(small.h) / 2.0;
        let top = (small_bottom.ceil() as u32 + 1).min(h - 3);
        self.quote_size = Expanse::new(w - 2, (h - top - 2).max(1));
        let fy = (f64::from(top) + f64::from(self.quote_size.h) / 2.0) / f64::from(h);
        self.quote_object = TutorialObject::new().with_points(&[(1.5, fy), (2.5, fy)]);

        self.subtitle = TutorialObject::new().with_points(&[(0.5, LOWER_THIRD)]);
        self.start = TutorialObject::new().with_points(&[(3.5, LOWER_THIRD)]);

        self.quote.set_bounds(Rect::new(
            0,
            0,
            self.quote_size.w * self.scale.x,
            self.quote_size.h * self.scale.y,
        ));
        tracing::debug!("onboarding resized to {:?}", self.screen);
        self.scrolled()
    }

    /// Push any scroll-driven substitution into the quote view.
    fn scrolled(&mut self) -> Result<()> {
        if let Some(progress) = self.pager.substitution_progress() {
            let flipped = self.source.diff_mut().change_state_at(progress);
            self.quote.update_at(&flipped)?;
        }
        Ok(())
    }

    /// Scroll horizontally by a number of columns.
    pub fn scroll_by(&mut self, columns: i64) -> Result<()> {
        if self.pager.scroll_by(columns) {
            self.scrolled()?;
        }
        Ok(())
    }

    /// Scroll one step left or right.
    pub fn step(&mut self, forward: bool) -> Result<()> {
        let step = i64::from(self.step);
        self.scroll_by(if forward { step } else { -step })
    }

    /// Jump to the start of a page.
    pub fn scroll_to_page(&mut self, page: u32) -> Result<()> {
        if self.pager.scroll_to_page(page) {
            self.scrolled()?;
        }
        Ok(())
    }

    /// Jump to the next page.
    pub fn next_page(&mut self) -> Result<()> {
        self.scroll_to_page(self.pager.current_page().saturating_add(1))
    }

    /// Jump to the previous page.
    pub fn prev_page(&mut self) -> Result<()> {
        self.scroll_to_page(self.pager.current_page().saturating_sub(1))
    }

    /// Scroll the quote view by whole rows.
    pub fn scroll_quote(&mut self, rows: i32) {
        let units = i32::try_from(self.scale.y).unwrap_or(i32::MAX);
        self.quote.scroll_by(rows.saturating_mul(units));
    }

    /// Flip the whole quote between its two texts.
    pub fn toggle_state(&mut self) -> Result<()> {
        let state = if self.source.diff().currently_substituted().is_empty() {
            TextState::Substituted
        } else {
            TextState::Original
        };
        let flipped = self.source.diff_mut().set_state(state);
        self.quote.update_at(&flipped)?;
        Ok(())
    }

    /// Return to the first page with the original text.
    pub fn reset(&mut self) -> Result<()> {
        let flipped = self.source.diff_mut().reset();
        self.quote.update_at(&flipped)?;
        self.quote.scroll_to(0);
        self.pager.scroll_to(0);
        Ok(())
    }

    /// Where the quote view is on screen, if anywhere.
    fn quote_placement(&self) -> Option<Placement> {
        self.quote_object
            .place(self.pager.position(), self.screen, self.quote_size)
            .filter(|p| p.is_visible(self.screen))
    }

    /// Handle a click at a screen cell, returning the tapped word's index.
    pub fn click(&mut self, p: Point) -> Option<usize> {
        let at = self.quote_placement()?;
        let x = u32::try_from(i64::from(p.x) - at.left).ok()?;
        let y = u32::try_from(i64::from(p.y) - at.top).ok()?;
        if x >= at.size.w || y >= at.size.h {
            return None;
        }
        let units = self.scale.unproject(Point { x, y });
        self.quote.tap(Point {
            x: units.x + self.scale.x / 2,
            y: units.y + self.scale.y / 2,
        })
    }

    /// Draw the current frame.
    pub fn render(&self, canvas: &mut Canvas) -> Result<()> {
        canvas.clear();
        let position = self.pager.position();
        let screen = self.screen;

        if let Some(at) = self.logo.place(position, screen, Expanse::new(1, 1)) {
            boxed(canvas, at, LOGO, AttrSet::new(Attr::Bold));
        }

        let subtitle_size = Expanse::new(
            u32::try_from(display_width(SUBTITLE)).unwrap_or(u32::MAX),
            1,
        );
        if let Some(at) = self.subtitle.place(position, screen, subtitle_size) {
            let mut line = Canvas::new(at.size);
            line.put_text(Point::zero(), SUBTITLE, AttrSet::default(), at.size.w);
            canvas.blit(&line, at.left, at.top);
        }

        if let Some(at) = self.start.place(position, screen, Expanse::new(BUTTON_WIDTH, 3)) {
            boxed(canvas, at, START, AttrSet::new(Attr::Reverse));
        }

        if let Some(at) = self.quote_placement() {
            let mut view = Canvas::new(at.size);
            render_tags(&self.quote, &mut view, Point::zero(), self.scale, &self.style)?;
            canvas.blit(&view, at.left, at.top);
        }

        self.render_indicator(canvas);
        Ok(())
    }

    /// Page dots along the bottom row.
    fn render_indicator(&self, canvas: &mut Canvas) {
        let current = self.pager.current_page();
        let dots: Vec<&str> = (0..self.pager.page_count())
            .map(|i| if i == current { "●" } else { "○" })
            .collect();
        let dots = dots.join(" ");
        let width = u32::try_from(display_width(&dots)).unwrap_or(u32::MAX);
        let x = self.screen.w.saturating_sub(width) / 2;
        canvas.put_text(
            Point {
                x,
                y: self.screen.h - 1,
            },
            &dots,
            AttrSet::new(Attr::Dim),
            width,
        );
    }
}

/// Draw a box with a centred label at a placement.
fn boxed(canvas: &mut Canvas, at: Placement, label: &str, attrs: AttrSet) {
    if at.size.is_empty() {
        return;
    }
    let mut block = Canvas::new(at.size);
    block.draw_box(at.size.rect(), AttrSet::default());
    let inner = at.size.w.saturating_sub(2);
    let width = u32::try_from(display_width(label)).unwrap_or(u32::MAX);
    let p = Point {
        x: 1 + inner.saturating_sub(width) / 2,
        y: at.size.h / 2,
    };
    block.put_text(p, label, attrs, inner);
    canvas.blit(&block, at.left, at.top);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Result<Onboarding> {
        Onboarding::new(&Config::default(), Expanse::new(80, 24))
    }

    #[test]
    fn scrolling_substitutes_words() -> Result<()> {
        let mut s = screen()?;
        assert!(s.source().diff().currently_substituted().is_empty());

        s.scroll_to_page(1)?;
        assert!(s.source().diff().currently_substituted().is_empty());

        s.scroll_by(40)?;
        let half = s.source().diff().currently_substituted().len();
        assert!(half > 0);

        s.scroll_to_page(2)?;
        let all = s.source().diff().differing().count();
        assert_eq!(s.source().diff().currently_substituted().len(), all);
        assert!(all > half);

        // Stepping back to just past page one leaves only the opening words.
        s.scroll_by(-76)?;
        let left: Vec<usize> = s.source().diff().currently_substituted().iter().copied().collect();
        assert_eq!(left, vec![0, 1]);
        assert_eq!(s.source().diff().changed_ever().len(), all);

        // Landing exactly on page one restores the whole quote.
        s.prev_page()?;
        assert!(s.source().diff().currently_substituted().is_empty());
        assert_eq!(s.source().diff().changed_ever().len(), all);
        Ok(())
    }

    #[test]
    fn resize_moves_the_boundary() -> Result<()> {
        let mut s = screen()?;
        s.scroll_to_page(2)?;
        s.scroll_by(-79)?;
        assert_eq!(s.pager().offset(), 81);
        let left: Vec<usize> = s.source().diff().currently_substituted().iter().copied().collect();
        assert_eq!(left, vec![0]);

        // 81 of 80 rescales to 8 of 8, exactly page one.
        s.resize(Expanse::new(8, 24))?;
        assert_eq!(s.pager().offset(), 8);
        assert!(s.source().diff().currently_substituted().is_empty());
        assert!(s.quote().last_changes().updated.contains(&0));
        Ok(())
    }

    #[test]
    fn toggle_and_reset() -> Result<()> {
        let mut s = screen()?;
        s.toggle_state()?;
        assert_eq!(
            s.quote().last_changes().updated.len(),
            s.source().diff().differing().count()
        );
        s.scroll_to_page(3)?;
        s.reset()?;
        assert_eq!(s.pager().offset(), 0);
        assert!(s.source().diff().currently_substituted().is_empty());
        Ok(())
    }

    #[test]
    fn first_page_frame() -> Result<()> {
        let s = screen()?;
        let mut canvas = Canvas::new(s.screen());
        s.render(&mut canvas)?;
        let lines = canvas.lines();
        assert!(lines.iter().any(|l| l.contains(LOGO)));
        assert!(lines.iter().any(|l| l.contains(SUBTITLE)));
        assert!(!lines.iter().any(|l| l.contains(START)));
        assert_eq!(lines[23].trim(), "● ○ ○ ○");
        Ok(())
    }

    #[test]
    fn quote_page_frame_and_click() -> Result<()> {
        let mut s = screen()?;
        s.scroll_to_page(1)?;
        let mut canvas = Canvas::new(s.screen());
        s.render(&mut canvas)?;
        let lines = canvas.lines();
        assert!(lines.iter().any(|l| l.contains("│Here's│")));
        assert!(!lines.iter().any(|l| l.contains(SUBTITLE)));
        assert_eq!(lines[23].trim(), "○ ● ○ ○");

        let Some(at) = s.quote_placement() else {
            panic!("quote should be on screen");
        };
        let first = s.quote().frame_of(0).map(|f| s.scale.project(f));
        let Some(cells) = first else {
            panic!("first word should be laid out");
        };
        let hit = Point {
            x: u32::try_from(at.left).unwrap_or(0) + cells.tl.x + 1,
            y: u32::try_from(at.top).unwrap_or(0) + cells.tl.y + 1,
        };
        assert_eq!(s.click(hit), Some(0));
        assert_eq!(s.source().selected(), Some("Here's".to_string()));
        assert_eq!(s.click(Point::zero()), None);
        Ok(())
    }
}
