//! Horizontal paging model for onboarding screens.

/// Progress past the first page at which scroll-driven effects engage.
pub const ACTIVATION_THRESHOLD: f64 = 0.9;

/// A horizontally scrolling strip of equally wide pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagedScroll {
    /// Number of pages.
    page_count: u32,
    /// Width of one page.
    page_width: u32,
    /// Horizontal scroll offset.
    offset: u32,
}

impl PagedScroll {
    /// Construct a pager at offset zero. At least one page always exists.
    pub fn new(page_count: u32, page_width: u32) -> Self {
        Self {
            page_count: page_count.max(1),
            page_width,
            offset: 0,
        }
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Width of one page.
    pub fn page_width(&self) -> u32 {
        self.page_width
    }

    /// Change the page width, keeping the same fractional page position.
    pub fn set_page_width(&mut self, page_width: u32) {
        let position = self.position();
        self.page_width = page_width;
        self.offset = (position * f64::from(page_width)).round() as u32;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Horizontal offset.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Largest reachable offset.
    pub fn max_offset(&self) -> u32 {
        (self.page_count - 1).saturating_mul(self.page_width)
    }

    /// Scroll to an absolute offset, clamped. Returns true if the offset changed.
    pub fn scroll_to(&mut self, offset: u32) -> bool {
        let offset = offset.min(self.max_offset());
        let changed = offset != self.offset;
        self.offset = offset;
        changed
    }

    /// Scroll by a relative amount.
    pub fn scroll_by(&mut self, delta: i64) -> bool {
        let target = (i64::from(self.offset) + delta).max(0);
        self.scroll_to(u32::try_from(target).unwrap_or(u32::MAX))
    }

    /// Jump to the start of a page.
    pub fn scroll_to_page(&mut self, page: u32) -> bool {
        self.scroll_to(page.saturating_mul(self.page_width))
    }

    /// Fractional page position: 1.5 is half way between pages one and two.
    pub fn position(&self) -> f64 {
        if self.page_width == 0 {
            return 0.0;
        }
        f64::from(self.offset) / f64::from(self.page_width)
    }

    /// The page indicator: nearest page, clamped to the valid range.
    pub fn current_page(&self) -> u32 {
        let page = self.position().round() as u32;
        page.min(self.page_count - 1)
    }

    /// Progress past the start of `page` in page widths. Negative before it.
    pub fn progress_past(&self, page: u32) -> f64 {
        self.position() - f64::from(page)
    }

    /// Progress past page one when it exceeds `ACTIVATION_THRESHOLD` page
    /// widths from the origin, the trigger for scroll-driven substitution.
    pub fn substitution_progress(&self) -> Option<f64> {
        (self.position() > ACTIVATION_THRESHOLD).then(|| self.progress_past(1))
    }
}
