//! Helpers for exercising tag collections in tests.

use std::cell::RefCell;

use geom::Expanse;

use crate::{
    measure::{Font, TextMeasurer},
    source::TagDelegate,
};

/// A measurer where every character is `width` units wide, regardless of font.
#[derive(Debug, Clone, Copy)]
pub struct FixedMeasurer {
    /// Units per character.
    pub width: u32,
}

impl FixedMeasurer {
    /// Construct a measurer.
    pub fn new(width: u32) -> Self {
        Self { width }
    }
}

impl TextMeasurer for FixedMeasurer {
    fn measure(&self, text: &str, _font: &Font) -> u32 {
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        chars.saturating_mul(self.width)
    }
}

/// A delegate that records every notification it receives.
#[derive(Debug, Default)]
pub struct RecordingDelegate {
    /// Extents reported, in order.
    pub extents: RefCell<Vec<Expanse>>,
    /// Selected indices, in order.
    pub selections: RefCell<Vec<usize>>,
}

impl RecordingDelegate {
    /// Construct an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of extent notifications so far.
    pub fn extent_count(&self) -> usize {
        self.extents.borrow().len()
    }

    /// The most recent extent, if any.
    pub fn last_extent(&self) -> Option<Expanse> {
        self.extents.borrow().last().copied()
    }
}

impl TagDelegate for RecordingDelegate {
    fn on_extent_changed(&self, extent: Expanse) {
        self.extents.borrow_mut().push(extent);
    }

    fn on_selected(&self, index: usize) {
        self.selections.borrow_mut().push(index);
    }
}
