//! A single tag cell.

use geom::{Insets, Rect};

use crate::text::StyledText;

/// The content of a chip's label. Plain and styled text are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LabelText {
    /// No content.
    #[default]
    Empty,
    /// Unstyled text.
    Plain(String),
    /// Attributed text.
    Styled(StyledText),
}

impl LabelText {
    /// The label's text with attributes stripped.
    pub fn plain(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Plain(s) => s.clone(),
            Self::Styled(s) => s.plain(),
        }
    }
}

/// The label inside a chip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Label {
    /// Label content.
    pub text: LabelText,
    /// Label frame in content coordinates.
    pub frame: Rect,
}

/// A reusable view holding exactly one label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chip {
    /// Chip frame in content coordinates.
    frame: Rect,
    /// The chip's single label.
    label: Label,
    /// Index of the tag this chip currently shows.
    index: Option<usize>,
}

impl Chip {
    /// Construct an empty chip.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set unstyled text, clearing any styled text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.label.text = LabelText::Plain(text.into());
    }

    /// Set styled text, clearing any plain text.
    pub fn set_styled_text(&mut self, text: StyledText) {
        self.label.text = LabelText::Styled(text);
    }

    /// The label.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// The chip frame.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Assign a frame. Call `layout` afterwards to position the label.
    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    /// Index of the tag currently displayed, if any.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Bind the chip to a tag index.
    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = Some(index);
    }

    /// Reposition the label to fill the chip, inset by `space` on all sides.
    pub fn layout(&mut self, space: Insets) {
        self.label.frame = self.frame.inset(space);
    }

    /// Reset the chip before it returns to the pool.
    pub fn prepare_for_reuse(&mut self) {
        *self = Self::default();
    }
}
