//! Tag view configuration.

use geom::Insets;
use serde::{Deserialize, Serialize};

use crate::{
    align::Alignment,
    error::{Error, Result},
    measure::Font,
};

/// Visual configuration for a `TagCollection`.
///
/// Every field has a default, so partial configuration files deserialize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TagsConfig {
    /// Padding applied uniformly to every chip's label.
    pub space: Insets,
    /// Font used to measure and draw labels.
    pub font: Font,
    /// Horizontal gap between chips on a row.
    pub item_spacing: u32,
    /// Vertical gap between rows.
    pub line_spacing: u32,
    /// Padding between the collection edge and its content.
    pub content_insets: Insets,
    /// Row alignment.
    pub alignment: Alignment,
}

impl TagsConfig {
    /// Set the chip padding.
    pub fn with_space(mut self, space: impl Into<Insets>) -> Self {
        self.space = space.into();
        self
    }

    /// Set the label font.
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Set the gaps between chips and between rows.
    pub fn with_spacing(mut self, item: u32, line: u32) -> Self {
        self.item_spacing = item;
        self.line_spacing = line;
        self
    }

    /// Set the content padding.
    pub fn with_content_insets(mut self, insets: impl Into<Insets>) -> Self {
        self.content_insets = insets.into();
        self
    }

    /// Set the row alignment.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Check the configuration for values no layout can honour.
    pub fn validate(&self) -> Result<()> {
        if self.font.size == 0 {
            return Err(Error::Config("font size must be non-zero".into()));
        }
        Ok(())
    }
}
