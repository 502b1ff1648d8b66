//! Plain and styled tag text, plus display-column helpers.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::style::{Attr, AttrSet};

/// A run of text sharing one set of attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Span contents.
    pub text: String,
    /// Attributes applied to the whole span.
    pub attrs: AttrSet,
}

/// Rich text: an ordered list of attributed spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    /// Spans in display order.
    spans: Vec<Span>,
}

impl StyledText {
    /// Construct empty styled text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Styled text consisting of a single span.
    pub fn styled(text: impl Into<String>, attrs: impl Into<AttrSet>) -> Self {
        Self::new().push(text, attrs)
    }

    /// A single underlined span.
    pub fn underlined(text: impl Into<String>) -> Self {
        Self::styled(text, Attr::Underline)
    }

    /// Append a span.
    pub fn push(mut self, text: impl Into<String>, attrs: impl Into<AttrSet>) -> Self {
        self.spans.push(Span {
            text: text.into(),
            attrs: attrs.into(),
        });
        self
    }

    /// The spans making up this text.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// The concatenated text with attributes stripped.
    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Is there no text at all?
    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|s| s.text.is_empty())
    }
}

impl From<&str> for StyledText {
    fn from(s: &str) -> Self {
        Self::styled(s, AttrSet::default())
    }
}

/// Return the display width of a grapheme cluster, clamped to terminal cell widths.
pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.is_empty() {
        return 0;
    }
    UnicodeWidthStr::width(grapheme).clamp(1, 2)
}

/// Return the display width of a string in terminal columns.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(grapheme_width).sum()
}

/// Take the longest prefix of `s` that fits in `max` columns, returning it and its width.
pub fn truncate_to_columns(s: &str, max: usize) -> (&str, usize) {
    let mut cols = 0;
    let mut end = 0;
    for (idx, g) in s.grapheme_indices(true) {
        let w = grapheme_width(g);
        if cols + w > max {
            break;
        }
        cols += w;
        end = idx + g.len();
    }
    (&s[..end], cols)
}
