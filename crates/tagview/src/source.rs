//! Capability traits a host implements to feed and observe a `TagCollection`.

use std::{cell::RefCell, mem};

use geom::Expanse;

use crate::text::StyledText;

/// Supplies tags to a collection.
pub trait TagDataSource {
    /// Number of tags.
    fn count(&self) -> usize;

    /// Plain text of the tag at `index`. Only called with `index < count()`.
    fn text_at(&self, index: usize) -> String;

    /// Styled text of the tag at `index`. When this returns `Some`, it is used
    /// instead of `text_at` for both measurement and display.
    fn styled_text_at(&self, _index: usize) -> Option<StyledText> {
        None
    }
}

/// Receives notifications from a collection. Every method is optional.
pub trait TagDelegate {
    /// The content extent changed. Called once per distinct change.
    fn on_extent_changed(&self, _extent: Expanse) {}

    /// The tag at `index` was selected.
    fn on_selected(&self, _index: usize) {}
}

/// A data source backed by a vector of strings.
///
/// The host mutates the vector through this handle and then issues the
/// matching `insert_at`/`delete_at`/`update_at` call on the collection.
#[derive(Debug, Default)]
pub struct VecSource {
    /// Backing tags.
    items: RefCell<Vec<String>>,
}

impl VecSource {
    /// Construct a source from any sequence of strings.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: RefCell::new(items.into_iter().map(Into::into).collect()),
        }
    }

    /// Insert a tag at `index`.
    pub fn insert(&self, index: usize, item: impl Into<String>) {
        self.items.borrow_mut().insert(index, item.into());
    }

    /// Remove the tag at `index`, if present.
    pub fn remove(&self, index: usize) -> Option<String> {
        let mut items = self.items.borrow_mut();
        (index < items.len()).then(|| items.remove(index))
    }

    /// Replace the tag at `index`, returning the previous value.
    pub fn replace(&self, index: usize, item: impl Into<String>) -> Option<String> {
        self.items
            .borrow_mut()
            .get_mut(index)
            .map(|slot| mem::replace(slot, item.into()))
    }

    /// A snapshot of the current tags.
    pub fn items(&self) -> Vec<String> {
        self.items.borrow().clone()
    }
}

impl TagDataSource for VecSource {
    fn count(&self) -> usize {
        self.items.borrow().len()
    }

    fn text_at(&self, index: usize) -> String {
        self.items.borrow().get(index).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_source_edits() {
        let s = VecSource::new(["a", "b"]);
        s.insert(1, "x");
        assert_eq!(s.items(), vec!["a", "x", "b"]);
        assert_eq!(s.remove(0).as_deref(), Some("a"));
        assert_eq!(s.remove(9), None);
        assert_eq!(s.replace(1, "c").as_deref(), Some("b"));
        assert_eq!(s.count(), 2);
        assert_eq!(s.text_at(1), "c");
        assert_eq!(s.styled_text_at(0), None);
    }
}
