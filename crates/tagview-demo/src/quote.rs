//! The quote shown on the middle pages, as a tag data source.

use std::cell::{Ref, RefCell, RefMut};

use tagview::{DiffScheduler, StyledText, TagDataSource, TagDelegate};

/// Text shown before any substitution.
pub const ORIGINAL: &str = "Here's to the crazy ones. The misfits. The rebels. The troublemakers. \
The round pegs in the square holes. The ones who see things differently. They're not fond of \
rules. And they have no respect for the status quo.\nYou can quote them, disagree with them, \
glorify or vilify them. About the only thing you can't do is ignore them. Because they change \
things. They push the human race forward.\nAnd while some may see them as the crazy ones, we see \
genius. Because the people who are crazy enough to think they can change the world, are the ones \
who do.";

/// Text revealed word by word as the pager advances.
pub const SUBSTITUTE: &str = "We are the crazy ones. The misfits. The rebels. The troublemakers. \
The round pegs in the square holes. The ones who see things differently. We're not fond of \
rules. And we have no respect for the status quo.\nYou can quote us, disagree with us, glorify \
or vilify us. About the only thing you can't do is ignore us. Because we change things. We push \
the human race forward.\nAnd while some may see us as the crazy ones, we see genius. Because the \
people who are crazy enough to think they can change the world, are the ones who do.";

/// Words are split on spaces only, so line breaks survive inside a word.
fn display(word: &str) -> String {
    word.replace('\n', " ")
}

/// Feeds the quote's words to a tags view, underlining substituted ones.
#[derive(Debug)]
pub struct QuoteSource {
    /// Substitution state.
    diff: RefCell<DiffScheduler>,
    /// Most recently selected word.
    selected: RefCell<Option<String>>,
}

impl Default for QuoteSource {
    fn default() -> Self {
        Self::new(ORIGINAL, SUBSTITUTE)
    }
}

impl QuoteSource {
    /// Construct a source over two texts.
    pub fn new(original: &str, substitute: &str) -> Self {
        Self {
            diff: RefCell::new(DiffScheduler::from_texts(original, substitute)),
            selected: RefCell::new(None),
        }
    }

    /// The scheduler.
    pub fn diff(&self) -> Ref<'_, DiffScheduler> {
        self.diff.borrow()
    }

    /// The scheduler, mutably.
    pub fn diff_mut(&self) -> RefMut<'_, DiffScheduler> {
        self.diff.borrow_mut()
    }

    /// Most recently selected word.
    pub fn selected(&self) -> Option<String> {
        self.selected.borrow().clone()
    }
}

impl TagDataSource for QuoteSource {
    fn count(&self) -> usize {
        self.diff.borrow().count()
    }

    fn text_at(&self, index: usize) -> String {
        self.diff
            .borrow()
            .words_a()
            .get(index)
            .map(|w| display(w))
            .unwrap_or_default()
    }

    fn styled_text_at(&self, index: usize) -> Option<StyledText> {
        let diff = self.diff.borrow();
        if !diff.is_substituted(index) {
            return None;
        }
        diff.words_b()
            .get(index)
            .map(|w| StyledText::underlined(display(w)))
    }
}

impl TagDelegate for QuoteSource {
    fn on_selected(&self, index: usize) {
        let word = self.diff.borrow().word_at(index).map(display);
        tracing::info!("selected word {}: {:?}", index, word);
        *self.selected.borrow_mut() = word;
    }
}
