//! Scroll-driven word substitution between two fixed word lists.
//!
//! A `DiffScheduler` compares two equally indexed word lists and, as a
//! normalized scroll progress advances, switches differing words from the
//! first list to the second, front to back. Each call reports only the
//! indices whose state flipped, so the host can hand them straight to
//! `TagCollection::update_at`.

use std::collections::BTreeSet;

/// Subtracted from the scaled progress before flooring to a cut point.
pub const EPSILON: f64 = 0.1;

/// Whole-text state for `DiffScheduler::set_state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextState {
    /// Every word shows its original value.
    Original,
    /// Every differing word shows its substitute.
    Substituted,
}

/// Tracks which words are substituted as a scroll position moves.
///
/// Invariant: the substituted set is exactly the differing indices below the
/// current boundary.
#[derive(Debug, Clone)]
pub struct DiffScheduler {
    /// Original words.
    words_a: Vec<String>,
    /// Substitute words.
    words_b: Vec<String>,
    /// Per-index difference flags, one per original word.
    differs: Vec<bool>,
    /// Indices below this are substituted where they differ.
    boundary: usize,
    /// Every index that has been substituted since the last reset. Indices
    /// enter only when substituted; differing indices the boundary has not
    /// yet crossed are absent even after earlier calls.
    changed_ever: BTreeSet<usize>,
    /// Indices currently showing the substitute word.
    substituted: BTreeSet<usize>,
}

impl DiffScheduler {
    /// Construct a scheduler over two word lists. Indices past the end of the
    /// shorter list never differ.
    pub fn new<A, B, S, T>(words_a: A, words_b: B) -> Self
    where
        A: IntoIterator<Item = S>,
        B: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        let words_a: Vec<String> = words_a.into_iter().map(Into::into).collect();
        let words_b: Vec<String> = words_b.into_iter().map(Into::into).collect();
        let differs = words_a
            .iter()
            .enumerate()
            .map(|(i, a)| words_b.get(i).is_some_and(|b| a != b))
            .collect();
        Self {
            words_a,
            words_b,
            differs,
            boundary: 0,
            changed_ever: BTreeSet::new(),
            substituted: BTreeSet::new(),
        }
    }

    /// Construct a scheduler from two texts split on single spaces.
    pub fn from_texts(a: &str, b: &str) -> Self {
        Self::new(a.split(' '), b.split(' '))
    }

    /// Number of words driven by the scheduler.
    pub fn count(&self) -> usize {
        self.words_a.len()
    }

    /// Original words.
    pub fn words_a(&self) -> &[String] {
        &self.words_a
    }

    /// Substitute words.
    pub fn words_b(&self) -> &[String] {
        &self.words_b
    }

    /// Indices where the two lists differ.
    pub fn differing(&self) -> impl Iterator<Item = usize> + '_ {
        self.differs
            .iter()
            .enumerate()
            .filter(|(_, d)| **d)
            .map(|(i, _)| i)
    }

    /// Every index substituted since the last reset.
    pub fn changed_ever(&self) -> &BTreeSet<usize> {
        &self.changed_ever
    }

    /// Indices currently showing the substitute.
    pub fn currently_substituted(&self) -> &BTreeSet<usize> {
        &self.substituted
    }

    /// Is the word at `index` currently substituted?
    pub fn is_substituted(&self, index: usize) -> bool {
        self.substituted.contains(&index)
    }

    /// The word to display at `index`.
    pub fn word_at(&self, index: usize) -> Option<&str> {
        if self.is_substituted(index) {
            self.words_b.get(index).map(String::as_str)
        } else {
            self.words_a.get(index).map(String::as_str)
        }
    }

    /// Cut point for a progress value, or `None` when it falls below zero.
    /// The scaled value is truncated toward zero, so anything in `(-1, 1)`
    /// cuts at zero and restores every word.
    pub fn cut_point(&self, percent: f64) -> Option<usize> {
        let raw = (self.count() as f64 * percent - EPSILON).trunc();
        if raw.is_nan() || raw < 0.0 {
            return None;
        }
        if raw >= self.count() as f64 {
            Some(self.count())
        } else {
            Some(raw as usize)
        }
    }

    /// Advance or retreat to a scroll progress, returning the indices whose
    /// substitution state flipped, ascending. A negative cut point changes
    /// nothing.
    pub fn change_state_at(&mut self, percent: f64) -> Vec<usize> {
        match self.cut_point(percent) {
            Some(cut) => self.move_boundary(cut),
            None => Vec::new(),
        }
    }

    /// Substitute or restore the whole text at once.
    pub fn set_state(&mut self, state: TextState) -> Vec<usize> {
        match state {
            TextState::Original => self.move_boundary(0),
            TextState::Substituted => self.move_boundary(self.count()),
        }
    }

    /// Clear all state, returning the indices that were substituted.
    pub fn reset(&mut self) -> Vec<usize> {
        let flipped = self.substituted.iter().copied().collect();
        self.substituted.clear();
        self.changed_ever.clear();
        self.boundary = 0;
        flipped
    }

    /// Move the substitution boundary, touching only the indices between the
    /// old and new positions.
    fn move_boundary(&mut self, cut: usize) -> Vec<usize> {
        let mut flipped = Vec::new();
        if cut > self.boundary {
            for i in self.boundary..cut {
                if self.differs[i] && self.substituted.insert(i) {
                    self.changed_ever.insert(i);
                    flipped.push(i);
                }
            }
        } else {
            for i in cut..self.boundary {
                if self.differs[i] && self.substituted.remove(&i) {
                    flipped.push(i);
                }
            }
        }
        self.boundary = cut;
        if !flipped.is_empty() {
            tracing::trace!("substitution boundary at {}: flipped {:?}", cut, flipped);
        }
        flipped
    }
}
