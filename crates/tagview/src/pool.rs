//! Chip recycling.

use std::collections::HashMap;

use slotmap::{SlotMap, new_key_type};

use crate::chip::Chip;

new_key_type! {
    /// Opaque identifier for a chip stored in the pool arena.
    pub struct ChipId;
}

/// Type tag selecting a free list in the pool.
pub type ReuseKey = &'static str;

/// Reuse key for tag chips.
pub const TAG_REUSE_KEY: ReuseKey = "tag";

/// An arena of chips with per-key free lists. Chips are allocated on demand
/// and recycled on release; the pool never shrinks.
#[derive(Debug, Default)]
pub struct ChipPool {
    /// Every chip ever allocated.
    chips: SlotMap<ChipId, Chip>,
    /// Reuse key each chip was acquired under.
    keys: HashMap<ChipId, ReuseKey>,
    /// Released chips awaiting reuse, per key.
    free: HashMap<ReuseKey, Vec<ChipId>>,
}

impl ChipPool {
    /// Construct an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a chip for `key`, recycling a released one when available.
    pub fn acquire(&mut self, key: ReuseKey) -> ChipId {
        if let Some(id) = self.free.get_mut(key).and_then(Vec::pop) {
            return id;
        }
        let id = self.chips.insert(Chip::new());
        self.keys.insert(id, key);
        id
    }

    /// Return a chip to its free list. Releasing an unknown or already free
    /// chip does nothing.
    pub fn release(&mut self, id: ChipId) {
        let Some(key) = self.keys.get(&id).copied() else {
            return;
        };
        let free = self.free.entry(key).or_default();
        if free.contains(&id) {
            return;
        }
        if let Some(chip) = self.chips.get_mut(id) {
            chip.prepare_for_reuse();
        }
        free.push(id);
    }

    /// Look up a chip.
    pub fn get(&self, id: ChipId) -> Option<&Chip> {
        self.chips.get(id)
    }

    /// Look up a chip mutably.
    pub fn get_mut(&mut self, id: ChipId) -> Option<&mut Chip> {
        self.chips.get_mut(id)
    }

    /// Number of chips allocated, in use or free.
    pub fn allocated(&self) -> usize {
        self.chips.len()
    }

    /// Number of chips waiting on free lists.
    pub fn free(&self) -> usize {
        self.free.values().map(Vec::len).sum()
    }

    /// Number of chips currently handed out.
    pub fn live(&self) -> usize {
        self.allocated() - self.free()
    }
}
