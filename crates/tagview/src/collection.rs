//! The tags view: a wrapping grid of chips fed by a data source.

use std::{
    collections::{BTreeMap, BTreeSet},
    mem,
    ops::Range,
    rc::Rc,
};

use geom::{Expanse, Point, Rect};

use crate::{
    align::AlignPolicy,
    chip::{Chip, LabelText},
    config::TagsConfig,
    error::{Error, Result},
    flow::{FlowLayout, FlowResult},
    measure::{TextMeasurer, chip_size},
    pool::{ChipId, ChipPool, TAG_REUSE_KEY},
    source::{TagDataSource, TagDelegate},
};

/// Mutations recorded between two layout passes.
///
/// Inserted and updated indices refer to positions after every mutation in
/// the set was applied. Deleted indices are recorded as issued.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// True if the collection was reloaded.
    pub reloaded: bool,
    /// Newly inserted positions.
    pub inserted: BTreeSet<usize>,
    /// Removed positions, pre-deletion.
    pub deleted: BTreeSet<usize>,
    /// Positions whose content was re-fetched.
    pub updated: BTreeSet<usize>,
}

impl ChangeSet {
    /// Does the change set require the chip at `index` to re-fetch content?
    fn refreshes(&self, index: usize) -> bool {
        self.reloaded || self.inserted.contains(&index) || self.updated.contains(&index)
    }

    /// Is the change set empty?
    pub fn is_empty(&self) -> bool {
        !self.reloaded
            && self.inserted.is_empty()
            && self.deleted.is_empty()
            && self.updated.is_empty()
    }
}

/// Validate a set of indices against `len`, returning them sorted.
fn checked_indices(indices: &[usize], len: usize) -> Result<Vec<usize>> {
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    for pair in sorted.windows(2) {
        if pair[0] == pair[1] {
            return Err(Error::DuplicateIndex(pair[0]));
        }
    }
    if let Some(&index) = sorted.last()
        && index >= len
    {
        return Err(Error::Index { index, len });
    }
    Ok(sorted)
}

/// Where an existing position lands once `inserted` (sorted, post-insertion
/// positions) have been added.
fn shift_for_insert(index: usize, inserted: &[usize]) -> usize {
    let mut n = index;
    for &p in inserted {
        if p <= n {
            n += 1;
        } else {
            break;
        }
    }
    n
}

/// Where an existing position lands once `deleted` (sorted, pre-deletion
/// positions) have been removed. Returns `None` for deleted positions.
fn shift_for_delete(index: usize, deleted: &[usize]) -> Option<usize> {
    match deleted.binary_search(&index) {
        Ok(_) => None,
        Err(below) => Some(index - below),
    }
}

/// A wrapping grid of text chips.
///
/// The collection caches the tag count reported by its data source and only
/// changes it through `reload`, `insert_at` and `delete_at`. The host keeps
/// its backing sequence in step with those calls.
pub struct TagCollection {
    /// Visual configuration.
    config: TagsConfig,
    /// Measures label text.
    measurer: Box<dyn TextMeasurer>,
    /// Positions each row.
    policy: Box<dyn AlignPolicy>,
    /// Supplies tags.
    data_source: Option<Rc<dyn TagDataSource>>,
    /// Receives notifications.
    delegate: Option<Rc<dyn TagDelegate>>,
    /// Frame of the view in its parent's coordinates.
    bounds: Rect,
    /// Vertical scroll offset into the content.
    scroll: u32,
    /// Cached tag count.
    count: usize,
    /// Result of the last layout pass.
    flow: FlowResult,
    /// Extent last reported to the delegate.
    reported_extent: Expanse,
    /// Chip arena.
    pool: ChipPool,
    /// Materialized chips by tag index.
    visible: BTreeMap<usize, ChipId>,
    /// Mutations since the last layout pass.
    pending: ChangeSet,
    /// Mutations applied by the last layout pass.
    last_changes: ChangeSet,
    /// Batch nesting depth.
    batch_depth: usize,
    /// Completions waiting for the outermost batch to finish.
    completions: Vec<(Box<dyn FnOnce(bool)>, bool)>,
}

impl TagCollection {
    /// Construct an empty collection with no data source.
    pub fn new(config: TagsConfig, measurer: Box<dyn TextMeasurer>) -> Self {
        Self {
            policy: Box::new(config.alignment),
            config,
            measurer,
            data_source: None,
            delegate: None,
            bounds: Rect::zero(),
            scroll: 0,
            count: 0,
            flow: FlowResult::default(),
            reported_extent: Expanse::default(),
            pool: ChipPool::new(),
            visible: BTreeMap::new(),
            pending: ChangeSet::default(),
            last_changes: ChangeSet::default(),
            batch_depth: 0,
            completions: Vec::new(),
        }
    }

    /// The configuration.
    pub fn config(&self) -> &TagsConfig {
        &self.config
    }

    /// Replace the configuration and lay out again. The alignment policy is
    /// reset to the configured alignment.
    pub fn set_config(&mut self, config: TagsConfig) {
        self.config = config;
        self.policy = Box::new(config.alignment);
        self.pending.reloaded = true;
        self.layout();
    }

    /// Install a custom row alignment policy.
    pub fn set_align_policy(&mut self, policy: Box<dyn AlignPolicy>) {
        self.policy = policy;
        self.layout();
    }

    /// Set the data source and reload.
    pub fn set_data_source(&mut self, source: Option<Rc<dyn TagDataSource>>) {
        self.data_source = source;
        self.reload();
    }

    /// Set the delegate.
    pub fn set_delegate(&mut self, delegate: Option<Rc<dyn TagDelegate>>) {
        self.delegate = delegate;
    }

    /// The view frame.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Move or resize the view. A size change triggers a layout pass.
    pub fn set_bounds(&mut self, bounds: Rect) {
        let resized = bounds.expanse() != self.bounds.expanse();
        self.bounds = bounds;
        if resized {
            self.layout();
        }
    }

    /// The cached number of tags.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Are there no tags?
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Total content size from the last layout pass.
    pub fn extent(&self) -> Expanse {
        self.flow.extent
    }

    /// The vertical scroll offset.
    pub fn scroll_offset(&self) -> u32 {
        self.scroll
    }

    /// The visible part of the content, in content coordinates.
    pub fn viewport(&self) -> Rect {
        Rect::new(0, self.scroll, self.bounds.w, self.bounds.h)
    }

    /// Frame of the tag at `index` in content coordinates, as of the last
    /// layout pass. Tags inserted in an open batch have no frame until it
    /// commits.
    pub fn frame_of(&self, index: usize) -> Option<Rect> {
        self.flow.frames.get(index).copied()
    }

    /// Item ranges of each laid-out row.
    pub fn rows(&self) -> &[Range<usize>] {
        &self.flow.rows
    }

    /// The chip currently materialized for `index`, if it is visible.
    pub fn chip_for(&self, index: usize) -> Option<&Chip> {
        self.visible.get(&index).and_then(|id| self.pool.get(*id))
    }

    /// Materialized chips in index order.
    pub fn visible_chips(&self) -> impl Iterator<Item = &Chip> {
        self.visible.values().filter_map(|id| self.pool.get(*id))
    }

    /// The chip arena, for inspecting recycling.
    pub fn pool(&self) -> &ChipPool {
        &self.pool
    }

    /// Mutations applied by the most recent layout pass.
    pub fn last_changes(&self) -> &ChangeSet {
        &self.last_changes
    }

    /// Is a batch in progress?
    pub fn in_batch(&self) -> bool {
        self.batch_depth > 0
    }

    /// Re-read the count from the data source, discard every chip and lay out.
    pub fn reload(&mut self) {
        self.count = self.data_source.as_ref().map_or(0, |ds| ds.count());
        tracing::debug!("tags reload: {} tags", self.count);
        for (_, id) in mem::take(&mut self.visible) {
            self.pool.release(id);
        }
        self.pending = ChangeSet {
            reloaded: true,
            ..Default::default()
        };
        self.layout();
    }

    /// Insert tags. `indices` are positions in the post-insertion sequence.
    pub fn insert_at(&mut self, indices: &[usize]) -> Result<()> {
        let new_count = self.count + indices.len();
        let sorted = checked_indices(indices, new_count)?;
        tracing::debug!("tags insert {:?}", sorted);
        self.count = new_count;

        self.visible = mem::take(&mut self.visible)
            .into_iter()
            .map(|(i, id)| (shift_for_insert(i, &sorted), id))
            .collect();
        let remap = |set: &BTreeSet<usize>| -> BTreeSet<usize> {
            set.iter().map(|i| shift_for_insert(*i, &sorted)).collect()
        };
        self.pending.inserted = remap(&self.pending.inserted);
        self.pending.updated = remap(&self.pending.updated);
        self.pending.inserted.extend(sorted.iter().copied());
        self.layout();
        Ok(())
    }

    /// Remove tags. `indices` are positions in the pre-deletion sequence.
    pub fn delete_at(&mut self, indices: &[usize]) -> Result<()> {
        if indices.len() > self.count {
            return Err(Error::Underflow {
                count: indices.len(),
                len: self.count,
            });
        }
        let sorted = checked_indices(indices, self.count)?;
        tracing::debug!("tags delete {:?}", sorted);
        self.count -= sorted.len();

        let mut kept = BTreeMap::new();
        for (i, id) in mem::take(&mut self.visible) {
            match shift_for_delete(i, &sorted) {
                Some(n) => {
                    kept.insert(n, id);
                }
                None => self.pool.release(id),
            }
        }
        self.visible = kept;
        let remap = |set: &BTreeSet<usize>| -> BTreeSet<usize> {
            set.iter()
                .filter_map(|i| shift_for_delete(*i, &sorted))
                .collect()
        };
        self.pending.inserted = remap(&self.pending.inserted);
        self.pending.updated = remap(&self.pending.updated);
        self.pending.deleted.extend(sorted.iter().copied());
        self.layout();
        Ok(())
    }

    /// Re-fetch the content of tags in place.
    pub fn update_at(&mut self, indices: &[usize]) -> Result<()> {
        let sorted = checked_indices(indices, self.count)?;
        if sorted.is_empty() {
            return Ok(());
        }
        tracing::trace!("tags update {:?}", sorted);
        self.pending.updated.extend(sorted);
        self.layout();
        Ok(())
    }

    /// Insert a single tag.
    pub fn insert_item(&mut self, index: usize) -> Result<()> {
        self.insert_at(&[index])
    }

    /// Remove a single tag.
    pub fn delete_item(&mut self, index: usize) -> Result<()> {
        self.delete_at(&[index])
    }

    /// Re-fetch a single tag.
    pub fn update_item(&mut self, index: usize) -> Result<()> {
        self.update_at(&[index])
    }

    /// Run a group of mutations as one batch: layout happens once, when the
    /// outermost batch finishes, followed by the completions of every batch
    /// it contained. A completion receives `false` if its batch failed; the
    /// error is returned to the caller. Mutations made before a failure stay
    /// applied.
    pub fn perform_batch<F, C>(&mut self, updates: F, completion: C) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
        C: FnOnce(bool) + 'static,
    {
        self.batch_depth += 1;
        let res = updates(self);
        self.batch_depth -= 1;
        self.completions.push((Box::new(completion), res.is_ok()));
        if self.batch_depth == 0 {
            tracing::trace!("tags batch commit");
            self.layout();
            for (done, ok) in mem::take(&mut self.completions) {
                done(ok);
            }
        }
        res
    }

    /// A batch without a completion.
    pub fn batch<F>(&mut self, updates: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.perform_batch(updates, |_| {})
    }

    /// Content for `index`: styled text when supplied, plain otherwise.
    fn content_at(&self, index: usize) -> LabelText {
        match &self.data_source {
            None => LabelText::Plain(String::new()),
            Some(ds) => match ds.styled_text_at(index) {
                Some(styled) => LabelText::Styled(styled),
                None => LabelText::Plain(ds.text_at(index)),
            },
        }
    }

    /// Run a layout pass. Does nothing while a batch is open.
    pub fn layout(&mut self) {
        if self.in_batch() {
            return;
        }
        if let Some(ds) = &self.data_source {
            let reported = ds.count();
            if reported != self.count {
                tracing::warn!(
                    "tag count out of sync: collection has {}, data source reports {}",
                    self.count,
                    reported
                );
            }
        }

        let width = self.bounds.w;
        let contents: Vec<LabelText> = (0..self.count).map(|i| self.content_at(i)).collect();
        let sizes: Vec<Expanse> = contents
            .iter()
            .map(|c| {
                let measured = self.measurer.measure(&c.plain(), &self.config.font);
                chip_size(measured, self.config.space, width)
            })
            .collect();
        let flow = FlowLayout {
            width,
            insets: self.config.content_insets,
            item_spacing: self.config.item_spacing,
            line_spacing: self.config.line_spacing,
        };
        self.flow = flow.layout(&sizes, self.policy.as_ref());

        if self.flow.extent != self.reported_extent {
            self.reported_extent = self.flow.extent;
            tracing::debug!("tags extent changed to {:?}", self.reported_extent);
            if let Some(delegate) = &self.delegate {
                delegate.on_extent_changed(self.reported_extent);
            }
        }

        self.scroll = self.scroll.min(self.max_scroll());
        let changes = mem::take(&mut self.pending);
        self.materialize(contents, &changes);
        self.last_changes = changes;
    }

    /// Bring the set of chips in line with the viewport.
    fn materialize(&mut self, mut contents: Vec<LabelText>, changes: &ChangeSet) {
        let viewport = self.viewport();
        let wanted: BTreeSet<usize> = self
            .flow
            .frames
            .iter()
            .enumerate()
            .filter(|(_, f)| f.intersects(&viewport))
            .map(|(i, _)| i)
            .collect();

        let stale: Vec<usize> = self
            .visible
            .keys()
            .filter(|i| !wanted.contains(i))
            .copied()
            .collect();
        for i in stale {
            if let Some(id) = self.visible.remove(&i) {
                self.pool.release(id);
            }
        }

        for i in wanted {
            let existing = self.visible.get(&i).copied();
            let (id, fresh) = match existing {
                Some(id) => (id, false),
                None => {
                    let id = self.pool.acquire(TAG_REUSE_KEY);
                    self.visible.insert(i, id);
                    (id, true)
                }
            };
            let Some(chip) = self.pool.get_mut(id) else {
                continue;
            };
            chip.set_index(i);
            chip.set_frame(self.flow.frames[i]);
            chip.layout(self.config.space);
            if fresh || changes.refreshes(i) {
                match mem::take(&mut contents[i]) {
                    LabelText::Styled(s) => chip.set_styled_text(s),
                    LabelText::Plain(s) => chip.set_text(s),
                    LabelText::Empty => chip.set_text(""),
                }
            }
        }
    }

    /// Largest valid scroll offset.
    fn max_scroll(&self) -> u32 {
        self.flow.extent.h.saturating_sub(self.bounds.h)
    }

    /// Scroll to a vertical offset, clamped to the content.
    pub fn scroll_to(&mut self, y: u32) {
        let y = y.min(self.max_scroll());
        if y != self.scroll {
            self.scroll = y;
            self.layout();
        }
    }

    /// Scroll by a relative amount.
    pub fn scroll_by(&mut self, dy: i32) {
        let y = Point::from((0, self.scroll)).scroll(0, dy).y;
        self.scroll_to(y);
    }

    /// The tag under a point given in the parent's coordinates. Returns `None`
    /// while a batch is open, since frames are only valid after layout.
    pub fn index_at(&self, p: Point) -> Option<usize> {
        if self.in_batch() {
            return None;
        }
        let local = self.bounds.rebase(p).ok()?;
        let content = Point {
            x: local.x,
            y: local.y.saturating_add(self.scroll),
        };
        self.visible
            .keys()
            .copied()
            .find(|i| {
                self.flow
                    .frames
                    .get(*i)
                    .is_some_and(|f| f.contains_point(content))
            })
    }

    /// Select a tag, notifying the delegate.
    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.count {
            return Err(Error::Index {
                index,
                len: self.count,
            });
        }
        tracing::debug!("tag {} selected", index);
        if let Some(delegate) = &self.delegate {
            delegate.on_selected(index);
        }
        Ok(())
    }

    /// Select the tag under a point, if any.
    pub fn tap(&mut self, p: Point) -> Option<usize> {
        let index = self.index_at(p)?;
        self.select(index).ok()?;
        Some(index)
    }
}
