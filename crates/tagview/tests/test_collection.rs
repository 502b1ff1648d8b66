//! End-to-end tests for tag collections: mutations, batching, selection and rendering.

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        rc::Rc,
    };

    use pretty_assertions::assert_eq;
    use tagview::{
        Alignment, DiffScheduler, Error, LabelText, Result, StyledText, TagCollection,
        TagDataSource, TagDelegate, TagsConfig, VecSource,
        canvas::Canvas,
        geom::{Expanse, Insets, Point, Rect},
        render::{CellScale, RenderStyle, render_tags},
        testing::{FixedMeasurer, RecordingDelegate},
    };

    fn collection(width: u32, height: u32, space: Insets) -> TagCollection {
        let config = TagsConfig::default()
            .with_space(space)
            .with_alignment(Alignment::top_left());
        let mut c = TagCollection::new(config, Box::new(FixedMeasurer::new(10)));
        c.set_bounds(Rect::new(0, 0, width, height));
        c
    }

    fn attach(c: &mut TagCollection, src: &Rc<VecSource>) {
        let ds: Rc<dyn TagDataSource> = src.clone();
        c.set_data_source(Some(ds));
    }

    fn texts(c: &TagCollection) -> Vec<String> {
        c.visible_chips().map(|chip| chip.label().text.plain()).collect()
    }

    #[test]
    fn reload_matches_source_count() {
        let src = Rc::new(VecSource::new(["the", "crazy", "ones"]));
        let mut c = collection(400, 400, Insets::default());
        attach(&mut c, &src);
        assert_eq!(c.len(), 3);
        assert_eq!(texts(&c), vec!["the", "crazy", "ones"]);

        src.insert(3, "misfits");
        c.reload();
        assert_eq!(c.len(), 4);
        assert_eq!(c.visible_chips().count(), 4);
        assert!(c.last_changes().reloaded);
    }

    #[test]
    fn absent_source_is_empty() {
        let mut c = collection(400, 400, Insets::default());
        c.reload();
        assert!(c.is_empty());
        assert_eq!(c.visible_chips().count(), 0);
        assert_eq!(c.extent(), Expanse::new(400, 0));

        c.set_data_source(None);
        assert_eq!(c.len(), 0);
    }

    #[test]
    fn insert_renders_new_positions() -> Result<()> {
        let src = Rc::new(VecSource::new(["a", "b", "c"]));
        let mut c = collection(400, 400, Insets::default());
        attach(&mut c, &src);

        src.insert(1, "x");
        src.insert(3, "y");
        c.insert_at(&[1, 3])?;
        assert_eq!(c.len(), 5);
        assert_eq!(texts(&c), vec!["a", "x", "b", "y", "c"]);
        assert_eq!(
            c.chip_for(3).map(|chip| chip.label().text.plain()),
            Some("y".to_string())
        );
        assert_eq!(c.chip_for(4).and_then(|chip| chip.index()), Some(4));
        Ok(())
    }

    #[test]
    fn invalid_insertions_leave_count_alone() {
        let src = Rc::new(VecSource::new(["a"]));
        let mut c = collection(400, 400, Insets::default());
        attach(&mut c, &src);

        assert_eq!(c.insert_at(&[1, 1]), Err(Error::DuplicateIndex(1)));
        assert_eq!(c.insert_at(&[5]), Err(Error::Index { index: 5, len: 2 }));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn delete_shrinks_and_recycles() -> Result<()> {
        let src = Rc::new(VecSource::new(["a", "b", "c", "d"]));
        let mut c = collection(400, 400, Insets::default());
        attach(&mut c, &src);
        let allocated = c.pool().allocated();

        src.remove(3);
        src.remove(1);
        c.delete_at(&[3, 1])?;
        assert_eq!(c.len(), 2);
        assert_eq!(texts(&c), vec!["a", "c"]);
        assert_eq!(c.pool().free(), 2);
        assert_eq!(c.pool().allocated(), allocated);

        assert_eq!(
            c.delete_at(&[0, 1, 2]),
            Err(Error::Underflow { count: 3, len: 2 })
        );
        assert_eq!(c.delete_at(&[2]), Err(Error::Index { index: 2, len: 2 }));
        assert_eq!(c.len(), 2);
        Ok(())
    }

    #[test]
    fn update_refetches_in_place() -> Result<()> {
        let src = Rc::new(VecSource::new(["they", "push"]));
        let mut c = collection(400, 400, Insets::default());
        attach(&mut c, &src);

        c.update_at(&[0, 1])?;
        let first = texts(&c);
        c.update_at(&[0, 1])?;
        assert_eq!(texts(&c), first);

        // Without an update call the chip keeps what it last fetched.
        src.replace(0, "we");
        c.layout();
        assert_eq!(texts(&c), vec!["they", "push"]);
        c.update_item(0)?;
        assert_eq!(texts(&c), vec!["we", "push"]);
        assert_eq!(c.len(), 2);
        Ok(())
    }

    #[test]
    fn chip_width_follows_measurement() {
        let space = Insets::new(3, 0);
        let src = Rc::new(VecSource::new(["abc", "abcdefghijklmnopqrst"]));
        let mut c = collection(100, 400, space);
        attach(&mut c, &src);

        // 3 chars * 10 + 4 * 3
        assert_eq!(c.frame_of(0).map(|f| f.w), Some(42));
        // 200 + 12 overflows 100 - 2 * 3
        assert_eq!(c.frame_of(1).map(|f| f.w), Some(94));
        assert_eq!(c.frame_of(0).map(|f| f.h), Some(tagview::CHIP_HEIGHT));

        let label = c.chip_for(0).map(|chip| chip.label().frame);
        assert_eq!(label, Some(Rect::new(3, 0, 36, 30)));
    }

    #[test]
    fn extent_changes_notify_once() -> Result<()> {
        let src = Rc::new(VecSource::new(["aaaa", "bbbb", "cccc"]));
        let delegate = Rc::new(RecordingDelegate::new());
        let mut c = collection(100, 400, Insets::default());
        let d: Rc<dyn TagDelegate> = delegate.clone();
        c.set_delegate(Some(d));
        attach(&mut c, &src);

        assert_eq!(delegate.extent_count(), 1);
        assert_eq!(delegate.last_extent(), Some(Expanse::new(100, 60)));

        c.layout();
        c.update_at(&[0])?;
        assert_eq!(delegate.extent_count(), 1);

        // Fills the second row: same extent.
        src.insert(3, "dddd");
        c.insert_item(3)?;
        assert_eq!(delegate.extent_count(), 1);

        // Starts a third row.
        src.insert(4, "eeee");
        c.insert_item(4)?;
        assert_eq!(delegate.extent_count(), 2);
        assert_eq!(delegate.last_extent(), Some(Expanse::new(100, 90)));
        Ok(())
    }

    /// A source that supplies styled text for odd indices.
    struct OddStyled;

    impl TagDataSource for OddStyled {
        fn count(&self) -> usize {
            4
        }

        fn text_at(&self, _index: usize) -> String {
            "ab".into()
        }

        fn styled_text_at(&self, index: usize) -> Option<StyledText> {
            (index % 2 == 1).then(|| StyledText::underlined("abcdef"))
        }
    }

    #[test]
    fn styled_text_takes_precedence() {
        let mut c = collection(400, 400, Insets::default());
        c.set_data_source(Some(Rc::new(OddStyled)));
        assert_eq!(c.frame_of(0).map(|f| f.w), Some(20));
        assert_eq!(c.frame_of(1).map(|f| f.w), Some(60));
        assert!(matches!(
            c.chip_for(1).map(|chip| &chip.label().text),
            Some(LabelText::Styled(_))
        ));
        assert!(matches!(
            c.chip_for(0).map(|chip| &chip.label().text),
            Some(LabelText::Plain(_))
        ));
    }

    #[test]
    fn batches_coalesce() -> Result<()> {
        let src = Rc::new(VecSource::new(["aaaa", "bbbb"]));
        let delegate = Rc::new(RecordingDelegate::new());
        let mut c = collection(100, 400, Insets::default());
        let d: Rc<dyn TagDelegate> = delegate.clone();
        c.set_delegate(Some(d));
        attach(&mut c, &src);
        assert_eq!(delegate.extent_count(), 1);

        let completed = Rc::new(Cell::new(0));
        let done = completed.clone();
        let s = src.clone();
        c.perform_batch(
            |c| {
                for i in 2..6 {
                    s.insert(i, "cccc");
                    c.insert_item(i)?;
                    assert!(c.in_batch());
                }
                s.remove(0);
                c.delete_item(0)
            },
            move |ok| {
                assert!(ok);
                done.set(done.get() + 1);
            },
        )?;
        assert_eq!(completed.get(), 1);
        assert_eq!(c.len(), 5);
        // 30 -> 90 high with no intermediate report.
        assert_eq!(delegate.extent_count(), 2);
        assert_eq!(c.last_changes().inserted.len(), 4);
        assert_eq!(c.last_changes().deleted.len(), 1);
        Ok(())
    }

    #[test]
    fn hit_testing_inside_a_batch() -> Result<()> {
        let src = Rc::new(VecSource::new(["a", "b"]));
        let mut c = collection(400, 400, Insets::default());
        attach(&mut c, &src);
        c.batch(|c| {
            src.insert(0, "z");
            c.insert_at(&[0])?;
            assert_eq!(c.len(), 3);
            assert_eq!(c.index_at(Point::from((399, 399))), None);
            assert_eq!(c.index_at(Point::zero()), None);
            assert_eq!(c.frame_of(2), None);
            Ok(())
        })?;
        assert!(c.frame_of(2).is_some());
        assert_eq!(c.index_at(Point::from((1, 1))), Some(0));
        Ok(())
    }

    #[test]
    fn failed_batch_reports_failure() {
        let src = Rc::new(VecSource::new(["a"]));
        let mut c = collection(100, 400, Insets::default());
        attach(&mut c, &src);

        let outcome = Rc::new(RefCell::new(None));
        let seen = outcome.clone();
        let res = c.perform_batch(
            |c| c.update_at(&[7]),
            move |ok| *seen.borrow_mut() = Some(ok),
        );
        assert_eq!(res, Err(Error::Index { index: 7, len: 1 }));
        assert_eq!(*outcome.borrow(), Some(false));
        assert!(!c.in_batch());
    }

    #[test]
    fn nested_batches_complete_together() -> Result<()> {
        let src = Rc::new(VecSource::new(["a"]));
        let mut c = collection(100, 400, Insets::default());
        attach(&mut c, &src);

        let log = Rc::new(RefCell::new(Vec::new()));
        let (outer, inner) = (log.clone(), log.clone());
        c.perform_batch(
            |c| {
                c.perform_batch(|c| c.update_item(0), move |_| inner.borrow_mut().push("inner"))?;
                assert!(c.in_batch());
                Ok(())
            },
            move |_| outer.borrow_mut().push("outer"),
        )?;
        assert_eq!(*log.borrow(), vec!["inner", "outer"]);
        Ok(())
    }

    #[test]
    fn taps_select_chips() -> Result<()> {
        let src = Rc::new(VecSource::new(["aaaa", "bbbb"]));
        let delegate = Rc::new(RecordingDelegate::new());
        let mut c = collection(100, 400, Insets::default());
        c.set_bounds(Rect::new(10, 5, 100, 400));
        let d: Rc<dyn TagDelegate> = delegate.clone();
        c.set_delegate(Some(d));
        attach(&mut c, &src);

        assert_eq!(c.tap(Point::from((55, 10))), Some(1));
        assert_eq!(c.tap(Point::from((5, 10))), None);
        assert_eq!(c.tap(Point::from((20, 100))), None);
        c.select(0)?;
        assert_eq!(*delegate.selections.borrow(), vec![1, 0]);
        assert_eq!(c.select(2), Err(Error::Index { index: 2, len: 2 }));
        Ok(())
    }

    #[test]
    fn scrolling_recycles_chips() {
        let words: Vec<String> = (0..20).map(|i| format!("w{i:02}")).collect();
        let src = Rc::new(VecSource::new(words));
        // Three chips per row, one row visible.
        let mut c = collection(90, 30, Insets::default());
        attach(&mut c, &src);
        assert_eq!(texts(&c), vec!["w00", "w01", "w02"]);
        let allocated = c.pool().allocated();

        c.scroll_to(60);
        assert_eq!(texts(&c), vec!["w06", "w07", "w08"]);
        assert_eq!(c.pool().allocated(), allocated);
        assert_eq!(c.pool().live(), 3);

        c.scroll_by(-1000);
        assert_eq!(c.scroll_offset(), 0);
        c.scroll_to(u32::MAX);
        assert_eq!(c.scroll_offset(), c.extent().h - 30);
        assert_eq!(texts(&c), vec!["w18", "w19"]);
    }

    /// Quote source backed by a diff scheduler.
    struct Quote {
        /// Shared scheduler.
        diff: RefCell<DiffScheduler>,
    }

    impl TagDataSource for Quote {
        fn count(&self) -> usize {
            self.diff.borrow().count()
        }

        fn text_at(&self, index: usize) -> String {
            self.diff.borrow().words_a()[index].clone()
        }

        fn styled_text_at(&self, index: usize) -> Option<StyledText> {
            let diff = self.diff.borrow();
            diff.is_substituted(index)
                .then(|| StyledText::underlined(diff.words_b()[index].clone()))
        }
    }

    #[test]
    fn diff_scheduler_drives_updates() -> Result<()> {
        let quote = Rc::new(Quote {
            diff: RefCell::new(DiffScheduler::new(["a", "b", "c"], ["x", "b", "z"])),
        });
        let mut c = collection(400, 400, Insets::default());
        let ds: Rc<dyn TagDataSource> = quote.clone();
        c.set_data_source(Some(ds));

        let flipped = quote.diff.borrow_mut().change_state_at(0.4);
        c.update_at(&flipped)?;
        assert_eq!(texts(&c), vec!["x", "b", "c"]);

        let flipped = quote.diff.borrow_mut().change_state_at(1.1);
        c.update_at(&flipped)?;
        assert_eq!(texts(&c), vec!["x", "b", "z"]);
        assert_eq!(c.last_changes().updated.len(), 1);

        let flipped = quote.diff.borrow_mut().change_state_at(-1.0);
        assert!(flipped.is_empty());
        c.update_at(&flipped)?;
        assert_eq!(texts(&c), vec!["x", "b", "z"]);

        let flipped = quote.diff.borrow_mut().change_state_at(0.1);
        c.update_at(&flipped)?;
        assert_eq!(texts(&c), vec!["a", "b", "c"]);
        assert!(quote.diff.borrow().changed_ever().contains(&0));
        Ok(())
    }

    #[test]
    fn renders_boxed_chips() -> Result<()> {
        let config = TagsConfig::default()
            .with_space((4, 0))
            .with_alignment(Alignment::top_left());
        let mut c = TagCollection::new(config, Box::new(tagview::CellMeasurer::default()));
        c.set_bounds(Rect::new(0, 0, 100, 60));
        let src: Rc<dyn TagDataSource> = Rc::new(VecSource::new(["we", "push", "the"]));
        c.set_data_source(Some(src));

        let mut canvas = Canvas::new((12, 6));
        render_tags(
            &c,
            &mut canvas,
            Point::zero(),
            CellScale::default(),
            &RenderStyle::default(),
        )?;
        assert_eq!(
            canvas.lines(),
            vec![
                "┌──┐┌────┐",
                "│we││push│",
                "└──┘└────┘",
                "┌───┐",
                "│the│",
                "└───┘",
            ]
        );

        let err = render_tags(
            &c,
            &mut canvas,
            Point::from((12, 0)),
            CellScale::default(),
            &RenderStyle::default(),
        );
        assert!(matches!(err, Err(Error::Render(_))));
        Ok(())
    }

    #[test]
    fn scrolled_chips_clip_at_origin() -> Result<()> {
        let config = TagsConfig::default()
            .with_space((4, 0))
            .with_alignment(Alignment::top_left());
        let mut c = TagCollection::new(config, Box::new(tagview::CellMeasurer::default()));
        c.set_bounds(Rect::new(0, 0, 100, 50));
        let src: Rc<dyn TagDataSource> = Rc::new(VecSource::new(["we", "push", "the"]));
        c.set_data_source(Some(src));
        c.scroll_to(10);
        assert_eq!(c.scroll_offset(), 10);

        let mut canvas = Canvas::new((12, 6));
        canvas.fill(Rect::new(0, 0, 12, 1), '#', Default::default());
        render_tags(
            &c,
            &mut canvas,
            Point::from((0, 1)),
            CellScale::default(),
            &RenderStyle::default(),
        )?;
        assert_eq!(
            canvas.lines(),
            vec![
                "############",
                "│we││push│",
                "└──┘└────┘",
                "┌───┐",
                "│the│",
                "└───┘",
            ]
        );
        Ok(())
    }
}
