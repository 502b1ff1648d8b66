//! tagview: a wrapping grid of text chips.
//!
//! A [`TagCollection`] asks a host-implemented [`TagDataSource`] for a tag
//! count and per-index text, sizes a chip for each tag with a
//! [`TextMeasurer`], and flows the chips into rows positioned by an
//! [`AlignPolicy`]. Hosts observe extent changes and selections through a
//! [`TagDelegate`].
//!
//! # Module Organization
//!
//! - [`collection`] - The tags view itself
//! - [`flow`], [`align`] - Row wrapping and alignment
//! - [`measure`] - Text measurement and chip sizing
//! - [`diff`] - Scroll-driven word substitution
//! - [`pager`] - Horizontal paging model
//! - [`canvas`], [`render`] - Drawing onto terminal cells

#![warn(missing_docs)]

pub mod align;
pub mod canvas;
pub mod chip;
pub mod collection;
pub mod config;
pub mod diff;
pub mod error;
pub mod flow;
pub mod measure;
pub mod pager;
pub mod pool;
pub mod render;
pub mod source;
pub mod style;
pub mod text;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use geom;

pub use align::{AlignPolicy, Alignment, HAlign, VAlign};
pub use chip::{Chip, LabelText};
pub use collection::{ChangeSet, TagCollection};
pub use config::TagsConfig;
pub use diff::{DiffScheduler, TextState};
pub use error::{Error, Result};
pub use measure::{CHIP_HEIGHT, CellMeasurer, Font, TextMeasurer};
pub use pager::PagedScroll;
pub use source::{TagDataSource, TagDelegate, VecSource};
pub use text::StyledText;
