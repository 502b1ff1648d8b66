//! A terminal onboarding screen built around a `tagview` tags view.
//!
//! Four pages scroll horizontally. As the pager moves past the first page,
//! the quote on the middle pages swaps its words for a second text, one
//! differing word at a time, driven by a `DiffScheduler`.

pub mod config;
pub mod onboarding;
pub mod quote;
pub mod terminal;
pub mod tutorial;

use std::{fs::File, path::Path, sync::Mutex};

use anyhow::{Context as _, Result};
use tagview::canvas::Canvas;
use tracing_subscriber::fmt;

use crate::onboarding::Onboarding;

/// Send tracing output to a file.
pub fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log {}", path.display()))?;
    let format = fmt::format()
        .with_level(true)
        .with_line_number(true)
        .with_ansi(false)
        .without_time()
        .compact();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(Mutex::new(file))
        .event_format(format)
        .init();
    Ok(())
}

/// Render one frame per page as plain text.
pub fn dump(app: &mut Onboarding) -> Result<Vec<String>> {
    let mut out = Vec::new();
    let mut canvas = Canvas::new(app.screen());
    for page in 0..app.pager().page_count() {
        app.scroll_to_page(page)?;
        app.render(&mut canvas)?;
        out.push(format!("--- page {page} ---"));
        out.extend(canvas.lines());
    }
    Ok(out)
}
