//! Crossterm runloop for the onboarding screen.

use std::{
    io::{self, Stderr, Write},
    panic,
};

use anyhow::Result;
use color_backtrace::{BacktracePrinter, default_output_stream};
use crossterm::{
    ExecutableCommand, QueueableCommand, cursor as ccursor,
    event::{
        self as cevent, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
        MouseEvent, MouseEventKind,
    },
    style, terminal,
};
use scopeguard::guard;
use tagview::{
    canvas::Canvas,
    geom::{Expanse, Point},
    style::AttrSet,
};

use crate::onboarding::Onboarding;

/// What the loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Keep going.
    Continue,
    /// Leave the loop.
    Quit,
}

/// Enter alternate screen and raw mode.
fn enter(fp: &mut Stderr) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    fp.execute(terminal::EnterAlternateScreen)?;
    fp.execute(cevent::EnableMouseCapture)?;
    fp.execute(ccursor::Hide)?;
    Ok(())
}

/// Leave alternate screen and restore terminal state.
fn exit(fp: &mut Stderr) -> io::Result<()> {
    fp.execute(terminal::LeaveAlternateScreen)?;
    fp.execute(cevent::DisableMouseCapture)?;
    fp.execute(ccursor::Show)?;
    terminal::disable_raw_mode()?;
    Ok(())
}

/// Apply attributes to subsequent output.
fn apply_attrs(fp: &mut Stderr, attrs: AttrSet) -> io::Result<()> {
    fp.queue(style::SetAttribute(style::Attribute::Reset))?;
    if attrs.bold {
        fp.queue(style::SetAttribute(style::Attribute::Bold))?;
    }
    if attrs.dim {
        fp.queue(style::SetAttribute(style::Attribute::Dim))?;
    }
    if attrs.italic {
        fp.queue(style::SetAttribute(style::Attribute::Italic))?;
    }
    if attrs.reverse {
        fp.queue(style::SetAttribute(style::Attribute::Reverse))?;
    }
    if attrs.underline {
        fp.queue(style::SetAttribute(style::Attribute::Underlined))?;
    }
    Ok(())
}

/// Write the whole canvas, one run of equal attributes at a time.
fn draw(fp: &mut Stderr, canvas: &Canvas) -> io::Result<()> {
    let size = canvas.size();
    for y in 0..size.h {
        fp.queue(ccursor::MoveTo(0, y as u16))?;
        let mut run = String::new();
        let mut current = AttrSet::default();
        apply_attrs(fp, current)?;
        for x in 0..size.w {
            let Some(cell) = canvas.get(Point { x, y }) else {
                continue;
            };
            if cell.continuation {
                continue;
            }
            let attrs = if cell.is_empty() {
                AttrSet::default()
            } else {
                cell.attrs
            };
            if attrs != current {
                fp.queue(style::Print(&run))?;
                run.clear();
                apply_attrs(fp, attrs)?;
                current = attrs;
            }
            cell.push_text(&mut run);
        }
        fp.queue(style::Print(&run))?;
    }
    fp.queue(style::SetAttribute(style::Attribute::Reset))?;
    fp.flush()
}

/// Dispatch a key press.
fn key(app: &mut Onboarding, k: KeyEvent) -> Result<Flow> {
    match k.code {
        KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => return Ok(Flow::Quit),
        KeyCode::Char('q') | KeyCode::Esc => return Ok(Flow::Quit),
        KeyCode::Left | KeyCode::Char('h') => app.step(false)?,
        KeyCode::Right | KeyCode::Char('l') => app.step(true)?,
        KeyCode::PageUp => app.prev_page()?,
        KeyCode::PageDown => app.next_page()?,
        KeyCode::Up | KeyCode::Char('k') => app.scroll_quote(-1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_quote(1),
        KeyCode::Char('s') => app.toggle_state()?,
        KeyCode::Char('r') => app.reset()?,
        _ => {}
    }
    Ok(Flow::Continue)
}

/// Dispatch a mouse event.
fn mouse(app: &mut Onboarding, m: MouseEvent) -> Result<()> {
    match m.kind {
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => app.step(true)?,
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => app.step(false)?,
        MouseEventKind::Down(MouseButton::Left) => {
            let p = Point {
                x: u32::from(m.column),
                y: u32::from(m.row),
            };
            if let Some(index) = app.click(p) {
                tracing::debug!("click at {:?} hit word {}", p, index);
            }
        }
        _ => {}
    }
    Ok(())
}

/// Run the onboarding screen until the user quits.
pub fn runloop(mut app: Onboarding) -> Result<()> {
    let mut fp = io::stderr();
    enter(&mut fp)?;
    let _terminal = guard((), |_| {
        #[allow(unused_must_use)]
        {
            exit(&mut io::stderr());
        }
    });

    let previous = panic::take_hook();
    panic::set_hook(Box::new(|pi| {
        let mut stderr = io::stderr();
        #[allow(unused_must_use)]
        {
            crossterm::execute!(
                stderr,
                terminal::LeaveAlternateScreen,
                cevent::DisableMouseCapture,
                ccursor::Show
            );
            terminal::disable_raw_mode();
            BacktracePrinter::new().print_panic_info(pi, &mut default_output_stream());
        }
    }));
    let _panic_hook = guard(previous, |hook| {
        panic::set_hook(hook);
    });

    let (w, h) = terminal::size()?;
    app.resize(Expanse::new(u32::from(w), u32::from(h)))?;
    let mut canvas = Canvas::new(app.screen());
    loop {
        app.render(&mut canvas)?;
        draw(&mut fp, &canvas)?;
        match cevent::read()? {
            Event::Key(k) if k.kind == KeyEventKind::Press => {
                if key(&mut app, k)? == Flow::Quit {
                    break;
                }
            }
            Event::Mouse(m) => mouse(&mut app, m)?,
            Event::Resize(w, h) => {
                app.resize(Expanse::new(u32::from(w), u32::from(h)))?;
                canvas = Canvas::new(app.screen());
                fp.execute(terminal::Clear(terminal::ClearType::All))?;
            }
            _ => {}
        }
    }
    Ok(())
}
