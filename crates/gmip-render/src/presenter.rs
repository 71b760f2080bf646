#![forbid(unsafe_code)]

//! Presenter: state-tracked ANSI emission.
//!
//! The Presenter turns buffer diffs into terminal output, tracking the current
//! style and cursor so escape sequences are only written when something
//! changes. It also remembers the last presented buffer: [`present_frame`]
//! diffs against it, and falls back to a clear plus full repaint on the first
//! frame or when the size changed.
//!
//! [`present_frame`]: Presenter::present_frame
//!
//! Buffers hold one codepoint per cell, but terminals advance the cursor by a
//! glyph's display width. After any glyph whose width is not 1 the tracked
//! cursor is dropped, so the next cell is placed with an explicit move.
//!
//! # Usage
//!
//! ```
//! use gmip_render::buffer::Buffer;
//! use gmip_render::presenter::Presenter;
//!
//! let mut presenter = Presenter::new(Vec::new());
//! let mut frame = Buffer::new(20, 5);
//! frame.print(0, 0, "Hello", Default::default());
//! presenter.present_frame(&frame)?;
//! let output = presenter.into_inner()?;
//! assert!(String::from_utf8_lossy(&output).contains("Hello"));
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, BufWriter, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{Clear, ClearType};
use gmip_style::{Color, Style, StyleFlags};
use unicode_width::UnicodeWidthChar;

use crate::buffer::Buffer;
use crate::diff::BufferDiff;

/// Size of the internal write buffer (64KB).
const BUFFER_CAPACITY: usize = 64 * 1024;

/// Which SGR color slot a color goes to.
#[derive(Clone, Copy)]
enum Layer {
    Foreground,
    Background,
}

/// State-tracked ANSI presenter.
pub struct Presenter<W: Write> {
    writer: BufWriter<W>,
    /// Style last emitted (None = unknown/reset).
    current_style: Option<Style>,
    /// Cursor position (None = unknown).
    cursor: Option<(u16, u16)>,
    /// Last presented frame.
    previous: Option<Buffer>,
}

impl<W: Write> Presenter<W> {
    /// Create a presenter writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(BUFFER_CAPACITY, writer),
            current_style: None,
            cursor: None,
            previous: None,
        }
    }

    /// Present `buffer`, writing only what changed since the last frame.
    ///
    /// # Errors
    ///
    /// Propagates write errors from the underlying writer.
    pub fn present_frame(&mut self, buffer: &Buffer) -> io::Result<()> {
        let diff = match self.previous.take() {
            Some(previous) if previous.same_size(buffer) => BufferDiff::compute(&previous, buffer),
            _ => {
                queue!(self.writer, SetAttribute(Attribute::Reset), Clear(ClearType::All))?;
                self.reset();
                BufferDiff::full(buffer)
            }
        };
        self.present(buffer, &diff)?;
        self.previous = Some(buffer.clone());
        Ok(())
    }

    /// Present the cells of `buffer` listed in `diff`.
    ///
    /// # Errors
    ///
    /// Propagates write errors from the underlying writer.
    pub fn present(&mut self, buffer: &Buffer, diff: &BufferDiff) -> io::Result<()> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!(
            "present",
            width = buffer.width(),
            height = buffer.height(),
            changes = diff.len()
        );
        #[cfg(feature = "tracing")]
        let _guard = _span.enter();

        for run in diff.runs() {
            for x in run.x0..=run.x1 {
                let Some(cell) = buffer.get(x, run.y) else {
                    break;
                };
                self.move_cursor_to(x, run.y)?;
                self.emit_style(cell.style)?;
                queue!(self.writer, Print(cell.ch))?;
                self.cursor = match cell.ch.width() {
                    Some(1) => self.cursor.map(|(cx, cy)| (cx.saturating_add(1), cy)),
                    _ => None,
                };
            }
        }

        queue!(self.writer, SetAttribute(Attribute::Reset))?;
        self.current_style = None;

        #[cfg(feature = "tracing")]
        tracing::trace!("frame presented");
        self.writer.flush()
    }

    /// Forget the tracked terminal state and the last frame.
    ///
    /// The next [`present_frame`](Self::present_frame) repaints everything.
    pub fn invalidate(&mut self) {
        self.previous = None;
        self.reset();
    }

    /// Forget the tracked style and cursor position.
    pub fn reset(&mut self) {
        self.current_style = None;
        self.cursor = None;
    }

    /// Get the inner writer (consuming the presenter).
    ///
    /// Flushes any buffered data before returning the writer.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }

    fn move_cursor_to(&mut self, x: u16, y: u16) -> io::Result<()> {
        if self.cursor == Some((x, y)) {
            return Ok(());
        }
        queue!(self.writer, MoveTo(x, y))?;
        self.cursor = Some((x, y));
        Ok(())
    }

    fn emit_style(&mut self, style: Style) -> io::Result<()> {
        if self.current_style == Some(style) {
            return Ok(());
        }

        // Reset, then apply the whole style.
        queue!(self.writer, SetAttribute(Attribute::Reset))?;
        self.emit_color(style.fg, Layer::Foreground)?;
        self.emit_color(style.bg, Layer::Background)?;
        if style.flags.contains(StyleFlags::UNDERLINE) {
            queue!(self.writer, SetAttribute(Attribute::Underlined))?;
        }

        self.current_style = Some(style);
        Ok(())
    }

    fn emit_color(&mut self, color: Color, layer: Layer) -> io::Result<()> {
        match (color, layer) {
            (Color::Default, _) => Ok(()),
            // Basic colors use SGR 30-37 / 40-47 so 8-color terminals understand them.
            (Color::Ansi16(c), Layer::Foreground) => write!(self.writer, "\x1b[{}m", 30 + c.as_u8()),
            (Color::Ansi16(c), Layer::Background) => write!(self.writer, "\x1b[{}m", 40 + c.as_u8()),
            (Color::Ansi256(n), Layer::Foreground) => {
                queue!(self.writer, SetForegroundColor(CtColor::AnsiValue(n)))
            }
            (Color::Ansi256(n), Layer::Background) => {
                queue!(self.writer, SetBackgroundColor(CtColor::AnsiValue(n)))
            }
        }
    }
}
