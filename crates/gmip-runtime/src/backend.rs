#![forbid(unsafe_code)]

//! Terminal backends.
//!
//! The viewer talks to the terminal through the [`Backend`] trait: it asks for
//! the size, blocks for the next event, and hands over finished frames.
//! [`TtyBackend`] drives a real terminal. With the `test-helpers` feature,
//! `ScriptedBackend` replays a fixed event list and records every frame.

#[cfg(any(test, feature = "test-helpers"))]
use std::collections::VecDeque;
use std::io::{self, Stdout};

use gmip_core::event::Event;
#[cfg(any(test, feature = "test-helpers"))]
use gmip_core::event::{KeyCode, KeyEvent};
use gmip_core::terminal_session::{SessionOptions, TerminalSession};
use gmip_render::{Buffer, Presenter};

/// What the event loop needs from a terminal.
pub trait Backend {
    /// Current size as `(columns, rows)`.
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Block until the next event. `Ok(None)` means an event the viewer
    /// ignores.
    fn read_event(&mut self) -> io::Result<Option<Event>>;

    /// Show a finished frame.
    fn present(&mut self, frame: &Buffer) -> io::Result<()>;
}

/// A real terminal in raw mode on the alternate screen.
///
/// Dropping the backend restores the terminal.
pub struct TtyBackend {
    presenter: Presenter<Stdout>,
    // Dropped last so the final frame is flushed before the terminal is restored.
    session: TerminalSession,
}

impl TtyBackend {
    /// Enter raw mode and the alternate screen, hiding the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be switched into raw mode.
    pub fn new() -> io::Result<Self> {
        let session = TerminalSession::new(SessionOptions {
            alternate_screen: true,
            hide_cursor: true,
        })?;
        Ok(Self {
            presenter: Presenter::new(io::stdout()),
            session,
        })
    }
}

impl Backend for TtyBackend {
    fn size(&self) -> io::Result<(u16, u16)> {
        self.session.size()
    }

    fn read_event(&mut self) -> io::Result<Option<Event>> {
        let event = self.session.read_event()?;
        if matches!(event, Some(Event::Resize { .. })) {
            self.presenter.invalidate();
        }
        Ok(event)
    }

    fn present(&mut self, frame: &Buffer) -> io::Result<()> {
        self.presenter.present_frame(frame)
    }
}

/// In-memory backend that replays events and records frames.
///
/// Resize events in the script also change what [`Backend::size`] reports.
/// Reading past the end of the script fails with
/// [`io::ErrorKind::UnexpectedEof`].
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Clone)]
pub struct ScriptedBackend {
    size: (u16, u16),
    events: VecDeque<Event>,
    frames: Vec<Buffer>,
}

#[cfg(any(test, feature = "test-helpers"))]
impl ScriptedBackend {
    /// A backend of the given size with an empty script.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            size: (width, height),
            events: VecDeque::new(),
            frames: Vec::new(),
        }
    }

    /// Append an event to the script.
    #[must_use]
    pub fn event(mut self, event: Event) -> Self {
        self.events.push_back(event);
        self
    }

    /// Append a plain key press.
    #[must_use]
    pub fn key(self, code: KeyCode) -> Self {
        self.event(Event::Key(KeyEvent::new(code)))
    }

    /// Append one key press per character of `keys`.
    #[must_use]
    pub fn keys(mut self, keys: &str) -> Self {
        for ch in keys.chars() {
            self = self.key(KeyCode::Char(ch));
        }
        self
    }

    /// Every frame presented so far.
    #[must_use]
    pub fn frames(&self) -> &[Buffer] {
        &self.frames
    }

    /// The most recent frame.
    #[must_use]
    pub fn last_frame(&self) -> Option<&Buffer> {
        self.frames.last()
    }

    /// Events not consumed yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl Backend for ScriptedBackend {
    fn size(&self) -> io::Result<(u16, u16)> {
        Ok(self.size)
    }

    fn read_event(&mut self) -> io::Result<Option<Event>> {
        let event = self
            .events
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "event script exhausted"))?;
        if let Event::Resize { width, height } = event {
            self.size = (width, height);
        }
        Ok(Some(event))
    }

    fn present(&mut self, frame: &Buffer) -> io::Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}
