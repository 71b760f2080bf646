#![forbid(unsafe_code)]

//! gmip public facade crate.
//!
//! Re-exports the types a caller needs to load a deck and drive it through a
//! backend, plus the top-level [`Error`] the binary maps to exit codes.
//!
//! ```no_run
//! use gmip::{Document, TtyBackend, Viewer, ViewerConfig};
//!
//! let document: Document = gmip::parse_file("talk.gmi")?;
//! let mut viewer = Viewer::new(TtyBackend::new()?, &document, ViewerConfig::default());
//! viewer.run()?;
//! # Ok::<(), gmip::Error>(())
//! ```

pub mod cli;

use std::io;
use std::path::Path;

use thiserror::Error;

// --- Core re-exports -------------------------------------------------------

pub use gmip_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use gmip_core::geometry::{Viewport, ViewportLimits, ViewportTooSmall};
pub use gmip_core::terminal_session::{SessionOptions, TerminalSession};

// --- Text re-exports -------------------------------------------------------

pub use gmip_text::{Document, EncodingError, Line, ParseError, Slide, parse, parse_file};

// --- Render re-exports -----------------------------------------------------

pub use gmip_render::{Buffer, Cell, Chrome, Presenter, RenderedSlide, compose, render};

// --- Style re-exports ------------------------------------------------------

pub use gmip_style::{Color, Palette, Role, Style, Theme};

// --- Runtime re-exports ----------------------------------------------------

pub use gmip_runtime::{Backend, Intent, Navigator, TtyBackend, Viewer, ViewerConfig, ViewerError};

// --- Errors ---------------------------------------------------------------

/// Top-level error for the gmip binary.
#[derive(Debug, Error)]
pub enum Error {
    /// The deck could not be loaded.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The terminal is below the minimum size.
    #[error(transparent)]
    ViewportTooSmall(#[from] ViewportTooSmall),
    /// Terminal setup, input or output failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
    /// Bad command-line arguments or environment overrides.
    #[error("{0}")]
    Usage(String),
}

impl From<ViewerError> for Error {
    fn from(err: ViewerError) -> Self {
        match err {
            ViewerError::ViewportTooSmall(err) => Self::ViewportTooSmall(err),
            ViewerError::Io(err) => Self::Terminal(err),
        }
    }
}

impl Error {
    /// Process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Parse(ParseError::Io { .. }) | Self::Terminal(_) => 1,
            Self::Parse(ParseError::Encoding { .. }) => 2,
            Self::Parse(ParseError::Allocation) => 3,
            Self::ViewportTooSmall(_) => 4,
            Self::Usage(_) => 64,
        }
    }
}

/// Standard result type for gmip APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Load the deck at `path` and present it on the controlling terminal.
///
/// The deck is parsed before the terminal is touched, so load errors never
/// leave the screen in raw mode. The terminal is restored before this
/// returns, on success and on error.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the deck cannot be loaded,
/// [`Error::ViewportTooSmall`] if the terminal is or becomes too small, and
/// [`Error::Terminal`] on terminal I/O failure.
pub fn present(path: &Path, config: ViewerConfig) -> Result<()> {
    let document = parse_file(path)?;
    let backend = TtyBackend::new()?;
    let mut viewer = Viewer::new(backend, &document, config);
    viewer.run()?;
    Ok(())
}
