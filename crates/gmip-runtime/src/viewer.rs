#![forbid(unsafe_code)]

//! The interactive viewer loop.
//!
//! ```text
//! validate size -> loop { draw frame -> wait for event -> apply event }
//! ```
//!
//! Each iteration redraws the current slide, blocks on
//! [`Backend::read_event`], and then either re-validates the viewport (resize),
//! updates the [`Navigator`] (navigation key), or returns (quit key). A
//! terminal that is or becomes too small ends the loop with
//! [`ViewerError::ViewportTooSmall`].

use std::io;

use gmip_core::event::Event;
use gmip_core::geometry::{Viewport, ViewportLimits, ViewportTooSmall};
use gmip_render::{Buffer, Chrome, compose, render};
use gmip_style::{Palette, Theme};
use gmip_text::Document;
use thiserror::Error;
use tracing::{debug, info, info_span, trace};

use crate::backend::Backend;
use crate::keymap::{Action, action_for};
use crate::navigation::Navigator;

/// Viewer settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewerConfig {
    /// Size limits and column band settings.
    pub limits: ViewportLimits,
    /// Color palette.
    pub palette: Palette,
    /// Title shown when the document has no `%title:` line.
    pub default_title: String,
}

/// Reasons the viewer stops early.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// The terminal is below the minimum size.
    #[error(transparent)]
    ViewportTooSmall(#[from] ViewportTooSmall),
    /// Reading input or writing output failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Drives one document through a [`Backend`].
pub struct Viewer<'a, B: Backend> {
    backend: B,
    document: &'a Document,
    config: ViewerConfig,
    theme: Theme,
    navigator: Navigator,
    frame: Buffer,
}

impl<'a, B: Backend> Viewer<'a, B> {
    /// Create a viewer positioned on the first slide.
    pub fn new(backend: B, document: &'a Document, config: ViewerConfig) -> Self {
        let theme = Theme::for_palette(config.palette);
        Self {
            backend,
            document,
            config,
            theme,
            navigator: Navigator::new(),
            frame: Buffer::new(0, 0),
        }
    }

    /// Current navigation state.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consume the viewer and return its backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Run until a quit key is pressed.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::ViewportTooSmall`] if the terminal is below the
    /// minimum size at start or after a resize, and [`ViewerError::Io`] if
    /// the backend fails.
    pub fn run(&mut self) -> Result<(), ViewerError> {
        let span = info_span!("viewer", slides = self.document.slide_count());
        let _guard = span.enter();

        let (width, height) = self.backend.size()?;
        let mut viewport = Viewport::new(width, height, &self.config.limits)?;
        info!(width, height, "viewer started");

        loop {
            self.draw(&viewport)?;

            match self.backend.read_event()? {
                None => {}
                Some(Event::Resize { width, height }) => {
                    debug!(width, height, "resize");
                    viewport = Viewport::new(width, height, &self.config.limits)?;
                }
                Some(Event::Key(key)) => match action_for(&key) {
                    Some(Action::Quit) => {
                        info!(index = self.navigator.index(), "viewer quit");
                        return Ok(());
                    }
                    Some(Action::Navigate(intent)) => {
                        self.navigator.apply(intent, self.document);
                    }
                    None => trace!(?key, "unbound key"),
                },
            }
        }
    }

    fn draw(&mut self, viewport: &Viewport) -> io::Result<()> {
        let index = self.navigator.index();
        let Some(slide) = self.document.slide(index) else {
            return Ok(());
        };

        let rendered = render(
            slide,
            viewport.height(),
            self.navigator.revealed(),
            viewport.display_width(),
        );

        if self.frame.width() != viewport.width() || self.frame.height() != viewport.height() {
            self.frame = Buffer::new(viewport.width(), viewport.height());
        }

        let chrome = Chrome {
            title: self
                .document
                .title()
                .unwrap_or(self.config.default_title.as_str()),
            author: self.document.author().unwrap_or(""),
            index: index + 1,
            slide_count: self.document.slide_count(),
        };
        compose(&mut self.frame, viewport, &self.theme, &rendered, &chrome);
        self.backend.present(&self.frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ScriptedBackend;
    use gmip_core::event::KeyCode;
    use gmip_text::parse;

    // ============================================================================
    // Helpers
    // ============================================================================

    const DECK: &str = "%title:Demo\n%author:Ann\n# One\n\nintro\n^\nmore\n---\ntwo\n---\nthree\n";

    fn document() -> Document {
        parse(DECK.as_bytes()).unwrap()
    }

    fn config() -> ViewerConfig {
        ViewerConfig {
            default_title: "deck.gmi".to_owned(),
            ..ViewerConfig::default()
        }
    }

    fn run(backend: ScriptedBackend, doc: &Document) -> (Result<(), ViewerError>, ScriptedBackend) {
        let mut viewer = Viewer::new(backend, doc, config());
        let result = viewer.run();
        (result, viewer.into_backend())
    }

    fn footer(frame: &Buffer) -> String {
        frame.row_text(frame.height() - 1).unwrap()
    }

    fn screen(frame: &Buffer) -> String {
        (0..frame.height())
            .filter_map(|y| frame.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ============================================================================
    // Navigation
    // ============================================================================

    #[test]
    fn quit_immediately_draws_one_frame() {
        let doc = document();
        let (result, backend) = run(ScriptedBackend::new(20, 10).keys("q"), &doc);
        result.unwrap();
        assert_eq!(backend.frames().len(), 1);
        let frame = &backend.frames()[0];
        assert_eq!(frame.row_text(0).unwrap().trim(), "Demo");
        assert!(footer(frame).starts_with("Ann"));
        assert!(footer(frame).ends_with("1/3"));
    }

    #[test]
    fn parts_are_revealed_before_moving_on() {
        let doc = document();
        let (result, backend) = run(ScriptedBackend::new(20, 10).keys("jjq"), &doc);
        result.unwrap();
        let frames = backend.frames();
        assert_eq!(frames.len(), 3);
        assert!(!screen(&frames[0]).contains("more"));
        assert!(screen(&frames[1]).contains("more"));
        assert!(footer(&frames[1]).ends_with("1/3"));
        assert!(screen(&frames[2]).contains("two"));
        assert!(footer(&frames[2]).ends_with("2/3"));
    }

    #[test]
    fn jump_keys() {
        let doc = document();
        let backend = ScriptedBackend::new(20, 10).keys("G").keys("2g").keys("gq");
        let (result, backend) = run(backend, &doc);
        result.unwrap();
        let footers: Vec<String> = backend.frames().iter().map(footer).collect();
        assert!(footers[1].ends_with("3/3"));
        // '2' only sets the multiplier
        assert!(footers[2].ends_with("3/3"));
        assert!(footers[3].ends_with("2/3"));
        assert!(footers[4].ends_with("1/3"));
    }

    #[test]
    fn escape_cancels_multiplier() {
        let doc = document();
        let backend = ScriptedBackend::new(20, 10)
            .keys("3")
            .key(KeyCode::Escape)
            .keys("gq");
        let (result, backend) = run(backend, &doc);
        result.unwrap();
        assert!(footer(backend.last_frame().unwrap()).ends_with("1/3"));
    }

    #[test]
    fn arrow_keys_navigate() {
        let doc = document();
        let backend = ScriptedBackend::new(20, 10)
            .key(KeyCode::Right)
            .key(KeyCode::Down)
            .key(KeyCode::Left)
            .keys("q");
        let (result, backend) = run(backend, &doc);
        result.unwrap();
        let footers: Vec<String> = backend.frames().iter().map(footer).collect();
        assert!(footers[2].ends_with("2/3"));
        assert!(footers[3].ends_with("1/3"));
        // retreating onto a slide reveals all its parts
        assert!(screen(&backend.frames()[3]).contains("more"));
    }

    // ============================================================================
    // Resize and sizing errors
    // ============================================================================

    #[test]
    fn resize_redraws_at_new_size() {
        let doc = document();
        let backend = ScriptedBackend::new(20, 10)
            .event(Event::Resize {
                width: 30,
                height: 12,
            })
            .keys("q");
        let (result, backend) = run(backend, &doc);
        result.unwrap();
        let last = backend.last_frame().unwrap();
        assert_eq!((last.width(), last.height()), (30, 12));
    }

    #[test]
    fn too_small_at_start() {
        let doc = document();
        let (result, backend) = run(ScriptedBackend::new(7, 10).keys("q"), &doc);
        assert!(matches!(result, Err(ViewerError::ViewportTooSmall(_))));
        assert!(backend.frames().is_empty());
    }

    #[test]
    fn too_small_after_resize() {
        let doc = document();
        let backend = ScriptedBackend::new(20, 10)
            .event(Event::Resize {
                width: 20,
                height: 4,
            })
            .keys("q");
        let (result, backend) = run(backend, &doc);
        match result {
            Err(ViewerError::ViewportTooSmall(err)) => assert_eq!(err.height, 4),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(backend.frames().len(), 1);
    }

    #[test]
    fn exhausted_script_is_io_error() {
        let doc = document();
        let (result, _) = run(ScriptedBackend::new(20, 10).keys("j"), &doc);
        assert!(matches!(result, Err(ViewerError::Io(_))));
    }

    // ============================================================================
    // Configuration
    // ============================================================================

    #[test]
    fn default_title_and_max_width() {
        let doc = parse("x\n".as_bytes()).unwrap();
        let config = ViewerConfig {
            limits: ViewportLimits::default().max_width(10),
            palette: Palette::Ansi8,
            default_title: "talk.gmi".to_owned(),
        };
        let mut viewer = Viewer::new(ScriptedBackend::new(30, 8).keys("q"), &doc, config);
        viewer.run().unwrap();
        let frame = viewer.backend().last_frame().unwrap().clone();
        assert_eq!(frame.row_text(0).unwrap().trim(), "talk.gmi");
        // band of 10 columns centered in 30: offset 10
        let content = frame.row_text(1 + (6 - 1) / 2).unwrap();
        assert_eq!(content.find('x'), Some(10));
    }
}
