#![forbid(unsafe_code)]

//! Runtime for gmip: the interactive loop around a parsed [`Document`].
//!
//! # Role in gmip
//! `gmip-runtime` owns the mutable state of a session. The [`Navigator`]
//! tracks which slide and how many of its parts are shown, the [`keymap`]
//! turns keys into navigation intents, and the [`Viewer`] ties those to a
//! [`Backend`]: draw, wait for one event, apply it, repeat.
//!
//! [`Document`]: gmip_text::Document
//! [`Navigator`]: navigation::Navigator
//! [`Viewer`]: viewer::Viewer
//! [`Backend`]: backend::Backend

pub mod backend;
pub mod keymap;
pub mod navigation;
pub mod viewer;

pub use backend::{Backend, TtyBackend};
#[cfg(any(test, feature = "test-helpers"))]
pub use backend::ScriptedBackend;
pub use keymap::{Action, action_for};
pub use navigation::{Intent, Navigator};
pub use viewer::{Viewer, ViewerConfig, ViewerError};
