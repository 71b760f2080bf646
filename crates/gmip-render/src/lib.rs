#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, diffs, slide rendering, and the ANSI presenter.
//!
//! # Role in gmip
//! `gmip-render` turns a slide plus navigation state into a grid of styled
//! cells and writes that grid to the terminal with as little output as the
//! previous frame allows.
//!
//! # Primary responsibilities
//! - **Cell/Buffer**: a 2D grid of styled codepoints with clipped writes.
//! - **Slide**: walks a slide's lines through the layout engine under a row
//!   budget and computes how many rows the revealed parts cover.
//! - **Compose**: blits slide rows, the title header, and the footer.
//! - **Diff/Presenter**: computes changed runs and emits them via crossterm.

pub mod buffer;
pub mod cell;
pub mod compose;
pub mod diff;
pub mod presenter;
pub mod slide;

pub use buffer::Buffer;
pub use cell::Cell;
pub use compose::{Chrome, compose};
pub use diff::{BufferDiff, ChangeRun};
pub use presenter::Presenter;
pub use slide::{RenderedSlide, render};
