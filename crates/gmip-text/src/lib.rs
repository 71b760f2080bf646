#![forbid(unsafe_code)]

//! Text handling for gmip.
//!
//! # Role in gmip
//! `gmip-text` owns everything between raw bytes and laid-out rows: the UTF-8
//! codec, the slide [`Document`] model, the [`parser`] that builds it, and the
//! [`layout`] engine that wraps one logical line into fixed-width rows.
//!
//! # How it fits in the system
//! The parser runs once at startup. The renderer in `gmip-render` then walks a
//! slide's lines through [`layout::layout`] on every frame; rows carry
//! semantic [`gmip_style::Role`]s, never concrete colors.

pub mod document;
pub mod error;
pub mod layout;
pub mod parser;
pub mod utf8;

pub use document::{Document, Line, Slide};
pub use error::ParseError;
pub use layout::{LineStyle, Row, Rows, layout};
pub use parser::{parse, parse_file};
pub use utf8::EncodingError;
