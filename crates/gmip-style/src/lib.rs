#![forbid(unsafe_code)]

//! Styles for gmip.
//!
//! Layout code never picks colors. It tags rows with a semantic [`Role`]; a
//! [`Theme`] turns roles into concrete [`Style`]s for the active [`Palette`].

pub mod color;
pub mod style;
pub mod theme;

pub use color::{Ansi16, Color};
pub use style::{Style, StyleFlags};
pub use theme::{Palette, ParsePaletteError, Role, Theme};
