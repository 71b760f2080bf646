#![forbid(unsafe_code)]

//! A single styled grid cell.

use gmip_style::Style;

/// One terminal cell: a codepoint and its style.
///
/// Layout counts one column per codepoint. The presenter compensates when a
/// glyph's display width differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// The displayed codepoint.
    pub ch: char,
    /// Colors and attributes.
    pub style: Style,
}

impl Cell {
    /// A space with the terminal's default style.
    pub const BLANK: Self = Self {
        ch: ' ',
        style: Style {
            fg: gmip_style::Color::Default,
            bg: gmip_style::Color::Default,
            flags: gmip_style::StyleFlags::empty(),
        },
    };

    /// Create a cell with the default style.
    #[inline]
    #[must_use]
    pub const fn from_char(ch: char) -> Self {
        Self {
            ch,
            style: Self::BLANK.style,
        }
    }

    /// Create a styled cell.
    #[inline]
    #[must_use]
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}
