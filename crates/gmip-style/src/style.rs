//! Concrete cell style: colors plus attribute flags.

use bitflags::bitflags;

use crate::color::Color;

bitflags! {
    /// Text attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        /// Underlined text.
        const UNDERLINE = 0b0001;
    }
}

/// Foreground, background and attributes of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
    /// Attribute flags.
    pub flags: StyleFlags,
}

impl Style {
    /// A style with the given foreground and default everything else.
    #[must_use]
    pub const fn fg(fg: Color) -> Self {
        Self {
            fg,
            bg: Color::Default,
            flags: StyleFlags::empty(),
        }
    }

    /// Add underline.
    #[must_use]
    pub const fn underline(mut self) -> Self {
        self.flags = self.flags.union(StyleFlags::UNDERLINE);
        self
    }
}
