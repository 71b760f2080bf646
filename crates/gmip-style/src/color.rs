//! Terminal color values.

/// The 8 basic ANSI colors (SGR 30-37 / 40-47).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Ansi16 {
    /// Black (index 0).
    Black = 0,
    /// Red (index 1).
    Red = 1,
    /// Green (index 2).
    Green = 2,
    /// Yellow (index 3).
    Yellow = 3,
    /// Blue (index 4).
    Blue = 4,
    /// Magenta (index 5).
    Magenta = 5,
    /// Cyan (index 6).
    Cyan = 6,
    /// White (index 7).
    White = 7,
}

impl Ansi16 {
    /// Return the raw ANSI index.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// A color at the fidelity the terminal was configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// The terminal's own default color.
    #[default]
    Default,
    /// Standard ANSI color.
    Ansi16(Ansi16),
    /// 256-color palette index.
    Ansi256(u8),
}

impl Color {
    /// Check whether this is the terminal default.
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}

impl From<Ansi16> for Color {
    fn from(color: Ansi16) -> Self {
        Self::Ansi16(color)
    }
}
