//! Semantic style roles and the palettes that resolve them.
//!
//! Two palettes exist: the 256-color one and a fallback for 8-color
//! terminals, where every accent collapses to yellow on the default color.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::color::{Ansi16, Color};
use crate::style::Style;

/// What a run of cells *is*, independent of how it is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Plain body text.
    #[default]
    Default,
    /// A `=>` link line.
    Link,
    /// A `#`, `##` or `###` heading, carrying its level (1-3).
    Heading(u8),
    /// The bullet column of a `* ` list item.
    List,
    /// The bar column of a `>` quote.
    Quote,
    /// Title, author and slide ruler.
    Metadata,
}

/// Color depth to render with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Palette {
    /// 256-color palette.
    #[default]
    Ansi256,
    /// Basic 8-color palette.
    Ansi8,
}

/// Unrecognized palette name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown color palette `{0}` (expected 256 or 8)")]
pub struct ParsePaletteError(pub String);

impl FromStr for Palette {
    type Err = ParsePaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "256" => Ok(Self::Ansi256),
            "8" => Ok(Self::Ansi8),
            other => Err(ParsePaletteError(other.to_owned())),
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ansi256 => f.write_str("256"),
            Self::Ansi8 => f.write_str("8"),
        }
    }
}

/// Role-to-style table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    default: Style,
    metadata: Style,
    link: Style,
    heading: Style,
    list: Style,
    quote: Style,
}

impl Theme {
    /// The 256-color theme.
    #[must_use]
    pub const fn ansi256() -> Self {
        Self {
            default: Style::fg(Color::Ansi256(15)),
            metadata: Style::fg(Color::Ansi256(213)),
            link: Style::fg(Color::Ansi256(32)),
            heading: Style::fg(Color::Ansi256(99)),
            list: Style::fg(Color::Ansi256(32)),
            quote: Style::fg(Color::Ansi256(172)),
        }
    }

    /// The 8-color theme.
    #[must_use]
    pub const fn ansi8() -> Self {
        let default = Style::fg(Color::Ansi16(Ansi16::White));
        let accent = Style::fg(Color::Ansi16(Ansi16::Yellow));
        Self {
            default,
            metadata: default,
            link: accent,
            heading: accent,
            list: accent,
            quote: accent,
        }
    }

    /// Theme for a palette.
    #[must_use]
    pub const fn for_palette(palette: Palette) -> Self {
        match palette {
            Palette::Ansi256 => Self::ansi256(),
            Palette::Ansi8 => Self::ansi8(),
        }
    }

    /// Resolve a role. Level-1 headings are underlined.
    #[must_use]
    pub const fn style(&self, role: Role) -> Style {
        match role {
            Role::Default => self.default,
            Role::Link => self.link,
            Role::Heading(1) => self.heading.underline(),
            Role::Heading(_) => self.heading,
            Role::List => self.list,
            Role::Quote => self.quote,
            Role::Metadata => self.metadata,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::ansi256()
    }
}
