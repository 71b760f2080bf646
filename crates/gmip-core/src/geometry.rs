#![forbid(unsafe_code)]

//! Viewport geometry.
//!
//! The viewport is the terminal surface re-derived on every resize. Slides are
//! laid out in a column band of `display_width` cells, horizontally centered at
//! `offset`. The first and last terminal rows are reserved for the title and
//! the footer, leaving `content_height` rows for slide content.

use thiserror::Error;

/// Smallest usable display width (before padding).
pub const MIN_WIDTH: u16 = 8;
/// Smallest usable terminal height.
pub const MIN_HEIGHT: u16 = 8;
/// Default upper bound for the slide column band.
pub const DEFAULT_MAX_WIDTH: u16 = 50;
/// Default horizontal padding on each side.
pub const DEFAULT_PADDING: u16 = 0;
/// Rows reserved for the title header and the footer.
pub const CHROME_ROWS: u16 = 2;

/// The terminal is smaller than the configured minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("terminal too small: {width}x{height}, need at least {min_width}x{min_height}")]
pub struct ViewportTooSmall {
    /// Reported terminal width.
    pub width: u16,
    /// Reported terminal height.
    pub height: u16,
    /// Minimum accepted width.
    pub min_width: u16,
    /// Minimum accepted height.
    pub min_height: u16,
}

/// Size limits applied when deriving a [`Viewport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportLimits {
    /// Horizontal padding on each side of the column band.
    pub padding: u16,
    /// Minimum display width (padding excluded).
    pub min_width: u16,
    /// Minimum terminal height.
    pub min_height: u16,
    /// Maximum display width.
    pub max_width: u16,
}

impl ViewportLimits {
    /// Set the maximum display width. Values below 1 are raised to 1.
    #[must_use]
    pub fn max_width(mut self, max_width: u16) -> Self {
        self.max_width = max_width.max(1);
        self
    }

    /// Set the horizontal padding.
    #[must_use]
    pub fn padding(mut self, padding: u16) -> Self {
        self.padding = padding;
        self
    }

    /// Minimum accepted terminal width, padding included.
    #[must_use]
    pub const fn required_width(&self) -> u16 {
        self.min_width.saturating_add(self.padding.saturating_mul(2))
    }
}

impl Default for ViewportLimits {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            min_width: MIN_WIDTH,
            min_height: MIN_HEIGHT,
            max_width: DEFAULT_MAX_WIDTH,
        }
    }
}

/// A validated terminal surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    display_width: u16,
    offset: u16,
}

impl Viewport {
    /// Validate a terminal size against `limits` and derive the column band.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportTooSmall`] if the terminal is narrower than
    /// `min_width + 2 * padding` or shorter than `min_height`.
    pub fn new(width: u16, height: u16, limits: &ViewportLimits) -> Result<Self, ViewportTooSmall> {
        let min_width = limits.required_width();
        if width < min_width || height < limits.min_height {
            return Err(ViewportTooSmall {
                width,
                height,
                min_width,
                min_height: limits.min_height,
            });
        }

        let available = width - limits.padding.saturating_mul(2);
        let display_width = available.min(limits.max_width.max(1));
        let offset = (width - display_width) / 2;

        crate::debug!(width, height, display_width, offset, "viewport derived");

        Ok(Self {
            width,
            height,
            display_width,
            offset,
        })
    }

    /// Terminal width in columns.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Terminal height in rows.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Width of the slide column band.
    #[inline]
    pub const fn display_width(&self) -> u16 {
        self.display_width
    }

    /// Left column of the slide column band.
    #[inline]
    pub const fn offset(&self) -> u16 {
        self.offset
    }

    /// Rows available for slide content (title and footer excluded).
    #[inline]
    pub const fn content_height(&self) -> u16 {
        self.height.saturating_sub(CHROME_ROWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_terminal_clamps_to_max_width() {
        let vp = Viewport::new(120, 40, &ViewportLimits::default()).unwrap();
        assert_eq!(vp.display_width(), 50);
        assert_eq!(vp.offset(), 35);
        assert_eq!(vp.content_height(), 38);
    }

    #[test]
    fn narrow_terminal_uses_full_width() {
        let vp = Viewport::new(30, 10, &ViewportLimits::default()).unwrap();
        assert_eq!(vp.display_width(), 30);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn odd_remainder_goes_right() {
        let vp = Viewport::new(61, 10, &ViewportLimits::default()).unwrap();
        assert_eq!(vp.display_width(), 50);
        assert_eq!(vp.offset(), 5);
    }

    #[test]
    fn padding_shrinks_band() {
        let limits = ViewportLimits::default().padding(2);
        let vp = Viewport::new(20, 10, &limits).unwrap();
        assert_eq!(vp.display_width(), 16);
        assert_eq!(vp.offset(), 2);
    }

    #[test]
    fn too_small_is_rejected() {
        let err = Viewport::new(7, 24, &ViewportLimits::default()).unwrap_err();
        assert_eq!(err.min_width, MIN_WIDTH);
        assert_eq!(err.width, 7);

        assert!(Viewport::new(80, 7, &ViewportLimits::default()).is_err());
        assert!(Viewport::new(8, 8, &ViewportLimits::default()).is_ok());
    }

    #[test]
    fn padding_raises_required_width() {
        let limits = ViewportLimits::default().padding(3);
        assert_eq!(limits.required_width(), 14);
        assert!(Viewport::new(13, 10, &limits).is_err());
    }

    #[test]
    fn max_width_never_zero() {
        let limits = ViewportLimits::default().max_width(0);
        let vp = Viewport::new(40, 10, &limits).unwrap();
        assert_eq!(vp.display_width(), 1);
    }

    #[test]
    fn error_message_names_sizes() {
        let err = Viewport::new(5, 5, &ViewportLimits::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "terminal too small: 5x5, need at least 8x8"
        );
    }
}
