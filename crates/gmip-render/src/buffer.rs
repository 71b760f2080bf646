#![forbid(unsafe_code)]

//! Buffer grid storage.
//!
//! The `Buffer` is a 2D grid of [`Cell`]s stored row-major. Writes outside the
//! grid are dropped silently, which is how long titles, authors and rulers are
//! clipped on narrow terminals.
//!
//! # Layout
//!
//! Cells are stored in a `Vec<Cell>` with `width * height` entries; the cell
//! at `(x, y)` lives at index `y * width + x`.

use gmip_style::Style;

use crate::cell::Cell;

/// A 2D grid of terminal cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a buffer filled with blank cells.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; size],
        }
    }

    /// Width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Whether `other` has the same dimensions.
    #[inline]
    pub const fn same_size(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Cell at `(x, y)`, or `None` out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Write a cell. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Write `text` left to right from `(x, y)`, one codepoint per column.
    ///
    /// Codepoints past the right edge are dropped. Returns the number of
    /// cells written.
    pub fn print(&mut self, x: u16, y: u16, text: &str, style: Style) -> u16 {
        if y >= self.height {
            return 0;
        }
        let mut written = 0;
        for (col, ch) in (x..self.width).zip(text.chars()) {
            self.set(col, y, Cell::new(ch, style));
            written += 1;
        }
        written
    }

    /// Reset every cell to a space in `style`.
    pub fn clear_with(&mut self, style: Style) {
        self.cells.fill(Cell::new(' ', style));
    }

    /// The codepoints of row `y` as a string, or `None` out of bounds.
    #[must_use]
    pub fn row_text(&self, y: u16) -> Option<String> {
        if y >= self.height {
            return None;
        }
        let start = usize::from(y) * usize::from(self.width);
        let end = start + usize::from(self.width);
        Some(self.cells[start..end].iter().map(|c| c.ch).collect())
    }
}
