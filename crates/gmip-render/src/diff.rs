#![forbid(unsafe_code)]

//! Diff computation between buffers.
//!
//! `BufferDiff` records the cells that differ between two equally sized
//! buffers with a row-major scan, and coalesces them into [`ChangeRun`]s so
//! the presenter moves the cursor once per run.
//!
//! # Usage
//!
//! ```
//! use gmip_render::buffer::Buffer;
//! use gmip_render::cell::Cell;
//! use gmip_render::diff::BufferDiff;
//!
//! let old = Buffer::new(80, 24);
//! let mut new = Buffer::new(80, 24);
//! new.set(5, 5, Cell::from_char('X'));
//! new.set(6, 5, Cell::from_char('Y'));
//!
//! let diff = BufferDiff::compute(&old, &new);
//! assert_eq!(diff.len(), 2);
//! assert_eq!(diff.runs().len(), 1);
//! ```

use crate::buffer::Buffer;

/// A contiguous run of changed cells on a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeRun {
    /// Row index.
    pub y: u16,
    /// Start column (inclusive).
    pub x0: u16,
    /// End column (inclusive).
    pub x1: u16,
}

impl ChangeRun {
    /// Create a new change run.
    #[inline]
    pub const fn new(y: u16, x0: u16, x1: u16) -> Self {
        debug_assert!(x0 <= x1);
        Self { y, x0, x1 }
    }

}

/// Positions where two buffers differ, in row-major order.
#[derive(Debug, Clone)]
pub struct BufferDiff {
    changes: Vec<(u16, u16)>,
}

impl BufferDiff {
    /// Compute the diff between two buffers of the same size.
    pub fn compute(old: &Buffer, new: &Buffer) -> Self {
        #[cfg(feature = "tracing")]
        let _span =
            tracing::debug_span!("diff_compute", width = old.width(), height = old.height());
        #[cfg(feature = "tracing")]
        let _guard = _span.enter();

        debug_assert!(old.same_size(new), "buffer sizes must match");

        let mut changes = Vec::new();
        for y in 0..new.height() {
            for x in 0..new.width() {
                if old.get(x, y) != new.get(x, y) {
                    changes.push((x, y));
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(changes = changes.len(), "diff computed");

        Self { changes }
    }

    /// A diff marking every cell of `buffer` as changed.
    ///
    /// Used for the first frame and after a resize.
    pub fn full(buffer: &Buffer) -> Self {
        let cells = usize::from(buffer.width()) * usize::from(buffer.height());
        let mut changes = Vec::with_capacity(cells);
        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                changes.push((x, y));
            }
        }
        Self { changes }
    }

    /// Number of changed cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Check if no cells changed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Coalesce consecutive columns on the same row into runs.
    pub fn runs(&self) -> Vec<ChangeRun> {
        let mut runs: Vec<ChangeRun> = Vec::new();
        for &(x, y) in &self.changes {
            match runs.last_mut() {
                Some(run) if run.y == y && run.x1 + 1 == x => run.x1 = x,
                _ => runs.push(ChangeRun::new(y, x, x)),
            }
        }
        runs
    }
}
