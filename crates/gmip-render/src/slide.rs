#![forbid(unsafe_code)]

//! Slide renderer.
//!
//! Walks a slide's lines through the layout engine until the content area is
//! full, and works out how many of the produced rows the revealed parts cover.
//!
//! Part markers produce no rows. A running part counter starts at 1 and is
//! bumped by each marker; the first marker that takes it past
//! `revealed_parts` fixes `rows_to_show` at the rows produced so far. Rows of
//! hidden parts are still laid out so vertical centering does not move when
//! more parts are revealed.

use gmip_core::geometry::CHROME_ROWS;
use gmip_text::{Row, Slide, layout};

/// Rows of one slide, ready to be composed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSlide {
    /// Every laid-out row, hidden parts included.
    pub rows: Vec<Row>,
    /// How many leading rows are visible.
    pub rows_to_show: usize,
}

impl RenderedSlide {
    /// The visible rows.
    #[must_use]
    pub fn visible_rows(&self) -> &[Row] {
        &self.rows[..self.rows_to_show.min(self.rows.len())]
    }
}

/// Lay out `slide` for a terminal `viewport_height` rows tall and a column band
/// `width` cells wide, showing the first `revealed_parts` parts.
///
/// At most `viewport_height - 2` rows are produced; the rest of the slide is
/// truncated.
#[must_use]
pub fn render(
    slide: &Slide,
    viewport_height: u16,
    revealed_parts: usize,
    width: u16,
) -> RenderedSlide {
    let budget = usize::from(viewport_height.saturating_sub(CHROME_ROWS));
    let width = usize::from(width);

    let mut rows: Vec<Row> = Vec::with_capacity(budget);
    let mut part = 1;
    let mut rows_to_show = None;

    for line in slide.lines() {
        if rows.len() >= budget {
            break;
        }
        if line.is_marker() {
            part += 1;
            if part > revealed_parts && rows_to_show.is_none() {
                rows_to_show = Some(rows.len());
            }
            continue;
        }
        let remaining = budget - rows.len();
        rows.extend(layout(line.text(), line.is_preformatted(), width).take(remaining));
    }

    let rows_to_show = rows_to_show.unwrap_or(rows.len());

    #[cfg(feature = "tracing")]
    tracing::trace!(
        rows = rows.len(),
        rows_to_show,
        parts = slide.part_count(),
        revealed_parts,
        "slide rendered"
    );

    RenderedSlide { rows, rows_to_show }
}
