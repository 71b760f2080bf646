#![forbid(unsafe_code)]

//! Frame composition.
//!
//! Draws one full frame into a [`Buffer`]:
//!
//! ```text
//! row 0        |           title (centered)            |
//! rows 1..h-2  |      slide rows, vertically centered   |
//! row h-1      |author                           idx/nb|
//! ```
//!
//! Slide rows sit in the viewport's column band. Centering uses every laid-out
//! row, so revealing a part never moves what is already on screen.

use gmip_core::geometry::Viewport;
use gmip_style::{Role, Theme};

use crate::buffer::Buffer;
use crate::cell::Cell;
use crate::slide::RenderedSlide;

/// Header and footer content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chrome<'a> {
    /// Centered on the first row.
    pub title: &'a str,
    /// Left-aligned on the last row.
    pub author: &'a str,
    /// 1-based index of the current slide.
    pub index: usize,
    /// Total number of slides.
    pub slide_count: usize,
}

impl Chrome<'_> {
    /// The `index/count` ruler.
    #[must_use]
    pub fn ruler(&self) -> String {
        format!("{}/{}", self.index, self.slide_count)
    }
}

/// Draw `slide` and `chrome` into `buffer`, replacing its contents.
pub fn compose(
    buffer: &mut Buffer,
    viewport: &Viewport,
    theme: &Theme,
    slide: &RenderedSlide,
    chrome: &Chrome<'_>,
) {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("compose", index = chrome.index, rows = slide.rows.len());
    #[cfg(feature = "tracing")]
    let _guard = _span.enter();

    buffer.clear_with(theme.style(Role::Default));

    let width = buffer.width();
    let height = buffer.height();
    let content_height = usize::from(viewport.content_height());
    let total = slide.rows.len().min(content_height);
    let top = 1 + (content_height - total) / 2;

    for (i, row) in slide.visible_rows().iter().enumerate() {
        let Ok(y) = u16::try_from(top + i) else {
            break;
        };
        for (j, &ch) in row.cells.iter().enumerate() {
            let Ok(dx) = u16::try_from(j) else {
                break;
            };
            let style = theme.style(row.role_at(j));
            buffer.set(viewport.offset().saturating_add(dx), y, Cell::new(ch, style));
        }
    }

    let meta = theme.style(Role::Metadata);

    let title_len = char_len(chrome.title);
    buffer.print(width.saturating_sub(title_len) / 2, 0, chrome.title, meta);

    let footer = height.saturating_sub(1);
    buffer.print(0, footer, chrome.author, meta);

    let ruler = chrome.ruler();
    buffer.print(width.saturating_sub(char_len(&ruler)), footer, &ruler, meta);
}

fn char_len(text: &str) -> u16 {
    u16::try_from(text.chars().count()).unwrap_or(u16::MAX)
}
