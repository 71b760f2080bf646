#![forbid(unsafe_code)]

//! Line layout engine.
//!
//! Turns one logical [`Line`](crate::Line) into rows of exactly `width`
//! codepoints. Rows are produced lazily so a caller with a row budget can stop
//! early.
//!
//! # Wrapping
//!
//! Each row starts by skipping spaces. Codepoints are copied until the row is
//! full; if a word is cut by the right edge, the row backs out to the start of
//! that word and the word moves to the next row. A word that alone is wider
//! than the row is hard-broken. A run of spaces that would reach the right
//! edge ends the row, and trailing spaces end the line.
//!
//! # Markup
//!
//! Outside a code fence the first bytes select the [`LineStyle`]:
//!
//! | prefix          | accent (column 0) | body              |
//! |-----------------|-------------------|-------------------|
//! | `=>`            | link              | link              |
//! | `#` `##` `###`  | heading 1/2/3     | heading 1/2/3     |
//! | `* `            | list              | default           |
//! | `>`             | quote             | default           |
//!
//! Heading `#`s are stripped, and heading 1 and 2 rows are centered.

use gmip_style::Role;

/// Roles for the rows of one logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineStyle {
    /// Role of column 0 on the first row.
    pub accent: Role,
    /// Role of every other cell.
    pub body: Role,
    /// Heading level (1-3), or 0 for non-headings.
    pub heading: u8,
}

impl LineStyle {
    /// Derive the style of `text` and the byte offset where its content starts.
    #[must_use]
    pub fn classify(text: &str, preformatted: bool) -> (Self, usize) {
        if preformatted {
            return (Self::default(), 0);
        }

        let bytes = text.as_bytes();
        if text.starts_with("=>") {
            return (Self::uniform(Role::Link), 0);
        }
        if bytes.first() == Some(&b'#') {
            let level = bytes.iter().take(3).take_while(|&&b| b == b'#').count();
            // At most 3, so the cast is lossless.
            let level = level as u8;
            let style = Self {
                heading: level,
                ..Self::uniform(Role::Heading(level))
            };
            return (style, usize::from(level));
        }

        let accent = if text.starts_with("* ") {
            Role::List
        } else if bytes.first() == Some(&b'>') {
            Role::Quote
        } else {
            Role::Default
        };
        (
            Self {
                accent,
                body: Role::Default,
                heading: 0,
            },
            0,
        )
    }

    const fn uniform(role: Role) -> Self {
        Self {
            accent: role,
            body: role,
            heading: 0,
        }
    }

    /// Whether rows of this line are centered.
    #[inline]
    #[must_use]
    pub const fn is_centered(&self) -> bool {
        matches!(self.heading, 1 | 2)
    }
}

/// One laid-out row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Exactly `width` codepoints, space padded.
    pub cells: Vec<char>,
    /// Role of column 0.
    pub accent: Role,
    /// Role of columns 1 and up.
    pub body: Role,
}

impl Row {
    /// Role of the cell at `column`.
    #[inline]
    #[must_use]
    pub fn role_at(&self, column: usize) -> Role {
        if column == 0 { self.accent } else { self.body }
    }

    /// The row as a string, padding included.
    #[must_use]
    pub fn text(&self) -> String {
        self.cells.iter().collect()
    }

    /// Whether every cell is a space.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|&c| c == ' ')
    }
}

/// Lay out `text` at `width` columns.
///
/// A width of 0 is treated as 1.
#[must_use]
pub fn layout(text: &str, preformatted: bool, width: usize) -> Rows<'_> {
    let (style, start) = LineStyle::classify(text, preformatted);
    Rows {
        text,
        pos: start,
        width: width.max(1),
        style,
        first: true,
        done: false,
    }
}

/// Lazy iterator over the rows of one line.
#[derive(Debug, Clone)]
pub struct Rows<'a> {
    text: &'a str,
    pos: usize,
    width: usize,
    style: LineStyle,
    first: bool,
    done: bool,
}

impl Iterator for Rows<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        if self.done {
            return None;
        }

        let text = self.text;
        let bytes = text.as_bytes();
        let width = self.width;
        let mut cells: Vec<char> = Vec::with_capacity(width);

        let mut pos = self.pos;
        while bytes.get(pos) == Some(&b' ') {
            pos += 1;
        }
        // Byte offset and column of the most recent word start.
        let mut word_pos = pos;
        let mut word_col = 0;

        while pos < bytes.len() {
            if cells.len() == width {
                if bytes[pos] != b' ' {
                    if word_col > 0 {
                        // Unprint the cut word; it restarts the next row.
                        cells.truncate(word_col);
                        pos = word_pos;
                    }
                } else if bytes[pos..].iter().all(|&b| b == b' ') {
                    pos = bytes.len();
                }
                break;
            }

            if bytes[pos] == b' ' {
                let run_start = pos;
                let mut run_end = pos;
                while bytes.get(run_end) == Some(&b' ') {
                    run_end += 1;
                }
                word_pos = run_end;
                if run_end == bytes.len() {
                    pos = run_end;
                    break;
                }
                if cells.len() + (run_end - run_start) >= width {
                    break;
                }
                cells.resize(cells.len() + (run_end - run_start), ' ');
                pos = run_end;
            } else {
                if pos == word_pos {
                    word_col = cells.len();
                }
                let Some(ch) = text[pos..].chars().next() else {
                    break;
                };
                cells.push(ch);
                pos += ch.len_utf8();
            }
        }

        if self.style.is_centered() && cells.len() < width {
            let shift = (width - cells.len()) / 2;
            cells.splice(0..0, std::iter::repeat_n(' ', shift));
        }
        cells.resize(width, ' ');

        let accent = if self.first {
            self.style.accent
        } else {
            self.style.body
        };
        self.first = false;
        self.pos = pos;
        self.done = pos >= bytes.len();

        Some(Row {
            cells,
            accent,
            body: self.style.body,
        })
    }
}

impl std::iter::FusedIterator for Rows<'_> {}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn rows_are_exactly_width(s in "[a-zé# >*=]{0,80}", width in 1usize..40, pre in any::<bool>()) {
            for row in layout(&s, pre, width) {
                prop_assert_eq!(row.cells.len(), width);
            }
        }

        #[test]
        fn layout_always_yields_a_row(s in "[a-z ]{0,60}", width in 1usize..30) {
            prop_assert!(layout(&s, false, width).count() >= 1);
        }

        #[test]
        fn short_words_are_never_split(words in proptest::collection::vec("[a-z]{1,6}", 1..12), width in 6usize..30) {
            let text = words.join(" ");
            let mut emitted: Vec<String> = Vec::new();
            for row in layout(&text, false, width) {
                emitted.extend(row.text().split_whitespace().map(str::to_owned));
            }
            prop_assert_eq!(emitted, words);
        }

        #[test]
        fn content_is_preserved(s in "[a-z ]{0,80}", width in 1usize..20) {
            let joined: String = layout(&s, false, width)
                .map(|row| row.text().replace(' ', ""))
                .collect();
            prop_assert_eq!(joined, s.replace(' ', ""));
        }
    }
}
