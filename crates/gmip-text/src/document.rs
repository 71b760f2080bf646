#![forbid(unsafe_code)]

//! The slide deck model.
//!
//! A [`Document`] owns its [`Slide`]s, which own their [`Line`]s. It is built
//! once by the parser and is read-only afterwards.

/// One logical source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    text: String,
    preformatted: bool,
}

impl Line {
    /// Create a line as read, tagged with the preformatted state it was read in.
    #[must_use]
    pub fn new(text: impl Into<String>, preformatted: bool) -> Self {
        Self {
            text: text.into(),
            preformatted,
        }
    }

    /// The raw line text, without the trailing newline.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the line sits inside a code fence.
    #[inline]
    #[must_use]
    pub const fn is_preformatted(&self) -> bool {
        self.preformatted
    }

    /// Whether the line is a `^` part marker.
    ///
    /// Markers delimit reveal parts and are never rendered.
    #[inline]
    #[must_use]
    pub fn is_marker(&self) -> bool {
        !self.preformatted && self.text.starts_with('^')
    }
}

/// An ordered run of lines with its reveal part count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    lines: Vec<Line>,
    part_count: usize,
}

impl Slide {
    /// An empty slide with a single part.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            part_count: 1,
        }
    }

    /// Append a line. Part markers bump the part count.
    pub fn push_line(&mut self, line: Line) {
        if line.is_marker() {
            self.part_count += 1;
        }
        self.lines.push(line);
    }

    /// Lines in source order, markers included.
    #[inline]
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Number of reveal parts, always at least 1.
    #[inline]
    #[must_use]
    pub const fn part_count(&self) -> usize {
        self.part_count
    }

    /// Whether the slide has no lines at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for Slide {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Line> for Slide {
    fn from_iter<I: IntoIterator<Item = Line>>(iter: I) -> Self {
        let mut slide = Self::new();
        for line in iter {
            slide.push_line(line);
        }
        slide
    }
}

/// A parsed slide deck.
///
/// Never empty: a deck built from no slides holds one empty slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    slides: Vec<Slide>,
    title: Option<String>,
    author: Option<String>,
}

impl Document {
    /// Assemble a document.
    #[must_use]
    pub fn new(mut slides: Vec<Slide>, title: Option<String>, author: Option<String>) -> Self {
        if slides.is_empty() {
            slides.push(Slide::new());
        }
        Self {
            slides,
            title,
            author,
        }
    }

    /// All slides in order.
    #[inline]
    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Slide at `index`, if any.
    #[inline]
    #[must_use]
    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// Number of slides, always at least 1.
    #[inline]
    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Value of the last `%title:` line.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Value of the last `%author:` line.
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }
}
