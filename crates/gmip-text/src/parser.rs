#![forbid(unsafe_code)]

//! Document parser.
//!
//! Reads the input one logical line at a time and classifies each line:
//!
//! | first bytes          | outside a fence              | inside a fence |
//! |----------------------|------------------------------|----------------|
//! | `` ``` ``            | toggle fence, line dropped   | same           |
//! | `---`                | close slide, open a new one  | content        |
//! | `%title:` `%author:` | document metadata            | content        |
//! | `%date:`             | dropped                      | content        |
//! | `^`                  | part marker (kept)           | content        |
//! | anything else        | content                      | content        |
//!
//! End of input closes the last slide. Malformed UTF-8 aborts the parse.

use std::collections::TryReserveError;
use std::fs::File;
use std::io::{BufReader, Bytes, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, info_span, trace};

use crate::document::{Document, Line, Slide};
use crate::error::ParseError;
use crate::utf8::{self, EncodingError};

/// Initial capacity of the line scratch buffer, in bytes.
const INITIAL_LINE_CAPACITY: usize = 128;
/// Initial capacity of the slide list.
const INITIAL_SLIDE_CAPACITY: usize = 4;

/// Label used in I/O errors for readers without a path.
const STREAM_LABEL: &str = "<stream>";

/// Parse a document from any byte stream.
///
/// # Errors
///
/// See [`ParseError`].
pub fn parse<R: Read>(reader: R) -> Result<Document, ParseError> {
    Parser::new(reader, PathBuf::from(STREAM_LABEL)).run()
}

/// Open and parse the file at `path`.
///
/// # Errors
///
/// Returns [`ParseError::Io`] if the file cannot be opened or read, and the
/// other variants as for [`parse`].
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document, ParseError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Parser::new(file, path.to_path_buf()).run()
}

/// How a completed line affects the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    Fence,
    Separator,
    Title(&'a str),
    Author(&'a str),
    Date,
    Content,
}

impl<'a> LineKind<'a> {
    fn classify(text: &'a str, preformatted: bool) -> Self {
        if text.starts_with("```") {
            return Self::Fence;
        }
        if preformatted {
            return Self::Content;
        }
        if text.starts_with("---") {
            Self::Separator
        } else if let Some(rest) = text.strip_prefix("%title:") {
            Self::Title(rest)
        } else if let Some(rest) = text.strip_prefix("%author:") {
            Self::Author(rest)
        } else if text.starts_with("%date:") {
            Self::Date
        } else {
            Self::Content
        }
    }
}

struct Parser<R: Read> {
    bytes: Bytes<BufReader<R>>,
    path: PathBuf,
    line_no: usize,
    scratch: String,
    preformatted: bool,
    slides: Vec<Slide>,
    current: Slide,
    title: Option<String>,
    author: Option<String>,
}

impl<R: Read> Parser<R> {
    fn new(reader: R, path: PathBuf) -> Self {
        Self {
            bytes: BufReader::new(reader).bytes(),
            path,
            line_no: 0,
            scratch: String::new(),
            preformatted: false,
            slides: Vec::new(),
            current: Slide::new(),
            title: None,
            author: None,
        }
    }

    fn run(mut self) -> Result<Document, ParseError> {
        let span = info_span!("parse", path = %self.path.display());
        let _guard = span.enter();

        self.scratch.try_reserve_exact(INITIAL_LINE_CAPACITY)?;
        self.slides.try_reserve_exact(INITIAL_SLIDE_CAPACITY)?;

        loop {
            self.line_no += 1;
            let ended_with_newline = self.read_line()?;
            if ended_with_newline || !self.scratch.is_empty() {
                self.finish_line()?;
            }
            if !ended_with_newline {
                break;
            }
        }
        self.close_slide()?;
        self.slides.shrink_to_fit();

        debug!(
            slides = self.slides.len(),
            lines = self.line_no,
            titled = self.title.is_some(),
            "document parsed"
        );
        Ok(Document::new(self.slides, self.title, self.author))
    }

    /// Fill the scratch buffer with the next line.
    ///
    /// Returns `false` once the end of input is reached.
    fn read_line(&mut self) -> Result<bool, ParseError> {
        self.scratch.clear();
        loop {
            let Some(lead) = self.next_byte()? else {
                return Ok(false);
            };
            if lead == b'\n' {
                return Ok(true);
            }
            let ch = self.read_codepoint(lead)?;
            self.push_char(ch)?;
        }
    }

    fn read_codepoint(&mut self, lead: u8) -> Result<char, ParseError> {
        let len = utf8::char_length(lead).map_err(|e| self.encoding(e))?;
        let mut seq = [lead, 0, 0, 0];
        for k in 1..len {
            match self.next_byte()? {
                Some(byte) if utf8::is_continuation(byte) => seq[k] = byte,
                Some(byte) => {
                    return Err(self.encoding(EncodingError::InvalidContinuation(byte)));
                }
                None => {
                    return Err(self.encoding(EncodingError::Truncated {
                        expected: len,
                        found: k,
                    }));
                }
            }
        }
        utf8::decode(&seq[..len], 0, len).map_err(|e| self.encoding(e))
    }

    /// Append one codepoint, doubling the scratch capacity when it is full.
    fn push_char(&mut self, ch: char) -> Result<(), TryReserveError> {
        let needed = self.scratch.len() + ch.len_utf8();
        let capacity = self.scratch.capacity();
        if needed > capacity {
            let mut target = capacity.max(INITIAL_LINE_CAPACITY);
            while target < needed {
                target *= 2;
            }
            self.scratch.try_reserve_exact(target - self.scratch.len())?;
            trace!(capacity = target, "line buffer grown");
        }
        self.scratch.push(ch);
        Ok(())
    }

    fn finish_line(&mut self) -> Result<(), ParseError> {
        let scratch = std::mem::take(&mut self.scratch);
        match LineKind::classify(&scratch, self.preformatted) {
            LineKind::Fence => self.preformatted = !self.preformatted,
            LineKind::Separator => self.close_slide()?,
            LineKind::Title(value) => self.title = Some(value.to_owned()),
            LineKind::Author(value) => self.author = Some(value.to_owned()),
            LineKind::Date => {}
            LineKind::Content => {
                let mut text = String::new();
                text.try_reserve_exact(scratch.len())?;
                text.push_str(&scratch);
                self.current.push_line(Line::new(text, self.preformatted));
            }
        }
        self.scratch = scratch;
        Ok(())
    }

    /// Move the current slide into the slide list, doubling it when full.
    fn close_slide(&mut self) -> Result<(), TryReserveError> {
        if self.slides.len() == self.slides.capacity() {
            let grow = self.slides.capacity().max(INITIAL_SLIDE_CAPACITY);
            self.slides.try_reserve_exact(grow)?;
        }
        let slide = std::mem::take(&mut self.current);
        trace!(
            index = self.slides.len(),
            lines = slide.lines().len(),
            parts = slide.part_count(),
            "slide closed"
        );
        self.slides.push(slide);
        Ok(())
    }

    fn next_byte(&mut self) -> Result<Option<u8>, ParseError> {
        match self.bytes.next() {
            None => Ok(None),
            Some(Ok(byte)) => Ok(Some(byte)),
            Some(Err(source)) => Err(ParseError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn encoding(&self, source: EncodingError) -> ParseError {
        ParseError::Encoding {
            line: self.line_no,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use tracing_test::traced_test;

    fn parse_str(input: &str) -> Document {
        parse(input.as_bytes()).unwrap()
    }

    fn texts(slide: &Slide) -> Vec<&str> {
        slide.lines().iter().map(Line::text).collect()
    }

    #[test]
    fn empty_input_yields_one_empty_slide() {
        let doc = parse_str("");
        assert_eq!(doc.slide_count(), 1);
        assert!(doc.slides()[0].is_empty());
        assert_eq!(doc.slides()[0].part_count(), 1);
    }

    #[test]
    fn separators_split_slides() {
        let doc = parse_str("# Title\n\nbody text\n---\nslide two\n");
        assert_eq!(doc.slide_count(), 2);
        assert_eq!(texts(&doc.slides()[0]), ["# Title", "", "body text"]);
        assert_eq!(texts(&doc.slides()[1]), ["slide two"]);
    }

    #[test]
    fn separator_matches_by_prefix() {
        let doc = parse_str("a\n-----\nb\n---extra\nc\n");
        assert_eq!(doc.slide_count(), 3);
    }

    #[test]
    fn trailing_separator_opens_an_empty_slide() {
        let doc = parse_str("a\n---\n");
        assert_eq!(doc.slide_count(), 2);
        assert!(doc.slides()[1].is_empty());
    }

    #[test]
    fn fenced_separator_is_content() {
        let doc = parse_str("```\n---\n```\n");
        assert_eq!(doc.slide_count(), 1);
        let slide = &doc.slides()[0];
        assert_eq!(texts(slide), ["---"]);
        assert!(slide.lines()[0].is_preformatted());
    }

    #[test]
    fn fence_with_language_tag_toggles() {
        let doc = parse_str("```rust\n%title: no\n```\n%title: yes\n");
        assert_eq!(doc.title(), Some(" yes"));
        assert_eq!(texts(&doc.slides()[0]), ["%title: no"]);
    }

    #[test]
    fn metadata_last_writer_wins() {
        let doc = parse_str("%title:First\n%author:Ann\n%title:Second\n%date:today\nbody\n");
        assert_eq!(doc.title(), Some("Second"));
        assert_eq!(doc.author(), Some("Ann"));
        assert_eq!(texts(&doc.slides()[0]), ["body"]);
    }

    #[test]
    fn short_prefix_is_content() {
        let doc = parse_str("%titl\n--\n``\n");
        assert_eq!(doc.slide_count(), 1);
        assert_eq!(texts(&doc.slides()[0]), ["%titl", "--", "``"]);
        assert_eq!(doc.title(), None);
    }

    #[test]
    fn markers_count_parts_and_stay_in_sequence() {
        let doc = parse_str("one\n^reveal two\n");
        let slide = &doc.slides()[0];
        assert_eq!(slide.part_count(), 2);
        assert_eq!(texts(slide), ["one", "^reveal two"]);
    }

    #[test]
    fn fenced_marker_is_literal() {
        let doc = parse_str("```\n^literal\n```\n");
        assert_eq!(doc.slides()[0].part_count(), 1);
    }

    #[test]
    fn final_line_without_newline_is_kept() {
        let doc = parse_str("a\nlast");
        assert_eq!(texts(&doc.slides()[0]), ["a", "last"]);
    }

    #[test]
    fn carriage_return_is_kept() {
        let doc = parse_str("a\r\n");
        assert_eq!(texts(&doc.slides()[0]), ["a\r"]);
    }

    #[test]
    fn long_lines_grow_the_buffer() {
        let long = "ü".repeat(1000);
        let doc = parse_str(&format!("{long}\n"));
        assert_eq!(doc.slides()[0].lines()[0].text(), long);
    }

    #[test]
    fn many_slides_grow_the_list() {
        let input = "x\n---\n".repeat(40);
        let doc = parse_str(&input);
        assert_eq!(doc.slide_count(), 41);
    }

    #[test]
    fn invalid_lead_reports_line() {
        let err = parse(&b"ok\n\x80\n"[..]).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Encoding {
                line: 2,
                source: EncodingError::InvalidLead(0x80)
            }
        ));
    }

    #[test]
    fn bad_continuation_is_an_error() {
        let err = parse(&b"\xc3A\n"[..]).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Encoding {
                source: EncodingError::InvalidContinuation(b'A'),
                ..
            }
        ));
    }

    #[test]
    fn truncated_at_end_of_input() {
        let err = parse(&b"ok\n\xe2\x82"[..]).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Encoding {
                line: 2,
                source: EncodingError::Truncated {
                    expected: 3,
                    found: 2
                }
            }
        ));
    }

    #[test]
    fn newline_inside_sequence_is_an_error() {
        let err = parse(&b"\xc3\n"[..]).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Encoding {
                source: EncodingError::InvalidContinuation(b'\n'),
                ..
            }
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = parse_file("/definitely/not/here.gmi").unwrap_err();
        match err {
            ParseError::Io { path, source } => {
                assert_eq!(path, Path::new("/definitely/not/here.gmi"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    /// Fails every other read with `Interrupted`, then with `kind` at EOF.
    struct Flaky<'a> {
        data: &'a [u8],
        interrupt: bool,
        end: Option<io::ErrorKind>,
    }

    impl Read for Flaky<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::ErrorKind::Interrupted.into());
            }
            if self.data.is_empty() {
                return match self.end {
                    Some(kind) => Err(kind.into()),
                    None => Ok(0),
                };
            }
            let n = self.data.len().min(buf.len()).min(3);
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn interrupted_reads_are_retried() {
        let reader = Flaky {
            data: b"# one\n---\ntwo\n",
            interrupt: false,
            end: None,
        };
        let doc = parse(reader).unwrap();
        assert_eq!(doc.slide_count(), 2);
        assert_eq!(texts(&doc.slides()[1]), ["two"]);
    }

    #[test]
    fn read_failure_is_io_error() {
        let reader = Flaky {
            data: b"partial",
            interrupt: false,
            end: Some(io::ErrorKind::BrokenPipe),
        };
        match parse(reader).unwrap_err() {
            ParseError::Io { path, source } => {
                assert_eq!(path, Path::new(STREAM_LABEL));
                assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    #[traced_test]
    fn parse_logs_summary() {
        let _ = parse_str("a\n---\nb\n");
        assert!(logs_contain("document parsed"));
    }
}
