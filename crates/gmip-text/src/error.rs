#![forbid(unsafe_code)]

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::utf8::EncodingError;

/// Reasons a document cannot be loaded.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// Path of the input (`<stream>` for plain readers).
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The input is not valid UTF-8.
    #[error("line {line}: {source}")]
    Encoding {
        /// 1-based line number of the malformed sequence.
        line: usize,
        #[source]
        source: EncodingError,
    },
    /// A buffer could not grow.
    #[error("out of memory while parsing")]
    Allocation,
}

impl From<std::collections::TryReserveError> for ParseError {
    fn from(_: std::collections::TryReserveError) -> Self {
        Self::Allocation
    }
}
