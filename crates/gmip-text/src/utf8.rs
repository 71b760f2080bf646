#![forbid(unsafe_code)]

//! Codepoint-at-a-time UTF-8 decoding.
//!
//! The parser reads its input byte by byte, so it needs to know how long a
//! sequence is from its lead byte alone before pulling the continuation bytes.
//! Any malformed sequence is reported as an [`EncodingError`]; there is no
//! replacement-character recovery.

use thiserror::Error;

/// Lead-byte payload masks, indexed by `sequence length - 1`.
const LEAD_MASKS: [u8; 4] = [0x7f, 0x1f, 0x0f, 0x07];

/// Malformed UTF-8 input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// The byte cannot start a sequence.
    #[error("invalid UTF-8 lead byte 0x{0:02x}")]
    InvalidLead(u8),
    /// A byte inside a sequence is not of the form `10xxxxxx`.
    #[error("invalid UTF-8 continuation byte 0x{0:02x}")]
    InvalidContinuation(u8),
    /// The input ended in the middle of a sequence.
    #[error("truncated UTF-8 sequence: expected {expected} bytes, found {found}")]
    Truncated {
        /// Length announced by the lead byte.
        expected: usize,
        /// Bytes actually available.
        found: usize,
    },
    /// The decoded value is a surrogate or lies above U+10FFFF.
    #[error("U+{0:04X} is not a Unicode scalar value")]
    InvalidScalar(u32),
}

/// Length in bytes of the sequence introduced by `lead`.
///
/// # Errors
///
/// Returns [`EncodingError::InvalidLead`] for continuation bytes and for
/// `0xf8..=0xff`.
#[inline]
pub const fn char_length(lead: u8) -> Result<usize, EncodingError> {
    if lead & 0x80 == 0x00 {
        Ok(1)
    } else if lead & 0xe0 == 0xc0 {
        Ok(2)
    } else if lead & 0xf0 == 0xe0 {
        Ok(3)
    } else if lead & 0xf8 == 0xf0 {
        Ok(4)
    } else {
        Err(EncodingError::InvalidLead(lead))
    }
}

/// Whether `byte` has the `10xxxxxx` continuation shape.
#[inline]
#[must_use]
pub const fn is_continuation(byte: u8) -> bool {
    byte & 0xc0 == 0x80
}

/// Decode the `len`-byte sequence starting at `bytes[offset]`.
///
/// `len` is normally the value [`char_length`] returned for the lead byte.
///
/// # Errors
///
/// Fails if `len` is not 1-4, if fewer than `len` bytes remain, if a
/// continuation byte is malformed, or if the value is not a scalar.
pub fn decode(bytes: &[u8], offset: usize, len: usize) -> Result<char, EncodingError> {
    let Some(&lead) = bytes.get(offset) else {
        return Err(EncodingError::Truncated {
            expected: len,
            found: 0,
        });
    };
    if !(1..=4).contains(&len) {
        return Err(EncodingError::InvalidLead(lead));
    }

    let available = bytes.len() - offset;
    if available < len {
        return Err(EncodingError::Truncated {
            expected: len,
            found: available,
        });
    }

    let mut value = u32::from(lead & LEAD_MASKS[len - 1]);
    for &byte in &bytes[offset + 1..offset + len] {
        if !is_continuation(byte) {
            return Err(EncodingError::InvalidContinuation(byte));
        }
        value = (value << 6) | u32::from(byte & 0x3f);
    }

    char::from_u32(value).ok_or(EncodingError::InvalidScalar(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_from_lead_bytes() {
        assert_eq!(char_length(b'a'), Ok(1));
        assert_eq!(char_length(0xc3), Ok(2));
        assert_eq!(char_length(0xe2), Ok(3));
        assert_eq!(char_length(0xf0), Ok(4));
        assert_eq!(char_length(0x80), Err(EncodingError::InvalidLead(0x80)));
        assert_eq!(char_length(0xf8), Err(EncodingError::InvalidLead(0xf8)));
        assert_eq!(char_length(0xff), Err(EncodingError::InvalidLead(0xff)));
    }

    #[test]
    fn continuation_shape() {
        assert!(is_continuation(0x80));
        assert!(is_continuation(0xbf));
        assert!(!is_continuation(0x7f));
        assert!(!is_continuation(0xc0));
    }

    #[test]
    fn decodes_each_width() {
        assert_eq!(decode(b"a", 0, 1), Ok('a'));
        assert_eq!(decode("é".as_bytes(), 0, 2), Ok('é'));
        assert_eq!(decode("€".as_bytes(), 0, 3), Ok('€'));
        assert_eq!(decode("🦀".as_bytes(), 0, 4), Ok('🦀'));
    }

    #[test]
    fn decodes_at_offset() {
        let bytes = "ab€".as_bytes();
        assert_eq!(decode(bytes, 2, 3), Ok('€'));
    }

    #[test]
    fn truncated_sequence() {
        let bytes = &"€".as_bytes()[..2];
        assert_eq!(
            decode(bytes, 0, 3),
            Err(EncodingError::Truncated {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn bad_continuation() {
        assert_eq!(
            decode(&[0xc3, 0x41], 0, 2),
            Err(EncodingError::InvalidContinuation(0x41))
        );
    }

    #[test]
    fn surrogates_are_rejected() {
        // U+D800 encoded as ED A0 80
        assert_eq!(
            decode(&[0xed, 0xa0, 0x80], 0, 3),
            Err(EncodingError::InvalidScalar(0xd800))
        );
    }

    #[test]
    fn above_max_scalar_is_rejected() {
        // F4 90 80 80 = 0x110000
        assert_eq!(
            decode(&[0xf4, 0x90, 0x80, 0x80], 0, 4),
            Err(EncodingError::InvalidScalar(0x11_0000))
        );
    }
}
