use thiserror::Error;

/// Error returned by the strict decoders.
///
/// Carries the classification of the failure and the byte offset of the lead
/// byte of the malformed character. For the streaming decoder the offset is
/// absolute across all fed chunks.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{kind} at byte offset {offset}")]
pub struct DecodeError {
    /// What was wrong with the input.
    pub kind: ErrorKind,
    /// Byte offset of the lead byte of the malformed character.
    pub offset: usize,
}

/// Classification of a malformed UTF-8 sequence.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// A byte that cannot start any encoding: a standalone continuation byte
    /// (`10xxxxxx`) or one of `0xF8..=0xFF`.
    #[error("invalid lead byte 0x{byte:02X}")]
    InvalidLeadByte {
        /// The offending byte.
        byte: u8,
    },

    /// Input ended before the expected number of continuation bytes.
    #[error("truncated sequence: expected {expected} bytes, found {found}")]
    TruncatedSequence {
        /// Total encoded length implied by the lead byte.
        expected: usize,
        /// Bytes actually available, including the lead.
        found: usize,
    },

    /// An expected continuation byte did not match `10xxxxxx`.
    #[error("invalid continuation byte 0x{byte:02X}")]
    InvalidContinuationByte {
        /// The offending byte.
        byte: u8,
    },

    /// A multi-byte sequence encoded a value representable in fewer bytes.
    #[error("overlong {length}-byte encoding of U+{value:04X}")]
    OverlongEncoding {
        /// The decoded value.
        value: u32,
        /// The encoded length that was used.
        length: usize,
    },

    /// The decoded value falls in the UTF-16 surrogate range
    /// `[0xD800, 0xDFFF]`.
    #[error("surrogate code point U+{value:04X}")]
    SurrogateCodePoint {
        /// The decoded value.
        value: u32,
    },

    /// The decoded value exceeds U+10FFFF.
    #[error("code point 0x{value:X} out of range")]
    CodePointOutOfRange {
        /// The decoded value.
        value: u32,
    },
}

/// Error returned by the UCS-4 → UTF-8 encoder.
///
/// Only the scalar-level kinds ([`ErrorKind::SurrogateCodePoint`] and
/// [`ErrorKind::CodePointOutOfRange`]) ever occur here; `index` is the
/// position of the offending scalar in the input slice.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{kind} at index {index}")]
pub struct EncodeError {
    /// What was wrong with the scalar.
    pub kind: ErrorKind,
    /// Index of the offending scalar in the input slice.
    pub index: usize,
}
