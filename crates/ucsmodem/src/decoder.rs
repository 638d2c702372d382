//! The one-shot UTF-8 → UCS-4 decoder.
//!
//! Overview
//! - A single left-to-right pass with no backtracking: classify the lead
//!   byte, fold the low six bits of each continuation byte in MSB-first,
//!   then reject overlong encodings, surrogates, and values above U+10FFFF.
//! - `0xC0`/`0xC1` and `0xF5..=0xF7` classify as leads by bit pattern and
//!   fail the value checks; only standalone continuation bytes and
//!   `0xF8..=0xFF` are invalid leads outright.
//! - Malformed input is handled per [`DecodeMode`]: `Strict` aborts with the
//!   error kind and the lead byte's offset, `Replace` substitutes one U+FFFD
//!   per malformed attempt and resumes at the first unconsumed byte.
//! - The decoder never reads past the end of the input; a truncated trailing
//!   character is malformed, not an out-of-bounds read.
//!
//! # Examples
//!
//! ```rust
//! use ucsmodem::decode;
//!
//! assert_eq!(decode(&[0xF0, 0x9F, 0x98, 0x80]).unwrap(), vec![0x1F600]);
//! ```

use alloc::vec::Vec;

use crate::{
    error::{DecodeError, ErrorKind},
    options::{DecodeMode, DecoderOptions},
};

/// A decoded Unicode scalar value: a 32-bit code point in `[0, 0x10FFFF]`
/// excluding the surrogate range.
pub type ScalarValue = u32;

/// U+FFFD REPLACEMENT CHARACTER, substituted for malformed input in
/// [`DecodeMode::Replace`].
pub const REPLACEMENT_SCALAR: ScalarValue = 0xFFFD;

/// The largest valid scalar value, U+10FFFF.
pub const MAX_SCALAR: ScalarValue = 0x10_FFFF;

const SURROGATE_MIN: ScalarValue = 0xD800;
const SURROGATE_MAX: ScalarValue = 0xDFFF;

/// Smallest value that genuinely needs the indexed encoded length.
const MIN_FOR_LENGTH: [ScalarValue; 5] = [0, 0, 0x80, 0x800, 0x1_0000];

pub(crate) const fn is_surrogate(value: ScalarValue) -> bool {
    SURROGATE_MIN <= value && value <= SURROGATE_MAX
}

/// Total encoded length implied by a lead byte, or `None` when the byte
/// cannot start a sequence.
const fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        _ => None,
    }
}

const fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Decodes the character whose lead byte is `bytes[0]`; `bytes` must be
/// non-empty.
///
/// On success returns the scalar and its encoded length. On failure returns
/// the error kind together with the number of bytes the attempt consumed
/// (the lead plus every accepted continuation byte), which is how far
/// `Replace` mode advances for the single substituted character. A byte that
/// failed the continuation test is not counted as consumed.
pub(crate) fn decode_one(bytes: &[u8]) -> Result<(ScalarValue, usize), (ErrorKind, usize)> {
    let lead = bytes[0];
    let Some(len) = sequence_len(lead) else {
        return Err((ErrorKind::InvalidLeadByte { byte: lead }, 1));
    };
    if len == 1 {
        return Ok((ScalarValue::from(lead), 1));
    }

    let mut value = match len {
        2 => ScalarValue::from(lead & 0x1F),
        3 => ScalarValue::from(lead & 0x0F),
        _ => ScalarValue::from(lead & 0x07),
    };
    for i in 1..len {
        let Some(&byte) = bytes.get(i) else {
            let kind = ErrorKind::TruncatedSequence {
                expected: len,
                found: i,
            };
            return Err((kind, i));
        };
        if !is_continuation(byte) {
            return Err((ErrorKind::InvalidContinuationByte { byte }, i));
        }
        value = (value << 6) | ScalarValue::from(byte & 0x3F);
    }

    if value < MIN_FOR_LENGTH[len] {
        return Err((ErrorKind::OverlongEncoding { value, length: len }, len));
    }
    if is_surrogate(value) {
        return Err((ErrorKind::SurrogateCodePoint { value }, len));
    }
    if value > MAX_SCALAR {
        return Err((ErrorKind::CodePointOutOfRange { value }, len));
    }
    Ok((value, len))
}

/// One-shot UTF-8 → UCS-4 decoder.
///
/// Stateless apart from its options: cheap to copy, safe to share, and free
/// of side effects. For chunked input use [`StreamingDecoder`].
///
/// [`StreamingDecoder`]: crate::StreamingDecoder
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Decoder {
    options: DecoderOptions,
}

impl Utf8Decoder {
    /// Creates a decoder with the given options.
    #[must_use]
    pub fn new(options: DecoderOptions) -> Self {
        Self { options }
    }

    /// Decodes `bytes` into an owned sequence of scalar values.
    ///
    /// The output preserves source order and holds one scalar per decoded
    /// character; embedded NUL bytes decode to U+0000 rather than
    /// terminating the input.
    ///
    /// # Errors
    ///
    /// In [`DecodeMode::Strict`], the first malformed character yields a
    /// [`DecodeError`] naming the error kind and the offset of its lead
    /// byte. [`DecodeMode::Replace`] never fails.
    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<ScalarValue>, DecodeError> {
        // Every scalar consumes at least one byte, so this never grows.
        let mut out = Vec::with_capacity(bytes.len());
        let mut offset = 0;
        while offset < bytes.len() {
            let byte = bytes[offset];
            if byte < 0x80 {
                out.push(ScalarValue::from(byte));
                offset += 1;
                continue;
            }
            match decode_one(&bytes[offset..]) {
                Ok((scalar, len)) => {
                    out.push(scalar);
                    offset += len;
                }
                Err((kind, skip)) => match self.options.mode {
                    DecodeMode::Strict => {
                        let err = DecodeError { kind, offset };
                        #[cfg(any(test, feature = "fuzzing"))]
                        if self.options.panic_on_error {
                            panic!("decode error: {err}");
                        }
                        return Err(err);
                    }
                    DecodeMode::Replace => {
                        out.push(REPLACEMENT_SCALAR);
                        offset += skip;
                    }
                },
            }
        }
        Ok(out)
    }
}

/// Decodes `bytes` strictly: the first malformed character aborts the whole
/// decode.
///
/// # Examples
///
/// ```rust
/// use ucsmodem::decode;
///
/// assert_eq!(decode(&[0x41, 0x00, 0x42]).unwrap(), vec![0x41, 0x00, 0x42]);
/// assert!(decode(&[0xED, 0xA0, 0x80]).is_err());
/// ```
///
/// # Errors
///
/// Returns a [`DecodeError`] for the first malformed character.
pub fn decode(bytes: &[u8]) -> Result<Vec<ScalarValue>, DecodeError> {
    Utf8Decoder::new(DecoderOptions::default()).decode(bytes)
}

/// Decodes `bytes`, substituting U+FFFD for each malformed character.
///
/// # Examples
///
/// ```rust
/// use ucsmodem::decode_lossy;
///
/// assert_eq!(decode_lossy(&[0xC0, 0x80]), vec![0xFFFD]);
/// ```
#[must_use]
pub fn decode_lossy(bytes: &[u8]) -> Vec<ScalarValue> {
    let decoder = Utf8Decoder::new(DecoderOptions {
        mode: DecodeMode::Replace,
        ..Default::default()
    });
    match decoder.decode(bytes) {
        Ok(scalars) => scalars,
        // Replace mode substitutes instead of failing.
        Err(_) => unreachable!(),
    }
}

/// Checks that `bytes` is well-formed UTF-8 without building the output
/// sequence.
///
/// # Errors
///
/// Returns a [`DecodeError`] for the first malformed character.
pub fn validate(bytes: &[u8]) -> Result<(), DecodeError> {
    let mut offset = 0;
    while offset < bytes.len() {
        if bytes[offset] < 0x80 {
            offset += 1;
            continue;
        }
        match decode_one(&bytes[offset..]) {
            Ok((_, len)) => offset += len,
            Err((kind, _)) => return Err(DecodeError { kind, offset }),
        }
    }
    Ok(())
}
