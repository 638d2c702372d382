//! The companion UCS-4 → UTF-8 encoder.
//!
//! Produces minimal-length encodings, so encoding the output of a strict
//! decode reproduces the original bytes exactly.

use alloc::vec::Vec;

use crate::{
    decoder::{MAX_SCALAR, ScalarValue, is_surrogate},
    error::{EncodeError, ErrorKind},
};

/// Appends the UTF-8 encoding of `scalar` to `out`.
///
/// # Errors
///
/// Returns the scalar-level [`ErrorKind`] when `scalar` is a surrogate or
/// exceeds U+10FFFF; `out` is left untouched in that case.
pub fn encode_scalar(scalar: ScalarValue, out: &mut Vec<u8>) -> Result<(), ErrorKind> {
    if is_surrogate(scalar) {
        return Err(ErrorKind::SurrogateCodePoint { value: scalar });
    }
    if scalar > MAX_SCALAR {
        return Err(ErrorKind::CodePointOutOfRange { value: scalar });
    }
    match scalar {
        0x00..=0x7F => out.push(scalar as u8),
        0x80..=0x7FF => {
            out.push(0xC0 | (scalar >> 6) as u8);
            out.push(0x80 | (scalar & 0x3F) as u8);
        }
        0x800..=0xFFFF => {
            out.push(0xE0 | (scalar >> 12) as u8);
            out.push(0x80 | ((scalar >> 6) & 0x3F) as u8);
            out.push(0x80 | (scalar & 0x3F) as u8);
        }
        _ => {
            out.push(0xF0 | (scalar >> 18) as u8);
            out.push(0x80 | ((scalar >> 12) & 0x3F) as u8);
            out.push(0x80 | ((scalar >> 6) & 0x3F) as u8);
            out.push(0x80 | (scalar & 0x3F) as u8);
        }
    }
    Ok(())
}

/// Encodes a sequence of scalar values as UTF-8.
///
/// # Examples
///
/// ```rust
/// use ucsmodem::encode;
///
/// assert_eq!(encode(&[0x20AC]).unwrap(), vec![0xE2, 0x82, 0xAC]);
/// ```
///
/// # Errors
///
/// Returns an [`EncodeError`] naming the index of the first scalar that is a
/// surrogate or exceeds U+10FFFF.
pub fn encode(scalars: &[ScalarValue]) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::with_capacity(scalars.len());
    for (index, &scalar) in scalars.iter().enumerate() {
        encode_scalar(scalar, &mut out).map_err(|kind| EncodeError { kind, index })?;
    }
    Ok(out)
}
