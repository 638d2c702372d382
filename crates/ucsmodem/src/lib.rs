//! Conversion of UTF-8 byte ranges into sequences of UCS-4 scalar values,
//! with an explicit, configurable policy for malformed input.
//!
//! The crate offers a one-shot [`Utf8Decoder`] (plus the [`decode`],
//! [`decode_lossy`] and [`validate`] conveniences), a chunk-at-a-time
//! [`StreamingDecoder`] that carries in-flight characters across feeds, and
//! a companion UCS-4 → UTF-8 [`encode`] for round trips.
//!
//! # Examples
//!
//! ```rust
//! use ucsmodem::{DecodeMode, DecoderOptions, Utf8Decoder};
//!
//! let decoder = Utf8Decoder::new(DecoderOptions::default());
//! let scalars = decoder.decode("€".as_bytes()).unwrap();
//! assert_eq!(scalars, vec![0x20AC]);
//!
//! // Malformed input substitutes U+FFFD instead of failing:
//! let decoder = Utf8Decoder::new(DecoderOptions {
//!     mode: DecodeMode::Replace,
//!     ..Default::default()
//! });
//! assert_eq!(decoder.decode(&[0x41, 0xFF]).unwrap(), vec![0x41, 0xFFFD]);
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod decoder;
mod encoder;
mod error;
mod options;
mod stream;

#[cfg(test)]
mod tests;

pub use decoder::{
    MAX_SCALAR, REPLACEMENT_SCALAR, ScalarValue, Utf8Decoder, decode, decode_lossy, validate,
};
pub use encoder::{encode, encode_scalar};
pub use error::{DecodeError, EncodeError, ErrorKind};
pub use options::{DecodeMode, DecoderOptions};
pub use stream::StreamingDecoder;
