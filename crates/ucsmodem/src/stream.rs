//! Incremental UTF-8 → UCS-4 decoding over arbitrary chunk boundaries.
//!
//! Overview
//! - [`StreamingDecoder`] accepts input in chunks via [`feed`] and yields the
//!   scalar values each chunk completes. A multi-byte character split across
//!   chunks is carried in a small pending buffer (at most three bytes) and
//!   completed by later feeds.
//! - [`finish`] marks end of input and flushes the carry: a character still
//!   in flight is a truncation, handled per the configured [`DecodeMode`].
//! - Error offsets are absolute byte positions in the concatenated stream,
//!   naming the lead byte of the malformed character.
//! - In `Strict` mode the first error wedges the decoder: every later
//!   `feed` or `finish` returns the same error, so a caller cannot mistake
//!   a resumed stream for a clean one.
//!
//! For any split of an input into chunks, concatenating the outputs of
//! `feed` and `finish` equals the one-shot [`Utf8Decoder`] output for the
//! whole input, in both modes.
//!
//! [`feed`]: StreamingDecoder::feed
//! [`finish`]: StreamingDecoder::finish
//! [`Utf8Decoder`]: crate::Utf8Decoder

use alloc::{vec, vec::Vec};

use crate::{
    decoder::{REPLACEMENT_SCALAR, ScalarValue, decode_one},
    error::{DecodeError, ErrorKind},
    options::{DecodeMode, DecoderOptions},
};

/// Incremental UTF-8 → UCS-4 decoder.
///
/// # Examples
///
/// ```rust
/// use ucsmodem::{DecoderOptions, StreamingDecoder};
///
/// let mut decoder = StreamingDecoder::new(DecoderOptions::default());
/// // "€" split in the middle of its three-byte encoding:
/// assert_eq!(decoder.feed(&[0xE2, 0x82]).unwrap(), vec![]);
/// assert_eq!(decoder.feed(&[0xAC, 0x21]).unwrap(), vec![0x20AC, 0x21]);
/// assert_eq!(decoder.finish().unwrap(), vec![]);
/// ```
#[derive(Debug, Clone)]
pub struct StreamingDecoder {
    options: DecoderOptions,
    /// Prefix of a multi-byte character awaiting its continuation bytes.
    pending: [u8; 4],
    pending_len: usize,
    /// Absolute offset of the next character start; the lead byte of
    /// `pending` while a character is in flight.
    pos: usize,
    /// First strict-mode error; wedges the decoder once set.
    failed: Option<DecodeError>,
}

impl StreamingDecoder {
    /// Creates a streaming decoder with the given options.
    #[must_use]
    pub fn new(options: DecoderOptions) -> Self {
        Self {
            options,
            pending: [0; 4],
            pending_len: 0,
            pos: 0,
            failed: None,
        }
    }

    /// Decodes `chunk`, returning the scalar values it completes.
    ///
    /// A trailing character whose continuation bytes have not arrived yet is
    /// held back and completed by a later `feed` (or reported by
    /// [`finish`]); it is not an error here.
    ///
    /// # Errors
    ///
    /// In [`DecodeMode::Strict`], the first malformed character yields a
    /// [`DecodeError`] with its absolute stream offset, and the decoder
    /// returns that same error for every subsequent call.
    ///
    /// [`finish`]: StreamingDecoder::finish
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<ScalarValue>, DecodeError> {
        if let Some(err) = self.failed {
            return Err(err);
        }
        let mut out = Vec::with_capacity(chunk.len());
        let mut idx = 0;

        // Finish (or fail) the character left in flight by a previous feed.
        while self.pending_len > 0 && idx < chunk.len() {
            let mut window = [0u8; 4];
            window[..self.pending_len].copy_from_slice(&self.pending[..self.pending_len]);
            let take = (4 - self.pending_len).min(chunk.len() - idx);
            window[self.pending_len..self.pending_len + take]
                .copy_from_slice(&chunk[idx..idx + take]);
            let avail = self.pending_len + take;

            match decode_one(&window[..avail]) {
                Ok((scalar, len)) => {
                    out.push(scalar);
                    idx += len - self.pending_len;
                    self.pos += len;
                    self.pending_len = 0;
                }
                Err((ErrorKind::TruncatedSequence { .. }, _)) => {
                    // Still mid-character and the chunk is exhausted.
                    self.pending[..avail].copy_from_slice(&window[..avail]);
                    self.pending_len = avail;
                    idx += take;
                    debug_assert_eq!(idx, chunk.len());
                }
                Err((kind, skip)) => match self.options.mode {
                    DecodeMode::Strict => return Err(self.raise(kind)),
                    DecodeMode::Replace => {
                        // The failing byte is a chunk byte; the pending
                        // prefix itself is always well-formed.
                        out.push(REPLACEMENT_SCALAR);
                        idx += skip - self.pending_len;
                        self.pos += skip;
                        self.pending_len = 0;
                    }
                },
            }
        }

        // Decode directly from the chunk.
        while idx < chunk.len() {
            let byte = chunk[idx];
            if byte < 0x80 {
                out.push(ScalarValue::from(byte));
                idx += 1;
                self.pos += 1;
                continue;
            }
            match decode_one(&chunk[idx..]) {
                Ok((scalar, len)) => {
                    out.push(scalar);
                    idx += len;
                    self.pos += len;
                }
                Err((ErrorKind::TruncatedSequence { .. }, consumed)) => {
                    // The character continues in the next chunk; `pos` stays
                    // at the lead until it completes.
                    self.pending[..consumed].copy_from_slice(&chunk[idx..]);
                    self.pending_len = consumed;
                    idx = chunk.len();
                }
                Err((kind, skip)) => match self.options.mode {
                    DecodeMode::Strict => return Err(self.raise(kind)),
                    DecodeMode::Replace => {
                        out.push(REPLACEMENT_SCALAR);
                        idx += skip;
                        self.pos += skip;
                    }
                },
            }
        }
        Ok(out)
    }

    /// Marks end of input and flushes any character still in flight.
    ///
    /// # Errors
    ///
    /// In [`DecodeMode::Strict`], a pending partial character yields a
    /// [`ErrorKind::TruncatedSequence`] error at the lead byte's offset; an
    /// earlier error is returned as-is. In [`DecodeMode::Replace`] the
    /// pending bytes become a single U+FFFD.
    pub fn finish(mut self) -> Result<Vec<ScalarValue>, DecodeError> {
        if let Some(err) = self.failed {
            return Err(err);
        }
        if self.pending_len == 0 {
            return Ok(Vec::new());
        }
        match decode_one(&self.pending[..self.pending_len]) {
            // The pending buffer is always a proper prefix, so it cannot
            // complete here; decode_one reports the truncation.
            Ok(_) => unreachable!(),
            Err((kind, _)) => match self.options.mode {
                DecodeMode::Strict => Err(self.raise(kind)),
                DecodeMode::Replace => Ok(vec![REPLACEMENT_SCALAR]),
            },
        }
    }

    /// Number of stream bytes fully decoded so far.
    ///
    /// Bytes of a character still in flight are not counted until the
    /// character completes.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    fn raise(&mut self, kind: ErrorKind) -> DecodeError {
        let err = DecodeError {
            kind,
            offset: self.pos,
        };
        #[cfg(any(test, feature = "fuzzing"))]
        if self.options.panic_on_error {
            panic!("decode error: {err}");
        }
        self.failed = Some(err);
        err
    }
}
