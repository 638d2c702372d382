/// Configuration options for the UTF-8 decoders.
///
/// These options control how malformed input is handled. The same struct
/// configures both the one-shot [`Utf8Decoder`] and the incremental
/// [`StreamingDecoder`].
///
/// # Examples
///
/// ```rust
/// use ucsmodem::{DecodeMode, DecoderOptions, Utf8Decoder};
///
/// let options = DecoderOptions {
///     mode: DecodeMode::Replace,
///     ..Default::default()
/// };
/// let decoder = Utf8Decoder::new(options);
/// ```
///
/// [`Utf8Decoder`]: crate::Utf8Decoder
/// [`StreamingDecoder`]: crate::StreamingDecoder
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecoderOptions {
    /// How malformed byte sequences are reported.
    ///
    /// # Default
    ///
    /// [`DecodeMode::Strict`]
    pub mode: DecodeMode,

    #[cfg(any(test, feature = "fuzzing"))]
    #[cfg_attr(feature = "serde", serde(skip))]
    /// Panic on decode errors instead of returning them.
    ///
    /// Enabled only in test builds to produce backtraces on decode failures.
    pub panic_on_error: bool,
}

/// Policy applied when a byte sequence is not well-formed UTF-8.
///
/// Real-world decoders diverge here, so the choice is an explicit option
/// rather than a library default the caller has to guess at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecodeMode {
    /// The first malformed character aborts the whole decode.
    ///
    /// The caller receives a [`DecodeError`] naming the error kind and the
    /// byte offset of the offending lead byte, and no partial output.
    ///
    /// [`DecodeError`]: crate::DecodeError
    Strict,
    /// Each malformed character becomes U+FFFD and decoding continues.
    ///
    /// One replacement is emitted per malformed character attempt: the lead
    /// byte plus every continuation byte accepted before the failure,
    /// bounded by the end of input. Scanning resumes at the first unconsumed
    /// byte, so a byte that failed the continuation test is re-examined as a
    /// lead. In this mode decoding never fails.
    Replace,
}

impl Default for DecodeMode {
    fn default() -> Self {
        Self::Strict
    }
}
