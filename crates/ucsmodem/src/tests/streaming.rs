use alloc::{vec, vec::Vec};

use quickcheck::QuickCheck;

use crate::{
    DecodeError, DecodeMode, DecoderOptions, ErrorKind, ScalarValue, StreamingDecoder,
    Utf8Decoder, decode,
};

fn options(mode: DecodeMode) -> DecoderOptions {
    DecoderOptions {
        mode,
        ..Default::default()
    }
}

/// Runs `chunks` through a streaming decoder, concatenating the outputs.
fn run_chunked(
    mode: DecodeMode,
    chunks: &[&[u8]],
) -> Result<Vec<ScalarValue>, DecodeError> {
    let mut decoder = StreamingDecoder::new(options(mode));
    let mut out = Vec::new();
    for chunk in chunks {
        out.extend(decoder.feed(chunk)?);
    }
    out.extend(decoder.finish()?);
    Ok(out)
}

#[test]
fn character_split_across_feeds() {
    let mut decoder = StreamingDecoder::new(options(DecodeMode::Strict));
    assert_eq!(decoder.feed(&[0xF0, 0x9F]).unwrap(), vec![]);
    assert_eq!(decoder.feed(&[0x98]).unwrap(), vec![]);
    assert_eq!(decoder.feed(&[0x80, 0x21]).unwrap(), vec![0x1F600, 0x21]);
    assert_eq!(decoder.finish().unwrap(), vec![]);
}

#[test]
fn one_byte_feeds_match_one_shot() {
    let text = "héllo, 世界 😀";
    let chunks: Vec<&[u8]> = text.as_bytes().chunks(1).collect();
    assert_eq!(
        run_chunked(DecodeMode::Strict, &chunks).unwrap(),
        decode(text.as_bytes()).unwrap()
    );
}

#[test]
fn every_two_way_split_matches_one_shot() {
    let bytes = "a€😀\u{0}b".as_bytes();
    let expected = decode(bytes).unwrap();
    for split in 0..=bytes.len() {
        let (head, tail) = bytes.split_at(split);
        assert_eq!(
            run_chunked(DecodeMode::Strict, &[head, tail]).unwrap(),
            expected,
            "split at {split}"
        );
    }
}

#[test]
fn pending_bytes_are_not_counted_until_complete() {
    let mut decoder = StreamingDecoder::new(options(DecodeMode::Strict));
    decoder.feed(&[0x41, 0xE2]).unwrap();
    assert_eq!(decoder.position(), 1);
    decoder.feed(&[0x82, 0xAC]).unwrap();
    assert_eq!(decoder.position(), 4);
}

#[test]
fn truncation_is_only_reported_at_finish() {
    let mut decoder = StreamingDecoder::new(options(DecodeMode::Strict));
    assert_eq!(decoder.feed(&[0xE2, 0x82]).unwrap(), vec![]);
    assert_eq!(
        decoder.finish().unwrap_err(),
        DecodeError {
            kind: ErrorKind::TruncatedSequence {
                expected: 3,
                found: 2,
            },
            offset: 0,
        }
    );
}

#[test]
fn replace_flushes_pending_as_one_replacement() {
    let mut decoder = StreamingDecoder::new(options(DecodeMode::Replace));
    assert_eq!(decoder.feed(&[0x41, 0xE2, 0x82]).unwrap(), vec![0x41]);
    assert_eq!(decoder.finish().unwrap(), vec![0xFFFD]);
}

#[test]
fn error_offsets_are_absolute_across_feeds() {
    let mut decoder = StreamingDecoder::new(options(DecodeMode::Strict));
    decoder.feed(b"AB").unwrap();
    let err = decoder.feed(&[0xFF]).unwrap_err();
    assert_eq!(
        err,
        DecodeError {
            kind: ErrorKind::InvalidLeadByte { byte: 0xFF },
            offset: 2,
        }
    );
}

#[test]
fn error_offset_names_the_lead_of_a_split_character() {
    let mut decoder = StreamingDecoder::new(options(DecodeMode::Strict));
    decoder.feed(b"hi").unwrap();
    decoder.feed(&[0xE2]).unwrap();
    let err = decoder.feed(&[0x41]).unwrap_err();
    assert_eq!(
        err,
        DecodeError {
            kind: ErrorKind::InvalidContinuationByte { byte: 0x41 },
            offset: 2,
        }
    );
}

#[test]
fn strict_error_wedges_the_decoder() {
    let mut decoder = StreamingDecoder::new(options(DecodeMode::Strict));
    let err = decoder.feed(&[0xFF]).unwrap_err();
    assert_eq!(decoder.feed(b"still fine bytes").unwrap_err(), err);
    assert_eq!(decoder.finish().unwrap_err(), err);
}

#[test]
fn replace_resyncs_on_a_lead_byte_from_the_next_chunk() {
    // The byte that fails the continuation test opens the next character.
    assert_eq!(
        run_chunked(DecodeMode::Replace, &[&[0xE2, 0x82], &[0xC2, 0xA3]]).unwrap(),
        vec![0xFFFD, 0xA3]
    );
    // An overlong pair completed by the second chunk is one replacement.
    assert_eq!(
        run_chunked(DecodeMode::Replace, &[&[0xC0], &[0x80]]).unwrap(),
        vec![0xFFFD]
    );
}

#[test]
fn finish_without_input_is_empty() {
    let decoder = StreamingDecoder::new(options(DecodeMode::Strict));
    assert_eq!(decoder.finish().unwrap(), vec![]);
}

/// Property: for any byte sequence, any chunking of it, and either mode, the
/// streaming decoder produces exactly the one-shot result — the same scalars
/// or the same error.
#[test]
fn chunked_equivalence_quickcheck() {
    fn prop(bytes: Vec<u8>, splits: Vec<usize>, replace: bool) -> bool {
        let mode = if replace {
            DecodeMode::Replace
        } else {
            DecodeMode::Strict
        };
        let one_shot = Utf8Decoder::new(options(mode)).decode(&bytes);

        let mut decoder = StreamingDecoder::new(options(mode));
        let mut streamed = Vec::new();
        let mut failed = None;
        let mut start = 0;
        for split in splits {
            if start >= bytes.len() || failed.is_some() {
                break;
            }
            let take = 1 + split % (bytes.len() - start);
            match decoder.feed(&bytes[start..start + take]) {
                Ok(scalars) => streamed.extend(scalars),
                Err(err) => failed = Some(err),
            }
            start += take;
        }
        if failed.is_none() {
            match decoder.feed(&bytes[start..]) {
                Ok(scalars) => streamed.extend(scalars),
                Err(err) => failed = Some(err),
            }
        }
        if failed.is_none() {
            match decoder.finish() {
                Ok(scalars) => streamed.extend(scalars),
                Err(err) => failed = Some(err),
            }
        }

        match (one_shot, failed) {
            (Ok(expected), None) => streamed == expected,
            (Err(expected), Some(err)) => err == expected,
            _ => false,
        }
    }

    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(Vec<u8>, Vec<usize>, bool) -> bool);
}
