#![no_main]
use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use rand::rngs::SmallRng; // deterministic per-input splits
use rand::{Rng, SeedableRng};
use ucsmodem::{
    DecodeMode, DecoderOptions, MAX_SCALAR, StreamingDecoder, Utf8Decoder, decode, decode_lossy,
    encode, validate,
};

const HEADER: usize = 5; // 1 flag + 4-byte split seed

fn is_valid_scalar(value: u32) -> bool {
    value <= MAX_SCALAR && !(0xD800..=0xDFFF).contains(&value)
}

/// Split `bytes` into chunks using a deterministic random value.
///
/// Unlike a text splitter this may cut through the middle of a character;
/// the streaming decoder must cope with any byte boundary.
fn split_into_chunks(bytes: &[u8], split_seed: u64) -> Vec<&[u8]> {
    let mut rng = SmallRng::seed_from_u64(split_seed);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < bytes.len() {
        let size = rng.random_range(1..=bytes.len() - start);
        chunks.push(&bytes[start..start + size]);
        start += size;
    }

    chunks
}

fn check(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let split_seed = u64::from(u32::from_le_bytes(data[1..5].try_into().unwrap()));
    let payload = &data[HEADER..];

    // Half the flag space synthesizes well-formed input from the payload so
    // the accepting paths and the round-trip law get as much attention as
    // the rejection paths.
    let bytes: Vec<u8> = if flags & 1 != 0 {
        let mut u = Unstructured::new(payload);
        let chars = Vec::<char>::arbitrary(&mut u).unwrap_or_default();
        let scalars: Vec<u32> = chars.into_iter().map(u32::from).collect();
        encode(&scalars).expect("chars are valid scalars")
    } else {
        payload.to_vec()
    };

    // Strict decoding accepts exactly what core::str accepts, reports the
    // same valid prefix on rejection, and round-trips on acceptance.
    match (decode(&bytes), core::str::from_utf8(&bytes)) {
        (Ok(scalars), Ok(text)) => {
            assert!(scalars.iter().copied().eq(text.chars().map(u32::from)));
            assert_eq!(encode(&scalars).unwrap(), bytes);
            assert!(validate(&bytes).is_ok());
        }
        (Err(err), Err(core_err)) => {
            assert_eq!(err.offset, core_err.valid_up_to());
            assert!(validate(&bytes).is_err());
        }
        (ours, theirs) => panic!("validity disagreement: {ours:?} vs {theirs:?}"),
    }

    // Replace mode is total and never emits an invalid scalar.
    let lossy = decode_lossy(&bytes);
    assert!(lossy.len() <= bytes.len());
    assert!(lossy.iter().all(|&value| is_valid_scalar(value)));

    // Chunked decoding equals one-shot decoding in both modes.
    for mode in [DecodeMode::Strict, DecodeMode::Replace] {
        let options = DecoderOptions {
            mode,
            ..Default::default()
        };
        let one_shot = Utf8Decoder::new(options).decode(&bytes);

        let mut decoder = StreamingDecoder::new(options);
        let mut streamed = Vec::new();
        let mut failed = None;
        for chunk in split_into_chunks(&bytes, split_seed) {
            match decoder.feed(chunk) {
                Ok(scalars) => streamed.extend(scalars),
                Err(err) => {
                    failed = Some(err);
                    break;
                }
            }
        }
        if failed.is_none() {
            match decoder.finish() {
                Ok(scalars) => streamed.extend(scalars),
                Err(err) => failed = Some(err),
            }
        }

        match (one_shot, failed) {
            (Ok(expected), None) => assert_eq!(streamed, expected),
            (Err(expected), Some(err)) => assert_eq!(err, expected),
            (one_shot, failed) => panic!("streaming mismatch: {one_shot:?} vs {failed:?}"),
        }
    }
}

fuzz_target!(|data: &[u8]| check(data));
