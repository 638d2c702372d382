use alloc::{string::String, vec::Vec};

use quickcheck::QuickCheck;

use crate::{MAX_SCALAR, ScalarValue, decode, decode_lossy, encode, validate};

fn test_count() -> u64 {
    if is_ci::cached() { 10_000 } else { 1_000 }
}

/// Property: strict decoding of any valid UTF-8 string matches the
/// language's own notion of its characters, and re-encoding reproduces the
/// original bytes exactly.
#[test]
fn valid_utf8_roundtrip_quickcheck() {
    fn prop(text: String) -> bool {
        let bytes = text.as_bytes();
        let Ok(scalars) = decode(bytes) else {
            return false;
        };
        let expected: Vec<ScalarValue> = text.chars().map(ScalarValue::from).collect();
        scalars == expected && encode(&scalars).as_deref() == Ok(bytes) && validate(bytes).is_ok()
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(String) -> bool);
}

/// Property: strict decoding accepts exactly the inputs `core::str` accepts,
/// and reports the same length of valid prefix on rejection.
#[test]
fn strict_agrees_with_core_quickcheck() {
    fn prop(bytes: Vec<u8>) -> bool {
        match (decode(&bytes), core::str::from_utf8(&bytes)) {
            (Ok(scalars), Ok(text)) => scalars.iter().copied().eq(text.chars().map(u32::from)),
            (Err(err), Err(core_err)) => err.offset == core_err.valid_up_to(),
            _ => false,
        }
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Vec<u8>) -> bool);
}

/// Property: replace-mode decoding is total, never yields an invalid scalar
/// value, and never yields more scalars than input bytes.
#[test]
fn lossy_invariants_quickcheck() {
    fn valid_scalar(value: ScalarValue) -> bool {
        value <= MAX_SCALAR && !(0xD800..=0xDFFF).contains(&value)
    }

    fn prop(bytes: Vec<u8>) -> bool {
        let scalars = decode_lossy(&bytes);
        scalars.len() <= bytes.len() && scalars.iter().all(|&value| valid_scalar(value))
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Vec<u8>) -> bool);
}

/// Property: on well-formed input the decoder agrees with `bstr`'s decoder
/// character by character.
#[test]
fn differential_against_bstr_quickcheck() {
    fn prop(text: String) -> bool {
        let mut bytes = text.as_bytes();
        let Ok(scalars) = decode(text.as_bytes()) else {
            return false;
        };
        let mut scalars = scalars.into_iter();
        while !bytes.is_empty() {
            let (ch, len) = bstr::decode_utf8(bytes);
            match (ch, scalars.next()) {
                (Some(ch), Some(scalar)) if ScalarValue::from(ch) == scalar => {}
                _ => return false,
            }
            bytes = &bytes[len..];
        }
        scalars.next().is_none()
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(String) -> bool);
}

/// Property: ASCII bytes decode to themselves, one scalar per byte.
#[test]
fn ascii_identity_quickcheck() {
    fn prop(bytes: Vec<u8>) -> bool {
        let ascii: Vec<u8> = bytes.iter().map(|byte| byte & 0x7F).collect();
        let Ok(scalars) = decode(&ascii) else {
            return false;
        };
        scalars.iter().copied().eq(ascii.iter().copied().map(ScalarValue::from))
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Vec<u8>) -> bool);
}
