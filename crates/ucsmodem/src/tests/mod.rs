mod property_roundtrip;
mod streaming;
