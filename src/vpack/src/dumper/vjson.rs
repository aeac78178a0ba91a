//! # 4.4 VJSON Dumper
//!
//! Renders the four otherwise-unrepresentable types as tagged string literals: `"s:..."`,
//! `"d:..."`, `"b:..."`, `"c:..."`.

use chrono::DateTime;

use super::escape;
use crate::error::{Error, Result};
use crate::options::Options;
use crate::sink::Sink;

const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

pub(super) fn dump_string(sink: &mut dyn Sink, bytes: &[u8], options: &Options) -> Result<()> {
    sink.reserve(3 + bytes.len());
    sink.append(b"\"s:");
    escape::dump_string(sink, bytes, options)?;
    sink.push_back(b'"');
    Ok(())
}

pub(super) fn dump_utc_date(sink: &mut dyn Sink, millis: i64) -> Result<()> {
    let timestamp = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        Error::InternalError(format!("UTCDate millisecond value {millis} is out of range"))
    })?;
    sink.reserve(4 + 24);
    sink.append(b"\"d:");
    let formatted = timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string();
    sink.append(formatted.as_bytes());
    sink.push_back(b'"');
    Ok(())
}

pub(super) fn dump_binary(sink: &mut dyn Sink, bytes: &[u8]) {
    sink.reserve(4 + (4 * bytes.len() / 3));
    sink.append(b"\"b:");
    base64_encode(sink, bytes);
    sink.push_back(b'"');
}

pub(super) fn dump_custom(sink: &mut dyn Sink, bytes: &[u8]) {
    sink.reserve(4 + (4 * bytes.len() / 3));
    sink.append(b"\"c:");
    base64_encode(sink, bytes);
    sink.push_back(b'"');
}

/// Unpadded base64: a trailing 1-byte group emits 2 characters, a trailing 2-byte group emits
/// 3, and the `=` padding character never appears (§4.4 worked example: `0x00 0xFF` -> `AP8`).
fn base64_encode(sink: &mut dyn Sink, bytes: &[u8]) {
    let mut chunks = bytes.chunks_exact(3);
    for chunk in &mut chunks {
        let n = ((chunk[0] as u32) << 16) | ((chunk[1] as u32) << 8) | chunk[2] as u32;
        sink.push_back(BASE64_ALPHABET[((n >> 18) & 0x3f) as usize]);
        sink.push_back(BASE64_ALPHABET[((n >> 12) & 0x3f) as usize]);
        sink.push_back(BASE64_ALPHABET[((n >> 6) & 0x3f) as usize]);
        sink.push_back(BASE64_ALPHABET[(n & 0x3f) as usize]);
    }

    match chunks.remainder() {
        [] => {}
        [b0] => {
            let n = (*b0 as u32) << 16;
            sink.push_back(BASE64_ALPHABET[((n >> 18) & 0x3f) as usize]);
            sink.push_back(BASE64_ALPHABET[((n >> 12) & 0x3f) as usize]);
        }
        [b0, b1] => {
            let n = ((*b0 as u32) << 16) | ((*b1 as u32) << 8);
            sink.push_back(BASE64_ALPHABET[((n >> 18) & 0x3f) as usize]);
            sink.push_back(BASE64_ALPHABET[((n >> 12) & 0x3f) as usize]);
            sink.push_back(BASE64_ALPHABET[((n >> 6) & 0x3f) as usize]);
        }
        _ => unreachable!("chunks_exact(3) remainder is always shorter than 3"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::VecSink;

    #[test]
    fn binary_base64_is_unpadded() {
        let mut sink = VecSink::new();
        dump_binary(&mut sink, &[0x00, 0xff]);
        assert_eq!(sink.as_str(), "\"b:AP8\"");
    }

    #[test]
    fn empty_binary_is_empty_body() {
        let mut sink = VecSink::new();
        dump_binary(&mut sink, &[]);
        assert_eq!(sink.as_str(), "\"b:\"");
    }

    #[test]
    fn epoch_date_formats_as_iso8601() {
        let mut sink = VecSink::new();
        dump_utc_date(&mut sink, 0).unwrap();
        assert_eq!(sink.as_str(), "\"d:1970-01-01T00:00:00.000Z\"");
    }
}
