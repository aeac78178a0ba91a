//! End-to-end scenarios from `SPEC_FULL.md` §8, exercised against hand-assembled VPack byte
//! buffers (this crate builds no VPack documents itself — see §1 Non-goals — so fixtures here
//! are plain byte literals, the way the reference test suite's C++ counterpart hand-assembles
//! `Builder` output instead of reading it back from a real-world `.vpack` file).

use crate::dumper::{DumpTarget, Dumper};
use crate::options::{Options, UnsupportedTypeBehavior};
use crate::sink::VecSink;
use crate::slice::Slice;
use crate::value_type::*;

fn small_int(v: i64) -> Vec<u8> {
    vec![(HEAD_SMALL_INT_BASE as i64 + (v - SMALL_INT_MIN)) as u8]
}

fn uint(width: u8, v: u64) -> Vec<u8> {
    let mut buf = vec![HEAD_UINT_BASE + width - 1];
    buf.extend_from_slice(&v.to_le_bytes()[..width as usize]);
    buf
}

fn int(width: u8, v: i64) -> Vec<u8> {
    let mut buf = vec![HEAD_INT_BASE + width - 1];
    buf.extend_from_slice(&v.to_le_bytes()[..width as usize]);
    buf
}

fn double(v: f64) -> Vec<u8> {
    let mut buf = vec![HEAD_DOUBLE];
    buf.extend_from_slice(&v.to_le_bytes());
    buf
}

fn short_string(s: &str) -> Vec<u8> {
    assert!(s.len() <= STRING_SHORT_MAX_LEN as usize);
    let mut buf = vec![HEAD_STRING_SHORT_BASE + s.len() as u8];
    buf.extend_from_slice(s.as_bytes());
    buf
}

fn binary(bytes: &[u8]) -> Vec<u8> {
    let mut buf = vec![HEAD_BINARY_BASE]; // width 1
    buf.push(bytes.len() as u8);
    buf.extend_from_slice(bytes);
    buf
}

fn utc_date(millis: i64) -> Vec<u8> {
    let mut buf = vec![HEAD_UTC_DATE];
    buf.extend_from_slice(&millis.to_le_bytes());
    buf
}

/// Assemble an indexed array (or, with `is_array = false`, an indexed object whose "elements"
/// are each a pre-concatenated key+value pair) using a 1-byte index table, which is all these
/// small fixtures ever need.
fn indexed_container(is_array: bool, elements: &[Vec<u8>]) -> Vec<u8> {
    const HEADER_LEN: usize = 17;
    let mut payload = Vec::new();
    let mut offsets = Vec::new();
    for element in elements {
        offsets.push((HEADER_LEN + payload.len()) as u8);
        payload.extend_from_slice(element);
    }
    let count = elements.len() as u64;
    let total_len = (HEADER_LEN + payload.len() + offsets.len()) as u64;

    let mut buf = vec![if is_array {
        HEAD_ARRAY_INDEXED_BASE // width = 1
    } else {
        HEAD_OBJECT_INDEXED_BASE
    }];
    buf.extend_from_slice(&total_len.to_le_bytes());
    buf.extend_from_slice(&count.to_le_bytes());
    buf.extend_from_slice(&payload);
    buf.extend_from_slice(&offsets);
    buf
}

/// Assemble an equal-size array (or, with `is_array = false`, an equal-size object) with no
/// tail index table — every entry occupies the same number of bytes, so `entry_offset` derives
/// each one's position from a stride instead of looking it up.
fn equal_size_container(is_array: bool, elements: &[Vec<u8>]) -> Vec<u8> {
    const HEADER_LEN: usize = 17;
    let stride = elements[0].len();
    assert!(
        elements.iter().all(|e| e.len() == stride),
        "equal-size container requires every entry to share one byte length"
    );

    let count = elements.len() as u64;
    let total_len = (HEADER_LEN + stride * elements.len()) as u64;

    let mut buf = vec![if is_array {
        HEAD_ARRAY_EQUAL_SIZE
    } else {
        HEAD_OBJECT_EQUAL_SIZE
    }];
    buf.extend_from_slice(&total_len.to_le_bytes());
    buf.extend_from_slice(&count.to_le_bytes());
    for element in elements {
        buf.extend_from_slice(element);
    }
    buf
}

fn array(elements: &[Vec<u8>]) -> Vec<u8> {
    if elements.is_empty() {
        vec![HEAD_ARRAY_EMPTY]
    } else {
        indexed_container(true, elements)
    }
}

fn object(pairs: &[(&str, Vec<u8>)]) -> Vec<u8> {
    if pairs.is_empty() {
        vec![HEAD_OBJECT_EMPTY]
    } else {
        let entries: Vec<Vec<u8>> = pairs
            .iter()
            .map(|(k, v)| {
                let mut entry = short_string(k);
                entry.extend_from_slice(v);
                entry
            })
            .collect();
        indexed_container(false, &entries)
    }
}

fn dump_json_with(bytes: &[u8], options: &Options) -> String {
    let mut sink = VecSink::new();
    Dumper::new(options, &mut sink)
        .dump(Slice::from_bytes(bytes))
        .unwrap();
    sink.as_str().to_string()
}

fn dump_vjson_with(bytes: &[u8], options: &Options) -> String {
    let mut sink = VecSink::new();
    Dumper::with_target(options, &mut sink, DumpTarget::VJson)
        .dump(Slice::from_bytes(bytes))
        .unwrap();
    sink.as_str().to_string()
}

// Set environment to something like:
// RUST_LOG=vpack=trace cargo test
fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn scenario_small_ints() {
    init();
    let options = Options::default();
    assert_eq!(dump_json_with(&small_int(0), &options), "0");
    assert_eq!(dump_json_with(&small_int(-1), &options), "-1");
    assert_eq!(dump_json_with(&small_int(9), &options), "9");
}

#[test]
fn scenario_integer_extremes() {
    init();
    let options = Options::default();
    assert_eq!(
        dump_json_with(&int(8, i64::MIN), &options),
        "-9223372036854775808"
    );
    assert_eq!(
        dump_json_with(&uint(8, u64::MAX), &options),
        "18446744073709551615"
    );
}

#[test]
fn scenario_double_policies() {
    init();
    assert_eq!(dump_json_with(&double(1.5), &Options::default()), "1.5");

    let fail = Options::new().unsupported_type_behavior(UnsupportedTypeBehavior::FailOnUnsupported);
    let mut sink = VecSink::new();
    let err = Dumper::new(&fail, &mut sink)
        .dump(Slice::from_bytes(&double(f64::NAN)))
        .unwrap_err();
    assert!(matches!(err, crate::Error::NoJsonEquivalent { .. }));

    let nullify =
        Options::new().unsupported_type_behavior(UnsupportedTypeBehavior::NullifyUnsupported);
    assert_eq!(dump_json_with(&double(f64::NAN), &nullify), "null");
}

#[test]
fn scenario_object_preserves_insertion_order() {
    init();
    let bytes = object(&[("b", small_int(1)), ("a", small_int(2))]);

    assert_eq!(dump_json_with(&bytes, &Options::default()), r#"{"b":1,"a":2}"#);

    let pretty = Options::new().pretty_print(true);
    assert_eq!(
        dump_json_with(&bytes, &pretty),
        "{\n  \"b\" : 1,\n  \"a\" : 2\n}"
    );
}

#[test]
fn scenario_equal_size_array_round_trip() {
    init();
    let bytes = equal_size_container(true, &[small_int(1), small_int(2), small_int(3)]);
    let slice = Slice::from_bytes(&bytes);

    assert_eq!(slice.array_length().unwrap(), 3);
    assert_eq!(slice.at(0).unwrap().get_small_int().unwrap(), 1);
    assert_eq!(slice.at(2).unwrap().get_small_int().unwrap(), 3);
    assert_eq!(dump_json_with(&bytes, &Options::default()), "[1,2,3]");
}

#[test]
fn scenario_equal_size_object_round_trip() {
    init();
    // Each entry is key + value, both 1 byte long, so every entry is the same 3-byte stride.
    let bytes = equal_size_container(
        false,
        &[
            [short_string("a"), small_int(1)].concat(),
            [short_string("b"), small_int(2)].concat(),
        ],
    );
    let slice = Slice::from_bytes(&bytes);

    assert_eq!(slice.object_length().unwrap(), 2);
    assert_eq!(slice.key_at(0).unwrap().get_string().unwrap(), b"a");
    assert_eq!(slice.value_at(1).unwrap().get_small_int().unwrap(), 2);
    assert_eq!(
        dump_json_with(&bytes, &Options::default()),
        r#"{"a":1,"b":2}"#
    );
}

#[test]
fn scenario_empty_containers() {
    init();
    let options = Options::default();
    assert_eq!(dump_json_with(&array(&[]), &options), "[]");
    assert_eq!(dump_json_with(&object(&[]), &options), "{}");

    let pretty = Options::new().pretty_print(true);
    assert_eq!(dump_json_with(&array(&[]), &pretty), "[]");
    assert_eq!(dump_json_with(&object(&[]), &pretty), "{}");
}

#[test]
fn scenario_binary_vjson_is_unpadded_base64() {
    init();
    let bytes = binary(&[0x00, 0xff]);
    assert_eq!(dump_vjson_with(&bytes, &Options::default()), "\"b:AP8\"");
}

#[test]
fn scenario_utc_date_vjson() {
    init();
    let bytes = utc_date(0);
    assert_eq!(
        dump_vjson_with(&bytes, &Options::default()),
        "\"d:1970-01-01T00:00:00.000Z\""
    );
}

#[test]
fn scenario_nested_array_of_objects_compact_and_pretty() {
    init();
    let inner = object(&[("k", short_string("v"))]);
    let bytes = array(&[inner.clone(), small_int(3)]);

    assert_eq!(
        dump_json_with(&bytes, &Options::default()),
        r#"[{"k":"v"},3]"#
    );

    let pretty = Options::new().pretty_print(true);
    assert_eq!(
        dump_json_with(&bytes, &pretty),
        "[\n  {\n    \"k\" : \"v\"\n  },\n  3\n]"
    );
}

#[test]
fn scenario_unsupported_type_in_vjson_mode_is_still_tagged() {
    init();
    // Binary nested inside an array dumped in VJSON mode should still pick up the `b:` tag
    // rather than falling through to `handle_unsupported_type`.
    let bytes = array(&[binary(&[1, 2, 3])]);
    assert_eq!(dump_vjson_with(&bytes, &Options::default()), "[\"b:AQID\"]");
}

#[test]
fn scenario_need_custom_type_handler() {
    init();
    let bytes = vec![HEAD_CUSTOM, 1, 0, 0, 0, 0, 0, 0, 0, 0xaa];
    let mut sink = VecSink::new();
    let err = Dumper::new(&Options::default(), &mut sink)
        .dump(Slice::from_bytes(&bytes))
        .unwrap_err();
    assert!(matches!(err, crate::Error::NeedCustomTypeHandler));
}

#[test]
fn scenario_bcd_is_not_implemented() {
    init();
    let bytes = vec![HEAD_BCD, 0, 0, 0, 0, 0, 0, 0, 0];
    let mut sink = VecSink::new();
    let err = Dumper::new(&Options::default(), &mut sink)
        .dump(Slice::from_bytes(&bytes))
        .unwrap_err();
    assert!(matches!(err, crate::Error::NotImplemented));
}

#[test]
fn scenario_array_index_out_of_bounds() {
    init();
    let bytes = array(&[small_int(1)]);
    let slice = Slice::from_bytes(&bytes);
    let err = slice.at(1).unwrap_err();
    assert!(matches!(err, crate::Error::IndexOutOfBounds { index: 1, length: 1 }));
}

#[test]
fn scenario_external_dereferences_transparently() {
    init();
    // Buffer layout: [0] external pointing at offset 9, [1..9] unused padding,
    // [9] the SmallInt(5) it points to.
    let mut bytes = vec![HEAD_EXTERNAL];
    bytes.extend_from_slice(&9u64.to_le_bytes());
    bytes.extend_from_slice(&small_int(5));
    assert_eq!(dump_json_with(&bytes, &Options::default()), "5");
}

#[test]
fn scenario_compact_output_has_no_whitespace_outside_strings() {
    init();
    let bytes = object(&[("a", array(&[small_int(1), small_int(2)]))]);
    let text = dump_json_with(&bytes, &Options::default());
    assert!(!text.contains(' '));
    assert!(!text.contains('\n'));
}
