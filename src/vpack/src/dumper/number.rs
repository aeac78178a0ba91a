//! Integer and floating-point formatting.
//!
//! # 4.3 Dispatch table — Int/UInt/SmallInt, Double
//!
//! Rust's own integer `Display` already produces the canonical decimal form the reference
//! implementation hand-rolls digit-by-digit to dodge C++ UB on negating `INT64_MIN` — `i64`'s
//! formatter has no such problem, so this crate just uses it. Doubles go through `ryu` for a
//! shortest-round-trip decimal, which is the concrete algorithm class §4.3 names.

use crate::error::{Error, Result};
use crate::sink::Sink;
use crate::slice::Slice;
use crate::value_type::ValueType;

pub(super) fn append_integer(sink: &mut dyn Sink, slice: Slice<'_>) -> Result<()> {
    match slice.kind()? {
        ValueType::SmallInt => append_i64(sink, slice.get_small_int()?),
        ValueType::Int => append_i64(sink, slice.get_int()?),
        ValueType::UInt => append_u64(sink, slice.get_uint()?),
        other => {
            return Err(Error::InvalidType {
                expected: "Int, UInt or SmallInt",
                actual: other,
            })
        }
    }
    Ok(())
}

fn append_i64(sink: &mut dyn Sink, value: i64) {
    let text = value.to_string();
    sink.append(text.as_bytes());
}

fn append_u64(sink: &mut dyn Sink, value: u64) {
    let text = value.to_string();
    sink.append(text.as_bytes());
}

pub(super) fn append_double(sink: &mut dyn Sink, value: f64) {
    let mut buffer = ryu::Buffer::new();
    sink.append(buffer.format(value).as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::VecSink;

    #[test]
    fn i64_min_is_exact() {
        let mut sink = VecSink::new();
        append_i64(&mut sink, i64::MIN);
        assert_eq!(sink.as_str(), "-9223372036854775808");
    }

    #[test]
    fn u64_max_is_exact() {
        let mut sink = VecSink::new();
        append_u64(&mut sink, u64::MAX);
        assert_eq!(sink.as_str(), "18446744073709551615");
    }

    #[test]
    fn double_round_trips() {
        let mut sink = VecSink::new();
        append_double(&mut sink, 1.5);
        assert_eq!(sink.as_str(), "1.5");
    }
}
