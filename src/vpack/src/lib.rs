//! Walks VPack binary documents — a self-describing, type-tagged, length-prefixed tree format
//! conceptually similar to BSON — and dumps them as JSON or the tagged VJSON dialect.
//!
//! The engineering core is the [`Slice`] cursor (a zero-copy read view over one VPack value)
//! and the [`Dumper`] that recursively walks a `Slice` tree, writing through a [`Sink`]. This
//! crate builds no new VPack documents and does not parse JSON back into VPack (see
//! `SPEC_FULL.md` §1 Non-goals); it only reads and renders.

mod dumper;
mod error;
mod options;
#[cfg(test)]
mod scenario_tests;
mod sink;
mod slice;
mod value_type;

pub use dumper::{DumpTarget, Dumper};
pub use error::{Error, Result};
pub use options::{CustomTypeHandler, Options, UnsupportedTypeBehavior};
pub use sink::{Sink, VecSink, WriteSink};
pub use slice::Slice;
pub use value_type::ValueType;

/// Dump `root` as compact or pretty JSON, per `options`, returning the rendered text.
///
/// Convenience wrapper around [`Dumper::new`] for the common case of dumping one value into a
/// fresh in-memory buffer.
pub fn dump_json(root: Slice<'_>, options: &Options) -> Result<String> {
    let mut sink = VecSink::new();
    Dumper::new(options, &mut sink).dump(root)?;
    Ok(String::from_utf8(sink.into_bytes()).expect("dumper output must be valid UTF-8"))
}

/// Dump `root` as VJSON, per `options`, returning the rendered text.
pub fn dump_vjson(root: Slice<'_>, options: &Options) -> Result<String> {
    let mut sink = VecSink::new();
    Dumper::new_vjson(options, &mut sink).dump(root)?;
    Ok(String::from_utf8(sink.into_bytes()).expect("dumper output must be valid UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_json_smoke_test() {
        use crate::value_type::{HEAD_SMALL_INT_BASE, SMALL_INT_MIN};

        let head = (HEAD_SMALL_INT_BASE as i64 + (1 - SMALL_INT_MIN)) as u8;
        let buf = [head];
        let text = dump_json(Slice::from_bytes(&buf), &Options::default()).unwrap();
        assert_eq!(text, "1");
    }
}
