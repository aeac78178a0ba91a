//! # 4.2 Sink
//!
//! A `Sink` is a monotonically growing byte stream the dumper writes into. It never reorders
//! or drops writes, so the dumper's output is byte-identical no matter which `Sink`
//! implementation backs it.

use std::io::Write;

/// An append-only byte stream.
///
/// A `Sink` has no channel back to the dumper for reporting a partial write, so an
/// implementation backed by a fallible writer (see [`WriteSink`]) treats a write failure as a
/// fatal resource condition and panics rather than silently truncating output.
pub trait Sink {
    /// Append a single byte.
    fn push_back(&mut self, byte: u8);

    /// Append a run of bytes.
    fn append(&mut self, bytes: &[u8]);

    /// Advisory capacity hint. Implementations may ignore this; it must never truncate
    /// existing content.
    fn reserve(&mut self, additional: usize);

    /// Current contents, if the backing store supports being read back (an in-memory sink
    /// does; a pure streaming writer does not and returns `None`).
    fn as_bytes(&self) -> Option<&[u8]>;

    /// Number of bytes written so far.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An in-memory `Sink` backed by a growable `Vec<u8>`.
#[derive(Debug, Default, Clone)]
pub struct VecSink {
    buffer: Vec<u8>,
}

impl VecSink {
    pub fn new() -> VecSink {
        VecSink::default()
    }

    pub fn with_capacity(capacity: usize) -> VecSink {
        VecSink {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Consume the sink, returning its accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Borrow the accumulated bytes as a `&str`. Panics if the dumper ever wrote non-UTF-8
    /// output, which would itself be a bug in this crate since JSON/VJSON output is always
    /// valid UTF-8 (§6).
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.buffer).expect("dumper output must be valid UTF-8")
    }
}

impl Sink for VecSink {
    fn push_back(&mut self, byte: u8) {
        self.buffer.push(byte);
    }

    fn append(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    fn reserve(&mut self, additional: usize) {
        self.buffer.reserve(additional);
    }

    fn as_bytes(&self) -> Option<&[u8]> {
        Some(&self.buffer)
    }

    fn len(&self) -> usize {
        self.buffer.len()
    }
}

/// Adapts any [`std::io::Write`] into a `Sink`, for streaming dumper output straight to a
/// file or socket instead of buffering it in memory first.
pub struct WriteSink<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> WriteSink<W> {
    pub fn new(writer: W) -> WriteSink<W> {
        WriteSink { writer, written: 0 }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for WriteSink<W> {
    fn push_back(&mut self, byte: u8) {
        self.append(&[byte]);
    }

    fn append(&mut self, bytes: &[u8]) {
        self.writer
            .write_all(bytes)
            .unwrap_or_else(|e| panic!("WriteSink::append: underlying writer failed: {e}"));
        self.written += bytes.len();
    }

    fn reserve(&mut self, _additional: usize) {
        // No capacity concept for an arbitrary `Write`; nothing to do.
    }

    fn as_bytes(&self) -> Option<&[u8]> {
        None
    }

    fn len(&self) -> usize {
        self.written
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_accumulates() {
        let mut sink = VecSink::new();
        sink.push_back(b'[');
        sink.append(b"1,2");
        sink.push_back(b']');
        assert_eq!(sink.as_str(), "[1,2]");
        assert_eq!(sink.len(), 5);
    }

    #[test]
    fn write_sink_forwards_to_writer() {
        let mut buf = Vec::new();
        {
            let mut sink = WriteSink::new(&mut buf);
            sink.append(b"hello");
            sink.push_back(b'!');
            assert_eq!(sink.len(), 6);
        }
        assert_eq!(buf, b"hello!");
    }
}
