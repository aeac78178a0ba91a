use thiserror::Error as ThisError;

use crate::value_type::ValueType;

/// Errors raised while decoding a [`Slice`](crate::Slice) or dumping it to JSON/VJSON.
///
/// All decode and dump entry points return `Result<_, Error>`; there is no panic path for
/// malformed *input*. A `Sink` that fails to grow is a programmer-error contract violation
/// and is reported separately (see [`crate::sink::Sink`]).
#[derive(Debug, ThisError)]
pub enum Error {
    /// An accessor was called on a `Slice` whose head byte does not support it.
    #[error("invalid type: expected {expected}, found {actual:?}")]
    InvalidType {
        expected: &'static str,
        actual: ValueType,
    },

    /// A string payload truncated a multi-byte UTF-8 sequence.
    #[error("invalid or truncated UTF-8 sequence in string payload")]
    InvalidUtf8Sequence,

    /// A value has no JSON equivalent and `FailOnUnsupported` is in effect.
    #[error("no JSON equivalent for value of type {kind:?}")]
    NoJsonEquivalent { kind: ValueType },

    /// A `Custom` value was encountered in JSON mode with no handler registered.
    #[error("custom value encountered but no custom type handler is registered")]
    NeedCustomTypeHandler,

    /// A `BCD` value was encountered; this crate does not implement BCD decoding.
    #[error("BCD values are not implemented")]
    NotImplemented,

    /// An invariant the `Slice` cursor relies on was violated by the input bytes.
    #[error("internal error: {0}")]
    InternalError(String),

    /// An array or object was indexed beyond its length.
    #[error("index {index} out of bounds for length {length}")]
    IndexOutOfBounds { index: u64, length: u64 },
}

/// Convenience alias for this crate's fallible calls, mirroring the `Result` alias this corpus's
/// database-facing crates export for their own call-site-heavy error type.
pub type Result<T> = std::result::Result<T, Error>;
