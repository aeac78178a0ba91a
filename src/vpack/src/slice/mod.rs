//! # 3.2 Slice
//!
//! A `Slice` is an immutable, zero-copy cursor over one VPack value. It owns nothing: it
//! borrows the caller's byte buffer and a cursor position into it. Its lifetime is bounded by
//! the lifetime of that buffer.

mod container;

use byteorder::{ByteOrder, LittleEndian};
use log::trace;

use crate::error::{Error, Result};
use crate::value_type::*;

/// A borrowed cursor over one VPack value inside `buffer`, starting at byte `start`.
///
/// Child slices (array elements, object keys/values, `External` targets) borrow the same
/// `buffer` with a different `start`, so the whole tree a dumper walks is one contiguous
/// allocation the caller keeps alive (see `SPEC_FULL.md` §5).
#[derive(Debug, Clone, Copy)]
pub struct Slice<'a> {
    buffer: &'a [u8],
    start: usize,
}

impl<'a> Slice<'a> {
    /// Wrap `buffer` as a `Slice` whose value begins at `start`.
    ///
    /// This performs no validation: classification and bounds checks happen lazily in the
    /// accessors, matching the "owns nothing" cursor contract of §3.2.
    pub fn new(buffer: &'a [u8], start: usize) -> Slice<'a> {
        Slice { buffer, start }
    }

    /// Convenience constructor for a `Slice` over the whole of `buffer`.
    pub fn from_bytes(buffer: &'a [u8]) -> Slice<'a> {
        Slice::new(buffer, 0)
    }

    fn head(&self) -> Result<u8> {
        self.buffer.get(self.start).copied().ok_or_else(|| {
            Error::InternalError(format!(
                "slice start {} is outside buffer of length {}",
                self.start,
                self.buffer.len()
            ))
        })
    }

    /// Bytes `[start + rel_offset, start + rel_offset + len)`, bounds-checked against the
    /// buffer (§3.1 invariant 1).
    fn slice_bytes(&self, rel_offset: usize, len: usize) -> Result<&'a [u8]> {
        let abs_start = self.start + rel_offset;
        let abs_end = abs_start + len;
        self.buffer.get(abs_start..abs_end).ok_or_else(|| {
            Error::InternalError(format!(
                "value at offset {abs_start} declares length {len} exceeding buffer of size {}",
                self.buffer.len()
            ))
        })
    }

    fn child(&self, rel_offset: usize) -> Slice<'a> {
        Slice::new(self.buffer, self.start + rel_offset)
    }

    fn expect(&self, expected: ValueType) -> Result<()> {
        let actual = self.kind()?;
        if actual == expected {
            Ok(())
        } else {
            Err(Error::InvalidType {
                expected: expected.name(),
                actual,
            })
        }
    }

    /// Classify this value's head byte.
    pub fn kind(&self) -> Result<ValueType> {
        Ok(ValueType::from_head(self.head()?))
    }

    /// Total number of bytes this value occupies, head byte included.
    pub fn byte_size(&self) -> Result<u64> {
        let head = self.head()?;
        let size = match self.kind()? {
            ValueType::None
            | ValueType::Illegal
            | ValueType::Null
            | ValueType::Bool
            | ValueType::MinKey
            | ValueType::MaxKey
            | ValueType::SmallInt => 1,
            ValueType::Double | ValueType::UtcDate | ValueType::External => 9,
            ValueType::Int => 1 + int_width(head, HEAD_INT_BASE) as u64,
            ValueType::UInt => 1 + int_width(head, HEAD_UINT_BASE) as u64,
            ValueType::Bcd => {
                let len = self.read_uint_field(1, 8)?;
                1 + 8 + len
            }
            ValueType::Custom => {
                let len = self.read_uint_field(1, 8)?;
                1 + 8 + len
            }
            ValueType::Binary => {
                let width = int_width(head, HEAD_BINARY_BASE) as usize;
                let len = self.read_uint_field(1, width)?;
                1 + width as u64 + len
            }
            ValueType::String => {
                if head == HEAD_STRING_LONG {
                    let len = self.read_uint_field(1, 8)?;
                    1 + 8 + len
                } else {
                    1 + (head - HEAD_STRING_SHORT_BASE) as u64
                }
            }
            ValueType::Array => self.container_byte_size(true)?,
            ValueType::Object => self.container_byte_size(false)?,
        };
        Ok(size)
    }

    fn read_uint_field(&self, rel_offset: usize, width: usize) -> Result<u64> {
        let bytes = self.slice_bytes(rel_offset, width)?;
        Ok(LittleEndian::read_uint(bytes, width))
    }

    pub fn get_bool(&self) -> Result<bool> {
        self.expect(ValueType::Bool)?;
        Ok(self.head()? == HEAD_TRUE)
    }

    pub fn get_double(&self) -> Result<f64> {
        self.expect(ValueType::Double)?;
        let bytes = self.slice_bytes(1, 8)?;
        Ok(LittleEndian::read_f64(bytes))
    }

    pub fn get_int(&self) -> Result<i64> {
        self.expect(ValueType::Int)?;
        let width = int_width(self.head()?, HEAD_INT_BASE) as usize;
        let bytes = self.slice_bytes(1, width)?;
        Ok(LittleEndian::read_int(bytes, width))
    }

    pub fn get_uint(&self) -> Result<u64> {
        self.expect(ValueType::UInt)?;
        let width = int_width(self.head()?, HEAD_UINT_BASE) as usize;
        let bytes = self.slice_bytes(1, width)?;
        Ok(LittleEndian::read_uint(bytes, width))
    }

    pub fn get_small_int(&self) -> Result<i64> {
        self.expect(ValueType::SmallInt)?;
        let head = self.head()?;
        Ok((head - HEAD_SMALL_INT_BASE) as i64 + SMALL_INT_MIN)
    }

    pub fn get_utc_date(&self) -> Result<i64> {
        self.expect(ValueType::UtcDate)?;
        let bytes = self.slice_bytes(1, 8)?;
        Ok(LittleEndian::read_i64(bytes))
    }

    /// Raw string payload bytes. Per §1 Non-goals, this does not validate UTF-8
    /// well-formedness beyond the lead-byte framing the dumper itself relies on.
    pub fn get_string(&self) -> Result<&'a [u8]> {
        self.expect(ValueType::String)?;
        let head = self.head()?;
        if head == HEAD_STRING_LONG {
            let len = self.read_uint_field(1, 8)? as usize;
            self.slice_bytes(9, len)
        } else {
            let len = (head - HEAD_STRING_SHORT_BASE) as usize;
            self.slice_bytes(1, len)
        }
    }

    pub fn get_binary(&self) -> Result<&'a [u8]> {
        self.expect(ValueType::Binary)?;
        let head = self.head()?;
        let width = int_width(head, HEAD_BINARY_BASE) as usize;
        let len = self.read_uint_field(1, width)? as usize;
        self.slice_bytes(1 + width, len)
    }

    /// The entire byte range of a `Custom` value, head byte through payload. Used by the VJSON
    /// dumper, which base64-encodes a `Custom` value wholesale rather than interpreting it.
    pub fn raw_bytes(&self) -> Result<&'a [u8]> {
        let size = self.byte_size()? as usize;
        self.slice_bytes(0, size)
    }

    /// Dereference an `External` value to the `Slice` it points at.
    pub fn get_external(&self) -> Result<Slice<'a>> {
        self.expect(ValueType::External)?;
        let bytes = self.slice_bytes(1, 8)?;
        let offset = LittleEndian::read_u64(bytes) as usize;
        trace!("dereferencing external at offset {offset}");
        if offset >= self.buffer.len() {
            return Err(Error::InternalError(format!(
                "external offset {offset} is outside buffer of length {}",
                self.buffer.len()
            )));
        }
        Ok(Slice::new(self.buffer, offset))
    }

    pub fn array_length(&self) -> Result<u64> {
        self.expect(ValueType::Array)?;
        self.container_length(true)
    }

    pub fn at(&self, index: u64) -> Result<Slice<'a>> {
        self.expect(ValueType::Array)?;
        let offset = self.entry_offset(true, index)?;
        Ok(self.child(offset as usize))
    }

    pub fn object_length(&self) -> Result<u64> {
        self.expect(ValueType::Object)?;
        self.container_length(false)
    }

    pub fn key_at(&self, index: u64) -> Result<Slice<'a>> {
        self.expect(ValueType::Object)?;
        let offset = self.entry_offset(false, index)?;
        Ok(self.child(offset as usize))
    }

    pub fn value_at(&self, index: u64) -> Result<Slice<'a>> {
        let key = self.key_at(index)?;
        let key_size = key.byte_size()?;
        Ok(self.child(
            (key.start - self.start) + key_size as usize,
        ))
    }
}

fn int_width(head: u8, base: u8) -> u8 {
    head - base + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_bool_roundtrip() {
        let buf = [HEAD_NULL, HEAD_TRUE, HEAD_FALSE];
        assert_eq!(Slice::new(&buf, 0).kind().unwrap(), ValueType::Null);
        assert_eq!(Slice::new(&buf, 0).byte_size().unwrap(), 1);
        assert!(Slice::new(&buf, 1).get_bool().unwrap());
        assert!(!Slice::new(&buf, 2).get_bool().unwrap());
    }

    #[test]
    fn small_int_range() {
        for v in SMALL_INT_MIN..=SMALL_INT_MAX {
            let head = (HEAD_SMALL_INT_BASE as i64 + (v - SMALL_INT_MIN)) as u8;
            let buf = [head];
            assert_eq!(Slice::new(&buf, 0).get_small_int().unwrap(), v);
        }
    }

    #[test]
    fn uint_widths() {
        let mut buf = vec![HEAD_UINT_BASE + 7]; // width 8
        buf.extend_from_slice(&u64::MAX.to_le_bytes());
        assert_eq!(Slice::new(&buf, 0).get_uint().unwrap(), u64::MAX);
    }

    #[test]
    fn int_sign_extends() {
        let mut buf = vec![HEAD_INT_BASE]; // width 1
        buf.push(0xff); // -1 as one byte two's complement
        assert_eq!(Slice::new(&buf, 0).get_int().unwrap(), -1);
    }

    #[test]
    fn short_string() {
        let mut buf = vec![HEAD_STRING_SHORT_BASE + 5];
        buf.extend_from_slice(b"hello");
        assert_eq!(Slice::new(&buf, 0).get_string().unwrap(), b"hello");
    }

    #[test]
    fn wrong_accessor_is_invalid_type() {
        let buf = [HEAD_NULL];
        let err = Slice::new(&buf, 0).get_bool().unwrap_err();
        assert!(matches!(err, Error::InvalidType { .. }));
    }
}
