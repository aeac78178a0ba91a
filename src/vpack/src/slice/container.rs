use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, Result};
use crate::value_type::*;

use super::Slice;

/// How a container's entries are laid out after the 17-byte container header
/// (head byte + 8-byte total length + 8-byte count).
///
/// # 4.1 Array/Object decoding
///
/// Either entries are equally sized (stride derived from byte length and count, no index
/// table) or a tail index table of width 1, 2, 4 or 8 gives each entry's offset directly.
pub(super) enum Layout {
    Empty,
    EqualSize { total_len: u64, count: u64 },
    Indexed { total_len: u64, count: u64, width: u8 },
}

pub(super) const HEADER_LEN: u64 = 17; // head byte + total_len(8) + count(8)

pub(super) fn classify(head: u8, is_array: bool) -> Option<Layout> {
    let (empty, equal, indexed_base) = if is_array {
        (HEAD_ARRAY_EMPTY, HEAD_ARRAY_EQUAL_SIZE, HEAD_ARRAY_INDEXED_BASE)
    } else {
        (HEAD_OBJECT_EMPTY, HEAD_OBJECT_EQUAL_SIZE, HEAD_OBJECT_INDEXED_BASE)
    };

    if head == empty {
        Some(Layout::Empty)
    } else if head == equal {
        Some(Layout::EqualSize { total_len: 0, count: 0 })
    } else if (indexed_base..indexed_base + 4).contains(&head) {
        let width = INDEX_WIDTHS[(head - indexed_base) as usize];
        Some(Layout::Indexed { total_len: 0, count: 0, width })
    } else {
        None
    }
}

impl<'a> Slice<'a> {
    pub(super) fn container_layout(&self, is_array: bool) -> Result<Layout> {
        let head = self.head()?;
        let shape = classify(head, is_array).ok_or_else(|| {
            Error::InternalError(format!("head byte {head:#04x} is not a container head for this kind"))
        })?;

        let layout = match shape {
            Layout::Empty => Layout::Empty,
            Layout::EqualSize { .. } => {
                let total_len = self.read_u64_field(1)?;
                let count = self.read_u64_field(9)?;
                Layout::EqualSize { total_len, count }
            }
            Layout::Indexed { width, .. } => {
                let total_len = self.read_u64_field(1)?;
                let count = self.read_u64_field(9)?;
                Layout::Indexed { total_len, count, width }
            }
        };
        Ok(layout)
    }

    fn read_u64_field(&self, rel_offset: usize) -> Result<u64> {
        let bytes = self.slice_bytes(rel_offset, 8)?;
        Ok(LittleEndian::read_u64(bytes))
    }

    pub(crate) fn container_byte_size(&self, is_array: bool) -> Result<u64> {
        match self.container_layout(is_array)? {
            Layout::Empty => Ok(1),
            Layout::EqualSize { total_len, .. } => Ok(total_len),
            Layout::Indexed { total_len, .. } => Ok(total_len),
        }
    }

    pub(crate) fn container_length(&self, is_array: bool) -> Result<u64> {
        match self.container_layout(is_array)? {
            Layout::Empty => Ok(0),
            Layout::EqualSize { count, .. } => Ok(count),
            Layout::Indexed { count, .. } => Ok(count),
        }
    }

    /// Byte offset (relative to this slice's start) of the i-th entry.
    pub(super) fn entry_offset(&self, is_array: bool, index: u64) -> Result<u64> {
        let layout = self.container_layout(is_array)?;
        let length = match &layout {
            Layout::Empty => 0,
            Layout::EqualSize { count, .. } => *count,
            Layout::Indexed { count, .. } => *count,
        };
        if index >= length {
            return Err(Error::IndexOutOfBounds { index, length });
        }

        match layout {
            Layout::Empty => unreachable!("checked above"),
            Layout::EqualSize { total_len, count } => {
                let stride = (total_len - HEADER_LEN) / count;
                Ok(HEADER_LEN + index * stride)
            }
            Layout::Indexed { total_len, count, width } => {
                let width = width as u64;
                let table_start = total_len - count * width;
                let entry_at = table_start + index * width;
                let bytes = self.slice_bytes(entry_at as usize, width as usize)?;
                Ok(LittleEndian::read_uint(bytes, width as usize))
            }
        }
    }
}
