//! Head-byte classification for VPack values.
//!
//! # 3.1 VPack value (on-disk)
//!
//! A VPack value is a contiguous byte range whose first byte is the **head byte**. This module
//! fixes the concrete head-byte-to-logical-type mapping this crate uses; conforming encoders
//! targeting this crate must match it (see `SPEC_FULL.md` §4.1: the exact byte values are this
//! implementation's own choice, not a wire-compatibility requirement with any external format).

/// The logical type a VPack value's head byte classifies it as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    None,
    Illegal,
    Null,
    Bool,
    Double,
    UtcDate,
    External,
    MinKey,
    MaxKey,
    Bcd,
    Int,
    UInt,
    SmallInt,
    String,
    Binary,
    Custom,
    Array,
    Object,
}

pub(crate) const HEAD_NONE: u8 = 0x00;
pub(crate) const HEAD_ILLEGAL: u8 = 0x01;
pub(crate) const HEAD_NULL: u8 = 0x02;
pub(crate) const HEAD_FALSE: u8 = 0x03;
pub(crate) const HEAD_TRUE: u8 = 0x04;
pub(crate) const HEAD_DOUBLE: u8 = 0x05;
pub(crate) const HEAD_UTC_DATE: u8 = 0x06;
pub(crate) const HEAD_EXTERNAL: u8 = 0x07;
pub(crate) const HEAD_MIN_KEY: u8 = 0x08;
pub(crate) const HEAD_MAX_KEY: u8 = 0x09;
pub(crate) const HEAD_BCD: u8 = 0x0a;

/// `Int` payload widths 1..=8 occupy head bytes `0x0b..=0x12`.
pub(crate) const HEAD_INT_BASE: u8 = 0x0b;
/// `UInt` payload widths 1..=8 occupy head bytes `0x13..=0x1a`.
pub(crate) const HEAD_UINT_BASE: u8 = 0x13;
/// `SmallInt` occupies 16 head bytes for the values -6..=9, in ascending order.
pub(crate) const HEAD_SMALL_INT_BASE: u8 = 0x1b;
pub(crate) const SMALL_INT_MIN: i64 = -6;
pub(crate) const SMALL_INT_MAX: i64 = 9;

pub(crate) const HEAD_CUSTOM: u8 = 0x2b;

/// `Binary` length-prefix widths 1..=8 occupy head bytes `0x2f..=0x36`.
pub(crate) const HEAD_BINARY_BASE: u8 = 0x2f;

/// Short-form `String`: head byte `0x40 + n`, n in 0..=126.
pub(crate) const HEAD_STRING_SHORT_BASE: u8 = 0x40;
pub(crate) const STRING_SHORT_MAX_LEN: u8 = 126;
/// Long-form `String`: fixed head byte, 8-byte little-endian length follows.
pub(crate) const HEAD_STRING_LONG: u8 = 0xbf;

pub(crate) const HEAD_ARRAY_EMPTY: u8 = 0xc0;
pub(crate) const HEAD_ARRAY_EQUAL_SIZE: u8 = 0xc1;
/// Indexed arrays occupy head bytes `0xc2..=0xc5` for index-table widths 1, 2, 4, 8.
pub(crate) const HEAD_ARRAY_INDEXED_BASE: u8 = 0xc2;

pub(crate) const HEAD_OBJECT_EMPTY: u8 = 0xc6;
pub(crate) const HEAD_OBJECT_EQUAL_SIZE: u8 = 0xc7;
/// Indexed objects occupy head bytes `0xc8..=0xcb` for index-table widths 1, 2, 4, 8.
pub(crate) const HEAD_OBJECT_INDEXED_BASE: u8 = 0xc8;

pub(crate) const INDEX_WIDTHS: [u8; 4] = [1, 2, 4, 8];

impl ValueType {
    /// Classify a head byte into its logical type.
    pub(crate) fn from_head(head: u8) -> ValueType {
        match head {
            HEAD_NONE => ValueType::None,
            HEAD_ILLEGAL => ValueType::Illegal,
            HEAD_NULL => ValueType::Null,
            HEAD_FALSE | HEAD_TRUE => ValueType::Bool,
            HEAD_DOUBLE => ValueType::Double,
            HEAD_UTC_DATE => ValueType::UtcDate,
            HEAD_EXTERNAL => ValueType::External,
            HEAD_MIN_KEY => ValueType::MinKey,
            HEAD_MAX_KEY => ValueType::MaxKey,
            HEAD_BCD => ValueType::Bcd,
            HEAD_CUSTOM => ValueType::Custom,
            h if (HEAD_INT_BASE..HEAD_INT_BASE + 8).contains(&h) => ValueType::Int,
            h if (HEAD_UINT_BASE..HEAD_UINT_BASE + 8).contains(&h) => ValueType::UInt,
            h if (HEAD_SMALL_INT_BASE..HEAD_SMALL_INT_BASE + 16).contains(&h) => {
                ValueType::SmallInt
            }
            h if (HEAD_BINARY_BASE..HEAD_BINARY_BASE + 8).contains(&h) => ValueType::Binary,
            h if h == HEAD_STRING_LONG
                || (HEAD_STRING_SHORT_BASE..=HEAD_STRING_SHORT_BASE + STRING_SHORT_MAX_LEN)
                    .contains(&h) =>
            {
                ValueType::String
            }
            h if (HEAD_ARRAY_EMPTY..=HEAD_ARRAY_INDEXED_BASE + 3).contains(&h) => ValueType::Array,
            h if (HEAD_OBJECT_EMPTY..=HEAD_OBJECT_INDEXED_BASE + 3).contains(&h) => {
                ValueType::Object
            }
            _ => ValueType::Illegal,
        }
    }

    /// Human readable name, used in `InvalidType` error messages.
    pub(crate) fn name(self) -> &'static str {
        match self {
            ValueType::None => "None",
            ValueType::Illegal => "Illegal",
            ValueType::Null => "Null",
            ValueType::Bool => "Bool",
            ValueType::Double => "Double",
            ValueType::UtcDate => "UTCDate",
            ValueType::External => "External",
            ValueType::MinKey => "MinKey",
            ValueType::MaxKey => "MaxKey",
            ValueType::Bcd => "BCD",
            ValueType::Int => "Int",
            ValueType::UInt => "UInt",
            ValueType::SmallInt => "SmallInt",
            ValueType::String => "String",
            ValueType::Binary => "Binary",
            ValueType::Custom => "Custom",
            ValueType::Array => "Array",
            ValueType::Object => "Object",
        }
    }
}
