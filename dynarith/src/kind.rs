//! Numeric kinds
//!
//! The eleven primitive representations an operand can carry at runtime:
//! signed and unsigned integers of 8, 16, 32 and 64 bits, the two IEEE-754
//! binary formats, and a high-precision decimal.
use enum_map::Enum;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIs, EnumIter, IntoEnumIterator};

/// Signedness of an integer kind.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Signedness {
    Signed,
    Unsigned,
}

/// Runtime tag identifying the primitive representation of a [`crate::BoxedNumber`].
///
/// The declaration order is the canonical order used when iterating over all
/// kinds and when laying out the promotion table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Enum, EnumIter, EnumCount, EnumIs,
)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NumericKind {
    /// 8-bit signed integer (`i8`)
    I8,
    /// 8-bit unsigned integer (`u8`)
    U8,
    /// 16-bit signed integer (`i16`)
    I16,
    /// 16-bit unsigned integer (`u16`)
    U16,
    /// 32-bit signed integer (`i32`)
    I32,
    /// 32-bit unsigned integer (`u32`)
    U32,
    /// 64-bit signed integer (`i64`)
    I64,
    /// 64-bit unsigned integer (`u64`)
    U64,
    /// 32-bit floating point value (IEEE-754 binary32)
    F32,
    /// 64-bit floating point value (IEEE-754 binary64)
    F64,
    /// Arbitrary-precision decimal, backed by [`bigdecimal::BigDecimal`].
    Dec,
}

impl NumericKind {
    /// Creates a [`NumericKind`] from its string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        NumericKind::iter().find(|kind| kind.to_str() == s)
    }

    /// Returns the string representation of the [`NumericKind`].
    pub fn to_str(&self) -> &'static str {
        match self {
            NumericKind::I8 => "i8",
            NumericKind::U8 => "u8",
            NumericKind::I16 => "i16",
            NumericKind::U16 => "u16",
            NumericKind::I32 => "i32",
            NumericKind::U32 => "u32",
            NumericKind::I64 => "i64",
            NumericKind::U64 => "u64",
            NumericKind::F32 => "f32",
            NumericKind::F64 => "f64",
            NumericKind::Dec => "dec",
        }
    }

    /// Number of bits used by the native representation.
    ///
    /// The decimal kind reports 128, the width of the fixed-size decimal it stands in for.
    #[inline]
    pub const fn bit_width(&self) -> u32 {
        match self {
            NumericKind::I8 | NumericKind::U8 => 8,
            NumericKind::I16 | NumericKind::U16 => 16,
            NumericKind::I32 | NumericKind::U32 | NumericKind::F32 => 32,
            NumericKind::I64 | NumericKind::U64 | NumericKind::F64 => 64,
            NumericKind::Dec => 128,
        }
    }

    /// Returns the signedness of an integer kind, `None` otherwise.
    #[inline]
    pub const fn signedness(&self) -> Option<Signedness> {
        match self {
            NumericKind::I8 | NumericKind::I16 | NumericKind::I32 | NumericKind::I64 => {
                Some(Signedness::Signed)
            }
            NumericKind::U8 | NumericKind::U16 | NumericKind::U32 | NumericKind::U64 => {
                Some(Signedness::Unsigned)
            }
            NumericKind::F32 | NumericKind::F64 | NumericKind::Dec => None,
        }
    }

    #[inline]
    pub const fn is_integer(&self) -> bool {
        self.signedness().is_some()
    }

    #[inline]
    pub const fn is_float(&self) -> bool {
        matches!(self, NumericKind::F32 | NumericKind::F64)
    }

    #[inline]
    pub const fn is_decimal(&self) -> bool {
        matches!(self, NumericKind::Dec)
    }

    /// Returns the integer kind with the given signedness and bit width.
    pub const fn integer(signedness: Signedness, bits: u32) -> Option<Self> {
        match (signedness, bits) {
            (Signedness::Signed, 8) => Some(NumericKind::I8),
            (Signedness::Signed, 16) => Some(NumericKind::I16),
            (Signedness::Signed, 32) => Some(NumericKind::I32),
            (Signedness::Signed, 64) => Some(NumericKind::I64),
            (Signedness::Unsigned, 8) => Some(NumericKind::U8),
            (Signedness::Unsigned, 16) => Some(NumericKind::U16),
            (Signedness::Unsigned, 32) => Some(NumericKind::U32),
            (Signedness::Unsigned, 64) => Some(NumericKind::U64),
            _ => None,
        }
    }

    /// Inclusive value range of an integer kind, `None` for non-integers.
    pub const fn int_range(&self) -> Option<(i128, i128)> {
        match self {
            NumericKind::I8 => Some((i8::MIN as i128, i8::MAX as i128)),
            NumericKind::U8 => Some((0, u8::MAX as i128)),
            NumericKind::I16 => Some((i16::MIN as i128, i16::MAX as i128)),
            NumericKind::U16 => Some((0, u16::MAX as i128)),
            NumericKind::I32 => Some((i32::MIN as i128, i32::MAX as i128)),
            NumericKind::U32 => Some((0, u32::MAX as i128)),
            NumericKind::I64 => Some((i64::MIN as i128, i64::MAX as i128)),
            NumericKind::U64 => Some((0, u64::MAX as i128)),
            NumericKind::F32 | NumericKind::F64 | NumericKind::Dec => None,
        }
    }

    /// Returns `true` if every value of `self` is representable in `other`.
    ///
    /// Only meaningful between integer kinds; any other pair yields `false`.
    pub const fn int_range_within(&self, other: &NumericKind) -> bool {
        match (self.int_range(), other.int_range()) {
            (Some((lo, hi)), Some((other_lo, other_hi))) => lo >= other_lo && hi <= other_hi,
            _ => false,
        }
    }
}

impl std::fmt::Display for NumericKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}
