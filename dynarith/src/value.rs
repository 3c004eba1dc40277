//! Boxed numeric operands
use bigdecimal::{BigDecimal, One, Zero};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::EnumTryAs;

use crate::kind::NumericKind;

/// A numeric value carried together with its runtime [`NumericKind`].
///
/// Equality compares variants first: `I32(1)` and `I64(1)` are different values.
/// Decimal equality is numeric (`1.50` equals `1.5`).
#[derive(Debug, Clone, PartialEq, EnumTryAs)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "value", rename_all = "lowercase"))]
pub enum BoxedNumber {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Dec(BigDecimal),
}

macro_rules! boxed_number_from {
    ($typ:ty, $lbl:ident) => {
        impl From<$typ> for BoxedNumber {
            fn from(value: $typ) -> Self {
                BoxedNumber::$lbl(value)
            }
        }
    };
}

boxed_number_from! { i8, I8 }
boxed_number_from! { u8, U8 }
boxed_number_from! { i16, I16 }
boxed_number_from! { u16, U16 }
boxed_number_from! { i32, I32 }
boxed_number_from! { u32, U32 }
boxed_number_from! { i64, I64 }
boxed_number_from! { u64, U64 }
boxed_number_from! { f32, F32 }
boxed_number_from! { f64, F64 }
boxed_number_from! { BigDecimal, Dec }

impl BoxedNumber {
    /// The runtime kind of this value.
    #[inline]
    pub fn kind(&self) -> NumericKind {
        match self {
            BoxedNumber::I8(_) => NumericKind::I8,
            BoxedNumber::U8(_) => NumericKind::U8,
            BoxedNumber::I16(_) => NumericKind::I16,
            BoxedNumber::U16(_) => NumericKind::U16,
            BoxedNumber::I32(_) => NumericKind::I32,
            BoxedNumber::U32(_) => NumericKind::U32,
            BoxedNumber::I64(_) => NumericKind::I64,
            BoxedNumber::U64(_) => NumericKind::U64,
            BoxedNumber::F32(_) => NumericKind::F32,
            BoxedNumber::F64(_) => NumericKind::F64,
            BoxedNumber::Dec(_) => NumericKind::Dec,
        }
    }

    /// The additive identity of `kind`.
    pub fn zero(kind: NumericKind) -> Self {
        match kind {
            NumericKind::I8 => BoxedNumber::I8(0),
            NumericKind::U8 => BoxedNumber::U8(0),
            NumericKind::I16 => BoxedNumber::I16(0),
            NumericKind::U16 => BoxedNumber::U16(0),
            NumericKind::I32 => BoxedNumber::I32(0),
            NumericKind::U32 => BoxedNumber::U32(0),
            NumericKind::I64 => BoxedNumber::I64(0),
            NumericKind::U64 => BoxedNumber::U64(0),
            NumericKind::F32 => BoxedNumber::F32(0.0),
            NumericKind::F64 => BoxedNumber::F64(0.0),
            NumericKind::Dec => BoxedNumber::Dec(BigDecimal::zero()),
        }
    }

    /// The multiplicative identity of `kind`.
    pub fn one(kind: NumericKind) -> Self {
        match kind {
            NumericKind::I8 => BoxedNumber::I8(1),
            NumericKind::U8 => BoxedNumber::U8(1),
            NumericKind::I16 => BoxedNumber::I16(1),
            NumericKind::U16 => BoxedNumber::U16(1),
            NumericKind::I32 => BoxedNumber::I32(1),
            NumericKind::U32 => BoxedNumber::U32(1),
            NumericKind::I64 => BoxedNumber::I64(1),
            NumericKind::U64 => BoxedNumber::U64(1),
            NumericKind::F32 => BoxedNumber::F32(1.0),
            NumericKind::F64 => BoxedNumber::F64(1.0),
            NumericKind::Dec => BoxedNumber::Dec(BigDecimal::one()),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            BoxedNumber::F32(v) => *v == 0.0,
            BoxedNumber::F64(v) => *v == 0.0,
            BoxedNumber::Dec(v) => v.is_zero(),
            _ => self.as_i128() == Some(0),
        }
    }

    /// Returns the value of an integer operand, `None` for floats and decimals.
    ///
    /// Every supported integer kind fits in an `i128` without loss.
    #[inline]
    pub fn as_i128(&self) -> Option<i128> {
        match *self {
            BoxedNumber::I8(v) => Some(v.into()),
            BoxedNumber::U8(v) => Some(v.into()),
            BoxedNumber::I16(v) => Some(v.into()),
            BoxedNumber::U16(v) => Some(v.into()),
            BoxedNumber::I32(v) => Some(v.into()),
            BoxedNumber::U32(v) => Some(v.into()),
            BoxedNumber::I64(v) => Some(v.into()),
            BoxedNumber::U64(v) => Some(v.into()),
            BoxedNumber::F32(_) | BoxedNumber::F64(_) | BoxedNumber::Dec(_) => None,
        }
    }

    /// Builds an integer operand of `kind` from `value`.
    ///
    /// Returns `None` if `kind` is not an integer kind or `value` is out of its range.
    pub fn from_i128(kind: NumericKind, value: i128) -> Option<Self> {
        Some(match kind {
            NumericKind::I8 => BoxedNumber::I8(value.try_into().ok()?),
            NumericKind::U8 => BoxedNumber::U8(value.try_into().ok()?),
            NumericKind::I16 => BoxedNumber::I16(value.try_into().ok()?),
            NumericKind::U16 => BoxedNumber::U16(value.try_into().ok()?),
            NumericKind::I32 => BoxedNumber::I32(value.try_into().ok()?),
            NumericKind::U32 => BoxedNumber::U32(value.try_into().ok()?),
            NumericKind::I64 => BoxedNumber::I64(value.try_into().ok()?),
            NumericKind::U64 => BoxedNumber::U64(value.try_into().ok()?),
            NumericKind::F32 | NumericKind::F64 | NumericKind::Dec => return None,
        })
    }

    /// Builds an integer operand of `kind` keeping only the low bits of `value`.
    ///
    /// Returns `None` if `kind` is not an integer kind.
    pub fn from_i128_wrapping(kind: NumericKind, value: i128) -> Option<Self> {
        Some(match kind {
            NumericKind::I8 => BoxedNumber::I8(value as i8),
            NumericKind::U8 => BoxedNumber::U8(value as u8),
            NumericKind::I16 => BoxedNumber::I16(value as i16),
            NumericKind::U16 => BoxedNumber::U16(value as u16),
            NumericKind::I32 => BoxedNumber::I32(value as i32),
            NumericKind::U32 => BoxedNumber::U32(value as u32),
            NumericKind::I64 => BoxedNumber::I64(value as i64),
            NumericKind::U64 => BoxedNumber::U64(value as u64),
            NumericKind::F32 | NumericKind::F64 | NumericKind::Dec => return None,
        })
    }

    /// Builds an integer operand of `kind`, clamping `value` into its range.
    ///
    /// Returns `None` if `kind` is not an integer kind.
    pub fn from_i128_saturating(kind: NumericKind, value: i128) -> Option<Self> {
        let (lo, hi) = kind.int_range()?;
        Self::from_i128(kind, value.clamp(lo, hi))
    }
}

impl std::fmt::Display for BoxedNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoxedNumber::I8(v) => write!(f, "{}i8", v),
            BoxedNumber::U8(v) => write!(f, "{}u8", v),
            BoxedNumber::I16(v) => write!(f, "{}i16", v),
            BoxedNumber::U16(v) => write!(f, "{}u16", v),
            BoxedNumber::I32(v) => write!(f, "{}i32", v),
            BoxedNumber::U32(v) => write!(f, "{}u32", v),
            BoxedNumber::I64(v) => write!(f, "{}i64", v),
            BoxedNumber::U64(v) => write!(f, "{}u64", v),
            BoxedNumber::F32(v) => write!(f, "{}f32", v),
            BoxedNumber::F64(v) => write!(f, "{}f64", v),
            BoxedNumber::Dec(v) => write!(f, "{}dec", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn identities_carry_their_kind() {
        for kind in NumericKind::iter() {
            assert_eq!(BoxedNumber::zero(kind).kind(), kind);
            assert_eq!(BoxedNumber::one(kind).kind(), kind);
            assert!(BoxedNumber::zero(kind).is_zero());
            assert!(!BoxedNumber::one(kind).is_zero());
        }
    }

    #[test]
    fn integer_construction_respects_range() {
        assert_eq!(
            BoxedNumber::from_i128(NumericKind::U8, 255),
            Some(BoxedNumber::U8(255))
        );
        assert_eq!(BoxedNumber::from_i128(NumericKind::U8, 256), None);
        assert_eq!(BoxedNumber::from_i128(NumericKind::F64, 1), None);
        assert_eq!(
            BoxedNumber::from_i128_wrapping(NumericKind::I64, u64::MAX as i128),
            Some(BoxedNumber::I64(-1))
        );
        assert_eq!(
            BoxedNumber::from_i128_saturating(NumericKind::I64, u64::MAX as i128),
            Some(BoxedNumber::I64(i64::MAX))
        );
    }

    #[test]
    fn display_appends_kind_suffix() {
        assert_eq!(BoxedNumber::I16(255).to_string(), "255i16");
        assert_eq!(BoxedNumber::F32(1.5).to_string(), "1.5f32");
        let dec: BigDecimal = "3.75".parse().unwrap();
        assert_eq!(BoxedNumber::from(dec).to_string(), "3.75dec");
    }
}
