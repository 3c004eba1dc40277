//! Runtime classification of type-erased operands.
use std::any::Any;

use bigdecimal::BigDecimal;

use crate::{
    error::{Error, Result},
    kind::NumericKind,
    value::BoxedNumber,
};

macro_rules! downcast_numeric {
    ($value:expr, $($typ:ty => $lbl:ident),+ $(,)?) => {
        $(
            if let Some(v) = $value.downcast_ref::<$typ>() {
                return Ok(BoxedNumber::$lbl(v.clone()));
            }
        )+
    };
}

/// Returns the [`NumericKind`] of a type-erased primitive.
///
/// Accepts the ten native numeric primitives, [`BigDecimal`], and an already boxed
/// [`BoxedNumber`].
pub fn classify(value: &dyn Any) -> Result<NumericKind> {
    BoxedNumber::from_any(value).map(|boxed| boxed.kind())
}

impl BoxedNumber {
    /// Boxes a type-erased primitive, copying its value.
    pub fn from_any(value: &dyn Any) -> Result<Self> {
        if let Some(boxed) = value.downcast_ref::<BoxedNumber>() {
            return Ok(boxed.clone());
        }
        downcast_numeric!(value,
            i8 => I8,
            u8 => U8,
            i16 => I16,
            u16 => U16,
            i32 => I32,
            u32 => U32,
            i64 => I64,
            u64 => U64,
            f32 => F32,
            f64 => F64,
            BigDecimal => Dec,
        );
        Err(Error::UnsupportedType {
            type_id: value.type_id(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::any::TypeId;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn classifies_native_primitives() {
        assert_eq!(classify(&5i8), Ok(NumericKind::I8));
        assert_eq!(classify(&250u8), Ok(NumericKind::U8));
        assert_eq!(classify(&3_000_000_000u32), Ok(NumericKind::U32));
        assert_eq!(classify(&1.5f32), Ok(NumericKind::F32));
        assert_eq!(classify(&BigDecimal::from(2)), Ok(NumericKind::Dec));
        assert_eq!(classify(&BoxedNumber::U64(7)), Ok(NumericKind::U64));
    }

    #[test]
    fn rejects_non_numeric_values() {
        let err = classify(&"12").unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedType {
                type_id: TypeId::of::<&str>()
            }
        );
        assert!(
            err.to_string()
                .starts_with("Operand has an unsupported runtime type (TypeId")
        );
        assert!(classify(&12i128).unwrap_err().is_unsupported_type());
        assert!(BoxedNumber::from_any(&String::from("1")).is_err());
    }

    #[test]
    fn classification_agrees_with_boxing() {
        let values: [&dyn Any; 11] = [
            &-1i8,
            &1u8,
            &-1i16,
            &1u16,
            &-1i32,
            &1u32,
            &-1i64,
            &1u64,
            &0.5f32,
            &0.5f64,
            &BigDecimal::from(1),
        ];
        for (value, expected) in values.into_iter().zip(NumericKind::iter()) {
            let boxed = BoxedNumber::from_any(value).unwrap();
            assert_eq!(boxed.kind(), expected);
            assert_eq!(classify(value), Ok(expected));
        }
    }

    #[test]
    fn boxes_by_copy() {
        assert_eq!(BoxedNumber::from_any(&-3i16), Ok(BoxedNumber::I16(-3)));
        assert_eq!(
            BoxedNumber::from_any(&BoxedNumber::F64(0.5)),
            Ok(BoxedNumber::F64(0.5))
        );
    }
}
