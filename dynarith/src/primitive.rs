//! Same-kind arithmetic
//!
//! Once both operands share a compute kind, the operation is delegated to the
//! native operator of that kind. Integer overflow follows the configured
//! [`OverflowPolicy`]; floats follow IEEE-754 (`1.0 / 0.0` is `+inf`,
//! `x % 0.0` is NaN); integers and decimals refuse a zero divisor.
use bigdecimal::{BigDecimal, Zero};

use crate::{
    dispatch::OperatorKind,
    error::{Error, Result},
    kind::NumericKind,
    options::{DispatchOptions, OverflowPolicy},
};

/// A primitive payload type supporting the five dispatched operators.
pub trait PrimitiveArith: Sized {
    /// The kind of the results produced by [`PrimitiveArith::apply`].
    const KIND: NumericKind;

    /// Evaluates `self op rhs`.
    fn apply(self, rhs: Self, op: OperatorKind, options: &DispatchOptions) -> Result<Self>;
}

macro_rules! impl_int_arith {
    ($($typ:ty => $lbl:ident),+ $(,)?) => {
        $(
            impl PrimitiveArith for $typ {
                const KIND: NumericKind = NumericKind::$lbl;

                fn apply(self, rhs: Self, op: OperatorKind, options: &DispatchOptions) -> Result<Self> {
                    if op.is_division() && rhs == 0 {
                        return Err(Error::DivideByZero { kind: Self::KIND });
                    }

                    match options.overflow {
                        OverflowPolicy::Wrap => Ok(match op {
                            OperatorKind::Add => self.wrapping_add(rhs),
                            OperatorKind::Sub => self.wrapping_sub(rhs),
                            OperatorKind::Mul => self.wrapping_mul(rhs),
                            OperatorKind::Div => self.wrapping_div(rhs),
                            OperatorKind::Rem => self.wrapping_rem(rhs),
                        }),
                        OverflowPolicy::Saturate => Ok(match op {
                            OperatorKind::Add => self.saturating_add(rhs),
                            OperatorKind::Sub => self.saturating_sub(rhs),
                            OperatorKind::Mul => self.saturating_mul(rhs),
                            OperatorKind::Div => self.saturating_div(rhs),
                            // MIN % -1 is mathematically 0
                            OperatorKind::Rem => self.wrapping_rem(rhs),
                        }),
                        OverflowPolicy::Checked => match op {
                            OperatorKind::Add => self.checked_add(rhs),
                            OperatorKind::Sub => self.checked_sub(rhs),
                            OperatorKind::Mul => self.checked_mul(rhs),
                            OperatorKind::Div => self.checked_div(rhs),
                            OperatorKind::Rem => self.checked_rem(rhs),
                        }
                        .ok_or(Error::Overflow { op, kind: Self::KIND }),
                    }
                }
            }
        )+
    };
}

macro_rules! impl_float_arith {
    ($($typ:ty => $lbl:ident),+ $(,)?) => {
        $(
            impl PrimitiveArith for $typ {
                const KIND: NumericKind = NumericKind::$lbl;

                #[inline]
                fn apply(self, rhs: Self, op: OperatorKind, _options: &DispatchOptions) -> Result<Self> {
                    Ok(match op {
                        OperatorKind::Add => self + rhs,
                        OperatorKind::Sub => self - rhs,
                        OperatorKind::Mul => self * rhs,
                        OperatorKind::Div => self / rhs,
                        OperatorKind::Rem => self % rhs,
                    })
                }
            }
        )+
    };
}

impl_int_arith! {
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
}

impl_float_arith! {
    f32 => F32,
    f64 => F64,
}

impl PrimitiveArith for BigDecimal {
    const KIND: NumericKind = NumericKind::Dec;

    fn apply(self, rhs: Self, op: OperatorKind, options: &DispatchOptions) -> Result<Self> {
        if op.is_division() && rhs.is_zero() {
            return Err(Error::DivideByZero { kind: Self::KIND });
        }

        let result = match op {
            OperatorKind::Add => self + rhs,
            OperatorKind::Sub => self - rhs,
            OperatorKind::Mul => self * rhs,
            OperatorKind::Div => self / rhs,
            OperatorKind::Rem => self % rhs,
        };

        Ok(match options.decimal_precision {
            Some(digits) if result.digits() > digits.get() => result.with_prec(digits.get()),
            _ => result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap() -> DispatchOptions {
        DispatchOptions::default()
    }

    #[test]
    fn integer_policies_on_overflow() {
        let saturate = wrap().with_overflow(OverflowPolicy::Saturate);
        let checked = wrap().with_overflow(OverflowPolicy::Checked);

        assert_eq!(i8::MAX.apply(1, OperatorKind::Add, &wrap()), Ok(i8::MIN));
        assert_eq!(i8::MAX.apply(1, OperatorKind::Add, &saturate), Ok(i8::MAX));
        assert_eq!(
            i8::MAX.apply(1, OperatorKind::Add, &checked),
            Err(Error::Overflow {
                op: OperatorKind::Add,
                kind: NumericKind::I8
            })
        );
        assert_eq!(0u16.apply(1, OperatorKind::Sub, &saturate), Ok(0));
        assert_eq!(i32::MIN.apply(-1, OperatorKind::Div, &wrap()), Ok(i32::MIN));
        assert_eq!(i32::MIN.apply(-1, OperatorKind::Rem, &saturate), Ok(0));
        assert!(i32::MIN.apply(-1, OperatorKind::Rem, &checked).is_err());
    }

    #[test]
    fn integer_division_by_zero_is_an_error() {
        for op in [OperatorKind::Div, OperatorKind::Rem] {
            assert_eq!(
                10u64.apply(0, op, &wrap()),
                Err(Error::DivideByZero {
                    kind: NumericKind::U64
                })
            );
        }
    }

    #[test]
    fn float_division_by_zero_is_ieee() {
        assert_eq!(1.0f64.apply(0.0, OperatorKind::Div, &wrap()), Ok(f64::INFINITY));
        assert!(
            1.0f32
                .apply(0.0, OperatorKind::Rem, &wrap())
                .unwrap()
                .is_nan()
        );
    }

    #[test]
    fn decimal_results_are_rounded_to_precision() {
        let one = BigDecimal::from(1);
        let three = BigDecimal::from(3);
        let third = one
            .clone()
            .apply(three.clone(), OperatorKind::Div, &wrap())
            .unwrap();
        assert_eq!(third.to_string(), format!("0.{}", "3".repeat(28)));

        let sum = BigDecimal::from(2)
            .apply(BigDecimal::from(1), OperatorKind::Add, &wrap())
            .unwrap();
        assert_eq!(sum.to_string(), "3");

        let exact = wrap().with_decimal_precision(None);
        let third = one.apply(three, OperatorKind::Div, &exact).unwrap();
        assert!(third.digits() > 28);

        assert_eq!(
            BigDecimal::from(7).apply(BigDecimal::zero(), OperatorKind::Rem, &wrap()),
            Err(Error::DivideByZero {
                kind: NumericKind::Dec
            })
        );
    }
}
