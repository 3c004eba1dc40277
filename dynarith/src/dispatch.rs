//! Operator dispatch
//!
//! Every operator follows the same path: look up the promotion rule for the
//! operand kinds, widen both operands to the compute kind, evaluate with the
//! native operator of that kind, and return the result tagged with the compute
//! kind.
use std::any::Any;

use log::trace;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{EnumIs, EnumIter, IntoEnumIterator};

use crate::{
    error::{Error, OperandSide, Result},
    options::DispatchOptions,
    primitive::PrimitiveArith,
    promote::PromotionTable,
    value::BoxedNumber,
};

/// Binary arithmetic operators supported by the dispatcher.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, EnumIter, EnumIs)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OperatorKind {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Remainder (`%`), carrying the sign of the dividend
    Rem,
}

impl OperatorKind {
    /// Creates an [`OperatorKind`] from its symbol.
    pub fn from_str(s: &str) -> Option<Self> {
        OperatorKind::iter().find(|op| op.to_str() == s)
    }

    /// Returns the symbol of the [`OperatorKind`].
    pub fn to_str(&self) -> &'static str {
        match self {
            OperatorKind::Add => "+",
            OperatorKind::Sub => "-",
            OperatorKind::Mul => "*",
            OperatorKind::Div => "/",
            OperatorKind::Rem => "%",
        }
    }

    /// Returns true if swapping the operands never changes the result
    pub fn is_commutative(&self) -> bool {
        matches!(self, OperatorKind::Add | OperatorKind::Mul)
    }

    /// Returns true if the right operand is a divisor
    pub fn is_division(&self) -> bool {
        matches!(self, OperatorKind::Div | OperatorKind::Rem)
    }
}

impl std::fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Evaluates arithmetic between operands of arbitrary numeric kinds.
///
/// A dispatcher only reads its promotion table, so a single table can back any
/// number of dispatchers across threads.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'t> {
    table: &'t PromotionTable,
    options: DispatchOptions,
}

impl Dispatcher<'static> {
    /// A dispatcher over the standard promotion table with default options.
    pub fn new() -> Self {
        Self::with_table(PromotionTable::standard())
    }
}

impl Default for Dispatcher<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t> Dispatcher<'t> {
    pub fn with_table(table: &'t PromotionTable) -> Self {
        Self {
            table,
            options: DispatchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DispatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn table(&self) -> &'t PromotionTable {
        self.table
    }

    pub fn options(&self) -> &DispatchOptions {
        &self.options
    }

    /// Evaluates `lhs op rhs` in the kind selected by the promotion table.
    pub fn compute(
        &self,
        op: OperatorKind,
        lhs: &BoxedNumber,
        rhs: &BoxedNumber,
    ) -> Result<BoxedNumber> {
        let rule = self.table.resolve(lhs.kind(), rhs.kind())?;
        trace!("Dispatching {} {} {} in {}", lhs.kind(), op, rhs.kind(), rule);

        let (lhs, rhs) = rule.widen(lhs, rhs, self.options.overflow)?;
        self.evaluate(op, lhs, rhs)
    }

    /// Evaluates `lhs op rhs` for type-erased operands.
    ///
    /// Missing operands are reported before either operand is classified, the left
    /// one first.
    pub fn compute_dyn(
        &self,
        op: OperatorKind,
        lhs: Option<&dyn Any>,
        rhs: Option<&dyn Any>,
    ) -> Result<BoxedNumber> {
        let lhs = lhs.ok_or(Error::NullOperand {
            side: OperandSide::Left,
        })?;
        let rhs = rhs.ok_or(Error::NullOperand {
            side: OperandSide::Right,
        })?;

        let lhs = BoxedNumber::from_any(lhs)?;
        let rhs = BoxedNumber::from_any(rhs)?;
        self.compute(op, &lhs, &rhs)
    }

    #[inline]
    pub fn add(&self, lhs: &BoxedNumber, rhs: &BoxedNumber) -> Result<BoxedNumber> {
        self.compute(OperatorKind::Add, lhs, rhs)
    }

    #[inline]
    pub fn sub(&self, lhs: &BoxedNumber, rhs: &BoxedNumber) -> Result<BoxedNumber> {
        self.compute(OperatorKind::Sub, lhs, rhs)
    }

    #[inline]
    pub fn mul(&self, lhs: &BoxedNumber, rhs: &BoxedNumber) -> Result<BoxedNumber> {
        self.compute(OperatorKind::Mul, lhs, rhs)
    }

    #[inline]
    pub fn div(&self, lhs: &BoxedNumber, rhs: &BoxedNumber) -> Result<BoxedNumber> {
        self.compute(OperatorKind::Div, lhs, rhs)
    }

    #[inline]
    pub fn rem(&self, lhs: &BoxedNumber, rhs: &BoxedNumber) -> Result<BoxedNumber> {
        self.compute(OperatorKind::Rem, lhs, rhs)
    }

    /// Both operands must already share a kind.
    fn evaluate(&self, op: OperatorKind, lhs: BoxedNumber, rhs: BoxedNumber) -> Result<BoxedNumber> {
        let options = &self.options;

        macro_rules! same_kind {
            ($($lbl:ident),+ $(,)?) => {
                match (lhs, rhs) {
                    $(
                        (BoxedNumber::$lbl(a), BoxedNumber::$lbl(b)) => {
                            a.apply(b, op, options).map(BoxedNumber::$lbl)
                        }
                    )+
                    (lhs, rhs) => Err(Error::UnresolvedPromotion {
                        left: lhs.kind(),
                        right: rhs.kind(),
                    }),
                }
            };
        }

        same_kind!(I8, U8, I16, U16, I32, U32, I64, U64, F32, F64, Dec)
    }
}

/// Evaluates `lhs op rhs` with the default [`Dispatcher`].
#[inline]
pub fn compute(op: OperatorKind, lhs: &BoxedNumber, rhs: &BoxedNumber) -> Result<BoxedNumber> {
    Dispatcher::new().compute(op, lhs, rhs)
}

/// Evaluates `lhs op rhs` for type-erased operands with the default [`Dispatcher`].
#[inline]
pub fn compute_dyn(
    op: OperatorKind,
    lhs: Option<&dyn Any>,
    rhs: Option<&dyn Any>,
) -> Result<BoxedNumber> {
    Dispatcher::new().compute_dyn(op, lhs, rhs)
}

#[inline]
pub fn add(lhs: &BoxedNumber, rhs: &BoxedNumber) -> Result<BoxedNumber> {
    compute(OperatorKind::Add, lhs, rhs)
}

#[inline]
pub fn sub(lhs: &BoxedNumber, rhs: &BoxedNumber) -> Result<BoxedNumber> {
    compute(OperatorKind::Sub, lhs, rhs)
}

#[inline]
pub fn mul(lhs: &BoxedNumber, rhs: &BoxedNumber) -> Result<BoxedNumber> {
    compute(OperatorKind::Mul, lhs, rhs)
}

#[inline]
pub fn div(lhs: &BoxedNumber, rhs: &BoxedNumber) -> Result<BoxedNumber> {
    compute(OperatorKind::Div, lhs, rhs)
}

#[inline]
pub fn rem(lhs: &BoxedNumber, rhs: &BoxedNumber) -> Result<BoxedNumber> {
    compute(OperatorKind::Rem, lhs, rhs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::NumericKind;

    #[test]
    fn operator_symbols_round_trip() {
        for op in OperatorKind::iter() {
            assert_eq!(OperatorKind::from_str(op.to_str()), Some(op));
        }
        assert_eq!(OperatorKind::from_str("^"), None);
    }

    #[test]
    fn custom_table_without_rule_fails_resolution() {
        let mut table = PromotionTable::empty();
        table
            .insert(NumericKind::I32, NumericKind::I32, NumericKind::I32)
            .unwrap();
        let dispatcher = Dispatcher::with_table(&table);

        assert_eq!(
            dispatcher.add(&BoxedNumber::I32(2), &BoxedNumber::I32(3)),
            Ok(BoxedNumber::I32(5))
        );
        assert_eq!(
            dispatcher.add(&BoxedNumber::I32(2), &BoxedNumber::I64(3)),
            Err(Error::UnresolvedPromotion {
                left: NumericKind::I32,
                right: NumericKind::I64
            })
        );
    }

    #[test]
    fn custom_table_may_widen_further_than_standard() {
        let mut table = PromotionTable::empty();
        table
            .insert(NumericKind::U8, NumericKind::U8, NumericKind::F64)
            .unwrap();
        let dispatcher = Dispatcher::with_table(&table);

        assert_eq!(
            dispatcher.div(&BoxedNumber::U8(1), &BoxedNumber::U8(4)),
            Ok(BoxedNumber::F64(0.25))
        );
    }

    #[test]
    fn null_operands_are_reported_left_first() {
        assert_eq!(
            compute_dyn(OperatorKind::Add, None, None),
            Err(Error::NullOperand {
                side: OperandSide::Left
            })
        );
        assert_eq!(
            compute_dyn(OperatorKind::Add, Some(&1i32), None),
            Err(Error::NullOperand {
                side: OperandSide::Right
            })
        );
    }
}
