//! Promotion rules
//!
//! Given the kinds of two operands, a [`PromotionRule`] names the kind the
//! operation is evaluated in (the compute kind) and how each operand reaches
//! it. Rules are ranked, first match wins:
//!
//! 1. identical kinds stay as they are;
//! 2. a decimal on either side makes the operation decimal, floats included;
//! 3. otherwise a float on either side makes the operation floating point,
//!    `f64` unless both sides fit in an `f32` mantissa;
//! 4. two integers evaluate in the smallest integer kind holding both ranges,
//!    preferring signed kinds when signedness differs and capping at `i64`.
//!
//! The standard rules live in a process-wide [`PromotionTable`] built on first
//! use and never mutated afterwards.
use enum_map::EnumMap;
use log::debug;
use once_cell::sync::Lazy;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::EnumIs;

use crate::{
    error::{Error, Result},
    kind::{NumericKind, Signedness},
    options::OverflowPolicy,
    value::BoxedNumber,
};

/// How an operand is brought to the compute kind.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, EnumIs)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Conversion {
    /// The operand already has the compute kind.
    Identity,
    /// Sign or zero extension into an integer kind covering the whole source range.
    IntExtend,
    /// Integer conversion into a kind that does not cover the whole source range.
    ///
    /// Out-of-range values are handled by the [`OverflowPolicy`] in effect.
    Lossy,
    /// Integer to floating point, or `f32` to `f64`.
    ToFloat,
    /// Any integer or float to decimal.
    ToDecimal,
}

impl Conversion {
    /// Returns the conversion from `from` to `to`, or `None` if it would narrow.
    ///
    /// Narrowing conversions are float to integer, `f64` to `f32`, and decimal to
    /// anything else.
    pub fn between(from: NumericKind, to: NumericKind) -> Option<Self> {
        if from == to {
            return Some(Conversion::Identity);
        }

        match (from, to) {
            (_, NumericKind::Dec) => Some(Conversion::ToDecimal),
            (NumericKind::Dec, _) => None,
            (NumericKind::F32, NumericKind::F64) => Some(Conversion::ToFloat),
            (NumericKind::F64, _) | (NumericKind::F32, _) => None,
            (_, NumericKind::F32) | (_, NumericKind::F64) => Some(Conversion::ToFloat),
            (from, to) if from.int_range_within(&to) => Some(Conversion::IntExtend),
            _ => Some(Conversion::Lossy),
        }
    }

    /// Converts `value` to `to`.
    ///
    /// `value` must have the source kind this conversion was derived for.
    pub fn apply(
        &self,
        value: &BoxedNumber,
        to: NumericKind,
        policy: OverflowPolicy,
    ) -> Result<BoxedNumber> {
        let from = value.kind();
        let narrowing = Error::NarrowingConversion { from, to };

        match self {
            Conversion::Identity if from == to => Ok(value.clone()),
            Conversion::Identity => Err(narrowing),
            Conversion::IntExtend | Conversion::Lossy => {
                let v = value.as_i128().ok_or(narrowing.clone())?;
                if let Some(converted) = BoxedNumber::from_i128(to, v) {
                    return Ok(converted);
                }
                let converted = match policy {
                    OverflowPolicy::Wrap => BoxedNumber::from_i128_wrapping(to, v),
                    OverflowPolicy::Saturate => BoxedNumber::from_i128_saturating(to, v),
                    OverflowPolicy::Checked => {
                        return Err(Error::ConversionOverflow { from, to, value: v });
                    }
                };
                converted.ok_or(narrowing)
            }
            Conversion::ToFloat => match (value, to) {
                (BoxedNumber::F32(v), NumericKind::F64) => Ok(BoxedNumber::F64(f64::from(*v))),
                (_, NumericKind::F32) => {
                    Ok(BoxedNumber::F32(value.as_i128().ok_or(narrowing)? as f32))
                }
                (_, NumericKind::F64) => {
                    Ok(BoxedNumber::F64(value.as_i128().ok_or(narrowing)? as f64))
                }
                _ => Err(narrowing),
            },
            Conversion::ToDecimal if to.is_decimal() => to_decimal(value).map(BoxedNumber::Dec),
            Conversion::ToDecimal => Err(narrowing),
        }
    }
}

/// Floats go through their shortest round-trip decimal representation, so
/// `0.1f64` becomes exactly `0.1` rather than its binary expansion.
fn to_decimal(value: &BoxedNumber) -> Result<bigdecimal::BigDecimal> {
    use bigdecimal::BigDecimal;

    let not_representable = |text: String| Error::NotRepresentable {
        from: value.kind(),
        to: NumericKind::Dec,
        value: text,
    };

    match value {
        BoxedNumber::I8(v) => Ok(BigDecimal::from(i64::from(*v))),
        BoxedNumber::I16(v) => Ok(BigDecimal::from(i64::from(*v))),
        BoxedNumber::I32(v) => Ok(BigDecimal::from(i64::from(*v))),
        BoxedNumber::I64(v) => Ok(BigDecimal::from(*v)),
        BoxedNumber::U8(v) => Ok(BigDecimal::from(u64::from(*v))),
        BoxedNumber::U16(v) => Ok(BigDecimal::from(u64::from(*v))),
        BoxedNumber::U32(v) => Ok(BigDecimal::from(u64::from(*v))),
        BoxedNumber::U64(v) => Ok(BigDecimal::from(*v)),
        BoxedNumber::F32(v) if v.is_finite() => v
            .to_string()
            .parse::<BigDecimal>()
            .map_err(|_| not_representable(v.to_string())),
        BoxedNumber::F64(v) if v.is_finite() => v
            .to_string()
            .parse::<BigDecimal>()
            .map_err(|_| not_representable(v.to_string())),
        BoxedNumber::F32(v) => Err(not_representable(v.to_string())),
        BoxedNumber::F64(v) => Err(not_representable(v.to_string())),
        BoxedNumber::Dec(v) => Ok(v.clone()),
    }
}

/// A resolved promotion for an ordered pair of operand kinds.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PromotionRule {
    /// Kind the operation is evaluated in, and the kind of its result.
    pub compute: NumericKind,
    /// Conversion applied to the left operand.
    pub left: Conversion,
    /// Conversion applied to the right operand.
    pub right: Conversion,
}

impl PromotionRule {
    /// Builds the rule evaluating `left ⊗ right` in `compute`.
    ///
    /// Fails with [`Error::NarrowingConversion`] if either operand would have to narrow.
    pub fn new(left: NumericKind, right: NumericKind, compute: NumericKind) -> Result<Self> {
        let narrowing = |from| Error::NarrowingConversion { from, to: compute };
        Ok(Self {
            compute,
            left: Conversion::between(left, compute).ok_or_else(|| narrowing(left))?,
            right: Conversion::between(right, compute).ok_or_else(|| narrowing(right))?,
        })
    }

    /// Converts both operands to the compute kind.
    pub fn widen(
        &self,
        lhs: &BoxedNumber,
        rhs: &BoxedNumber,
        policy: OverflowPolicy,
    ) -> Result<(BoxedNumber, BoxedNumber)> {
        Ok((
            self.left.apply(lhs, self.compute, policy)?,
            self.right.apply(rhs, self.compute, policy)?,
        ))
    }

    /// Returns `true` if neither side goes through a [`Conversion::Lossy`] integer conversion.
    pub fn is_lossless(&self) -> bool {
        !self.left.is_lossy() && !self.right.is_lossy()
    }
}

impl std::fmt::Display for PromotionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:?}, {:?})", self.compute, self.left, self.right)
    }
}

/// Compute kind of the standard promotion rules for `left ⊗ right`.
///
/// Total over all pairs of kinds.
pub const fn promotion_kind(left: NumericKind, right: NumericKind) -> NumericKind {
    use crate::kind::NumericKind::*;

    if left as u8 == right as u8 {
        return left;
    }

    match (left, right) {
        (Dec, _) | (_, Dec) => Dec,
        (F64, _) | (_, F64) => F64,
        // f32 carries a 24-bit mantissa
        (F32, other) | (other, F32) => {
            if other.bit_width() <= 16 {
                F32
            } else {
                F64
            }
        }
        _ => integer_promotion(left, right),
    }
}

const fn integer_promotion(left: NumericKind, right: NumericKind) -> NumericKind {
    let (left_bits, right_bits) = (left.bit_width(), right.bit_width());
    match (left.signedness(), right.signedness()) {
        (Some(Signedness::Signed), Some(Signedness::Unsigned)) => {
            mixed_sign_promotion(left_bits, right_bits)
        }
        (Some(Signedness::Unsigned), Some(Signedness::Signed)) => {
            mixed_sign_promotion(right_bits, left_bits)
        }
        _ => {
            if left_bits >= right_bits {
                left
            } else {
                right
            }
        }
    }
}

/// `u64` meets its signed counterpart in `i64`: the one lossy pairing.
const fn mixed_sign_promotion(signed_bits: u32, unsigned_bits: u32) -> NumericKind {
    let bits = if signed_bits > unsigned_bits {
        signed_bits
    } else if unsigned_bits >= 64 {
        64
    } else {
        unsigned_bits * 2
    };

    match bits {
        8 => NumericKind::I8,
        16 => NumericKind::I16,
        32 => NumericKind::I32,
        _ => NumericKind::I64,
    }
}

static STANDARD: Lazy<PromotionTable> = Lazy::new(|| {
    let table = PromotionTable {
        rules: EnumMap::from_fn(|left| {
            EnumMap::from_fn(|right| {
                PromotionRule::new(left, right, promotion_kind(left, right)).ok()
            })
        }),
    };
    debug!(
        "Standard promotion table built with {} rules ({} lossy).",
        table.len(),
        table.iter().filter(|(_, _, rule)| !rule.is_lossless()).count()
    );
    table
});

/// Lookup table from an ordered pair of operand kinds to its [`PromotionRule`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromotionTable {
    rules: EnumMap<NumericKind, EnumMap<NumericKind, Option<PromotionRule>>>,
}

impl PromotionTable {
    /// A table without any rule; every lookup fails until rules are inserted.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The shared table of standard promotion rules, defined for every pair of kinds.
    pub fn standard() -> &'static PromotionTable {
        &STANDARD
    }

    /// Defines the rule for `left ⊗ right`, returning the rule it replaces.
    pub fn insert(
        &mut self,
        left: NumericKind,
        right: NumericKind,
        compute: NumericKind,
    ) -> Result<Option<PromotionRule>> {
        let rule = PromotionRule::new(left, right, compute)?;
        Ok(self.rules[left][right].replace(rule))
    }

    /// Removes the rule for `left ⊗ right`.
    pub fn remove(&mut self, left: NumericKind, right: NumericKind) -> Option<PromotionRule> {
        self.rules[left][right].take()
    }

    pub fn get(&self, left: NumericKind, right: NumericKind) -> Option<&PromotionRule> {
        self.rules[left][right].as_ref()
    }

    /// Returns the rule for `left ⊗ right`.
    ///
    /// Fails with [`Error::UnresolvedPromotion`] if the pair has no rule.
    pub fn resolve(&self, left: NumericKind, right: NumericKind) -> Result<PromotionRule> {
        self.rules[left][right].ok_or(Error::UnresolvedPromotion { left, right })
    }

    /// Number of pairs with a defined rule.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if every ordered pair of kinds has a rule.
    pub fn is_total(&self) -> bool {
        self.rules
            .values()
            .all(|row| row.values().all(|rule| rule.is_some()))
    }

    /// Iterates over defined rules as `(left, right, rule)`.
    pub fn iter(&self) -> impl Iterator<Item = (NumericKind, NumericKind, &PromotionRule)> {
        self.rules.iter().flat_map(|(left, row)| {
            row.iter()
                .filter_map(move |(right, rule)| rule.as_ref().map(|rule| (left, right, rule)))
        })
    }
}

/// Resolves `left ⊗ right` against the standard table.
#[inline]
pub fn resolve(left: NumericKind, right: NumericKind) -> Result<PromotionRule> {
    PromotionTable::standard().resolve(left, right)
}
