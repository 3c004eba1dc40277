use std::any::TypeId;

use strum::EnumIs;
use thiserror::Error;

use crate::{dispatch::OperatorKind, kind::NumericKind};

/// Position of an operand in a binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandSide {
    Left,
    Right,
}

impl std::fmt::Display for OperandSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperandSide::Left => write!(f, "left"),
            OperandSide::Right => write!(f, "right"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, Error)]
pub enum Error {
    /// The runtime type of an operand is not one of the supported numeric kinds.
    #[error(
        "Operand has an unsupported runtime type ({type_id:?}). Expected one of i8, u8, i16, u16, i32, u32, i64, u64, f32, f64 or a decimal."
    )]
    UnsupportedType { type_id: TypeId },

    /// An operand was absent.
    #[error("The {side} operand is missing. Both operands are required.")]
    NullOperand { side: OperandSide },

    /// The promotion table has no entry for the pair of kinds.
    #[error("No promotion rule is defined for operands of kinds `{left}` and `{right}`.")]
    UnresolvedPromotion {
        left: NumericKind,
        right: NumericKind,
    },

    /// Integer or decimal division (or remainder) by zero.
    #[error("Division by zero while evaluating in `{kind}`.")]
    DivideByZero { kind: NumericKind },

    /// The integer result does not fit in the compute kind under a checked overflow policy.
    #[error("Arithmetic overflow evaluating `{op}` in `{kind}`.")]
    Overflow { op: OperatorKind, kind: NumericKind },

    /// An operand value is out of range of the kind it must be converted to.
    #[error("Value `{value}` of kind `{from}` does not fit in `{to}`.")]
    ConversionOverflow {
        from: NumericKind,
        to: NumericKind,
        value: i128,
    },

    /// A non-finite floating-point value cannot be represented as a decimal.
    #[error("The `{from}` value `{value}` has no `{to}` representation.")]
    NotRepresentable {
        from: NumericKind,
        to: NumericKind,
        value: String,
    },

    /// A promotion rule would convert an operand to a narrower kind.
    #[error("Converting `{from}` to `{to}` would narrow the operand; promotion rules only widen.")]
    NarrowingConversion { from: NumericKind, to: NumericKind },
}

pub type Result<T> = std::result::Result<T, Error>;
