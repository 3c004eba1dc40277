//! Dynarith: arithmetic between numeric operands whose kinds are only known at runtime.
//!
//! Operands are [`BoxedNumber`]s, one variant per supported [`NumericKind`]: signed and
//! unsigned integers of 8 to 64 bits, `f32`, `f64`, and an arbitrary-precision decimal.
//! Evaluating `lhs op rhs` goes through three steps:
//! - the [`promote`] table picks the kind both operands are widened to;
//! - each operand is converted to that kind (see [`promote::Conversion`]);
//! - the native operator of that kind produces the result (see [`primitive`]).
//!
//! The result always carries the compute kind, so `i8 + u8` yields an `i16` and any
//! operation involving a decimal yields a decimal.
//!
//! Examples
//! ```
//! use dynarith::{BoxedNumber, NumericKind, OperatorKind};
//!
//! let sum = dynarith::add(&BoxedNumber::I8(5), &BoxedNumber::U8(250)).unwrap();
//! assert_eq!(sum, BoxedNumber::I16(255));
//!
//! let product = dynarith::compute(
//!     OperatorKind::Mul,
//!     &BoxedNumber::U32(3_000_000_000),
//!     &BoxedNumber::I32(2),
//! )
//! .unwrap();
//! assert_eq!(product.kind(), NumericKind::I64);
//!
//! assert!(dynarith::div(&BoxedNumber::I32(10), &BoxedNumber::I32(0)).is_err());
//! ```
pub mod classify;
pub mod dispatch;
pub mod error;
pub mod kind;
pub mod options;
pub mod primitive;
pub mod promote;
pub mod value;

pub use bigdecimal::BigDecimal;
pub use classify::classify;
pub use dispatch::{Dispatcher, OperatorKind, add, compute, compute_dyn, div, mul, rem, sub};
pub use error::{Error, OperandSide, Result};
pub use kind::NumericKind;
pub use options::{DispatchOptions, OverflowPolicy};
pub use promote::{PromotionRule, PromotionTable, resolve};
pub use value::BoxedNumber;
