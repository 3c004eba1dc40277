//! Dispatch configuration
//!
//! Knobs that change how results are produced without changing which kind an
//! operation is evaluated in.
use std::num::NonZeroU64;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// Overflow policies for integer operations and lossy integer conversions.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OverflowPolicy {
    /// Wrap around on overflow (two's complement)
    #[default]
    Wrap,
    /// Saturate to the maximum or minimum value of the compute kind
    Saturate,
    /// Report an error on overflow
    Checked,
}

impl OverflowPolicy {
    /// Creates an [`OverflowPolicy`] from its string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        OverflowPolicy::iter().find(|policy| policy.to_str() == s)
    }

    /// Returns the string representation of the [`OverflowPolicy`].
    pub fn to_str(&self) -> &'static str {
        match self {
            OverflowPolicy::Wrap => "wrap",
            OverflowPolicy::Saturate => "saturate",
            OverflowPolicy::Checked => "checked",
        }
    }
}

/// Options applied by a [`crate::Dispatcher`] to every operation it evaluates.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DispatchOptions {
    /// How integer overflow and out-of-range integer conversions are handled.
    pub overflow: OverflowPolicy,

    /// Number of significant digits kept in decimal results.
    ///
    /// `None` leaves decimal results exactly as computed.
    pub decimal_precision: Option<NonZeroU64>,
}

impl DispatchOptions {
    /// Significant digits of a 128-bit decimal.
    pub const DEFAULT_DECIMAL_PRECISION: NonZeroU64 = NonZeroU64::MIN.saturating_add(27);

    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn with_decimal_precision(mut self, digits: Option<NonZeroU64>) -> Self {
        self.decimal_precision = digits;
        self
    }
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            overflow: OverflowPolicy::default(),
            decimal_precision: Some(Self::DEFAULT_DECIMAL_PRECISION),
        }
    }
}
