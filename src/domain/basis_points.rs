//! Basis-point representation for percentages.

use core::fmt;

/// Denominator for basis-point arithmetic (10 000 bp = 100%).
pub const BPS_DENOMINATOR: u32 = 10_000;

/// A percentage expressed in basis points (1 bp = 0.01%).
///
/// Any `u32` can be stored; [`FeeRate`](super::FeeRate) is the
/// validated wrapper used by pools.
///
/// # Examples
///
/// ```
/// use hydra_cpamm::domain::BasisPoints;
///
/// let bp = BasisPoints::new(30);
/// assert_eq!(bp.complement(), Some(BasisPoints::new(9_970)));
/// assert_eq!(bp.to_string(), "30bp");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// Zero basis points.
    pub const ZERO: Self = Self(0);

    /// 100% in basis points.
    pub const MAX_PERCENT: Self = Self(BPS_DENOMINATOR);

    /// Creates a new `BasisPoints` from a raw `u32`.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the underlying `u32` value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the value is strictly below 100%.
    #[must_use]
    pub const fn is_below_one_hundred_percent(&self) -> bool {
        self.0 < BPS_DENOMINATOR
    }

    /// Returns `10 000 − self`, or `None` above 100%.
    #[must_use]
    pub const fn complement(&self) -> Option<Self> {
        match BPS_DENOMINATOR.checked_sub(self.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
