//! Claim-token quantities.

use core::fmt;

use super::Amount;

/// A quantity of claim tokens (LP shares) for one pool.
///
/// Kept distinct from [`Amount`] so that asset quantities and pool
/// shares can never be mixed up in a formula.  Individual holder
/// balances live in the transfer backend; the pool only tracks the
/// total supply.
///
/// # Examples
///
/// ```
/// use hydra_cpamm::domain::ClaimAmount;
///
/// let a = ClaimAmount::new(1_000);
/// let b = ClaimAmount::new(2_000);
/// assert_eq!(a.checked_add(&b), Some(ClaimAmount::new(3_000)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct ClaimAmount(u64);

impl ClaimAmount {
    /// No claims.
    pub const ZERO: Self = Self(0);

    /// Smallest non-zero claim quantity.
    pub const ONE: Self = Self(1);

    /// Creates a new `ClaimAmount` from a raw `u64` value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying `u64` value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns the value widened to `u128`.
    #[must_use]
    pub const fn wide(&self) -> u128 {
        self.0 as u128
    }

    /// Returns `true` if the quantity is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Reinterprets the quantity as an [`Amount`] of the claim token.
    #[must_use]
    pub const fn as_amount(&self) -> Amount {
        Amount::new(self.0)
    }
}

impl fmt::Display for ClaimAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants() {
        assert!(ClaimAmount::ZERO.is_zero());
        assert_eq!(ClaimAmount::ONE.get(), 1);
        assert_eq!(ClaimAmount::default(), ClaimAmount::ZERO);
    }

    #[test]
    fn add_and_sub() {
        let a = ClaimAmount::new(300);
        let b = ClaimAmount::new(100);
        assert_eq!(a.checked_sub(&b), Some(ClaimAmount::new(200)));
        assert_eq!(b.checked_sub(&a), None);
        assert_eq!(ClaimAmount::new(u64::MAX).checked_add(&ClaimAmount::ONE), None);
    }

    #[test]
    fn as_amount_keeps_value() {
        assert_eq!(ClaimAmount::new(77).as_amount(), Amount::new(77));
        assert_eq!(ClaimAmount::new(77).wide(), 77u128);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", ClaimAmount::new(141_421_356)), "141421356");
    }
}
