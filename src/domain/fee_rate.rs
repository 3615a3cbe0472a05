//! Validated swap fee rate.

use core::fmt;

use super::basis_points::BPS_DENOMINATOR;
use super::{Amount, BasisPoints, Rounding};
use crate::error::AmmError;
use crate::math::mul_div;

/// Swap fee in basis points, guaranteed to lie in `[0, 10 000)`.
///
/// The fee is taken from the swap input.  [`split`](Self::split)
/// floors the after-fee input, so the fee itself is effectively rounded
/// up in favour of the pool.
///
/// # Examples
///
/// ```
/// use hydra_cpamm::domain::{Amount, FeeRate};
///
/// let fee = FeeRate::new(30).expect("valid fee");
/// let (net, charged) = fee.split(Amount::new(10_000_000)).expect("no overflow");
/// assert_eq!(net, Amount::new(9_970_000));
/// assert_eq!(charged, Amount::new(30_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeeRate(BasisPoints);

impl FeeRate {
    /// No fee.
    pub const ZERO: Self = Self(BasisPoints::ZERO);

    /// 0.30%, the common volatile-pair rate.
    pub const STANDARD: Self = Self(BasisPoints::new(30));

    /// Creates a fee rate from raw basis points.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFeeRate`] if `bps >= 10 000`.
    pub const fn new(bps: u32) -> Result<Self, AmmError> {
        let bp = BasisPoints::new(bps);
        if !bp.is_below_one_hundred_percent() {
            return Err(AmmError::InvalidFeeRate(bps));
        }
        Ok(Self(bp))
    }

    /// Returns the rate as [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Returns the raw basis-point value.
    #[must_use]
    pub const fn bps(&self) -> u32 {
        self.0.get()
    }

    /// Splits a swap input into `(amount_after_fee, fee)`.
    ///
    /// `amount_after_fee = amount_in × (10 000 − bps) / 10 000`, floored.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] only if the rate was
    /// constructed out of range, which [`FeeRate::new`] prevents.
    pub fn split(&self, amount_in: Amount) -> Result<(Amount, Amount), AmmError> {
        let keep = self
            .0
            .complement()
            .ok_or(AmmError::ArithmeticOverflow("fee complement underflow"))?;
        let net = Amount::new(mul_div(
            amount_in.get(),
            u64::from(keep.get()),
            u64::from(BPS_DENOMINATOR),
            Rounding::Down,
        )?);
        let fee = amount_in
            .checked_sub(&net)
            .ok_or(AmmError::ArithmeticOverflow("fee underflow"))?;
        Ok((net, fee))
    }
}

impl Default for FeeRate {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeRate({})", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn rate(bps: u32) -> FeeRate {
        let Ok(r) = FeeRate::new(bps) else {
            panic!("valid fee rate expected: {bps}");
        };
        r
    }

    #[test]
    fn accepts_full_range() {
        assert_eq!(rate(0).bps(), 0);
        assert_eq!(rate(9_999).bps(), 9_999);
    }

    #[test]
    fn rejects_one_hundred_percent_and_above() {
        assert_eq!(FeeRate::new(10_000), Err(AmmError::InvalidFeeRate(10_000)));
        assert_eq!(
            FeeRate::new(u32::MAX),
            Err(AmmError::InvalidFeeRate(u32::MAX))
        );
    }

    #[test]
    fn split_thirty_bp() {
        let Ok((net, fee)) = rate(30).split(Amount::new(10_000_000)) else {
            panic!("expected Ok");
        };
        assert_eq!(net, Amount::new(9_970_000));
        assert_eq!(fee, Amount::new(30_000));
    }

    #[test]
    fn split_rounds_fee_up() {
        // 1 * 9970 / 10000 = 0.997 -> net 0, whole unit is fee.
        let Ok((net, fee)) = rate(30).split(Amount::new(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(net, Amount::ZERO);
        assert_eq!(fee, Amount::new(1));
    }

    #[test]
    fn split_zero_fee_is_identity() {
        let Ok((net, fee)) = FeeRate::ZERO.split(Amount::new(12_345)) else {
            panic!("expected Ok");
        };
        assert_eq!(net, Amount::new(12_345));
        assert_eq!(fee, Amount::ZERO);
    }

    #[test]
    fn split_max_amount_does_not_overflow() {
        let Ok((net, fee)) = rate(9_999).split(Amount::MAX) else {
            panic!("expected Ok");
        };
        assert_eq!(net.wide() + fee.wide(), Amount::MAX.wide());
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", FeeRate::STANDARD), "FeeRate(30bp)");
    }
}
