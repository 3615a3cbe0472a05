//! Persisted pool record and its invariants.

use core::fmt;

use crate::domain::{Amount, AssetId, AssetPair, ClaimAmount, FeeRate, SwapDirection};
use crate::error::AmmError;

/// Lifecycle phase of a pool, derived from its claim supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolStatus {
    /// No reserves and no claims outstanding.  Only a deposit is valid.
    Empty,
    /// Reserves on both sides and a non-zero claim supply.
    Seeded,
}

impl fmt::Display for PoolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Seeded => write!(f, "seeded"),
        }
    }
}

/// The accounting record of one trading pair.
///
/// Pure data plus invariant checks.  A `PoolState` always satisfies
/// `reserve_a == 0 ⟺ reserve_b == 0 ⟺ claim_supply == 0`; the only way
/// to produce a state with different balances is
/// [`with_balances`](Self::with_balances), which re-checks it.
///
/// # Examples
///
/// ```
/// use hydra_cpamm::domain::AssetId;
/// use hydra_cpamm::pool::{PoolState, PoolStatus};
///
/// let state = PoolState::initialize(
///     AssetId::from_bytes([9; 32]),
///     AssetId::from_bytes([3; 32]),
///     30,
/// )
/// .expect("valid pool");
///
/// assert_eq!(state.status(), PoolStatus::Empty);
/// assert_eq!(state.pair().asset_a(), AssetId::from_bytes([3; 32]));
/// assert_eq!(state.k(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolState {
    pair: AssetPair,
    fee_rate: FeeRate,
    reserve_a: Amount,
    reserve_b: Amount,
    claim_supply: ClaimAmount,
}

impl PoolState {
    /// Creates an empty pool for two assets in either order.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAssetPair`] if both assets are equal.
    /// - [`AmmError::InvalidFeeRate`] if `fee_bps >= 10 000`.
    pub fn initialize(asset_x: AssetId, asset_y: AssetId, fee_bps: u32) -> Result<Self, AmmError> {
        let pair = AssetPair::new(asset_x, asset_y)?;
        let fee_rate = FeeRate::new(fee_bps)?;
        Ok(Self::empty(pair, fee_rate))
    }

    /// Creates an empty pool from already validated parts.
    #[must_use]
    pub const fn empty(pair: AssetPair, fee_rate: FeeRate) -> Self {
        Self {
            pair,
            fee_rate,
            reserve_a: Amount::ZERO,
            reserve_b: Amount::ZERO,
            claim_supply: ClaimAmount::ZERO,
        }
    }

    /// Canonical pair this pool trades.
    #[must_use]
    pub const fn pair(&self) -> AssetPair {
        self.pair
    }

    /// Swap fee, fixed for the life of the pool.
    #[must_use]
    pub const fn fee_rate(&self) -> FeeRate {
        self.fee_rate
    }

    /// Reserve of asset A.
    #[must_use]
    pub const fn reserve_a(&self) -> Amount {
        self.reserve_a
    }

    /// Reserve of asset B.
    #[must_use]
    pub const fn reserve_b(&self) -> Amount {
        self.reserve_b
    }

    /// Total claims outstanding.
    #[must_use]
    pub const fn claim_supply(&self) -> ClaimAmount {
        self.claim_supply
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn status(&self) -> PoolStatus {
        if self.claim_supply.is_zero() {
            PoolStatus::Empty
        } else {
            PoolStatus::Seeded
        }
    }

    /// Returns `true` if the pool holds nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.claim_supply.is_zero()
    }

    /// Constant-product invariant `reserve_a × reserve_b`, exact in `u128`.
    #[must_use]
    pub const fn k(&self) -> u128 {
        self.reserve_a.wide() * self.reserve_b.wide()
    }

    /// Returns `(reserve_in, reserve_out)` for a swap direction.
    pub const fn reserves_for(&self, direction: SwapDirection) -> (Amount, Amount) {
        match direction {
            SwapDirection::AToB => (self.reserve_a, self.reserve_b),
            SwapDirection::BToA => (self.reserve_b, self.reserve_a),
        }
    }

    /// Verifies the emptiness invariant.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvariantViolation`] if exactly one or two of
    /// the three balances are zero.
    pub const fn check_invariants(&self) -> Result<(), AmmError> {
        let a = self.reserve_a.is_zero();
        let b = self.reserve_b.is_zero();
        let s = self.claim_supply.is_zero();
        if a == b && b == s {
            Ok(())
        } else {
            Err(AmmError::InvariantViolation(
                "reserves and claim supply must be all zero or all non-zero",
            ))
        }
    }

    /// Returns a copy with new balances, keeping pair and fee.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvariantViolation`] if the new balances break
    /// the emptiness invariant.
    pub fn with_balances(
        &self,
        reserve_a: Amount,
        reserve_b: Amount,
        claim_supply: ClaimAmount,
    ) -> Result<Self, AmmError> {
        let next = Self {
            reserve_a,
            reserve_b,
            claim_supply,
            ..*self
        };
        next.check_invariants()?;
        Ok(next)
    }

    /// Flattens the state into its persisted layout.
    #[must_use]
    pub const fn to_record(&self) -> PoolRecord {
        PoolRecord {
            asset_a: self.pair.asset_a(),
            asset_b: self.pair.asset_b(),
            fee_rate_bps: self.fee_rate.bps(),
            reserve_a: self.reserve_a.get(),
            reserve_b: self.reserve_b.get(),
            claim_supply: self.claim_supply.get(),
        }
    }

    /// Rebuilds a state from its persisted layout.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAssetPair`] if the assets are equal or not in
    ///   canonical order.
    /// - [`AmmError::InvalidFeeRate`] if the stored fee is out of range.
    /// - [`AmmError::InvariantViolation`] if the balances are inconsistent.
    pub fn from_record(record: &PoolRecord) -> Result<Self, AmmError> {
        if record.asset_a >= record.asset_b {
            return Err(AmmError::InvalidAssetPair(
                "stored pair is not in canonical order",
            ));
        }
        let pair = AssetPair::new(record.asset_a, record.asset_b)?;
        let fee_rate = FeeRate::new(record.fee_rate_bps)?;
        Self::empty(pair, fee_rate).with_balances(
            Amount::new(record.reserve_a),
            Amount::new(record.reserve_b),
            ClaimAmount::new(record.claim_supply),
        )
    }
}

impl fmt::Display for PoolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pool({}, fee={}bp, reserves={}/{}, supply={})",
            self.pair,
            self.fee_rate.bps(),
            self.reserve_a,
            self.reserve_b,
            self.claim_supply
        )
    }
}

/// Flat persisted layout of a pool.
///
/// `{asset_a, asset_b, fee_rate_bps, reserve_a, reserve_b, claim_supply}`.
/// With the `serde` feature it (de)serializes field by field; use
/// [`PoolState::from_record`] to bring it back under validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolRecord {
    /// Canonical side A.
    pub asset_a: AssetId,
    /// Canonical side B.
    pub asset_b: AssetId,
    /// Swap fee in basis points.
    pub fee_rate_bps: u32,
    /// Reserve of asset A.
    pub reserve_a: u64,
    /// Reserve of asset B.
    pub reserve_b: u64,
    /// Total claims outstanding.
    pub claim_supply: u64,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn x() -> AssetId {
        AssetId::from_bytes([1; 32])
    }

    fn y() -> AssetId {
        AssetId::from_bytes([2; 32])
    }

    fn seeded() -> PoolState {
        let Ok(state) = PoolState::initialize(x(), y(), 30) else {
            panic!("valid pool");
        };
        let Ok(state) =
            state.with_balances(Amount::new(1_000), Amount::new(4_000), ClaimAmount::new(2_000))
        else {
            panic!("consistent balances");
        };
        state
    }

    #[test]
    fn initialize_is_empty() {
        let Ok(state) = PoolState::initialize(y(), x(), 0) else {
            panic!("valid pool");
        };
        assert_eq!(state.status(), PoolStatus::Empty);
        assert!(state.is_empty());
        assert_eq!(state.reserve_a(), Amount::ZERO);
        assert_eq!(state.reserve_b(), Amount::ZERO);
        assert_eq!(state.claim_supply(), ClaimAmount::ZERO);
        assert_eq!(state.pair().asset_a(), x());
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn initialize_rejects_same_asset() {
        let Err(AmmError::InvalidAssetPair(_)) = PoolState::initialize(x(), x(), 30) else {
            panic!("expected InvalidAssetPair");
        };
    }

    #[test]
    fn initialize_rejects_fee_at_one_hundred_percent() {
        assert_eq!(
            PoolState::initialize(x(), y(), 10_000),
            Err(AmmError::InvalidFeeRate(10_000))
        );
        assert!(PoolState::initialize(x(), y(), 9_999).is_ok());
    }

    #[test]
    fn with_balances_checks_invariant() {
        let empty = PoolState::empty(seeded().pair(), FeeRate::ZERO);
        let Err(AmmError::InvariantViolation(_)) =
            empty.with_balances(Amount::new(1), Amount::ZERO, ClaimAmount::ONE)
        else {
            panic!("expected InvariantViolation");
        };
        let Err(AmmError::InvariantViolation(_)) =
            empty.with_balances(Amount::new(1), Amount::new(1), ClaimAmount::ZERO)
        else {
            panic!("expected InvariantViolation");
        };
    }

    #[test]
    fn seeded_status_and_k() {
        let state = seeded();
        assert_eq!(state.status(), PoolStatus::Seeded);
        assert_eq!(state.k(), 4_000_000);
    }

    #[test]
    fn k_does_not_overflow_at_max() {
        let Ok(state) = seeded().with_balances(Amount::MAX, Amount::MAX, ClaimAmount::ONE) else {
            panic!("consistent balances");
        };
        assert_eq!(state.k(), u128::from(u64::MAX) * u128::from(u64::MAX));
    }

    #[test]
    fn reserves_for_direction() {
        let state = seeded();
        assert_eq!(
            state.reserves_for(SwapDirection::AToB),
            (Amount::new(1_000), Amount::new(4_000))
        );
        assert_eq!(
            state.reserves_for(SwapDirection::BToA),
            (Amount::new(4_000), Amount::new(1_000))
        );
    }

    #[test]
    fn record_round_trip() {
        let state = seeded();
        let record = state.to_record();
        assert_eq!(record.fee_rate_bps, 30);
        assert_eq!(record.claim_supply, 2_000);
        assert_eq!(PoolState::from_record(&record), Ok(state));
    }

    #[test]
    fn from_record_rejects_bad_layouts() {
        let good = seeded().to_record();

        let swapped = PoolRecord {
            asset_a: good.asset_b,
            asset_b: good.asset_a,
            ..good
        };
        let Err(AmmError::InvalidAssetPair(_)) = PoolState::from_record(&swapped) else {
            panic!("expected InvalidAssetPair");
        };

        let bad_fee = PoolRecord {
            fee_rate_bps: 12_000,
            ..good
        };
        assert_eq!(
            PoolState::from_record(&bad_fee),
            Err(AmmError::InvalidFeeRate(12_000))
        );

        let half_empty = PoolRecord {
            reserve_b: 0,
            ..good
        };
        let Err(AmmError::InvariantViolation(_)) = PoolState::from_record(&half_empty) else {
            panic!("expected InvariantViolation");
        };
    }

    #[test]
    fn display() {
        let s = seeded().to_string();
        assert!(s.contains("fee=30bp"));
        assert!(s.contains("reserves=1000/4000"));
        assert!(s.contains("supply=2000"));
    }
}
