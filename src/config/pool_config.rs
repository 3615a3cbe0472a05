//! Configuration for a constant-product pool.

use crate::domain::{AssetId, AssetPair, ClaimAmount, FeeRate, TransferStandard};
use crate::error::AmmError;

/// Immutable parameters of one pool.
///
/// The pair is stored in canonical order, the fee is fixed for the life
/// of the pool, and the transfer standard decides which backend
/// interface serves the pool's custody.
///
/// # Defaults
///
/// - Transfer standard: [`TransferStandard::Classic`].
/// - Minimum initial claim: one claim unit, i.e. the first deposit only
///   has to mint something.
///
/// # Examples
///
/// ```
/// use hydra_cpamm::config::PoolConfig;
/// use hydra_cpamm::domain::{AssetId, ClaimAmount, TransferStandard};
///
/// let cfg = PoolConfig::new(AssetId::from_bytes([2; 32]), AssetId::from_bytes([1; 32]), 30)
///     .expect("valid pair and fee")
///     .with_standard(TransferStandard::Extended)
///     .with_minimum_initial_claim(ClaimAmount::new(1_000))
///     .expect("non-zero floor");
///
/// assert_eq!(cfg.pair().asset_a(), AssetId::from_bytes([1; 32]));
/// assert_eq!(cfg.fee_rate().bps(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolConfig {
    pair: AssetPair,
    fee_rate: FeeRate,
    standard: TransferStandard,
    minimum_initial_claim: ClaimAmount,
}

impl PoolConfig {
    /// Creates a configuration from two assets in either order.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAssetPair`] if the assets are equal.
    /// - [`AmmError::InvalidFeeRate`] if `fee_bps >= 10 000`.
    pub fn new(asset_x: AssetId, asset_y: AssetId, fee_bps: u32) -> Result<Self, AmmError> {
        let config = Self {
            pair: AssetPair::new(asset_x, asset_y)?,
            fee_rate: FeeRate::new(fee_bps)?,
            standard: TransferStandard::default(),
            minimum_initial_claim: ClaimAmount::ONE,
        };
        config.validate()?;
        Ok(config)
    }

    /// Selects the transfer standard backing the pool.
    #[must_use]
    pub const fn with_standard(mut self, standard: TransferStandard) -> Self {
        self.standard = standard;
        self
    }

    /// Sets the smallest claim count a first deposit may mint.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `minimum` is zero.
    pub fn with_minimum_initial_claim(mut self, minimum: ClaimAmount) -> Result<Self, AmmError> {
        self.minimum_initial_claim = minimum;
        self.validate()?;
        Ok(self)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidFeeRate`] if the fee is out of range.
    /// - [`AmmError::InvalidConfiguration`] if the minimum initial claim
    ///   is zero.
    pub fn validate(&self) -> Result<(), AmmError> {
        FeeRate::new(self.fee_rate.bps())?;
        if self.minimum_initial_claim.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "minimum initial claim must be non-zero",
            ));
        }
        Ok(())
    }

    /// Returns the canonical asset pair.
    #[must_use]
    pub const fn pair(&self) -> AssetPair {
        self.pair
    }

    /// Returns the swap fee.
    #[must_use]
    pub const fn fee_rate(&self) -> FeeRate {
        self.fee_rate
    }

    /// Returns the transfer standard.
    #[must_use]
    pub const fn standard(&self) -> TransferStandard {
        self.standard
    }

    /// Returns the first-deposit floor.
    #[must_use]
    pub const fn minimum_initial_claim(&self) -> ClaimAmount {
        self.minimum_initial_claim
    }
}
