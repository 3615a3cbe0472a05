//! Core swap pool trait for executing swaps and querying pool state.
//!
//! [`SwapPool`] covers the trading side of a pool:
//!
//! 1. **Execute**: [`SwapPool::swap`] prices the trade, settles it
//!    through a [`TransferGateway`] and commits the new reserves.
//! 2. **Quote**: [`SwapPool::quote_swap`] prices the same trade without
//!    touching anything.
//! 3. **Inspect**: [`SwapPool::asset_pair`] and [`SwapPool::fee_rate`].
//!
//! # Fee Deduction Invariant
//!
//! Fees are deducted from the input before the pricing formula:
//!
//! ```text
//! net_input  = ⌊amount_in × (10 000 − fee_bps) / 10 000⌋
//! fee        = amount_in − net_input
//! amount_out = ⌊reserve_out × net_input / (reserve_in + net_input)⌋
//! ```

use super::TransferGateway;
use crate::domain::{AccountId, AssetId, AssetPair, FeeRate, SwapDirection, SwapQuote, SwapRequest};
use crate::error::AmmError;

/// Trading interface of a pool.
///
/// # Errors
///
/// Methods that can fail return [`Result<T, AmmError>`].  Common error
/// variants include:
///
/// - [`AmmError::InvalidAmount`]: zero input
/// - [`AmmError::PoolNotInitialized`]: the pool holds no reserves
/// - [`AmmError::SlippageExceeded`]: output below the caller's bound
/// - [`AmmError::InsufficientLiquidity`]: the output cannot be paid
/// - [`AmmError::Transfer`]: the gateway refused the settlement
pub trait SwapPool {
    /// Executes an exact-input swap for `account`.
    ///
    /// The new reserves are committed only after `gateway` has settled
    /// both legs.  On any error the pool is unchanged.
    ///
    /// # Errors
    ///
    /// Any pricing error, or [`AmmError::Transfer`] if settlement fails.
    fn swap<G: TransferGateway + ?Sized>(
        &mut self,
        gateway: &G,
        account: AccountId,
        request: &SwapRequest,
    ) -> Result<SwapQuote, AmmError>;

    /// Prices an exact-input swap without side effects.
    ///
    /// # Errors
    ///
    /// The same pricing errors [`swap`](Self::swap) would return.
    fn quote_swap(&self, request: &SwapRequest) -> Result<SwapQuote, AmmError>;

    /// Returns the canonical pair traded by this pool.
    #[must_use]
    fn asset_pair(&self) -> AssetPair;

    /// Returns the swap fee, constant for the life of the pool.
    #[must_use]
    fn fee_rate(&self) -> FeeRate;

    /// Maps the asset being sold to a swap direction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAssetPair`] if `asset_in` is not traded
    /// by this pool.
    fn direction_for(&self, asset_in: &AssetId) -> Result<SwapDirection, AmmError> {
        self.asset_pair().direction_for(asset_in)
    }
}
