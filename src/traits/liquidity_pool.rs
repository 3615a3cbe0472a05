//! Liquidity management trait extending [`SwapPool`].
//!
//! # Claim Accounting Invariant
//!
//! The claim supply reported by [`LiquidityPool::claim_supply`] **only**
//! changes through [`LiquidityPool::add_liquidity`] and
//! [`LiquidityPool::remove_liquidity`].  Swaps move reserves but never
//! the supply.  Individual claim balances are held by the transfer
//! backend, not by the pool.

use super::{SwapPool, TransferGateway};
use crate::domain::{
    AccountId, ClaimAmount, DepositQuote, DepositRequest, RedemptionQuote, RedemptionRequest,
};
use crate::error::AmmError;

/// Pools that issue claims against deposited reserves.
pub trait LiquidityPool: SwapPool {
    /// Deposits both assets for `account` and mints claims.
    ///
    /// On an empty pool the desired amounts are taken in full; on a
    /// seeded pool only the amounts matching the current ratio are.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientInitialLiquidity`] on a bad first deposit.
    /// - [`AmmError::InvalidAmount`] if nothing would be minted.
    /// - [`AmmError::SlippageExceeded`] if fewer claims than requested.
    /// - [`AmmError::Transfer`] if settlement fails.
    fn add_liquidity<G: TransferGateway + ?Sized>(
        &mut self,
        gateway: &G,
        account: AccountId,
        request: &DepositRequest,
    ) -> Result<DepositQuote, AmmError>;

    /// Burns claims held by `account` and pays out both assets.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] for a zero or oversized claim.
    /// - [`AmmError::SlippageExceeded`] if either output is too low.
    /// - [`AmmError::Transfer`] if settlement fails.
    fn remove_liquidity<G: TransferGateway + ?Sized>(
        &mut self,
        gateway: &G,
        account: AccountId,
        request: &RedemptionRequest,
    ) -> Result<RedemptionQuote, AmmError>;

    /// Prices a deposit without side effects.
    ///
    /// # Errors
    ///
    /// The same pricing errors as [`add_liquidity`](Self::add_liquidity).
    fn quote_deposit(&self, request: &DepositRequest) -> Result<DepositQuote, AmmError>;

    /// Prices a redemption without side effects.
    ///
    /// # Errors
    ///
    /// The same pricing errors as
    /// [`remove_liquidity`](Self::remove_liquidity).
    fn quote_redemption(&self, request: &RedemptionRequest) -> Result<RedemptionQuote, AmmError>;

    /// Returns the total claims outstanding.
    #[must_use]
    fn claim_supply(&self) -> ClaimAmount;
}
