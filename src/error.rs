//! Unified error types for the Hydra constant-product engine.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type.  Failures raised by a [`TransferGateway`] backend are
//! reported as [`TransferError`] and wrapped into
//! [`AmmError::Transfer`] when they surface through a pool operation.
//!
//! [`TransferGateway`]: crate::traits::TransferGateway

use thiserror::Error;

use crate::domain::AssetId;

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Broad category of an [`AmmError`].
///
/// No category is retried by the engine; retry is always a caller
/// decision (for example resubmitting a swap with a looser bound).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Malformed input, detectable before any arithmetic.
    Validation,
    /// Well-formed request whose outcome violates a stated bound.
    Economic,
    /// Overflow, division by zero or a broken invariant.
    Arithmetic,
    /// The transfer backend refused to move balances.
    Settlement,
}

/// Error returned by every fallible pool operation.
///
/// No variant leaves a partially applied state behind: when an
/// operation returns `Err`, the pool and the external balances are
/// exactly as they were before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    /// Both sides of the pair are the same asset.
    #[error("invalid asset pair: {0}")]
    InvalidAssetPair(&'static str),

    /// Fee rate outside `[0, 10_000)` basis points.
    #[error("invalid fee rate: {0}bp (must be below 10000bp)")]
    InvalidFeeRate(u32),

    /// A zero or out-of-range quantity was supplied.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// A configuration blueprint failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A pool for the same canonical pair is already registered.
    #[error("a pool for this asset pair already exists")]
    PoolAlreadyExists,

    /// No pool is registered for the requested pair.
    #[error("no pool registered for this asset pair")]
    PoolNotFound,

    /// The computed result is worse than the caller's bound.
    #[error("slippage exceeded: minimum {minimum}, actual {actual}")]
    SlippageExceeded {
        /// Bound supplied by the caller.
        minimum: u64,
        /// Value the pool would have delivered.
        actual: u64,
    },

    /// The pool cannot deliver the requested output.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// The first deposit cannot seed a usable pool.
    #[error("insufficient initial liquidity: {0}")]
    InsufficientInitialLiquidity(&'static str),

    /// The pool holds no reserves yet.
    #[error("pool not initialized: reserves are empty")]
    PoolNotInitialized,

    /// An intermediate or final value does not fit its integer width.
    #[error("arithmetic overflow: {0}")]
    ArithmeticOverflow(&'static str),

    /// Division with a zero denominator.
    #[error("division by zero")]
    DivisionByZero,

    /// A state transition would break a pool invariant.
    #[error("pool invariant violated: {0}")]
    InvariantViolation(&'static str),

    /// The transfer backend rejected the settlement.
    #[error("transfer failed: {0}")]
    Transfer(#[from] TransferError),
}

impl AmmError {
    /// Returns the [`ErrorClass`] of this error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidAssetPair(_)
            | Self::InvalidFeeRate(_)
            | Self::InvalidAmount(_)
            | Self::InvalidConfiguration(_)
            | Self::PoolAlreadyExists
            | Self::PoolNotFound => ErrorClass::Validation,
            Self::SlippageExceeded { .. }
            | Self::InsufficientLiquidity
            | Self::InsufficientInitialLiquidity(_)
            | Self::PoolNotInitialized => ErrorClass::Economic,
            Self::ArithmeticOverflow(_) | Self::DivisionByZero | Self::InvariantViolation(_) => {
                ErrorClass::Arithmetic
            }
            Self::Transfer(_) => ErrorClass::Settlement,
        }
    }
}

/// Failure reported by a [`TransferGateway`](crate::traits::TransferGateway)
/// backend.
///
/// Every primitive either succeeds completely or fails with one of
/// these variants and no effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// The debited account or vault holds less than required.
    #[error("insufficient balance: available {available}, required {required}")]
    InsufficientBalance {
        /// Balance currently held.
        available: u64,
        /// Amount the step tried to move.
        required: u64,
    },

    /// Vaults and claim mint have not been set up for the pool.
    #[error("custody has not been provisioned for this pool")]
    CustodyNotProvisioned,

    /// Vaults and claim mint already exist for the pool.
    #[error("custody is already provisioned for this pool")]
    CustodyAlreadyProvisioned,

    /// The backend does not know the asset.
    #[error("unknown asset {0}")]
    UnknownAsset(AssetId),

    /// The asset is issued under a different transfer standard than the
    /// pool's custody.
    #[error("asset {0} is not issued under the pool's transfer standard")]
    StandardMismatch(AssetId),

    /// The asset is not one of the two assets held by the custody.
    #[error("asset {0} is not held by this pool")]
    ForeignAsset(AssetId),

    /// Crediting a balance would exceed its integer width.
    #[error("balance overflow")]
    BalanceOverflow,

    /// Backend-specific refusal.
    #[error("transfer rejected: {0}")]
    Rejected(&'static str),

    /// A step failed and undoing the steps already applied failed too.
    /// External balances may be inconsistent with the pool.
    #[error("settlement step {step} failed and could not be rolled back")]
    CompensationFailed {
        /// Index of the step that failed first.
        step: usize,
    },
}
