//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use hydra_cpamm::prelude::*;
//! ```

pub use crate::domain::{
    AccountId, Amount, AssetId, AssetPair, BasisPoints, ClaimAmount, Custody, DepositQuote,
    DepositRequest, FeeRate, RedemptionQuote, RedemptionRequest, Rounding, SwapDirection,
    SwapQuote, SwapRequest, TransferStandard,
};

pub use crate::traits::{FromConfig, LiquidityPool, SwapPool, TransferGateway};

pub use crate::math::CheckedArithmetic;

pub use crate::config::PoolConfig;

pub use crate::error::{AmmError, ErrorClass, Result, TransferError};

pub use crate::gateway::InMemoryLedger;

pub use crate::pool::{Pool, PoolRecord, PoolState, PoolStatus};

pub use crate::registry::{PoolHandle, PoolRegistry};
