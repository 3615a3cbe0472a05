//! Domain value types used throughout the engine.
//!
//! Newtypes with validated constructors: amounts and claim quantities,
//! fee rates, asset identifiers and canonical pairs, swap and liquidity
//! requests, their quotes, and the custody description of a pool.

mod amount;
mod asset_id;
mod asset_pair;
mod basis_points;
mod claim_amount;
mod custody;
mod fee_rate;
mod liquidity;
mod rounding;
mod swap;

pub use amount::Amount;
pub use asset_id::{AccountId, AssetId};
pub use asset_pair::AssetPair;
pub use basis_points::{BasisPoints, BPS_DENOMINATOR};
pub use claim_amount::ClaimAmount;
pub use custody::{Custody, TransferStandard};
pub use fee_rate::FeeRate;
pub use liquidity::{DepositQuote, DepositRequest, RedemptionQuote, RedemptionRequest};
pub use rounding::Rounding;
pub use swap::{SwapDirection, SwapQuote, SwapRequest};
