//! Pure state-transition math.
//!
//! Every function here takes a [`PoolState`](crate::pool::PoolState) by
//! reference and returns a quote plus the state that would follow.
//! Nothing is mutated and no balance moves; the
//! [`Pool`](crate::pool::Pool) commits the returned state only after the
//! matching [`Settlement`] has gone through the transfer gateway.
//!
//! | Operation | Quote only | Quote + next state |
//! |-----------|------------|--------------------|
//! | Deposit | [`quote_deposit`] | [`plan_deposit`] |
//! | Redemption | [`quote_redemption`] | [`plan_redemption`] |
//! | Swap | [`quote_swap`] | [`plan_swap`] |

mod liquidity;
mod settlement;
mod swap;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use liquidity::{plan_deposit, plan_redemption, quote_deposit, quote_redemption};
pub use settlement::{Settlement, TransferStep};
pub use swap::{plan_swap, quote_swap};
