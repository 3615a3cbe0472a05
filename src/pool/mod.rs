//! Pool state and the live pool that settles and commits it.
//!
//! [`PoolState`] is the pure accounting record with its invariants and
//! persisted layout ([`PoolRecord`]).  [`Pool`] binds a state to its
//! custody and runs every operation as plan, settle, commit.

mod constant_product;
mod state;

pub use constant_product::Pool;
pub use state::{PoolRecord, PoolState, PoolStatus};
