//! Pool configuration.
//!
//! A [`PoolConfig`] is the declarative blueprint for one pool: its
//! canonical pair, fee rate, transfer standard and minimum seed claim.
//! Construction validates every field, so a config in hand is always
//! usable by [`FromConfig`](crate::traits::FromConfig).

mod pool_config;

pub use pool_config::PoolConfig;
