//! Pool lifecycle.
//!
//! [`PoolRegistry`] creates pools from [`PoolConfig`] values, provisions
//! their custody through the gateway and keeps one [`PoolHandle`] per
//! canonical pair.
//!
//! [`PoolConfig`]: crate::config::PoolConfig

mod pool_registry;

pub use pool_registry::{PoolHandle, PoolRegistry};
