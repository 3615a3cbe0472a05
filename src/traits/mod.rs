//! Core trait abstractions for pool operations.
//!
//! [`SwapPool`] and [`LiquidityPool`] are the operation surfaces of a
//! pool, [`FromConfig`] builds one from its blueprint, and
//! [`TransferGateway`] is the seam to the custody backend that moves
//! real balances.

mod from_config;
mod liquidity_pool;
mod swap_pool;
mod transfer_gateway;

pub use from_config::FromConfig;
pub use liquidity_pool::LiquidityPool;
pub use swap_pool::SwapPool;
pub use transfer_gateway::TransferGateway;
