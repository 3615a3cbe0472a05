//! Generic construction trait for pool instantiation from configuration.
//!
//! [`FromConfig`] gives the registry one way to build a pool from its
//! blueprint.  Implementations **must** validate the configuration, so a
//! successfully constructed pool is always in a valid initial state.

use crate::error::AmmError;

/// Builds a value from a validated configuration.
///
/// There is no blanket implementation: every pool-config pairing is
/// written out explicitly.
///
/// # Implementors
///
/// - `impl FromConfig<PoolConfig> for Pool`
pub trait FromConfig<C> {
    /// Creates a new instance from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] (or a more specific
    /// variant) if the configuration is invalid.
    fn from_config(config: &C) -> Result<Self, AmmError>
    where
        Self: Sized;
}
