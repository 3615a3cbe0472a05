//! Checked arithmetic trait for domain wrapper types.
//!
//! The [`CheckedArithmetic`] trait lifts the `Option`-returning checked
//! methods on [`Amount`] and [`ClaimAmount`] into
//! [`Result<Self, AmmError>`](crate::error::AmmError), so the engine can
//! propagate failures with `?`.
//!
//! # Examples
//!
//! ```
//! use hydra_cpamm::domain::Amount;
//! use hydra_cpamm::math::CheckedArithmetic;
//!
//! let a = Amount::new(100);
//! let b = Amount::new(200);
//! assert_eq!(a.safe_add(&b), Ok(Amount::new(300)));
//! assert!(a.safe_sub(&b).is_err());
//! ```

use crate::domain::{Amount, ClaimAmount};
use crate::error::AmmError;

/// Fallible arithmetic for domain wrapper types.
///
/// # Contract
///
/// - **No panics**: every error condition produces `Err`.
/// - **No saturation**: errors propagate instead.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] if the sum exceeds `u64`.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] if the result would be
    /// negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::ArithmeticOverflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::ArithmeticOverflow("amount subtraction underflow"))
    }
}

impl CheckedArithmetic for ClaimAmount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::ArithmeticOverflow("claim supply overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::ArithmeticOverflow("claim subtraction underflow"))
    }
}
