//! Widening multiply-then-divide and proportional scaling.
//!
//! Operands are `u64`; every product is formed in `u128`, where the
//! product of two `u64` values always fits.  Narrowing a result back to
//! `u64` is checked and fails with [`AmmError::ArithmeticOverflow`].
//!
//! # Examples
//!
//! ```
//! use hydra_cpamm::domain::Rounding;
//! use hydra_cpamm::math::mul_div;
//!
//! assert_eq!(mul_div(u64::MAX, u64::MAX, u64::MAX, Rounding::Down), Ok(u64::MAX));
//! assert_eq!(mul_div(10, 1, 3, Rounding::Up), Ok(4));
//! assert!(mul_div(u64::MAX, 2, 1, Rounding::Down).is_err());
//! ```

use crate::domain::{Amount, ClaimAmount, Rounding};
use crate::error::AmmError;

/// Divides two `u128` values with an explicit [`Rounding`].
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
/// - [`AmmError::ArithmeticOverflow`] if rounding up overflows.
pub fn div_wide(numerator: u128, denominator: u128, rounding: Rounding) -> Result<u128, AmmError> {
    if denominator == 0 {
        return Err(AmmError::DivisionByZero);
    }
    let quotient = numerator / denominator;
    rounding
        .adjust(quotient, numerator % denominator != 0)
        .ok_or(AmmError::ArithmeticOverflow("rounded quotient overflow"))
}

/// Narrows a `u128` back to `u64`.
///
/// # Errors
///
/// Returns [`AmmError::ArithmeticOverflow`] with `context` if the value
/// does not fit.
pub fn narrow(value: u128, context: &'static str) -> Result<u64, AmmError> {
    u64::try_from(value).map_err(|_| AmmError::ArithmeticOverflow(context))
}

/// Computes `a × b / denominator` with a `u128` intermediate.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
/// - [`AmmError::ArithmeticOverflow`] if the quotient exceeds `u64`.
pub fn mul_div(a: u64, b: u64, denominator: u64, rounding: Rounding) -> Result<u64, AmmError> {
    // (2^64 - 1)^2 < 2^128, so the product is exact.
    let product = u128::from(a) * u128::from(b);
    let quotient = div_wide(product, u128::from(denominator), rounding)?;
    narrow(quotient, "mul_div quotient exceeds u64")
}

/// Scales an asset amount by a claim ratio: `amount × part / whole`.
///
/// Used to price claims in assets (redemptions, deposit charges).
///
/// # Errors
///
/// Same as [`mul_div`].
pub fn scale_amount(
    amount: Amount,
    part: ClaimAmount,
    whole: ClaimAmount,
    rounding: Rounding,
) -> Result<Amount, AmmError> {
    mul_div(amount.get(), part.get(), whole.get(), rounding).map(Amount::new)
}
