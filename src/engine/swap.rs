//! Exact-input constant-product swap.
//!
//! # Algorithm (input side `in`, output side `out`)
//!
//! 1. `net = ⌊amount_in × (10 000 − fee_bps) / 10 000⌋`
//! 2. `amount_out = ⌊reserve_out × net / (reserve_in + net)⌋`
//! 3. `reserve_in += amount_in` (the fee stays in the pool)
//! 4. `reserve_out −= amount_out`
//!
//! Both divisions floor, so the trader absorbs every rounding loss and
//! `k` never decreases, even at a zero fee.
//!
//! # Checks, in order
//!
//! 1. [`AmmError::InvalidAmount`] for a zero input.
//! 2. [`AmmError::PoolNotInitialized`] if either reserve is zero.
//! 3. [`AmmError::InsufficientLiquidity`] if the output would reach the
//!    whole output reserve.
//! 4. [`AmmError::SlippageExceeded`] if the output is below the bound.
//! 5. [`AmmError::InsufficientLiquidity`] if the output floors to zero
//!    and no bound was given.
//! 6. [`AmmError::ArithmeticOverflow`] if the input reserve would exceed
//!    `u64`.

use crate::domain::{Amount, Rounding, SwapDirection, SwapQuote, SwapRequest};
use crate::error::AmmError;
use crate::math::{div_wide, narrow, CheckedArithmetic};
use crate::pool::PoolState;

/// Prices a swap without changing anything.
///
/// Returns exactly the quote [`plan_swap`] would commit, including every
/// rejection.
///
/// # Errors
///
/// See the module documentation.
pub fn quote_swap(state: &PoolState, request: &SwapRequest) -> Result<SwapQuote, AmmError> {
    plan_swap(state, request).map(|(quote, _)| quote)
}

/// Prices a swap and computes the pool state after it.
///
/// # Errors
///
/// See the module documentation.
pub fn plan_swap(
    state: &PoolState,
    request: &SwapRequest,
) -> Result<(SwapQuote, PoolState), AmmError> {
    let amount_in = request.amount_in();
    if amount_in.is_zero() {
        return Err(AmmError::InvalidAmount("swap input must be non-zero"));
    }
    let direction = request.direction();
    let (reserve_in, reserve_out) = state.reserves_for(direction);
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::PoolNotInitialized);
    }

    let (net, fee) = state.fee_rate().split(amount_in)?;
    let amount_out = curve_output(net, reserve_in, reserve_out)?;
    if amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity);
    }
    if amount_out < request.min_amount_out() {
        return Err(AmmError::SlippageExceeded {
            minimum: request.min_amount_out().get(),
            actual: amount_out.get(),
        });
    }
    if amount_out.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }

    let next_in = reserve_in.safe_add(&amount_in)?;
    let next_out = reserve_out.safe_sub(&amount_out)?;
    let (next_a, next_b) = match direction {
        SwapDirection::AToB => (next_in, next_out),
        SwapDirection::BToA => (next_out, next_in),
    };
    let next = state.with_balances(next_a, next_b, state.claim_supply())?;
    if next.k() < state.k() {
        return Err(AmmError::InvariantViolation("swap decreased k"));
    }

    let quote = SwapQuote::new(direction, amount_in, net, amount_out, fee);
    Ok((quote, next))
}

/// `⌊reserve_out × net / (reserve_in + net)⌋`, all in `u128`.
fn curve_output(net: Amount, reserve_in: Amount, reserve_out: Amount) -> Result<Amount, AmmError> {
    // Sum of two u64 values and product of two u64 values both fit u128.
    let denominator = reserve_in.wide() + net.wide();
    let numerator = reserve_out.wide() * net.wide();
    let out = div_wide(numerator, denominator, Rounding::Down)?;
    narrow(out, "swap output exceeds u64").map(Amount::new)
}
