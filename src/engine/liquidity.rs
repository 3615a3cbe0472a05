//! Claim minting on deposit and asset payout on redemption.
//!
//! # Deposit
//!
//! - **Empty pool**: both desired amounts are taken in full and
//!   `⌊√(a × b)⌋` claims are minted.  Fails with
//!   [`AmmError::InsufficientInitialLiquidity`] if either side is zero or
//!   the mint is below the pool's minimum initial claim.
//! - **Seeded pool**: `claims = min(⌊a × S / Ra⌋, ⌊b × S / Rb⌋)`; the
//!   assets charged are `⌈claims × Rx / S⌉`, which never exceed the
//!   desired amounts.  A deposit that mints nothing fails with
//!   [`AmmError::InvalidAmount`].
//!
//! # Redemption
//!
//! `out_x = ⌊Rx × claims / S⌋`.  Redeeming the whole supply returns the
//! exact reserves and brings the pool back to Empty.

use crate::domain::{
    Amount, ClaimAmount, DepositQuote, DepositRequest, RedemptionQuote, RedemptionRequest,
    Rounding,
};
use crate::error::AmmError;
use crate::math::{div_wide, narrow, scale_amount, sqrt_product, CheckedArithmetic};
use crate::pool::PoolState;

/// Prices a deposit without changing anything.
///
/// # Errors
///
/// Same as [`plan_deposit`].
pub fn quote_deposit(
    state: &PoolState,
    request: &DepositRequest,
    minimum_initial_claim: ClaimAmount,
) -> Result<DepositQuote, AmmError> {
    plan_deposit(state, request, minimum_initial_claim).map(|(quote, _)| quote)
}

/// Prices a deposit and computes the pool state after it.
///
/// `minimum_initial_claim` only applies when the pool is empty; a zero
/// floor is treated as one.
///
/// # Errors
///
/// - [`AmmError::InsufficientInitialLiquidity`] on a bad first deposit.
/// - [`AmmError::InvalidAmount`] if a later deposit mints no claims.
/// - [`AmmError::SlippageExceeded`] if fewer claims than
///   `min_claim_out` would be minted.
/// - [`AmmError::ArithmeticOverflow`] if a reserve or the supply would
///   exceed `u64`.
pub fn plan_deposit(
    state: &PoolState,
    request: &DepositRequest,
    minimum_initial_claim: ClaimAmount,
) -> Result<(DepositQuote, PoolState), AmmError> {
    let quote = if state.is_empty() {
        seed_quote(request, minimum_initial_claim)?
    } else {
        proportional_quote(state, request)?
    };

    if quote.claim_out() < request.min_claim_out() {
        return Err(AmmError::SlippageExceeded {
            minimum: request.min_claim_out().get(),
            actual: quote.claim_out().get(),
        });
    }

    let next = state.with_balances(
        state.reserve_a().safe_add(&quote.amount_a())?,
        state.reserve_b().safe_add(&quote.amount_b())?,
        state.claim_supply().safe_add(&quote.claim_out())?,
    )?;
    Ok((quote, next))
}

fn seed_quote(
    request: &DepositRequest,
    minimum_initial_claim: ClaimAmount,
) -> Result<DepositQuote, AmmError> {
    let (a, b) = (request.desired_a(), request.desired_b());
    if a.is_zero() || b.is_zero() {
        return Err(AmmError::InsufficientInitialLiquidity(
            "both assets are required to seed a pool",
        ));
    }
    let claims = ClaimAmount::new(sqrt_product(a.get(), b.get())?);
    if claims.is_zero() || claims < minimum_initial_claim {
        return Err(AmmError::InsufficientInitialLiquidity(
            "initial claim is below the pool minimum",
        ));
    }
    Ok(DepositQuote::new(claims, a, b))
}

fn proportional_quote(
    state: &PoolState,
    request: &DepositRequest,
) -> Result<DepositQuote, AmmError> {
    let supply = state.claim_supply();
    let (reserve_a, reserve_b) = (state.reserve_a(), state.reserve_b());

    // Take the minimum before narrowing so that one oversized side does
    // not fail a deposit the other side limits.
    let by_a = div_wide(
        request.desired_a().wide() * supply.wide(),
        reserve_a.wide(),
        Rounding::Down,
    )?;
    let by_b = div_wide(
        request.desired_b().wide() * supply.wide(),
        reserve_b.wide(),
        Rounding::Down,
    )?;
    let claims = ClaimAmount::new(narrow(by_a.min(by_b), "claims minted exceed u64")?);
    if claims.is_zero() {
        return Err(AmmError::InvalidAmount("deposit is too small to mint a claim"));
    }

    let amount_a = scale_amount(reserve_a, claims, supply, Rounding::Up)?;
    let amount_b = scale_amount(reserve_b, claims, supply, Rounding::Up)?;
    if amount_a > request.desired_a() || amount_b > request.desired_b() {
        return Err(AmmError::InvariantViolation(
            "deposit charge exceeds the desired amount",
        ));
    }
    Ok(DepositQuote::new(claims, amount_a, amount_b))
}

/// Prices a redemption without changing anything.
///
/// # Errors
///
/// Same as [`plan_redemption`].
pub fn quote_redemption(
    state: &PoolState,
    request: &RedemptionRequest,
) -> Result<RedemptionQuote, AmmError> {
    plan_redemption(state, request).map(|(quote, _)| quote)
}

/// Prices a redemption and computes the pool state after it.
///
/// # Errors
///
/// - [`AmmError::InvalidAmount`] if `claim_in` is zero, exceeds the
///   supply, or would pay out nothing on both sides.
/// - [`AmmError::SlippageExceeded`] if either output is below its bound.
pub fn plan_redemption(
    state: &PoolState,
    request: &RedemptionRequest,
) -> Result<(RedemptionQuote, PoolState), AmmError> {
    let claim_in = request.claim_in();
    let supply = state.claim_supply();
    if claim_in.is_zero() {
        return Err(AmmError::InvalidAmount("redemption must burn a claim"));
    }
    if claim_in > supply {
        return Err(AmmError::InvalidAmount("redemption exceeds the claim supply"));
    }

    let amount_a = scale_amount(state.reserve_a(), claim_in, supply, Rounding::Down)?;
    let amount_b = scale_amount(state.reserve_b(), claim_in, supply, Rounding::Down)?;
    if amount_a.is_zero() && amount_b.is_zero() {
        return Err(AmmError::InvalidAmount("redemption is too small to pay out"));
    }
    check_minimum(request.min_a_out(), amount_a)?;
    check_minimum(request.min_b_out(), amount_b)?;

    let next = state.with_balances(
        state.reserve_a().safe_sub(&amount_a)?,
        state.reserve_b().safe_sub(&amount_b)?,
        supply.safe_sub(&claim_in)?,
    )?;
    Ok((RedemptionQuote::new(claim_in, amount_a, amount_b), next))
}

const fn check_minimum(minimum: Amount, actual: Amount) -> Result<(), AmmError> {
    if actual.get() < minimum.get() {
        return Err(AmmError::SlippageExceeded {
            minimum: minimum.get(),
            actual: actual.get(),
        });
    }
    Ok(())
}
