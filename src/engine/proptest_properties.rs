//! Property-based tests for the pool transitions.
//!
//! 1. **k-monotonicity**: `k` never decreases over a swap sequence and
//!    strictly grows when the fee is non-zero.
//! 2. **Conservation**: deposit then redeem of the minted claims returns
//!    at most what was deposited.
//! 3. **Boundary**: any input either fails with a typed error or pays
//!    strictly less than the output reserve.
//! 4. **Idempotent quote**: quoting twice gives the same answer and the
//!    quote matches what the plan commits.
//! 5. **Round trip**: A→B→A returns at most the original input.
//! 6. **Emptiness invariant** holds after any mix of operations.

use proptest::prelude::*;

use super::{plan_deposit, plan_redemption, plan_swap, quote_swap};
use crate::domain::{
    Amount, AssetId, ClaimAmount, DepositRequest, RedemptionRequest, SwapDirection, SwapRequest,
};
use crate::error::AmmError;
use crate::pool::PoolState;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn seeded(fee_bps: u32, ra: u64, rb: u64) -> (PoolState, ClaimAmount) {
    let Ok(empty) =
        PoolState::initialize(AssetId::from_bytes([1; 32]), AssetId::from_bytes([2; 32]), fee_bps)
    else {
        panic!("valid pool");
    };
    let request = DepositRequest::new(Amount::new(ra), Amount::new(rb), ClaimAmount::ZERO);
    let Ok((quote, state)) = plan_deposit(&empty, &request, ClaimAmount::ONE) else {
        panic!("seed deposit");
    };
    (state, quote.claim_out())
}

fn swap_req(amount_in: u64, direction: SwapDirection) -> SwapRequest {
    SwapRequest::new(Amount::new(amount_in), Amount::ZERO, direction)
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserves in [1_000, 10^12].
fn reserve_strategy() -> impl Strategy<Value = u64> {
    1_000u64..=1_000_000_000_000u64
}

fn fee_strategy() -> impl Strategy<Value = u32> {
    0u32..=1_000u32
}

fn direction_strategy() -> impl Strategy<Value = SwapDirection> {
    any::<bool>().prop_map(SwapDirection::from_a_to_b)
}

/// A sequence of swaps as (input, direction).
fn swap_sequence() -> impl Strategy<Value = Vec<(u64, SwapDirection)>> {
    prop::collection::vec((1u64..=10_000_000_000u64, direction_strategy()), 1..12)
}

#[derive(Debug, Clone)]
enum Op {
    Deposit(u64, u64),
    Redeem(u64),
    Swap(u64, SwapDirection),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u64..=1_000_000_000u64, 1u64..=1_000_000_000u64).prop_map(|(a, b)| Op::Deposit(a, b)),
        (1u64..=1_000_000_000u64).prop_map(Op::Redeem),
        (1u64..=1_000_000_000u64, direction_strategy()).prop_map(|(x, d)| Op::Swap(x, d)),
    ]
}

// ---------------------------------------------------------------------------
// Property 1: k-monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_k_never_decreases(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        fee in fee_strategy(),
        swaps in swap_sequence(),
    ) {
        let (mut state, _) = seeded(fee, ra, rb);
        for (amount_in, direction) in swaps {
            let Ok((_, next)) = plan_swap(&state, &swap_req(amount_in, direction)) else {
                continue;
            };
            if fee > 0 {
                prop_assert!(next.k() > state.k(), "k must grow with a fee");
            } else {
                prop_assert!(next.k() >= state.k(), "k must not shrink");
            }
            state = next;
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: Conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_deposit_then_redeem_returns_at_most_deposit(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        da in 1u64..=1_000_000_000u64,
        db in 1u64..=1_000_000_000u64,
    ) {
        let (state, _) = seeded(30, ra, rb);
        let request = DepositRequest::new(Amount::new(da), Amount::new(db), ClaimAmount::ZERO);
        let Ok((deposit, after_deposit)) = plan_deposit(&state, &request, ClaimAmount::ONE) else {
            return Ok(());
        };
        prop_assert!(deposit.amount_a().get() <= da);
        prop_assert!(deposit.amount_b().get() <= db);

        let redeem = RedemptionRequest::new(deposit.claim_out(), Amount::ZERO, Amount::ZERO);
        let Ok((redemption, after_redeem)) = plan_redemption(&after_deposit, &redeem) else {
            return Ok(());
        };
        prop_assert!(redemption.amount_a() <= deposit.amount_a());
        prop_assert!(redemption.amount_b() <= deposit.amount_b());
        prop_assert!(after_redeem.reserve_a() >= state.reserve_a());
        prop_assert!(after_redeem.reserve_b() >= state.reserve_b());
        prop_assert_eq!(after_redeem.claim_supply(), state.claim_supply());
    }

    #[test]
    fn prop_full_redemption_empties_pool(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
    ) {
        let (state, claims) = seeded(30, ra, rb);
        let redeem = RedemptionRequest::new(claims, Amount::ZERO, Amount::ZERO);
        let Ok((quote, next)) = plan_redemption(&state, &redeem) else {
            panic!("full redemption must succeed");
        };
        prop_assert_eq!(quote.amount_a().get(), ra);
        prop_assert_eq!(quote.amount_b().get(), rb);
        prop_assert!(next.is_empty());
    }
}

// ---------------------------------------------------------------------------
// Property 3: Boundary
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_output_stays_below_reserve(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount_in in any::<u64>(),
        direction in direction_strategy(),
    ) {
        let (state, _) = seeded(30, ra, rb);
        let (_, reserve_out) = state.reserves_for(direction);
        match quote_swap(&state, &swap_req(amount_in, direction)) {
            Ok(quote) => {
                prop_assert!(quote.amount_out() < reserve_out);
                prop_assert!(!quote.amount_out().is_zero());
            }
            Err(
                AmmError::InvalidAmount(_)
                | AmmError::InsufficientLiquidity
                | AmmError::ArithmeticOverflow(_),
            ) => {}
            Err(other) => prop_assert!(false, "unexpected error {other}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: Idempotent quote
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_quote_is_idempotent(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount_in in 1u64..=1_000_000_000u64,
        direction in direction_strategy(),
    ) {
        let (state, _) = seeded(30, ra, rb);
        let request = swap_req(amount_in, direction);
        let first = quote_swap(&state, &request);
        let second = quote_swap(&state, &request);
        prop_assert_eq!(&first, &second);
        if let Ok((planned, _)) = plan_swap(&state, &request) {
            prop_assert_eq!(first, Ok(planned));
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: Round trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_round_trip_loses_value(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        fee in fee_strategy(),
    ) {
        let swap_in = (ra / 1_000).max(1);
        let (state, _) = seeded(fee, ra, rb);

        let Ok((there, state)) = plan_swap(&state, &swap_req(swap_in, SwapDirection::AToB)) else {
            return Ok(());
        };
        let received = there.amount_out().get();
        let Ok((back, _)) = plan_swap(&state, &swap_req(received, SwapDirection::BToA)) else {
            return Ok(());
        };
        prop_assert!(
            back.amount_out().get() <= swap_in,
            "round-trip should lose value: final={} > original={}",
            back.amount_out().get(), swap_in
        );
    }
}

// ---------------------------------------------------------------------------
// Property 6: Emptiness invariant
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_invariants_hold_after_any_sequence(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        ops in prop::collection::vec(op_strategy(), 1..20),
    ) {
        let (mut state, _) = seeded(30, ra, rb);
        for op in ops {
            let next = match op {
                Op::Deposit(a, b) => {
                    let req = DepositRequest::new(Amount::new(a), Amount::new(b), ClaimAmount::ZERO);
                    plan_deposit(&state, &req, ClaimAmount::ONE).map(|(_, s)| s)
                }
                Op::Redeem(c) => {
                    let claims = ClaimAmount::new(c.min(state.claim_supply().get()));
                    let req = RedemptionRequest::new(claims, Amount::ZERO, Amount::ZERO);
                    plan_redemption(&state, &req).map(|(_, s)| s)
                }
                Op::Swap(x, d) => plan_swap(&state, &swap_req(x, d)).map(|(_, s)| s),
            };
            if let Ok(next) = next {
                prop_assert!(next.check_invariants().is_ok());
                state = next;
            }
        }
    }
}
