//! Liquidity requests and quotes.

use core::fmt;

use super::{Amount, ClaimAmount};

/// Parameters of a deposit.
///
/// On a seeded pool only the limiting side is taken in full; the excess
/// on the other side stays with the depositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepositRequest {
    desired_a: Amount,
    desired_b: Amount,
    min_claim_out: ClaimAmount,
}

impl DepositRequest {
    /// Creates a deposit request.
    pub const fn new(desired_a: Amount, desired_b: Amount, min_claim_out: ClaimAmount) -> Self {
        Self {
            desired_a,
            desired_b,
            min_claim_out,
        }
    }

    /// Upper bound on asset A taken from the depositor.
    #[must_use]
    pub const fn desired_a(&self) -> Amount {
        self.desired_a
    }

    /// Upper bound on asset B taken from the depositor.
    #[must_use]
    pub const fn desired_b(&self) -> Amount {
        self.desired_b
    }

    /// Slippage bound on claims minted.
    #[must_use]
    pub const fn min_claim_out(&self) -> ClaimAmount {
        self.min_claim_out
    }
}

/// Parameters of a redemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RedemptionRequest {
    claim_in: ClaimAmount,
    min_a_out: Amount,
    min_b_out: Amount,
}

impl RedemptionRequest {
    /// Creates a redemption request.
    pub const fn new(claim_in: ClaimAmount, min_a_out: Amount, min_b_out: Amount) -> Self {
        Self {
            claim_in,
            min_a_out,
            min_b_out,
        }
    }

    /// Claims to burn.
    #[must_use]
    pub const fn claim_in(&self) -> ClaimAmount {
        self.claim_in
    }

    /// Slippage bound on asset A paid out.
    #[must_use]
    pub const fn min_a_out(&self) -> Amount {
        self.min_a_out
    }

    /// Slippage bound on asset B paid out.
    #[must_use]
    pub const fn min_b_out(&self) -> Amount {
        self.min_b_out
    }
}

/// Result of a deposit computation: claims minted and the assets
/// actually charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepositQuote {
    claim_out: ClaimAmount,
    amount_a: Amount,
    amount_b: Amount,
}

impl DepositQuote {
    pub(crate) const fn new(claim_out: ClaimAmount, amount_a: Amount, amount_b: Amount) -> Self {
        Self {
            claim_out,
            amount_a,
            amount_b,
        }
    }

    /// Claims minted to the depositor.
    #[must_use]
    pub const fn claim_out(&self) -> ClaimAmount {
        self.claim_out
    }

    /// Asset A pulled from the depositor.
    #[must_use]
    pub const fn amount_a(&self) -> Amount {
        self.amount_a
    }

    /// Asset B pulled from the depositor.
    #[must_use]
    pub const fn amount_b(&self) -> Amount {
        self.amount_b
    }
}

impl fmt::Display for DepositQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Deposit(claims={}, a={}, b={})",
            self.claim_out, self.amount_a, self.amount_b
        )
    }
}

/// Result of a redemption computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RedemptionQuote {
    claim_in: ClaimAmount,
    amount_a: Amount,
    amount_b: Amount,
}

impl RedemptionQuote {
    pub(crate) const fn new(claim_in: ClaimAmount, amount_a: Amount, amount_b: Amount) -> Self {
        Self {
            claim_in,
            amount_a,
            amount_b,
        }
    }

    /// Claims burned.
    #[must_use]
    pub const fn claim_in(&self) -> ClaimAmount {
        self.claim_in
    }

    /// Asset A paid to the redeemer.
    #[must_use]
    pub const fn amount_a(&self) -> Amount {
        self.amount_a
    }

    /// Asset B paid to the redeemer.
    #[must_use]
    pub const fn amount_b(&self) -> Amount {
        self.amount_b
    }
}

impl fmt::Display for RedemptionQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Redemption(claims={}, a={}, b={})",
            self.claim_in, self.amount_a, self.amount_b
        )
    }
}
