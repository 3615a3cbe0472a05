//! Swap direction, request and quote.

use core::fmt;

use super::Amount;

/// Which canonical side of the pair is sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapDirection {
    /// Sell asset A, receive asset B.
    AToB,
    /// Sell asset B, receive asset A.
    BToA,
}

impl SwapDirection {
    /// Maps the boolean `direction_a_to_b` flag of the call surface.
    #[must_use]
    pub const fn from_a_to_b(a_to_b: bool) -> Self {
        if a_to_b {
            Self::AToB
        } else {
            Self::BToA
        }
    }

    /// Returns `true` for [`SwapDirection::AToB`].
    #[must_use]
    pub const fn is_a_to_b(&self) -> bool {
        matches!(self, Self::AToB)
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn reverse(&self) -> Self {
        match self {
            Self::AToB => Self::BToA,
            Self::BToA => Self::AToB,
        }
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AToB => write!(f, "A->B"),
            Self::BToA => write!(f, "B->A"),
        }
    }
}

/// Caller-supplied parameters of an exact-input swap.
///
/// Construction is infallible; the swap engine rejects a zero
/// `amount_in` with [`AmmError::InvalidAmount`](crate::error::AmmError::InvalidAmount).
///
/// # Examples
///
/// ```
/// use hydra_cpamm::domain::{Amount, SwapDirection, SwapRequest};
///
/// let req = SwapRequest::new(Amount::new(1_000), Amount::new(990), SwapDirection::AToB);
/// assert_eq!(req.amount_in(), Amount::new(1_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapRequest {
    amount_in: Amount,
    min_amount_out: Amount,
    direction: SwapDirection,
}

impl SwapRequest {
    /// Creates a swap request.
    pub const fn new(amount_in: Amount, min_amount_out: Amount, direction: SwapDirection) -> Self {
        Self {
            amount_in,
            min_amount_out,
            direction,
        }
    }

    /// Returns the exact input amount.
    #[must_use]
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Returns the slippage bound on the output.
    #[must_use]
    pub const fn min_amount_out(&self) -> Amount {
        self.min_amount_out
    }

    /// Returns the direction.
    #[must_use]
    pub const fn direction(&self) -> SwapDirection {
        self.direction
    }
}

/// Outcome of a swap computation.
///
/// `amount_in = amount_in_after_fee + fee` always holds.  The fee is
/// not paid out; it stays in the input-side reserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapQuote {
    direction: SwapDirection,
    amount_in: Amount,
    amount_in_after_fee: Amount,
    amount_out: Amount,
    fee: Amount,
}

impl SwapQuote {
    pub(crate) const fn new(
        direction: SwapDirection,
        amount_in: Amount,
        amount_in_after_fee: Amount,
        amount_out: Amount,
        fee: Amount,
    ) -> Self {
        Self {
            direction,
            amount_in,
            amount_in_after_fee,
            amount_out,
            fee,
        }
    }

    /// Returns the direction of the swap.
    #[must_use]
    pub const fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Returns the full input, fee included.
    #[must_use]
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Returns the input that was priced by the curve.
    #[must_use]
    pub const fn amount_in_after_fee(&self) -> Amount {
        self.amount_in_after_fee
    }

    /// Returns the output paid to the trader.
    #[must_use]
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Returns the fee retained by the pool.
    #[must_use]
    pub const fn fee(&self) -> Amount {
        self.fee
    }
}

impl fmt::Display for SwapQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapQuote({} in={}, out={}, fee={})",
            self.direction, self.amount_in, self.amount_out, self.fee
        )
    }
}
