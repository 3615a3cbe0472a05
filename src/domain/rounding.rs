//! Explicit rounding direction for integer division.

/// Rounding direction for every division in the engine.
///
/// All division takes an explicit `Rounding` so that the direction is
/// visible at the call site.  The engine always rounds against the
/// caller:
///
/// | Quantity | Direction |
/// |----------|-----------|
/// | Claims minted on deposit | [`Rounding::Down`] |
/// | Assets charged on deposit | [`Rounding::Up`] |
/// | Assets paid on redemption | [`Rounding::Down`] |
/// | Swap output | [`Rounding::Down`] |
/// | Swap input after fee | [`Rounding::Down`] |
///
/// # Examples
///
/// ```
/// use hydra_cpamm::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert_eq!(Rounding::Down.adjust(7, true), Some(7));
/// assert_eq!(Rounding::Up.adjust(7, true), Some(8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }

    /// Applies the direction to a truncated quotient.
    ///
    /// `inexact` tells whether the division left a remainder.  Returns
    /// `None` only if rounding up overflows `u128`.
    #[must_use]
    pub const fn adjust(&self, quotient: u128, inexact: bool) -> Option<u128> {
        match self {
            Self::Up if inexact => quotient.checked_add(1),
            _ => Some(quotient),
        }
    }
}
