//! Ordered balance movements that accompany a state transition.

use core::fmt;

use crate::domain::{
    AccountId, Amount, AssetId, AssetPair, ClaimAmount, DepositQuote, RedemptionQuote, SwapQuote,
};

/// One primitive movement between an account and a pool's custody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferStep {
    /// Move `amount` of `asset` from the account into the pool vault.
    PullAsset {
        /// Asset moved.
        asset: AssetId,
        /// Quantity moved.
        amount: Amount,
    },
    /// Move `amount` of `asset` from the pool vault to the account.
    PayAsset {
        /// Asset moved.
        asset: AssetId,
        /// Quantity moved.
        amount: Amount,
    },
    /// Issue claims to the account.
    MintClaim(ClaimAmount),
    /// Destroy claims held by the account.
    BurnClaim(ClaimAmount),
}

impl TransferStep {
    /// Returns `true` if the step moves nothing.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        match self {
            Self::PullAsset { amount, .. } | Self::PayAsset { amount, .. } => amount.is_zero(),
            Self::MintClaim(claims) | Self::BurnClaim(claims) => claims.is_zero(),
        }
    }

    /// Returns the step that undoes this one.
    #[must_use]
    pub const fn inverse(&self) -> Self {
        match *self {
            Self::PullAsset { asset, amount } => Self::PayAsset { asset, amount },
            Self::PayAsset { asset, amount } => Self::PullAsset { asset, amount },
            Self::MintClaim(claims) => Self::BurnClaim(claims),
            Self::BurnClaim(claims) => Self::MintClaim(claims),
        }
    }
}

impl fmt::Display for TransferStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PullAsset { asset, amount } => write!(f, "pull {amount} of {asset}"),
            Self::PayAsset { asset, amount } => write!(f, "pay {amount} of {asset}"),
            Self::MintClaim(claims) => write!(f, "mint {claims} claims"),
            Self::BurnClaim(claims) => write!(f, "burn {claims} claims"),
        }
    }
}

/// Every movement one operation needs, for a single account, in the
/// order the gateway must apply them.
///
/// Debits from the account come first, so a short balance fails before
/// the pool pays anything out.  Zero-amount steps are never recorded.
///
/// # Examples
///
/// ```
/// use hydra_cpamm::domain::{AccountId, Amount, AssetId, ClaimAmount};
/// use hydra_cpamm::engine::{Settlement, TransferStep};
///
/// let mut s = Settlement::new(AccountId::from_bytes([7; 32]));
/// s.push(TransferStep::PullAsset { asset: AssetId::from_bytes([1; 32]), amount: Amount::new(5) });
/// s.push(TransferStep::MintClaim(ClaimAmount::ZERO));
/// assert_eq!(s.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    account: AccountId,
    steps: Vec<TransferStep>,
}

impl Settlement {
    /// Creates an empty settlement for `account`.
    #[must_use]
    pub const fn new(account: AccountId) -> Self {
        Self {
            account,
            steps: Vec::new(),
        }
    }

    /// Pulls the input asset and pays the output asset of a swap.
    #[must_use]
    pub fn for_swap(account: AccountId, pair: AssetPair, quote: &SwapQuote) -> Self {
        let (asset_in, asset_out) = pair.assets_for(quote.direction());
        let mut s = Self::new(account);
        s.push(TransferStep::PullAsset {
            asset: asset_in,
            amount: quote.amount_in(),
        });
        s.push(TransferStep::PayAsset {
            asset: asset_out,
            amount: quote.amount_out(),
        });
        s
    }

    /// Pulls both charged assets, then mints the claims.
    #[must_use]
    pub fn for_deposit(account: AccountId, pair: AssetPair, quote: &DepositQuote) -> Self {
        let mut s = Self::new(account);
        s.push(TransferStep::PullAsset {
            asset: pair.asset_a(),
            amount: quote.amount_a(),
        });
        s.push(TransferStep::PullAsset {
            asset: pair.asset_b(),
            amount: quote.amount_b(),
        });
        s.push(TransferStep::MintClaim(quote.claim_out()));
        s
    }

    /// Burns the claims, then pays out both assets.
    #[must_use]
    pub fn for_redemption(account: AccountId, pair: AssetPair, quote: &RedemptionQuote) -> Self {
        let mut s = Self::new(account);
        s.push(TransferStep::BurnClaim(quote.claim_in()));
        s.push(TransferStep::PayAsset {
            asset: pair.asset_a(),
            amount: quote.amount_a(),
        });
        s.push(TransferStep::PayAsset {
            asset: pair.asset_b(),
            amount: quote.amount_b(),
        });
        s
    }

    /// Appends a step, dropping it if it moves nothing.
    pub fn push(&mut self, step: TransferStep) {
        if !step.is_zero() {
            self.steps.push(step);
        }
    }

    /// Account every step applies to.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.account
    }

    /// Steps in application order.
    #[must_use]
    pub fn steps(&self) -> &[TransferStep] {
        &self.steps
    }

    /// Number of recorded steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if nothing needs to move.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::SwapDirection;

    fn pair() -> AssetPair {
        match AssetPair::new(AssetId::from_bytes([1; 32]), AssetId::from_bytes([2; 32])) {
            Ok(p) => p,
            Err(e) => panic!("distinct assets: {e}"),
        }
    }

    fn alice() -> AccountId {
        AccountId::from_bytes([0xAA; 32])
    }

    #[test]
    fn inverse_round_trips() {
        let step = TransferStep::PullAsset {
            asset: AssetId::from_bytes([1; 32]),
            amount: Amount::new(3),
        };
        assert_eq!(step.inverse().inverse(), step);
        assert_eq!(
            TransferStep::MintClaim(ClaimAmount::ONE).inverse(),
            TransferStep::BurnClaim(ClaimAmount::ONE)
        );
    }

    #[test]
    fn swap_b_to_a_pulls_b_pays_a() {
        let quote = SwapQuote::new(
            SwapDirection::BToA,
            Amount::new(100),
            Amount::new(99),
            Amount::new(40),
            Amount::new(1),
        );
        let s = Settlement::for_swap(alice(), pair(), &quote);
        assert_eq!(s.account(), alice());
        assert_eq!(
            s.steps(),
            &[
                TransferStep::PullAsset {
                    asset: pair().asset_b(),
                    amount: Amount::new(100)
                },
                TransferStep::PayAsset {
                    asset: pair().asset_a(),
                    amount: Amount::new(40)
                },
            ]
        );
    }

    #[test]
    fn deposit_order_and_zero_skipping() {
        let quote = DepositQuote::new(ClaimAmount::new(10), Amount::new(20), Amount::ZERO);
        let s = Settlement::for_deposit(alice(), pair(), &quote);
        assert_eq!(s.len(), 2);
        assert_eq!(s.steps()[1], TransferStep::MintClaim(ClaimAmount::new(10)));
    }

    #[test]
    fn redemption_burns_first() {
        let quote = RedemptionQuote::new(ClaimAmount::new(5), Amount::new(7), Amount::new(9));
        let s = Settlement::for_redemption(alice(), pair(), &quote);
        assert_eq!(s.len(), 3);
        assert_eq!(s.steps()[0], TransferStep::BurnClaim(ClaimAmount::new(5)));
        assert!(!s.is_empty());
    }

    #[test]
    fn step_display() {
        assert_eq!(
            TransferStep::BurnClaim(ClaimAmount::new(4)).to_string(),
            "burn 4 claims"
        );
    }
}
