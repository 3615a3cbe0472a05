//! Live constant-product pool.
//!
//! A [`Pool`] owns its [`PoolState`] and [`Custody`] and drives every
//! operation through the same three steps:
//!
//! 1. **Plan**: the pure engine computes a quote and the next state.
//! 2. **Settle**: the matching [`Settlement`] goes to the gateway, which
//!    applies all of it or none of it.
//! 3. **Commit**: only after settlement succeeds is the next state
//!    stored.
//!
//! A failure at any step leaves both the pool and the external balances
//! untouched.

use tracing::{debug, warn};

use crate::config::PoolConfig;
use crate::domain::{
    AccountId, Amount, AssetPair, ClaimAmount, Custody, DepositQuote, DepositRequest, FeeRate,
    RedemptionQuote, RedemptionRequest, SwapQuote, SwapRequest,
};
use crate::engine::{self, Settlement};
use crate::error::AmmError;
use crate::pool::{PoolRecord, PoolState, PoolStatus};
use crate::traits::{FromConfig, LiquidityPool, SwapPool, TransferGateway};

/// A constant-product pool (`x · y = k`) bound to its custody.
///
/// Created empty from a [`PoolConfig`] via [`FromConfig`].  The registry
/// provisions the custody before handing the pool out; a pool built by
/// hand needs [`TransferGateway::provision`] called on
/// [`custody`](Self::custody) first.
///
/// # Example
///
/// ```rust
/// use hydra_cpamm::config::PoolConfig;
/// use hydra_cpamm::domain::{AccountId, Amount, AssetId, ClaimAmount, DepositRequest};
/// use hydra_cpamm::gateway::InMemoryLedger;
/// use hydra_cpamm::pool::Pool;
/// use hydra_cpamm::traits::{FromConfig, LiquidityPool, SwapPool, TransferGateway};
///
/// let (x, y) = (AssetId::from_bytes([1; 32]), AssetId::from_bytes([2; 32]));
/// let alice = AccountId::from_bytes([0xA1; 32]);
///
/// let ledger = InMemoryLedger::new();
/// ledger.register_asset(x, Default::default()).expect("new asset");
/// ledger.register_asset(y, Default::default()).expect("new asset");
/// ledger.credit(&alice, &x, Amount::new(1_000)).expect("credit");
/// ledger.credit(&alice, &y, Amount::new(4_000)).expect("credit");
///
/// let cfg = PoolConfig::new(x, y, 30).expect("valid config");
/// let mut pool = Pool::from_config(&cfg).expect("pool created");
/// ledger.provision(&pool.custody()).expect("custody");
///
/// let request = DepositRequest::new(Amount::new(1_000), Amount::new(4_000), ClaimAmount::ZERO);
/// let quote = pool.add_liquidity(&ledger, alice, &request).expect("deposit");
/// assert_eq!(quote.claim_out(), ClaimAmount::new(2_000));
/// assert_eq!(ledger.claim_balance(&pool.asset_pair(), &alice), ClaimAmount::new(2_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    state: PoolState,
    custody: Custody,
    minimum_initial_claim: ClaimAmount,
}

impl Pool {
    /// Rebuilds a pool from a persisted record and the configuration it
    /// was created with.
    ///
    /// # Errors
    ///
    /// - Any validation error of [`PoolState::from_record`].
    /// - [`AmmError::InvalidConfiguration`] if the record's pair or fee
    ///   differ from the configuration.
    pub fn restore(config: &PoolConfig, record: &PoolRecord) -> Result<Self, AmmError> {
        config.validate()?;
        let state = PoolState::from_record(record)?;
        if state.pair() != config.pair() || state.fee_rate() != config.fee_rate() {
            return Err(AmmError::InvalidConfiguration(
                "record does not match the pool configuration",
            ));
        }
        Ok(Self {
            state,
            custody: Custody::new(config.pair(), config.standard()),
            minimum_initial_claim: config.minimum_initial_claim(),
        })
    }

    /// Current accounting state.
    #[must_use]
    pub const fn state(&self) -> &PoolState {
        &self.state
    }

    /// Where this pool's balances live.
    #[must_use]
    pub const fn custody(&self) -> Custody {
        self.custody
    }

    /// First-deposit floor.
    #[must_use]
    pub const fn minimum_initial_claim(&self) -> ClaimAmount {
        self.minimum_initial_claim
    }

    /// Reserve of asset A.
    #[must_use]
    pub const fn reserve_a(&self) -> Amount {
        self.state.reserve_a()
    }

    /// Reserve of asset B.
    #[must_use]
    pub const fn reserve_b(&self) -> Amount {
        self.state.reserve_b()
    }

    /// Lifecycle phase.
    #[must_use]
    pub const fn status(&self) -> PoolStatus {
        self.state.status()
    }

    /// Settles `settlement` and, only if that succeeds, stores `next`.
    fn commit<G: TransferGateway + ?Sized>(
        &mut self,
        gateway: &G,
        settlement: &Settlement,
        next: PoolState,
    ) -> Result<(), AmmError> {
        if let Err(err) = gateway.settle(&self.custody, settlement) {
            warn!(
                pool = %self.state.pair(),
                account = %settlement.account(),
                %err,
                "settlement failed, state discarded"
            );
            return Err(err.into());
        }
        self.state = next;
        Ok(())
    }
}

impl FromConfig<PoolConfig> for Pool {
    /// Creates an empty pool.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`PoolConfig::validate`].
    fn from_config(config: &PoolConfig) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            state: PoolState::empty(config.pair(), config.fee_rate()),
            custody: Custody::new(config.pair(), config.standard()),
            minimum_initial_claim: config.minimum_initial_claim(),
        })
    }
}

impl SwapPool for Pool {
    fn swap<G: TransferGateway + ?Sized>(
        &mut self,
        gateway: &G,
        account: AccountId,
        request: &SwapRequest,
    ) -> Result<SwapQuote, AmmError> {
        let (quote, next) = engine::plan_swap(&self.state, request)?;
        let settlement = Settlement::for_swap(account, self.state.pair(), &quote);
        self.commit(gateway, &settlement, next)?;
        debug!(
            pool = %self.state.pair(),
            %account,
            direction = %quote.direction(),
            amount_in = quote.amount_in().get(),
            amount_out = quote.amount_out().get(),
            fee = quote.fee().get(),
            reserve_a = self.state.reserve_a().get(),
            reserve_b = self.state.reserve_b().get(),
            "swap committed"
        );
        Ok(quote)
    }

    fn quote_swap(&self, request: &SwapRequest) -> Result<SwapQuote, AmmError> {
        engine::quote_swap(&self.state, request)
    }

    fn asset_pair(&self) -> AssetPair {
        self.state.pair()
    }

    fn fee_rate(&self) -> FeeRate {
        self.state.fee_rate()
    }
}

impl LiquidityPool for Pool {
    fn add_liquidity<G: TransferGateway + ?Sized>(
        &mut self,
        gateway: &G,
        account: AccountId,
        request: &DepositRequest,
    ) -> Result<DepositQuote, AmmError> {
        let (quote, next) = engine::plan_deposit(&self.state, request, self.minimum_initial_claim)?;
        let settlement = Settlement::for_deposit(account, self.state.pair(), &quote);
        self.commit(gateway, &settlement, next)?;
        debug!(
            pool = %self.state.pair(),
            %account,
            claims = quote.claim_out().get(),
            amount_a = quote.amount_a().get(),
            amount_b = quote.amount_b().get(),
            supply = self.state.claim_supply().get(),
            "deposit committed"
        );
        Ok(quote)
    }

    fn remove_liquidity<G: TransferGateway + ?Sized>(
        &mut self,
        gateway: &G,
        account: AccountId,
        request: &RedemptionRequest,
    ) -> Result<RedemptionQuote, AmmError> {
        let (quote, next) = engine::plan_redemption(&self.state, request)?;
        let settlement = Settlement::for_redemption(account, self.state.pair(), &quote);
        self.commit(gateway, &settlement, next)?;
        debug!(
            pool = %self.state.pair(),
            %account,
            claims = quote.claim_in().get(),
            amount_a = quote.amount_a().get(),
            amount_b = quote.amount_b().get(),
            status = %self.state.status(),
            "redemption committed"
        );
        Ok(quote)
    }

    fn quote_deposit(&self, request: &DepositRequest) -> Result<DepositQuote, AmmError> {
        engine::quote_deposit(&self.state, request, self.minimum_initial_claim)
    }

    fn quote_redemption(&self, request: &RedemptionRequest) -> Result<RedemptionQuote, AmmError> {
        engine::quote_redemption(&self.state, request)
    }

    fn claim_supply(&self) -> ClaimAmount {
        self.state.claim_supply()
    }
}
