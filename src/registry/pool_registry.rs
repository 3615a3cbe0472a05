//! Pool registry: creation, lookup and serialized access per pool.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::info;

use crate::config::PoolConfig;
use crate::domain::{
    AccountId, AssetId, AssetPair, DepositQuote, DepositRequest, RedemptionQuote,
    RedemptionRequest, SwapQuote, SwapRequest,
};
use crate::error::AmmError;
use crate::pool::{Pool, PoolState};
use crate::traits::{FromConfig, LiquidityPool, SwapPool, TransferGateway};

/// Shared handle to one registered pool.
///
/// Cloning is cheap and every clone refers to the same pool.  All
/// access goes through the pool's mutex, so operations on one pool never
/// interleave.
#[derive(Debug, Clone)]
pub struct PoolHandle {
    pair: AssetPair,
    pool: Arc<Mutex<Pool>>,
}

impl PoolHandle {
    fn new(pool: Pool) -> Self {
        Self {
            pair: pool.asset_pair(),
            pool: Arc::new(Mutex::new(pool)),
        }
    }

    /// The canonical pair this handle refers to.
    #[must_use]
    pub const fn pair(&self) -> AssetPair {
        self.pair
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> PoolState {
        *self.pool.lock().state()
    }

    /// Runs `f` with exclusive access to the pool.
    pub fn with<R>(&self, f: impl FnOnce(&mut Pool) -> R) -> R {
        let mut pool = self.pool.lock();
        f(&mut pool)
    }
}

/// Owns every pool and the gateway that settles their transfers.
///
/// Pools are keyed by canonical [`AssetPair`], so `(X, Y)` and `(Y, X)`
/// name the same pool.  The map sits behind a `RwLock` taken for writing
/// only while a pool is being created; each pool has its own mutex, so
/// operations on different pools run in parallel.
///
/// # Example
///
/// ```rust
/// use hydra_cpamm::domain::{AccountId, Amount, AssetId, ClaimAmount, DepositRequest};
/// use hydra_cpamm::gateway::InMemoryLedger;
/// use hydra_cpamm::registry::PoolRegistry;
///
/// let (x, y) = (AssetId::from_bytes([1; 32]), AssetId::from_bytes([2; 32]));
/// let ledger = InMemoryLedger::new();
/// ledger.register_asset(x, Default::default()).expect("new asset");
/// ledger.register_asset(y, Default::default()).expect("new asset");
///
/// let registry = PoolRegistry::new(ledger);
/// let handle = registry.initialize(x, y, 30).expect("pool created");
/// assert!(registry.initialize(y, x, 30).is_err());
/// assert_eq!(registry.get(y, x).expect("registered").pair(), handle.pair());
/// assert!(handle.snapshot().is_empty());
/// ```
pub struct PoolRegistry<G: TransferGateway> {
    gateway: G,
    pools: RwLock<HashMap<AssetPair, PoolHandle>>,
}

impl<G: TransferGateway> PoolRegistry<G> {
    /// Creates an empty registry settling through `gateway`.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            pools: RwLock::new(HashMap::new()),
        }
    }

    /// The gateway pools settle through.
    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Creates, provisions and registers a pool from `config`.
    ///
    /// # Flow
    ///
    /// 1. Validate the configuration.
    /// 2. Reject a pair that already has a pool.
    /// 3. Build the empty pool via [`FromConfig`].
    /// 4. Provision its custody through the gateway.
    /// 5. Publish the handle.
    ///
    /// # Errors
    ///
    /// - Any [`PoolConfig::validate`] error.
    /// - [`AmmError::PoolAlreadyExists`] if the pair is taken.
    /// - [`AmmError::Transfer`] if provisioning fails; nothing is
    ///   registered in that case.
    pub fn initialize_pool(&self, config: &PoolConfig) -> Result<PoolHandle, AmmError> {
        config.validate()?;
        let mut pools = self.pools.write();
        if pools.contains_key(&config.pair()) {
            return Err(AmmError::PoolAlreadyExists);
        }
        let pool = Pool::from_config(config)?;
        self.gateway.provision(&pool.custody())?;

        let handle = PoolHandle::new(pool);
        pools.insert(config.pair(), handle.clone());
        info!(
            pair = %config.pair(),
            fee_bps = config.fee_rate().bps(),
            standard = %config.standard(),
            "pool initialized"
        );
        Ok(handle)
    }

    /// Creates a pool with the default standard and seed floor.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAssetPair`] if `asset_x == asset_y`.
    /// - [`AmmError::InvalidFeeRate`] if `fee_bps >= 10_000`.
    /// - Anything [`initialize_pool`](Self::initialize_pool) returns.
    pub fn initialize(
        &self,
        asset_x: AssetId,
        asset_y: AssetId,
        fee_bps: u32,
    ) -> Result<PoolHandle, AmmError> {
        self.initialize_pool(&PoolConfig::new(asset_x, asset_y, fee_bps)?)
    }

    /// Looks up the pool for two assets in either order.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAssetPair`] if `asset_x == asset_y`.
    /// - [`AmmError::PoolNotFound`] if no pool exists for the pair.
    pub fn get(&self, asset_x: AssetId, asset_y: AssetId) -> Result<PoolHandle, AmmError> {
        self.handle(&AssetPair::new(asset_x, asset_y)?)
    }

    fn handle(&self, pair: &AssetPair) -> Result<PoolHandle, AmmError> {
        self.pools
            .read()
            .get(pair)
            .cloned()
            .ok_or(AmmError::PoolNotFound)
    }

    /// Every registered pair, sorted.
    #[must_use]
    pub fn pairs(&self) -> Vec<AssetPair> {
        let mut pairs: Vec<AssetPair> = self.pools.read().keys().copied().collect();
        pairs.sort_unstable();
        pairs
    }

    /// Number of registered pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.read().len()
    }

    /// Returns `true` if no pool has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.read().is_empty()
    }

    /// Deposits into the pool for `pair`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`], or whatever
    /// [`LiquidityPool::add_liquidity`] returns.
    pub fn add_liquidity(
        &self,
        pair: &AssetPair,
        account: AccountId,
        request: &DepositRequest,
    ) -> Result<DepositQuote, AmmError> {
        self.handle(pair)?
            .with(|pool| pool.add_liquidity(&self.gateway, account, request))
    }

    /// Redeems claims from the pool for `pair`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`], or whatever
    /// [`LiquidityPool::remove_liquidity`] returns.
    pub fn remove_liquidity(
        &self,
        pair: &AssetPair,
        account: AccountId,
        request: &RedemptionRequest,
    ) -> Result<RedemptionQuote, AmmError> {
        self.handle(pair)?
            .with(|pool| pool.remove_liquidity(&self.gateway, account, request))
    }

    /// Swaps through the pool for `pair`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`], or whatever [`SwapPool::swap`]
    /// returns.
    pub fn swap(
        &self,
        pair: &AssetPair,
        account: AccountId,
        request: &SwapRequest,
    ) -> Result<SwapQuote, AmmError> {
        self.handle(pair)?
            .with(|pool| pool.swap(&self.gateway, account, request))
    }

    /// Copy of the current state of the pool for `pair`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`] if no pool exists for the pair.
    pub fn snapshot(&self, pair: &AssetPair) -> Result<PoolState, AmmError> {
        Ok(self.handle(pair)?.snapshot())
    }
}
