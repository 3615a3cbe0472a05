//! # Hydra CPAMM
//!
//! Constant-product AMM accounting engine: pool lifecycle, liquidity
//! provisioning and redemption, and fee-bearing swaps over checked
//! integer arithmetic.
//!
//! Every pool holds reserves of two assets and issues a proportional
//! claim to its liquidity providers.  Prices follow `x · y = k`; a fee
//! taken from each swap input stays in the pool, so `k` never shrinks.
//! All rounding favours the pool.
//!
//! Balances themselves live outside the engine.  Each operation is
//! planned as a pure state transition, handed to a
//! [`TransferGateway`](traits::TransferGateway) as one all-or-nothing
//! [`Settlement`](engine::Settlement), and committed only if that
//! settlement succeeds.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no | `Serialize`/`Deserialize` for the persisted [`PoolRecord`](pool::PoolRecord) and identifiers |
//!
//! # Quick Start
//!
//! ```rust
//! use hydra_cpamm::prelude::*;
//!
//! let usdc = AssetId::from_bytes([1u8; 32]);
//! let weth = AssetId::from_bytes([2u8; 32]);
//! let alice = AccountId::from_bytes([0xA1; 32]);
//!
//! // 1. A transfer backend with two assets and a funded account
//! let ledger = InMemoryLedger::new();
//! ledger.register_asset(usdc, TransferStandard::Classic).expect("new asset");
//! ledger.register_asset(weth, TransferStandard::Classic).expect("new asset");
//! ledger.credit(&alice, &usdc, Amount::new(200_000_000)).expect("credit");
//! ledger.credit(&alice, &weth, Amount::new(200_000_000)).expect("credit");
//!
//! // 2. Create a pool charging 0.30%
//! let registry = PoolRegistry::new(ledger);
//! let pool = registry.initialize(usdc, weth, 30).expect("pool created");
//! let pair = pool.pair();
//!
//! // 3. Seed it
//! let deposit = DepositRequest::new(
//!     Amount::new(100_000_000),
//!     Amount::new(200_000_000),
//!     ClaimAmount::ZERO,
//! );
//! let minted = registry.add_liquidity(&pair, alice, &deposit).expect("seeded");
//! assert_eq!(minted.claim_out(), ClaimAmount::new(141_421_356));
//!
//! // 4. Swap 10 USDC-units of A for B
//! let request = SwapRequest::new(Amount::new(10_000_000), Amount::ZERO, SwapDirection::AToB);
//! let quote = registry.swap(&pair, alice, &request).expect("swap");
//! assert_eq!(quote.amount_out(), Amount::new(18_132_217));
//! assert_eq!(quote.fee(), Amount::new(30_000));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Registry   │  PoolConfig → provision custody → PoolHandle
//! └──────┬───────┘
//!        │ per-pool mutex
//!        ▼
//! ┌──────────────┐
//! │     Pool     │  plan → settle → commit
//! └──────┬───────┘
//!        │ PoolState in, (quote, PoolState) out
//!        ▼
//! ┌──────────────┐      ┌─────────────────┐
//! │    Engine    │ ───▶ │ TransferGateway │  Settlement, all or nothing
//! └──────┬───────┘      └─────────────────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │  Math/Domain │  mul_div, isqrt, Amount, FeeRate, AssetPair, ...
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`AssetPair`](domain::AssetPair), [`FeeRate`](domain::FeeRate), requests and quotes |
//! | [`math`] | Wide multiply-divide, integer square root, checked arithmetic |
//! | [`config`] | [`PoolConfig`](config::PoolConfig) blueprint |
//! | [`pool`] | [`PoolState`](pool::PoolState), [`PoolRecord`](pool::PoolRecord) and the live [`Pool`](pool::Pool) |
//! | [`engine`] | Pure swap and liquidity transitions, settlement planning |
//! | [`traits`] | [`SwapPool`](traits::SwapPool), [`LiquidityPool`](traits::LiquidityPool), [`TransferGateway`](traits::TransferGateway), [`FromConfig`](traits::FromConfig) |
//! | [`gateway`] | [`InMemoryLedger`](gateway::InMemoryLedger) transfer backend |
//! | [`registry`] | [`PoolRegistry`](registry::PoolRegistry) lifecycle and per-pool locking |
//! | [`error`] | [`AmmError`](error::AmmError) and [`TransferError`](error::TransferError) |
//! | [`prelude`] | Convenience re-exports |

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod registry;
pub mod traits;
