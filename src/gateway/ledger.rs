//! In-memory transfer backend for tests, simulation and development.
//!
//! Holds account balances, pool vaults and claim balances in one book
//! behind a `parking_lot::RwLock`.  Every asset is registered under one
//! [`TransferStandard`]; a pool whose custody uses the other standard
//! cannot move it.  All data is lost when the ledger is dropped.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::domain::{AccountId, Amount, AssetId, AssetPair, ClaimAmount, Custody, TransferStandard};
use crate::engine::{Settlement, TransferStep};
use crate::error::TransferError;
use crate::traits::TransferGateway;

#[derive(Debug, Default)]
struct LedgerBook {
    standards: HashMap<AssetId, TransferStandard>,
    accounts: HashMap<(AccountId, AssetId), u64>,
    vaults: HashMap<(AssetPair, AssetId), u64>,
    claims: HashMap<(AssetPair, AccountId), u64>,
    claim_supply: HashMap<AssetPair, u64>,
    provisioned: HashSet<AssetPair>,
}

/// Value an entry held before a settlement step touched it.
///
/// `None` means the key was absent and is removed again on rollback.
#[derive(Debug)]
enum Saved {
    Account((AccountId, AssetId), Option<u64>),
    Vault((AssetPair, AssetId), Option<u64>),
    Claim((AssetPair, AccountId), Option<u64>),
    Supply(AssetPair, Option<u64>),
}

fn put_back<K: Eq + std::hash::Hash>(map: &mut HashMap<K, u64>, key: K, prior: Option<u64>) {
    match prior {
        Some(value) => {
            map.insert(key, value);
        }
        None => {
            map.remove(&key);
        }
    }
}

/// Moves `amount` from `from` to `to` in two maps, or changes nothing.
fn shift<K1, K2>(
    from: &mut HashMap<K1, u64>,
    from_key: K1,
    to: &mut HashMap<K2, u64>,
    to_key: K2,
    amount: u64,
) -> Result<(), TransferError>
where
    K1: Eq + std::hash::Hash,
    K2: Eq + std::hash::Hash,
{
    let available = from.get(&from_key).copied().unwrap_or(0);
    let debited = available
        .checked_sub(amount)
        .ok_or(TransferError::InsufficientBalance {
            available,
            required: amount,
        })?;
    let credited = to
        .get(&to_key)
        .copied()
        .unwrap_or(0)
        .checked_add(amount)
        .ok_or(TransferError::BalanceOverflow)?;
    from.insert(from_key, debited);
    to.insert(to_key, credited);
    Ok(())
}

impl LedgerBook {
    fn check_custody(&self, custody: &Custody) -> Result<(), TransferError> {
        if self.provisioned.contains(&custody.pair()) {
            Ok(())
        } else {
            Err(TransferError::CustodyNotProvisioned)
        }
    }

    fn check_asset(&self, custody: &Custody, asset: &AssetId) -> Result<(), TransferError> {
        self.check_custody(custody)?;
        if !custody.holds(asset) {
            return Err(TransferError::ForeignAsset(*asset));
        }
        match self.standards.get(asset) {
            None => Err(TransferError::UnknownAsset(*asset)),
            Some(standard) if *standard != custody.standard() => {
                Err(TransferError::StandardMismatch(*asset))
            }
            Some(_) => Ok(()),
        }
    }

    fn provision(&mut self, custody: &Custody) -> Result<(), TransferError> {
        let pair = custody.pair();
        if self.provisioned.contains(&pair) {
            return Err(TransferError::CustodyAlreadyProvisioned);
        }
        for asset in [pair.asset_a(), pair.asset_b()] {
            match self.standards.get(&asset) {
                None => return Err(TransferError::UnknownAsset(asset)),
                Some(standard) if *standard != custody.standard() => {
                    return Err(TransferError::StandardMismatch(asset));
                }
                Some(_) => {}
            }
        }
        self.provisioned.insert(pair);
        Ok(())
    }

    fn transfer_in(
        &mut self,
        custody: &Custody,
        account: &AccountId,
        asset: &AssetId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.check_asset(custody, asset)?;
        shift(
            &mut self.accounts,
            (*account, *asset),
            &mut self.vaults,
            (custody.pair(), *asset),
            amount.get(),
        )
    }

    fn transfer_out(
        &mut self,
        custody: &Custody,
        account: &AccountId,
        asset: &AssetId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.check_asset(custody, asset)?;
        shift(
            &mut self.vaults,
            (custody.pair(), *asset),
            &mut self.accounts,
            (*account, *asset),
            amount.get(),
        )
    }

    fn mint_claim(
        &mut self,
        custody: &Custody,
        account: &AccountId,
        amount: ClaimAmount,
    ) -> Result<(), TransferError> {
        self.check_custody(custody)?;
        let pair = custody.pair();
        let supply = self
            .claim_supply
            .get(&pair)
            .copied()
            .unwrap_or(0)
            .checked_add(amount.get())
            .ok_or(TransferError::BalanceOverflow)?;
        let held = self
            .claims
            .get(&(pair, *account))
            .copied()
            .unwrap_or(0)
            .checked_add(amount.get())
            .ok_or(TransferError::BalanceOverflow)?;
        self.claim_supply.insert(pair, supply);
        self.claims.insert((pair, *account), held);
        Ok(())
    }

    fn burn_claim(
        &mut self,
        custody: &Custody,
        account: &AccountId,
        amount: ClaimAmount,
    ) -> Result<(), TransferError> {
        self.check_custody(custody)?;
        let pair = custody.pair();
        let available = self.claims.get(&(pair, *account)).copied().unwrap_or(0);
        let held = available
            .checked_sub(amount.get())
            .ok_or(TransferError::InsufficientBalance {
                available,
                required: amount.get(),
            })?;
        // Supply is the sum of holdings, so it covers any single holding.
        let supply = self
            .claim_supply
            .get(&pair)
            .copied()
            .unwrap_or(0)
            .checked_sub(amount.get())
            .ok_or(TransferError::Rejected("claim supply below holder balance"))?;
        self.claims.insert((pair, *account), held);
        self.claim_supply.insert(pair, supply);
        Ok(())
    }

    fn apply(
        &mut self,
        custody: &Custody,
        account: &AccountId,
        step: &TransferStep,
    ) -> Result<(), TransferError> {
        match *step {
            TransferStep::PullAsset { asset, amount } => {
                self.transfer_in(custody, account, &asset, amount)
            }
            TransferStep::PayAsset { asset, amount } => {
                self.transfer_out(custody, account, &asset, amount)
            }
            TransferStep::MintClaim(claims) => self.mint_claim(custody, account, claims),
            TransferStep::BurnClaim(claims) => self.burn_claim(custody, account, claims),
        }
    }

    /// Records the entries `step` may write.
    fn save(
        &self,
        custody: &Custody,
        account: &AccountId,
        step: &TransferStep,
        journal: &mut Vec<Saved>,
    ) {
        let pair = custody.pair();
        match *step {
            TransferStep::PullAsset { asset, .. } | TransferStep::PayAsset { asset, .. } => {
                let held = (*account, asset);
                let vault = (pair, asset);
                journal.push(Saved::Account(held, self.accounts.get(&held).copied()));
                journal.push(Saved::Vault(vault, self.vaults.get(&vault).copied()));
            }
            TransferStep::MintClaim(_) | TransferStep::BurnClaim(_) => {
                let held = (pair, *account);
                journal.push(Saved::Claim(held, self.claims.get(&held).copied()));
                journal.push(Saved::Supply(pair, self.claim_supply.get(&pair).copied()));
            }
        }
    }

    /// Undoes a journal newest first, so the oldest saved value wins.
    fn restore(&mut self, journal: Vec<Saved>) {
        for saved in journal.into_iter().rev() {
            match saved {
                Saved::Account(key, prior) => put_back(&mut self.accounts, key, prior),
                Saved::Vault(key, prior) => put_back(&mut self.vaults, key, prior),
                Saved::Claim(key, prior) => put_back(&mut self.claims, key, prior),
                Saved::Supply(key, prior) => put_back(&mut self.claim_supply, key, prior),
            }
        }
    }
}

/// Thread-safe in-memory [`TransferGateway`].
///
/// Clones share the same book.  [`settle`](TransferGateway::settle)
/// runs under one write lock and journals the prior value of every entry
/// a step touches; if any step fails the journal is replayed backwards,
/// so a failed settlement never leaves a trace.
///
/// # Examples
///
/// ```
/// use hydra_cpamm::domain::{AccountId, Amount, AssetId, TransferStandard};
/// use hydra_cpamm::gateway::InMemoryLedger;
///
/// let ledger = InMemoryLedger::new();
/// let usdc = AssetId::from_bytes([1; 32]);
/// let alice = AccountId::from_bytes([0xA1; 32]);
///
/// ledger.register_asset(usdc, TransferStandard::Classic).expect("new asset");
/// ledger.credit(&alice, &usdc, Amount::new(500)).expect("known asset");
/// assert_eq!(ledger.balance_of(&alice, &usdc), Amount::new(500));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    book: Arc<RwLock<LedgerBook>>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `asset` as issued under `standard`.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Rejected`] if the asset is already known.
    pub fn register_asset(
        &self,
        asset: AssetId,
        standard: TransferStandard,
    ) -> Result<(), TransferError> {
        let mut book = self.book.write();
        if book.standards.contains_key(&asset) {
            return Err(TransferError::Rejected("asset is already registered"));
        }
        book.standards.insert(asset, standard);
        trace!(%asset, %standard, "asset registered");
        Ok(())
    }

    /// Gives `account` `amount` of `asset` out of thin air.
    ///
    /// # Errors
    ///
    /// - [`TransferError::UnknownAsset`] if the asset is not registered.
    /// - [`TransferError::BalanceOverflow`] if the balance would overflow.
    pub fn credit(
        &self,
        account: &AccountId,
        asset: &AssetId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let mut book = self.book.write();
        if !book.standards.contains_key(asset) {
            return Err(TransferError::UnknownAsset(*asset));
        }
        let entry = book.accounts.entry((*account, *asset)).or_insert(0);
        *entry = entry
            .checked_add(amount.get())
            .ok_or(TransferError::BalanceOverflow)?;
        trace!(%account, %asset, amount = amount.get(), "account credited");
        Ok(())
    }

    /// Balance of `asset` held by `account`.
    pub fn balance_of(&self, account: &AccountId, asset: &AssetId) -> Amount {
        let book = self.book.read();
        Amount::new(book.accounts.get(&(*account, *asset)).copied().unwrap_or(0))
    }

    /// Balance of `asset` held in the vault of pool `pair`.
    pub fn vault_balance(&self, pair: &AssetPair, asset: &AssetId) -> Amount {
        let book = self.book.read();
        Amount::new(book.vaults.get(&(*pair, *asset)).copied().unwrap_or(0))
    }

    /// Claims of pool `pair` held by `account`.
    pub fn claim_balance(&self, pair: &AssetPair, account: &AccountId) -> ClaimAmount {
        let book = self.book.read();
        ClaimAmount::new(book.claims.get(&(*pair, *account)).copied().unwrap_or(0))
    }

    /// Total claims of pool `pair` issued by this ledger.
    pub fn claim_supply(&self, pair: &AssetPair) -> ClaimAmount {
        let book = self.book.read();
        ClaimAmount::new(book.claim_supply.get(pair).copied().unwrap_or(0))
    }

    /// Returns `true` if custody for `pair` has been provisioned.
    #[must_use]
    pub fn is_provisioned(&self, pair: &AssetPair) -> bool {
        self.book.read().provisioned.contains(pair)
    }
}

impl TransferGateway for InMemoryLedger {
    fn provision(&self, custody: &Custody) -> Result<(), TransferError> {
        self.book.write().provision(custody)?;
        trace!(%custody, "custody provisioned");
        Ok(())
    }

    fn transfer_in(
        &self,
        custody: &Custody,
        account: &AccountId,
        asset: &AssetId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.book.write().transfer_in(custody, account, asset, amount)?;
        trace!(%custody, %account, %asset, amount = amount.get(), "transfer in");
        Ok(())
    }

    fn transfer_out(
        &self,
        custody: &Custody,
        account: &AccountId,
        asset: &AssetId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.book.write().transfer_out(custody, account, asset, amount)?;
        trace!(%custody, %account, %asset, amount = amount.get(), "transfer out");
        Ok(())
    }

    fn mint_claim(
        &self,
        custody: &Custody,
        account: &AccountId,
        amount: ClaimAmount,
    ) -> Result<(), TransferError> {
        self.book.write().mint_claim(custody, account, amount)?;
        trace!(%custody, %account, claims = amount.get(), "claims minted");
        Ok(())
    }

    fn burn_claim(
        &self,
        custody: &Custody,
        account: &AccountId,
        amount: ClaimAmount,
    ) -> Result<(), TransferError> {
        self.book.write().burn_claim(custody, account, amount)?;
        trace!(%custody, %account, claims = amount.get(), "claims burned");
        Ok(())
    }

    fn settle(&self, custody: &Custody, settlement: &Settlement) -> Result<(), TransferError> {
        let account = settlement.account();
        let mut book = self.book.write();
        let mut journal = Vec::with_capacity(settlement.len() * 2);
        for step in settlement.steps() {
            book.save(custody, &account, step, &mut journal);
            if let Err(err) = book.apply(custody, &account, step) {
                book.restore(journal);
                trace!(%custody, %account, %step, %err, "settlement rolled back");
                return Err(err);
            }
            trace!(%custody, %account, %step, "applied");
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn x() -> AssetId {
        AssetId::from_bytes([1; 32])
    }

    fn y() -> AssetId {
        AssetId::from_bytes([2; 32])
    }

    fn alice() -> AccountId {
        AccountId::from_bytes([0xA1; 32])
    }

    fn pair() -> AssetPair {
        let Ok(pair) = AssetPair::new(x(), y()) else {
            panic!("distinct assets");
        };
        pair
    }

    fn ready(standard: TransferStandard) -> (InMemoryLedger, Custody) {
        let ledger = InMemoryLedger::new();
        let custody = Custody::new(pair(), standard);
        for asset in [x(), y()] {
            let Ok(()) = ledger.register_asset(asset, standard) else {
                panic!("register");
            };
            let Ok(()) = ledger.credit(&alice(), &asset, Amount::new(1_000)) else {
                panic!("credit");
            };
        }
        let Ok(()) = ledger.provision(&custody) else {
            panic!("provision");
        };
        (ledger, custody)
    }

    #[test]
    fn register_twice_rejected() {
        let ledger = InMemoryLedger::new();
        assert!(ledger.register_asset(x(), TransferStandard::Classic).is_ok());
        assert_eq!(
            ledger.register_asset(x(), TransferStandard::Extended),
            Err(TransferError::Rejected("asset is already registered"))
        );
    }

    #[test]
    fn credit_unknown_asset() {
        let ledger = InMemoryLedger::new();
        assert_eq!(
            ledger.credit(&alice(), &x(), Amount::new(1)),
            Err(TransferError::UnknownAsset(x()))
        );
    }

    #[test]
    fn provision_once() {
        let (ledger, custody) = ready(TransferStandard::Classic);
        assert!(ledger.is_provisioned(&pair()));
        assert_eq!(
            ledger.provision(&custody),
            Err(TransferError::CustodyAlreadyProvisioned)
        );
    }

    #[test]
    fn provision_requires_matching_standard() {
        let ledger = InMemoryLedger::new();
        let Ok(()) = ledger.register_asset(x(), TransferStandard::Classic) else {
            panic!("register");
        };
        let Ok(()) = ledger.register_asset(y(), TransferStandard::Extended) else {
            panic!("register");
        };
        let custody = Custody::new(pair(), TransferStandard::Classic);
        assert_eq!(
            ledger.provision(&custody),
            Err(TransferError::StandardMismatch(y()))
        );
        assert!(!ledger.is_provisioned(&pair()));
    }

    #[test]
    fn transfer_requires_provisioned_custody() {
        let ledger = InMemoryLedger::new();
        let custody = Custody::new(pair(), TransferStandard::Classic);
        assert_eq!(
            ledger.transfer_in(&custody, &alice(), &x(), Amount::new(1)),
            Err(TransferError::CustodyNotProvisioned)
        );
    }

    #[test]
    fn transfers_move_between_account_and_vault() {
        let (ledger, custody) = ready(TransferStandard::Extended);
        assert!(ledger.transfer_in(&custody, &alice(), &x(), Amount::new(300)).is_ok());
        assert_eq!(ledger.balance_of(&alice(), &x()), Amount::new(700));
        assert_eq!(ledger.vault_balance(&pair(), &x()), Amount::new(300));

        assert!(ledger.transfer_out(&custody, &alice(), &x(), Amount::new(100)).is_ok());
        assert_eq!(ledger.vault_balance(&pair(), &x()), Amount::new(200));

        assert_eq!(
            ledger.transfer_out(&custody, &alice(), &x(), Amount::new(201)),
            Err(TransferError::InsufficientBalance {
                available: 200,
                required: 201,
            })
        );
    }

    #[test]
    fn foreign_asset_rejected() {
        let (ledger, custody) = ready(TransferStandard::Classic);
        let z = AssetId::from_bytes([3; 32]);
        assert_eq!(
            ledger.transfer_in(&custody, &alice(), &z, Amount::new(1)),
            Err(TransferError::ForeignAsset(z))
        );
    }

    #[test]
    fn custody_with_other_standard_cannot_move_assets() {
        let (ledger, _) = ready(TransferStandard::Classic);
        let wrong = Custody::new(pair(), TransferStandard::Extended);
        assert_eq!(
            ledger.transfer_in(&wrong, &alice(), &x(), Amount::new(1)),
            Err(TransferError::StandardMismatch(x()))
        );
    }

    #[test]
    fn mint_and_burn_track_supply() {
        let (ledger, custody) = ready(TransferStandard::Classic);
        assert!(ledger.mint_claim(&custody, &alice(), ClaimAmount::new(50)).is_ok());
        assert_eq!(ledger.claim_supply(&pair()), ClaimAmount::new(50));
        assert!(ledger.burn_claim(&custody, &alice(), ClaimAmount::new(20)).is_ok());
        assert_eq!(ledger.claim_balance(&pair(), &alice()), ClaimAmount::new(30));
        assert_eq!(ledger.claim_supply(&pair()), ClaimAmount::new(30));
        let Err(TransferError::InsufficientBalance { .. }) =
            ledger.burn_claim(&custody, &alice(), ClaimAmount::new(31))
        else {
            panic!("expected InsufficientBalance");
        };
    }

    #[test]
    fn settle_is_all_or_nothing() {
        let (ledger, custody) = ready(TransferStandard::Classic);
        let mut settlement = Settlement::new(alice());
        settlement.push(TransferStep::PullAsset {
            asset: x(),
            amount: Amount::new(400),
        });
        settlement.push(TransferStep::PullAsset {
            asset: y(),
            amount: Amount::new(5_000),
        });
        settlement.push(TransferStep::MintClaim(ClaimAmount::new(10)));

        let Err(TransferError::InsufficientBalance { .. }) = ledger.settle(&custody, &settlement)
        else {
            panic!("expected InsufficientBalance");
        };
        assert_eq!(ledger.balance_of(&alice(), &x()), Amount::new(1_000));
        assert_eq!(ledger.vault_balance(&pair(), &x()), Amount::ZERO);
        assert_eq!(ledger.claim_supply(&pair()), ClaimAmount::ZERO);
    }

    #[test]
    fn rollback_restores_touched_entries_only() {
        let (ledger, custody) = ready(TransferStandard::Classic);
        let bob = AccountId::from_bytes([0xB0; 32]);
        let Ok(()) = ledger.credit(&bob, &y(), Amount::new(77)) else {
            panic!("credit");
        };
        let mut seed = Settlement::new(alice());
        seed.push(TransferStep::PullAsset {
            asset: y(),
            amount: Amount::new(100),
        });
        let Ok(()) = ledger.settle(&custody, &seed) else {
            panic!("seed settles");
        };

        // Vault x and alice's claims are absent before this settlement.
        let mut settlement = Settlement::new(alice());
        settlement.push(TransferStep::PullAsset {
            asset: x(),
            amount: Amount::new(400),
        });
        settlement.push(TransferStep::PayAsset {
            asset: y(),
            amount: Amount::new(60),
        });
        settlement.push(TransferStep::MintClaim(ClaimAmount::new(10)));
        settlement.push(TransferStep::BurnClaim(ClaimAmount::new(11)));

        let Err(TransferError::InsufficientBalance {
            available: 10,
            required: 11,
        }) = ledger.settle(&custody, &settlement)
        else {
            panic!("expected InsufficientBalance");
        };

        let book = ledger.book.read();
        assert_eq!(book.vaults.get(&(pair(), x())), None);
        assert_eq!(book.claims.get(&(pair(), alice())), None);
        assert_eq!(book.claim_supply.get(&pair()), None);
        assert_eq!(book.vaults.get(&(pair(), y())), Some(&100));
        assert_eq!(book.accounts.get(&(alice(), x())), Some(&1_000));
        assert_eq!(book.accounts.get(&(alice(), y())), Some(&900));
        assert_eq!(book.accounts.get(&(bob, y())), Some(&77));
    }

    #[test]
    fn clones_share_the_book() {
        let (ledger, _) = ready(TransferStandard::Classic);
        let other = ledger.clone();
        let Ok(()) = other.credit(&alice(), &x(), Amount::new(1)) else {
            panic!("credit");
        };
        assert_eq!(ledger.balance_of(&alice(), &x()), Amount::new(1_001));
    }
}
