//! Boundary to the external custody backend.
//!
//! [`TransferGateway`] is the only way the engine touches real balances.
//! A backend implements five primitives, each of which either succeeds
//! completely or fails with no effect:
//!
//! | Primitive | Movement |
//! |-----------|----------|
//! | [`provision`](TransferGateway::provision) | create vaults and claim mint for a pool |
//! | [`transfer_in`](TransferGateway::transfer_in) | account → vault |
//! | [`transfer_out`](TransferGateway::transfer_out) | vault → account |
//! | [`mint_claim`](TransferGateway::mint_claim) | issue claims to account |
//! | [`burn_claim`](TransferGateway::burn_claim) | destroy claims held by account |
//!
//! Pool operations never call the primitives directly.  They hand a
//! whole [`Settlement`] to [`settle`](TransferGateway::settle), which
//! must apply all of it or none of it.  The provided `settle` runs the
//! primitives in order and undoes the completed ones on failure; a
//! backend with a cheaper way to stage changes should override it.
//!
//! Which transfer standard serves a pool is recorded in its [`Custody`]
//! and is the backend's business alone.

use tracing::{error, warn};

use crate::domain::{AccountId, Amount, AssetId, ClaimAmount, Custody};
use crate::engine::{Settlement, TransferStep};
use crate::error::TransferError;

/// External collaborator that moves balances for a pool.
///
/// Methods take `&self`: a backend shared between many pools handles
/// its own synchronization.
pub trait TransferGateway {
    /// Establishes the two vaults and the claim mint for `custody`.
    ///
    /// # Errors
    ///
    /// [`TransferError::CustodyAlreadyProvisioned`] if called twice for
    /// the same pair, or any backend-specific refusal.
    fn provision(&self, custody: &Custody) -> Result<(), TransferError>;

    /// Moves `amount` of `asset` from `account` into the pool vault.
    ///
    /// # Errors
    ///
    /// Backend-specific; no balance changes on error.
    fn transfer_in(
        &self,
        custody: &Custody,
        account: &AccountId,
        asset: &AssetId,
        amount: Amount,
    ) -> Result<(), TransferError>;

    /// Moves `amount` of `asset` from the pool vault to `account`.
    ///
    /// # Errors
    ///
    /// Backend-specific; no balance changes on error.
    fn transfer_out(
        &self,
        custody: &Custody,
        account: &AccountId,
        asset: &AssetId,
        amount: Amount,
    ) -> Result<(), TransferError>;

    /// Issues `amount` claims of the pool to `account`.
    ///
    /// # Errors
    ///
    /// Backend-specific; no balance changes on error.
    fn mint_claim(
        &self,
        custody: &Custody,
        account: &AccountId,
        amount: ClaimAmount,
    ) -> Result<(), TransferError>;

    /// Destroys `amount` claims of the pool held by `account`.
    ///
    /// # Errors
    ///
    /// Backend-specific; no balance changes on error.
    fn burn_claim(
        &self,
        custody: &Custody,
        account: &AccountId,
        amount: ClaimAmount,
    ) -> Result<(), TransferError>;

    /// Applies one step through the matching primitive.
    ///
    /// # Errors
    ///
    /// Whatever the primitive returns.
    fn apply_step(
        &self,
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

    /// Applies every step of `settlement`, all or nothing.
    ///
    /// On the first failing step the steps already applied are undone in
    /// reverse order and the original error is returned.
    ///
    /// # Errors
    ///
    /// - The error of the first failing step, after a clean rollback.
    /// - [`TransferError::CompensationFailed`] if the rollback itself
    ///   fails.
    fn settle(&self, custody: &Custody, settlement: &Settlement) -> Result<(), TransferError> {
        let account = settlement.account();
        for (index, step) in settlement.steps().iter().enumerate() {
            let Err(err) = self.apply_step(custody, &account, step) else {
                continue;
            };
            warn!(%custody, %step, %err, "settlement step failed, rolling back");
            for done in settlement.steps()[..index].iter().rev() {
                if let Err(undo_err) = self.apply_step(custody, &account, &done.inverse()) {
                    error!(%custody, step = %done, %undo_err, "rollback failed");
                    return Err(TransferError::CompensationFailed { step: index });
                }
            }
            return Err(err);
        }
        Ok(())
    }
}
