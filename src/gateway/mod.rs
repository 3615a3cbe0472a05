//! Transfer backends.
//!
//! [`InMemoryLedger`] is the bundled [`TransferGateway`] implementation.
//! Production deployments supply their own backend for the chain or
//! custody system they run on.
//!
//! [`TransferGateway`]: crate::traits::TransferGateway

mod ledger;

pub use ledger::InMemoryLedger;
