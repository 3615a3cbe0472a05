//! External custody configuration of a pool.

use core::fmt;

use super::{AssetId, AssetPair};

/// Token-transfer standard backing a pool's vaults and claim mint.
///
/// Chosen once when the pool is initialized.  The arithmetic never
/// looks at it; only the transfer backend does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransferStandard {
    /// The original fungible-token interface.
    #[default]
    Classic,
    /// The extension-capable successor interface.
    Extended,
}

impl fmt::Display for TransferStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classic => write!(f, "classic"),
            Self::Extended => write!(f, "extended"),
        }
    }
}

/// Where a pool's real balances live: two vaults and a claim mint,
/// all keyed by the pool's canonical pair and served by one standard.
///
/// # Examples
///
/// ```
/// use hydra_cpamm::domain::{AssetId, AssetPair, Custody, TransferStandard};
///
/// let pair = AssetPair::new(AssetId::from_bytes([1; 32]), AssetId::from_bytes([2; 32]))
///     .expect("distinct");
/// let custody = Custody::new(pair, TransferStandard::Extended);
/// assert!(custody.holds(&AssetId::from_bytes([2; 32])));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Custody {
    pair: AssetPair,
    standard: TransferStandard,
}

impl Custody {
    /// Creates the custody description for a pair.
    #[must_use]
    pub const fn new(pair: AssetPair, standard: TransferStandard) -> Self {
        Self { pair, standard }
    }

    /// Pool key the vaults and claim mint belong to.
    #[must_use]
    pub const fn pair(&self) -> AssetPair {
        self.pair
    }

    /// Transfer standard serving this custody.
    #[must_use]
    pub const fn standard(&self) -> TransferStandard {
        self.standard
    }

    /// Returns `true` if one of the vaults holds `asset`.
    #[must_use]
    pub fn holds(&self, asset: &AssetId) -> bool {
        self.pair.contains(asset)
    }
}

impl fmt::Display for Custody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Custody({} via {})", self.pair, self.standard)
    }
}
