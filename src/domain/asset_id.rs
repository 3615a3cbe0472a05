//! Opaque asset and account identifiers.

use core::fmt;

/// Writes the first four bytes as hex followed by an ellipsis.
fn short_hex(bytes: &[u8; 32], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for b in &bytes[..4] {
        write!(f, "{b:02x}")?;
    }
    write!(f, "…")
}

/// Opaque identifier of a fungible asset (a mint address, a denom hash,
/// or equivalent).
///
/// All 32-byte sequences are valid.  The derived `Ord` is lexicographic
/// over the bytes and defines the canonical side of an
/// [`AssetPair`](super::AssetPair).
///
/// # Examples
///
/// ```
/// use hydra_cpamm::domain::AssetId;
///
/// let usdc = AssetId::from_bytes([1u8; 32]);
/// let weth = AssetId::from_bytes([2u8; 32]);
/// assert!(usdc < weth);
/// assert_eq!(usdc.to_string(), "01010101…");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssetId([u8; 32]);

impl AssetId {
    /// Creates an `AssetId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        short_hex(&self.0, f)
    }
}

/// Opaque identifier of an external account (a depositor, a trader).
///
/// The engine never inspects accounts; it only hands them to the
/// [`TransferGateway`](crate::traits::TransferGateway).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// Creates an `AccountId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        short_hex(&self.0, f)
    }
}
