//! Canonically ordered pair of distinct assets.

use core::fmt;

use super::{AssetId, SwapDirection};
use crate::error::AmmError;

/// An unordered pair of distinct assets, stored in canonical order.
///
/// `asset_a` is always the lexicographically smaller identifier, so
/// `(X, Y)` and `(Y, X)` produce equal pairs and therefore key the
/// same pool.
///
/// # Examples
///
/// ```
/// use hydra_cpamm::domain::{AssetId, AssetPair};
///
/// let x = AssetId::from_bytes([1u8; 32]);
/// let y = AssetId::from_bytes([2u8; 32]);
///
/// let pair = AssetPair::new(y, x).expect("distinct assets");
/// assert_eq!(pair.asset_a(), x);
/// assert_eq!(pair.asset_b(), y);
/// assert_eq!(pair, AssetPair::new(x, y).expect("distinct assets"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetPair {
    asset_a: AssetId,
    asset_b: AssetId,
}

impl AssetPair {
    /// Creates a canonically ordered pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAssetPair`] if both identifiers are equal.
    pub fn new(x: AssetId, y: AssetId) -> Result<Self, AmmError> {
        if x == y {
            return Err(AmmError::InvalidAssetPair(
                "a pool requires two distinct assets",
            ));
        }
        let (asset_a, asset_b) = if x < y { (x, y) } else { (y, x) };
        Ok(Self { asset_a, asset_b })
    }

    /// Returns the canonical side A (lower identifier).
    #[must_use]
    pub const fn asset_a(&self) -> AssetId {
        self.asset_a
    }

    /// Returns the canonical side B (higher identifier).
    #[must_use]
    pub const fn asset_b(&self) -> AssetId {
        self.asset_b
    }

    /// Returns `true` if `asset` is one side of the pair.
    #[must_use]
    pub fn contains(&self, asset: &AssetId) -> bool {
        self.asset_a == *asset || self.asset_b == *asset
    }

    /// Returns the swap direction that sells `asset_in`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAssetPair`] if `asset_in` is not part
    /// of the pair.
    pub fn direction_for(&self, asset_in: &AssetId) -> Result<SwapDirection, AmmError> {
        if *asset_in == self.asset_a {
            Ok(SwapDirection::AToB)
        } else if *asset_in == self.asset_b {
            Ok(SwapDirection::BToA)
        } else {
            Err(AmmError::InvalidAssetPair("asset is not part of this pool"))
        }
    }

    /// Returns `(input asset, output asset)` for a direction.
    #[must_use]
    pub const fn assets_for(&self, direction: SwapDirection) -> (AssetId, AssetId) {
        match direction {
            SwapDirection::AToB => (self.asset_a, self.asset_b),
            SwapDirection::BToA => (self.asset_b, self.asset_a),
        }
    }
}

impl fmt::Display for AssetPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.asset_a, self.asset_b)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn asset(byte: u8) -> AssetId {
        AssetId::from_bytes([byte; 32])
    }

    fn pair(x: u8, y: u8) -> AssetPair {
        let Ok(p) = AssetPair::new(asset(x), asset(y)) else {
            panic!("expected distinct assets");
        };
        p
    }

    #[test]
    fn keeps_sorted_input() {
        let p = pair(1, 2);
        assert_eq!(p.asset_a(), asset(1));
        assert_eq!(p.asset_b(), asset(2));
    }

    #[test]
    fn sorts_reversed_input() {
        let p = pair(9, 3);
        assert_eq!(p.asset_a(), asset(3));
        assert_eq!(p.asset_b(), asset(9));
        assert_eq!(p, pair(3, 9));
    }

    #[test]
    fn rejects_same_asset() {
        let Err(e) = AssetPair::new(asset(4), asset(4)) else {
            panic!("expected Err");
        };
        assert_eq!(
            e,
            AmmError::InvalidAssetPair("a pool requires two distinct assets")
        );
    }

    #[test]
    fn contains_both_sides_only() {
        let p = pair(1, 2);
        assert!(p.contains(&asset(1)));
        assert!(p.contains(&asset(2)));
        assert!(!p.contains(&asset(3)));
    }

    #[test]
    fn direction_for_each_side() {
        let p = pair(1, 2);
        assert_eq!(p.direction_for(&asset(1)), Ok(SwapDirection::AToB));
        assert_eq!(p.direction_for(&asset(2)), Ok(SwapDirection::BToA));
        assert!(p.direction_for(&asset(7)).is_err());
    }

    #[test]
    fn assets_for_direction() {
        let p = pair(1, 2);
        assert_eq!(p.assets_for(SwapDirection::AToB), (asset(1), asset(2)));
        assert_eq!(p.assets_for(SwapDirection::BToA), (asset(2), asset(1)));
    }
}
