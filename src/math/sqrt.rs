//! Exact-floor integer square root.

use crate::error::AmmError;
use crate::math::narrow;

/// Floor of the square root of `n`.
///
/// Newton's method started from a power of two at or above `√n`, so the
/// iterates decrease monotonically onto the floor.  The result never
/// rounds up: `r² ≤ n < (r + 1)²`.
///
/// # Examples
///
/// ```
/// use hydra_cpamm::math::isqrt;
///
/// assert_eq!(isqrt(0), 0);
/// assert_eq!(isqrt(15), 3);
/// assert_eq!(isqrt(16), 4);
/// assert_eq!(isqrt(20_000_000_000_000_000), 141_421_356);
/// ```
#[must_use]
pub fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let bits = 128 - n.leading_zeros();
    // 2^ceil(bits / 2) >= sqrt(n); at most 2^64, so x + n / x fits.
    let mut x: u128 = 1 << bits.div_ceil(2);
    loop {
        let y = (x + n / x) / 2;
        if y >= x {
            return x;
        }
        x = y;
    }
}

/// Floor of `√(a × b)` for two `u64` values.
///
/// # Errors
///
/// Returns [`AmmError::ArithmeticOverflow`] if the root does not fit in
/// `u64`, which cannot happen for `u64` factors.
pub fn sqrt_product(a: u64, b: u64) -> Result<u64, AmmError> {
    let product = u128::from(a) * u128::from(b);
    narrow(isqrt(product), "square root exceeds u64")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn small_values() {
        let expected = [0u128, 1, 1, 1, 2, 2, 2, 2, 2, 3];
        for (n, want) in expected.iter().enumerate() {
            assert_eq!(isqrt(n as u128), *want, "isqrt({n})");
        }
    }

    #[test]
    fn perfect_squares() {
        for r in [1u128, 7, 1_000, 65_535, 1 << 40] {
            assert_eq!(isqrt(r * r), r);
            assert_eq!(isqrt(r * r - 1), r - 1);
        }
    }

    #[test]
    fn max_input() {
        assert_eq!(isqrt(u128::MAX), u128::from(u64::MAX));
    }

    #[test]
    fn product_of_max_factors() {
        assert_eq!(sqrt_product(u64::MAX, u64::MAX), Ok(u64::MAX));
        assert_eq!(sqrt_product(100_000_000, 200_000_000), Ok(141_421_356));
        assert_eq!(sqrt_product(0, 5), Ok(0));
    }

    proptest! {
        #[test]
        fn prop_isqrt_is_exact_floor(n in any::<u128>()) {
            let r = isqrt(n);
            prop_assert!(r * r <= n);
            // (r + 1)^2 may exceed u128 only when r == u64::MAX.
            if let Some(next) = (r + 1).checked_mul(r + 1) {
                prop_assert!(next > n);
            }
        }
    }
}
