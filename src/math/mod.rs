//! Integer arithmetic for the pool formulas.
//!
//! Balances are stored as `u64`.  Every product is formed in `u128` and
//! narrowed back with an explicit check, and every division takes an
//! explicit [`Rounding`](crate::domain::Rounding).  No floating point is
//! used anywhere in the engine.

mod checked;
mod mul_div;
mod sqrt;

pub use checked::CheckedArithmetic;
pub use mul_div::{div_wide, mul_div, narrow, scale_amount};
pub use sqrt::{isqrt, sqrt_product};
