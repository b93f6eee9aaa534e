//! Fixed-point primitives for curve calculations.
//!
//! Everything the pricing engine computes is built from the helpers in
//! this module:
//!
//! | Helper | Meaning |
//! |--------|---------|
//! | [`div_round`] / [`div_up`] | integer division with explicit rounding |
//! | [`mul_div`] / [`mul_div_up`] | `a·b/d` through a 512-bit intermediate |
//! | [`sqrt_up`] | integer square root rounded up |
//! | [`shift_right_up`] | `ceil(n / 2^k)`, removes a fixed-point scale |
//! | [`CheckedArithmetic`] | overflow-checked `u128` bookkeeping |
//!
//! Every rounding-up site favors the pool, never the user.

mod checked;
mod full_math;
mod rounding;
mod sqrt;

pub use checked::CheckedArithmetic;
pub use full_math::{
    add, div_wide, mul, mul_div, mul_div_up, narrow, narrow_512, narrow_wide, shl, sub, wide,
};
pub use rounding::{div_round, div_up, shift_right_up};
pub use sqrt::sqrt_up;
