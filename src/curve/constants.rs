//! Fixed-point scales and fee bases of the curve.

/// Scale of per-second fee rates (`BASE = 2^40`).
pub const BASE_SHIFT: usize = 40;

/// Scale applied to `y` and `z` before the fee base is applied (`2^16`).
pub const ADJUST_SHIFT: usize = 16;

/// Scale of the interest-rate axis: interest per second is `y / 2^32`.
pub const INTEREST_SHIFT: usize = 32;

/// Scale of the collateral axis: collateral per second is `z / 2^25`.
pub const COLLATERAL_SHIFT: usize = 25;

/// Scale of the minimum-rate floor, `(xDecrease · y) << 12`.
pub const MIN_RATE_SHIFT: usize = 12;

/// Shift that turns an interpolation weight in `[0, 2^31]` into a fraction.
pub const WEIGHT_SHIFT: usize = 31;

/// Fee base applied to borrow increases (`2^16 − 100`).
pub const BORROW_FEE_BASE: u128 = (1 << ADJUST_SHIFT) - 100;

/// Fee base applied to lend decreases (`2^16 + 100`).
pub const LEND_FEE_BASE: u128 = (1 << ADJUST_SHIFT) + 100;
