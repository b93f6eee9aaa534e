//! Rounding helpers for integer division.
//!
//! Every curve computation chooses its rounding direction explicitly.
//!
//! # Convention
//!
//! **Always round toward the pool**:
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Borrow `xDecrease`, `yIncrease`, `zIncrease`, debt, collateral | [`Rounding::Up`] |
//! | Lend `xIncrease`, `yDecrease`, `zDecrease`, loan, coverage | [`Rounding::Down`] |
//! | Stored fee totals | [`Rounding::Up`] |
//!
//! # Examples
//!
//! ```
//! use tenor_amm::domain::Rounding;
//! use tenor_amm::math::div_round;
//!
//! assert_eq!(div_round(10, 3, Rounding::Down), Some(3));
//! assert_eq!(div_round(10, 3, Rounding::Up), Some(4));
//! assert_eq!(div_round(10, 0, Rounding::Down), None);
//! ```

use primitive_types::U256;

use crate::domain::Rounding;
use crate::error::{AmmError, Result};

/// Integer division of `u128` values with explicit rounding direction.
///
/// Returns [`None`] if `denominator` is zero.
#[must_use]
pub const fn div_round(numerator: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let q = numerator / denominator;
    match rounding {
        Rounding::Down => Some(q),
        // q + 1 cannot overflow: a non-zero remainder implies denominator > 1.
        Rounding::Up if numerator % denominator != 0 => Some(q + 1),
        Rounding::Up => Some(q),
    }
}

/// `ceil(a / b)` on 256-bit operands.
///
/// # Errors
///
/// Returns [`AmmError::DivisionByZero`] if `b` is zero.
pub fn div_up(a: U256, b: U256) -> Result<U256> {
    if b.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    let (q, r) = a.div_mod(b);
    if r.is_zero() {
        Ok(q)
    } else {
        // q < a <= U256::MAX whenever r != 0 and b > 1
        Ok(q + U256::one())
    }
}

/// `ceil(n / 2^k)`: removes a fixed-point scale, rounding up.
///
/// # Examples
///
/// ```
/// use primitive_types::U256;
/// use tenor_amm::math::shift_right_up;
///
/// assert_eq!(shift_right_up(U256::from(5u64), 1), U256::from(3u64));
/// assert_eq!(shift_right_up(U256::from(4u64), 1), U256::from(2u64));
/// ```
#[must_use]
pub fn shift_right_up(n: U256, k: usize) -> U256 {
    if k == 0 {
        return n;
    }
    if k >= 256 {
        return if n.is_zero() { n } else { U256::one() };
    }
    let q = n >> k;
    if q << k == n {
        q
    } else {
        q + U256::one()
    }
}
