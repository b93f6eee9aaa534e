//! Full-width multiply-divide on 256-bit operands.
//!
//! Products of reserve-scale quantities routinely exceed 256 bits, so the
//! multiplication is carried out in a 512-bit intermediate ([`U512`]) and
//! only the quotient is narrowed back.  Narrowing is always checked: a
//! quotient that does not fit reports [`AmmError::Overflow`] instead of
//! wrapping.

use primitive_types::{U256, U512};

use crate::domain::Rounding;
use crate::error::{AmmError, Result};

/// Widens a `u128` into a [`U256`].
#[inline]
#[must_use]
pub fn wide(value: u128) -> U256 {
    U256::from(value)
}

/// Narrows a [`U256`] to `u128`.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] with `context` if `value >= 2^128`.
#[inline]
pub fn narrow(value: U256, context: &'static str) -> Result<u128> {
    if value.bits() > 128 {
        return Err(AmmError::Overflow(context));
    }
    Ok(value.low_u128())
}

/// Narrows a [`U512`] to [`U256`].
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] with `context` if `value >= 2^256`.
#[inline]
pub fn narrow_512(value: U512, context: &'static str) -> Result<U256> {
    if value.bits() > 256 {
        return Err(AmmError::Overflow(context));
    }
    let U512(limbs) = value;
    Ok(U256([limbs[0], limbs[1], limbs[2], limbs[3]]))
}

/// Computes `a · b / denominator` with the requested rounding, using a
/// 512-bit intermediate so the product never overflows.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
/// - [`AmmError::Overflow`] if the quotient does not fit in 256 bits.
///
/// # Examples
///
/// ```
/// use primitive_types::U256;
/// use tenor_amm::domain::Rounding;
/// use tenor_amm::math::mul_div;
///
/// let q = mul_div(U256::MAX, U256::from(3u64), U256::from(4u64), Rounding::Up);
/// assert!(q.is_ok());
/// ```
pub fn mul_div(a: U256, b: U256, denominator: U256, rounding: Rounding) -> Result<U256> {
    if denominator.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    let product = a.full_mul(b);
    let (q, r) = product.div_mod(U512::from(denominator));
    let q = match rounding {
        Rounding::Up if !r.is_zero() => q + U512::one(),
        _ => q,
    };
    narrow_512(q, "mul_div quotient overflow")
}

/// Divides two 512-bit values with the requested rounding.
///
/// # Errors
///
/// Returns [`AmmError::DivisionByZero`] if `denominator` is zero.
pub fn div_wide(numerator: U512, denominator: U512, rounding: Rounding) -> Result<U512> {
    if denominator.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    let (q, r) = numerator.div_mod(denominator);
    match rounding {
        Rounding::Up if !r.is_zero() => Ok(q + U512::one()),
        _ => Ok(q),
    }
}

/// Narrows a [`U512`] straight to `u128`.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] with `context` if `value >= 2^128`.
#[inline]
pub fn narrow_wide(value: U512, context: &'static str) -> Result<u128> {
    narrow(narrow_512(value, context)?, context)
}

/// `ceil(a · b / denominator)` without intermediate overflow.
///
/// # Errors
///
/// Same as [`mul_div`].
#[inline]
pub fn mul_div_up(a: U256, b: U256, denominator: U256) -> Result<U256> {
    mul_div(a, b, denominator, Rounding::Up)
}

/// Checked `a · b` in 256 bits.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] with `context` on overflow.
#[inline]
pub fn mul(a: U256, b: U256, context: &'static str) -> Result<U256> {
    a.checked_mul(b).ok_or(AmmError::Overflow(context))
}

/// Checked `a + b` in 256 bits.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] with `context` on overflow.
#[inline]
pub fn add(a: U256, b: U256, context: &'static str) -> Result<U256> {
    a.checked_add(b).ok_or(AmmError::Overflow(context))
}

/// Checked `a − b` in 256 bits.
///
/// # Errors
///
/// Returns [`AmmError::Underflow`] with `context` if `b > a`.
#[inline]
pub fn sub(a: U256, b: U256, context: &'static str) -> Result<U256> {
    a.checked_sub(b).ok_or(AmmError::Underflow(context))
}

/// Checked `a << k` in 256 bits.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] with `context` if any set bit is shifted out.
#[inline]
pub fn shl(a: U256, k: usize, context: &'static str) -> Result<U256> {
    if a.is_zero() {
        return Ok(a);
    }
    if a.bits() + k > 256 {
        return Err(AmmError::Overflow(context));
    }
    Ok(a << k)
}
