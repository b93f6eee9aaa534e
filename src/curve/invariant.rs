//! Invariant checker.
//!
//! The curve accepts a delta only if the fee-adjusted post-state product
//! clears the pre-state target `(x · y · z) << 32`:
//!
//! | Operation | Adjusted axes | Acceptance |
//! |-----------|---------------|------------|
//! | Borrow | `xReserve = x − xDecrease`, `yAdjust = (y << 16) + 65436 · yIncrease`, `zAdjust` likewise | `xReserve · yAdjust · zAdjust > target` and `yIncrease ≥` minimum rate |
//! | Lend | `xReserve = x + xIncrease`, `yAdjust = (y << 16) − 65636 · yDecrease`, `zAdjust` likewise | `xReserve · yAdjust · zAdjust ≥ target` |
//!
//! Products are evaluated in 512 bits; nothing here mutates state.

use primitive_types::{U256, U512};

use super::constants::{ADJUST_SHIFT, BORROW_FEE_BASE, LEND_FEE_BASE, MIN_RATE_SHIFT};
use crate::domain::{BorrowDelta, CurveState, LendDelta};
use crate::error::{AmmError, Result};
use crate::math::{add, div_up, mul, mul_div_up, shl, sqrt_up, wide};

/// The pre-state target `(x · y · z) << 32`, computed as
/// `x · (y << 16) · (z << 16)`.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] only for states outside the 112-bit
/// axis bound, which [`CurveState`] never holds.
pub fn invariant_target(state: &CurveState) -> Result<U512> {
    let y = shl(wide(state.y()), ADJUST_SHIFT, "y adjust overflow")?;
    let z = shl(wide(state.z()), ADJUST_SHIFT, "z adjust overflow")?;
    let xy = mul(wide(state.x()), y, "invariant target overflow")?;
    Ok(xy.full_mul(z))
}

/// `xReserve · yAdjust · zAdjust` in 512 bits.
pub(crate) fn adjusted_product(x_reserve: U256, y_adjust: U256, z_adjust: U256) -> Result<U512> {
    x_reserve
        .full_mul(y_adjust)
        .checked_mul(U512::from(z_adjust))
        .ok_or(AmmError::Overflow("adjusted product overflow"))
}

/// `(axis << 16) + 65436 · increase`.
pub(crate) fn borrow_adjust(axis: u128, increase: U256) -> Result<U256> {
    let scaled = shl(wide(axis), ADJUST_SHIFT, "borrow adjust overflow")?;
    let fee_scaled = mul(wide(BORROW_FEE_BASE), increase, "borrow adjust overflow")?;
    add(scaled, fee_scaled, "borrow adjust overflow")
}

/// `(axis << 16) − 65636 · decrease`.
///
/// # Errors
///
/// A decrease that drains the adjusted axis is reported as
/// [`AmmError::InvariantViolation`].
pub(crate) fn lend_adjust(axis: u128, decrease: U256) -> Result<U256> {
    let scaled = shl(wide(axis), ADJUST_SHIFT, "lend adjust overflow")?;
    let fee_scaled = mul(wide(LEND_FEE_BASE), decrease, "lend adjust overflow")?;
    match scaled.checked_sub(fee_scaled) {
        Some(adjust) if !adjust.is_zero() => Ok(adjust),
        _ => Err(AmmError::InvariantViolation),
    }
}

/// The smallest borrow increase on `axis` the curve accepts:
/// `divUp((xDecrease · axis) << 12, xReserve · 65436)`.
///
/// Applied to `y` it is the minimum-rate floor; applied to `z` it is the
/// lower end of the z-branch interpolation.
///
/// # Errors
///
/// Returns [`AmmError::DivisionByZero`] if `x_reserve` is zero.
pub fn borrow_min_increase(axis: u128, x_decrease: u128, x_reserve: U256) -> Result<U256> {
    let numerator = shl(
        mul(wide(x_decrease), wide(axis), "minimum rate overflow")?,
        MIN_RATE_SHIFT,
        "minimum rate overflow",
    )?;
    let denominator = mul(x_reserve, wide(BORROW_FEE_BASE), "minimum rate overflow")?;
    div_up(numerator, denominator)
}

/// The fee-adjusted curve midpoint on `axis`:
/// `sqrtUp(mulDivUp((axis << 16)², x, xReserve))`.
///
/// At this point the adjusted axis has moved by the square root of the
/// asset-axis ratio, so both branches of the percent interpolation meet
/// here.
///
/// The root is taken in the `<< 16` fee-adjusted scale, so the
/// interpolation midpoint differs from the unadjusted
/// `sqrtUp(axis² · x / xReserve)` by rounding and by the fee base divisor.
pub(crate) fn adjusted_midpoint(axis: u128, x: u128, x_reserve: U256) -> Result<U256> {
    let scaled = shl(wide(axis), ADJUST_SHIFT, "midpoint overflow")?;
    let squared = mul(scaled, scaled, "midpoint overflow")?;
    Ok(sqrt_up(mul_div_up(squared, wide(x), x_reserve)?))
}

/// Validates a borrow delta against the pre-state.
///
/// # Errors
///
/// - [`AmmError::InvariantViolation`] if the adjusted product does not
///   strictly exceed the target, or `xDecrease` drains the asset axis.
/// - [`AmmError::BelowMinimumRate`] if `yIncrease` is under the floor.
pub fn check_borrow(state: &CurveState, delta: &BorrowDelta) -> Result<()> {
    if delta.x_decrease() >= state.x() {
        return Err(AmmError::InvariantViolation);
    }
    let x_reserve = wide(state.x() - delta.x_decrease());
    let y_adjust = borrow_adjust(state.y(), wide(delta.y_increase()))?;
    let z_adjust = borrow_adjust(state.z(), wide(delta.z_increase()))?;
    if adjusted_product(x_reserve, y_adjust, z_adjust)? <= invariant_target(state)? {
        return Err(AmmError::InvariantViolation);
    }
    let floor = borrow_min_increase(state.y(), delta.x_decrease(), x_reserve)?;
    if wide(delta.y_increase()) < floor {
        return Err(AmmError::BelowMinimumRate);
    }
    Ok(())
}

/// Validates a lend delta against the pre-state.
///
/// # Errors
///
/// Returns [`AmmError::InvariantViolation`] if either decrease drains its
/// adjusted axis or the adjusted product falls below the target.
pub fn check_lend(state: &CurveState, delta: &LendDelta) -> Result<()> {
    let x_reserve = add(
        wide(state.x()),
        wide(delta.x_increase()),
        "lend reserve overflow",
    )?;
    let y_adjust = lend_adjust(state.y(), wide(delta.y_decrease()))?;
    let z_adjust = lend_adjust(state.z(), wide(delta.z_decrease()))?;
    if adjusted_product(x_reserve, y_adjust, z_adjust)? < invariant_target(state)? {
        return Err(AmmError::InvariantViolation);
    }
    Ok(())
}
