//! Borrow pricing.
//!
//! Every mode first prices the time value of money into the asset axis:
//!
//! ```text
//! xDecrease = ceil(assetOut · (Δt · (fee + protocolFee + stakingFee) + 2^40) / 2^40)
//! ```
//!
//! then fixes one of `yIncrease`/`zIncrease` and back-solves the other so
//! the adjusted product strictly exceeds the target.
//!
//! | Mode | Fixed directly | Back-solved |
//! |------|----------------|-------------|
//! | [`BorrowSpec::GivenPercent`], y-branch | `yIncrease` interpolated from the minimum rate to the midpoint | `zIncrease` |
//! | [`BorrowSpec::GivenPercent`], z-branch | `zIncrease` interpolated from its minimum to the midpoint | `yIncrease` |
//! | [`BorrowSpec::GivenDebt`] | `yIncrease = ((debtIn − xDecrease) << 32) / Δt` | `zIncrease` |
//! | [`BorrowSpec::GivenCollateral`] | `zIncrease = ((collateralIn − principal) << 25) / Δt` | `yIncrease` |
//!
//! All borrow-side quantities round up.

use primitive_types::{U256, U512};

use super::constants::{
    ADJUST_SHIFT, BASE_SHIFT, BORROW_FEE_BASE, COLLATERAL_SHIFT, INTEREST_SHIFT, WEIGHT_SHIFT,
};
use super::fee::{accrue_fees, time_priced_scale, FeeSplit};
use super::invariant::{
    adjusted_midpoint, borrow_adjust, borrow_min_increase, check_borrow, invariant_target,
};
use crate::config::FeeConfig;
use crate::domain::{
    BorrowDelta, BorrowSpec, CurveBranch, CurveState, Due, Maturity, Percent, Rounding,
};
use crate::error::{AmmError, Result};
use crate::math::{
    add, div_up, div_wide, mul, mul_div_up, narrow, narrow_wide, shift_right_up, shl, wide,
};

/// Result of pricing a borrow: the curve delta, the borrower's due and the
/// fee stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BorrowQuote {
    /// Curve change.
    pub delta: BorrowDelta,
    /// Debt owed and collateral locked.
    pub due: Due,
    /// Fee stored on the asset withdrawn.
    pub fees: FeeSplit,
}

/// Borrow-side curve math.
///
/// Stateless: every function takes the pre-state explicitly and returns a
/// validated delta without mutating anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct BorrowMath;

impl BorrowMath {
    /// `ceil(assetOut · (Δt · (fee + protocolFee + stakingFee) + 2^40) / 2^40)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidInput`] if `asset_out` is zero.
    /// - [`AmmError::Overflow`] if the result exceeds 128 bits.
    pub fn x_decrease(asset_out: u128, time_to_maturity: u64, fees: &FeeConfig) -> Result<u128> {
        if asset_out == 0 {
            return Err(AmmError::InvalidInput("borrow amount must be non-zero"));
        }
        let scale = time_priced_scale(time_to_maturity, fees.total())?;
        narrow(
            mul_div_up(wide(asset_out), scale, U256::one() << BASE_SHIFT)?,
            "x decrease overflow",
        )
    }

    /// Prices a percent-given borrow.
    ///
    /// # Errors
    ///
    /// See [`BorrowMath::given_branch`].
    pub fn given_percent(state: &CurveState, x_decrease: u128, percent: Percent) -> Result<BorrowDelta> {
        Self::given_branch(state, x_decrease, percent.branch())
    }

    /// Prices a borrow at an explicit branch and weight.
    ///
    /// The directly-solved axis moves from its minimum increase (weight 0)
    /// to the fee-adjusted midpoint (weight `2^31`), rounding up; the other
    /// axis is back-solved.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidInput`] if the weight exceeds `2^31` or
    ///   `x_decrease` drains the asset axis.
    /// - [`AmmError::InvariantViolation`] / [`AmmError::BelowMinimumRate`]
    ///   from the final check.
    pub fn given_branch(
        state: &CurveState,
        x_decrease: u128,
        branch: CurveBranch,
    ) -> Result<BorrowDelta> {
        branch.validate()?;
        let x_reserve = Self::x_reserve(state, x_decrease)?;
        let target = invariant_target(state)?;
        let delta = match branch {
            CurveBranch::YBranch { weight } => {
                let y_increase = Self::interpolate(state.y(), state.x(), x_decrease, x_reserve, weight)?;
                let y_adjust = borrow_adjust(state.y(), y_increase)?;
                let z_increase = Self::back_solve(target, x_reserve, y_adjust, state.z())?;
                BorrowDelta::new(
                    x_decrease,
                    narrow(y_increase, "y increase overflow")?,
                    z_increase,
                )
            }
            CurveBranch::ZBranch { weight } => {
                let z_increase = Self::interpolate(state.z(), state.x(), x_decrease, x_reserve, weight)?;
                let z_adjust = borrow_adjust(state.z(), z_increase)?;
                let y_increase = Self::back_solve(target, x_reserve, z_adjust, state.y())?;
                BorrowDelta::new(
                    x_decrease,
                    y_increase,
                    narrow(z_increase, "z increase overflow")?,
                )
            }
        };
        check_borrow(state, &delta)?;
        log::trace!("borrow {branch:?} on {state}: {delta}");
        Ok(delta)
    }

    /// Prices a debt-given borrow: `yIncrease = ((debtIn − xDecrease) << 32) / Δt`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidInput`] if `debt_in < x_decrease` or
    ///   `x_decrease` drains the asset axis.
    /// - [`AmmError::DivisionByZero`] if `time_to_maturity` is zero.
    /// - [`AmmError::InvariantViolation`] / [`AmmError::BelowMinimumRate`]
    ///   from the final check.
    pub fn given_debt(
        state: &CurveState,
        x_decrease: u128,
        debt_in: u128,
        time_to_maturity: u64,
    ) -> Result<BorrowDelta> {
        let x_reserve = Self::x_reserve(state, x_decrease)?;
        let interest = debt_in
            .checked_sub(x_decrease)
            .ok_or(AmmError::InvalidInput("debt must cover the asset borrowed"))?;
        let y_increase = div_floor(
            shl(wide(interest), INTEREST_SHIFT, "y increase overflow")?,
            time_to_maturity,
        )?;
        let y_adjust = borrow_adjust(state.y(), y_increase)?;
        let z_increase = Self::back_solve(invariant_target(state)?, x_reserve, y_adjust, state.z())?;
        let delta = BorrowDelta::new(
            x_decrease,
            narrow(y_increase, "y increase overflow")?,
            z_increase,
        );
        check_borrow(state, &delta)?;
        log::trace!("borrow given debt {debt_in} on {state}: {delta}");
        Ok(delta)
    }

    /// Prices a collateral-given borrow:
    /// `zIncrease = ((collateralIn − principal) << 25) / Δt`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidInput`] if `collateral_in` is below the
    ///   collateral principal or `x_decrease` drains the asset axis.
    /// - [`AmmError::DivisionByZero`] if `time_to_maturity` is zero.
    /// - [`AmmError::InvariantViolation`] / [`AmmError::BelowMinimumRate`]
    ///   from the final check.
    pub fn given_collateral(
        state: &CurveState,
        x_decrease: u128,
        collateral_in: u128,
        time_to_maturity: u64,
    ) -> Result<BorrowDelta> {
        let x_reserve = Self::x_reserve(state, x_decrease)?;
        let principal = Self::collateral_principal(state, x_decrease)?;
        let excess = collateral_in.checked_sub(principal).ok_or(AmmError::InvalidInput(
            "collateral must cover the collateral principal",
        ))?;
        let z_increase = div_floor(
            shl(wide(excess), COLLATERAL_SHIFT, "z increase overflow")?,
            time_to_maturity,
        )?;
        let z_adjust = borrow_adjust(state.z(), z_increase)?;
        let y_increase = Self::back_solve(invariant_target(state)?, x_reserve, z_adjust, state.y())?;
        let delta = BorrowDelta::new(
            x_decrease,
            y_increase,
            narrow(z_increase, "z increase overflow")?,
        );
        check_borrow(state, &delta)?;
        log::trace!("borrow given collateral {collateral_in} on {state}: {delta}");
        Ok(delta)
    }

    /// `ceil(Δt · yIncrease / 2^32) + xDecrease`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the debt exceeds 128 bits.
    pub fn get_debt(delta: &BorrowDelta, time_to_maturity: u64) -> Result<u128> {
        let interest = shift_right_up(
            mul(
                U256::from(time_to_maturity),
                wide(delta.y_increase()),
                "debt overflow",
            )?,
            INTEREST_SHIFT,
        );
        narrow(
            add(interest, wide(delta.x_decrease()), "debt overflow")?,
            "debt overflow",
        )
    }

    /// `ceil(Δt · zIncrease / 2^25) + ceil(z · xDecrease / (x − xDecrease))`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidInput`] if `xDecrease` drains the asset axis.
    /// - [`AmmError::Overflow`] if the collateral exceeds 128 bits.
    pub fn get_collateral(
        state: &CurveState,
        delta: &BorrowDelta,
        time_to_maturity: u64,
    ) -> Result<u128> {
        let interest = shift_right_up(
            mul(
                U256::from(time_to_maturity),
                wide(delta.z_increase()),
                "collateral overflow",
            )?,
            COLLATERAL_SHIFT,
        );
        let principal = Self::collateral_principal(state, delta.x_decrease())?;
        narrow(
            add(interest, wide(principal), "collateral overflow")?,
            "collateral overflow",
        )
    }

    /// `ceil(z · xDecrease / (x − xDecrease))`, the collateral locked at
    /// zero collateral-axis movement.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if `x_decrease` drains the asset axis.
    pub fn collateral_principal(state: &CurveState, x_decrease: u128) -> Result<u128> {
        let x_reserve = Self::x_reserve(state, x_decrease)?;
        narrow(
            div_up(
                mul(wide(state.z()), wide(x_decrease), "collateral overflow")?,
                x_reserve,
            )?,
            "collateral overflow",
        )
    }

    /// Prices a borrow end to end: time to maturity, `xDecrease`, the
    /// mode's delta, the resulting due, slippage bounds, and the fee split.
    ///
    /// The delta is also checked to leave every axis inside the curve
    /// bounds, so a successful quote can always be committed.
    ///
    /// # Errors
    ///
    /// - [`AmmError::MaturityReached`] if `now >= maturity`.
    /// - [`AmmError::SlippageExceeded`] if the due exceeds the caller's caps.
    /// - Any error of the mode-specific pricing function.
    pub fn quote(
        state: &CurveState,
        fees: &FeeConfig,
        maturity: Maturity,
        now: u64,
        spec: &BorrowSpec,
    ) -> Result<BorrowQuote> {
        let dt = maturity.time_to_maturity(now)?;
        let x_decrease = Self::x_decrease(spec.asset_out(), dt, fees)?;
        let delta = match *spec {
            BorrowSpec::GivenDebt { debt_in, .. } => {
                Self::given_debt(state, x_decrease, debt_in, dt)?
            }
            BorrowSpec::GivenCollateral { collateral_in, .. } => {
                Self::given_collateral(state, x_decrease, collateral_in, dt)?
            }
            BorrowSpec::GivenPercent { percent, .. } => {
                Self::given_percent(state, x_decrease, percent)?
            }
        };
        state.after_borrow(&delta)?;
        let due = Due::new(
            Self::get_debt(&delta, dt)?,
            Self::get_collateral(state, &delta, dt)?,
        );
        match *spec {
            BorrowSpec::GivenDebt { max_collateral, .. } => {
                ensure_at_most(due.collateral, max_collateral, "collateral above maximum")?;
            }
            BorrowSpec::GivenCollateral { max_debt, .. } => {
                ensure_at_most(due.debt, max_debt, "debt above maximum")?;
            }
            BorrowSpec::GivenPercent {
                max_debt,
                max_collateral,
                ..
            } => {
                ensure_at_most(due.debt, max_debt, "debt above maximum")?;
                ensure_at_most(due.collateral, max_collateral, "collateral above maximum")?;
            }
        }
        let fees = accrue_fees(spec.asset_out(), dt, fees)?;
        log::trace!("quoted {spec}: {delta}, {due}, {fees}");
        Ok(BorrowQuote { delta, due, fees })
    }

    fn x_reserve(state: &CurveState, x_decrease: u128) -> Result<U256> {
        if x_decrease >= state.x() {
            return Err(AmmError::InvalidInput("borrow drains the asset axis"));
        }
        Ok(wide(state.x() - x_decrease))
    }

    /// `min + ceil(max(mid − min, 0) · weight / 2^31)` on one axis.
    ///
    /// `mid` lives on the fee-adjusted axis:
    /// `ceil((sqrtUp((axis << 16)² · x / xReserve) − (axis << 16)) / 65436)`,
    /// not the unadjusted `sqrtUp(axis² · x / xReserve) − axis`.
    fn interpolate(
        axis: u128,
        x: u128,
        x_decrease: u128,
        x_reserve: U256,
        weight: u64,
    ) -> Result<U256> {
        let min = borrow_min_increase(axis, x_decrease, x_reserve)?;
        let scaled = shl(wide(axis), ADJUST_SHIFT, "midpoint overflow")?;
        let midpoint = adjusted_midpoint(axis, x, x_reserve)?;
        let mid = if midpoint > scaled {
            div_up(midpoint - scaled, wide(BORROW_FEE_BASE))?
        } else {
            U256::zero()
        };
        let span = mid.saturating_sub(min);
        let step = shift_right_up(
            mul(span, U256::from(weight), "interpolation overflow")?,
            WEIGHT_SHIFT,
        );
        add(min, step, "interpolation overflow")
    }

    /// Smallest increase on `other_axis` whose adjusted product strictly
    /// exceeds `target` given the fixed axis' adjusted value.
    fn back_solve(target: U512, x_reserve: U256, fixed_adjust: U256, other_axis: u128) -> Result<u128> {
        let denominator = x_reserve.full_mul(fixed_adjust);
        let needed = div_wide(target, denominator, Rounding::Down)? + U512::one();
        let current = U512::from(shl(wide(other_axis), ADJUST_SHIFT, "back-solve overflow")?);
        if needed <= current {
            return Ok(0);
        }
        let gap = narrow_wide(needed - current, "back-solve overflow")?;
        narrow(
            div_up(wide(gap), wide(BORROW_FEE_BASE))?,
            "back-solve overflow",
        )
    }
}

/// `floor(n / Δt)`.
fn div_floor(numerator: U256, time_to_maturity: u64) -> Result<U256> {
    let denominator = U256::from(time_to_maturity);
    if denominator.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    Ok(numerator / denominator)
}

fn ensure_at_most(value: u128, cap: u128, context: &'static str) -> Result<()> {
    if value > cap {
        return Err(AmmError::SlippageExceeded(context));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const DT: u64 = 1 << 29;
    const FEES: FeeConfig = FeeConfig::new(1, 1, 1);

    fn state() -> CurveState {
        let Ok(s) = CurveState::new(10_000, 12_000, 1_000) else {
            panic!("valid state");
        };
        s
    }

    fn pct(v: u64) -> Percent {
        let Ok(p) = Percent::new(v) else {
            panic!("valid percent");
        };
        p
    }

    fn x_dec() -> u128 {
        let Ok(x) = BorrowMath::x_decrease(1_000, DT, &FEES) else {
            panic!("expected Ok");
        };
        x
    }

    // -- xDecrease ----------------------------------------------------------

    #[test]
    fn x_decrease_prices_time() {
        assert_eq!(x_dec(), 1_002);
        assert_eq!(BorrowMath::x_decrease(1_000, 0, &FEES), Ok(1_000));
    }

    #[test]
    fn x_decrease_zero_rejected() {
        assert!(BorrowMath::x_decrease(0, DT, &FEES).is_err());
    }

    // -- GivenPercent -------------------------------------------------------

    #[test]
    fn percent_extremes_and_midpoint() {
        let cases = [
            (0, (84, 104), (1_013, 1_776)),
            (1 << 31, (652, 55), (1_084, 992)),
            (1 << 32, (1_246, 7), (1_158, 224)),
        ];
        for (p, (y, z), (debt, collateral)) in cases {
            let Ok(delta) = BorrowMath::given_percent(&state(), x_dec(), pct(p)) else {
                panic!("percent {p} should price");
            };
            assert_eq!((delta.y_increase(), delta.z_increase()), (y, z), "percent {p}");
            assert_eq!(BorrowMath::get_debt(&delta, DT), Ok(debt));
            assert_eq!(BorrowMath::get_collateral(&state(), &delta, DT), Ok(collateral));
        }
    }

    #[test]
    fn branches_meet_at_midpoint() {
        let Ok(y_side) = BorrowMath::given_branch(
            &state(),
            x_dec(),
            CurveBranch::YBranch { weight: 1 << 31 },
        ) else {
            panic!("expected Ok");
        };
        let Ok(z_side) = BorrowMath::given_branch(
            &state(),
            x_dec(),
            CurveBranch::ZBranch { weight: 1 << 31 },
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(y_side.z_increase(), z_side.z_increase());
        assert_eq!((y_side.y_increase(), z_side.y_increase()), (652, 644));
    }

    #[test]
    fn draining_borrow_rejected() {
        assert_eq!(
            BorrowMath::given_percent(&state(), 10_000, Percent::HALF),
            Err(AmmError::InvalidInput("borrow drains the asset axis"))
        );
    }

    #[test]
    fn overweight_branch_rejected() {
        let branch = CurveBranch::YBranch {
            weight: (1 << 31) + 1,
        };
        assert!(BorrowMath::given_branch(&state(), x_dec(), branch).is_err());
    }

    // -- GivenDebt / GivenCollateral ----------------------------------------

    #[test]
    fn given_debt() {
        let Ok(delta) = BorrowMath::given_debt(&state(), x_dec(), 1_200, DT) else {
            panic!("expected Ok");
        };
        assert_eq!(delta, BorrowDelta::new(1_002, 1_584, 0));
    }

    #[test]
    fn given_debt_below_principal_rejected() {
        assert_eq!(
            BorrowMath::given_debt(&state(), x_dec(), 1_001, DT),
            Err(AmmError::InvalidInput("debt must cover the asset borrowed"))
        );
    }

    #[test]
    fn given_debt_below_minimum_rate_rejected() {
        // One unit of interest is far under the rate floor.
        assert_eq!(
            BorrowMath::given_debt(&state(), x_dec(), 1_003, DT),
            Err(AmmError::BelowMinimumRate)
        );
    }

    #[test]
    fn given_collateral() {
        let Ok(delta) = BorrowMath::given_collateral(&state(), x_dec(), 1_000, DT) else {
            panic!("expected Ok");
        };
        assert_eq!(delta, BorrowDelta::new(1_002, 644, 55));
    }

    #[test]
    fn given_collateral_below_principal_rejected() {
        // principal = ceil(1000 · 1002 / 8998) = 112
        assert_eq!(BorrowMath::collateral_principal(&state(), 1_002), Ok(112));
        assert!(BorrowMath::given_collateral(&state(), x_dec(), 111, DT).is_err());
    }

    // -- quote --------------------------------------------------------------

    #[test]
    fn quote_percent() {
        let Ok(spec) = BorrowSpec::given_percent(1_000, Percent::HALF, 1_084, 992) else {
            panic!("expected Ok");
        };
        let Ok(quote) = BorrowMath::quote(&state(), &FEES, Maturity::new(DT), 0, &spec) else {
            panic!("expected Ok");
        };
        assert_eq!(quote.delta, BorrowDelta::new(1_002, 652, 55));
        assert_eq!(quote.due, Due::new(1_084, 992));
        assert_eq!(quote.fees.total, 1);
    }

    #[test]
    fn quote_slippage() {
        let Ok(spec) = BorrowSpec::given_percent(1_000, Percent::HALF, 1_083, 992) else {
            panic!("expected Ok");
        };
        assert_eq!(
            BorrowMath::quote(&state(), &FEES, Maturity::new(DT), 0, &spec),
            Err(AmmError::SlippageExceeded("debt above maximum"))
        );
        let Ok(spec) = BorrowSpec::given_debt(1_000, 1_200, 100) else {
            panic!("expected Ok");
        };
        assert_eq!(
            BorrowMath::quote(&state(), &FEES, Maturity::new(DT), 0, &spec),
            Err(AmmError::SlippageExceeded("collateral above maximum"))
        );
    }

    #[test]
    fn quote_at_maturity_rejected() {
        let Ok(spec) = BorrowSpec::given_collateral(1_000, 1_000, u128::MAX) else {
            panic!("expected Ok");
        };
        assert_eq!(
            BorrowMath::quote(&state(), &FEES, Maturity::new(DT), DT, &spec),
            Err(AmmError::MaturityReached)
        );
    }

    #[test]
    fn quote_is_repeatable() {
        let Ok(spec) = BorrowSpec::given_percent(700, pct(123_456_789), u128::MAX, u128::MAX)
        else {
            panic!("expected Ok");
        };
        let first = BorrowMath::quote(&state(), &FEES, Maturity::new(DT), 0, &spec);
        let second = BorrowMath::quote(&state(), &FEES, Maturity::new(DT), 0, &spec);
        assert!(first.is_ok());
        assert_eq!(first, second);
    }
}
