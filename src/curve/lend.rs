//! Lend pricing: the mirror of borrow pricing with signs inverted.
//!
//! ```text
//! xIncrease = floor(assetIn · 2^40 / (Δt · (fee + protocolFee + stakingFee) + 2^40))
//! ```
//!
//! The lender gives, so every lend-side quantity truncates:
//!
//! | Claim | Formula |
//! |-------|---------|
//! | loan | `((Δt · yDecrease) >> 32) + xIncrease` |
//! | coverage | `((Δt · zDecrease) >> 25) + floor(z · xIncrease / (x + xIncrease))` |
//!
//! The back-solved axis decreases by the most the curve allows while the
//! adjusted product stays at or above the target.

use primitive_types::{U256, U512};

use super::constants::{
    ADJUST_SHIFT, BASE_SHIFT, COLLATERAL_SHIFT, INTEREST_SHIFT, LEND_FEE_BASE, MIN_RATE_SHIFT,
    WEIGHT_SHIFT,
};
use super::fee::{accrue_fees, time_priced_scale, FeeSplit};
use super::invariant::{adjusted_midpoint, check_lend, invariant_target, lend_adjust};
use crate::config::FeeConfig;
use crate::domain::{Claims, CurveBranch, CurveState, LendDelta, LendSpec, Maturity, Percent, Rounding};
use crate::error::{AmmError, Result};
use crate::math::{
    add, div_up, div_wide, mul, mul_div, narrow, narrow_wide, shl, wide, CheckedArithmetic,
};

/// Result of pricing a lend: the curve delta, the lender's claims and the
/// fee stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LendQuote {
    /// Curve change.
    pub delta: LendDelta,
    /// Loan and coverage claims issued.
    pub claims: Claims,
    /// Fee stored on `xIncrease`.
    pub fees: FeeSplit,
}

/// Lend-side curve math.
#[derive(Debug, Clone, Copy, Default)]
pub struct LendMath;

impl LendMath {
    /// `floor(assetIn · 2^40 / (Δt · (fee + protocolFee + stakingFee) + 2^40))`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if `asset_in` is zero or the
    /// fee consumes the whole deposit.
    pub fn x_increase(asset_in: u128, time_to_maturity: u64, fees: &FeeConfig) -> Result<u128> {
        let scale = time_priced_scale(time_to_maturity, fees.total())?;
        let x_increase = narrow(
            mul_div(wide(asset_in), U256::one() << BASE_SHIFT, scale, Rounding::Down)?,
            "x increase overflow",
        )?;
        if x_increase == 0 {
            return Err(AmmError::InvalidInput("lend amount too small after fees"));
        }
        Ok(x_increase)
    }

    /// Prices a percent-given lend.
    ///
    /// # Errors
    ///
    /// See [`LendMath::given_branch`].
    pub fn given_percent(state: &CurveState, x_increase: u128, percent: Percent) -> Result<LendDelta> {
        Self::given_branch(state, x_increase, percent.branch())
    }

    /// Prices a lend at an explicit branch and weight.
    ///
    /// The directly-solved axis moves from its minimum decrease (weight 0)
    /// to the fee-adjusted midpoint (weight `2^31`), truncating; the other
    /// axis is back-solved.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidInput`] if the weight exceeds `2^31`.
    /// - [`AmmError::InvariantViolation`] if no decrease on the back-solved
    ///   axis satisfies the curve.
    pub fn given_branch(state: &CurveState, x_increase: u128, branch: CurveBranch) -> Result<LendDelta> {
        branch.validate()?;
        let x_reserve = Self::x_reserve(state, x_increase)?;
        let target = invariant_target(state)?;
        let delta = match branch {
            CurveBranch::YBranch { weight } => {
                let y_decrease = Self::interpolate(state.y(), state.x(), x_increase, x_reserve, weight)?;
                let y_adjust = lend_adjust(state.y(), y_decrease)?;
                let z_decrease = Self::back_solve(target, x_reserve, y_adjust, state.z())?;
                LendDelta::new(
                    x_increase,
                    narrow(y_decrease, "y decrease overflow")?,
                    z_decrease,
                )
            }
            CurveBranch::ZBranch { weight } => {
                let z_decrease = Self::interpolate(state.z(), state.x(), x_increase, x_reserve, weight)?;
                let z_adjust = lend_adjust(state.z(), z_decrease)?;
                let y_decrease = Self::back_solve(target, x_reserve, z_adjust, state.y())?;
                LendDelta::new(
                    x_increase,
                    y_decrease,
                    narrow(z_decrease, "z decrease overflow")?,
                )
            }
        };
        check_lend(state, &delta)?;
        log::trace!("lend {branch:?} on {state}: {delta}");
        Ok(delta)
    }

    /// Prices a loan-given lend: `yDecrease = divUp((loanOut − xIncrease) << 32, Δt)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidInput`] if `loan_out < x_increase`.
    /// - [`AmmError::DivisionByZero`] if `time_to_maturity` is zero.
    /// - [`AmmError::InvariantViolation`] if the requested interest is more
    ///   than the curve can give.
    pub fn given_loan(
        state: &CurveState,
        x_increase: u128,
        loan_out: u128,
        time_to_maturity: u64,
    ) -> Result<LendDelta> {
        let x_reserve = Self::x_reserve(state, x_increase)?;
        let interest = loan_out
            .checked_sub(x_increase)
            .ok_or(AmmError::InvalidInput("loan must cover the asset lent"))?;
        let y_decrease = div_up(
            shl(wide(interest), INTEREST_SHIFT, "y decrease overflow")?,
            U256::from(time_to_maturity),
        )?;
        let y_adjust = lend_adjust(state.y(), y_decrease)?;
        let z_decrease = Self::back_solve(invariant_target(state)?, x_reserve, y_adjust, state.z())?;
        let delta = LendDelta::new(
            x_increase,
            narrow(y_decrease, "y decrease overflow")?,
            z_decrease,
        );
        check_lend(state, &delta)?;
        log::trace!("lend given loan {loan_out} on {state}: {delta}");
        Ok(delta)
    }

    /// Prices a coverage-given lend:
    /// `zDecrease = divUp((coverageOut − principal) << 25, Δt)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidInput`] if `coverage_out` is below the
    ///   coverage principal.
    /// - [`AmmError::DivisionByZero`] if `time_to_maturity` is zero.
    /// - [`AmmError::InvariantViolation`] if the requested coverage is more
    ///   than the curve can give.
    pub fn given_coverage(
        state: &CurveState,
        x_increase: u128,
        coverage_out: u128,
        time_to_maturity: u64,
    ) -> Result<LendDelta> {
        let x_reserve = Self::x_reserve(state, x_increase)?;
        let principal = Self::get_coverage_principal(state, x_increase)?;
        let excess = coverage_out.checked_sub(principal).ok_or(AmmError::InvalidInput(
            "coverage must cover the coverage principal",
        ))?;
        let z_decrease = div_up(
            shl(wide(excess), COLLATERAL_SHIFT, "z decrease overflow")?,
            U256::from(time_to_maturity),
        )?;
        let z_adjust = lend_adjust(state.z(), z_decrease)?;
        let y_decrease = Self::back_solve(invariant_target(state)?, x_reserve, z_adjust, state.y())?;
        let delta = LendDelta::new(
            x_increase,
            y_decrease,
            narrow(z_decrease, "z decrease overflow")?,
        );
        check_lend(state, &delta)?;
        log::trace!("lend given coverage {coverage_out} on {state}: {delta}");
        Ok(delta)
    }

    /// `((Δt · yDecrease) >> 32) + xIncrease`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the loan exceeds 128 bits.
    pub fn get_loan(delta: &LendDelta, time_to_maturity: u64) -> Result<u128> {
        Self::get_loan_interest(delta, time_to_maturity)?
            .safe_add(delta.x_increase(), "loan overflow")
    }

    /// `(Δt · yDecrease) >> 32`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the interest exceeds 128 bits.
    pub fn get_loan_interest(delta: &LendDelta, time_to_maturity: u64) -> Result<u128> {
        let scaled = mul(
            U256::from(time_to_maturity),
            wide(delta.y_decrease()),
            "loan overflow",
        )?;
        narrow(scaled >> INTEREST_SHIFT, "loan overflow")
    }

    /// `getCoverageInterest + getCoveragePrincipal`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the coverage exceeds 128 bits.
    pub fn get_coverage(state: &CurveState, delta: &LendDelta, time_to_maturity: u64) -> Result<u128> {
        Self::get_coverage_interest(delta, time_to_maturity)?.safe_add(
            Self::get_coverage_principal(state, delta.x_increase())?,
            "coverage overflow",
        )
    }

    /// `floor(z · xIncrease / (x + xIncrease))`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if `x + xIncrease` exceeds 128 bits.
    pub fn get_coverage_principal(state: &CurveState, x_increase: u128) -> Result<u128> {
        let x_reserve = Self::x_reserve(state, x_increase)?;
        narrow(
            mul_div(wide(state.z()), wide(x_increase), x_reserve, Rounding::Down)?,
            "coverage overflow",
        )
    }

    /// `(Δt · zDecrease) >> 25`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the interest exceeds 128 bits.
    pub fn get_coverage_interest(delta: &LendDelta, time_to_maturity: u64) -> Result<u128> {
        let scaled = mul(
            U256::from(time_to_maturity),
            wide(delta.z_decrease()),
            "coverage overflow",
        )?;
        narrow(scaled >> COLLATERAL_SHIFT, "coverage overflow")
    }

    /// Prices a lend end to end: time to maturity, `xIncrease`, the mode's
    /// delta, the resulting claims, slippage bounds, and the fee split.
    ///
    /// # Errors
    ///
    /// - [`AmmError::MaturityReached`] if `now >= maturity`.
    /// - [`AmmError::SlippageExceeded`] if a claim is below the caller's minimum.
    /// - Any error of the mode-specific pricing function.
    pub fn quote(
        state: &CurveState,
        fees: &FeeConfig,
        maturity: Maturity,
        now: u64,
        spec: &LendSpec,
    ) -> Result<LendQuote> {
        let dt = maturity.time_to_maturity(now)?;
        let x_increase = Self::x_increase(spec.asset_in(), dt, fees)?;
        let delta = match *spec {
            LendSpec::GivenLoan { loan_out, .. } => {
                Self::given_loan(state, x_increase, loan_out, dt)?
            }
            LendSpec::GivenCoverage { coverage_out, .. } => {
                Self::given_coverage(state, x_increase, coverage_out, dt)?
            }
            LendSpec::GivenPercent { percent, .. } => {
                Self::given_percent(state, x_increase, percent)?
            }
        };
        state.after_lend(&delta)?;
        let claims = Claims {
            loan_principal: x_increase,
            loan_interest: Self::get_loan_interest(&delta, dt)?,
            coverage_principal: Self::get_coverage_principal(state, x_increase)?,
            coverage_interest: Self::get_coverage_interest(&delta, dt)?,
        };
        let (loan, coverage) = (claims.loan()?, claims.coverage()?);
        match *spec {
            LendSpec::GivenLoan { min_coverage, .. } => {
                ensure_at_least(coverage, min_coverage, "coverage below minimum")?;
            }
            LendSpec::GivenCoverage { min_loan, .. } => {
                ensure_at_least(loan, min_loan, "loan below minimum")?;
            }
            LendSpec::GivenPercent {
                min_loan,
                min_coverage,
                ..
            } => {
                ensure_at_least(loan, min_loan, "loan below minimum")?;
                ensure_at_least(coverage, min_coverage, "coverage below minimum")?;
            }
        }
        let fees = accrue_fees(x_increase, dt, fees)?;
        log::trace!("quoted {spec}: {delta}, {claims}, {fees}");
        Ok(LendQuote {
            delta,
            claims,
            fees,
        })
    }

    fn x_reserve(state: &CurveState, x_increase: u128) -> Result<U256> {
        add(wide(state.x()), wide(x_increase), "lend reserve overflow")
    }

    /// `min + floor(max(mid − min, 0) · weight / 2^31)` on one axis.
    ///
    /// `mid` lives on the fee-adjusted axis:
    /// `floor(((axis << 16) − sqrtUp((axis << 16)² · x / xReserve)) / 65636)`,
    /// not the unadjusted `axis − sqrtUp(axis² · x / xReserve)`.
    fn interpolate(
        axis: u128,
        x: u128,
        x_increase: u128,
        x_reserve: U256,
        weight: u64,
    ) -> Result<U256> {
        let min = mul_div(
            shl(wide(x_increase), MIN_RATE_SHIFT, "interpolation overflow")?,
            wide(axis),
            mul(x_reserve, wide(LEND_FEE_BASE), "interpolation overflow")?,
            Rounding::Down,
        )?;
        let scaled = shl(wide(axis), ADJUST_SHIFT, "midpoint overflow")?;
        let midpoint = adjusted_midpoint(axis, x, x_reserve)?;
        let mid = scaled.saturating_sub(midpoint) / wide(LEND_FEE_BASE);
        let span = mid.saturating_sub(min);
        let step = mul(span, U256::from(weight), "interpolation overflow")? >> WEIGHT_SHIFT;
        add(min, step, "interpolation overflow")
    }

    /// Largest decrease on `other_axis` keeping the adjusted product at or
    /// above `target` given the fixed axis' adjusted value.
    fn back_solve(target: U512, x_reserve: U256, fixed_adjust: U256, other_axis: u128) -> Result<u128> {
        let denominator = x_reserve.full_mul(fixed_adjust);
        let needed = div_wide(target, denominator, Rounding::Up)?;
        let current = U512::from(shl(wide(other_axis), ADJUST_SHIFT, "back-solve overflow")?);
        if needed > current {
            return Err(AmmError::InvariantViolation);
        }
        let room = narrow_wide(current - needed, "back-solve overflow")?;
        Ok(room / LEND_FEE_BASE)
    }
}

fn ensure_at_least(value: u128, floor: u128, context: &'static str) -> Result<()> {
    if value < floor {
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

    fn state_with_z(z: u128) -> CurveState {
        let Ok(s) = CurveState::new(10_000, 12_000, z) else {
            panic!("valid state");
        };
        s
    }

    fn state() -> CurveState {
        state_with_z(1_000)
    }

    fn pct(v: u64) -> Percent {
        let Ok(p) = Percent::new(v) else {
            panic!("valid percent");
        };
        p
    }

    // -- xIncrease ----------------------------------------------------------

    #[test]
    fn x_increase_truncates() {
        assert_eq!(LendMath::x_increase(1_000, DT, &FEES), Ok(998));
        assert_eq!(LendMath::x_increase(2, DT, &FEES), Ok(1));
    }

    #[test]
    fn dust_lend_rejected() {
        assert_eq!(
            LendMath::x_increase(1, DT, &FEES),
            Err(AmmError::InvalidInput("lend amount too small after fees"))
        );
        assert!(LendMath::x_increase(0, DT, &FEES).is_err());
    }

    // -- GivenLoan ----------------------------------------------------------

    #[test]
    fn given_loan_fixture() {
        let Ok(delta) = LendMath::given_loan(&state(), 998, 1_010, DT) else {
            panic!("expected Ok");
        };
        assert_eq!(delta, LendDelta::new(998, 96, 83));
        assert_eq!(LendMath::get_loan(&delta, DT), Ok(1_010));
        assert_eq!(LendMath::get_coverage(&state(), &delta, DT), Ok(1_418));
    }

    #[test]
    fn given_loan_small_fixture() {
        let s = state_with_z(990);
        let Ok(delta) = LendMath::given_loan(&s, 99, 110, DT) else {
            panic!("expected Ok");
        };
        assert_eq!(delta, LendDelta::new(99, 88, 2));
        assert_eq!(LendMath::get_loan(&delta, DT), Ok(110));
        assert_eq!(LendMath::get_coverage(&s, &delta, DT), Ok(41));
    }

    #[test]
    fn given_loan_beyond_curve_rejected() {
        assert_eq!(
            LendMath::given_loan(&state(), 998, 100_000, DT),
            Err(AmmError::InvariantViolation)
        );
    }

    #[test]
    fn given_loan_below_principal_rejected() {
        assert!(LendMath::given_loan(&state(), 998, 997, DT).is_err());
    }

    // -- GivenCoverage ------------------------------------------------------

    #[test]
    fn given_coverage() {
        let Ok(delta) = LendMath::given_coverage(&state(), 998, 500, DT) else {
            panic!("expected Ok");
        };
        assert_eq!(delta, LendDelta::new(998, 795, 26));
        assert_eq!(LendMath::get_loan(&delta, DT), Ok(1_097));
        assert_eq!(LendMath::get_coverage(&state(), &delta, DT), Ok(506));
    }

    #[test]
    fn coverage_principal() {
        assert_eq!(LendMath::get_coverage_principal(&state(), 998), Ok(90));
        assert!(LendMath::given_coverage(&state(), 998, 89, DT).is_err());
    }

    // -- GivenPercent -------------------------------------------------------

    #[test]
    fn percent_extremes_and_midpoint() {
        let cases = [
            (0, (67, 85), (1_006, 1_450)),
            (1 << 31, (556, 46), (1_067, 826)),
            (1 << 32, (1_032, 5), (1_127, 170)),
        ];
        for (p, (y, z), (loan, coverage)) in cases {
            let Ok(delta) = LendMath::given_percent(&state(), 998, pct(p)) else {
                panic!("percent {p} should price");
            };
            assert_eq!((delta.y_decrease(), delta.z_decrease()), (y, z), "percent {p}");
            assert_eq!(LendMath::get_loan(&delta, DT), Ok(loan));
            assert_eq!(LendMath::get_coverage(&state(), &delta, DT), Ok(coverage));
        }
    }

    #[test]
    fn branches_meet_at_midpoint() {
        let Ok(y_side) =
            LendMath::given_branch(&state(), 998, CurveBranch::YBranch { weight: 1 << 31 })
        else {
            panic!("expected Ok");
        };
        let Ok(z_side) =
            LendMath::given_branch(&state(), 998, CurveBranch::ZBranch { weight: 1 << 31 })
        else {
            panic!("expected Ok");
        };
        assert_eq!(y_side.z_decrease(), z_side.z_decrease());
        assert_eq!((y_side.y_decrease(), z_side.y_decrease()), (556, 561));
    }

    // -- quote --------------------------------------------------------------

    #[test]
    fn quote_given_loan_splits_claims() {
        let Ok(spec) = LendSpec::given_loan(1_000, 1_010, 50) else {
            panic!("expected Ok");
        };
        let Ok(quote) = LendMath::quote(&state(), &FEES, Maturity::new(DT), 0, &spec) else {
            panic!("expected Ok");
        };
        assert_eq!(
            quote.claims,
            Claims {
                loan_principal: 998,
                loan_interest: 12,
                coverage_principal: 90,
                coverage_interest: 1_328,
            }
        );
        assert_eq!(quote.fees.total, 1);
    }

    #[test]
    fn quote_percent_on_boundary() {
        let Ok(spec) = LendSpec::given_percent(1_000, Percent::HALF, 1_000, 50) else {
            panic!("expected Ok");
        };
        let Ok(quote) = LendMath::quote(&state(), &FEES, Maturity::new(DT), 0, &spec) else {
            panic!("expected Ok");
        };
        assert_eq!(quote.delta, LendDelta::new(998, 556, 46));
        assert_eq!(quote.claims.loan(), Ok(1_067));
        assert_eq!(quote.claims.coverage(), Ok(826));
    }

    #[test]
    fn quote_slippage() {
        let Ok(spec) = LendSpec::given_loan(1_000, 1_010, 1_419) else {
            panic!("expected Ok");
        };
        assert_eq!(
            LendMath::quote(&state(), &FEES, Maturity::new(DT), 0, &spec),
            Err(AmmError::SlippageExceeded("coverage below minimum"))
        );
        let Ok(spec) = LendSpec::given_percent(1_000, Percent::HALF, 1_068, 0) else {
            panic!("expected Ok");
        };
        assert_eq!(
            LendMath::quote(&state(), &FEES, Maturity::new(DT), 0, &spec),
            Err(AmmError::SlippageExceeded("loan below minimum"))
        );
    }

    #[test]
    fn quote_after_maturity_rejected() {
        let Ok(spec) = LendSpec::given_coverage(1_000, 500, 0) else {
            panic!("expected Ok");
        };
        assert_eq!(
            LendMath::quote(&state(), &FEES, Maturity::new(DT), DT + 1, &spec),
            Err(AmmError::MaturityReached)
        );
    }
}
