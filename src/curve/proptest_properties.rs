//! Property-based tests using `proptest` for curve invariant validation.
//!
//! Covers six properties of the pricing engine:
//!
//! 1. **Invariant monotonicity**: accepted borrows grow and accepted
//!    lends never shrink the raw `x · y · z`.
//! 2. **Branch continuity**: both branches meet at weight `2^31`.
//! 3. **Fee conservation**: the three fee components sum to the total.
//! 4. **Rounding safety**: neither a lend-then-borrow nor a
//!    borrow-then-lend sequence lowers `x · y · z`.
//! 5. **Idempotent re-quote**: identical inputs give identical quotes.
//! 6. **Target round trip**: feeding a percent quote's debt, collateral,
//!    loan or coverage back into the target-given mode reproduces it.

use proptest::prelude::*;

use super::{accrue_fees, BorrowMath, LendMath};
use crate::config::FeeConfig;
use crate::domain::{
    BorrowSpec, CurveBranch, CurveState, LendSpec, Maturity, Percent, Rounding,
};
use crate::math::div_round;

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Curve states with `x` in [10^4, 10^15] and `y`, `z` in [10^3, 10^15].
fn state_strategy() -> impl Strategy<Value = CurveState> {
    (
        10_000u128..=1_000_000_000_000_000u128,
        1_000u128..=1_000_000_000_000_000u128,
        1_000u128..=1_000_000_000_000_000u128,
    )
        .prop_filter_map("valid curve state", |(x, y, z)| CurveState::new(x, y, z).ok())
}

/// Trade size in thousandths of `x`, up to a third of the axis.
fn fraction_strategy() -> impl Strategy<Value = u128> {
    1u128..=333u128
}

/// Seconds to maturity in [1, 2^30].
fn dt_strategy() -> impl Strategy<Value = u64> {
    1u64..=(1u64 << 30)
}

fn fee_strategy() -> impl Strategy<Value = FeeConfig> {
    (0u64..=100, 0u64..=100, 0u64..=100).prop_map(|(f, p, s)| FeeConfig::new(f, p, s))
}

fn percent_strategy() -> impl Strategy<Value = Percent> {
    (0u64..=(1u64 << 32)).prop_filter_map("percent in range", |v| Percent::new(v).ok())
}

fn trade_size(state: &CurveState, fraction: u128) -> u128 {
    (state.x() * fraction / 1_000).max(1)
}

fn ceil_ratio(a: u128, b: u128) -> u128 {
    div_round(a, b, Rounding::Up).unwrap_or(u128::MAX)
}

// ---------------------------------------------------------------------------
// Property 1: Invariant Monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_borrow_grows_invariant(
        state in state_strategy(),
        fraction in fraction_strategy(),
        dt in dt_strategy(),
        fees in fee_strategy(),
        percent in percent_strategy(),
    ) {
        let Ok(x_dec) = BorrowMath::x_decrease(trade_size(&state, fraction), dt, &fees) else {
            return Ok(());
        };
        if x_dec >= state.x() {
            return Ok(());
        }
        let priced = BorrowMath::given_percent(&state, x_dec, percent);
        prop_assert!(priced.is_ok(), "percent borrow failed on {}: {:?}", state, priced);
        let Ok(delta) = priced else {
            return Ok(());
        };
        let Ok(next) = state.after_borrow(&delta) else {
            return Err(TestCaseError::fail("borrow left the curve bounds"));
        };
        prop_assert!(
            next.invariant() > state.invariant(),
            "borrow must grow x·y·z: {} -> {}",
            state, next
        );
    }

    #[test]
    fn prop_lend_keeps_invariant(
        state in state_strategy(),
        fraction in fraction_strategy(),
        dt in dt_strategy(),
        fees in fee_strategy(),
        percent in percent_strategy(),
    ) {
        let Ok(x_inc) = LendMath::x_increase(trade_size(&state, fraction), dt, &fees) else {
            return Ok(());
        };
        let priced = LendMath::given_percent(&state, x_inc, percent);
        prop_assert!(priced.is_ok(), "percent lend failed on {}: {:?}", state, priced);
        let Ok(delta) = priced else {
            return Ok(());
        };
        let Ok(next) = state.after_lend(&delta) else {
            return Err(TestCaseError::fail("lend left the curve bounds"));
        };
        prop_assert!(
            next.invariant() >= state.invariant(),
            "lend must not shrink x·y·z: {} -> {}",
            state, next
        );
    }
}

// ---------------------------------------------------------------------------
// Property 2: Branch Continuity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_borrow_branches_meet(
        state in state_strategy(),
        fraction in fraction_strategy(),
        dt in dt_strategy(),
    ) {
        let Ok(x_dec) = BorrowMath::x_decrease(trade_size(&state, fraction), dt, &FeeConfig::ZERO)
        else {
            return Ok(());
        };
        if x_dec >= state.x() {
            return Ok(());
        }
        let mid = CurveBranch::MIDPOINT_WEIGHT;
        let (Ok(a), Ok(b)) = (
            BorrowMath::given_branch(&state, x_dec, CurveBranch::YBranch { weight: mid }),
            BorrowMath::given_branch(&state, x_dec, CurveBranch::ZBranch { weight: mid }),
        ) else {
            return Err(TestCaseError::fail("midpoint borrow failed"));
        };
        prop_assert!(a.y_increase().abs_diff(b.y_increase()) <= ceil_ratio(state.y(), state.z()) + 1);
        prop_assert!(a.z_increase().abs_diff(b.z_increase()) <= ceil_ratio(state.z(), state.y()) + 1);
    }

    #[test]
    fn prop_lend_branches_meet(
        state in state_strategy(),
        fraction in fraction_strategy(),
        dt in dt_strategy(),
    ) {
        let Ok(x_inc) = LendMath::x_increase(trade_size(&state, fraction), dt, &FeeConfig::ZERO)
        else {
            return Ok(());
        };
        let mid = CurveBranch::MIDPOINT_WEIGHT;
        let (Ok(a), Ok(b)) = (
            LendMath::given_branch(&state, x_inc, CurveBranch::YBranch { weight: mid }),
            LendMath::given_branch(&state, x_inc, CurveBranch::ZBranch { weight: mid }),
        ) else {
            return Err(TestCaseError::fail("midpoint lend failed"));
        };
        prop_assert!(a.y_decrease().abs_diff(b.y_decrease()) <= ceil_ratio(state.y(), state.z()) + 1);
        prop_assert!(a.z_decrease().abs_diff(b.z_decrease()) <= ceil_ratio(state.z(), state.y()) + 1);
    }
}

// ---------------------------------------------------------------------------
// Property 3: Fee Conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_fee_components_sum_to_total(
        amount in 0u128..=1_000_000_000_000_000_000u128,
        dt in dt_strategy(),
        fees in fee_strategy(),
    ) {
        let Ok(split) = accrue_fees(amount, dt, &fees) else {
            return Err(TestCaseError::fail("fee split overflowed"));
        };
        prop_assert_eq!(split.lp_fee + split.protocol_fee + split.staking_fee, split.total);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Rounding Safety
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_lend_then_borrow_never_shrinks_invariant(
        state in state_strategy(),
        lend_fraction in fraction_strategy(),
        borrow_fraction in fraction_strategy(),
        dt in dt_strategy(),
        fees in fee_strategy(),
        lend_percent in percent_strategy(),
        borrow_percent in percent_strategy(),
    ) {
        let before = state.invariant();
        let Ok(x_inc) = LendMath::x_increase(trade_size(&state, lend_fraction), dt, &fees) else {
            return Ok(());
        };
        let Ok(lent) = LendMath::given_percent(&state, x_inc, lend_percent)
            .and_then(|d| state.after_lend(&d))
        else {
            return Ok(());
        };
        let Ok(x_dec) = BorrowMath::x_decrease(trade_size(&lent, borrow_fraction), dt, &fees) else {
            return Ok(());
        };
        if x_dec >= lent.x() {
            return Ok(());
        }
        let Ok(borrowed) = BorrowMath::given_percent(&lent, x_dec, borrow_percent)
            .and_then(|d| lent.after_borrow(&d))
        else {
            return Ok(());
        };
        prop_assert!(borrowed.invariant() >= before);
    }

    #[test]
    fn prop_borrow_then_lend_never_shrinks_invariant(
        state in state_strategy(),
        borrow_fraction in fraction_strategy(),
        lend_fraction in fraction_strategy(),
        dt in dt_strategy(),
        fees in fee_strategy(),
        borrow_percent in percent_strategy(),
        lend_percent in percent_strategy(),
    ) {
        let before = state.invariant();
        let Ok(x_dec) = BorrowMath::x_decrease(trade_size(&state, borrow_fraction), dt, &fees) else {
            return Ok(());
        };
        if x_dec >= state.x() {
            return Ok(());
        }
        let Ok(borrowed) = BorrowMath::given_percent(&state, x_dec, borrow_percent)
            .and_then(|d| state.after_borrow(&d))
        else {
            return Ok(());
        };
        let Ok(x_inc) = LendMath::x_increase(trade_size(&borrowed, lend_fraction), dt, &fees) else {
            return Ok(());
        };
        let Ok(lent) = LendMath::given_percent(&borrowed, x_inc, lend_percent)
            .and_then(|d| borrowed.after_lend(&d))
        else {
            return Ok(());
        };
        prop_assert!(lent.invariant() >= before);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Idempotent Re-quote
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_quotes_are_deterministic(
        state in state_strategy(),
        fraction in fraction_strategy(),
        dt in dt_strategy(),
        fees in fee_strategy(),
        percent in percent_strategy(),
    ) {
        let amount = trade_size(&state, fraction);
        let maturity = Maturity::new(dt);
        let Ok(lend) = LendSpec::given_percent(amount, percent, 0, 0) else {
            return Ok(());
        };
        prop_assert_eq!(
            LendMath::quote(&state, &fees, maturity, 0, &lend),
            LendMath::quote(&state, &fees, maturity, 0, &lend)
        );
        let Ok(borrow) = BorrowSpec::given_percent(amount, percent, u128::MAX, u128::MAX) else {
            return Ok(());
        };
        prop_assert_eq!(
            BorrowMath::quote(&state, &fees, maturity, 0, &borrow),
            BorrowMath::quote(&state, &fees, maturity, 0, &borrow)
        );
    }
}

// ---------------------------------------------------------------------------
// Property 6: Target Round Trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_borrow_targets_reproduce(
        state in state_strategy(),
        fraction in fraction_strategy(),
        dt in dt_strategy(),
        fees in fee_strategy(),
        percent in percent_strategy(),
    ) {
        let Ok(x_dec) = BorrowMath::x_decrease(trade_size(&state, fraction), dt, &fees) else {
            return Ok(());
        };
        let Ok(delta) = BorrowMath::given_percent(&state, x_dec, percent) else {
            return Ok(());
        };
        let (Ok(debt), Ok(collateral)) = (
            BorrowMath::get_debt(&delta, dt),
            BorrowMath::get_collateral(&state, &delta, dt),
        ) else {
            return Err(TestCaseError::fail("due overflowed"));
        };

        let Ok(by_debt) = BorrowMath::given_debt(&state, x_dec, debt, dt) else {
            return Err(TestCaseError::fail("debt-given re-quote failed"));
        };
        prop_assert_eq!(BorrowMath::get_debt(&by_debt, dt), Ok(debt));

        let Ok(by_collateral) = BorrowMath::given_collateral(&state, x_dec, collateral, dt) else {
            return Err(TestCaseError::fail("collateral-given re-quote failed"));
        };
        prop_assert_eq!(BorrowMath::get_collateral(&state, &by_collateral, dt), Ok(collateral));
    }

    #[test]
    fn prop_lend_targets_reproduce(
        state in state_strategy(),
        fraction in fraction_strategy(),
        dt in dt_strategy(),
        fees in fee_strategy(),
        percent in percent_strategy(),
    ) {
        let Ok(x_inc) = LendMath::x_increase(trade_size(&state, fraction), dt, &fees) else {
            return Ok(());
        };
        let Ok(delta) = LendMath::given_percent(&state, x_inc, percent) else {
            return Ok(());
        };
        let (Ok(loan), Ok(coverage)) = (
            LendMath::get_loan(&delta, dt),
            LendMath::get_coverage(&state, &delta, dt),
        ) else {
            return Err(TestCaseError::fail("claims overflowed"));
        };

        let Ok(by_loan) = LendMath::given_loan(&state, x_inc, loan, dt) else {
            return Err(TestCaseError::fail("loan-given re-quote failed"));
        };
        prop_assert_eq!(LendMath::get_loan(&by_loan, dt), Ok(loan));

        let Ok(by_coverage) = LendMath::given_coverage(&state, x_inc, coverage, dt) else {
            return Err(TestCaseError::fail("coverage-given re-quote failed"));
        };
        prop_assert_eq!(LendMath::get_coverage(&state, &by_coverage, dt), Ok(coverage));
    }
}
