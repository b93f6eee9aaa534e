//! The constant-product pricing engine.
//!
//! Converts a user-specified quantity into the exact curve delta that
//! satisfies the pool invariant, plus the fee split.  Everything here is
//! pure: callers pass the pre-state, fee rates and clock explicitly and
//! commit the result themselves.
//!
//! | Component | Entry points |
//! |-----------|--------------|
//! | Invariant checker | [`check_borrow`], [`check_lend`], [`invariant_target`] |
//! | Borrow pricing | [`BorrowMath`] → [`BorrowQuote`] |
//! | Lend pricing | [`LendMath`] → [`LendQuote`] |
//! | Fee accrual | [`accrue_fees`] → [`FeeSplit`] |

pub mod constants;

mod borrow;
mod fee;
mod invariant;
mod lend;

#[cfg(test)]
mod proptest_properties;

pub use borrow::{BorrowMath, BorrowQuote};
pub use fee::{accrue_fees, FeeSplit};
pub use invariant::{borrow_min_increase, check_borrow, check_lend, invariant_target};
pub use lend::{LendMath, LendQuote};
