//! Fundamental domain value types used throughout the lending market.
//!
//! This module contains the value types that model one fixed-maturity
//! pool: the three-axis curve state, reserves, claims, dues, bookkeeping,
//! the settlement basis, proposed deltas, and the lend/borrow operation
//! specifications.
//! Types with invariants use validated constructors.

mod accounting;
mod borrow_spec;
mod claims;
mod curve_state;
mod delta;
mod lend_spec;
mod maturity;
mod outcome;
mod percent;
mod reserves;
mod rounding;
mod settlement;

pub use accounting::{FeesStored, PoolAccounting};
pub use borrow_spec::BorrowSpec;
pub use claims::{Claims, Due, DueId};
pub use curve_state::{CurveState, MAX_CURVE_VALUE};
pub use delta::{BorrowDelta, LendDelta};
pub use lend_spec::LendSpec;
pub use maturity::Maturity;
pub use outcome::{BurnOutcome, MintOutcome, WithdrawOutcome};
pub use percent::{CurveBranch, Percent};
pub use reserves::PoolReserves;
pub use rounding::Rounding;
pub use settlement::Settlement;
