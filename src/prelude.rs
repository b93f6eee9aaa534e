//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use tenor_amm::prelude::*;
//! ```
//!
//! This re-exports the value types, operation specs, core traits,
//! configuration types, quotes and error types so that consumers don't
//! need to import from individual submodules.

pub use crate::domain::{
    BorrowSpec, BurnOutcome, Claims, CurveState, Due, DueId, LendSpec, Maturity, MintOutcome,
    Percent, PoolAccounting, PoolReserves, Rounding, Settlement, WithdrawOutcome,
};

pub use crate::traits::{BorrowOutcome, FromConfig, LendingPool};

pub use crate::math::CheckedArithmetic;

pub use crate::config::{FeeConfig, PoolConfig};

pub use crate::curve::{BorrowQuote, LendQuote};

pub use crate::error::{AmmError, Result};

pub use crate::pool::FixedTermPool;
