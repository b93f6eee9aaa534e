//! Core trait abstractions for pool operations.
//!
//! This module defines the traits every pool implementation satisfies:
//! [`LendingPool`] for the maturity lifecycle and [`FromConfig`] for
//! configuration-driven construction.

mod from_config;
mod lending_pool;

pub use from_config::FromConfig;
pub use lending_pool::{BorrowOutcome, LendingPool};
