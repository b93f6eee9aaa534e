//! Unified error types for the tenor AMM library.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type.  Pricing functions report every failure synchronously to
//! their immediate caller and never retry internally; a rejected operation
//! leaves the pool untouched and the caller must re-quote.

/// Errors produced by the pricing engine and the pool lifecycle.
///
/// Variants carry a short static description of the failing site where
/// more than one site can raise them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum AmmError {
    /// A caller-supplied parameter is out of range (zero amount, percent
    /// above `2^32`, a target below its principal component, ...).
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// The post-operation curve state fails the constant product check.
    #[error("post-state fails the constant product check")]
    InvariantViolation,

    /// A borrow's rate increase is below the economic floor.
    #[error("borrow rate increase is below the minimum rate")]
    BelowMinimumRate,

    /// A caller-specified minimum (or maximum) was not met.
    #[error("slippage exceeded: {0}")]
    SlippageExceeded(&'static str),

    /// The operation requires `now < maturity`.
    #[error("pool maturity reached")]
    MaturityReached,

    /// The operation requires `now >= maturity`.
    #[error("pool maturity not reached")]
    MaturityNotReached,

    /// An intermediate or final value exceeds its representable range.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// A subtraction would produce a negative value.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The pool's token reserves cannot cover the requested payout.
    #[error("insufficient reserve: {0}")]
    InsufficientReserve(&'static str),

    /// A configuration value is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;
