//! Generic construction trait for pool instantiation from configuration.
//!
//! [`FromConfig`] provides a uniform interface for creating pool instances
//! from their configuration structs.
//!
//! # Validation Contract
//!
//! Implementations **must** validate all configuration invariants during
//! construction.  A successfully constructed pool is guaranteed to be in
//! a valid initial state:
//!
//! - The founding deposit is non-zero and the founding debt carries
//!   positive interest
//! - The pool is created strictly before its maturity
//! - The derived curve axes are non-zero and inside the curve bounds
//!
//! # No Generic Blanket Implementation
//!
//! There is no `impl<T> FromConfig<T>` blanket; each pool must
//! explicitly implement the trait for its specific config type.

use crate::error::AmmError;

/// Generic construction trait for building a pool from a configuration.
///
/// # Type Parameters
///
/// - `C`: the configuration type that fully describes the pool's
///   immutable parameters (maturity, fee rates, founding liquidity).
///
/// # Implementors
///
/// - `impl FromConfig<PoolConfig> for FixedTermPool`
pub trait FromConfig<C> {
    /// Creates a new pool instance from the given configuration.
    ///
    /// The configuration is taken by reference because it may be reused
    /// (e.g., to open the same terms at another maturity).
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if any pool parameter is
    ///   out of range or inconsistent.
    /// - [`AmmError::Overflow`] if a derived curve axis exceeds its bound.
    fn from_config(config: &C) -> Result<Self, AmmError>
    where
        Self: Sized;
}
