//! Configuration for one fixed-maturity pool instance.

use super::FeeConfig;
use crate::domain::Maturity;
use crate::error::AmmError;

/// Configuration for a fixed-term lending pool.
///
/// Defines the immutable parameters of one maturity and the founding
/// liquidity that seeds its curve.
///
/// # Derived Values
///
/// With `Δt = maturity − created_at`:
///
/// - `x = initial_asset`
/// - `y = ((initial_debt − initial_asset) << 32) / Δt`
/// - `z = (initial_collateral << 25) / Δt`
///
/// # Validation
///
/// - `initial_asset` and `initial_collateral` must be non-zero.
/// - `initial_debt` must exceed `initial_asset` (positive interest).
/// - `created_at` must be strictly before `maturity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolConfig {
    maturity: Maturity,
    fees: FeeConfig,
    created_at: u64,
    initial_asset: u128,
    initial_debt: u128,
    initial_collateral: u128,
}

impl PoolConfig {
    /// Creates a new `PoolConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if any rule in the
    /// type-level docs is violated.
    pub fn new(
        maturity: Maturity,
        fees: FeeConfig,
        created_at: u64,
        initial_asset: u128,
        initial_debt: u128,
        initial_collateral: u128,
    ) -> Result<Self, AmmError> {
        let config = Self {
            maturity,
            fees,
            created_at,
            initial_asset,
            initial_debt,
            initial_collateral,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] describing the first
    /// violated rule.
    pub const fn validate(&self) -> Result<(), AmmError> {
        if self.initial_asset == 0 {
            return Err(AmmError::InvalidConfiguration(
                "initial asset must be non-zero",
            ));
        }
        if self.initial_debt <= self.initial_asset {
            return Err(AmmError::InvalidConfiguration(
                "initial debt must exceed initial asset",
            ));
        }
        if self.initial_collateral == 0 {
            return Err(AmmError::InvalidConfiguration(
                "initial collateral must be non-zero",
            ));
        }
        if self.created_at >= self.maturity.get() {
            return Err(AmmError::InvalidConfiguration(
                "pool must be created before maturity",
            ));
        }
        Ok(())
    }

    /// Returns the maturity.
    #[must_use]
    pub const fn maturity(&self) -> Maturity {
        self.maturity
    }

    /// Returns the fee rates.
    #[must_use]
    pub const fn fees(&self) -> FeeConfig {
        self.fees
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Returns the founding asset deposit.
    #[must_use]
    pub const fn initial_asset(&self) -> u128 {
        self.initial_asset
    }

    /// Returns the founding debt.
    #[must_use]
    pub const fn initial_debt(&self) -> u128 {
        self.initial_debt
    }

    /// Returns the founding collateral lock.
    #[must_use]
    pub const fn initial_collateral(&self) -> u128 {
        self.initial_collateral
    }
}
