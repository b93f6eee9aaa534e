//! Borrow operation specification.

use core::fmt;

use super::Percent;
use crate::error::{AmmError, Result};

/// What the borrower fixes when pricing a borrow.
///
/// Every variant carries the asset withdrawn plus slippage caps on the
/// quantities the pool solves for.
///
/// # Invariants
///
/// `asset_out` is always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BorrowSpec {
    /// The borrower names the total debt; the pool solves collateral.
    GivenDebt {
        /// Asset withdrawn.
        asset_out: u128,
        /// Desired debt (principal + interest).
        debt_in: u128,
        /// Largest acceptable collateral lock.
        max_collateral: u128,
    },
    /// The borrower names the collateral lock; the pool solves debt.
    GivenCollateral {
        /// Asset withdrawn.
        asset_out: u128,
        /// Desired collateral lock.
        collateral_in: u128,
        /// Largest acceptable debt.
        max_debt: u128,
    },
    /// The borrower names a position along the curve.
    GivenPercent {
        /// Asset withdrawn.
        asset_out: u128,
        /// Curve position.
        percent: Percent,
        /// Largest acceptable debt.
        max_debt: u128,
        /// Largest acceptable collateral lock.
        max_collateral: u128,
    },
}

impl BorrowSpec {
    /// Creates a debt-given specification.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if `asset_out` is zero.
    pub const fn given_debt(asset_out: u128, debt_in: u128, max_collateral: u128) -> Result<Self> {
        if asset_out == 0 {
            return Err(AmmError::InvalidInput("borrow amount must be non-zero"));
        }
        Ok(Self::GivenDebt {
            asset_out,
            debt_in,
            max_collateral,
        })
    }

    /// Creates a collateral-given specification.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if `asset_out` is zero.
    pub const fn given_collateral(
        asset_out: u128,
        collateral_in: u128,
        max_debt: u128,
    ) -> Result<Self> {
        if asset_out == 0 {
            return Err(AmmError::InvalidInput("borrow amount must be non-zero"));
        }
        Ok(Self::GivenCollateral {
            asset_out,
            collateral_in,
            max_debt,
        })
    }

    /// Creates a percent-given specification.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if `asset_out` is zero.
    pub const fn given_percent(
        asset_out: u128,
        percent: Percent,
        max_debt: u128,
        max_collateral: u128,
    ) -> Result<Self> {
        if asset_out == 0 {
            return Err(AmmError::InvalidInput("borrow amount must be non-zero"));
        }
        Ok(Self::GivenPercent {
            asset_out,
            percent,
            max_debt,
            max_collateral,
        })
    }

    /// The asset withdrawn, regardless of variant.
    #[must_use]
    pub const fn asset_out(&self) -> u128 {
        match self {
            Self::GivenDebt { asset_out, .. }
            | Self::GivenCollateral { asset_out, .. }
            | Self::GivenPercent { asset_out, .. } => *asset_out,
        }
    }
}

impl fmt::Display for BorrowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GivenDebt {
                asset_out, debt_in, ..
            } => write!(f, "BorrowGivenDebt(out={asset_out}, debt={debt_in})"),
            Self::GivenCollateral {
                asset_out,
                collateral_in,
                ..
            } => write!(
                f,
                "BorrowGivenCollateral(out={asset_out}, collateral={collateral_in})"
            ),
            Self::GivenPercent {
                asset_out, percent, ..
            } => write!(f, "BorrowGivenPercent(out={asset_out}, {percent})"),
        }
    }
}
