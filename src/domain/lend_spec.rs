//! Lend operation specification.

use core::fmt;

use super::Percent;
use crate::error::{AmmError, Result};

/// What the lender fixes when pricing a lend.
///
/// Every variant carries the asset deposited plus slippage bounds on the
/// quantities the pool solves for.
///
/// # Invariants
///
/// `asset_in` is always non-zero.
///
/// # Examples
///
/// ```
/// use tenor_amm::domain::LendSpec;
///
/// let spec = LendSpec::given_loan(1_000, 1_010, 50);
/// assert!(spec.is_ok());
/// assert!(LendSpec::given_loan(0, 1_010, 50).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LendSpec {
    /// The lender names the total loan claim; the pool solves coverage.
    GivenLoan {
        /// Asset deposited.
        asset_in: u128,
        /// Desired loan claim (principal + interest).
        loan_out: u128,
        /// Smallest acceptable coverage claim.
        min_coverage: u128,
    },
    /// The lender names the total coverage claim; the pool solves the loan.
    GivenCoverage {
        /// Asset deposited.
        asset_in: u128,
        /// Desired coverage claim (principal + interest).
        coverage_out: u128,
        /// Smallest acceptable loan claim.
        min_loan: u128,
    },
    /// The lender names a position along the curve.
    GivenPercent {
        /// Asset deposited.
        asset_in: u128,
        /// Curve position.
        percent: Percent,
        /// Smallest acceptable loan claim.
        min_loan: u128,
        /// Smallest acceptable coverage claim.
        min_coverage: u128,
    },
}

impl LendSpec {
    /// Creates a loan-given specification.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if `asset_in` is zero.
    pub const fn given_loan(asset_in: u128, loan_out: u128, min_coverage: u128) -> Result<Self> {
        if asset_in == 0 {
            return Err(AmmError::InvalidInput("lend amount must be non-zero"));
        }
        Ok(Self::GivenLoan {
            asset_in,
            loan_out,
            min_coverage,
        })
    }

    /// Creates a coverage-given specification.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if `asset_in` is zero.
    pub const fn given_coverage(asset_in: u128, coverage_out: u128, min_loan: u128) -> Result<Self> {
        if asset_in == 0 {
            return Err(AmmError::InvalidInput("lend amount must be non-zero"));
        }
        Ok(Self::GivenCoverage {
            asset_in,
            coverage_out,
            min_loan,
        })
    }

    /// Creates a percent-given specification.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if `asset_in` is zero.
    pub const fn given_percent(
        asset_in: u128,
        percent: Percent,
        min_loan: u128,
        min_coverage: u128,
    ) -> Result<Self> {
        if asset_in == 0 {
            return Err(AmmError::InvalidInput("lend amount must be non-zero"));
        }
        Ok(Self::GivenPercent {
            asset_in,
            percent,
            min_loan,
            min_coverage,
        })
    }

    /// The asset deposited, regardless of variant.
    #[must_use]
    pub const fn asset_in(&self) -> u128 {
        match self {
            Self::GivenLoan { asset_in, .. }
            | Self::GivenCoverage { asset_in, .. }
            | Self::GivenPercent { asset_in, .. } => *asset_in,
        }
    }
}

impl fmt::Display for LendSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GivenLoan {
                asset_in, loan_out, ..
            } => write!(f, "LendGivenLoan(in={asset_in}, loan={loan_out})"),
            Self::GivenCoverage {
                asset_in,
                coverage_out,
                ..
            } => write!(f, "LendGivenCoverage(in={asset_in}, coverage={coverage_out})"),
            Self::GivenPercent {
                asset_in, percent, ..
            } => write!(f, "LendGivenPercent(in={asset_in}, {percent})"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn zero_asset_rejected_in_every_mode() {
        assert!(LendSpec::given_loan(0, 1, 0).is_err());
        assert!(LendSpec::given_coverage(0, 1, 0).is_err());
        assert!(LendSpec::given_percent(0, Percent::HALF, 0, 0).is_err());
    }

    #[test]
    fn asset_in_accessor() {
        let Ok(spec) = LendSpec::given_coverage(77, 10, 0) else {
            panic!("expected Ok");
        };
        assert_eq!(spec.asset_in(), 77);
    }

    #[test]
    fn display() {
        let Ok(spec) = LendSpec::given_loan(1_000, 1_010, 50) else {
            panic!("expected Ok");
        };
        assert_eq!(spec.to_string(), "LendGivenLoan(in=1000, loan=1010)");
    }
}
