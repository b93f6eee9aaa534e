//! Position along the curve for percent-given pricing.

use core::fmt;

use crate::error::{AmmError, Result};

/// A position along the curve in `[0, 2^32]`.
///
/// `0` leans fully on the interest-rate axis minimum (lowest rate, most
/// collateral/coverage movement), `2^32` leans fully on the collateral
/// axis minimum, and `2^31` is the curve's natural midpoint.
///
/// # Examples
///
/// ```
/// use tenor_amm::domain::{CurveBranch, Percent};
///
/// let p = Percent::new(1 << 31).expect("in range");
/// assert_eq!(p.branch(), CurveBranch::YBranch { weight: 1 << 31 });
/// assert!(Percent::new((1 << 32) + 1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Percent(u64);

impl Percent {
    /// The y-branch extreme.
    pub const ZERO: Self = Self(0);

    /// The branch boundary (`2^31`).
    pub const HALF: Self = Self(1 << 31);

    /// The z-branch extreme (`2^32`).
    pub const FULL: Self = Self(1 << 32);

    /// Creates a percent.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] if `value > 2^32`.
    pub const fn new(value: u64) -> Result<Self> {
        if value > Self::FULL.0 {
            return Err(AmmError::InvalidInput("percent must be at most 2^32"));
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Selects the branch to interpolate on.
    ///
    /// `percent <= 2^31` interpolates on the y-branch with weight
    /// `percent`; larger values interpolate on the z-branch with weight
    /// `2^32 − percent`.  Both weights lie in `[0, 2^31]`.
    #[must_use]
    pub const fn branch(&self) -> CurveBranch {
        if self.0 <= Self::HALF.0 {
            CurveBranch::YBranch { weight: self.0 }
        } else {
            CurveBranch::ZBranch {
                weight: Self::FULL.0 - self.0,
            }
        }
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Percent({}/2^32)", self.0)
    }
}

/// Which axis the percent-given interpolation solves directly.
///
/// The weight runs from `0` (that axis' minimum move) to `2^31` (the
/// curve midpoint).  The other axis is back-solved from the invariant.
/// At weight `2^31` both variants describe the same midpoint up to one
/// unit of rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveBranch {
    /// Interpolate the interest-rate axis; back-solve the collateral axis.
    YBranch {
        /// Interpolation weight in `[0, 2^31]`.
        weight: u64,
    },
    /// Interpolate the collateral axis; back-solve the interest-rate axis.
    ZBranch {
        /// Interpolation weight in `[0, 2^31]`.
        weight: u64,
    },
}

impl CurveBranch {
    /// The largest weight, which selects the curve midpoint.
    pub const MIDPOINT_WEIGHT: u64 = 1 << 31;

    /// Returns the interpolation weight.
    #[must_use]
    pub const fn weight(&self) -> u64 {
        match self {
            Self::YBranch { weight } | Self::ZBranch { weight } => *weight,
        }
    }

    /// Fails if the weight exceeds [`CurveBranch::MIDPOINT_WEIGHT`].
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidInput`] for an out-of-range weight.
    pub const fn validate(&self) -> Result<()> {
        if self.weight() > Self::MIDPOINT_WEIGHT {
            return Err(AmmError::InvalidInput("branch weight must be at most 2^31"));
        }
        Ok(())
    }
}
