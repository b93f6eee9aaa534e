//! The three-axis curve state `{x, y, z}`.

use core::fmt;

use primitive_types::U512;

use super::{BorrowDelta, LendDelta};
use crate::error::{AmmError, Result};
use crate::math::CheckedArithmetic;

/// Largest value any curve axis may hold (`2^112 − 1`).
///
/// Keeping each axis below 112 bits bounds every invariant product
/// (`x · (y << 16) · (z << 16)`) well inside 512 bits.
pub const MAX_CURVE_VALUE: u128 = (1u128 << 112) - 1;

/// The pricing state of one pool instance.
///
/// - `x`: asset-reserve axis
/// - `y`: interest-rate axis (per-second interest scaled by `2^32`)
/// - `z`: collateral axis (per-second collateral scaled by `2^25`)
///
/// All three axes are strictly positive and at most [`MAX_CURVE_VALUE`].
/// The product `x · y · z` is the pool's pricing invariant.
///
/// # Examples
///
/// ```
/// use tenor_amm::domain::CurveState;
///
/// let state = CurveState::new(10_000, 12_000, 1_000).expect("valid state");
/// assert_eq!(state.x(), 10_000);
/// assert!(CurveState::new(0, 1, 1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveState {
    x: u128,
    y: u128,
    z: u128,
}

impl CurveState {
    /// Creates a validated curve state.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidInput`] if any axis is zero.
    /// - [`AmmError::Overflow`] if any axis exceeds [`MAX_CURVE_VALUE`].
    pub const fn new(x: u128, y: u128, z: u128) -> Result<Self> {
        if x == 0 || y == 0 || z == 0 {
            return Err(AmmError::InvalidInput("curve axes must be positive"));
        }
        if x > MAX_CURVE_VALUE || y > MAX_CURVE_VALUE || z > MAX_CURVE_VALUE {
            return Err(AmmError::Overflow("curve axis exceeds 112 bits"));
        }
        Ok(Self { x, y, z })
    }

    /// Asset-reserve axis.
    #[must_use]
    pub const fn x(&self) -> u128 {
        self.x
    }

    /// Interest-rate axis.
    #[must_use]
    pub const fn y(&self) -> u128 {
        self.y
    }

    /// Collateral axis.
    #[must_use]
    pub const fn z(&self) -> u128 {
        self.z
    }

    /// The raw invariant `x · y · z`.
    #[must_use]
    pub fn invariant(&self) -> U512 {
        U512::from(self.x) * U512::from(self.y) * U512::from(self.z)
    }

    /// State after a borrow: `x` shrinks, `y` and `z` grow.
    ///
    /// # Errors
    ///
    /// Propagates underflow/overflow and the axis bounds of [`CurveState::new`].
    pub fn after_borrow(&self, delta: &BorrowDelta) -> Result<Self> {
        Self::new(
            self.x.safe_sub(delta.x_decrease(), "x after borrow")?,
            self.y.safe_add(delta.y_increase(), "y after borrow")?,
            self.z.safe_add(delta.z_increase(), "z after borrow")?,
        )
    }

    /// State after a lend: `x` grows, `y` and `z` shrink.
    ///
    /// # Errors
    ///
    /// Propagates underflow/overflow and the axis bounds of [`CurveState::new`].
    pub fn after_lend(&self, delta: &LendDelta) -> Result<Self> {
        Self::new(
            self.x.safe_add(delta.x_increase(), "x after lend")?,
            self.y.safe_sub(delta.y_decrease(), "y after lend")?,
            self.z.safe_sub(delta.z_decrease(), "z after lend")?,
        )
    }

    /// State after a proportional liquidity add on all three axes.
    ///
    /// # Errors
    ///
    /// Propagates overflow and the axis bounds of [`CurveState::new`].
    pub fn after_mint(&self, x_increase: u128, y_increase: u128, z_increase: u128) -> Result<Self> {
        Self::new(
            self.x.safe_add(x_increase, "x after mint")?,
            self.y.safe_add(y_increase, "y after mint")?,
            self.z.safe_add(z_increase, "z after mint")?,
        )
    }
}

impl fmt::Display for CurveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurveState(x={}, y={}, z={})", self.x, self.y, self.z)
    }
}
