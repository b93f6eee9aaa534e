//! Proposed curve changes for one operation.
//!
//! A delta is always computed before commit and discarded if the
//! invariant check fails; nothing is ever partially applied.

use core::fmt;

/// Curve change produced by a borrow: `x` shrinks, `y` and `z` grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BorrowDelta {
    x_decrease: u128,
    y_increase: u128,
    z_increase: u128,
}

impl BorrowDelta {
    /// Creates a borrow delta.
    #[must_use]
    pub const fn new(x_decrease: u128, y_increase: u128, z_increase: u128) -> Self {
        Self {
            x_decrease,
            y_increase,
            z_increase,
        }
    }

    /// Decrease of the asset axis (asset out plus time-priced fees).
    #[must_use]
    pub const fn x_decrease(&self) -> u128 {
        self.x_decrease
    }

    /// Increase of the interest-rate axis.
    #[must_use]
    pub const fn y_increase(&self) -> u128 {
        self.y_increase
    }

    /// Increase of the collateral axis.
    #[must_use]
    pub const fn z_increase(&self) -> u128 {
        self.z_increase
    }
}

impl fmt::Display for BorrowDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BorrowDelta(-x={}, +y={}, +z={})",
            self.x_decrease, self.y_increase, self.z_increase
        )
    }
}

/// Curve change produced by a lend: `x` grows, `y` and `z` shrink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LendDelta {
    x_increase: u128,
    y_decrease: u128,
    z_decrease: u128,
}

impl LendDelta {
    /// Creates a lend delta.
    #[must_use]
    pub const fn new(x_increase: u128, y_decrease: u128, z_decrease: u128) -> Self {
        Self {
            x_increase,
            y_decrease,
            z_decrease,
        }
    }

    /// Increase of the asset axis (asset in net of time-priced fees).
    #[must_use]
    pub const fn x_increase(&self) -> u128 {
        self.x_increase
    }

    /// Decrease of the interest-rate axis.
    #[must_use]
    pub const fn y_decrease(&self) -> u128 {
        self.y_decrease
    }

    /// Decrease of the collateral axis.
    #[must_use]
    pub const fn z_decrease(&self) -> u128 {
        self.z_decrease
    }
}

impl fmt::Display for LendDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LendDelta(+x={}, -y={}, -z={})",
            self.x_increase, self.y_decrease, self.z_decrease
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borrow_accessors_and_display() {
        let d = BorrowDelta::new(1, 2, 3);
        assert_eq!((d.x_decrease(), d.y_increase(), d.z_increase()), (1, 2, 3));
        assert_eq!(d.to_string(), "BorrowDelta(-x=1, +y=2, +z=3)");
    }

    #[test]
    fn lend_accessors_and_display() {
        let d = LendDelta::new(4, 5, 6);
        assert_eq!((d.x_increase(), d.y_decrease(), d.z_decrease()), (4, 5, 6));
        assert_eq!(d.to_string(), "LendDelta(+x=4, -y=5, -z=6)");
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(LendDelta::default(), LendDelta::new(0, 0, 0));
        assert_eq!(BorrowDelta::default(), BorrowDelta::new(0, 0, 0));
    }
}
