//! Explicit rounding direction for arithmetic operations.

/// Specifies the rounding direction for division operations.
///
/// All division in the pricing engine takes an explicit `Rounding` so
/// that every site states which side absorbs the truncation.
///
/// # Examples
///
/// ```
/// use tenor_amm::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert_eq!(Rounding::Up.reversed(), Rounding::Down);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }

    /// Returns the opposite direction.
    ///
    /// Borrow quantities (what the user owes) round up; their lend mirrors
    /// (what the user receives) round down.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}
