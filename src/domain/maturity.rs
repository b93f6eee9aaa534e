//! Pool expiry instant.

use core::fmt;

use crate::error::{AmmError, Result};

/// The immutable expiry timestamp (seconds) of one pool instance.
///
/// Before maturity the pool prices lends and borrows; at or after
/// maturity it is frozen and only settles claims.
///
/// # Examples
///
/// ```
/// use tenor_amm::domain::Maturity;
///
/// let maturity = Maturity::new(1_000);
/// assert_eq!(maturity.time_to_maturity(400), Ok(600));
/// assert!(maturity.time_to_maturity(1_000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Maturity(u64);

impl Maturity {
    /// Creates a maturity at the given timestamp.
    #[must_use]
    pub const fn new(timestamp: u64) -> Self {
        Self(timestamp)
    }

    /// Returns the timestamp.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns `true` once `now` has reached maturity.
    #[must_use]
    pub const fn is_matured(&self, now: u64) -> bool {
        now >= self.0
    }

    /// Seconds remaining until maturity (`Δt`).
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::MaturityReached`] if `now >= maturity`; a
    /// pre-maturity operation therefore always sees `Δt > 0`.
    pub const fn time_to_maturity(&self, now: u64) -> Result<u64> {
        if now >= self.0 {
            return Err(AmmError::MaturityReached);
        }
        Ok(self.0 - now)
    }

    /// Fails unless the pool has matured.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::MaturityNotReached`] if `now < maturity`.
    pub const fn ensure_matured(&self, now: u64) -> Result<()> {
        if now < self.0 {
            return Err(AmmError::MaturityNotReached);
        }
        Ok(())
    }
}

impl fmt::Display for Maturity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Maturity({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_to_maturity_before() {
        assert_eq!(Maturity::new(100).time_to_maturity(99), Ok(1));
        assert_eq!(Maturity::new(100).time_to_maturity(0), Ok(100));
    }

    #[test]
    fn time_to_maturity_at_and_after() {
        assert_eq!(
            Maturity::new(100).time_to_maturity(100),
            Err(AmmError::MaturityReached)
        );
        assert_eq!(
            Maturity::new(100).time_to_maturity(101),
            Err(AmmError::MaturityReached)
        );
    }

    #[test]
    fn ensure_matured() {
        assert_eq!(
            Maturity::new(100).ensure_matured(99),
            Err(AmmError::MaturityNotReached)
        );
        assert_eq!(Maturity::new(100).ensure_matured(100), Ok(()));
        assert!(Maturity::new(100).is_matured(150));
    }
}
