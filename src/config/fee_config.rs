//! Fee parameters shared by every pricing call.

use core::fmt;

/// Per-second fee rates, each scaled by `BASE = 2^40`.
///
/// A rate of `r` charges `Δt · r / 2^40` of the traded amount for a
/// position held `Δt` seconds to maturity.  The configuration is passed
/// explicitly into every pricing function; the engine holds no global fee
/// state.
///
/// # Derived Values
///
/// - [`total`](Self::total): `fee + protocol_fee + staking_fee`, used to
///   price `xIncrease`/`xDecrease`.
/// - [`stored`](Self::stored): `fee + protocol_fee`, used to size the fee
///   store increase.
///
/// # Examples
///
/// ```
/// use tenor_amm::config::FeeConfig;
///
/// let fees = FeeConfig::new(3, 2, 1);
/// assert_eq!(fees.total(), 6);
/// assert_eq!(fees.stored(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeConfig {
    fee: u64,
    protocol_fee: u64,
    staking_fee: u64,
}

impl FeeConfig {
    /// A configuration that charges nothing.
    pub const ZERO: Self = Self::new(0, 0, 0);

    /// Creates a fee configuration.
    #[must_use]
    pub const fn new(fee: u64, protocol_fee: u64, staking_fee: u64) -> Self {
        Self {
            fee,
            protocol_fee,
            staking_fee,
        }
    }

    /// Liquidity-provider fee rate.
    #[must_use]
    pub const fn fee(&self) -> u64 {
        self.fee
    }

    /// Protocol fee rate.
    #[must_use]
    pub const fn protocol_fee(&self) -> u64 {
        self.protocol_fee
    }

    /// Staking fee rate.
    #[must_use]
    pub const fn staking_fee(&self) -> u64 {
        self.staking_fee
    }

    /// Sum of all three rates.  Widened to `u128` so it never overflows.
    #[must_use]
    pub const fn total(&self) -> u128 {
        self.fee as u128 + self.protocol_fee as u128 + self.staking_fee as u128
    }

    /// `fee + protocol_fee`.
    #[must_use]
    pub const fn stored(&self) -> u128 {
        self.fee as u128 + self.protocol_fee as u128
    }
}

impl fmt::Display for FeeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FeeConfig(fee={}, protocol={}, staking={})",
            self.fee, self.protocol_fee, self.staking_fee
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_rates() {
        let fees = FeeConfig::new(1, 1, 1);
        assert_eq!(fees.total(), 3);
        assert_eq!(fees.stored(), 2);
    }

    #[test]
    fn totals_do_not_overflow() {
        let fees = FeeConfig::new(u64::MAX, u64::MAX, u64::MAX);
        assert_eq!(fees.total(), 3 * u128::from(u64::MAX));
    }

    #[test]
    fn zero() {
        assert_eq!(FeeConfig::ZERO.total(), 0);
        assert_eq!(FeeConfig::default(), FeeConfig::ZERO);
    }

    #[test]
    fn display() {
        assert_eq!(
            FeeConfig::new(3, 2, 1).to_string(),
            "FeeConfig(fee=3, protocol=2, staking=1)"
        );
    }
}
