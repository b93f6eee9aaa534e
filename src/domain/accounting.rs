//! Aggregate pool bookkeeping.

use core::fmt;

use super::{Claims, Due};
use crate::error::Result;
use crate::math::CheckedArithmetic;

/// Fees retained in the asset reserve, by recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeesStored {
    /// Liquidity-provider share, paid out on burn.
    pub lp_fee: u128,
    /// Protocol share.
    pub protocol_fee: u128,
    /// Staking share (absorbs the split's rounding remainder).
    pub staking_fee: u128,
}

impl FeesStored {
    /// Sum of the three stores.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`](crate::error::AmmError::Overflow) on overflow.
    pub fn total(&self) -> Result<u128> {
        self.lp_fee
            .safe_add(self.protocol_fee, "fees stored overflow")?
            .safe_add(self.staking_fee, "fees stored overflow")
    }

    /// Asset locked for non-LP recipients (`protocol + staking`).
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`](crate::error::AmmError::Overflow) on overflow.
    pub fn reserved(&self) -> Result<u128> {
        self.protocol_fee
            .safe_add(self.staking_fee, "reserved fees overflow")
    }
}

/// Bookkeeping updated atomically with every curve mutation.
///
/// `total_claims` must stay redeemable from the reserves plus the
/// collateral backing outstanding debt; the pool only commits a change to
/// this record together with the matching curve and reserve change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolAccounting {
    /// Outstanding liquidity-provider shares (`asset << 16` at creation).
    pub total_liquidity: u128,
    /// Sum of every lender claim issued and not yet withdrawn.
    pub total_claims: Claims,
    /// Sum of every debt ever created, including the founding mint.
    pub total_debt_created: u128,
    /// Sum of every recorded due not yet repaid or released.
    pub total_dues: Due,
    /// Fees retained in the asset reserve.
    pub fees_stored: FeesStored,
}

impl fmt::Display for PoolAccounting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PoolAccounting(liquidity={}, claims={}, debt_created={}, dues={})",
            self.total_liquidity, self.total_claims, self.total_debt_created, self.total_dues
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_totals() {
        let fees = FeesStored {
            lp_fee: 5,
            protocol_fee: 3,
            staking_fee: 2,
        };
        assert_eq!(fees.total(), Ok(10));
        assert_eq!(fees.reserved(), Ok(5));
    }

    #[test]
    fn fee_total_overflow() {
        let fees = FeesStored {
            lp_fee: u128::MAX,
            protocol_fee: 0,
            staking_fee: 1,
        };
        assert!(fees.total().is_err());
    }

    #[test]
    fn default_is_empty() {
        let acc = PoolAccounting::default();
        assert!(acc.total_claims.is_empty());
        assert_eq!(acc.fees_stored.total(), Ok(0));
    }
}
