//! Outcomes of liquidity and settlement operations.

use core::fmt;

use super::{Due, DueId};

/// Result of adding liquidity before maturity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MintOutcome {
    /// Liquidity shares issued.
    pub liquidity_out: u128,
    /// Id under which the pool recorded `due`.
    pub due_id: DueId,
    /// Debt and collateral the provider owes for the curve growth.
    pub due: Due,
}

/// Tokens paid to a lender settling claims at maturity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WithdrawOutcome {
    /// Asset paid against the loan claim.
    pub asset_out: u128,
    /// Collateral paid against the coverage claim.
    pub collateral_out: u128,
}

/// Tokens paid to a liquidity provider burning shares at maturity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BurnOutcome {
    /// Share of the asset surplus, LP fees included.
    pub asset_out: u128,
    /// Share of the collateral surplus.
    pub collateral_out: u128,
    /// Portion of `asset_out` drawn from the LP fee store.
    pub fee_out: u128,
}

impl fmt::Display for WithdrawOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Withdraw(asset={}, collateral={})",
            self.asset_out, self.collateral_out
        )
    }
}

impl fmt::Display for BurnOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Burn(asset={}, collateral={}, fee={})",
            self.asset_out, self.collateral_out, self.fee_out
        )
    }
}
