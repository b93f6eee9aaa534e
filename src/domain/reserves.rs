//! Token balances backing the curve.

use core::fmt;

/// The asset and collateral token balances held by one pool instance.
///
/// Both balances are non-negative by construction (`u128`).  The asset
/// reserve grows on lend, mint and pay and shrinks on borrow, withdraw
/// and burn; the collateral reserve grows on borrow and mint and shrinks
/// on pay, withdraw and burn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolReserves {
    /// Asset token balance.
    pub asset: u128,
    /// Collateral token balance.
    pub collateral: u128,
}

impl PoolReserves {
    /// Creates a reserves record.
    #[must_use]
    pub const fn new(asset: u128, collateral: u128) -> Self {
        Self { asset, collateral }
    }
}

impl fmt::Display for PoolReserves {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PoolReserves(asset={}, collateral={})",
            self.asset, self.collateral
        )
    }
}
