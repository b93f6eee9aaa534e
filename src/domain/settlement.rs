//! Frozen settlement basis of a matured pool.
//!
//! Every withdraw and burn after maturity is priced against the same
//! [`Settlement`], captured on the first successful one.  Payouts are
//! therefore independent of the order in which lenders and liquidity
//! providers settle, and their floors never sum past the captured totals.

use core::fmt;

use super::{BurnOutcome, Claims, PoolAccounting, PoolReserves, Rounding};
use crate::error::Result;
use crate::math::{mul_div, narrow, wide, CheckedArithmetic};

/// Pool totals at the moment settlement began.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settlement {
    /// Asset reserve less the protocol and staking fee stores (`A`).
    pub available_asset: u128,
    /// Lender claims outstanding (`TP`, `TI`, `TC`).
    pub total_claims: Claims,
    /// Collateral owed to coverage for the asset deficit.
    pub coverage_payable: u128,
    /// Collateral reserve.
    pub collateral_reserve: u128,
    /// Liquidity shares outstanding.
    pub total_liquidity: u128,
    /// LP fee store.
    pub lp_fee: u128,
}

impl Settlement {
    /// Captures the basis from the live pool records.
    ///
    /// `coverage_payable = min(collateralReserve, floor(TC · D / TL))` with
    /// deficit `D = max(0, TL − A)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Underflow`](crate::error::AmmError::Underflow) if the
    ///   asset reserve no longer covers the protocol and staking fees.
    /// - [`AmmError::Overflow`](crate::error::AmmError::Overflow) from the
    ///   claim totals.
    pub fn capture(reserves: &PoolReserves, accounting: &PoolAccounting) -> Result<Self> {
        let available_asset = reserves.asset.safe_sub(
            accounting.fees_stored.reserved()?,
            "fees exceed asset reserve",
        )?;
        let totals = accounting.total_claims;
        let total_loan = totals.loan()?;
        let coverage_payable = if total_loan == 0 || available_asset >= total_loan {
            0
        } else {
            share(totals.coverage()?, total_loan - available_asset, total_loan)?
                .min(reserves.collateral)
        };
        Ok(Self {
            available_asset,
            total_claims: totals,
            coverage_payable,
            collateral_reserve: reserves.collateral,
            total_liquidity: accounting.total_liquidity,
            lp_fee: accounting.fees_stored.lp_fee,
        })
    }

    /// Asset paid against a loan claim.
    ///
    /// Principal is served before interest:
    ///
    /// | Condition | `(lp, li)` receives |
    /// |-----------|---------------------|
    /// | `A ≥ TL` | `lp + li` |
    /// | `TP ≤ A < TL` | `lp + floor((A − TP) · li / TI)` |
    /// | `A < TP` | `floor(A · lp / TP)` |
    ///
    /// # Errors
    ///
    /// Propagates overflow from the claim totals.
    pub fn loan_payout(&self, claims: &Claims) -> Result<u128> {
        let totals = &self.total_claims;
        let available = self.available_asset;
        if available >= totals.loan()? {
            claims.loan()
        } else if available >= totals.loan_principal {
            let interest = share(
                available - totals.loan_principal,
                claims.loan_interest,
                totals.loan_interest,
            )?;
            claims
                .loan_principal
                .safe_add(interest, "loan payout overflow")
        } else {
            share(available, claims.loan_principal, totals.loan_principal)
        }
    }

    /// Collateral paid against a coverage claim, pro rata by coverage.
    ///
    /// # Errors
    ///
    /// Propagates overflow from the claim totals.
    pub fn coverage_payout(&self, claims: &Claims) -> Result<u128> {
        let total_coverage = self.total_claims.coverage()?;
        if total_coverage == 0 {
            return Ok(0);
        }
        share(self.coverage_payable, claims.coverage()?, total_coverage)
    }

    /// Tokens paid for burning `liquidity_in` shares.
    ///
    /// Liquidity providers split `max(0, A − TL)` asset and
    /// `collateralReserve − payable` collateral; the fee portion is capped
    /// by the asset paid.
    ///
    /// # Errors
    ///
    /// Propagates overflow from the claim totals.
    pub fn burn_payout(&self, liquidity_in: u128) -> Result<BurnOutcome> {
        let asset_surplus = self
            .available_asset
            .saturating_sub(self.total_claims.loan()?);
        let collateral_surplus = self
            .collateral_reserve
            .safe_sub(self.coverage_payable, "collateral surplus underflow")?;
        let asset_out = share(asset_surplus, liquidity_in, self.total_liquidity)?;
        Ok(BurnOutcome {
            asset_out,
            collateral_out: share(collateral_surplus, liquidity_in, self.total_liquidity)?,
            fee_out: share(self.lp_fee, liquidity_in, self.total_liquidity)?.min(asset_out),
        })
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settlement(available={}, claims={}, payable={})",
            self.available_asset, self.total_claims, self.coverage_payable
        )
    }
}

/// `floor(amount · part / whole)`.
fn share(amount: u128, part: u128, whole: u128) -> Result<u128> {
    narrow(
        mul_div(wide(amount), wide(part), wide(whole), Rounding::Down)?,
        "pro-rata share overflow",
    )
}
