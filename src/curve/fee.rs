//! Fee accrual.
//!
//! A trade of `amount` held `Δt` seconds stores
//!
//! ```text
//! total    = ceil(amount · (Δt · (fee + protocolFee) + 2^40) / 2^40) − amount
//! lp       = floor(total · fee / (fee + protocolFee))
//! protocol = floor(total · protocolFee / (fee + protocolFee))
//! staking  = total − lp − protocol
//! ```
//!
//! The staking component takes the truncation remainder, so the three
//! components always sum to `total` exactly.

use core::fmt;

use primitive_types::U256;

use super::constants::BASE_SHIFT;
use crate::config::FeeConfig;
use crate::domain::{FeesStored, Rounding};
use crate::error::Result;
use crate::math::{add, mul, mul_div, mul_div_up, narrow, wide, CheckedArithmetic};

/// Fee stored by one operation, by recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeSplit {
    /// Total stored fee increase.
    pub total: u128,
    /// Liquidity-provider share.
    pub lp_fee: u128,
    /// Protocol share.
    pub protocol_fee: u128,
    /// Staking share (the rounding remainder).
    pub staking_fee: u128,
}

impl FeeSplit {
    /// Adds this split onto a fee store.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`](crate::error::AmmError::Overflow) if any store overflows.
    pub fn apply_to(&self, stored: &FeesStored) -> Result<FeesStored> {
        Ok(FeesStored {
            lp_fee: stored.lp_fee.safe_add(self.lp_fee, "lp fee store overflow")?,
            protocol_fee: stored
                .protocol_fee
                .safe_add(self.protocol_fee, "protocol fee store overflow")?,
            staking_fee: stored
                .staking_fee
                .safe_add(self.staking_fee, "staking fee store overflow")?,
        })
    }
}

impl fmt::Display for FeeSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FeeSplit(total={}, lp={}, protocol={}, staking={})",
            self.total, self.lp_fee, self.protocol_fee, self.staking_fee
        )
    }
}

/// `Δt · rate + 2^40`, the time-priced multiplier over `BASE`.
pub(crate) fn time_priced_scale(time_to_maturity: u64, rate: u128) -> Result<U256> {
    let priced = mul(
        U256::from(time_to_maturity),
        wide(rate),
        "time-priced fee overflow",
    )?;
    add(priced, U256::one() << BASE_SHIFT, "time-priced fee overflow")
}

/// Splits the fee stored for a trade of `amount`.
///
/// `amount` is `xIncrease` for a lend and the asset withdrawn for a
/// borrow.  Returns an all-zero split when `fee + protocolFee` is zero.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`](crate::error::AmmError::Overflow) if the
/// fee-inclusive amount exceeds 128 bits.
///
/// # Examples
///
/// ```
/// use tenor_amm::config::FeeConfig;
/// use tenor_amm::curve::accrue_fees;
///
/// let split = accrue_fees(998, 1 << 29, &FeeConfig::new(3, 7, 0)).expect("fits");
/// assert_eq!(split.total, split.lp_fee + split.protocol_fee + split.staking_fee);
/// ```
pub fn accrue_fees(amount: u128, time_to_maturity: u64, fees: &FeeConfig) -> Result<FeeSplit> {
    let rate = fees.stored();
    if rate == 0 {
        return Ok(FeeSplit::default());
    }
    let scale = time_priced_scale(time_to_maturity, rate)?;
    let gross = mul_div_up(wide(amount), scale, U256::one() << BASE_SHIFT)?;
    let total = narrow(gross, "fee total overflow")?.safe_sub(amount, "fee total underflow")?;
    let lp_fee = narrow(
        mul_div(
            wide(total),
            wide(u128::from(fees.fee())),
            wide(rate),
            Rounding::Down,
        )?,
        "lp fee overflow",
    )?;
    let protocol_fee = narrow(
        mul_div(
            wide(total),
            wide(u128::from(fees.protocol_fee())),
            wide(rate),
            Rounding::Down,
        )?,
        "protocol fee overflow",
    )?;
    let staking_fee = total
        .safe_sub(lp_fee, "staking fee underflow")?
        .safe_sub(protocol_fee, "staking fee underflow")?;
    Ok(FeeSplit {
        total,
        lp_fee,
        protocol_fee,
        staking_fee,
    })
}
