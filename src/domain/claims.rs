//! Lender claims and borrower dues.

use core::fmt;

use crate::error::Result;
use crate::math::CheckedArithmetic;

/// A lender's position (or the pool's aggregate of all positions).
///
/// The loan claim is redeemable in the asset token at maturity; the
/// coverage claim is redeemable in collateral when borrowers default.
/// Both are split into principal and interest components for settlement
/// priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Claims {
    /// Asset principal (`xIncrease`).
    pub loan_principal: u128,
    /// Asset interest (`(Δt · yDecrease) >> 32`).
    pub loan_interest: u128,
    /// Coverage principal (`floor(z · xIncrease / (x + xIncrease))`).
    pub coverage_principal: u128,
    /// Coverage interest (`(Δt · zDecrease) >> 25`).
    pub coverage_interest: u128,
}

impl Claims {
    /// Total loan claim (principal + interest).
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`](crate::error::AmmError::Overflow) on overflow.
    pub fn loan(&self) -> Result<u128> {
        self.loan_principal
            .safe_add(self.loan_interest, "loan claim overflow")
    }

    /// Total coverage claim (principal + interest).
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`](crate::error::AmmError::Overflow) on overflow.
    pub fn coverage(&self) -> Result<u128> {
        self.coverage_principal
            .safe_add(self.coverage_interest, "coverage claim overflow")
    }

    /// Returns `true` if every component is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.loan_principal == 0
            && self.loan_interest == 0
            && self.coverage_principal == 0
            && self.coverage_interest == 0
    }

    /// Component-wise checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`](crate::error::AmmError::Overflow) if any component overflows.
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        Ok(Self {
            loan_principal: self
                .loan_principal
                .safe_add(other.loan_principal, "loan principal overflow")?,
            loan_interest: self
                .loan_interest
                .safe_add(other.loan_interest, "loan interest overflow")?,
            coverage_principal: self
                .coverage_principal
                .safe_add(other.coverage_principal, "coverage principal overflow")?,
            coverage_interest: self
                .coverage_interest
                .safe_add(other.coverage_interest, "coverage interest overflow")?,
        })
    }

    /// Component-wise checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`](crate::error::AmmError::Underflow) if any component of
    /// `other` exceeds the matching component of `self`.
    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        Ok(Self {
            loan_principal: self
                .loan_principal
                .safe_sub(other.loan_principal, "loan principal underflow")?,
            loan_interest: self
                .loan_interest
                .safe_sub(other.loan_interest, "loan interest underflow")?,
            coverage_principal: self
                .coverage_principal
                .safe_sub(other.coverage_principal, "coverage principal underflow")?,
            coverage_interest: self
                .coverage_interest
                .safe_sub(other.coverage_interest, "coverage interest underflow")?,
        })
    }
}

impl fmt::Display for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Claims(loan={}+{}, coverage={}+{})",
            self.loan_principal,
            self.loan_interest,
            self.coverage_principal,
            self.coverage_interest
        )
    }
}

/// A borrower's obligation: repay `debt` asset before maturity to release
/// `collateral`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Due {
    /// Outstanding debt in the asset token.
    pub debt: u128,
    /// Collateral locked against the debt.
    pub collateral: u128,
}

impl Due {
    /// Creates a due.
    #[must_use]
    pub const fn new(debt: u128, collateral: u128) -> Self {
        Self { debt, collateral }
    }

    /// Returns `true` once both the debt and the collateral are zero.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.debt == 0 && self.collateral == 0
    }

    /// Component-wise checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`](crate::error::AmmError::Overflow) if either component overflows.
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        Ok(Self {
            debt: self.debt.safe_add(other.debt, "due debt overflow")?,
            collateral: self
                .collateral
                .safe_add(other.collateral, "due collateral overflow")?,
        })
    }

    /// Component-wise checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`](crate::error::AmmError::Underflow) if either component of
    /// `other` exceeds the matching component of `self`.
    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        Ok(Self {
            debt: self.debt.safe_sub(other.debt, "due debt underflow")?,
            collateral: self
                .collateral
                .safe_sub(other.collateral, "due collateral underflow")?,
        })
    }
}

/// Pool-issued handle of a recorded [`Due`].
///
/// Ids are assigned in issue order; the founding due is always
/// [`DueId::FOUNDING`].  Who may present an id is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DueId(u64);

impl DueId {
    /// The due owed by the founding liquidity provider.
    pub const FOUNDING: Self = Self(0);

    /// Wraps a raw id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// The id issued after this one.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`](crate::error::AmmError::Overflow) when ids are exhausted.
    pub fn next(&self) -> Result<Self> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or(crate::error::AmmError::Overflow("due id overflow"))
    }
}

impl fmt::Display for DueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Due#{}", self.0)
    }
}

impl fmt::Display for Due {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Due(debt={}, collateral={})", self.debt, self.collateral)
    }
}
