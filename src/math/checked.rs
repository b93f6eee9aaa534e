//! Checked arithmetic on raw `u128` token quantities.
//!
//! The [`CheckedArithmetic`] trait provides fallible arithmetic that
//! returns [`AmmError`] instead of panicking or wrapping.  Each call names
//! the site it guards so a failure can be traced to the bookkeeping field
//! that overflowed.
//!
//! # Examples
//!
//! ```
//! use tenor_amm::domain::Rounding;
//! use tenor_amm::math::CheckedArithmetic;
//!
//! let reserve = 1_000u128;
//! assert_eq!(reserve.safe_add(250, "reserve"), Ok(1_250));
//! assert!(reserve.safe_sub(1_001, "reserve").is_err());
//! assert_eq!(reserve.safe_div(3, Rounding::Up), Ok(334));
//! ```

use crate::domain::Rounding;
use crate::error::{AmmError, Result};

use super::div_round;

/// Fallible arithmetic for pool bookkeeping values.
///
/// # Contract
///
/// - **No panics**: all error conditions produce `Err`.
/// - **No saturation**: errors propagate instead.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] with `context` on overflow.
    fn safe_add(&self, other: Self, context: &'static str) -> Result<Self>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] with `context` if the result would
    /// be negative.
    fn safe_sub(&self, other: Self, context: &'static str) -> Result<Self>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] with `context` on overflow.
    fn safe_mul(&self, other: Self, context: &'static str) -> Result<Self>;

    /// Checked division with explicit [`Rounding`] direction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `other` is zero.
    fn safe_div(&self, other: Self, rounding: Rounding) -> Result<Self>;
}

impl CheckedArithmetic for u128 {
    #[inline]
    fn safe_add(&self, other: Self, context: &'static str) -> Result<Self> {
        self.checked_add(other).ok_or(AmmError::Overflow(context))
    }

    #[inline]
    fn safe_sub(&self, other: Self, context: &'static str) -> Result<Self> {
        self.checked_sub(other).ok_or(AmmError::Underflow(context))
    }

    #[inline]
    fn safe_mul(&self, other: Self, context: &'static str) -> Result<Self> {
        self.checked_mul(other).ok_or(AmmError::Overflow(context))
    }

    #[inline]
    fn safe_div(&self, other: Self, rounding: Rounding) -> Result<Self> {
        div_round(*self, other, rounding).ok_or(AmmError::DivisionByZero)
    }
}
