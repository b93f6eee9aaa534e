//! The pool lifecycle trait.
//!
//! [`LendingPool`] is the only write path into one maturity's curve state,
//! reserves and bookkeeping.  Every mutating method prices and validates
//! first and commits all three records together; a failed call leaves
//! the pool exactly as it was.
//!
//! # Lifecycle
//!
//! | Phase | Operations |
//! |-------|------------|
//! | Before maturity | [`mint`](LendingPool::mint), [`lend`](LendingPool::lend), [`borrow`](LendingPool::borrow), [`pay`](LendingPool::pay) |
//! | At or after maturity | [`withdraw`](LendingPool::withdraw), [`burn`](LendingPool::burn) |
//! | Any time | queries, quotes, [`collect_protocol_fees`](LendingPool::collect_protocol_fees) |
//!
//! Token transfers and receipt issuance are the caller's concern: the
//! pool reports what moves and who is owed what, and the caller moves the
//! tokens and records the positions.  Dues are the exception: the pool
//! keeps every due it issues under a [`DueId`], and repayment names that
//! id.  Checking who may present an id stays with the caller.

use crate::config::FeeConfig;
use crate::curve::{BorrowQuote, LendQuote};
use crate::domain::{
    BorrowSpec, BurnOutcome, Claims, CurveState, Due, DueId, FeesStored, LendSpec, Maturity,
    MintOutcome, PoolAccounting, PoolReserves, WithdrawOutcome,
};
use crate::error::AmmError;

/// A committed borrow: the recorded due's id and the priced quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BorrowOutcome {
    /// Id under which the pool recorded `quote.due`.
    pub due_id: DueId,
    /// The priced delta, due and fees.
    pub quote: BorrowQuote,
}

/// A fixed-maturity lending pool.
///
/// # Errors
///
/// Methods that can fail return [`Result<T, AmmError>`].  Common error
/// variants include:
///
/// - [`AmmError::MaturityReached`]: a pre-maturity operation after maturity
/// - [`AmmError::MaturityNotReached`]: a settlement before maturity
/// - [`AmmError::InvariantViolation`] / [`AmmError::BelowMinimumRate`]:
///   the priced delta fails the curve check
/// - [`AmmError::SlippageExceeded`]: the caller's bounds are not met
/// - [`AmmError::InsufficientReserve`]: the pool cannot pay out
pub trait LendingPool {
    /// The immutable expiry of this pool.
    fn maturity(&self) -> Maturity;

    /// The fee rates passed into every pricing call.
    fn fee_config(&self) -> FeeConfig;

    /// Current curve state.
    fn curve_state(&self) -> &CurveState;

    /// Current token balances.
    fn reserves(&self) -> &PoolReserves;

    /// Current bookkeeping.
    fn accounting(&self) -> &PoolAccounting;

    /// The outstanding due recorded under `due_id`, if any.
    fn due(&self, due_id: DueId) -> Option<Due>;

    /// Prices a lend without mutating the pool.
    ///
    /// # Errors
    ///
    /// Same as [`LendMath::quote`](crate::curve::LendMath::quote).
    fn quote_lend(&self, spec: &LendSpec, now: u64) -> Result<LendQuote, AmmError>;

    /// Prices a borrow without mutating the pool.
    ///
    /// # Errors
    ///
    /// Same as [`BorrowMath::quote`](crate::curve::BorrowMath::quote).
    fn quote_borrow(&self, spec: &BorrowSpec, now: u64) -> Result<BorrowQuote, AmmError>;

    /// Adds liquidity proportionally on all three axes.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidInput`] if `asset_in` is zero or too small to
    ///   issue any liquidity.
    /// - [`AmmError::MaturityReached`] after maturity.
    fn mint(&mut self, asset_in: u128, now: u64) -> Result<MintOutcome, AmmError>;

    /// Prices and commits a lend; returns the claims to issue.
    ///
    /// # Errors
    ///
    /// Any error of [`LendingPool::quote_lend`].
    fn lend(&mut self, spec: &LendSpec, now: u64) -> Result<LendQuote, AmmError>;

    /// Prices and commits a borrow; records the due and returns its id.
    ///
    /// # Errors
    ///
    /// - Any error of [`LendingPool::quote_borrow`].
    /// - [`AmmError::InsufficientReserve`] if the asset reserve cannot
    ///   cover the withdrawal and the stored fees.
    fn borrow(&mut self, spec: &BorrowSpec, now: u64) -> Result<BorrowOutcome, AmmError>;

    /// Repays part of the due recorded under `due_id` and releases
    /// collateral; returns the due that remains.  A fully repaid due is
    /// dropped from the records.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidInput`] if no due is recorded under `due_id`,
    ///   `asset_in` exceeds its debt, or `collateral_out` exceeds
    ///   `floor(collateral · asset_in / debt)`.
    /// - [`AmmError::MaturityReached`] after maturity.
    fn pay(
        &mut self,
        due_id: DueId,
        asset_in: u128,
        collateral_out: u128,
        now: u64,
    ) -> Result<Due, AmmError>;

    /// Settles a lender's claims against the settlement basis frozen by
    /// the first successful withdraw or burn.
    ///
    /// # Errors
    ///
    /// - [`AmmError::MaturityNotReached`] before maturity.
    /// - [`AmmError::Underflow`] if `claims` exceed the pool's totals.
    fn withdraw(&mut self, claims: &Claims, now: u64) -> Result<WithdrawOutcome, AmmError>;

    /// Burns liquidity shares for their share of the surplus, priced
    /// against the same frozen basis as [`LendingPool::withdraw`].
    ///
    /// # Errors
    ///
    /// - [`AmmError::MaturityNotReached`] before maturity.
    /// - [`AmmError::InvalidInput`] if `liquidity_in` is zero or exceeds
    ///   the outstanding total.
    fn burn(&mut self, liquidity_in: u128, now: u64) -> Result<BurnOutcome, AmmError>;

    /// Pays out the protocol and staking fee stores.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if the reserve no longer holds the
    /// stored fees.
    fn collect_protocol_fees(&mut self) -> Result<FeesStored, AmmError>;
}
