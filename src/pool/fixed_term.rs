//! Fixed-term lending pool: one maturity's curve, reserves and books.
//!
//! # Dues
//!
//! Every due the pool creates (the founding mint, later mints, borrows)
//! is recorded under a [`DueId`].  Repayment is only accepted against a
//! recorded due, and the recorded due shrinks with it.
//!
//! # Settlement at Maturity
//!
//! The first successful withdraw or burn at or after maturity captures a
//! [`Settlement`]: available asset `A`, the lender totals and the
//! collateral owed to coverage.  Every later withdraw and burn is priced
//! against that basis, so payouts do not depend on settlement order.

use std::collections::BTreeMap;

use primitive_types::U256;

use crate::config::{FeeConfig, PoolConfig};
use crate::curve::constants::{ADJUST_SHIFT, COLLATERAL_SHIFT, INTEREST_SHIFT};
use crate::curve::{BorrowMath, BorrowQuote, LendMath, LendQuote};
use crate::domain::{
    BorrowDelta, BorrowSpec, BurnOutcome, Claims, CurveState, Due, DueId, FeesStored, LendSpec,
    Maturity, MintOutcome, PoolAccounting, PoolReserves, Rounding, Settlement, WithdrawOutcome,
};
use crate::error::AmmError;
use crate::math::{mul, mul_div, narrow, shift_right_up, shl, wide, CheckedArithmetic};
use crate::traits::{BorrowOutcome, FromConfig, LendingPool};

/// A single-maturity lending pool priced by the `x · y · z` curve.
///
/// Created from a [`PoolConfig`] via [`FromConfig`].  The founding
/// liquidity provider deposits the initial asset and collateral, receives
/// `initial_asset << 16` liquidity shares, and owes the initial debt
/// under [`DueId::FOUNDING`].
///
/// # State
///
/// - `state`: the curve `{x, y, z}`
/// - `reserves`: asset and collateral balances (raw token units)
/// - `accounting`: liquidity, lender claims, dues, fee stores
/// - `dues`: every outstanding due by id
/// - `settlement`: the frozen basis once settlement has begun
///
/// The records are only ever replaced together, after the whole
/// operation has validated.
///
/// # Example
///
/// ```rust
/// use tenor_amm::config::{FeeConfig, PoolConfig};
/// use tenor_amm::domain::{LendSpec, Maturity};
/// use tenor_amm::pool::FixedTermPool;
/// use tenor_amm::traits::{FromConfig, LendingPool};
///
/// let cfg = PoolConfig::new(Maturity::new(1 << 29), FeeConfig::new(1, 1, 1), 0, 10_000, 11_500, 16_000)
///     .expect("valid config");
/// let mut pool = FixedTermPool::from_config(&cfg).expect("pool created");
///
/// let spec = LendSpec::given_loan(1_000, 1_010, 50).expect("non-zero");
/// let quote = pool.lend(&spec, 0).expect("lend ok");
/// assert_eq!(quote.claims.loan(), Ok(1_010));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTermPool {
    maturity: Maturity,
    fees: FeeConfig,
    state: CurveState,
    reserves: PoolReserves,
    accounting: PoolAccounting,
    dues: BTreeMap<DueId, Due>,
    next_due_id: DueId,
    settlement: Option<Settlement>,
}

impl FixedTermPool {
    /// Asset available to lenders and liquidity providers: the reserve
    /// less the protocol and staking fee stores.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if the reserve no longer covers
    /// the stored fees.
    pub fn available_asset(&self) -> Result<u128, AmmError> {
        self.reserves.asset.safe_sub(
            self.accounting.fees_stored.reserved()?,
            "fees exceed asset reserve",
        )
    }

    /// Collateral owed to coverage holders for the asset deficit: the
    /// frozen amount once settlement has begun, the live one before.
    ///
    /// # Errors
    ///
    /// Same as [`Settlement::capture`].
    pub fn coverage_payable(&self) -> Result<u128, AmmError> {
        Ok(self.settlement_basis()?.coverage_payable)
    }

    /// The frozen settlement basis, if settlement has begun.
    #[must_use]
    pub fn settlement(&self) -> Option<&Settlement> {
        self.settlement.as_ref()
    }

    fn settlement_basis(&self) -> Result<Settlement, AmmError> {
        match self.settlement {
            Some(settlement) => Ok(settlement),
            None => Settlement::capture(&self.reserves, &self.accounting),
        }
    }

    fn commit(&mut self, state: CurveState, reserves: PoolReserves, accounting: PoolAccounting) {
        self.state = state;
        self.reserves = reserves;
        self.accounting = accounting;
    }

    fn record_due(&mut self, due_id: DueId, next_due_id: DueId, due: Due) {
        self.dues.insert(due_id, due);
        self.next_due_id = next_due_id;
    }
}

impl FromConfig<PoolConfig> for FixedTermPool {
    fn from_config(config: &PoolConfig) -> Result<Self, AmmError> {
        config.validate()?;
        let dt = config.maturity().time_to_maturity(config.created_at())?;
        let interest = config.initial_debt() - config.initial_asset();
        let y = narrow(
            shl(wide(interest), INTEREST_SHIFT, "initial rate overflow")? / U256::from(dt),
            "initial rate overflow",
        )?;
        let z = narrow(
            shl(
                wide(config.initial_collateral()),
                COLLATERAL_SHIFT,
                "initial collateral overflow",
            )? / U256::from(dt),
            "initial collateral overflow",
        )?;
        if y == 0 {
            return Err(AmmError::InvalidConfiguration(
                "initial interest rounds to a zero rate",
            ));
        }
        if z == 0 {
            return Err(AmmError::InvalidConfiguration(
                "initial collateral rounds to a zero axis",
            ));
        }
        let state = CurveState::new(config.initial_asset(), y, z)?;
        let total_liquidity = config
            .initial_asset()
            .safe_mul(1 << ADJUST_SHIFT, "initial liquidity overflow")?;
        let founding = Due::new(config.initial_debt(), config.initial_collateral());
        let pool = Self {
            maturity: config.maturity(),
            fees: config.fees(),
            state,
            reserves: PoolReserves::new(config.initial_asset(), config.initial_collateral()),
            accounting: PoolAccounting {
                total_liquidity,
                total_debt_created: config.initial_debt(),
                total_dues: founding,
                ..PoolAccounting::default()
            },
            dues: BTreeMap::from([(DueId::FOUNDING, founding)]),
            next_due_id: DueId::FOUNDING.next()?,
            settlement: None,
        };
        log::debug!("created pool {} at {}", pool.maturity, pool.state);
        Ok(pool)
    }
}

impl LendingPool for FixedTermPool {
    fn maturity(&self) -> Maturity {
        self.maturity
    }

    fn fee_config(&self) -> FeeConfig {
        self.fees
    }

    fn curve_state(&self) -> &CurveState {
        &self.state
    }

    fn reserves(&self) -> &PoolReserves {
        &self.reserves
    }

    fn accounting(&self) -> &PoolAccounting {
        &self.accounting
    }

    fn due(&self, due_id: DueId) -> Option<Due> {
        self.dues.get(&due_id).copied()
    }

    fn quote_lend(&self, spec: &LendSpec, now: u64) -> Result<LendQuote, AmmError> {
        LendMath::quote(&self.state, &self.fees, self.maturity, now, spec)
    }

    fn quote_borrow(&self, spec: &BorrowSpec, now: u64) -> Result<BorrowQuote, AmmError> {
        BorrowMath::quote(&self.state, &self.fees, self.maturity, now, spec)
    }

    fn mint(&mut self, asset_in: u128, now: u64) -> Result<MintOutcome, AmmError> {
        let dt = self.maturity.time_to_maturity(now)?;
        if asset_in == 0 {
            return Err(AmmError::InvalidInput("mint amount must be non-zero"));
        }
        let x = self.state.x();
        let y_increase = mul_div_up_u128(self.state.y(), asset_in, x)?;
        let z_increase = mul_div_up_u128(self.state.z(), asset_in, x)?;
        let liquidity_out = mul_div_down(self.accounting.total_liquidity, asset_in, x)?;
        if liquidity_out == 0 {
            return Err(AmmError::InvalidInput("mint too small to issue liquidity"));
        }
        let state = self.state.after_mint(asset_in, y_increase, z_increase)?;

        let debt = BorrowMath::get_debt(&BorrowDelta::new(asset_in, y_increase, z_increase), dt)?;
        let collateral = narrow(
            shift_right_up(
                mul(U256::from(dt), wide(z_increase), "mint collateral overflow")?,
                COLLATERAL_SHIFT,
            ),
            "mint collateral overflow",
        )?;
        let due = Due::new(debt, collateral);

        let reserves = PoolReserves::new(
            self.reserves.asset.safe_add(asset_in, "asset reserve overflow")?,
            self.reserves
                .collateral
                .safe_add(collateral, "collateral reserve overflow")?,
        );
        let mut accounting = self.accounting;
        accounting.total_liquidity = accounting
            .total_liquidity
            .safe_add(liquidity_out, "total liquidity overflow")?;
        accounting.total_debt_created = accounting
            .total_debt_created
            .safe_add(debt, "debt created overflow")?;
        accounting.total_dues = accounting.total_dues.checked_add(&due)?;
        let due_id = self.next_due_id;
        let next_due_id = due_id.next()?;

        self.record_due(due_id, next_due_id, due);
        self.commit(state, reserves, accounting);
        log::debug!("mint {asset_in}: {liquidity_out} liquidity, {due_id} {due}; now {state}");
        Ok(MintOutcome {
            liquidity_out,
            due_id,
            due,
        })
    }

    fn lend(&mut self, spec: &LendSpec, now: u64) -> Result<LendQuote, AmmError> {
        let quote = self.quote_lend(spec, now)?;
        let state = self.state.after_lend(&quote.delta)?;
        let reserves = PoolReserves::new(
            self.reserves
                .asset
                .safe_add(spec.asset_in(), "asset reserve overflow")?,
            self.reserves.collateral,
        );
        let mut accounting = self.accounting;
        accounting.total_claims = accounting.total_claims.checked_add(&quote.claims)?;
        accounting.fees_stored = quote.fees.apply_to(&accounting.fees_stored)?;

        self.commit(state, reserves, accounting);
        log::debug!("lend {spec}: {}; now {state}", quote.claims);
        Ok(quote)
    }

    fn borrow(&mut self, spec: &BorrowSpec, now: u64) -> Result<BorrowOutcome, AmmError> {
        let quote = self.quote_borrow(spec, now)?;
        let state = self.state.after_borrow(&quote.delta)?;
        let asset = self
            .reserves
            .asset
            .checked_sub(spec.asset_out())
            .ok_or(AmmError::InsufficientReserve("asset reserve below borrow"))?;
        let mut accounting = self.accounting;
        accounting.fees_stored = quote.fees.apply_to(&accounting.fees_stored)?;
        if asset < accounting.fees_stored.total()? {
            return Err(AmmError::InsufficientReserve(
                "borrow would spend stored fees",
            ));
        }
        accounting.total_debt_created = accounting
            .total_debt_created
            .safe_add(quote.due.debt, "debt created overflow")?;
        accounting.total_dues = accounting.total_dues.checked_add(&quote.due)?;
        let reserves = PoolReserves::new(
            asset,
            self.reserves
                .collateral
                .safe_add(quote.due.collateral, "collateral reserve overflow")?,
        );
        let due_id = self.next_due_id;
        let next_due_id = due_id.next()?;

        self.record_due(due_id, next_due_id, quote.due);
        self.commit(state, reserves, accounting);
        log::debug!("borrow {spec}: {due_id} {}; now {state}", quote.due);
        Ok(BorrowOutcome { due_id, quote })
    }

    fn pay(
        &mut self,
        due_id: DueId,
        asset_in: u128,
        collateral_out: u128,
        now: u64,
    ) -> Result<Due, AmmError> {
        self.maturity.time_to_maturity(now)?;
        let due = self
            .due(due_id)
            .ok_or(AmmError::InvalidInput("no outstanding due under this id"))?;
        if asset_in > due.debt {
            return Err(AmmError::InvalidInput("repayment exceeds debt"));
        }
        let releasable = if due.debt == 0 {
            due.collateral
        } else {
            mul_div_down(due.collateral, asset_in, due.debt)?
        };
        if collateral_out > releasable {
            return Err(AmmError::InvalidInput(
                "collateral release exceeds repayment share",
            ));
        }
        let paid = Due::new(asset_in, collateral_out);
        let remaining = due.checked_sub(&paid)?;
        let total_dues = self.accounting.total_dues.checked_sub(&paid)?;
        let reserves = PoolReserves::new(
            self.reserves
                .asset
                .safe_add(asset_in, "asset reserve overflow")?,
            self.reserves
                .collateral
                .checked_sub(collateral_out)
                .ok_or(AmmError::InsufficientReserve("collateral reserve below release"))?,
        );

        self.reserves = reserves;
        self.accounting.total_dues = total_dues;
        if remaining.is_settled() {
            self.dues.remove(&due_id);
        } else {
            self.dues.insert(due_id, remaining);
        }
        log::debug!("pay {asset_in} against {due_id}: released {collateral_out}, {remaining} remains");
        Ok(remaining)
    }

    fn withdraw(&mut self, claims: &Claims, now: u64) -> Result<WithdrawOutcome, AmmError> {
        self.maturity.ensure_matured(now)?;
        let settlement = self.settlement_basis()?;
        let remaining = self.accounting.total_claims.checked_sub(claims)?;
        let outcome = WithdrawOutcome {
            asset_out: settlement.loan_payout(claims)?,
            collateral_out: settlement.coverage_payout(claims)?,
        };
        let reserves = PoolReserves::new(
            self.reserves
                .asset
                .safe_sub(outcome.asset_out, "asset reserve underflow")?,
            self.reserves
                .collateral
                .safe_sub(outcome.collateral_out, "collateral reserve underflow")?,
        );

        self.reserves = reserves;
        self.accounting.total_claims = remaining;
        self.settlement = Some(settlement);
        log::debug!("withdraw {claims}: {outcome}");
        Ok(outcome)
    }

    fn burn(&mut self, liquidity_in: u128, now: u64) -> Result<BurnOutcome, AmmError> {
        self.maturity.ensure_matured(now)?;
        let total_liquidity = self.accounting.total_liquidity;
        if liquidity_in == 0 || liquidity_in > total_liquidity {
            return Err(AmmError::InvalidInput(
                "burn amount must be within outstanding liquidity",
            ));
        }
        let settlement = self.settlement_basis()?;
        let outcome = settlement.burn_payout(liquidity_in)?;
        let reserves = PoolReserves::new(
            self.reserves
                .asset
                .safe_sub(outcome.asset_out, "asset reserve underflow")?,
            self.reserves
                .collateral
                .safe_sub(outcome.collateral_out, "collateral reserve underflow")?,
        );
        let lp_fee = self
            .accounting
            .fees_stored
            .lp_fee
            .safe_sub(outcome.fee_out, "lp fee underflow")?;

        self.reserves = reserves;
        self.accounting.total_liquidity = total_liquidity - liquidity_in;
        self.accounting.fees_stored.lp_fee = lp_fee;
        self.settlement = Some(settlement);
        log::debug!("burn {liquidity_in}: {outcome}");
        Ok(outcome)
    }

    fn collect_protocol_fees(&mut self) -> Result<FeesStored, AmmError> {
        let stored = self.accounting.fees_stored;
        let asset = self
            .reserves
            .asset
            .safe_sub(stored.reserved()?, "fees exceed asset reserve")?;
        self.reserves.asset = asset;
        self.accounting.fees_stored = FeesStored {
            lp_fee: stored.lp_fee,
            ..FeesStored::default()
        };
        let collected = FeesStored {
            lp_fee: 0,
            ..stored
        };
        log::debug!(
            "collected protocol fee {} and staking fee {}",
            collected.protocol_fee,
            collected.staking_fee
        );
        Ok(collected)
    }
}

fn mul_div_down(a: u128, b: u128, denominator: u128) -> Result<u128, AmmError> {
    narrow(
        mul_div(wide(a), wide(b), wide(denominator), Rounding::Down)?,
        "pro-rata share overflow",
    )
}

fn mul_div_up_u128(a: u128, b: u128, denominator: u128) -> Result<u128, AmmError> {
    narrow(
        mul_div(wide(a), wide(b), wide(denominator), Rounding::Up)?,
        "pro-rata share overflow",
    )
}
