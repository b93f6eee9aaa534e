//! Fixed-term lending pool example.
//!
//! Demonstrates opening a pool, lending and borrowing in each pricing
//! mode, repaying part of a debt, and settling lenders and liquidity
//! providers at maturity.
//!
//! # Run
//!
//! ```bash
//! cargo run --example lend_and_borrow
//! ```

use tenor_amm::config::{FeeConfig, PoolConfig};
use tenor_amm::domain::{BorrowSpec, DueId, LendSpec, Maturity, Percent};
use tenor_amm::pool::FixedTermPool;
use tenor_amm::traits::{FromConfig, LendingPool};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Fixed-Term Lending Pool ===\n");

    // ── 1. Open the pool ────────────────────────────────────────────────
    //    Founding LP deposits 10 000 asset and 16 000 collateral and owes
    //    11 500 at maturity, which sets the opening rate.
    let maturity = Maturity::new(1 << 29);
    let config = PoolConfig::new(maturity, FeeConfig::new(1, 1, 1), 0, 10_000, 11_500, 16_000)?;
    let mut pool = FixedTermPool::from_config(&config)?;

    println!("Pool:      {}", pool.curve_state());
    println!("Reserves:  {}", pool.reserves());
    if let Some(founding) = pool.due(DueId::FOUNDING) {
        println!("Founder:   {founding}\n");
    }

    // ── 2. Lend ─────────────────────────────────────────────────────────
    //    Lender A fixes the loan claim; lender B splits the move evenly.
    let lend_a = pool.lend(&LendSpec::given_loan(1_000, 1_010, 0)?, 0)?;
    println!("Lender A:  {}", lend_a.claims);

    let lend_b = pool.lend(&LendSpec::given_percent(2_000, Percent::HALF, 0, 0)?, 100)?;
    println!("Lender B:  {}", lend_b.claims);

    // ── 3. Borrow ───────────────────────────────────────────────────────
    let quote = pool.quote_borrow(
        &BorrowSpec::given_percent(1_500, Percent::HALF, u128::MAX, u128::MAX)?,
        200,
    )?;
    println!("\nQuote:     {}", quote.due);

    //    Fix the quoted debt and allow 1% collateral slippage.
    let max_collateral = quote.due.collateral + quote.due.collateral / 100;
    let spec = BorrowSpec::given_debt(1_500, quote.due.debt, max_collateral)?;
    let borrowed = pool.borrow(&spec, 200)?;
    let due = borrowed.quote.due;
    println!("Borrower:  {} {due}", borrowed.due_id);

    // ── 4. Repay half ───────────────────────────────────────────────────
    let half = due.debt / 2;
    let release = due.collateral * half / due.debt;
    let remaining = pool.pay(borrowed.due_id, half, release, 300)?;
    println!("Repaid {half}, released {release}, still owed {remaining}\n");

    println!("Pool:      {}", pool.curve_state());
    println!("Books:     {}\n", pool.accounting());

    // ── 5. Settle at maturity ───────────────────────────────────────────
    let now = maturity.get();
    let paid_a = pool.withdraw(&lend_a.claims, now)?;
    let paid_b = pool.withdraw(&lend_b.claims, now)?;
    println!("Lender A receives {paid_a}");
    println!("Lender B receives {paid_b}");
    if let Some(settlement) = pool.settlement() {
        println!("Settled on {settlement}");
    }

    let liquidity = pool.accounting().total_liquidity;
    let founder = pool.burn(liquidity, now)?;
    println!("Founder receives  {founder}");

    let fees = pool.collect_protocol_fees()?;
    println!(
        "Protocol collects {} (protocol) + {} (staking)",
        fees.protocol_fee, fees.staking_fee
    );
    println!("\nLeft in pool: {}", pool.reserves());

    Ok(())
}
