//! # Tenor AMM
//!
//! Fixed-maturity, fixed-rate lending market priced by a three-dimensional
//! constant-product curve.
//!
//! Each pool pairs one asset with one collateral token and expires at a
//! single maturity.  Lenders deposit asset in exchange for a fixed loan
//! claim (principal plus interest) and a coverage claim on collateral;
//! borrowers take asset out in exchange for a debt and a collateral lock.
//! Prices come from a curve over three axes:
//!
//! | Axis | Meaning |
//! |------|---------|
//! | `x` | asset liquidity |
//! | `y` | interest rate per second (`2^-32` units) |
//! | `z` | collateral per asset per second (`2^-25` units) |
//!
//! A lend or borrow is valid only if the fee-adjusted product
//! `x · y · z` does not shrink.  The caller chooses how the trade lands on
//! the curve: by target loan, coverage, debt or collateral, or by a
//! percent that splits the move between the interest and collateral axes.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no | `Serialize`/`Deserialize` for domain and config types |
//!
//! # Quick Start
//!
//! ```rust
//! use tenor_amm::config::{FeeConfig, PoolConfig};
//! use tenor_amm::domain::{BorrowSpec, LendSpec, Maturity, Percent};
//! use tenor_amm::pool::FixedTermPool;
//! use tenor_amm::traits::{FromConfig, LendingPool};
//!
//! // 1. Open a pool maturing at t = 2^29 with 10 000 asset of liquidity
//! let config = PoolConfig::new(
//!     Maturity::new(1 << 29),
//!     FeeConfig::new(1, 1, 1),
//!     0,
//!     10_000,
//!     11_500,
//!     16_000,
//! )
//! .expect("valid config");
//! let mut pool = FixedTermPool::from_config(&config).expect("pool created");
//!
//! // 2. Lend 1 000 asset for a 1 010 loan claim
//! let lend = LendSpec::given_loan(1_000, 1_010, 0).expect("non-zero");
//! let lent = pool.lend(&lend, 0).expect("lend succeeded");
//! assert_eq!(lent.claims.loan(), Ok(1_010));
//!
//! // 3. Borrow 1 000 asset, splitting the move evenly between the axes
//! let borrow = BorrowSpec::given_percent(1_000, Percent::HALF, u128::MAX, u128::MAX)
//!     .expect("non-zero");
//! let borrowed = pool.borrow(&borrow, 0).expect("borrow succeeded");
//! assert!(borrowed.quote.due.debt > 1_000);
//! assert_eq!(pool.due(borrowed.due_id), Some(borrowed.quote.due));
//!
//! // 4. Settle the lender at maturity
//! let paid = pool.withdraw(&lent.claims, 1 << 29).expect("withdraw succeeded");
//! assert_eq!(paid.asset_out, 1_010);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Consumer   │  builds a PoolConfig, moves tokens, stores claims/due ids
//! └──────┬──────┘
//!        │ FromConfig + LendingPool
//!        ▼
//! ┌─────────────┐
//! │    Pool      │  FixedTermPool: reserves, bookkeeping, settlement
//! └──────┬──────┘
//!        │ quote(state, fees, maturity, now, spec)
//!        ▼
//! ┌─────────────┐
//! │   Curve      │  LendMath, BorrowMath, invariant checks, fee split
//! └──────┬──────┘
//!        │ 256/512-bit fixed point
//!        ▼
//! ┌─────────────┐
//! │    Math      │  mul_div, sqrt_up, shift_right_up, CheckedArithmetic
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`CurveState`](domain::CurveState), [`Claims`](domain::Claims), [`Due`](domain::Due), [`Percent`](domain::Percent), etc. |
//! | [`curve`] | Pricing engine: [`LendMath`](curve::LendMath), [`BorrowMath`](curve::BorrowMath), invariant checks, fee accrual |
//! | [`traits`] | Core abstractions: [`LendingPool`](traits::LendingPool), [`FromConfig`](traits::FromConfig) |
//! | [`config`] | Pool blueprints: [`PoolConfig`](config::PoolConfig), [`FeeConfig`](config::FeeConfig) |
//! | [`pool`] | [`FixedTermPool`](pool::FixedTermPool), the stateful lifecycle |
//! | [`math`] | Wide-integer fixed point and checked arithmetic |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod curve;
pub mod domain;
pub mod error;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod traits;
