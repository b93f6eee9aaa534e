//! Pool implementations.
//!
//! | Pool | Config | Description |
//! |------|--------|-------------|
//! | [`FixedTermPool`] | [`PoolConfig`](crate::config::PoolConfig) | one maturity priced by the `x · y · z` curve |

mod fixed_term;

pub use fixed_term::FixedTermPool;
