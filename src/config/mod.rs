//! Pool configuration structs.
//!
//! [`PoolConfig`] is the declarative blueprint for creating one
//! fixed-maturity pool; [`FeeConfig`] carries the fee rates passed into
//! every pricing call.

mod fee_config;
mod pool_config;

pub use fee_config::FeeConfig;
pub use pool_config::PoolConfig;
