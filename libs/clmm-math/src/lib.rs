//! Concentrated-liquidity position math over Q64.96 sqrt prices and
//! Q128.128 fee growth accumulators.
//!
//! Every function is pure: inputs are caller-supplied snapshots and failures
//! come back as [`MathError`].

pub mod error;
pub mod fee_growth;
pub mod full_math;
pub mod invariants;
pub mod liquidity_math;
pub mod position;
pub mod price;
pub mod report;
pub mod sqrt_price_math;
pub mod tick_math;

pub use error::{MathError, Result};
pub use fee_growth::*;
pub use full_math::*;
pub use liquidity_math::*;
pub use position::*;
pub use price::Price;
pub use report::*;
pub use sqrt_price_math::*;
pub use tick_math::*;
