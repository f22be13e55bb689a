mod decimal;
mod pool;
mod position;
mod tick;

pub use decimal::{parse_u128, parse_u256};
pub use pool::*;
pub use position::*;
pub use tick::*;

pub use ruint::aliases::{U256, U512};

/// Serde adapters that carry wide integers as decimal strings.
pub mod serde_decimal {
    pub use crate::decimal::{u128_str as u128, u256_str as u256};
}

/// Q96 constant (2^96) for sqrt price fixed-point math
pub const Q96: U256 = U256::from_limbs([0, 1 << 32, 0, 0]);

/// Q128 constant (2^128), the fee growth denominator
pub const Q128: U256 = U256::from_limbs([0, 0, 1, 0]);

/// Minimum tick index
pub const MIN_TICK: i32 = -887272;

/// Maximum tick index
pub const MAX_TICK: i32 = 887272;

/// Minimum sqrt price (at MIN_TICK): 4295128739
pub const MIN_SQRT_RATIO: U256 = U256::from_limbs([4295128739, 0, 0, 0]);

/// Maximum sqrt price (at MAX_TICK):
/// 1461446703485210103287273052203988822378723970342
pub const MAX_SQRT_RATIO: U256 =
    U256::from_limbs([0x5d951d5263988d26, 0xefd1fc6a50648849, 0xfffd8963, 0]);
