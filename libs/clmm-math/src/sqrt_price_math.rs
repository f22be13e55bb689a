use clmm_types::{Q96, U256};

use crate::error::{MathError, Result};
use crate::full_math::{div_rounding_up, mul_div, mul_div_rounding_up};

/// Order two sqrt ratios as (lower, upper)
pub(crate) fn sort(sqrt_ratio_a_x96: U256, sqrt_ratio_b_x96: U256) -> (U256, U256) {
    if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    }
}

/// Calculate amount0 delta for a price move from sqrt_ratio_a to sqrt_ratio_b
/// delta_x = L * (sqrt_pb - sqrt_pa) / (sqrt_pa * sqrt_pb)
pub fn get_amount0_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256> {
    let (sqrt_ratio_lower, sqrt_ratio_upper) = sort(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    if sqrt_ratio_lower.is_zero() {
        return Err(MathError::DivisionByZero);
    }

    // L << 96 stays below 2^224
    let numerator1 = U256::from(liquidity) << 96;
    let numerator2 = sqrt_ratio_upper - sqrt_ratio_lower;

    if round_up {
        div_rounding_up(
            mul_div_rounding_up(numerator1, numerator2, sqrt_ratio_upper)?,
            sqrt_ratio_lower,
        )
    } else {
        Ok(mul_div(numerator1, numerator2, sqrt_ratio_upper)? / sqrt_ratio_lower)
    }
}

/// Calculate amount1 delta for a price move from sqrt_ratio_a to sqrt_ratio_b
/// delta_y = L * (sqrt_pb - sqrt_pa)
pub fn get_amount1_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256> {
    let (sqrt_ratio_lower, sqrt_ratio_upper) = sort(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    let liquidity = U256::from(liquidity);

    if round_up {
        mul_div_rounding_up(liquidity, sqrt_ratio_upper - sqrt_ratio_lower, Q96)
    } else {
        mul_div(liquidity, sqrt_ratio_upper - sqrt_ratio_lower, Q96)
    }
}
