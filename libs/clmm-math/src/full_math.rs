use clmm_types::{U256, U512};

use crate::error::{MathError, Result};

pub(crate) fn widen(value: U256) -> U512 {
    let limbs = value.as_limbs();
    U512::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3], 0, 0, 0, 0])
}

fn narrow(value: U512) -> Result<U256> {
    let limbs = value.as_limbs();
    if limbs[4..].iter().any(|&limb| limb != 0) {
        return Err(MathError::ArithmeticOverflow);
    }
    Ok(U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]]))
}

/// Multiply and divide with 512-bit intermediate precision (rounds down)
/// Returns (a * b) / denominator
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }

    let product = widen(a) * widen(b);
    narrow(product / widen(denominator))
}

/// Multiply and divide with 512-bit intermediate precision (rounds up)
/// Returns ceil((a * b) / denominator)
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }

    let product = widen(a) * widen(b);
    let denominator = widen(denominator);
    let result = narrow(product / denominator)?;

    if (product % denominator).is_zero() {
        Ok(result)
    } else {
        result
            .checked_add(U256::from(1u64))
            .ok_or(MathError::ArithmeticOverflow)
    }
}

/// Unsigned division with rounding up
pub fn div_rounding_up(a: U256, b: U256) -> Result<U256> {
    if b.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    if (a % b).is_zero() {
        Ok(a / b)
    } else {
        Ok(a / b + U256::from(1u64))
    }
}

/// Convert U256 to u128, failing if the value does not fit
pub fn to_u128(value: U256) -> Result<u128> {
    let limbs = value.as_limbs();
    if limbs[2] != 0 || limbs[3] != 0 {
        return Err(MathError::ArithmeticOverflow);
    }
    Ok((u128::from(limbs[1]) << 64) | u128::from(limbs[0]))
}
