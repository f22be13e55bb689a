use clmm_types::{MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK, Q128, U256};

use crate::error::{MathError, Result};

/// sqrt(1.0001^-(2^i)) in Q128, one factor per bit of |tick|.
/// The values and the order they are applied in define the price grid shared
/// with on-chain pools; changing either breaks bit-exactness.
const SQRT_RATIO_FACTORS: [u128; 20] = [
    0xfffcb933bd6fad37aa2d162d1a594001,
    0xfff97272373d413259a46990580e213a,
    0xfff2e50f5f656932ef12357cf3c7fdcc,
    0xffe5caca7e10e4e61c3624eaa0941cd0,
    0xffcb9843d60f6159c9db58835c926644,
    0xff973b41fa98c081472e6896dfb254c0,
    0xff2ea16466c96a3843ec78b326b52861,
    0xfe5dee046a99a2a811c461f1969c3053,
    0xfcbe86c7900a88aedcffc83b479aa3a4,
    0xf987a7253ac413176f2b074cf7815e54,
    0xf3392b0822b70005940c7a398e4b70f3,
    0xe7159475a2c29b7443b29c7fa6e889d9,
    0xd097f3bdfd2022b8845ad8f792aa5825,
    0xa9f746462d870fdf8a65dc1f90e061e5,
    0x70d869a156d2a1b890bb3df62baf32f7,
    0x31be135f97d08fd981231505542fcfa6,
    0x9aa508b5b7a84e1c677de54f3e99bc9,
    0x5d6af8dedb81196699c329225ee604,
    0x2216e584f5fa1ea926041bedfe98,
    0x48a170391f7dc42444e8fa2,
];

/// Calculate sqrt(1.0001^tick) * 2^96
///
/// Bit-exact with the on-chain `TickMath.getSqrtRatioAtTick`: the ratio is
/// built in Q128.128 for -|tick|, inverted for positive ticks, then
/// converted to Q64.96 rounding up.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U256> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(MathError::OutOfBoundsTick(tick));
    }

    let abs_tick = tick.unsigned_abs();

    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::from(SQRT_RATIO_FACTORS[0])
    } else {
        Q128
    };

    for (bit, factor) in SQRT_RATIO_FACTORS.iter().enumerate().skip(1) {
        if abs_tick & (1 << bit) != 0 {
            // ratio <= 2^128 and factor < 2^128, so the product fits
            ratio = (ratio * U256::from(*factor)) >> 128;
        }
    }

    // Computed for the negative tick; invert for positive ones
    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q64.96, rounding up so the result is never below the true price
    let sqrt_price_x96 = ratio >> 32;
    if ratio.as_limbs()[0] & 0xffff_ffff == 0 {
        Ok(sqrt_price_x96)
    } else {
        Ok(sqrt_price_x96 + U256::from(1u64))
    }
}

/// Get the greatest tick whose sqrt ratio is less than or equal to `sqrt_price_x96`
///
/// Binary search over the tick domain; valid inputs are
/// `MIN_SQRT_RATIO <= sqrt_price_x96 <= MAX_SQRT_RATIO`, so every tick's own
/// sqrt ratio maps back to it.
pub fn get_tick_at_sqrt_ratio(sqrt_price_x96: U256) -> Result<i32> {
    if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 > MAX_SQRT_RATIO {
        return Err(MathError::SqrtPriceOutOfBounds);
    }

    let mut low = MIN_TICK;
    let mut high = MAX_TICK;

    while low < high {
        let mid = low + (high - low + 1) / 2;
        if get_sqrt_ratio_at_tick(mid)? <= sqrt_price_x96 {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    Ok(low)
}

/// Validate a position's tick boundaries
pub fn check_ticks(tick_lower: i32, tick_upper: i32) -> Result<()> {
    if tick_lower >= tick_upper {
        return Err(MathError::InvalidRange {
            lower: tick_lower,
            upper: tick_upper,
        });
    }
    if tick_lower < MIN_TICK {
        return Err(MathError::OutOfBoundsTick(tick_lower));
    }
    if tick_upper > MAX_TICK {
        return Err(MathError::OutOfBoundsTick(tick_upper));
    }
    Ok(())
}
