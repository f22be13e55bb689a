use clmm_types::{PoolSnapshot, TickSnapshot, Q128, U256};

use crate::error::{MathError, Result};
use crate::full_math::mul_div;

/// Fee growth per unit of liquidity accumulated inside `[tick_lower, tick_upper)`.
///
/// Accumulators are modular: every subtraction wraps at 2^256, so an
/// intermediate that underflows still yields the correct delta once the
/// position's last snapshot is subtracted.
pub fn fee_growth_inside(
    fee_growth_global_x128: U256,
    fee_growth_outside_lower_x128: U256,
    fee_growth_outside_upper_x128: U256,
    tick_current: i32,
    tick_lower: i32,
    tick_upper: i32,
) -> U256 {
    // Calculate fee growth below
    let fee_growth_below = if tick_current >= tick_lower {
        fee_growth_outside_lower_x128
    } else {
        fee_growth_global_x128.wrapping_sub(fee_growth_outside_lower_x128)
    };

    // Calculate fee growth above
    let fee_growth_above = if tick_current >= tick_upper {
        fee_growth_global_x128.wrapping_sub(fee_growth_outside_upper_x128)
    } else {
        fee_growth_outside_upper_x128
    };

    fee_growth_global_x128
        .wrapping_sub(fee_growth_below)
        .wrapping_sub(fee_growth_above)
}

/// Fee growth inside a tick range for both tokens
pub fn fee_growth_inside_pair(
    pool: &PoolSnapshot,
    lower: &TickSnapshot,
    upper: &TickSnapshot,
    tick_lower: i32,
    tick_upper: i32,
) -> (U256, U256) {
    (
        fee_growth_inside(
            pool.fee_growth_global_0_x128,
            lower.fee_growth_outside_0_x128,
            upper.fee_growth_outside_0_x128,
            pool.tick,
            tick_lower,
            tick_upper,
        ),
        fee_growth_inside(
            pool.fee_growth_global_1_x128,
            lower.fee_growth_outside_1_x128,
            upper.fee_growth_outside_1_x128,
            pool.tick,
            tick_lower,
            tick_upper,
        ),
    )
}

/// Fees earned since the position was last touched, plus what it is already owed
/// fees = liquidity * (inside - inside_last) / 2^128 + tokens_owed
pub fn uncollected_fees(
    liquidity: u128,
    fee_growth_inside_x128: U256,
    fee_growth_inside_last_x128: U256,
    tokens_owed: u128,
) -> Result<U256> {
    let delta = fee_growth_inside_x128.wrapping_sub(fee_growth_inside_last_x128);
    let earned = mul_div(delta, U256::from(liquidity), Q128)?;

    earned
        .checked_add(U256::from(tokens_owed))
        .ok_or(MathError::ArithmeticOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clmm_types::Q96;

    fn u(value: u128) -> U256 {
        U256::from(value)
    }

    // === fee_growth_inside tests ===

    #[test]
    fn test_fee_growth_inside_identity() {
        let global = u(123_456_789) << 128;
        for tick in [-600, 0, 599] {
            assert_eq!(
                fee_growth_inside(global, U256::ZERO, U256::ZERO, tick, -600, 600),
                global
            );
        }
    }

    #[test]
    fn test_fee_growth_inside_in_range() {
        // below = 100, above = 50
        assert_eq!(fee_growth_inside(u(1000), u(100), u(50), 0, -60, 60), u(850));
    }

    #[test]
    fn test_fee_growth_inside_below_range() {
        // below = 1000 - 100, above = 30
        assert_eq!(fee_growth_inside(u(1000), u(100), u(30), -120, -60, 60), u(70));
        // above = 300 exceeds what is left, so the result wraps
        assert_eq!(
            fee_growth_inside(u(1000), u(100), u(300), -120, -60, 60),
            U256::MAX - u(199)
        );
    }

    #[test]
    fn test_fee_growth_inside_above_range() {
        // below = 100, above = 1000 - 300
        assert_eq!(fee_growth_inside(u(1000), u(100), u(300), 120, -60, 60), u(200));
    }

    #[test]
    fn test_fee_growth_inside_wraps() {
        // Below range: inside = 10 - 30 mod 2^256
        let inside = fee_growth_inside(u(1000), u(10), u(30), -120, -60, 60);
        assert_eq!(inside, U256::MAX - u(19));

        // The same holds when the global accumulator itself has wrapped
        let inside = fee_growth_inside(u(5), u(10), u(30), -120, -60, 60);
        assert_eq!(inside, U256::MAX - u(19));
    }

    #[test]
    fn test_fee_growth_inside_pair() {
        let lower = TickSnapshot::new(u(100), u(200));
        let upper = TickSnapshot::new(u(50), u(25));
        let pool = PoolSnapshot::new(Q96, 0).with_fee_growth_global(u(1000), u(2000));

        assert_eq!(
            fee_growth_inside_pair(&pool, &lower, &upper, -60, 60),
            (u(850), u(1775))
        );
    }

    // === uncollected_fees tests ===

    #[test]
    fn test_uncollected_fees_no_growth() {
        let growth = u(42) << 128;
        assert_eq!(uncollected_fees(1_000_000, growth, growth, 0), Ok(U256::ZERO));
        assert_eq!(uncollected_fees(u128::MAX, growth, growth, 7), Ok(u(7)));
    }

    #[test]
    fn test_uncollected_fees_basic() {
        // One full token of growth per unit of liquidity
        let fees = uncollected_fees(1_000, Q128, U256::ZERO, 5).unwrap();
        assert_eq!(fees, u(1_005));
    }

    #[test]
    fn test_uncollected_fees_truncates() {
        // Half a token per unit, 3 units -> 1.5 -> 1
        let fees = uncollected_fees(3, Q128 >> 1, U256::ZERO, 0).unwrap();
        assert_eq!(fees, u(1));
    }

    #[test]
    fn test_uncollected_fees_across_wrap() {
        // Accumulator wrapped from MAX - 9 to 10: growth of 20 units of 2^-128
        let last = U256::MAX - u(9);
        let inside = u(10);
        let fees = uncollected_fees(1 << 100, inside, last, 0).unwrap();
        // 20 * 2^100 / 2^128 = 20 / 2^28 -> 0
        assert_eq!(fees, U256::ZERO);

        let fees = uncollected_fees(u128::MAX, Q128 * u(3) + inside, last, 0)
            .unwrap();
        // (3 * 2^128 + 20) * (2^128 - 1) / 2^128 = 3 * 2^128 - 3 + 20 - 1 (truncated)
        assert_eq!(fees, (Q128 * u(3)) + u(16));
    }

    #[test]
    fn test_uncollected_fees_extremes_fit() {
        // (2^256 - 1) * (2^128 - 1) / 2^128 = 2^256 - 2^128 - 1, plus 2^128 - 1 owed
        assert_eq!(
            uncollected_fees(u128::MAX, U256::MAX, U256::ZERO, u128::MAX),
            Ok(U256::MAX - u(1))
        );
    }
}
