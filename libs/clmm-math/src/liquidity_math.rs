use clmm_types::{Q96, U256};

use crate::error::{MathError, Result};
use crate::full_math::{mul_div, to_u128};
use crate::sqrt_price_math::{get_amount0_delta, get_amount1_delta, sort};

/// Liquidity obtainable from a pair of desired amounts, and the amounts that
/// liquidity actually represents
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiquidityQuote {
    pub liquidity: u128,
    pub amount0: U256,
    pub amount1: U256,
}

/// Calculate liquidity from amount0
/// L = amount0 * sqrt_pa * sqrt_pb / (sqrt_pb - sqrt_pa)
pub fn get_liquidity_for_amount0(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount0: U256,
) -> Result<u128> {
    let (sqrt_ratio_lower, sqrt_ratio_upper) = sort(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    let intermediate = mul_div(sqrt_ratio_lower, sqrt_ratio_upper, Q96)?;
    to_u128(mul_div(
        amount0,
        intermediate,
        sqrt_ratio_upper - sqrt_ratio_lower,
    )?)
}

/// Calculate liquidity from amount1
/// L = amount1 / (sqrt_pb - sqrt_pa)
pub fn get_liquidity_for_amount1(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount1: U256,
) -> Result<u128> {
    let (sqrt_ratio_lower, sqrt_ratio_upper) = sort(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    to_u128(mul_div(amount1, Q96, sqrt_ratio_upper - sqrt_ratio_lower)?)
}

/// Calculate the maximum liquidity that the given amounts can back for a price range
pub fn get_liquidity_for_amounts(
    sqrt_ratio_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount0: U256,
    amount1: U256,
) -> Result<u128> {
    let (sqrt_ratio_lower, sqrt_ratio_upper) = sort(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    if sqrt_ratio_x96 <= sqrt_ratio_lower {
        // Current price below range - all token0
        get_liquidity_for_amount0(sqrt_ratio_lower, sqrt_ratio_upper, amount0)
    } else if sqrt_ratio_x96 < sqrt_ratio_upper {
        // Current price in range - both tokens
        let liquidity0 = get_liquidity_for_amount0(sqrt_ratio_x96, sqrt_ratio_upper, amount0)?;
        let liquidity1 = get_liquidity_for_amount1(sqrt_ratio_lower, sqrt_ratio_x96, amount1)?;
        Ok(liquidity0.min(liquidity1))
    } else {
        // Current price above range - all token1
        get_liquidity_for_amount1(sqrt_ratio_lower, sqrt_ratio_upper, amount1)
    }
}

/// Get amounts from liquidity for a price range at the current price
pub fn get_amounts_for_liquidity(
    sqrt_ratio_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
) -> Result<(U256, U256)> {
    let (sqrt_ratio_lower, sqrt_ratio_upper) = sort(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    if sqrt_ratio_x96 <= sqrt_ratio_lower {
        // Below range - all token0
        let amount0 = get_amount0_delta(sqrt_ratio_lower, sqrt_ratio_upper, liquidity, false)?;
        Ok((amount0, U256::ZERO))
    } else if sqrt_ratio_x96 < sqrt_ratio_upper {
        // In range - both tokens
        let amount0 = get_amount0_delta(sqrt_ratio_x96, sqrt_ratio_upper, liquidity, false)?;
        let amount1 = get_amount1_delta(sqrt_ratio_lower, sqrt_ratio_x96, liquidity, false)?;
        Ok((amount0, amount1))
    } else {
        // Above range - all token1
        let amount1 = get_amount1_delta(sqrt_ratio_lower, sqrt_ratio_upper, liquidity, false)?;
        Ok((U256::ZERO, amount1))
    }
}

/// Token amounts represented by `liquidity` across the whole interval:
/// amount0 = L * (sqrt_upper - sqrt_lower) * 2^96 / (sqrt_upper * sqrt_lower)
/// amount1 = L * (sqrt_upper - sqrt_lower) / 2^96
///
/// Rounds down. The bounds may be passed in either order but must differ and
/// be non-zero.
pub fn amounts_for_liquidity(
    sqrt_lower_x96: U256,
    sqrt_upper_x96: U256,
    liquidity: u128,
) -> Result<(U256, U256)> {
    let (sqrt_ratio_lower, sqrt_ratio_upper) = sort(sqrt_lower_x96, sqrt_upper_x96);

    if sqrt_ratio_lower.is_zero() || sqrt_ratio_lower == sqrt_ratio_upper {
        return Err(MathError::DivisionByZero);
    }

    Ok((
        get_amount0_delta(sqrt_ratio_lower, sqrt_ratio_upper, liquidity, false)?,
        get_amount1_delta(sqrt_ratio_lower, sqrt_ratio_upper, liquidity, false)?,
    ))
}

/// Largest liquidity the desired amounts can back at the current price,
/// together with the amounts that liquidity actually consumes.
///
/// The returned amounts never exceed the desired ones.
pub fn liquidity_for_amounts(
    sqrt_current_x96: U256,
    sqrt_lower_x96: U256,
    sqrt_upper_x96: U256,
    amount0_desired: U256,
    amount1_desired: U256,
) -> Result<LiquidityQuote> {
    let liquidity = get_liquidity_for_amounts(
        sqrt_current_x96,
        sqrt_lower_x96,
        sqrt_upper_x96,
        amount0_desired,
        amount1_desired,
    )?;
    let (amount0, amount1) =
        get_amounts_for_liquidity(sqrt_current_x96, sqrt_lower_x96, sqrt_upper_x96, liquidity)?;

    Ok(LiquidityQuote {
        liquidity,
        amount0,
        amount1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tick_math::get_sqrt_ratio_at_tick;

    fn u(value: u128) -> U256 {
        U256::from(value)
    }

    fn sqrt(tick: i32) -> U256 {
        get_sqrt_ratio_at_tick(tick).unwrap()
    }

    const ONE_E18: u128 = 1_000_000_000_000_000_000;

    // === amounts_for_liquidity tests ===

    #[test]
    fn test_amounts_for_liquidity_doubling_price() {
        assert_eq!(
            amounts_for_liquidity(Q96, Q96 * u(2), 1_000_000),
            Ok((u(500_000), u(1_000_000)))
        );
    }

    #[test]
    fn test_amounts_for_liquidity_order_independent() {
        assert_eq!(
            amounts_for_liquidity(sqrt(600), sqrt(-600), ONE_E18),
            amounts_for_liquidity(sqrt(-600), sqrt(600), ONE_E18)
        );
    }

    #[test]
    fn test_amounts_for_liquidity_degenerate_interval() {
        assert_eq!(
            amounts_for_liquidity(Q96, Q96, 1),
            Err(MathError::DivisionByZero)
        );
        assert_eq!(
            amounts_for_liquidity(U256::ZERO, Q96, 1),
            Err(MathError::DivisionByZero)
        );
    }

    // === get_liquidity_for_amounts tests ===

    #[test]
    fn test_get_liquidity_for_amounts_in_range() {
        let liquidity =
            get_liquidity_for_amounts(sqrt(0), sqrt(-600), sqrt(600), u(ONE_E18), u(ONE_E18));
        assert_eq!(liquidity, Ok(33_837_499_809_738_371_427));
    }

    #[test]
    fn test_get_liquidity_for_amounts_below_range() {
        // Current price below range - only token0 matters
        let liquidity =
            get_liquidity_for_amounts(sqrt(-1200), sqrt(-600), sqrt(600), u(ONE_E18), U256::ZERO)
                .unwrap();
        assert!(liquidity > 0);

        let liquidity_with_token1 =
            get_liquidity_for_amounts(sqrt(-1200), sqrt(-600), sqrt(600), u(ONE_E18), u(ONE_E18))
                .unwrap();
        assert_eq!(liquidity, liquidity_with_token1);
    }

    #[test]
    fn test_get_liquidity_for_amounts_above_range() {
        // Current price above range - only token1 matters
        let liquidity =
            get_liquidity_for_amounts(sqrt(1200), sqrt(-600), sqrt(600), U256::ZERO, u(ONE_E18))
                .unwrap();
        assert!(liquidity > 0);

        let liquidity_with_token0 =
            get_liquidity_for_amounts(sqrt(1200), sqrt(-600), sqrt(600), u(ONE_E18), u(ONE_E18))
                .unwrap();
        assert_eq!(liquidity, liquidity_with_token0);
    }

    #[test]
    fn test_get_liquidity_for_amounts_at_boundaries() {
        // At the lower boundary the position is all token0, at the upper all token1
        let at_lower =
            get_liquidity_for_amounts(sqrt(-600), sqrt(-600), sqrt(600), u(ONE_E18), U256::ZERO);
        assert!(at_lower.unwrap() > 0);
        let at_upper =
            get_liquidity_for_amounts(sqrt(600), sqrt(-600), sqrt(600), U256::ZERO, u(ONE_E18));
        assert!(at_upper.unwrap() > 0);
    }

    #[test]
    fn test_get_liquidity_for_amounts_degenerate_interval() {
        assert_eq!(
            get_liquidity_for_amounts(sqrt(0), sqrt(60), sqrt(60), u(1), u(1)),
            Err(MathError::DivisionByZero)
        );
    }

    #[test]
    fn test_get_liquidity_overflow() {
        // A tiny interval needs enormous liquidity to hold this much token1
        assert_eq!(
            get_liquidity_for_amount1(sqrt(0), sqrt(1), U256::MAX >> 1),
            Err(MathError::ArithmeticOverflow)
        );
    }

    #[test]
    fn test_wider_range_less_liquidity() {
        let narrow =
            get_liquidity_for_amounts(sqrt(0), sqrt(-60), sqrt(60), u(ONE_E18), u(ONE_E18))
                .unwrap();
        let wide =
            get_liquidity_for_amounts(sqrt(0), sqrt(-6000), sqrt(6000), u(ONE_E18), u(ONE_E18))
                .unwrap();
        assert!(narrow > wide, "narrow range should provide more liquidity");
    }

    // === get_amounts_for_liquidity tests ===

    #[test]
    fn test_get_amounts_for_liquidity_regimes() {
        let (lower, upper) = (sqrt(-600), sqrt(600));

        let in_range = get_amounts_for_liquidity(sqrt(0), lower, upper, ONE_E18).unwrap();
        assert_eq!(in_range, (u(29_553_010_879_137_169), u(29_553_010_879_137_169)));

        let below = get_amounts_for_liquidity(sqrt(-601), lower, upper, ONE_E18).unwrap();
        assert_eq!(below, (u(60_005_999_255_049_926), U256::ZERO));

        let above = get_amounts_for_liquidity(sqrt(600), lower, upper, ONE_E18).unwrap();
        assert_eq!(above, (U256::ZERO, u(60_005_999_255_049_926)));
    }

    // === liquidity_for_amounts tests ===

    #[test]
    fn test_liquidity_for_amounts_recomputes_amounts() {
        let quote =
            liquidity_for_amounts(sqrt(0), sqrt(-600), sqrt(600), u(ONE_E18), u(ONE_E18))
                .unwrap();
        assert_eq!(quote.liquidity, 33_837_499_809_738_371_427);
        assert_eq!(quote.amount0, u(ONE_E18 - 1));
        assert_eq!(quote.amount1, u(ONE_E18 - 1));
    }

    #[test]
    fn test_liquidity_for_amounts_single_sided() {
        let below =
            liquidity_for_amounts(sqrt(-1200), sqrt(-600), sqrt(600), u(ONE_E18), u(ONE_E18))
                .unwrap();
        assert_eq!(below.amount1, U256::ZERO);
        assert!(below.amount0 <= u(ONE_E18));

        let above =
            liquidity_for_amounts(sqrt(1200), sqrt(-600), sqrt(600), u(ONE_E18), u(ONE_E18))
                .unwrap();
        assert_eq!(above.amount0, U256::ZERO);
        assert!(above.amount1 <= u(ONE_E18));
    }

    #[test]
    fn test_liquidity_for_amounts_imbalanced_desired() {
        // token1 is the binding side, token0 is only partially used
        let quote =
            liquidity_for_amounts(sqrt(0), sqrt(-600), sqrt(600), u(ONE_E18), u(ONE_E18 / 10))
                .unwrap();
        assert!(quote.amount0 < u(ONE_E18 / 5));
        assert!(quote.amount1 <= u(ONE_E18 / 10));
    }
}
