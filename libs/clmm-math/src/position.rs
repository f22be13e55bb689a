use clmm_types::U256;
use serde::{Deserialize, Serialize};

use crate::error::{MathError, Result};
use crate::sqrt_price_math::{get_amount0_delta, get_amount1_delta};
use crate::tick_math::{check_ticks, get_sqrt_ratio_at_tick};

/// Where the current price sits relative to a position's tick range
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceRegime {
    /// current tick < tick_lower: the position holds only token0
    BelowRange,
    /// tick_lower <= current tick < tick_upper: both tokens, earning fees
    InRange,
    /// current tick >= tick_upper: the position holds only token1
    AboveRange,
}

impl PriceRegime {
    pub fn classify(current_tick: i32, tick_lower: i32, tick_upper: i32) -> Self {
        if current_tick < tick_lower {
            PriceRegime::BelowRange
        } else if current_tick < tick_upper {
            PriceRegime::InRange
        } else {
            PriceRegime::AboveRange
        }
    }

    pub fn is_in_range(self) -> bool {
        self == PriceRegime::InRange
    }
}

/// Token amounts a position would receive if fully withdrawn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Holdings {
    pub regime: PriceRegime,
    pub in_range: bool,
    pub token0_amount: U256,
    pub token1_amount: U256,
}

/// Underlying token amounts for `liquidity` over `[tick_lower, tick_upper)`
/// at the current pool state, plus any tokens already owed to the position.
///
/// The regime is decided from `current_tick`, the in-range split from
/// `current_sqrt_price_x96` clamped to the range's sqrt bounds.
pub fn compute_holdings(
    liquidity: u128,
    tick_lower: i32,
    tick_upper: i32,
    current_tick: i32,
    current_sqrt_price_x96: U256,
    tokens_owed_0: u128,
    tokens_owed_1: u128,
) -> Result<Holdings> {
    check_ticks(tick_lower, tick_upper)?;

    let sqrt_lower = get_sqrt_ratio_at_tick(tick_lower)?;
    let sqrt_upper = get_sqrt_ratio_at_tick(tick_upper)?;
    let regime = PriceRegime::classify(current_tick, tick_lower, tick_upper);

    let (amount0, amount1) = match regime {
        PriceRegime::BelowRange => (
            get_amount0_delta(sqrt_lower, sqrt_upper, liquidity, false)?,
            U256::ZERO,
        ),
        PriceRegime::InRange => {
            // A price that disagrees with the tick is held to the range bounds
            let sqrt_current = current_sqrt_price_x96.clamp(sqrt_lower, sqrt_upper);
            (
                get_amount0_delta(sqrt_current, sqrt_upper, liquidity, false)?,
                get_amount1_delta(sqrt_lower, sqrt_current, liquidity, false)?,
            )
        }
        PriceRegime::AboveRange => (
            U256::ZERO,
            get_amount1_delta(sqrt_lower, sqrt_upper, liquidity, false)?,
        ),
    };

    let token0_amount = amount0
        .checked_add(U256::from(tokens_owed_0))
        .ok_or(MathError::ArithmeticOverflow)?;
    let token1_amount = amount1
        .checked_add(U256::from(tokens_owed_1))
        .ok_or(MathError::ArithmeticOverflow)?;

    Ok(Holdings {
        regime,
        in_range: regime.is_in_range(),
        token0_amount,
        token1_amount,
    })
}
