//! Per-position summary combining holdings, uncollected fees and the pool price.

use clmm_types::{PoolSnapshot, PositionSnapshot, U256};
use serde::Serialize;

use crate::error::{MathError, Result};
use crate::fee_growth::{fee_growth_inside_pair, uncollected_fees};
use crate::position::{compute_holdings, PriceRegime};
use crate::price::Price;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportOptions {
    /// Fractional digits of the rendered price
    pub decimal_places: u32,
    pub include_price: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            decimal_places: 18,
            include_price: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PositionReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<String>,
    pub regime: PriceRegime,
    pub in_range: bool,
    /// Principal only; tokens owed are reported under the fees
    #[serde(with = "clmm_types::serde_decimal::u256")]
    pub token0_amount: U256,
    #[serde(with = "clmm_types::serde_decimal::u256")]
    pub token1_amount: U256,
    #[serde(with = "clmm_types::serde_decimal::u256")]
    pub fees0: U256,
    #[serde(with = "clmm_types::serde_decimal::u256")]
    pub fees1: U256,
    /// token0 priced in token1, in whole-token units when both decimals are known.
    /// Absent when disabled or when the price overflows 512-bit arithmetic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

/// Evaluate a position with the default [`ReportOptions`]
pub fn evaluate_position(
    position: &PositionSnapshot,
    pool: &PoolSnapshot,
) -> Result<PositionReport> {
    evaluate_position_with(position, pool, &ReportOptions::default())
}

pub fn evaluate_position_with(
    position: &PositionSnapshot,
    pool: &PoolSnapshot,
    options: &ReportOptions,
) -> Result<PositionReport> {
    let holdings = compute_holdings(
        position.liquidity,
        position.tick_lower,
        position.tick_upper,
        pool.tick,
        pool.sqrt_price_x96,
        0,
        0,
    )?;

    let lower = pool
        .tick_info(position.tick_lower)
        .ok_or(MathError::MissingTick(position.tick_lower))?;
    let upper = pool
        .tick_info(position.tick_upper)
        .ok_or(MathError::MissingTick(position.tick_upper))?;

    let (inside0, inside1) =
        fee_growth_inside_pair(pool, lower, upper, position.tick_lower, position.tick_upper);
    let fees0 = uncollected_fees(
        position.liquidity,
        inside0,
        position.fee_growth_inside_0_last_x128,
        position.tokens_owed_0,
    )?;
    let fees1 = uncollected_fees(
        position.liquidity,
        inside1,
        position.fee_growth_inside_1_last_x128,
        position.tokens_owed_1,
    )?;

    // A price that cannot be rendered is left out; holdings and fees still stand
    let price = if options.include_price {
        render_price(pool, options.decimal_places).ok()
    } else {
        None
    };

    Ok(PositionReport {
        id: position.id.clone(),
        pool: position.pool.clone(),
        regime: holdings.regime,
        in_range: holdings.in_range,
        token0_amount: holdings.token0_amount,
        token1_amount: holdings.token1_amount,
        fees0,
        fees1,
        price,
    })
}

fn render_price(pool: &PoolSnapshot, decimal_places: u32) -> Result<String> {
    let mut price = Price::from_sqrt_ratio_x96(pool.sqrt_price_x96)?;
    if let (Some(token0), Some(token1)) = (pool.token0_decimals, pool.token1_decimals) {
        price = price.scale_decimals(token0, token1)?;
    }
    price.to_decimal_string(decimal_places)
}
