use ruint::aliases::U256;
use serde::{Deserialize, Serialize};

/// Position data as returned by the position manager's `positions()`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    /// Caller-side identifier (token id), echoed back in reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Key of the pool this position belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool: Option<String>,
    /// Lower tick boundary
    pub tick_lower: i32,
    /// Upper tick boundary
    pub tick_upper: i32,
    /// Liquidity amount
    #[serde(with = "crate::serde_decimal::u128")]
    pub liquidity: u128,
    /// Fee growth inside at last action (token0)
    #[serde(with = "crate::serde_decimal::u256", default)]
    pub fee_growth_inside_0_last_x128: U256,
    /// Fee growth inside at last action (token1)
    #[serde(with = "crate::serde_decimal::u256", default)]
    pub fee_growth_inside_1_last_x128: U256,
    /// Tokens owed (token0)
    #[serde(with = "crate::serde_decimal::u128", default)]
    pub tokens_owed_0: u128,
    /// Tokens owed (token1)
    #[serde(with = "crate::serde_decimal::u128", default)]
    pub tokens_owed_1: u128,
}

impl PositionSnapshot {
    pub fn new(tick_lower: i32, tick_upper: i32, liquidity: u128) -> Self {
        Self {
            tick_lower,
            tick_upper,
            liquidity,
            ..Self::default()
        }
    }

    pub fn with_fee_growth_inside_last(mut self, token0: U256, token1: U256) -> Self {
        self.fee_growth_inside_0_last_x128 = token0;
        self.fee_growth_inside_1_last_x128 = token1;
        self
    }

    pub fn with_tokens_owed(mut self, token0: u128, token1: u128) -> Self {
        self.tokens_owed_0 = token0;
        self.tokens_owed_1 = token1;
        self
    }
}
