use std::collections::BTreeMap;

use ruint::aliases::U256;
use serde::{Deserialize, Serialize};

use crate::TickSnapshot;

/// Pool state as read from `slot0()`, the global fee accumulators and the
/// `ticks()` entries of the boundaries the caller cares about
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// Current sqrt(price) as Q64.96
    #[serde(with = "crate::serde_decimal::u256")]
    pub sqrt_price_x96: U256,
    /// Current tick index
    pub tick: i32,
    /// Liquidity currently in range. Carried through for callers; position
    /// amounts and fees depend only on the position's own liquidity.
    #[serde(with = "crate::serde_decimal::u128", default)]
    pub liquidity: u128,
    /// Fee growth global for token0 (Q128.128)
    #[serde(with = "crate::serde_decimal::u256", default)]
    pub fee_growth_global_0_x128: U256,
    /// Fee growth global for token1 (Q128.128)
    #[serde(with = "crate::serde_decimal::u256", default)]
    pub fee_growth_global_1_x128: U256,
    /// Boundary ticks keyed by tick index
    #[serde(default)]
    pub ticks: BTreeMap<i32, TickSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token0_decimals: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token1_decimals: Option<u8>,
}

impl PoolSnapshot {
    pub fn new(sqrt_price_x96: U256, tick: i32) -> Self {
        Self {
            sqrt_price_x96,
            tick,
            liquidity: 0,
            fee_growth_global_0_x128: U256::ZERO,
            fee_growth_global_1_x128: U256::ZERO,
            ticks: BTreeMap::new(),
            token0_decimals: None,
            token1_decimals: None,
        }
    }

    pub fn with_fee_growth_global(mut self, token0: U256, token1: U256) -> Self {
        self.fee_growth_global_0_x128 = token0;
        self.fee_growth_global_1_x128 = token1;
        self
    }

    pub fn with_tick(mut self, tick: i32, info: TickSnapshot) -> Self {
        self.ticks.insert(tick, info);
        self
    }

    pub fn with_decimals(mut self, token0: u8, token1: u8) -> Self {
        self.token0_decimals = Some(token0);
        self.token1_decimals = Some(token1);
        self
    }

    pub fn tick_info(&self, tick: i32) -> Option<&TickSnapshot> {
        self.ticks.get(&tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Q96;

    #[test]
    fn test_pool_snapshot_json_uses_decimal_strings() {
        let pool = PoolSnapshot::new(Q96, 0)
            .with_fee_growth_global(U256::MAX, U256::from(7u64))
            .with_tick(-60, TickSnapshot::new(U256::from(1u64), U256::ZERO));

        let json = serde_json::to_value(&pool).unwrap();
        assert_eq!(json["sqrt_price_x96"], "79228162514264337593543950336");
        assert_eq!(
            json["fee_growth_global_0_x128"],
            "115792089237316195423570985008687907853269984665640564039457584007913129639935"
        );
        assert_eq!(json["ticks"]["-60"]["fee_growth_outside_0_x128"], "1");
        assert!(json.get("token0_decimals").is_none());

        let back: PoolSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, pool);
    }

    #[test]
    fn test_pool_snapshot_accepts_numbers_and_hex() {
        let json = r#"{
            "sqrt_price_x96": "0x1000000000000000000000000",
            "tick": 0,
            "liquidity": 1000,
            "fee_growth_global_0_x128": 5
        }"#;
        let pool: PoolSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(pool.sqrt_price_x96, Q96);
        assert_eq!(pool.liquidity, 1000);
        assert_eq!(pool.fee_growth_global_0_x128, U256::from(5u64));
        assert_eq!(pool.fee_growth_global_1_x128, U256::ZERO);
        assert!(pool.ticks.is_empty());
    }

    #[test]
    fn test_pool_snapshot_rejects_negative_price() {
        let json = r#"{ "sqrt_price_x96": "-1", "tick": 0 }"#;
        assert!(serde_json::from_str::<PoolSnapshot>(json).is_err());
    }
}
