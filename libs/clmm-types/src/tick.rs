use ruint::aliases::U256;
use serde::{Deserialize, Serialize};

/// Fee growth recorded on an initialized tick boundary
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSnapshot {
    /// Fee growth per unit liquidity on the other side of this tick (token0)
    #[serde(with = "crate::serde_decimal::u256", default)]
    pub fee_growth_outside_0_x128: U256,
    /// Fee growth per unit liquidity on the other side of this tick (token1)
    #[serde(with = "crate::serde_decimal::u256", default)]
    pub fee_growth_outside_1_x128: U256,
}

impl TickSnapshot {
    pub fn new(fee_growth_outside_0_x128: U256, fee_growth_outside_1_x128: U256) -> Self {
        Self {
            fee_growth_outside_0_x128,
            fee_growth_outside_1_x128,
        }
    }
}
