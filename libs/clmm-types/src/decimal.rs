//! Decimal-string codec for integers wider than a JSON number can carry.
//!
//! Values serialize as base-10 strings. Deserialization accepts a base-10
//! string, a `0x`-prefixed hex string, or a plain JSON number that fits in
//! `u64`.

use ruint::aliases::U256;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Text(String),
    Number(u64),
}

/// Parse a base-10 or `0x`-prefixed hex string into a `U256`
pub fn parse_u256(text: &str) -> Result<U256, String> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => U256::from_str_radix(hex, 16),
        None => U256::from_str_radix(text, 10),
    };
    parsed.map_err(|e| format!("invalid 256-bit integer {text:?}: {e}"))
}

/// Parse a base-10 or `0x`-prefixed hex string into a `u128`
pub fn parse_u128(text: &str) -> Result<u128, String> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u128::from_str_radix(hex, 16),
        None => text.parse::<u128>(),
    };
    parsed.map_err(|e| format!("invalid 128-bit integer {text:?}: {e}"))
}

pub mod u256_str {
    use super::{parse_u256, Raw};
    use ruint::aliases::U256;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Text(text) => parse_u256(&text).map_err(de::Error::custom),
            Raw::Number(n) => Ok(U256::from(n)),
        }
    }
}

pub mod u128_str {
    use super::{parse_u128, Raw};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Text(text) => parse_u128(&text).map_err(de::Error::custom),
            Raw::Number(n) => Ok(u128::from(n)),
        }
    }
}
