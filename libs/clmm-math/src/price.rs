//! Exact rational prices derived from Q64.96 sqrt prices.
//!
//! `price = sqrt_price_x96^2 / 2^192` is kept as a numerator/denominator
//! pair of 512-bit integers so extreme ticks lose no precision. Rendering to
//! a decimal string truncates and never goes through floating point.

use clmm_types::{U256, U512};

use crate::error::{MathError, Result};
use crate::full_math::widen;

/// Price of token0 denominated in token1, as an exact fraction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Price {
    numerator: U512,
    denominator: U512,
}

fn pow10(exp: u32) -> Result<U512> {
    let ten = U512::from(10u64);
    (0..exp).try_fold(U512::from(1u64), |acc, _| {
        acc.checked_mul(ten).ok_or(MathError::ArithmeticOverflow)
    })
}

impl Price {
    pub fn new(numerator: U512, denominator: U512) -> Result<Self> {
        if denominator.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// `sqrt_price_x96^2 / 2^192`
    pub fn from_sqrt_ratio_x96(sqrt_price_x96: U256) -> Result<Self> {
        if sqrt_price_x96.is_zero() {
            return Err(MathError::SqrtPriceOutOfBounds);
        }
        let sqrt = widen(sqrt_price_x96);
        Self::new(sqrt * sqrt, U512::from(1u64) << 192)
    }

    pub fn numerator(&self) -> U512 {
        self.numerator
    }

    pub fn denominator(&self) -> U512 {
        self.denominator
    }

    /// Price of token1 denominated in token0
    pub fn invert(&self) -> Result<Self> {
        Self::new(self.denominator, self.numerator)
    }

    /// Convert a raw (smallest-unit) price into whole-token units:
    /// `price * 10^token0_decimals / 10^token1_decimals`
    pub fn scale_decimals(&self, token0_decimals: u8, token1_decimals: u8) -> Result<Self> {
        let numerator = self
            .numerator
            .checked_mul(pow10(u32::from(token0_decimals))?)
            .ok_or(MathError::ArithmeticOverflow)?;
        let denominator = self
            .denominator
            .checked_mul(pow10(u32::from(token1_decimals))?)
            .ok_or(MathError::ArithmeticOverflow)?;
        Self::new(numerator, denominator)
    }

    /// Render with exactly `places` fractional digits, truncating
    pub fn to_decimal_string(&self, places: u32) -> Result<String> {
        let integer = self.numerator / self.denominator;
        if places == 0 {
            return Ok(integer.to_string());
        }

        let remainder = self.numerator % self.denominator;
        let fraction = remainder
            .checked_mul(pow10(places)?)
            .ok_or(MathError::ArithmeticOverflow)?
            / self.denominator;

        let digits = fraction.to_string();
        let padding = "0".repeat(places as usize - digits.len());
        Ok(format!("{integer}.{padding}{digits}"))
    }
}
