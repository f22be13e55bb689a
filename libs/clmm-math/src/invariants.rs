// ============================================================================
// SNAPSHOT INVARIANTS
// ============================================================================
//
// Predicates over caller-supplied snapshots. None of them fail: they report
// whether a snapshot is internally consistent so callers can flag stale or
// corrupted data before trusting the derived amounts.
//
// 1. PRICE INVARIANTS
//    - Tick is within the tick domain
//    - Sqrt price is within the representable range
//    - Tick is consistent with sqrt price
//
// 2. POSITION INVARIANTS
//    - tick_lower < tick_upper, both within the tick domain
//    - The pool snapshot carries both boundary ticks
//
// ============================================================================

use clmm_types::{
    PoolSnapshot, PositionSnapshot, MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK, U256,
};
use thiserror::Error;

use crate::tick_math::get_tick_at_sqrt_ratio;

/// A broken snapshot invariant
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    #[error("pool tick {0} outside the tick domain")]
    TickOutOfBounds(i32),

    #[error("pool sqrt price outside [MIN_SQRT_RATIO, MAX_SQRT_RATIO)")]
    PriceOutOfBounds,

    #[error("pool tick {tick} disagrees with sqrt price (implies tick {implied})")]
    TickPriceMismatch { tick: i32, implied: i32 },

    #[error("position range [{lower}, {upper}) is not a valid tick range")]
    InvalidRange { lower: i32, upper: i32 },

    #[error("pool snapshot has no entry for boundary tick {0}")]
    MissingTick(i32),
}

// ============================================================================
// PRICE INVARIANTS
// ============================================================================

/// Invariant: tick is within valid bounds
///
/// Property:
///   MIN_TICK <= tick <= MAX_TICK
pub fn tick_in_bounds(tick: i32) -> bool {
    (MIN_TICK..=MAX_TICK).contains(&tick)
}

/// Invariant: sqrt_price is within valid bounds
///
/// Property:
///   MIN_SQRT_RATIO <= sqrt_price_x96 < MAX_SQRT_RATIO
pub fn price_in_bounds(sqrt_price_x96: U256) -> bool {
    sqrt_price_x96 >= MIN_SQRT_RATIO && sqrt_price_x96 < MAX_SQRT_RATIO
}

/// Invariant: tick is consistent with sqrt price
///
/// Property:
///   |tick - get_tick_at_sqrt_ratio(sqrt_price_x96)| <= 1
///
/// A price outside the representable range is never consistent.
pub fn tick_matches_price(tick: i32, sqrt_price_x96: U256) -> bool {
    match get_tick_at_sqrt_ratio(sqrt_price_x96) {
        Ok(implied) => (i64::from(tick) - i64::from(implied)).abs() <= 1,
        Err(_) => false,
    }
}

// ============================================================================
// POSITION INVARIANTS
// ============================================================================

/// Invariant: tick range is ordered and inside the tick domain
///
/// Property:
///   MIN_TICK <= tick_lower < tick_upper <= MAX_TICK
pub fn range_is_valid(tick_lower: i32, tick_upper: i32) -> bool {
    tick_lower < tick_upper && tick_in_bounds(tick_lower) && tick_in_bounds(tick_upper)
}

// ============================================================================
// SNAPSHOT CHECKS
// ============================================================================

/// Every price invariant the pool snapshot breaks
pub fn check_pool(pool: &PoolSnapshot) -> Vec<Violation> {
    let mut violations = Vec::new();

    if !tick_in_bounds(pool.tick) {
        violations.push(Violation::TickOutOfBounds(pool.tick));
    }

    if !price_in_bounds(pool.sqrt_price_x96) {
        violations.push(Violation::PriceOutOfBounds);
    } else if let Ok(implied) = get_tick_at_sqrt_ratio(pool.sqrt_price_x96) {
        if !tick_matches_price(pool.tick, pool.sqrt_price_x96) {
            violations.push(Violation::TickPriceMismatch {
                tick: pool.tick,
                implied,
            });
        }
    }

    violations
}

/// Every invariant broken by a position evaluated against `pool`
pub fn check_position(position: &PositionSnapshot, pool: &PoolSnapshot) -> Vec<Violation> {
    let mut violations = Vec::new();

    if !range_is_valid(position.tick_lower, position.tick_upper) {
        violations.push(Violation::InvalidRange {
            lower: position.tick_lower,
            upper: position.tick_upper,
        });
    }
    for tick in [position.tick_lower, position.tick_upper] {
        if pool.tick_info(tick).is_none() {
            violations.push(Violation::MissingTick(tick));
        }
    }

    violations
}

// ============================================================================
// TESTS
// ============================================================================
