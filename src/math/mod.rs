//! Concentrated-liquidity math.
//!
//! | Module | Converts |
//! |--------|----------|
//! | `tick_math` | ticks ⇄ prices ⇄ square-root prices |
//! | `amounts` | liquidity → token amounts |
//! | `liquidity` | token amounts → liquidity |
//! | `bounds` | amounts + one bound → the other bound |
//! | `distribution` | per-tick `liquidityNet` → aggregate liquidity |
//!
//! All functions are pure and work on already-validated domain types. The
//! arithmetic is `f64`, except the `liquidityNet` accumulation in
//! [`LiquidityDistribution`], which is exact.

mod amounts;
mod bounds;
mod distribution;
mod liquidity;
mod tick_math;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use amounts::{
    amount_deltas, amounts_for_liquidity, amounts_for_liquidity_sqrt, AmountDeltas,
    RangeComposition,
};
pub use bounds::{
    lower_bound_for_amounts, lower_bound_for_liquidity, lower_ratio_for_amounts,
    upper_bound_for_amounts, upper_bound_for_liquidity, upper_ratio_for_amounts, RangeRatios,
};
pub use distribution::{Direction, LiquidityDistribution, Segments, TickSegment};
pub use liquidity::{
    base_for_quote, liquidity_for_amounts, liquidity_for_base, liquidity_for_quote,
    quote_for_base,
};
pub use tick_math::{
    price_to_sqrt_price, price_to_tick, sqrt_price_to_price, tick_to_price, tick_to_sqrt_price,
    TickMath,
};
