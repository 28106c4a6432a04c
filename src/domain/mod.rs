//! Fundamental domain value types of the liquidity-math engine.
//!
//! Prices, square-root prices, ticks, ranges, liquidity, token amounts and
//! positions. All types are immutable newtypes with validated constructors,
//! so the formulas in [`math`](crate::math) can rely on their invariants
//! (positive prices, ordered ranges, nonnegative liquidity) without
//! rechecking them.

mod decimals;
mod fee_tier;
mod liquidity;
mod position;
mod price;
mod range;
mod sqrt_price;
mod tick;
mod tick_base;
mod tick_liquidity;
mod token_amounts;

pub use decimals::{adjust_price, Decimals};
pub use fee_tier::FeeTier;
pub use liquidity::Liquidity;
pub use position::Position;
pub use price::Price;
pub use range::{PriceRange, TickRange};
pub use sqrt_price::SqrtPrice;
pub use tick::Tick;
pub use tick_base::TickBase;
pub use tick_liquidity::TickLiquidityDelta;
pub use token_amounts::TokenAmounts;
