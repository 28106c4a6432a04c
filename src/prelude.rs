//! Convenience re-exports for common types and functions.
//!
//! ```rust
//! use clmm_liquidity::prelude::*;
//! ```

pub use crate::domain::{
    Decimals, FeeTier, Liquidity, Position, Price, PriceRange, SqrtPrice, Tick, TickBase,
    TickLiquidityDelta, TickRange, TokenAmounts,
};

pub use crate::math::{
    amount_deltas, amounts_for_liquidity, liquidity_for_amounts, liquidity_for_base,
    liquidity_for_quote, lower_bound_for_amounts, price_to_tick, tick_to_price,
    upper_bound_for_amounts, LiquidityDistribution, RangeComposition, RangeRatios, TickMath,
};

pub use crate::analytics::{implied_volatility, summarize_positions, PositionSummary};

pub use crate::config::{Config, ConfigError};

pub use crate::error::{DomainError, Result};

pub use crate::subgraph::{SubgraphClient, SubgraphError};

pub use crate::traits::GraphqlTransport;
