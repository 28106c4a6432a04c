//! # CLMM Liquidity
//!
//! Concentrated-liquidity math for Uniswap v3 style pools, with an adapter
//! that reads live pool data from the Uniswap v3 subgraph.
//!
//! The engine converts between the four ways of describing a position:
//!
//! - **Ticks**: the discrete price index, `price = 1.0001^tick`.
//! - **Prices and square-root prices**: the coordinate the formulas use.
//! - **Liquidity** `L`: the depth of a position inside its range.
//! - **Token amounts**: the real reserves (`x` base, `y` quote) a position
//!   holds at the current price.
//!
//! Given any consistent subset (liquidity and range, amounts and range,
//! amounts and one bound) it derives the rest. Per-tick `liquidityNet`
//! values aggregate into the liquidity of every tick range.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `subgraph` | yes | Blocking HTTP transport ([`UreqTransport`](subgraph::UreqTransport)) |
//!
//! Without `subgraph` the crate has no network dependency; the
//! [`SubgraphClient`](subgraph::SubgraphClient) still works over any
//! [`GraphqlTransport`](traits::GraphqlTransport).
//!
//! # Quick Start
//!
//! ## Amounts of a position
//!
//! Deposit 2 ETH at 2000 USDC/ETH into the range `[1500, 2500]`; how much
//! USDC must go with it?
//!
//! ```rust
//! use clmm_liquidity::prelude::*;
//!
//! let price = Price::new(2000.0)?;
//! let range = PriceRange::from_f64(1500.0, 2500.0)?;
//!
//! let l = liquidity_for_base(2.0, &range, price)?;
//! let amounts = amounts_for_liquidity(l, &range, price)?;
//!
//! assert!((amounts.base() - 2.0).abs() < 1e-9);
//! assert!((amounts.quote() - 5076.10).abs() < 0.01);
//! # Ok::<(), DomainError>(())
//! ```
//!
//! ## Solving for a range bound
//!
//! ```rust
//! use clmm_liquidity::prelude::*;
//!
//! let lower = lower_bound_for_amounts(2.0, 4000.0, Price::new(2000.0)?, Price::new(3000.0)?)?;
//! assert!((lower.get() - 1333.33).abs() < 0.01);
//! # Ok::<(), DomainError>(())
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Validated value types: [`Price`](domain::Price), [`Tick`](domain::Tick), [`PriceRange`](domain::PriceRange), [`Liquidity`](domain::Liquidity), [`Position`](domain::Position), etc. |
//! | [`math`] | Tick math, amount and liquidity formulas, bound solvers, liquidity distribution |
//! | [`analytics`] | Position summaries, current-range reserves, fee-implied volatility |
//! | [`subgraph`] | Typed subgraph queries and records |
//! | [`traits`] | [`GraphqlTransport`](traits::GraphqlTransport) seam for the subgraph client |
//! | [`config`] | TOML configuration: tick base and subgraph connection |
//! | [`error`] | [`DomainError`](error::DomainError) for numeric preconditions |
//! | [`prelude`] | Convenience re-exports for common types and functions |

pub mod analytics;
pub mod config;
pub mod domain;
pub mod error;
pub mod math;
pub mod prelude;
pub mod subgraph;
pub mod traits;
