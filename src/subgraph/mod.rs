//! Uniswap v3 subgraph adapter.
//!
//! Fetches pool state, initialized ticks, positions and daily volumes
//! from The Graph and converts them into engine types. Numbers arrive as
//! decimal strings; each is parsed into the narrowest exact type
//! (`i32` ticks, `u128` liquidity, `i128` `liquidityNet`) before any
//! floating-point math sees it.
//!
//! [`SubgraphClient`] is generic over
//! [`GraphqlTransport`](crate::traits::GraphqlTransport). With the
//! `subgraph` feature, [`UreqTransport`] talks HTTP:
//!
//! ```no_run
//! use clmm_liquidity::config::SubgraphConfig;
//! use clmm_liquidity::math::TickMath;
//! use clmm_liquidity::subgraph::SubgraphClient;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SubgraphConfig::default();
//! let client = SubgraphClient::from_config(&config)?;
//! let pool = client.pool(&config.pool_id)?;
//! let distribution = client.distribution(&config.pool_id, TickMath::UNISWAP_V3)?;
//! assert_eq!(distribution.liquidity_at(pool.tick())?, pool.liquidity_raw());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
pub mod queries;
mod records;
mod response;
#[cfg(feature = "subgraph")]
mod transport;

pub use client::SubgraphClient;
pub use error::SubgraphError;
pub use records::{DayVolume, PoolRecord, PositionRecord, TokenInfo};
pub use response::data_from_envelope;
#[cfg(feature = "subgraph")]
pub use transport::UreqTransport;
