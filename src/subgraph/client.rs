//! Typed queries over a [`GraphqlTransport`].

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::queries;
use super::records::{
    DayVolume, PoolRecord, PositionRecord, RawPool, RawPoolDays, RawPosition, RawTick,
};
use super::SubgraphError;
use crate::config::MAX_PAGE_SIZE;
use crate::domain::TickLiquidityDelta;
use crate::math::{LiquidityDistribution, TickMath};
use crate::traits::GraphqlTransport;

#[derive(Debug, Deserialize)]
struct PoolsData<R> {
    pools: Vec<R>,
}

#[derive(Debug, Deserialize)]
struct TicksData {
    ticks: Vec<RawTick>,
}

#[derive(Debug, Deserialize)]
struct PositionsData {
    positions: Vec<RawPosition>,
}

/// Reads pool, tick and position data from a Uniswap v3 subgraph.
///
/// Collections are fetched with `first`/`skip` pagination. A page shorter
/// than the page size ends the walk.
///
/// # Examples
///
/// ```
/// use clmm_liquidity::subgraph::{SubgraphClient, SubgraphError};
/// use clmm_liquidity::traits::GraphqlTransport;
/// use serde_json::{json, Value};
///
/// struct Fixed;
///
/// impl GraphqlTransport for Fixed {
///     fn execute(&self, _query: &str, _variables: &Value) -> Result<Value, SubgraphError> {
///         Ok(json!({"ticks": [
///             {"tickIdx": "-60", "liquidityNet": "1000"},
///             {"tickIdx": "60", "liquidityNet": "-1000"}
///         ]}))
///     }
/// }
///
/// let ticks = SubgraphClient::new(Fixed).ticks("0xpool").expect("canned data");
/// assert_eq!(ticks.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SubgraphClient<T> {
    transport: T,
    page_size: u32,
}

impl<T: GraphqlTransport> SubgraphClient<T> {
    /// Client with the largest page size the subgraph allows.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self {
            transport,
            page_size: MAX_PAGE_SIZE,
        }
    }

    /// Sets the page size, clamped to `1..=1000`.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    fn query<R: DeserializeOwned>(&self, query: &str, variables: &Value) -> Result<R, SubgraphError> {
        let data = self.transport.execute(query, variables)?;
        Ok(serde_json::from_value(data)?)
    }

    /// Fetches every item of a paginated collection.
    fn paginate<R, D, F>(&self, query: &str, pool_id: &str, items: F) -> Result<Vec<R>, SubgraphError>
    where
        D: DeserializeOwned,
        F: Fn(D) -> Vec<R>,
    {
        let mut all = Vec::new();
        let mut skip: u64 = 0;
        loop {
            let variables = json!({
                "pool_id": pool_id,
                "first": self.page_size,
                "skip": skip,
            });
            let page = items(self.query(query, &variables)?);
            let fetched = page.len();
            debug!(pool_id, skip, fetched, "fetched page");
            all.extend(page);
            if fetched < self.page_size as usize {
                return Ok(all);
            }
            skip += u64::from(self.page_size);
        }
    }

    /// Current state of pool `pool_id`.
    ///
    /// # Errors
    ///
    /// [`SubgraphError::NotFound`] if no such pool exists, otherwise any
    /// transport or decoding failure.
    pub fn pool(&self, pool_id: &str) -> Result<PoolRecord, SubgraphError> {
        let pool_id = pool_id.to_lowercase();
        let data: PoolsData<RawPool> = self.query(queries::POOL, &json!({ "pool_id": pool_id }))?;
        let raw = data.pools.into_iter().next().ok_or(SubgraphError::NotFound {
            kind: "pool",
            id: pool_id,
        })?;
        raw.try_into()
    }

    /// All initialized ticks of `pool_id` with their `liquidityNet`, in
    /// ascending tick order.
    ///
    /// # Errors
    ///
    /// Any transport or decoding failure.
    pub fn ticks(&self, pool_id: &str) -> Result<Vec<TickLiquidityDelta>, SubgraphError> {
        let pool_id = pool_id.to_lowercase();
        let raw = self.paginate(queries::TICKS, &pool_id, |data: TicksData| data.ticks)?;
        let mut ticks = raw
            .into_iter()
            .map(TickLiquidityDelta::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        ticks.sort_by_key(TickLiquidityDelta::tick);
        Ok(ticks)
    }

    /// All positions of `pool_id` with nonzero liquidity.
    ///
    /// # Errors
    ///
    /// Any transport or decoding failure.
    pub fn positions(&self, pool_id: &str) -> Result<Vec<PositionRecord>, SubgraphError> {
        let pool_id = pool_id.to_lowercase();
        let raw = self.paginate(queries::POSITIONS, &pool_id, |data: PositionsData| {
            data.positions
        })?;
        raw.into_iter().map(PositionRecord::try_from).collect()
    }

    /// A single position with its pool and token metadata.
    ///
    /// # Errors
    ///
    /// [`SubgraphError::NotFound`] if no such position exists, otherwise
    /// any transport or decoding failure.
    pub fn position(&self, position_id: &str) -> Result<PositionRecord, SubgraphError> {
        let data: PositionsData =
            self.query(queries::POSITION, &json!({ "position_id": position_id }))?;
        let raw = data.positions.into_iter().next().ok_or_else(|| SubgraphError::NotFound {
            kind: "position",
            id: position_id.to_string(),
        })?;
        raw.try_into()
    }

    /// Daily volumes of the last `days` days, newest first.
    ///
    /// # Errors
    ///
    /// [`SubgraphError::NotFound`] if no such pool exists, otherwise any
    /// transport or decoding failure.
    pub fn pool_day_volumes(&self, pool_id: &str, days: u32) -> Result<Vec<DayVolume>, SubgraphError> {
        let pool_id = pool_id.to_lowercase();
        let data: PoolsData<RawPoolDays> = self.query(
            queries::POOL_DAY_DATA,
            &json!({ "pool_id": pool_id, "days": days }),
        )?;
        let pool = data.pools.into_iter().next().ok_or(SubgraphError::NotFound {
            kind: "pool",
            id: pool_id,
        })?;
        pool.pool_day_data.into_iter().map(DayVolume::try_from).collect()
    }

    /// Fetches the ticks of `pool_id` and aggregates them.
    ///
    /// # Errors
    ///
    /// Same as [`SubgraphClient::ticks`], plus
    /// [`DomainError::Overflow`](crate::error::DomainError::Overflow) if
    /// merged deltas overflow.
    pub fn distribution(
        &self,
        pool_id: &str,
        tick_math: TickMath,
    ) -> Result<LiquidityDistribution, SubgraphError> {
        let ticks = self.ticks(pool_id)?;
        Ok(LiquidityDistribution::new(ticks, tick_math)?)
    }
}
