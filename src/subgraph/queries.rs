//! GraphQL documents sent to the Uniswap v3 subgraph.

/// Pool state and token metadata. Variables: `pool_id`.
pub const POOL: &str = r"query pool($pool_id: ID!) {
  pools(where: {id: $pool_id}) {
    id
    tick
    sqrtPrice
    liquidity
    feeTier
    token0 { symbol decimals }
    token1 { symbol decimals }
  }
}";

/// One page of initialized ticks. Variables: `pool_id`, `first`, `skip`.
pub const TICKS: &str = r"query ticks($pool_id: String!, $first: Int!, $skip: Int!) {
  ticks(first: $first, skip: $skip, where: {pool: $pool_id}, orderBy: tickIdx) {
    tickIdx
    liquidityNet
  }
}";

/// One page of open positions (nonzero liquidity). Variables: `pool_id`,
/// `first`, `skip`.
pub const POSITIONS: &str = r"query positions($pool_id: String!, $first: Int!, $skip: Int!) {
  positions(first: $first, skip: $skip, where: {pool: $pool_id, liquidity_gt: 0}) {
    id
    liquidity
    tickLower { tickIdx }
    tickUpper { tickIdx }
  }
}";

/// A single position with its pool and tokens. Variables: `position_id`.
pub const POSITION: &str = r"query position($position_id: ID!) {
  positions(where: {id: $position_id}) {
    id
    liquidity
    tickLower { tickIdx }
    tickUpper { tickIdx }
    pool { id }
    token0 { symbol decimals }
    token1 { symbol decimals }
  }
}";

/// Most recent daily volumes, newest first. Variables: `pool_id`, `days`.
pub const POOL_DAY_DATA: &str = r"query pool_day_data($pool_id: ID!, $days: Int!) {
  pools(where: {id: $pool_id}) {
    poolDayData(first: $days, orderBy: date, orderDirection: desc) {
      date
      volumeUSD
    }
  }
}";
