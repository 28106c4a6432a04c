//! Typed records parsed from subgraph responses.
//!
//! The subgraph encodes `BigInt` and `BigDecimal` fields as decimal
//! strings. Each record is deserialized into a private raw shape first and
//! then converted field by field, so a bad value is reported with the name
//! of the field it came from.

use core::str::FromStr;

use serde::Deserialize;

use super::SubgraphError;
use crate::domain::{
    adjust_price, Decimals, FeeTier, Liquidity, Position, Price, PriceRange, SqrtPrice, Tick,
    TickLiquidityDelta, TickRange,
};
use crate::error::DomainError;
use crate::math::TickMath;

fn parse<T: FromStr>(field: &'static str, raw: &str) -> Result<T, SubgraphError> {
    raw.trim().parse().map_err(|_| SubgraphError::Parse {
        field,
        value: raw.to_string(),
    })
}

fn parse_tick(field: &'static str, raw: &str) -> Result<Tick, SubgraphError> {
    Ok(Tick::new(parse(field, raw)?)?)
}

fn parse_decimals(raw: &str) -> Result<Decimals, SubgraphError> {
    Ok(Decimals::new(parse("decimals", raw)?)?)
}

// ---------------------------------------------------------------------------
// Raw shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(super) struct RawToken {
    symbol: String,
    decimals: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawPool {
    id: String,
    tick: Option<String>,
    sqrt_price: String,
    liquidity: String,
    fee_tier: String,
    token0: RawToken,
    token1: RawToken,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawTick {
    tick_idx: String,
    liquidity_net: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawTickRef {
    tick_idx: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawId {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawPosition {
    id: String,
    liquidity: String,
    tick_lower: RawTickRef,
    tick_upper: RawTickRef,
    #[serde(default)]
    pool: Option<RawId>,
    #[serde(default)]
    token0: Option<RawToken>,
    #[serde(default)]
    token1: Option<RawToken>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawDayVolume {
    date: i64,
    #[serde(rename = "volumeUSD")]
    volume_usd: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawPoolDays {
    pub(super) pool_day_data: Vec<RawDayVolume>,
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Symbol and decimals of one of a pool's tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    symbol: String,
    decimals: Decimals,
}

impl TokenInfo {
    #[must_use]
    pub fn new(symbol: impl Into<String>, decimals: Decimals) -> Self {
        Self {
            symbol: symbol.into(),
            decimals,
        }
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }
}

impl TryFrom<RawToken> for TokenInfo {
    type Error = SubgraphError;

    fn try_from(raw: RawToken) -> Result<Self, Self::Error> {
        Ok(Self {
            decimals: parse_decimals(&raw.decimals)?,
            symbol: raw.symbol,
        })
    }
}

/// Current state of a pool.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolRecord {
    id: String,
    tick: Tick,
    sqrt_price: SqrtPrice,
    liquidity: u128,
    fee_tier: FeeTier,
    token0: TokenInfo,
    token1: TokenInfo,
}

impl PoolRecord {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current tick.
    #[must_use]
    pub const fn tick(&self) -> Tick {
        self.tick
    }

    /// Exact current square-root price, decoded from `sqrtPriceX96`.
    #[must_use]
    pub const fn sqrt_price(&self) -> SqrtPrice {
        self.sqrt_price
    }

    /// Active liquidity in raw units.
    #[must_use]
    pub const fn liquidity_raw(&self) -> u128 {
        self.liquidity
    }

    /// Active liquidity as used by the amount formulas.
    #[must_use]
    pub fn liquidity(&self) -> Liquidity {
        Liquidity::from_raw(self.liquidity)
    }

    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Tick spacing implied by the fee tier.
    #[must_use]
    pub const fn tick_spacing(&self) -> u32 {
        self.fee_tier.tick_spacing()
    }

    /// Base asset (token0).
    #[must_use]
    pub const fn token0(&self) -> &TokenInfo {
        &self.token0
    }

    /// Quote asset (token1).
    #[must_use]
    pub const fn token1(&self) -> &TokenInfo {
        &self.token1
    }

    /// Current raw price (token1 units per token0 unit).
    ///
    /// # Errors
    ///
    /// [`DomainError::NonFinite`] if squaring the square-root price
    /// overflows.
    pub fn price(&self) -> Result<Price, DomainError> {
        self.sqrt_price.to_price()
    }

    /// Current price in whole tokens, scaled by the token decimals.
    ///
    /// # Errors
    ///
    /// Same as [`PoolRecord::price`].
    pub fn human_price(&self) -> Result<Price, DomainError> {
        adjust_price(self.price()?, self.token0.decimals, self.token1.decimals)
    }
}

impl TryFrom<RawPool> for PoolRecord {
    type Error = SubgraphError;

    fn try_from(raw: RawPool) -> Result<Self, Self::Error> {
        let tick = raw.tick.as_deref().ok_or(SubgraphError::Parse {
            field: "tick",
            value: "null".to_string(),
        })?;
        Ok(Self {
            tick: parse_tick("tick", tick)?,
            sqrt_price: SqrtPrice::from_x96_str(&raw.sqrt_price)?,
            liquidity: parse("liquidity", &raw.liquidity)?,
            fee_tier: FeeTier::new(parse("feeTier", &raw.fee_tier)?),
            token0: TokenInfo::try_from(raw.token0)?,
            token1: TokenInfo::try_from(raw.token1)?,
            id: raw.id,
        })
    }
}

impl TryFrom<RawTick> for TickLiquidityDelta {
    type Error = SubgraphError;

    fn try_from(raw: RawTick) -> Result<Self, Self::Error> {
        Ok(Self::new(
            parse_tick("tickIdx", &raw.tick_idx)?,
            parse("liquidityNet", &raw.liquidity_net)?,
        ))
    }
}

/// A liquidity position (an NFT on chain).
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRecord {
    id: String,
    tick_lower: Tick,
    tick_upper: Tick,
    liquidity: u128,
    pool_id: Option<String>,
    tokens: Option<(TokenInfo, TokenInfo)>,
}

impl PositionRecord {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Tick bounds of the position.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidRange`] if the subgraph reported
    /// `tickLower >= tickUpper`.
    pub const fn ticks(&self) -> Result<TickRange, DomainError> {
        TickRange::new(self.tick_lower, self.tick_upper)
    }

    #[must_use]
    pub const fn tick_lower(&self) -> Tick {
        self.tick_lower
    }

    #[must_use]
    pub const fn tick_upper(&self) -> Tick {
        self.tick_upper
    }

    /// Liquidity in raw units.
    #[must_use]
    pub const fn liquidity_raw(&self) -> u128 {
        self.liquidity
    }

    /// Pool the position belongs to, when the query asked for it.
    #[must_use]
    pub fn pool_id(&self) -> Option<&str> {
        self.pool_id.as_deref()
    }

    /// Token metadata, when the query asked for it.
    #[must_use]
    pub fn tokens(&self) -> Option<(&TokenInfo, &TokenInfo)> {
        self.tokens.as_ref().map(|(a, b)| (a, b))
    }

    /// The position as a price range with liquidity.
    ///
    /// # Errors
    ///
    /// Invalid ticks or tick-to-price failures.
    pub fn to_position(&self, tick_math: &TickMath) -> Result<Position, DomainError> {
        let ticks = self.ticks()?;
        let range = PriceRange::new(
            tick_math.tick_to_price(ticks.lower())?,
            tick_math.tick_to_price(ticks.upper())?,
        )?;
        Ok(Position::new(Liquidity::from_raw(self.liquidity), range))
    }
}

impl TryFrom<RawPosition> for PositionRecord {
    type Error = SubgraphError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        let tokens = match (raw.token0, raw.token1) {
            (Some(t0), Some(t1)) => Some((TokenInfo::try_from(t0)?, TokenInfo::try_from(t1)?)),
            _ => None,
        };
        Ok(Self {
            tick_lower: parse_tick("tickLower", &raw.tick_lower.tick_idx)?,
            tick_upper: parse_tick("tickUpper", &raw.tick_upper.tick_idx)?,
            liquidity: parse("liquidity", &raw.liquidity)?,
            pool_id: raw.pool.map(|p| p.id),
            tokens,
            id: raw.id,
        })
    }
}

/// Trading volume of one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayVolume {
    date: i64,
    volume_usd: f64,
}

impl DayVolume {
    #[must_use]
    pub const fn new(date: i64, volume_usd: f64) -> Self {
        Self { date, volume_usd }
    }

    /// Start of the day, in Unix seconds.
    #[must_use]
    pub const fn date(&self) -> i64 {
        self.date
    }

    /// Volume in USD.
    #[must_use]
    pub const fn volume_usd(&self) -> f64 {
        self.volume_usd
    }
}

impl TryFrom<RawDayVolume> for DayVolume {
    type Error = SubgraphError;

    fn try_from(raw: RawDayVolume) -> Result<Self, Self::Error> {
        let volume_usd: f64 = parse("volumeUSD", &raw.volume_usd)?;
        if !volume_usd.is_finite() {
            return Err(SubgraphError::Parse {
                field: "volumeUSD",
                value: raw.volume_usd,
            });
        }
        Ok(Self::new(raw.date, volume_usd))
    }
}
