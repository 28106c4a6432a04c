//! Aggregate liquidity reconstructed from per-tick `liquidityNet`.
//!
//! A pool stores, for every initialized tick, the signed change of the
//! active liquidity when the price crosses that tick upward. Summing those
//! deltas from the lowest initialized tick rebuilds the liquidity of every
//! range between adjacent initialized ticks.
//!
//! Accumulation is exact (`i128`): at the pool's current tick the running
//! sum equals the liquidity the pool reports, to the unit.

use core::fmt;
use core::iter::FusedIterator;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use tracing::trace;

use crate::domain::{
    Liquidity, Price, PriceRange, Tick, TickLiquidityDelta, TickRange, TokenAmounts,
};
use crate::error::{DomainError, Result};

use super::amounts::amounts_for_liquidity;
use super::tick_math::TickMath;

/// Direction of a walk over initialized ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Ascending ticks; crossing a tick adds its `liquidityNet`.
    Up,
    /// Descending ticks; crossing a tick subtracts its `liquidityNet`.
    Down,
}

/// The range between two adjacent initialized ticks and the liquidity
/// active across it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSegment {
    ticks: TickRange,
    prices: PriceRange,
    liquidity: u128,
}

impl TickSegment {
    /// Builds a segment over `ticks`, deriving its prices with `tick_math`.
    ///
    /// # Errors
    ///
    /// Propagates tick-to-price failures.
    pub fn new(ticks: TickRange, liquidity: u128, tick_math: &TickMath) -> Result<Self> {
        let prices = PriceRange::new(
            tick_math.tick_to_price(ticks.lower())?,
            tick_math.tick_to_price(ticks.upper())?,
        )?;
        Ok(Self {
            ticks,
            prices,
            liquidity,
        })
    }

    /// Tick bounds `[lower, upper)`.
    #[must_use]
    pub const fn ticks(&self) -> TickRange {
        self.ticks
    }

    /// Lower tick, inclusive.
    #[must_use]
    pub const fn lower(&self) -> Tick {
        self.ticks.lower()
    }

    /// Upper tick, exclusive.
    #[must_use]
    pub const fn upper(&self) -> Tick {
        self.ticks.upper()
    }

    /// Price at the lower tick.
    #[must_use]
    pub const fn lower_price(&self) -> Price {
        self.prices.lower()
    }

    /// Price bounds of the segment.
    #[must_use]
    pub const fn prices(&self) -> PriceRange {
        self.prices
    }

    /// Raw active liquidity across the segment.
    #[must_use]
    pub const fn liquidity(&self) -> u128 {
        self.liquidity
    }

    /// Amounts locked in the segment at the `current` price.
    ///
    /// Segments entirely above the price hold only base asset, those below
    /// hold only quote asset, and the segment containing the price holds
    /// both.
    ///
    /// # Errors
    ///
    /// Same as [`amounts_for_liquidity`].
    pub fn locked_amounts(&self, current: Price) -> Result<TokenAmounts> {
        amounts_for_liquidity(Liquidity::from_raw(self.liquidity), &self.prices, current)
    }

    /// Breaks the segment into pieces at every multiple of `spacing`, each
    /// carrying the same liquidity.
    ///
    /// # Errors
    ///
    /// - [`DomainError::InvalidTickSpacing`] for a zero or oversized
    ///   spacing.
    /// - Tick-to-price failures.
    pub fn split(&self, spacing: u32, tick_math: &TickMath) -> Result<Vec<Self>> {
        let step = match i32::try_from(spacing) {
            Ok(step) if step > 0 => step,
            _ => {
                return Err(DomainError::InvalidTickSpacing(
                    "tick spacing must be between 1 and i32::MAX",
                ))
            }
        };
        let upper = self.upper().get();
        let mut pieces = Vec::new();
        let mut lower = self.lower().get();
        while lower < upper {
            let next = lower
                .div_euclid(step)
                .saturating_add(1)
                .saturating_mul(step)
                .min(upper);
            let ticks = TickRange::new(Tick::new(lower)?, Tick::new(next)?)?;
            pieces.push(Self::new(ticks, self.liquidity, tick_math)?);
            lower = next;
        }
        Ok(pieces)
    }
}

impl fmt::Display for TickSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ticks {} price {} liquidity {}",
            self.ticks,
            self.prices.lower(),
            self.liquidity
        )
    }
}

/// Initialized ticks of a pool, sorted and deduplicated.
///
/// # Examples
///
/// ```
/// use clmm_liquidity::domain::{Tick, TickLiquidityDelta};
/// use clmm_liquidity::math::{LiquidityDistribution, TickMath};
///
/// let deltas = [
///     TickLiquidityDelta::new(Tick::new(-60).expect("valid"), 1_000),
///     TickLiquidityDelta::new(Tick::new(60).expect("valid"), -1_000),
///     TickLiquidityDelta::new(Tick::new(0).expect("valid"), 500),
///     TickLiquidityDelta::new(Tick::new(120).expect("valid"), -500),
/// ];
/// let dist = LiquidityDistribution::new(deltas, TickMath::UNISWAP_V3).expect("no overflow");
///
/// let at_10 = dist.liquidity_at(Tick::new(10).expect("valid")).expect("nonnegative");
/// assert_eq!(at_10, 1_500);
///
/// let liquidities: Vec<u128> = dist
///     .segments_from_lowest()
///     .map(|segment| segment.map(|s| s.liquidity()))
///     .collect::<Result<_, _>>()
///     .expect("nonnegative");
/// assert_eq!(liquidities, vec![1_000, 1_500, 500]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidityDistribution {
    deltas: Vec<TickLiquidityDelta>,
    tick_math: TickMath,
}

impl LiquidityDistribution {
    /// Collects `deltas` into ascending tick order, summing the
    /// `liquidityNet` of repeated ticks.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Overflow`] if summing a repeated tick
    /// overflows `i128`.
    pub fn new<I>(deltas: I, tick_math: TickMath) -> Result<Self>
    where
        I: IntoIterator<Item = TickLiquidityDelta>,
    {
        let mut merged: BTreeMap<Tick, i128> = BTreeMap::new();
        for delta in deltas {
            match merged.entry(delta.tick()) {
                Entry::Vacant(slot) => {
                    slot.insert(delta.liquidity_net());
                }
                Entry::Occupied(mut slot) => {
                    trace!(tick = %delta.tick(), "merging repeated tick");
                    let sum = slot
                        .get()
                        .checked_add(delta.liquidity_net())
                        .ok_or(DomainError::Overflow("merged liquidityNet exceeds i128"))?;
                    slot.insert(sum);
                }
            }
        }
        let deltas = merged
            .into_iter()
            .map(|(tick, net)| TickLiquidityDelta::new(tick, net))
            .collect();
        Ok(Self { deltas, tick_math })
    }

    /// Initialized ticks in ascending order.
    #[must_use]
    pub fn deltas(&self) -> &[TickLiquidityDelta] {
        &self.deltas
    }

    /// Number of distinct initialized ticks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    /// Returns `true` if no tick is initialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Conversions used for segment prices.
    #[must_use]
    pub const fn tick_math(&self) -> &TickMath {
        &self.tick_math
    }

    /// Lowest and highest initialized ticks, if any.
    #[must_use]
    pub fn tick_bounds(&self) -> Option<(Tick, Tick)> {
        Some((self.deltas.first()?.tick(), self.deltas.last()?.tick()))
    }

    /// Active liquidity at `tick`: the sum of every `liquidityNet` at or
    /// below it.
    ///
    /// # Errors
    ///
    /// - [`DomainError::NegativeLiquidity`] if the sum is negative.
    /// - [`DomainError::Overflow`] if it leaves the `i128` range.
    pub fn liquidity_at(&self, tick: Tick) -> Result<u128> {
        let mut total: i128 = 0;
        for delta in self.deltas.iter().take_while(|d| d.tick() <= tick) {
            total = total
                .checked_add(delta.liquidity_net())
                .ok_or(DomainError::Overflow("aggregate liquidity exceeds i128"))?;
        }
        to_unsigned(total)
    }

    /// Walks segments from the one containing `reference`, whose liquidity
    /// is `liquidity` (for the pool's current tick, the pool's reported
    /// liquidity).
    ///
    /// Each call returns a fresh iterator.
    #[must_use]
    pub fn segments_from(&self, reference: Tick, liquidity: u128, direction: Direction) -> Segments<'_> {
        let count = self.deltas.partition_point(|d| d.tick() <= reference);
        let len = self.deltas.len();
        let state = match i128::try_from(liquidity) {
            Ok(liquidity) => State::Walking(liquidity),
            Err(_) => State::Pending(DomainError::Overflow("liquidity exceeds i128")),
        };
        let (cursor, apply) = match direction {
            Direction::Up if count == 0 => (0, true),
            Direction::Up => (count - 1, false),
            Direction::Down if count == len => (len.saturating_sub(1), true),
            Direction::Down => (count, false),
        };
        Segments {
            distribution: self,
            direction,
            cursor,
            apply,
            state,
        }
    }

    /// Walks upward from the lowest initialized tick, starting from zero
    /// liquidity.
    #[must_use]
    pub fn segments_from_lowest(&self) -> Segments<'_> {
        Segments {
            distribution: self,
            direction: Direction::Up,
            cursor: 0,
            apply: true,
            state: State::Walking(0),
        }
    }

    /// Amounts locked across all segments at the `current` price.
    ///
    /// # Errors
    ///
    /// The first error met while walking the segments.
    pub fn total_locked(&self, current: Price) -> Result<TokenAmounts> {
        self.segments_from_lowest()
            .map(|segment| segment?.locked_amounts(current))
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Walking(i128),
    Pending(DomainError),
    Done,
}

/// Lazy walk over [`TickSegment`]s; see
/// [`LiquidityDistribution::segments_from`].
///
/// Yields an error at most once, then ends.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    distribution: &'a LiquidityDistribution,
    direction: Direction,
    /// `Up`: index of the segment's lower tick. `Down`: of its upper tick.
    cursor: usize,
    /// Whether the tick at `cursor` is crossed before the next yield.
    apply: bool,
    state: State,
}

impl Segments<'_> {
    fn step(&mut self, liquidity: i128) -> Option<Result<TickSegment>> {
        let distribution = self.distribution;
        let deltas = &distribution.deltas;
        let (lower_idx, upper_idx, crossed) = match self.direction {
            Direction::Up => (self.cursor, self.cursor.checked_add(1)?, self.cursor),
            Direction::Down => (self.cursor.checked_sub(1)?, self.cursor, self.cursor),
        };
        let lower = deltas.get(lower_idx)?.tick();
        let upper = deltas.get(upper_idx)?.tick();

        let liquidity = if self.apply {
            let net = deltas.get(crossed)?.liquidity_net();
            let next = match self.direction {
                Direction::Up => liquidity.checked_add(net),
                Direction::Down => liquidity.checked_sub(net),
            };
            match next {
                Some(next) => next,
                None => {
                    return Some(Err(DomainError::Overflow(
                        "aggregate liquidity exceeds i128",
                    )))
                }
            }
        } else {
            liquidity
        };
        self.apply = true;
        self.state = State::Walking(liquidity);
        self.cursor = match self.direction {
            Direction::Up => upper_idx,
            Direction::Down => lower_idx,
        };

        let segment = to_unsigned(liquidity).and_then(|l| {
            TickSegment::new(
                TickRange::new(lower, upper)?,
                l,
                &distribution.tick_math,
            )
        });
        Some(segment)
    }
}

impl Iterator for Segments<'_> {
    type Item = Result<TickSegment>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = match self.state {
            State::Done => None,
            State::Pending(err) => Some(Err(err)),
            State::Walking(liquidity) => self.step(liquidity),
        };
        if !matches!(item, Some(Ok(_))) {
            self.state = State::Done;
        }
        item
    }
}

impl FusedIterator for Segments<'_> {}

fn to_unsigned(liquidity: i128) -> Result<u128> {
    u128::try_from(liquidity).map_err(|_| {
        DomainError::NegativeLiquidity("aggregate liquidity became negative while crossing ticks")
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn tick(v: i32) -> Tick {
        let Ok(t) = Tick::new(v) else {
            panic!("valid tick");
        };
        t
    }

    fn delta(t: i32, net: i128) -> TickLiquidityDelta {
        TickLiquidityDelta::new(tick(t), net)
    }

    /// Two overlapping positions: 1000 over [-60, 60) and 500 over [0, 120).
    fn sample() -> LiquidityDistribution {
        let Ok(d) = LiquidityDistribution::new(
            [delta(60, -1_000), delta(-60, 1_000), delta(120, -500), delta(0, 500)],
            TickMath::UNISWAP_V3,
        ) else {
            panic!("expected Ok");
        };
        d
    }

    fn walk(segments: Segments<'_>) -> Vec<(i32, i32, u128)> {
        segments
            .map(|s| {
                let Ok(s) = s else {
                    panic!("expected Ok segment");
                };
                (s.lower().get(), s.upper().get(), s.liquidity())
            })
            .collect()
    }

    // -- Construction -------------------------------------------------------

    #[test]
    fn sorts_ticks() {
        let d = sample();
        let ticks: Vec<i32> = d.deltas().iter().map(|d| d.tick().get()).collect();
        assert_eq!(ticks, vec![-60, 0, 60, 120]);
        assert_eq!(d.tick_bounds(), Some((tick(-60), tick(120))));
    }

    #[test]
    fn merges_repeated_ticks() {
        let Ok(d) = LiquidityDistribution::new(
            [delta(0, 10), delta(0, 5), delta(60, -15)],
            TickMath::UNISWAP_V3,
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(d.len(), 2);
        assert_eq!(d.deltas().first().map(TickLiquidityDelta::liquidity_net), Some(15));
    }

    #[test]
    fn merge_overflow_rejected() {
        let result = LiquidityDistribution::new(
            [delta(0, i128::MAX), delta(0, 1)],
            TickMath::UNISWAP_V3,
        );
        assert!(matches!(result, Err(DomainError::Overflow(_))));
    }

    #[test]
    fn empty_distribution() {
        let Ok(d) = LiquidityDistribution::new([], TickMath::UNISWAP_V3) else {
            panic!("expected Ok");
        };
        assert!(d.is_empty());
        assert_eq!(d.tick_bounds(), None);
        assert_eq!(d.segments_from_lowest().count(), 0);
        assert_eq!(d.liquidity_at(tick(0)), Ok(0));
    }

    // -- liquidity_at -------------------------------------------------------

    #[test]
    fn liquidity_at_sums_deltas_at_or_below() {
        let d = sample();
        assert_eq!(d.liquidity_at(tick(-61)), Ok(0));
        assert_eq!(d.liquidity_at(tick(-60)), Ok(1_000));
        assert_eq!(d.liquidity_at(tick(0)), Ok(1_500));
        assert_eq!(d.liquidity_at(tick(59)), Ok(1_500));
        assert_eq!(d.liquidity_at(tick(60)), Ok(500));
        assert_eq!(d.liquidity_at(tick(887_272)), Ok(0));
    }

    #[test]
    fn liquidity_at_negative_sum_fails() {
        let Ok(d) = LiquidityDistribution::new([delta(0, -5)], TickMath::UNISWAP_V3) else {
            panic!("expected Ok");
        };
        assert!(matches!(
            d.liquidity_at(tick(0)),
            Err(DomainError::NegativeLiquidity(_))
        ));
    }

    // -- Walks --------------------------------------------------------------

    #[test]
    fn walk_from_lowest() {
        assert_eq!(
            walk(sample().segments_from_lowest()),
            vec![(-60, 0, 1_000), (0, 60, 1_500), (60, 120, 500)]
        );
    }

    #[test]
    fn walk_up_from_reference() {
        let d = sample();
        assert_eq!(
            walk(d.segments_from(tick(10), 1_500, Direction::Up)),
            vec![(0, 60, 1_500), (60, 120, 500)]
        );
    }

    #[test]
    fn walk_down_from_reference() {
        let d = sample();
        assert_eq!(
            walk(d.segments_from(tick(10), 1_500, Direction::Down)),
            vec![(0, 60, 1_500), (-60, 0, 1_000)]
        );
    }

    #[test]
    fn walk_from_outside_initialized_ticks() {
        let d = sample();
        assert_eq!(
            walk(d.segments_from(tick(-100), 0, Direction::Up)).len(),
            3
        );
        assert_eq!(
            walk(d.segments_from(tick(-100), 0, Direction::Down)),
            vec![]
        );
        assert_eq!(
            walk(d.segments_from(tick(500), 0, Direction::Down)),
            vec![(60, 120, 500), (0, 60, 1_500), (-60, 0, 1_000)]
        );
        assert_eq!(walk(d.segments_from(tick(500), 0, Direction::Up)), vec![]);
    }

    #[test]
    fn each_walk_is_fresh() {
        let d = sample();
        let first: Vec<_> = walk(d.segments_from_lowest());
        let second: Vec<_> = walk(d.segments_from_lowest());
        assert_eq!(first, second);
    }

    #[test]
    fn negative_aggregate_yields_error_once() {
        let Ok(d) = LiquidityDistribution::new(
            [delta(0, 100), delta(60, -300), delta(120, 200), delta(180, 0)],
            TickMath::UNISWAP_V3,
        ) else {
            panic!("expected Ok");
        };
        let items: Vec<_> = d.segments_from_lowest().collect();
        assert_eq!(items.len(), 2);
        assert!(matches!(items.first(), Some(Ok(_))));
        assert!(matches!(
            items.get(1),
            Some(Err(DomainError::NegativeLiquidity(_)))
        ));
    }

    #[test]
    fn oversized_reference_liquidity_is_overflow() {
        let d = sample();
        let mut walk = d.segments_from(tick(0), u128::MAX, Direction::Up);
        assert!(matches!(walk.next(), Some(Err(DomainError::Overflow(_)))));
        assert!(walk.next().is_none());
    }

    // -- Segments -----------------------------------------------------------

    #[test]
    fn segment_prices_follow_ticks() {
        let Ok(range) = TickRange::new(tick(0), tick(60)) else {
            panic!("valid range");
        };
        let Ok(s) = TickSegment::new(range, 7, &TickMath::UNISWAP_V3) else {
            panic!("expected Ok");
        };
        assert!((s.lower_price().get() - 1.0).abs() < 1e-12);
        assert!((s.prices().upper().get() - 1.0001_f64.powi(60)).abs() < 1e-12);
        assert_eq!(format!("{s}"), "ticks [0, 60) price 1 liquidity 7");
    }

    #[test]
    fn locked_amounts_by_position_of_price() {
        let d = sample();
        let Ok(p) = TickMath::UNISWAP_V3.tick_to_price(tick(30)) else {
            panic!("expected Ok");
        };
        let Ok(segments) = d.segments_from_lowest().collect::<Result<Vec<_>>>() else {
            panic!("expected Ok");
        };
        let amounts: Vec<TokenAmounts> = segments
            .iter()
            .map(|s| {
                let Ok(a) = s.locked_amounts(p) else {
                    panic!("expected Ok");
                };
                a
            })
            .collect();
        let [below, current, above] = amounts.as_slice() else {
            panic!("three segments");
        };
        assert_eq!(below.base(), 0.0);
        assert!(below.quote() > 0.0);
        assert!(current.base() > 0.0 && current.quote() > 0.0);
        assert!(above.base() > 0.0);
        assert_eq!(above.quote(), 0.0);

        let Ok(total) = d.total_locked(p) else {
            panic!("expected Ok");
        };
        let sum: TokenAmounts = amounts.iter().copied().sum();
        assert_eq!(total, sum);
    }

    #[test]
    fn walks_from_above_all_ticks_cover_the_total() {
        let d = sample();
        let reference = tick(200);
        let Ok(p) = TickMath::UNISWAP_V3.tick_to_price(reference) else {
            panic!("expected Ok");
        };
        let Ok(down) = d
            .segments_from(reference, 0, Direction::Down)
            .collect::<Result<Vec<_>>>()
        else {
            panic!("expected Ok");
        };
        let Some(first) = down.first() else {
            panic!("segments below the price");
        };
        assert_eq!((first.lower().get(), first.upper().get(), first.liquidity()), (60, 120, 500));
        assert!(!first.ticks().contains(reference));

        let Ok(up) = d
            .segments_from(reference, 0, Direction::Up)
            .collect::<Result<Vec<_>>>()
        else {
            panic!("expected Ok");
        };
        let mut sum = TokenAmounts::ZERO;
        for segment in up.iter().chain(down.iter().filter(|s| !s.ticks().contains(reference))) {
            let Ok(locked) = segment.locked_amounts(p) else {
                panic!("expected Ok");
            };
            sum = sum + locked;
        }
        let Ok(total) = d.total_locked(p) else {
            panic!("expected Ok");
        };
        assert_eq!(total.base(), 0.0);
        assert!(total.quote() > 0.0);
        assert!((sum.quote() - total.quote()).abs() <= total.quote() * 1e-12);
        assert_eq!(sum.base(), total.base());
    }

    #[test]
    fn split_into_spacing_pieces() {
        let Ok(range) = TickRange::new(tick(-90), tick(60)) else {
            panic!("valid range");
        };
        let Ok(s) = TickSegment::new(range, 9, &TickMath::UNISWAP_V3) else {
            panic!("expected Ok");
        };
        let Ok(pieces) = s.split(60, &TickMath::UNISWAP_V3) else {
            panic!("expected Ok");
        };
        let bounds: Vec<(i32, i32)> = pieces
            .iter()
            .map(|p| (p.lower().get(), p.upper().get()))
            .collect();
        assert_eq!(bounds, vec![(-90, -60), (-60, 0), (0, 60)]);
        assert!(pieces.iter().all(|p| p.liquidity() == 9));
    }

    #[test]
    fn split_rejects_zero_spacing() {
        let Ok(range) = TickRange::new(tick(0), tick(60)) else {
            panic!("valid range");
        };
        let Ok(s) = TickSegment::new(range, 1, &TickMath::UNISWAP_V3) else {
            panic!("expected Ok");
        };
        assert!(matches!(
            s.split(0, &TickMath::UNISWAP_V3),
            Err(DomainError::InvalidTickSpacing(_))
        ));
    }
}
