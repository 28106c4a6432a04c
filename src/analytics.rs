//! Pool-level derivations built on the liquidity math.
//!
//! These answer the questions asked of live pool data: how much of each
//! asset the open positions hold, what sits in the tick range around the
//! current price, and what volatility the pool's fee income implies.

use core::fmt;

use crate::domain::{
    FeeTier, Liquidity, Position, Price, SqrtPrice, Tick, TickRange, TokenAmounts,
};
use crate::error::{DomainError, Result};
use crate::math::{amounts_for_liquidity_sqrt, TickMath};

/// Aggregate over a set of positions at one price.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionSummary {
    total: TokenAmounts,
    positions: usize,
    in_range: usize,
    active_liquidity: f64,
}

impl PositionSummary {
    /// Amounts held by all positions together.
    #[must_use]
    pub const fn total(&self) -> TokenAmounts {
        self.total
    }

    /// Number of positions summarized.
    #[must_use]
    pub const fn positions(&self) -> usize {
        self.positions
    }

    /// Number of positions whose range strictly contains the price.
    #[must_use]
    pub const fn in_range(&self) -> usize {
        self.in_range
    }

    /// Summed liquidity of in-range positions. For a complete set of a
    /// pool's positions this is the pool's active liquidity.
    #[must_use]
    pub const fn active_liquidity(&self) -> f64 {
        self.active_liquidity
    }
}

impl fmt::Display for PositionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} positions ({} in range): {}, active liquidity {}",
            self.positions, self.in_range, self.total, self.active_liquidity
        )
    }
}

/// Sums the amounts of `positions` at `price`.
///
/// # Errors
///
/// The first error from [`Position::amounts_at`].
///
/// # Examples
///
/// ```
/// use clmm_liquidity::analytics::summarize_positions;
/// use clmm_liquidity::domain::{Liquidity, Position, Price, PriceRange};
///
/// let make = |l: f64, a: f64, b: f64| {
///     Position::new(
///         Liquidity::new(l).expect("nonnegative"),
///         PriceRange::from_f64(a, b).expect("ordered"),
///     )
/// };
/// let positions = [make(100.0, 1.0, 4.0), make(50.0, 2.0, 9.0), make(10.0, 9.0, 16.0)];
///
/// let summary = summarize_positions(&positions, Price::new(2.25).expect("positive"))
///     .expect("finite");
/// assert_eq!(summary.in_range(), 2);
/// assert!((summary.active_liquidity() - 150.0).abs() < 1e-12);
/// ```
pub fn summarize_positions<'a, I>(positions: I, price: Price) -> Result<PositionSummary>
where
    I: IntoIterator<Item = &'a Position>,
{
    positions
        .into_iter()
        .try_fold(PositionSummary::default(), |mut summary, position| {
            summary.total = summary.total + position.amounts_at(price)?;
            summary.positions += 1;
            if position.is_active(price) {
                summary.in_range += 1;
                summary.active_liquidity += position.liquidity().get();
            }
            Ok(summary)
        })
}

/// Real amounts held by `liquidity` in the `spacing`-wide tick range that
/// contains `current_tick`, at the pool's exact `current_sqrt` price.
///
/// These are the amounts a swap has to absorb before the price leaves the
/// current range.
///
/// # Errors
///
/// - [`DomainError::InvalidTickSpacing`] for a zero or oversized spacing.
/// - [`DomainError::InvalidRange`] at [`Tick::MAX`], where no range lies
///   above the tick.
/// - Tick-to-price failures.
pub fn current_range_amounts(
    liquidity: Liquidity,
    current_tick: Tick,
    current_sqrt: SqrtPrice,
    spacing: u32,
    tick_math: &TickMath,
) -> Result<TokenAmounts> {
    let (sa, sb) = current_range_sqrt(current_tick, spacing, tick_math)?;
    amounts_for_liquidity_sqrt(liquidity, sa, sb, current_sqrt)
}

/// Value of the current tick range expressed entirely in base asset, as if
/// the price sat below it: `L (√pb − √pa) / (√pa √pb)`.
///
/// # Errors
///
/// Same as [`current_range_amounts`].
pub fn current_range_base_equivalent(
    liquidity: Liquidity,
    current_tick: Tick,
    spacing: u32,
    tick_math: &TickMath,
) -> Result<f64> {
    let (sa, sb) = current_range_sqrt(current_tick, spacing, tick_math)?;
    Ok(amounts_for_liquidity_sqrt(liquidity, sa, sb, sa)?.base())
}

fn current_range_sqrt(
    current_tick: Tick,
    spacing: u32,
    tick_math: &TickMath,
) -> Result<(SqrtPrice, SqrtPrice)> {
    let range = TickRange::enclosing(current_tick, spacing)?;
    Ok((
        tick_math.tick_to_sqrt_price(range.lower())?,
        tick_math.tick_to_sqrt_price(range.upper())?,
    ))
}

/// Annualized volatility implied by a day of fee income:
///
/// ```text
/// σ = 2 · fee · √(volume / locked) · √365
/// ```
///
/// `daily_volume` and `locked_value` must be in the same unit. The result
/// is a fraction (`0.5` is 50 %).
///
/// # Errors
///
/// - [`DomainError::ZeroDenominator`] if `locked_value <= 0`.
/// - [`DomainError::NegativeRadicand`] if `daily_volume < 0`.
/// - [`DomainError::NonFinite`] for NaN or infinite inputs.
///
/// # Examples
///
/// ```
/// use clmm_liquidity::analytics::implied_volatility;
/// use clmm_liquidity::domain::FeeTier;
///
/// let iv = implied_volatility(FeeTier::TIER_0_30_PERCENT, 1_000_000.0, 1_000_000.0)
///     .expect("valid inputs");
/// assert!((iv - 0.006 * 365f64.sqrt()).abs() < 1e-12);
/// ```
pub fn implied_volatility(fee_tier: FeeTier, daily_volume: f64, locked_value: f64) -> Result<f64> {
    if !daily_volume.is_finite() || !locked_value.is_finite() {
        return Err(DomainError::NonFinite("volume and locked value must be finite"));
    }
    if locked_value <= 0.0 {
        return Err(DomainError::ZeroDenominator("locked value must be positive"));
    }
    if daily_volume < 0.0 {
        return Err(DomainError::NegativeRadicand("daily volume must be nonnegative"));
    }
    Ok(2.0 * fee_tier.as_fraction() * (daily_volume / locked_value).sqrt() * 365f64.sqrt())
}
