//! Price and tick ranges of concentrated liquidity positions.

use core::fmt;

use super::tick::validate_spacing;
use super::{Price, SqrtPrice, Tick};
use crate::error::{DomainError, Result};

/// An ordered price interval `[lower, upper]` with `lower < upper`.
///
/// # Examples
///
/// ```
/// use clmm_liquidity::domain::{Price, PriceRange};
///
/// let range = PriceRange::from_f64(1500.0, 2500.0).expect("ordered bounds");
/// assert!(range.contains(Price::new(2000.0).expect("positive")));
/// assert!(PriceRange::from_f64(2500.0, 2500.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    lower: Price,
    upper: Price,
}

impl PriceRange {
    /// Creates a new `PriceRange`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRange`] if `lower >= upper`, or if
    /// the bounds are so close that their square roots coincide in `f64`.
    pub fn new(lower: Price, upper: Price) -> Result<Self> {
        if lower.get() >= upper.get() {
            return Err(DomainError::InvalidRange(
                "lower price must be below upper price",
            ));
        }
        if lower.sqrt() >= upper.sqrt() {
            return Err(DomainError::InvalidRange(
                "range too narrow for distinct square-root bounds",
            ));
        }
        Ok(Self { lower, upper })
    }

    /// Convenience constructor from raw `f64` bounds.
    ///
    /// # Errors
    ///
    /// Same as [`Price::new`] for each bound, then [`PriceRange::new`].
    pub fn from_f64(lower: f64, upper: f64) -> Result<Self> {
        Self::new(Price::new(lower)?, Price::new(upper)?)
    }

    /// Builds a range from two square-root prices.
    ///
    /// # Errors
    ///
    /// Same as [`SqrtPrice::to_price`] for each bound, then
    /// [`PriceRange::new`].
    pub fn from_sqrt(lower: SqrtPrice, upper: SqrtPrice) -> Result<Self> {
        Self::new(lower.to_price()?, upper.to_price()?)
    }

    /// Lower bound `pa`.
    #[must_use]
    pub const fn lower(&self) -> Price {
        self.lower
    }

    /// Upper bound `pb`.
    #[must_use]
    pub const fn upper(&self) -> Price {
        self.upper
    }

    /// `√pa`.
    #[must_use]
    pub fn sqrt_lower(&self) -> SqrtPrice {
        self.lower.sqrt()
    }

    /// `√pb`.
    #[must_use]
    pub fn sqrt_upper(&self) -> SqrtPrice {
        self.upper.sqrt()
    }

    /// Returns `true` if `lower < price < upper` (both ends exclusive, the
    /// boundaries are single-asset states).
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        self.lower.get() < price.get() && price.get() < self.upper.get()
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

/// An ordered tick interval `[lower, upper)` with `lower < upper`.
///
/// # Examples
///
/// ```
/// use clmm_liquidity::domain::{Tick, TickRange};
///
/// let current = Tick::new(-201_937).expect("in range");
/// let range = TickRange::enclosing(current, 60).expect("aligned");
/// assert_eq!(range.lower().get(), -201_960);
/// assert_eq!(range.upper().get(), -201_900);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickRange {
    lower: Tick,
    upper: Tick,
}

impl TickRange {
    /// Creates a new `TickRange`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRange`] if `lower >= upper`.
    pub const fn new(lower: Tick, upper: Tick) -> Result<Self> {
        if lower.get() >= upper.get() {
            return Err(DomainError::InvalidRange(
                "lower tick must be below upper tick",
            ));
        }
        Ok(Self { lower, upper })
    }

    /// The `spacing`-wide range whose lower bound is the greatest multiple
    /// of `spacing` not exceeding `tick`.
    ///
    /// Near the ends of the tick domain the aligned bucket sticks out past
    /// [`Tick::MIN`] or [`Tick::MAX`]; the range is then cut at the domain
    /// edge, so it still contains `tick` but is narrower than `spacing`.
    ///
    /// # Errors
    ///
    /// - [`DomainError::InvalidTickSpacing`] for a zero or oversized
    ///   spacing.
    /// - [`DomainError::InvalidRange`] for `tick == Tick::MAX` when it is
    ///   itself aligned, since no tick lies above it.
    pub fn enclosing(tick: Tick, spacing: u32) -> Result<Self> {
        let spacing = validate_spacing(spacing)?;
        let aligned = tick.get().div_euclid(spacing) * spacing;
        let lower = Tick::new(aligned.max(Tick::MIN.get()))?;
        let upper = Tick::new(aligned.saturating_add(spacing).min(Tick::MAX.get()))?;
        Self::new(lower, upper)
    }

    /// Lower tick (inclusive).
    #[must_use]
    pub const fn lower(&self) -> Tick {
        self.lower
    }

    /// Upper tick (exclusive).
    #[must_use]
    pub const fn upper(&self) -> Tick {
        self.upper
    }

    /// Width of the range in ticks; always positive.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.upper.get() - self.lower.get()
    }

    /// Returns `true` if `lower <= tick < upper`, the on-chain convention
    /// for an active position.
    #[must_use]
    pub const fn contains(&self, tick: Tick) -> bool {
        tick.get() >= self.lower.get() && tick.get() < self.upper.get()
    }
}

impl fmt::Display for TickRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.lower, self.upper)
    }
}
