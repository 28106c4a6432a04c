//! Tick-to-price and price-to-tick conversion.
//!
//! Implements the exponential relationship `price = base^tick` used by
//! Uniswap v3 style pools, together with the square-root coordinate the
//! liquidity formulas work in.
//!
//! # Functions
//!
//! - [`tick_to_price`] computes `1.0001^tick`.
//! - [`price_to_tick`] computes the greatest tick whose price is `<=` the
//!   given [`Price`], up to the snapping tolerance below.
//! - [`tick_to_sqrt_price`], [`price_to_sqrt_price`], [`sqrt_price_to_price`]
//!   move between the price and square-root-price coordinates.
//!
//! The free functions use [`TickBase::UNISWAP_V3`]; [`TickMath`] carries an
//! arbitrary base.
//!
//! # Examples
//!
//! ```
//! use clmm_liquidity::domain::Tick;
//! use clmm_liquidity::math::{price_to_tick, tick_to_price};
//!
//! let tick = Tick::new(-201_937).expect("in range");
//! let price = tick_to_price(tick).expect("valid tick produces valid price");
//! assert_eq!(price_to_tick(price), Ok(tick));
//! ```
//!
//! # Precision
//!
//! `f64` arithmetic (`powf`, `ln`). Raw logarithms within `1e-9` of an
//! integer snap to it, which keeps `tick → price → tick` idempotent over
//! the whole tick domain.

use crate::domain::{Price, SqrtPrice, Tick, TickBase};
use crate::error::{DomainError, Result};

/// Tolerance for snapping a floating-point tick value to the nearest
/// integer before flooring.
const SNAP_EPSILON: f64 = 1e-9;

/// Tick/price conversions for a given [`TickBase`].
///
/// # Examples
///
/// ```
/// use clmm_liquidity::domain::{Price, TickBase};
/// use clmm_liquidity::math::TickMath;
///
/// let math = TickMath::new(TickBase::new(1.001).expect("valid base"));
/// let tick = math.price_to_tick(Price::new(2.0).expect("positive")).expect("in range");
/// assert_eq!(tick.get(), 693);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickMath {
    base: TickBase,
}

impl TickMath {
    /// Conversions with the Uniswap v3 base `1.0001`.
    pub const UNISWAP_V3: Self = Self {
        base: TickBase::UNISWAP_V3,
    };

    /// Creates conversions for a custom base.
    #[must_use]
    pub const fn new(base: TickBase) -> Self {
        Self { base }
    }

    /// The base in use.
    #[must_use]
    pub const fn base(&self) -> TickBase {
        self.base
    }

    /// Computes `base^tick`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NonFinite`] or
    /// [`DomainError::NonPositivePrice`] if the power leaves the `f64`
    /// range. This cannot happen for the Uniswap base over valid ticks, but
    /// can for larger custom bases.
    pub fn tick_to_price(&self, tick: Tick) -> Result<Price> {
        Price::new(self.base.get().powf(f64::from(tick.get())))
    }

    /// Computes `base^(tick / 2)`, the square root of the tick's price.
    ///
    /// # Errors
    ///
    /// Same conditions as [`TickMath::tick_to_price`].
    pub fn tick_to_sqrt_price(&self, tick: Tick) -> Result<SqrtPrice> {
        SqrtPrice::new(self.base.get().powf(f64::from(tick.get()) / 2.0))
    }

    /// Computes the greatest tick whose price is `<=` the given price:
    /// `floor(log_base(price))`, snapped to the nearest integer within
    /// `1e-9`.
    ///
    /// The snap is not a strict floor. A price less than `1e-9` ticks
    /// below a tick's price (about `1e-13` relative for base `1.0001`)
    /// maps to that tick, not the one beneath it. This absorbs the
    /// rounding of [`TickMath::tick_to_price`], so `tick → price → tick`
    /// is exact.
    ///
    /// A non-positive price cannot be represented by [`Price`]; the
    /// `DomainError` for it is raised when the `Price` is built.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTick`] if the tick falls outside
    /// `[-887272, 887272]`.
    pub fn price_to_tick(&self, price: Price) -> Result<Tick> {
        let raw = price.get().ln() / self.base.ln();

        let rounded = raw.round();
        let tick_f64 = if (raw - rounded).abs() < SNAP_EPSILON {
            rounded
        } else {
            raw.floor()
        };

        if !tick_f64.is_finite() {
            return Err(DomainError::InvalidTick(
                "price produces non-finite tick value",
            ));
        }

        // Saturating cast; out-of-range values are rejected by Tick::new.
        #[allow(clippy::cast_possible_truncation)]
        let tick_i32 = tick_f64 as i32;
        Tick::new(tick_i32)
    }

    /// Same as [`TickMath::price_to_tick`] for a square-root price.
    ///
    /// # Errors
    ///
    /// Same as [`SqrtPrice::to_price`] and [`TickMath::price_to_tick`].
    pub fn sqrt_price_to_tick(&self, sqrt_price: SqrtPrice) -> Result<Tick> {
        self.price_to_tick(sqrt_price.to_price()?)
    }
}

/// Computes `1.0001^tick`.
///
/// # Errors
///
/// See [`TickMath::tick_to_price`]; never fails for a valid [`Tick`].
pub fn tick_to_price(tick: Tick) -> Result<Price> {
    TickMath::UNISWAP_V3.tick_to_price(tick)
}

/// Computes `1.0001^(tick / 2)`.
///
/// # Errors
///
/// See [`TickMath::tick_to_sqrt_price`]; never fails for a valid [`Tick`].
pub fn tick_to_sqrt_price(tick: Tick) -> Result<SqrtPrice> {
    TickMath::UNISWAP_V3.tick_to_sqrt_price(tick)
}

/// Computes the greatest Uniswap v3 tick whose price is `<=` `price`,
/// with prices less than `1e-9` ticks below a tick snapping up to it.
///
/// # Errors
///
/// See [`TickMath::price_to_tick`].
pub fn price_to_tick(price: Price) -> Result<Tick> {
    TickMath::UNISWAP_V3.price_to_tick(price)
}

/// Square root of a price.
#[must_use]
pub fn price_to_sqrt_price(price: Price) -> SqrtPrice {
    price.sqrt()
}

/// Square of a square-root price.
///
/// # Errors
///
/// See [`SqrtPrice::to_price`].
pub fn sqrt_price_to_price(sqrt_price: SqrtPrice) -> Result<Price> {
    sqrt_price.to_price()
}
