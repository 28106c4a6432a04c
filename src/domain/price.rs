//! Exchange rate between the base and the quote asset.

use core::fmt;

use super::SqrtPrice;
use crate::error::{DomainError, Result};

/// Quote-asset units per one base-asset unit.
///
/// Wraps an `f64` that must be finite and strictly positive: a zero price
/// has no tick and no square root that the liquidity formulas can divide by.
///
/// Prices are compared with `PartialOrd`; construction guarantees there is
/// never a NaN to make the ordering partial in practice.
///
/// # Examples
///
/// ```
/// use clmm_liquidity::domain::Price;
///
/// let price = Price::new(2000.0).expect("positive price");
/// assert!((price.sqrt().get() - 2000f64.sqrt()).abs() < 1e-12);
/// assert!(Price::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    /// Price ratio of 1:1.
    pub const ONE: Self = Self(1.0);

    /// Creates a new `Price`.
    ///
    /// # Errors
    ///
    /// - [`DomainError::NonFinite`] if `value` is NaN or infinite.
    /// - [`DomainError::NonPositivePrice`] if `value <= 0`.
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(DomainError::NonFinite("price must be finite"));
        }
        if value <= 0.0 {
            return Err(DomainError::NonPositivePrice(
                "price must be strictly positive",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the underlying `f64` value.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// Returns the square root of this price.
    ///
    /// Total: the square root of a positive finite number is positive and
    /// finite.
    #[must_use]
    pub fn sqrt(&self) -> SqrtPrice {
        SqrtPrice::from_positive(self.0.sqrt())
    }

    /// Computes the reciprocal price (`1 / self`), i.e. the same rate quoted
    /// the other way round.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NonFinite`] if the reciprocal overflows, which
    /// can only happen for subnormal prices.
    pub fn inverse(&self) -> Result<Self> {
        Self::new(1.0 / self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
