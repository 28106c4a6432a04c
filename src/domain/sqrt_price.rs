//! Square root of a price, the natural coordinate of the `x·y = L²` curve.

use core::fmt;

use super::Price;
use crate::error::{DomainError, Result};

/// `2^96`, the scale of the on-chain Q64.96 `sqrtPriceX96` encoding.
const Q96: f64 = 79_228_162_514_264_337_593_543_950_336.0;

/// Square root of a [`Price`].
///
/// Reserve amounts are linear in `√P` and `1/√P`, so the engine works in
/// this coordinate and only squares back to a [`Price`] at its edges.
///
/// Invariant: strictly positive and finite; `self.to_price() ≈ p` whenever
/// `self` was obtained from `p.sqrt()`.
///
/// # Examples
///
/// ```
/// use clmm_liquidity::domain::SqrtPrice;
///
/// // sqrtPriceX96 of a pool sitting exactly at price 1.0
/// let sp = SqrtPrice::from_x96_str("79228162514264337593543950336").expect("valid");
/// assert!((sp.get() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SqrtPrice(f64);

impl SqrtPrice {
    /// Square root of a 1:1 price.
    pub const ONE: Self = Self(1.0);

    /// Creates a new `SqrtPrice`.
    ///
    /// # Errors
    ///
    /// - [`DomainError::NonFinite`] if `value` is NaN or infinite.
    /// - [`DomainError::NonPositivePrice`] if `value <= 0`.
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(DomainError::NonFinite("sqrt price must be finite"));
        }
        if value <= 0.0 {
            return Err(DomainError::NonPositivePrice(
                "sqrt price must be strictly positive",
            ));
        }
        Ok(Self(value))
    }

    /// Wraps a value already known to be positive and finite.
    pub(crate) const fn from_positive(value: f64) -> Self {
        Self(value)
    }

    /// Decodes an on-chain Q64.96 value: `sqrtPriceX96 / 2^96`.
    ///
    /// # Errors
    ///
    /// Same as [`SqrtPrice::new`] for the decoded value.
    pub fn from_x96(raw: f64) -> Result<Self> {
        Self::new(raw / Q96)
    }

    /// Parses the decimal string form of `sqrtPriceX96`.
    ///
    /// The raw value is a `uint160` and may not fit into `u128`, so it is
    /// parsed straight into `f64`.
    ///
    /// # Errors
    ///
    /// - [`DomainError::NonFinite`] if the string is not a number.
    /// - Same as [`SqrtPrice::new`] for the decoded value.
    pub fn from_x96_str(raw: &str) -> Result<Self> {
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| DomainError::NonFinite("sqrtPriceX96 must be a decimal number"))?;
        Self::from_x96(value)
    }

    /// Returns the underlying `f64` value.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// Squares back to a [`Price`].
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NonFinite`] if the square overflows `f64` or
    /// [`DomainError::NonPositivePrice`] if it underflows to zero.
    pub fn to_price(&self) -> Result<Price> {
        Price::new(self.0 * self.0)
    }

    /// Re-encodes as Q64.96 (`√P · 2^96`), as an `f64`.
    #[must_use]
    pub fn to_x96(&self) -> f64 {
        self.0 * Q96
    }

    /// Returns `self` clamped into `[lower, upper]`.
    #[must_use]
    pub fn clamp(self, lower: Self, upper: Self) -> Self {
        if self.0 < lower.0 {
            lower
        } else if self.0 > upper.0 {
            upper
        } else {
            self
        }
    }
}

impl fmt::Display for SqrtPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
