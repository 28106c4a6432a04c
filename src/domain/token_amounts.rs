//! Reserve amounts of both assets held by a position or a range.

use core::fmt;
use core::ops::Add;

use crate::error::{DomainError, Result};

/// Amounts of the base asset (`x`, token0) and the quote asset (`y`,
/// token1).
///
/// Both amounts are nonnegative and finite. They are expressed in whatever
/// unit the caller used for prices and liquidity, typically raw on-chain
/// units; see [`Decimals`](super::Decimals) for human-readable scaling.
///
/// # Examples
///
/// ```
/// use clmm_liquidity::domain::TokenAmounts;
///
/// let a = TokenAmounts::new(2.0, 4_000.0).expect("nonnegative");
/// let total = a + TokenAmounts::base_only(1.0).expect("nonnegative");
/// assert!((total.base() - 3.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TokenAmounts {
    base: f64,
    quote: f64,
}

impl TokenAmounts {
    /// No tokens at all.
    pub const ZERO: Self = Self {
        base: 0.0,
        quote: 0.0,
    };

    /// Creates a new pair of amounts.
    ///
    /// # Errors
    ///
    /// - [`DomainError::NonFinite`] if either amount is NaN or infinite.
    /// - [`DomainError::NegativeAmount`] if either amount is negative.
    pub fn new(base: f64, quote: f64) -> Result<Self> {
        Ok(Self {
            base: check_amount(base, "base amount must be nonnegative")?,
            quote: check_amount(quote, "quote amount must be nonnegative")?,
        })
    }

    /// Only the base asset.
    ///
    /// # Errors
    ///
    /// Same as [`TokenAmounts::new`].
    pub fn base_only(base: f64) -> Result<Self> {
        Self::new(base, 0.0)
    }

    /// Only the quote asset.
    ///
    /// # Errors
    ///
    /// Same as [`TokenAmounts::new`].
    pub fn quote_only(quote: f64) -> Result<Self> {
        Self::new(0.0, quote)
    }

    /// Base asset amount `x`.
    #[must_use]
    pub const fn base(&self) -> f64 {
        self.base
    }

    /// Quote asset amount `y`.
    #[must_use]
    pub const fn quote(&self) -> f64 {
        self.quote
    }

    /// Returns `true` if both amounts are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.base == 0.0 && self.quote == 0.0
    }
}

fn check_amount(value: f64, message: &'static str) -> Result<f64> {
    if !value.is_finite() {
        return Err(DomainError::NonFinite("token amount must be finite"));
    }
    if value < 0.0 {
        return Err(DomainError::NegativeAmount(message));
    }
    Ok(value)
}

impl Add for TokenAmounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            base: self.base + rhs.base,
            quote: self.quote + rhs.quote,
        }
    }
}

impl core::iter::Sum for TokenAmounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for TokenAmounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "base={} quote={}", self.base, self.quote)
    }
}
