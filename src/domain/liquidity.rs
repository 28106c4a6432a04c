//! Liquidity units of a position or of an aggregate pool segment.

use core::fmt;
use core::ops::Add;

use crate::error::{DomainError, Result};

/// The depth parameter `L` of the `x·y = L²` curve inside a range.
///
/// Distinct from token amounts: it measures how much the reserves move per
/// unit of `√P`, not a quantity of either asset. Stored as a nonnegative
/// finite `f64`; on-chain integers convert through [`Liquidity::from_raw`].
///
/// # Examples
///
/// ```
/// use clmm_liquidity::domain::Liquidity;
///
/// let a = Liquidity::new(1_000.0).expect("nonnegative");
/// let b = Liquidity::from_raw(2_000);
/// assert!(((a + b).get() - 3_000.0).abs() < f64::EPSILON);
/// assert!(Liquidity::new(-1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Liquidity(f64);

impl Liquidity {
    /// No liquidity.
    pub const ZERO: Self = Self(0.0);

    /// Creates a new `Liquidity`.
    ///
    /// # Errors
    ///
    /// - [`DomainError::NonFinite`] if `value` is NaN or infinite.
    /// - [`DomainError::NegativeLiquidity`] if `value < 0`.
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(DomainError::NonFinite("liquidity must be finite"));
        }
        if value < 0.0 {
            return Err(DomainError::NegativeLiquidity(
                "liquidity must be nonnegative",
            ));
        }
        Ok(Self(value))
    }

    /// Converts an on-chain `uint128` liquidity value.
    ///
    /// Values above `2^53` lose precision in the conversion.
    #[must_use]
    pub fn from_raw(raw: u128) -> Self {
        #[allow(clippy::cast_precision_loss)]
        Self(raw as f64)
    }

    /// Returns the underlying `f64` value.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// Returns `true` if the liquidity is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Add for Liquidity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl core::iter::Sum for Liquidity {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Liquidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
