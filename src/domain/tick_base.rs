//! Base of the exponential tick-to-price mapping.

use core::fmt;

use crate::error::{DomainError, Result};

/// The constant `b` in `price = b^tick`.
///
/// Uniswap v3 uses `1.0001`, so adjacent ticks differ by one basis point.
/// The base is carried as a value rather than baked into the formulas, so
/// forks with a different granularity can reuse the engine.
///
/// # Examples
///
/// ```
/// use clmm_liquidity::domain::TickBase;
///
/// assert!((TickBase::UNISWAP_V3.get() - 1.0001).abs() < f64::EPSILON);
/// assert!(TickBase::new(1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TickBase(f64);

impl TickBase {
    /// The Uniswap v3 base, `1.0001`.
    pub const UNISWAP_V3: Self = Self(1.0001);

    /// Creates a new `TickBase`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTickBase`] unless `value` is finite
    /// and strictly greater than one.
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || value <= 1.0 {
            return Err(DomainError::InvalidTickBase(
                "tick base must be finite and greater than one",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the underlying `f64` value.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// Natural logarithm of the base; positive by construction.
    #[must_use]
    pub fn ln(&self) -> f64 {
        self.0.ln()
    }
}

impl Default for TickBase {
    fn default() -> Self {
        Self::UNISWAP_V3
    }
}

impl fmt::Display for TickBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
