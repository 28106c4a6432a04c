//! Discrete price index of the concentrated liquidity model.

use core::fmt;

use crate::error::{DomainError, Result};

/// Minimum valid tick index (Uniswap v3 standard).
const MIN_TICK: i32 = -887_272;

/// Maximum valid tick index (Uniswap v3 standard).
const MAX_TICK: i32 = 887_272;

/// A discrete price point: `price = base^tick`.
///
/// Valid indices range from [`MIN`](Self::MIN) (`-887272`) to
/// [`MAX`](Self::MAX) (`887272`), the bounds at which Uniswap v3's
/// `sqrtPriceX96` still fits its fixed-point format.
///
/// # Examples
///
/// ```
/// use clmm_liquidity::domain::Tick;
///
/// let tick = Tick::new(-201_937).expect("in range");
/// assert_eq!(tick.floor_to_spacing(60).map(|t| t.get()), Ok(-201_960));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tick(i32);

impl Tick {
    /// Minimum valid tick (`-887272`).
    pub const MIN: Self = Self(MIN_TICK);

    /// Maximum valid tick (`887272`).
    pub const MAX: Self = Self(MAX_TICK);

    /// Neutral tick where the price is exactly `1.0`.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Tick` with range validation.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTick`] if `value` is outside
    /// `[-887272, 887272]`.
    pub const fn new(value: i32) -> Result<Self> {
        if value < MIN_TICK || value > MAX_TICK {
            return Err(DomainError::InvalidTick(
                "tick out of range [-887272, 887272]",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the underlying `i32` tick index.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Checked addition of a delta to this tick.
    ///
    /// Returns `None` if the result would leave the valid tick range.
    #[must_use]
    pub const fn checked_add(&self, delta: i32) -> Option<Self> {
        match self.0.checked_add(delta) {
            Some(v) if v >= MIN_TICK && v <= MAX_TICK => Some(Self(v)),
            _ => None,
        }
    }

    /// Returns the greatest multiple of `spacing` that is `<= self`.
    ///
    /// Uses floor division, so `-1` aligns to `-spacing` rather than `0`.
    ///
    /// # Errors
    ///
    /// - [`DomainError::InvalidTickSpacing`] if `spacing` is zero or wider
    ///   than the tick domain.
    /// - [`DomainError::InvalidTick`] if the aligned tick falls below
    ///   [`Tick::MIN`].
    pub fn floor_to_spacing(&self, spacing: u32) -> Result<Self> {
        let spacing = validate_spacing(spacing)?;
        Self::new(self.0.div_euclid(spacing) * spacing)
    }
}

/// Validates a tick spacing and returns it as `i32`.
pub(crate) fn validate_spacing(spacing: u32) -> Result<i32> {
    if spacing == 0 {
        return Err(DomainError::InvalidTickSpacing(
            "tick spacing must be greater than zero",
        ));
    }
    match i32::try_from(spacing) {
        Ok(s) if s <= MAX_TICK => Ok(s),
        _ => Err(DomainError::InvalidTickSpacing(
            "tick spacing must not exceed 887272",
        )),
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
