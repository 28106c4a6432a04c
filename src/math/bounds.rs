//! Solving for a missing range bound.
//!
//! A deposit fixes the current price and one bound; the other bound is
//! whatever makes the amounts balance. Since `√pa` (or `√pb`) enters the
//! amount formulas linearly once the other bound is fixed, every solver
//! here is a closed form.
//!
//! Each result is accepted only if the current price lies strictly inside
//! the solved range. A deposit that holds both assets cannot belong to a
//! range the price sits outside of, so any other solution is rejected with
//! [`DomainError::PriceOutsideRange`].

use core::fmt;

use crate::domain::{Liquidity, Price, PriceRange};
use crate::error::{DomainError, Result};

use super::liquidity::check_amount;

const OUTSIDE_SOLVED: DomainError =
    DomainError::PriceOutsideRange("current price must lie strictly inside the solved range");

/// Lower bound `pa` such that `base` and `quote` exactly fill a position
/// over `[pa, upper]` at `price`:
///
/// ```text
/// √pa = y / (√pb x) + √p − y / (√p x)
/// ```
///
/// # Errors
///
/// - [`DomainError::ZeroDenominator`] if `base == 0`.
/// - [`DomainError::PriceOutsideRange`] if the solution does not contain
///   `price` strictly, including when no positive bound exists.
///
/// # Examples
///
/// ```
/// use clmm_liquidity::domain::Price;
/// use clmm_liquidity::math::lower_bound_for_amounts;
///
/// // 2 ETH and 4000 USDC at 2000, top of range at 3000.
/// let p = Price::new(2000.0).expect("positive");
/// let pb = Price::new(3000.0).expect("positive");
/// let pa = lower_bound_for_amounts(2.0, 4000.0, p, pb).expect("solvable");
/// assert!((pa.get() - 1333.33).abs() < 0.01);
/// ```
pub fn lower_bound_for_amounts(base: f64, quote: f64, price: Price, upper: Price) -> Result<Price> {
    let x = check_amount(base, "base amount must be nonnegative")?;
    let y = check_amount(quote, "quote amount must be nonnegative")?;
    if x == 0.0 {
        return Err(DomainError::ZeroDenominator(
            "base amount must be nonzero to solve the lower bound",
        ));
    }
    let sp = price.sqrt().get();
    let sb = upper.sqrt().get();
    let sa = y / (sb * x) + sp - y / (sp * x);
    accept(sa, sp, sb, sa)
}

/// Upper bound `pb` such that `base` and `quote` exactly fill a position
/// over `[lower, pb]` at `price`:
///
/// ```text
/// √pb = √p y / ((√pa √p − p) x + y)
/// ```
///
/// # Errors
///
/// - [`DomainError::ZeroDenominator`] if the denominator vanishes (the
///   bound would be infinite).
/// - [`DomainError::PriceOutsideRange`] if the solution does not contain
///   `price` strictly.
pub fn upper_bound_for_amounts(base: f64, quote: f64, price: Price, lower: Price) -> Result<Price> {
    let x = check_amount(base, "base amount must be nonnegative")?;
    let y = check_amount(quote, "quote amount must be nonnegative")?;
    let sp = price.sqrt().get();
    let sa = lower.sqrt().get();
    let denominator = (sa * sp - price.get()) * x + y;
    if denominator == 0.0 {
        return Err(DomainError::ZeroDenominator(
            "amounts admit no finite upper bound",
        ));
    }
    let sb = sp * y / denominator;
    accept(sa, sp, sb, sb)
}

/// Lower bound `pa` for a position of liquidity `L` that holds `quote` at
/// `price`: `√pa = √p − y / L`.
///
/// # Errors
///
/// - [`DomainError::ZeroDenominator`] if `liquidity` is zero.
/// - [`DomainError::PriceOutsideRange`] unless `0 < pa < price`.
pub fn lower_bound_for_liquidity(liquidity: Liquidity, price: Price, quote: f64) -> Result<Price> {
    let y = check_amount(quote, "quote amount must be nonnegative")?;
    let l = nonzero(liquidity)?;
    let sp = price.sqrt().get();
    let sa = sp - y / l;
    if !(sa > 0.0 && sa < sp) {
        return Err(OUTSIDE_SOLVED);
    }
    square(sa)
}

/// Upper bound `pb` for a position of liquidity `L` that holds `base` at
/// `price`: `√pb = L √p / (L − √p x)`.
///
/// # Errors
///
/// - [`DomainError::ZeroDenominator`] if `liquidity` is zero or equals
///   `√p x`.
/// - [`DomainError::PriceOutsideRange`] unless `pb > price`.
pub fn upper_bound_for_liquidity(liquidity: Liquidity, price: Price, base: f64) -> Result<Price> {
    let x = check_amount(base, "base amount must be nonnegative")?;
    let l = nonzero(liquidity)?;
    let sp = price.sqrt().get();
    let denominator = l - sp * x;
    if denominator == 0.0 {
        return Err(DomainError::ZeroDenominator(
            "base amount exhausts the liquidity at the current price",
        ));
    }
    let sb = l * sp / denominator;
    if !(sb.is_finite() && sb > sp) {
        return Err(OUTSIDE_SOLVED);
    }
    square(sb)
}

fn nonzero(liquidity: Liquidity) -> Result<f64> {
    if liquidity.is_zero() {
        return Err(DomainError::ZeroDenominator(
            "liquidity must be nonzero to solve a bound",
        ));
    }
    Ok(liquidity.get())
}

/// Accepts `solved` (one of `sa`, `sb`) if `sa < sp < sb` holds.
fn accept(sa: f64, sp: f64, sb: f64, solved: f64) -> Result<Price> {
    if !solved.is_finite() {
        return Err(DomainError::NonFinite("solved bound must be finite"));
    }
    if !(sa > 0.0 && sa < sp && sp < sb) {
        return Err(OUTSIDE_SOLVED);
    }
    square(solved)
}

fn square(sqrt: f64) -> Result<Price> {
    Price::new(sqrt * sqrt)
}

/// Range bounds relative to the current price.
///
/// `upper = √(pb / p)` and `lower = √(pa / p)`, so a range that contains
/// the price always has `0 < lower < 1 < upper`. Squared, they are the
/// bounds as a fraction of the current price: `lower² = 0.75` means the
/// range starts 25 % below it.
///
/// Given either ratio and a deposit, the other ratio follows in closed
/// form.
///
/// # Examples
///
/// ```
/// use clmm_liquidity::domain::Price;
/// use clmm_liquidity::math::RangeRatios;
///
/// let p = Price::new(2000.0).expect("positive");
/// let ratios = RangeRatios::from_lower_ratio(p, 0.75_f64.sqrt(), 2.0, 5076.10)
///     .expect("solvable");
/// let range = ratios.into_range(p).expect("valid");
/// assert!((range.lower().get() - 1500.0).abs() < 1e-6);
/// assert!((range.upper().get() - 2500.0).abs() < 0.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeRatios {
    lower: f64,
    upper: f64,
}

impl RangeRatios {
    /// Creates ratios from `√(pa/p)` and `√(pb/p)`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::PriceOutsideRange`] unless
    /// `0 < lower < 1 < upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if !(lower.is_finite() && upper.is_finite()) {
            return Err(DomainError::NonFinite("range ratios must be finite"));
        }
        if !(lower > 0.0 && lower < 1.0 && upper > 1.0) {
            return Err(DomainError::PriceOutsideRange(
                "range ratios must satisfy 0 < lower < 1 < upper",
            ));
        }
        Ok(Self { lower, upper })
    }

    /// Ratios of an existing range at `price`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::PriceOutsideRange`] unless `price` lies
    /// strictly inside `range`.
    pub fn of_range(range: &PriceRange, price: Price) -> Result<Self> {
        let sp = price.sqrt().get();
        Self::new(
            range.sqrt_lower().get() / sp,
            range.sqrt_upper().get() / sp,
        )
    }

    /// Solves the upper ratio from a known lower ratio and a deposit.
    ///
    /// # Errors
    ///
    /// Same as [`upper_ratio_for_amounts`] and [`RangeRatios::new`].
    pub fn from_lower_ratio(price: Price, lower: f64, base: f64, quote: f64) -> Result<Self> {
        let upper = upper_ratio_for_amounts(price, lower, base, quote)?;
        Self::new(lower, upper)
    }

    /// Solves the lower ratio from a known upper ratio and a deposit.
    ///
    /// # Errors
    ///
    /// Same as [`lower_ratio_for_amounts`] and [`RangeRatios::new`].
    pub fn from_upper_ratio(price: Price, upper: f64, base: f64, quote: f64) -> Result<Self> {
        let lower = lower_ratio_for_amounts(price, upper, base, quote)?;
        Self::new(lower, upper)
    }

    /// `√(pa / p)`.
    #[must_use]
    pub const fn lower(&self) -> f64 {
        self.lower
    }

    /// `√(pb / p)`.
    #[must_use]
    pub const fn upper(&self) -> f64 {
        self.upper
    }

    /// `pa / p`, the lower bound as a fraction of the current price.
    #[must_use]
    pub fn lower_fraction(&self) -> f64 {
        self.lower * self.lower
    }

    /// `pb / p`, the upper bound as a fraction of the current price.
    #[must_use]
    pub fn upper_fraction(&self) -> f64 {
        self.upper * self.upper
    }

    /// Absolute range around `price`: `[lower² p, upper² p]`.
    ///
    /// # Errors
    ///
    /// Propagates [`PriceRange::from_f64`] errors, e.g. when a bound
    /// overflows.
    pub fn into_range(self, price: Price) -> Result<PriceRange> {
        PriceRange::from_f64(
            self.lower_fraction() * price.get(),
            self.upper_fraction() * price.get(),
        )
    }
}

impl fmt::Display for RangeRatios {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.2}% of P, {:.2}% of P]",
            self.lower_fraction() * 100.0,
            self.upper_fraction() * 100.0
        )
    }
}

/// Upper ratio `c = y / ((d − 1) p x + y)` for lower ratio `d`.
///
/// # Errors
///
/// - [`DomainError::PriceOutsideRange`] unless `0 < lower < 1`, or if the
///   solution is not above one.
/// - [`DomainError::ZeroDenominator`] if the upper bound would be infinite.
pub fn upper_ratio_for_amounts(price: Price, lower: f64, base: f64, quote: f64) -> Result<f64> {
    let x = check_amount(base, "base amount must be nonnegative")?;
    let y = check_amount(quote, "quote amount must be nonnegative")?;
    if !(lower > 0.0 && lower < 1.0) {
        return Err(DomainError::PriceOutsideRange(
            "lower ratio must lie strictly between zero and one",
        ));
    }
    let denominator = (lower - 1.0) * price.get() * x + y;
    if denominator == 0.0 {
        return Err(DomainError::ZeroDenominator(
            "amounts admit no finite upper ratio",
        ));
    }
    let upper = y / denominator;
    if !(upper.is_finite() && upper > 1.0) {
        return Err(OUTSIDE_SOLVED);
    }
    Ok(upper)
}

/// Lower ratio `d = 1 + y (1 − c) / (c p x)` for upper ratio `c`.
///
/// # Errors
///
/// - [`DomainError::PriceOutsideRange`] unless `upper > 1`, or if the
///   solution is not strictly between zero and one.
/// - [`DomainError::ZeroDenominator`] if `base == 0`.
pub fn lower_ratio_for_amounts(price: Price, upper: f64, base: f64, quote: f64) -> Result<f64> {
    let x = check_amount(base, "base amount must be nonnegative")?;
    let y = check_amount(quote, "quote amount must be nonnegative")?;
    if !(upper.is_finite() && upper > 1.0) {
        return Err(DomainError::PriceOutsideRange(
            "upper ratio must be greater than one",
        ));
    }
    if x == 0.0 {
        return Err(DomainError::ZeroDenominator(
            "base amount must be nonzero to solve the lower ratio",
        ));
    }
    let lower = 1.0 + y * (1.0 - upper) / (upper * price.get() * x);
    if !(lower > 0.0 && lower < 1.0) {
        return Err(OUTSIDE_SOLVED);
    }
    Ok(lower)
}
