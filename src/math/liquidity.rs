//! Liquidity from token amounts, and the counterpart amount of a deposit.
//!
//! These invert [`amounts_for_liquidity`](super::amounts_for_liquidity):
//!
//! ```text
//! Lx = x √p' √pb / (√pb − √p')    p' = max(p, pa)
//! Ly = y / (√p' − √pa)            p' = min(p, pb)
//! ```
//!
//! `Lx` is undefined once the price reaches the upper bound (the position
//! holds no base), and `Ly` is undefined at or below the lower bound (it
//! holds no quote).

use crate::domain::{Liquidity, Price, PriceRange, TokenAmounts};
use crate::error::{DomainError, Result};

use super::amounts::RangeComposition;

/// Liquidity provided by `base` units of the base asset over `range` at the
/// current `price`.
///
/// # Errors
///
/// - [`DomainError::NegativeAmount`] / [`DomainError::NonFinite`] for an
///   invalid amount.
/// - [`DomainError::PriceOutsideRange`] if `price >= upper`.
///
/// # Examples
///
/// ```
/// use clmm_liquidity::domain::{Price, PriceRange};
/// use clmm_liquidity::math::liquidity_for_base;
///
/// let range = PriceRange::from_f64(1500.0, 2500.0).expect("ordered");
/// let l = liquidity_for_base(2.0, &range, Price::new(2000.0).expect("positive"))
///     .expect("in range");
/// assert!((l.get() - 847.21).abs() < 0.01);
/// ```
pub fn liquidity_for_base(base: f64, range: &PriceRange, price: Price) -> Result<Liquidity> {
    let base = check_amount(base, "base amount must be nonnegative")?;
    let (sa, sb, sp) = sqrt_bounds(range, price);
    if sp >= sb {
        return Err(DomainError::PriceOutsideRange(
            "price must be below the upper bound to hold base",
        ));
    }
    let s = sp.max(sa);
    liquidity(base * s * sb / (sb - s))
}

/// Liquidity provided by `quote` units of the quote asset over `range` at
/// the current `price`.
///
/// # Errors
///
/// - [`DomainError::NegativeAmount`] / [`DomainError::NonFinite`] for an
///   invalid amount.
/// - [`DomainError::PriceOutsideRange`] if `price <= lower`.
pub fn liquidity_for_quote(quote: f64, range: &PriceRange, price: Price) -> Result<Liquidity> {
    let quote = check_amount(quote, "quote amount must be nonnegative")?;
    let (sa, sb, sp) = sqrt_bounds(range, price);
    if sp <= sa {
        return Err(DomainError::PriceOutsideRange(
            "price must be above the lower bound to hold quote",
        ));
    }
    let s = sp.min(sb);
    liquidity(quote / (s - sa))
}

/// Maximum liquidity a deposit of `amounts` can provide over `range` at
/// `price`.
///
/// Below the range only the base amount counts, above it only the quote
/// amount. Inside, the deposit is limited by whichever side runs out first,
/// `min(Lx, Ly)`; the surplus of the other side stays with the depositor.
///
/// # Errors
///
/// Returns [`DomainError::NonFinite`] if the liquidity overflows `f64`.
pub fn liquidity_for_amounts(
    amounts: TokenAmounts,
    range: &PriceRange,
    price: Price,
) -> Result<Liquidity> {
    match RangeComposition::classify(range, price) {
        RangeComposition::BelowRange => liquidity_for_base(amounts.base(), range, price),
        RangeComposition::AboveRange => liquidity_for_quote(amounts.quote(), range, price),
        RangeComposition::InRange => {
            let lx = liquidity_for_base(amounts.base(), range, price)?;
            let ly = liquidity_for_quote(amounts.quote(), range, price)?;
            Ok(if lx <= ly { lx } else { ly })
        }
    }
}

/// Quote amount that must accompany `base` units of the base asset for a
/// deposit over `range` at `price`.
///
/// # Errors
///
/// - [`DomainError::PriceOutsideRange`] unless `lower < price < upper`.
/// - Amount errors as in [`liquidity_for_base`].
///
/// # Examples
///
/// ```
/// use clmm_liquidity::domain::{Price, PriceRange};
/// use clmm_liquidity::math::quote_for_base;
///
/// // 2 ETH at 2000 USDC/ETH over [1500, 2500] needs about 5076 USDC.
/// let range = PriceRange::from_f64(1500.0, 2500.0).expect("ordered");
/// let y = quote_for_base(2.0, &range, Price::new(2000.0).expect("positive"))
///     .expect("in range");
/// assert!((y - 5076.10).abs() < 0.1);
/// ```
pub fn quote_for_base(base: f64, range: &PriceRange, price: Price) -> Result<f64> {
    require_in_range(range, price)?;
    let l = liquidity_for_base(base, range, price)?;
    let (sa, _, sp) = sqrt_bounds(range, price);
    finite(l.get() * (sp - sa))
}

/// Base amount that must accompany `quote` units of the quote asset for a
/// deposit over `range` at `price`.
///
/// # Errors
///
/// - [`DomainError::PriceOutsideRange`] unless `lower < price < upper`.
/// - Amount errors as in [`liquidity_for_quote`].
pub fn base_for_quote(quote: f64, range: &PriceRange, price: Price) -> Result<f64> {
    require_in_range(range, price)?;
    let l = liquidity_for_quote(quote, range, price)?;
    let (_, sb, sp) = sqrt_bounds(range, price);
    finite(l.get() * (sb - sp) / (sp * sb))
}

fn require_in_range(range: &PriceRange, price: Price) -> Result<()> {
    if range.contains(price) {
        Ok(())
    } else {
        Err(DomainError::PriceOutsideRange(
            "price must lie strictly inside the range",
        ))
    }
}

fn sqrt_bounds(range: &PriceRange, price: Price) -> (f64, f64, f64) {
    (
        range.sqrt_lower().get(),
        range.sqrt_upper().get(),
        price.sqrt().get(),
    )
}

fn liquidity(value: f64) -> Result<Liquidity> {
    if !value.is_finite() {
        return Err(DomainError::NonFinite("liquidity must be finite"));
    }
    Liquidity::new(value)
}

fn finite(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::NonFinite("counterpart amount must be finite"))
    }
}

/// Validates a token amount used as solver input.
pub(crate) fn check_amount(value: f64, message: &'static str) -> Result<f64> {
    if !value.is_finite() {
        return Err(DomainError::NonFinite("token amount must be finite"));
    }
    if value < 0.0 {
        return Err(DomainError::NegativeAmount(message));
    }
    Ok(value)
}
